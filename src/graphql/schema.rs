//! Merged view of every schema document ingested during a run
use super::type_ref::TypeRef;
use crate::cli::PrintableMessage;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

pub type Documentation = Option<String>;

#[derive(Debug)]
pub enum Error {
    ConflictingType {
        name: String,
        first_origin: PathBuf,
        conflicting_origin: PathBuf,
    },
    ConflictingEnum {
        name: String,
        first_origin: PathBuf,
        conflicting_origin: PathBuf,
    },
    /// The same name used for a type or interface and for an enum
    ConflictingKind {
        name: String,
        first_origin: PathBuf,
        conflicting_origin: PathBuf,
    },
}

impl From<Error> for PrintableMessage {
    fn from(error: Error) -> Self {
        let (message, first_origin, conflicting_origin) = match error {
            Error::ConflictingType {
                name,
                first_origin,
                conflicting_origin,
            } => (
                format!("type or interface `{name}` has conflicting definitions"),
                first_origin,
                conflicting_origin,
            ),
            Error::ConflictingEnum {
                name,
                first_origin,
                conflicting_origin,
            } => (
                format!("enum `{name}` has conflicting definitions"),
                first_origin,
                conflicting_origin,
            ),
            Error::ConflictingKind {
                name,
                first_origin,
                conflicting_origin,
            } => (
                format!("`{name}` has conflicting definitions as both an enum and a type or interface"),
                first_origin,
                conflicting_origin,
            ),
        };
        let mut printable = PrintableMessage::new_simple_compile_error(&message);
        printable.with_help_text(&format!(
            "First defined in `{}`, redefined with a different shape in `{}`. Pass --skipChecks to keep the first definition.",
            first_origin.display(),
            conflicting_origin.display(),
        ));
        printable
    }
}

type Result<T> = std::result::Result<T, Error>;

/// How repeated definitions of the same name are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Repeats must have an identical shape
    Strict,
    /// Repeats are ignored and the first definition wins
    Permissive,
}

/// What happened to a definition handed to the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Added,
    AlreadyPresent,
    KeptFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Interface,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Object => write!(f, "type"),
            TypeKind::Interface => write!(f, "interface"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub documentation: Documentation,
    pub type_ref: TypeRef,
}

#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    pub documentation: Documentation,
    pub fields: Vec<Field>,
    pub origin: PathBuf,
}

#[derive(Debug, Clone)]
pub struct EnumDefinition {
    pub name: String,
    pub documentation: Documentation,
    pub values: Vec<String>,
    pub origin: PathBuf,
}

trait Definition {
    fn origin(&self) -> &PathBuf;

    /// Positional comparison; documentation and origin never count.
    fn has_same_shape(&self, other: &Self) -> bool;
}

impl Definition for TypeDefinition {
    fn origin(&self) -> &PathBuf {
        &self.origin
    }

    fn has_same_shape(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(ours, theirs)| ours.name == theirs.name && ours.type_ref == theirs.type_ref)
    }
}

impl Definition for EnumDefinition {
    fn origin(&self) -> &PathBuf {
        &self.origin
    }

    fn has_same_shape(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

/// Inserts `definition` or reconciles it with an existing one, yielding the two
/// origins on a shape mismatch in strict mode.
fn merge_definition<D: Definition>(
    lookup: &mut BTreeMap<String, D>,
    name: String,
    definition: D,
    mode: MergeMode,
) -> std::result::Result<Insertion, (PathBuf, PathBuf)> {
    match lookup.entry(name) {
        Entry::Vacant(vacancy) => {
            vacancy.insert(definition);
            Ok(Insertion::Added)
        }
        Entry::Occupied(occupant) => {
            let existing = occupant.get();
            if existing.has_same_shape(&definition) {
                return Ok(Insertion::AlreadyPresent);
            }
            match mode {
                MergeMode::Permissive => Ok(Insertion::KeptFirst),
                MergeMode::Strict => Err((existing.origin().clone(), definition.origin().clone())),
            }
        }
    }
}

pub struct Schema {
    mode: MergeMode,
    types: BTreeMap<String, TypeDefinition>,
    enums: BTreeMap<String, EnumDefinition>,
    query_fields: BTreeMap<String, Field>,
    mutation_fields: BTreeMap<String, Field>,
}

impl Schema {
    pub fn new(mode: MergeMode) -> Self {
        Schema {
            mode,
            types: BTreeMap::new(),
            enums: BTreeMap::new(),
            query_fields: BTreeMap::new(),
            mutation_fields: BTreeMap::new(),
        }
    }

    /// Names are shared between types and enums; a clash across the two is a conflict.
    fn check_kind(
        &self,
        name: &str,
        existing_origin: Option<&PathBuf>,
        conflicting_origin: &PathBuf,
    ) -> Result<Option<Insertion>> {
        match (existing_origin, self.mode) {
            (None, _) => Ok(None),
            (Some(_), MergeMode::Permissive) => Ok(Some(Insertion::KeptFirst)),
            (Some(first_origin), MergeMode::Strict) => Err(Error::ConflictingKind {
                name: name.to_string(),
                first_origin: first_origin.clone(),
                conflicting_origin: conflicting_origin.clone(),
            }),
        }
    }

    pub fn add_type(&mut self, definition: TypeDefinition) -> Result<Insertion> {
        let name = definition.name.clone();
        let existing_enum = self.enums.get(&name).map(|existing| &existing.origin);
        if let Some(insertion) = self.check_kind(&name, existing_enum, &definition.origin)? {
            return Ok(insertion);
        }
        merge_definition(&mut self.types, name.clone(), definition, self.mode).map_err(
            |(first_origin, conflicting_origin)| Error::ConflictingType {
                name,
                first_origin,
                conflicting_origin,
            },
        )
    }

    pub fn add_enum(&mut self, definition: EnumDefinition) -> Result<Insertion> {
        let name = definition.name.clone();
        let existing_type = self.types.get(&name).map(|existing| &existing.origin);
        if let Some(insertion) = self.check_kind(&name, existing_type, &definition.origin)? {
            return Ok(insertion);
        }
        merge_definition(&mut self.enums, name.clone(), definition, self.mode).map_err(
            |(first_origin, conflicting_origin)| Error::ConflictingEnum {
                name,
                first_origin,
                conflicting_origin,
            },
        )
    }

    /// Last writer wins; the replaced field, if any, is handed back.
    pub fn add_query_field(&mut self, field: Field) -> Option<Field> {
        self.query_fields.insert(field.name.clone(), field)
    }

    /// Last writer wins; the replaced field, if any, is handed back.
    pub fn add_mutation_field(&mut self, field: Field) -> Option<Field> {
        self.mutation_fields.insert(field.name.clone(), field)
    }

    pub fn get_type_for_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumDefinition> {
        self.enums.values()
    }

    pub fn query_fields(&self) -> impl Iterator<Item = &Field> {
        self.query_fields.values()
    }

    pub fn mutation_fields(&self) -> impl Iterator<Item = &Field> {
        self.mutation_fields.values()
    }
}
