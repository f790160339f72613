use crate::cli::{DebugLog, PrintableMessage};
use graphql_parser::schema as parsed_schema;
use graphql_parser::schema::{Definition, TypeDefinition as ParsedTypeDefinition, TypeExtension};
use schema::{Documentation, EnumDefinition, Field, Insertion, Schema, TypeDefinition, TypeKind};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use type_ref::TypeRef;

pub mod schema;
pub mod type_ref;

const SCHEMA_FILE_EXTENSIONS: [&str; 2] = ["graphql", "graphqls"];
const QUERY_TYPE_NAME: &str = "Query";
const MUTATION_TYPE_NAME: &str = "Mutation";

type ParsedDocument<'a> = parsed_schema::Document<'a, String>;
type ParsedField<'a> = parsed_schema::Field<'a, String>;
type ParsedEnumValue<'a> = parsed_schema::EnumValue<'a, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootOperation {
    Query,
    Mutation,
}

impl RootOperation {
    fn from_type_name(name: &str) -> Option<Self> {
        match name {
            QUERY_TYPE_NAME => Some(RootOperation::Query),
            MUTATION_TYPE_NAME => Some(RootOperation::Mutation),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            RootOperation::Query => QUERY_TYPE_NAME,
            RootOperation::Mutation => MUTATION_TYPE_NAME,
        }
    }
}

/// A top level definition of one document, after its extensions are folded in
#[derive(Debug)]
enum DocumentDefinition {
    Type(TypeDefinition),
    Enum(EnumDefinition),
}

impl DocumentDefinition {
    fn name(&self) -> &str {
        match self {
            DocumentDefinition::Type(definition) => &definition.name,
            DocumentDefinition::Enum(definition) => &definition.name,
        }
    }
}

#[derive(Debug)]
enum DocumentExtension<'a> {
    Fields(&'a str, Vec<Field>),
    Values(&'a str, Vec<String>),
}

fn read_graphql_file(path: &Path) -> Result<String, PrintableMessage> {
    File::open(path)
        .and_then(|file| {
            let mut buf_reader = BufReader::new(file);
            let mut contents = String::new();
            buf_reader.read_to_string(&mut contents)?;
            Ok(contents)
        })
        .map_err(|io_error| PrintableMessage::new_compile_error_from_read_io_error(&io_error, path))
}

fn parse_graphql_file<'a>(
    contents: &'a str,
    file_path: &Path,
) -> Result<ParsedDocument<'a>, PrintableMessage> {
    parsed_schema::parse_schema::<String>(contents).map_err(|parse_error| {
        // The parser reports over several lines; keep the diagnostic on one.
        let reason = parse_error
            .to_string()
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        PrintableMessage::new_simple_compile_error(&format!(
            "could not parse `{}`: {reason}",
            file_path.display()
        ))
    })
}

fn makedir_p(path: &Path) -> Result<(), PrintableMessage> {
    std::fs::create_dir_all(path).map_err(|io_error| {
        PrintableMessage::new_compile_error_from_write_io_error(&io_error, path)
    })
}

fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map_or(false, |extension| SCHEMA_FILE_EXTENSIONS.contains(&extension))
}

fn collect_schema_files(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), PrintableMessage> {
    let readdir = std::fs::read_dir(dir).map_err(|io_error| {
        PrintableMessage::new_compile_error_from_read_io_error(&io_error, dir)
    })?;
    for raw_entry in readdir {
        let path = raw_entry
            .map_err(|io_error| {
                PrintableMessage::new_compile_error_from_read_io_error(&io_error, dir)
            })?
            .path();
        if path.is_dir() {
            collect_schema_files(&path, found)?;
        } else if path.is_file() && is_schema_file(&path) {
            found.push(path);
        }
    }
    Ok(())
}

/// All schema files under `input_dir`, in lexical path order.
pub fn find_schema_files(input_dir: &Path) -> Result<Vec<PathBuf>, PrintableMessage> {
    if !input_dir.is_dir() {
        return Err(PrintableMessage::new_simple_compile_error(&format!(
            "input directory does not exist: `{}`",
            input_dir.display()
        )));
    }
    let mut found = Vec::new();
    collect_schema_files(input_dir, &mut found)?;
    found.sort();
    Ok(found)
}

fn documentation_from_parsed(description: &Option<String>) -> Documentation {
    description
        .as_ref()
        .filter(|docs| !docs.trim().is_empty())
        .cloned()
}

fn fields_from_parsed(parsed_fields: &[ParsedField]) -> Vec<Field> {
    parsed_fields
        .iter()
        .map(|parsed| Field {
            name: parsed.name.clone(),
            documentation: documentation_from_parsed(&parsed.description),
            type_ref: TypeRef::from(&parsed.field_type),
        })
        .collect()
}

fn values_from_parsed(parsed_values: &[ParsedEnumValue]) -> Vec<String> {
    parsed_values.iter().map(|value| value.name.clone()).collect()
}

fn apply_extension(
    definitions: &mut Vec<DocumentDefinition>,
    extension: DocumentExtension,
    path: &Path,
) -> Result<(), PrintableMessage> {
    let name = match &extension {
        DocumentExtension::Fields(name, _) | DocumentExtension::Values(name, _) => *name,
    };
    let target = definitions
        .iter_mut()
        .find(|definition| match (definition, &extension) {
            (DocumentDefinition::Type(_), DocumentExtension::Fields(..))
            | (DocumentDefinition::Enum(_), DocumentExtension::Values(..)) => {
                definition.name() == name
            }
            _ => false,
        });
    let root_definition = match (target, extension) {
        (Some(DocumentDefinition::Type(definition)), DocumentExtension::Fields(_, mut fields)) => {
            definition.fields.append(&mut fields);
            None
        }
        (Some(DocumentDefinition::Enum(definition)), DocumentExtension::Values(_, mut values)) => {
            definition.values.append(&mut values);
            None
        }
        // Query and Mutation extensions need no base definition
        (None, DocumentExtension::Fields(name, fields))
            if RootOperation::from_type_name(name).is_some() =>
        {
            Some(DocumentDefinition::Type(TypeDefinition {
                name: name.to_string(),
                kind: TypeKind::Object,
                documentation: None,
                fields,
                origin: path.to_path_buf(),
            }))
        }
        _ => {
            return Err(PrintableMessage::new_simple_compile_error(&format!(
                "cannot extend `{name}` in `{}` because it is not defined in that document",
                path.display()
            )));
        }
    };
    if let Some(root_definition) = root_definition {
        definitions.push(root_definition);
    }
    Ok(())
}

fn collect_document_definitions(
    document: &ParsedDocument,
    path: &Path,
) -> Result<Vec<DocumentDefinition>, PrintableMessage> {
    let mut definitions = Vec::with_capacity(document.definitions.len());
    let mut extensions = Vec::new();
    for definition in &document.definitions {
        match definition {
            Definition::TypeDefinition(ParsedTypeDefinition::Object(object)) => {
                definitions.push(DocumentDefinition::Type(TypeDefinition {
                    name: object.name.clone(),
                    kind: TypeKind::Object,
                    documentation: documentation_from_parsed(&object.description),
                    fields: fields_from_parsed(&object.fields),
                    origin: path.to_path_buf(),
                }));
            }
            Definition::TypeDefinition(ParsedTypeDefinition::Interface(interface)) => {
                definitions.push(DocumentDefinition::Type(TypeDefinition {
                    name: interface.name.clone(),
                    kind: TypeKind::Interface,
                    documentation: documentation_from_parsed(&interface.description),
                    fields: fields_from_parsed(&interface.fields),
                    origin: path.to_path_buf(),
                }));
            }
            Definition::TypeDefinition(ParsedTypeDefinition::Enum(enum_type)) => {
                definitions.push(DocumentDefinition::Enum(EnumDefinition {
                    name: enum_type.name.clone(),
                    documentation: documentation_from_parsed(&enum_type.description),
                    values: values_from_parsed(&enum_type.values),
                    origin: path.to_path_buf(),
                }));
            }
            Definition::TypeExtension(TypeExtension::Object(extension)) => {
                extensions.push(DocumentExtension::Fields(
                    &extension.name,
                    fields_from_parsed(&extension.fields),
                ));
            }
            Definition::TypeExtension(TypeExtension::Interface(extension)) => {
                extensions.push(DocumentExtension::Fields(
                    &extension.name,
                    fields_from_parsed(&extension.fields),
                ));
            }
            Definition::TypeExtension(TypeExtension::Enum(extension)) => {
                extensions.push(DocumentExtension::Values(
                    &extension.name,
                    values_from_parsed(&extension.values),
                ));
            }
            // Scalars, unions, input objects, directives and schema definitions are not emitted
            _ => {}
        }
    }
    for extension in extensions {
        apply_extension(&mut definitions, extension, path)?;
    }
    Ok(definitions)
}

fn add_root_fields(
    schema: &mut Schema,
    root: RootOperation,
    fields: Vec<Field>,
    path: &Path,
    log: &DebugLog,
    messages: &mut Vec<PrintableMessage>,
) {
    for field in fields {
        log.trace(format_args!("Adding {} field: {}", root.type_name(), field.name));
        let name = field.name.clone();
        let type_ref = field.type_ref.clone();
        let replaced = match root {
            RootOperation::Query => schema.add_query_field(field),
            RootOperation::Mutation => schema.add_mutation_field(field),
        };
        match replaced {
            Some(previous) if previous.type_ref != type_ref => {
                let mut warning = PrintableMessage::new_compile_warning(&format!(
                    "{} field `{name}` redefined as `{type_ref}`, replacing `{}`",
                    root.type_name(),
                    previous.type_ref,
                ));
                warning.with_source_information(path);
                messages.push(warning);
            }
            _ => {}
        }
    }
}

/// Classifies the definitions of one parsed document and merges them into `schema`.
pub fn ingest(
    schema: &mut Schema,
    document: &ParsedDocument,
    path: &Path,
    log: &DebugLog,
    messages: &mut Vec<PrintableMessage>,
) -> Result<(), PrintableMessage> {
    for definition in collect_document_definitions(document, path)? {
        match definition {
            DocumentDefinition::Type(definition) => {
                if let Some(root) = RootOperation::from_type_name(&definition.name) {
                    add_root_fields(schema, root, definition.fields, path, log, messages);
                    continue;
                }
                let (name, kind) = (definition.name.clone(), definition.kind);
                match schema.add_type(definition)? {
                    Insertion::Added => log.trace(format_args!("Added {kind}: {name}")),
                    Insertion::AlreadyPresent => log.trace(format_args!(
                        "{name} already defined with the same shape"
                    )),
                    Insertion::KeptFirst => log.trace(format_args!(
                        "Skipped conflicting definition of {kind} {name}, keeping the first one"
                    )),
                }
            }
            DocumentDefinition::Enum(definition) => {
                let name = definition.name.clone();
                match schema.add_enum(definition)? {
                    Insertion::Added => log.trace(format_args!("Added enum: {name}")),
                    Insertion::AlreadyPresent => log.trace(format_args!(
                        "Enum {name} already defined with the same values"
                    )),
                    Insertion::KeptFirst => log.trace(format_args!(
                        "Skipped conflicting definition of enum {name}, keeping the first one"
                    )),
                }
            }
        }
    }
    Ok(())
}

/// Reads, parses and ingests one schema file.
pub fn compile_file(
    path: &Path,
    schema: &mut Schema,
    log: &DebugLog,
    messages: &mut Vec<PrintableMessage>,
) -> Result<(), PrintableMessage> {
    log.trace(format_args!("Processing file: {}", path.display()));
    let contents = read_graphql_file(path)?;
    let document = parse_graphql_file(&contents, path)?;
    ingest(schema, &document, path, log, messages)
}

/// Writes the generated module, creating its directory when needed.
pub fn write_generated_file(path: &Path, contents: &str) -> Result<(), PrintableMessage> {
    if let Some(parent_dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        makedir_p(parent_dir)?;
    }
    std::fs::write(path, contents).map_err(|io_error| {
        PrintableMessage::new_compile_error_from_write_io_error(&io_error, path)
    })
}
