//! `<Type>Request` projections: one per registered object or interface type, with
//! placeholder field types describing which fields to ask for.
use super::Typescript;
use crate::graphql::schema::{Field, Schema};
use crate::graphql::type_ref::TypeRef;
use std::collections::BTreeSet;

const REQUEST_SUFFIX: &str = "Request";
const LEAF_PLACEHOLDER: &str = "boolean | number";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestField {
    pub name: String,
    pub expression: Typescript,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestProjection {
    pub type_name: String,
    pub fields: Vec<RequestField>,
}

impl RequestProjection {
    pub fn interface_name(&self) -> String {
        request_name(&self.type_name)
    }
}

/// Projections sorted by type name
#[derive(Debug)]
pub struct RequestProjectionSet {
    projections: Vec<RequestProjection>,
}

impl RequestProjectionSet {
    pub fn iter(&self) -> impl Iterator<Item = &RequestProjection> {
        self.projections.iter()
    }

    pub fn len(&self) -> usize {
        self.projections.len()
    }
}

fn request_name(type_name: &str) -> String {
    format!("{type_name}{REQUEST_SUFFIX}")
}

struct Resolver<'a> {
    schema: &'a Schema,
    visited: BTreeSet<&'a str>,
    pending: BTreeSet<&'a str>,
}

impl<'a> Resolver<'a> {
    fn new(schema: &'a Schema) -> Self {
        Resolver {
            schema,
            visited: BTreeSet::new(),
            pending: BTreeSet::new(),
        }
    }

    /// Marks the type behind `type_ref` pending and expands its fields once.
    fn discover(&mut self, type_ref: &'a TypeRef) {
        let mut stack = vec![type_ref];
        while let Some(type_ref) = stack.pop() {
            let Some(definition) = self.schema.get_type_for_name(type_ref.base_name()) else {
                continue;
            };
            self.pending.insert(&definition.name);
            if self.visited.insert(&definition.name) {
                stack.extend(definition.fields.iter().map(|field| &field.type_ref));
            }
        }
    }

    fn seed(&mut self, fields: impl Iterator<Item = &'a Field>) {
        for field in fields {
            self.discover(&field.type_ref);
        }
    }

    fn project_field(&self, field: &Field) -> RequestField {
        let base_name = field.type_ref.base_name();
        let mut expression = match self.schema.get_type_for_name(base_name) {
            Some(_) => request_name(base_name),
            None => LEAF_PLACEHOLDER.to_string(),
        };
        for _ in 0..field.type_ref.list_depth() {
            expression = format!("Array<{expression}>");
        }
        RequestField {
            name: field.name.clone(),
            expression,
        }
    }

    fn finish(mut self) -> RequestProjectionSet {
        // Types unreachable from any field still get a projection
        for definition in self.schema.types() {
            self.pending.insert(&definition.name);
        }
        let projections = self
            .pending
            .iter()
            .filter_map(|name| self.schema.get_type_for_name(name))
            .map(|definition| RequestProjection {
                type_name: definition.name.clone(),
                fields: definition
                    .fields
                    .iter()
                    .map(|field| self.project_field(field))
                    .collect(),
            })
            .collect();
        RequestProjectionSet { projections }
    }
}

pub fn resolve(schema: &Schema) -> RequestProjectionSet {
    let mut resolver = Resolver::new(schema);
    for definition in schema.types() {
        resolver.seed(definition.fields.iter());
    }
    resolver.seed(schema.query_fields());
    resolver.seed(schema.mutation_fields());
    resolver.finish()
}
