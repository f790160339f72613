use crate::cli::RuntimeConfig;
use crate::graphql::schema::{Documentation, EnumDefinition, Field, Schema, TypeDefinition};
use field::{compile_documentation, compile_field};
use request::{RequestProjection, RequestProjectionSet};
use std::collections::BTreeMap;

pub mod field;
pub mod request;

pub const HEADER: &str = "/*
 * -------------------------------------------------------
 * THIS FILE WAS AUTOMATICALLY GENERATED (DO NOT MODIFY)
 * -------------------------------------------------------
 */

/* tslint:disable */
/* eslint-disable */

";

const NULLABLE_ALIAS: &str = "type Nullable<T> = T | null;";

type Typescript = String;

/// Settings that change how GraphQL names are rendered
#[derive(Debug, Default, Clone)]
pub struct CompileConfig {
    custom_scalars: BTreeMap<String, String>,
}

impl CompileConfig {
    pub fn new(custom_scalars: BTreeMap<String, String>) -> Self {
        CompileConfig { custom_scalars }
    }

    pub fn custom_scalar(&self, name: &str) -> Option<&str> {
        self.custom_scalars.get(name).map(|expression| expression.as_str())
    }
}

impl From<&RuntimeConfig> for CompileConfig {
    fn from(runtime_config: &RuntimeConfig) -> Self {
        CompileConfig::new(runtime_config.custom_scalars().clone())
    }
}

fn compile_interface_body(
    name: &str,
    documentation: &Documentation,
    properties: impl Iterator<Item = Typescript>,
) -> Typescript {
    let doc_comment = compile_documentation(documentation, 0);
    let body = properties.collect::<Vec<_>>();
    if body.is_empty() {
        return format!("{}export interface {} {{\n}}", doc_comment, name);
    }
    format!(
        "{}export interface {} {{\n{}\n}}",
        doc_comment,
        name,
        body.join("\n")
    )
}

pub fn compile_enum(enum_definition: &EnumDefinition) -> Typescript {
    let doc_comment = compile_documentation(&enum_definition.documentation, 0);
    let values = enum_definition
        .values
        .iter()
        .map(|value| format!("\n  {} = '{}',", value, value))
        .collect::<String>();
    format!(
        "{}export enum {} {{{}\n}}",
        doc_comment, enum_definition.name, values
    )
}

pub fn compile_interface(definition: &TypeDefinition, config: &CompileConfig) -> Typescript {
    compile_interface_body(
        &definition.name,
        &definition.documentation,
        definition
            .fields
            .iter()
            .map(|field| compile_field(field, config)),
    )
}

fn compile_root_interface<'a>(
    name: &str,
    fields: impl Iterator<Item = &'a Field>,
    config: &CompileConfig,
) -> Option<Typescript> {
    let mut fields = fields.peekable();
    fields.peek()?;
    Some(compile_interface_body(
        name,
        &None,
        fields.map(|field| compile_field(field, config)),
    ))
}

pub fn compile_request(projection: &RequestProjection) -> Typescript {
    compile_interface_body(
        &projection.interface_name(),
        &None,
        projection
            .fields
            .iter()
            .map(|field| format!("  {}: {};", field.name, field.expression)),
    )
}

/// Renders the complete generated module.
pub fn compile(
    schema: &Schema,
    projections: &RequestProjectionSet,
    config: &CompileConfig,
) -> Typescript {
    let mut sections = Vec::with_capacity(3 + projections.len());
    sections.push(NULLABLE_ALIAS.to_string());
    sections.extend(schema.enums().map(compile_enum));
    sections.extend(
        schema
            .types()
            .map(|definition| compile_interface(definition, config)),
    );
    sections.extend(compile_root_interface("Query", schema.query_fields(), config));
    sections.extend(compile_root_interface(
        "Mutation",
        schema.mutation_fields(),
        config,
    ));
    sections.extend(projections.iter().map(compile_request));
    format!("{}{}\n", HEADER, sections.join("\n\n"))
}
