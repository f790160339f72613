use super::{CompileConfig, Typescript};
use crate::graphql::schema::{Documentation, Field};
use crate::graphql::type_ref::TypeRef;

/// A TypeScript expression for a GraphQL type reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub expression: Typescript,
    pub nullable: bool,
}

pub fn compile_scalar(name: &str) -> Option<&'static str> {
    match name {
        "String" | "ID" | "DateTime" => Some("string"),
        "Int" | "Float" => Some("number"),
        "Boolean" => Some("boolean"),
        "JSONObject" => Some("Record<string, unknown>"),
        _ => None,
    }
}

fn compile_type_expression(type_ref: &TypeRef, config: &CompileConfig) -> Typescript {
    match type_ref {
        TypeRef::NonNull(inner) => compile_type_expression(inner, config),
        TypeRef::List(inner) => format!("Array<{}>", compile_type_expression(inner, config)),
        TypeRef::Named(name) => config
            .custom_scalar(name)
            .or_else(|| compile_scalar(name))
            .unwrap_or(name.as_str())
            .to_string(),
    }
}

pub fn translate(type_ref: &TypeRef, config: &CompileConfig) -> Translation {
    Translation {
        expression: compile_type_expression(type_ref, config),
        nullable: type_ref.is_nullable(),
    }
}

#[cfg(test)]
pub fn translate_raw(raw: &str, config: &CompileConfig) -> Translation {
    translate(&TypeRef::from(raw), config)
}

pub fn compile_documentation(docs: &Documentation, tab_width: usize) -> String {
    match docs {
        Some(docs) => {
            let tab = " ".repeat(tab_width);
            let processed_desc = docs
                .lines()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<&str>>()
                .join(&format!("\n {}* ", tab))
                .replace("*/", "");
            format!("/**\n {}* {}\n {}*/\n{}", tab, processed_desc, tab, tab)
        }
        None => String::new(),
    }
}

/// Renders one interface property, optional and `Nullable` when the reference is nullable.
pub fn compile_field(field: &Field, config: &CompileConfig) -> Typescript {
    let doc = compile_documentation(&field.documentation, 2);
    let translation = translate(&field.type_ref, config);
    if translation.nullable {
        format!(
            "  {}{}?: Nullable<{}>;",
            doc, field.name, translation.expression
        )
    } else {
        format!("  {}{}: {};", doc, field.name, translation.expression)
    }
}
