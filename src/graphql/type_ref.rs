//! GraphQL type references, parsed once and shared by translation and request resolution
use graphql_parser::schema;
use std::fmt;

const NON_NULL_MARKER: char = '!';

/// A field's type as written in SDL, e.g. `[String!]!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn is_nullable(&self) -> bool {
        !matches!(self, TypeRef::NonNull(_))
    }

    /// The name under all list and non-null wrapping
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }

    /// Number of list wrappers between the outside and the base name
    pub fn list_depth(&self) -> usize {
        match self {
            TypeRef::Named(_) => 0,
            TypeRef::List(inner) => 1 + inner.list_depth(),
            TypeRef::NonNull(inner) => inner.list_depth(),
        }
    }
}

/// Parsing never fails: text that is neither non-null nor bracket wrapped is taken as a name verbatim.
#[cfg(test)]
impl From<&str> for TypeRef {
    fn from(raw: &str) -> Self {
        if let Some(inner) = raw.strip_suffix(NON_NULL_MARKER) {
            return TypeRef::NonNull(Box::new(TypeRef::from(inner)));
        }
        match raw.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            Some(inner) => TypeRef::List(Box::new(TypeRef::from(inner))),
            None => TypeRef::Named(raw.to_string()),
        }
    }
}

impl<'a> From<&schema::Type<'a, String>> for TypeRef {
    fn from(parsed: &schema::Type<'a, String>) -> Self {
        match parsed {
            schema::Type::NamedType(name) => TypeRef::Named(name.clone()),
            schema::Type::ListType(inner) => TypeRef::List(Box::new(TypeRef::from(&**inner))),
            schema::Type::NonNullType(inner) => {
                TypeRef::NonNull(Box::new(TypeRef::from(&**inner)))
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}{NON_NULL_MARKER}"),
        }
    }
}
