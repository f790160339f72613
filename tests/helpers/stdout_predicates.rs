use predicates::prelude::PredicateBooleanExt;
use predicates::str as p_str;
use std::path::Path;

pub fn contains_graphql_file_error(file_path: impl AsRef<Path>) -> impl predicates::Predicate<str> {
    p_str::contains(format!("\n  --> {}", file_path.as_ref().display()))
}

pub fn contains_definition_conflict(
    kind: &str,
    name: &str,
    first_path: impl AsRef<Path>,
    conflicting_path: impl AsRef<Path>,
) -> impl predicates::Predicate<str> {
    p_str::contains(format!("error: {kind} `{name}` has conflicting definitions")).and(
        p_str::contains(format!(
            "= help: First defined in `{}`, redefined with a different shape in `{}`.",
            first_path.as_ref().display(),
            conflicting_path.as_ref().display(),
        )),
    )
}

pub fn contains_completion_message(output_path: impl AsRef<Path>) -> impl predicates::Predicate<str> {
    p_str::contains(format!(
        "TypeScript file generation completed. File saved at: {}",
        output_path.as_ref().display()
    ))
}
