use crate::helpers::cmd::TestCommandHarness;
use std::fs;

#[test]
fn compile_enums() {
    TestCommandHarness::default()
        .with_fixture_directory("typescript/enumeration/compile_enums")
        .run_for_success();
}

#[test]
fn compile_enum_only_schema() {
    let mut harness = TestCommandHarness::default();
    harness
        .with_schema_file("status.graphql", "enum Status { ACTIVE INACTIVE }")
        .run_for_success();
    let generated = fs::read_to_string(harness.output_path()).unwrap();
    assert!(generated.ends_with(
        "type Nullable<T> = T | null;\n\nexport enum Status {\n  ACTIVE = 'ACTIVE',\n  INACTIVE = 'INACTIVE',\n}\n"
    ));
}
