use crate::helpers::cmd::TestCommandHarness;

#[test]
fn compile_self_reference() {
    TestCommandHarness::default()
        .with_fixture_directory("typescript/request/compile_self_reference")
        .run_for_success();
}

#[test]
fn compile_interfaces_and_unreachable_types() {
    TestCommandHarness::default()
        .with_fixture_directory("typescript/request/compile_interfaces_and_unreachable_types")
        .run_for_success();
}
