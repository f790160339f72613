use crate::helpers::cmd::TestCommandHarness;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn compile_identical_definitions() {
    TestCommandHarness::default()
        .with_fixture_directory("typescript/merge/compile_identical_definitions")
        .run_for_success();
}

#[test]
fn compile_with_skip_checks_in_config() {
    TestCommandHarness::default()
        .with_fixture_directory("typescript/merge/compile_with_skip_checks_in_config")
        .run_for_success();
}

#[test]
fn compile_root_fields_across_files() {
    TestCommandHarness::default()
        .with_fixture_directory("typescript/merge/compile_root_fields_across_files")
        .run_for_success()
        .stdout(contains("warning:").not());
}
