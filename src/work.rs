use crate::cli::{PrintableMessage, RuntimeConfig};
use crate::graphql::schema::Schema;
use crate::typescript::{self, CompileConfig};
use std::path::PathBuf;

/// Diagnostics gathered along the way plus the written path or the error that stopped the run
pub type WorkResult = (Vec<PrintableMessage>, Result<PathBuf, PrintableMessage>);

fn compile_schema_dir(
    config: &RuntimeConfig,
    messages: &mut Vec<PrintableMessage>,
) -> Result<PathBuf, PrintableMessage> {
    let log = config.debug_log();
    let mut schema = Schema::new(config.merge_mode());
    for path in crate::graphql::find_schema_files(config.input_dir())? {
        crate::graphql::compile_file(&path, &mut schema, &log, messages)?;
    }
    let projections = typescript::request::resolve(&schema);
    let contents = typescript::compile(&schema, &projections, &CompileConfig::from(config));
    let output_path = config.output_path().to_path_buf();
    log.trace(format_args!("Writing {}", output_path.display()));
    crate::graphql::write_generated_file(&output_path, &contents)?;
    Ok(output_path)
}

pub fn run(config: &RuntimeConfig) -> WorkResult {
    let mut messages = Vec::new();
    let result = compile_schema_dir(config, &mut messages);
    (messages, result)
}
