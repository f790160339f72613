mod cli;
mod graphql;
mod typescript;
mod work;

fn main() {
    let (messages, result) = match cli::RuntimeConfig::from_cli() {
        Ok(config) => work::run(&config),
        Err(error) => (Vec::new(), Err(error)),
    };
    cli::print_work_result(messages, result);
}
