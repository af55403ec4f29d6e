use clap::Parser;

use eventcrm_cli::{AppConfig, Cli, Console};

fn main() -> anyhow::Result<()> {
    eventcrm_observability::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let console = Console::new(cli.verbosity.unwrap_or(config.verbosity));

    eventcrm_cli::run(cli, &config, &console)
}
