use anyhow::Result;
use tracing_subscriber::EnvFilter;

use jira_agile::cli::{self, Command};
use jira_agile::{config, AgileClient, ApiPaths, ReqwestClient};

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = cli::parse_args(&args)?;

    let mut stdout = std::io::stdout().lock();
    if invocation.command == Command::Help {
        return cli::print_help(&mut stdout);
    }

    // Load config
    let config = config::load_config()?;
    init_tracing(config.log_filter());

    let jira = config.require_jira()?;
    let http = ReqwestClient::from_config(jira)?;
    let agile = AgileClient::new(http, ApiPaths::from_config(jira));

    cli::run(&agile, &invocation, &mut stdout).await
}
