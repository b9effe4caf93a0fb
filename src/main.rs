use clap::Parser;
use pmp_revops_engine::cli::{self, Cli, Command};
use pmp_revops_engine::infrastructure::logging::init_logging;
use pmp_revops_engine::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run(config).await,
        Command::RunLead(args) => cli::run::run_lead(config, args).await,
        Command::RunTicket(args) => cli::run::run_ticket(config, args).await,
        Command::RunComplaint(args) => cli::run::run_complaint(config, args).await,
    }
}
