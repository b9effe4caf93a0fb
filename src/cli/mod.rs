//! Command-line interface

pub mod run;
pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pmp-revops-engine", version, about = "RevOps automation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP API server
    Serve,

    /// Run the lead qualification pipeline once
    RunLead(RunArgs),

    /// Run the ticket triage pipeline once
    RunTicket(RunArgs),

    /// Run the complaint classification pipeline once
    RunComplaint(RunArgs),
}

#[derive(Debug, clap::Args)]
pub struct RunArgs {
    /// Record id to process; omitted means "next new record"
    #[arg(long)]
    pub id: Option<String>,

    /// Force the deterministic path even when the smart path is configured
    #[arg(long)]
    pub rules_only: bool,
}
