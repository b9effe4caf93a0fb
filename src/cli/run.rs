//! One-shot pipeline subcommands

use anyhow::Context;
use serde::Serialize;

use super::RunArgs;
use crate::api::AppState;
use crate::config::AppConfig;

pub async fn run_lead(config: AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let state = crate::create_app_state(config).await?;
    let use_llm = effective_use_llm(&state, &args);

    let lead = match args.id {
        Some(ref id) => Some(
            state
                .crm
                .fetch_lead(id)
                .await?
                .with_context(|| format!("lead '{id}' not found"))?,
        ),
        None => None,
    };

    let final_state = state
        .lead_service
        .run(lead, use_llm)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    print_state(&final_state)
}

pub async fn run_ticket(config: AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let state = crate::create_app_state(config).await?;
    let use_llm = effective_use_llm(&state, &args);
    let ticket = fetch_case(&state, &args).await?;

    let final_state = state
        .ticket_service
        .run(ticket, use_llm)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    print_state(&final_state)
}

pub async fn run_complaint(config: AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let state = crate::create_app_state(config).await?;
    let use_llm = effective_use_llm(&state, &args);
    let ticket = fetch_case(&state, &args).await?;

    let final_state = state
        .complaint_service
        .run(ticket, use_llm)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    print_state(&final_state)
}

fn effective_use_llm(state: &AppState, args: &RunArgs) -> bool {
    !args.rules_only && state.config.llm.enabled
}

async fn fetch_case(
    state: &AppState,
    args: &RunArgs,
) -> anyhow::Result<Option<crate::domain::ticket::TicketRecord>> {
    match args.id {
        Some(ref id) => Ok(Some(
            state
                .crm
                .fetch_case(id)
                .await?
                .with_context(|| format!("case '{id}' not found"))?,
        )),
        None => Ok(None),
    }
}

fn print_state<S: Serialize>(state: &S) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}
