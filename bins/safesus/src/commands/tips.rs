//! Tips commands - recent, featured, search, waitlist

use crate::output::{format_count, print_json, Status};
use crate::{OutputFormat, TipsAction};
use anyhow::Result;
use owo_colors::OwoColorize;
use safesus_api_client::models::Tip;
use safesus_api_client::SafeSusClient;
use serde::Serialize;

/// Run a tips subcommand
pub async fn run(client: &SafeSusClient, action: TipsAction, format: OutputFormat) -> Result<()> {
    let (title, tips) = match action {
        TipsAction::Recent { limit } => ("Recent Tips".to_string(), client.tips().recent(limit).await?),
        TipsAction::Featured { limit } => ("Featured Tips".to_string(), client.tips().featured(limit).await?),
        TipsAction::Search { query } => {
            let results = client.tips().search(&query).await?;
            (format!("Tips matching \"{}\"", query.trim()), results)
        }
    };

    if format == OutputFormat::Json {
        return print_json(&tips);
    }

    Status::header(&title);
    for tip in &tips {
        print_tip(tip);
    }
    println!();
    Status::info(&format_count(tips.len(), "tip", "tips"));
    Ok(())
}

fn print_tip(tip: &Tip) {
    let city = tip.city_name.as_deref().unwrap_or_default();
    println!("  {} {}", tip.title.bold(), city.dimmed());
    if !tip.summary.is_empty() {
        println!("    {}", tip.summary);
    }
}

#[derive(Debug, Serialize)]
struct JsonWaitlistOutput {
    count: u64,
}

/// Print the waitlist size
pub async fn waitlist(client: &SafeSusClient, format: OutputFormat) -> Result<()> {
    let count = client.waitlist().count().await?;

    if format == OutputFormat::Json {
        return print_json(&JsonWaitlistOutput { count });
    }

    Status::success(&format_count(usize::try_from(count).unwrap_or(usize::MAX), "person", "people"));
    Ok(())
}
