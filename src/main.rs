mod flags;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use oae_activity::activity::model::{ActivityStreamPage, CurrentUser};
use oae_activity::activity::prepare::prepare_activity;
use oae_activity::activity::summarize_page;
use oae_activity::config::Config;
use serde::Serialize;
use tracing::{info, warn};

use crate::flags::{OaeActivity, OaeActivityCmd};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let flags = OaeActivity::from_env_or_exit();
    let config = match &flags.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match flags.subcommand {
        OaeActivityCmd::Summarize(cmd) => {
            let me = current_user(&config, cmd.me);
            let page = read_page(&cmd.page)?;
            let mut summaries = Vec::with_capacity(page.items.len());
            for (index, result) in summarize_page(&me, &page, &config.summary)
                .into_iter()
                .enumerate()
            {
                match result {
                    Ok(summary) => summaries.push(summary),
                    Err(error) => warn!(index, %error, "unable to summarize activity, skipped"),
                }
            }
            print_json(&summaries, cmd.pretty)
        }
        OaeActivityCmd::Prepare(cmd) => {
            let me = current_user(&config, cmd.me);
            let page = read_page(&cmd.page)?;
            let prepared: Vec<_> = page
                .items
                .iter()
                .map(|activity| prepare_activity(&me, activity))
                .collect();
            print_json(&prepared, cmd.pretty)
        }
    }
}

fn current_user(config: &Config, me: Option<String>) -> CurrentUser {
    let mut user = config.current_user.clone();
    if let Some(id) = me {
        user.id = id;
    }
    user
}

fn read_page(path: &Path) -> Result<ActivityStreamPage> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("unable to read activity page {}", path.display()))?;
    let page: ActivityStreamPage = serde_json::from_str(&text)
        .with_context(|| format!("unable to parse activity page {}", path.display()))?;
    info!(
        items = page.items.len(),
        newest = ?page.items.first().and_then(|activity| activity.published_at()),
        "read activity stream page"
    );
    Ok(page)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
