//! Interactive loop: stdin commands, a refresh timer and redraws when a
//! background refresh lands.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use coinboard_core::{AssetListViewModel, DisplayAsset, Error};

use crate::commands::{parse_command, Command, HELP};
use crate::render::{render_favorites, render_filter_line, render_status, render_table};

pub async fn run(
    view_model: Arc<AssetListViewModel>,
    refresh_interval: Option<Duration>,
) -> anyhow::Result<()> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<()>();
    let mut ticker = refresh_interval.map(|period| {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    spawn_refresh(&view_model, &done_tx);
    draw(&view_model)?;
    say("Type /help for commands.")?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                if !handle_command(&view_model, &done_tx, parse_command(&line))? {
                    break;
                }
            }
            Some(()) = done_rx.recv() => draw(&view_model)?,
            _ = next_tick(&mut ticker) => {
                debug!("Auto-refresh tick");
                spawn_refresh(&view_model, &done_tx);
            }
        }
    }

    Ok(())
}

/// Run one command. Returns `false` when the loop should stop.
fn handle_command(
    view_model: &Arc<AssetListViewModel>,
    done_tx: &mpsc::UnboundedSender<()>,
    command: Command,
) -> anyhow::Result<bool> {
    match command {
        Command::Filter(text) => {
            view_model.set_filter(text);
            draw(view_model)?;
        }
        Command::ToggleFavorite(query) => {
            let assets = view_model.assets();
            let asset_id = resolve_asset_id(&assets, &query).unwrap_or(query);
            match view_model.toggle_favorite(&asset_id) {
                Ok(is_favorite) => {
                    draw(view_model)?;
                    if is_favorite {
                        say(&format!("★ {} added to favorites", asset_id))?;
                    } else {
                        say(&format!("☆ {} removed from favorites", asset_id))?;
                    }
                }
                Err(Error::AssetNotFound(id)) => say(&format!("No asset matches {:?}", id))?,
                Err(e) => {
                    warn!("Toggling favorite {} failed: {}", asset_id, e);
                    say(&format!("Could not update favorites: {}", e))?;
                }
            }
        }
        Command::ShowFavorites => say(&render_favorites(&view_model.favorites().favorites()))?,
        Command::Refresh => {
            say("Refreshing...")?;
            spawn_refresh(view_model, done_tx);
        }
        Command::Help => say(HELP)?,
        Command::Quit => return Ok(false),
        Command::Invalid(hint) => say(&hint)?,
    }
    Ok(true)
}

/// Match a `/fav` argument against ids first, then names and symbols,
/// ignoring case.
pub fn resolve_asset_id(assets: &[DisplayAsset], query: &str) -> Option<String> {
    assets
        .iter()
        .find(|a| a.id == query)
        .or_else(|| assets.iter().find(|a| a.id.eq_ignore_ascii_case(query)))
        .or_else(|| assets.iter().find(|a| a.name.eq_ignore_ascii_case(query)))
        .or_else(|| {
            assets.iter().find(|a| {
                a.symbol
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(query))
            })
        })
        .map(|a| a.id.clone())
}

fn spawn_refresh(view_model: &Arc<AssetListViewModel>, done_tx: &mpsc::UnboundedSender<()>) {
    let view_model = Arc::clone(view_model);
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        // Failures are recorded on the view model and shown in the status line.
        let _ = view_model.refresh().await;
        let _ = done_tx.send(());
    });
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn draw(view_model: &AssetListViewModel) -> std::io::Result<()> {
    let visible = view_model.visible_assets();
    let total = view_model.assets().len();
    let mut out = std::io::stdout().lock();

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        render_status(&view_model.status(), view_model.last_refreshed_at())
    )?;
    if let Some(line) = render_filter_line(&view_model.filter(), visible.len(), total) {
        writeln!(out, "{}", line)?;
    }
    write!(out, "{}", render_table(&visible))?;
    out.flush()
}

fn say(message: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", message)?;
    out.flush()
}
