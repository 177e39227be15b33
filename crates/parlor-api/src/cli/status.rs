//! Room status command.

use anyhow::Result;
use chrono::Utc;
use console::style;

use crate::state::AppState;

/// Display a short room dashboard.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let participants = state.room.list_participants().await?;
    let stale_after = chrono::Duration::from_std(state.config.stale_after())?;
    let now = Utc::now();
    let stale = participants
        .iter()
        .filter(|p| p.is_stale(now, stale_after))
        .count();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "participants": participants.len(),
            "stale": stale,
            "sweep_interval_secs": state.config.sweep_interval().as_secs(),
            "stale_after_secs": state.config.stale_after().as_secs(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} v{}",
        style("Parlor").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("  Participants:  {}", style(participants.len()).cyan().bold());
    if stale > 0 {
        println!("  Awaiting sweep: {}", style(stale).yellow());
    }
    println!(
        "  Sweep:         every {}s, evict after {}s",
        state.config.sweep_interval().as_secs(),
        state.config.stale_after().as_secs()
    );
    println!("  Data dir:      {}", style(state.data_dir.display()).dim());
    println!();

    Ok(())
}
