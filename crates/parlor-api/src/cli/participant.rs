//! Participant listing command.

use anyhow::Result;
use chrono::Utc;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// List participants with how long ago each last checked in.
pub async fn list_participants(state: &AppState, json: bool) -> Result<()> {
    let participants = state.room.list_participants().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&participants)?);
        return Ok(());
    }

    if participants.is_empty() {
        println!();
        println!("  {} The room is empty.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let stale_after = chrono::Duration::from_std(state.config.stale_after())?;
    let now = Utc::now();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Last Heartbeat").fg(Color::White),
    ]);

    for p in &participants {
        let status_cell = if p.is_stale(now, stale_after) {
            Cell::new("○ stale").fg(Color::Yellow)
        } else {
            Cell::new("● active").fg(Color::Green)
        };
        let ago = (now - p.last_status).num_seconds().max(0);

        table.add_row(vec![
            Cell::new(&p.name).fg(Color::Cyan),
            status_cell,
            Cell::new(format!("{ago}s ago")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} participant{}",
        style(participants.len()).bold(),
        if participants.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
