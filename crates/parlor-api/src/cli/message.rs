//! Message listing command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use parlor_types::message::{BROADCAST, MessageKind};

use crate::state::AppState;

/// Show the messages `as_name` would receive from `GET /messages`.
pub async fn list_messages(
    state: &AppState,
    as_name: &str,
    limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let messages = state.room.list_messages(as_name, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages visible to {}.",
            style("i").blue().bold(),
            style(as_name).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Time").fg(Color::White),
        Cell::new("From").fg(Color::White),
        Cell::new("To").fg(Color::White),
        Cell::new("Text").fg(Color::White),
    ]);

    for msg in &messages {
        let text_color = match msg.kind {
            MessageKind::Status => Color::DarkGrey,
            MessageKind::PrivateMessage => Color::Magenta,
            MessageKind::Message => Color::Reset,
        };
        let to = if msg.to == BROADCAST {
            Cell::new(&msg.to).fg(Color::DarkGrey)
        } else {
            Cell::new(&msg.to).fg(Color::Cyan)
        };

        table.add_row(vec![
            Cell::new(&msg.time).fg(Color::DarkGrey),
            Cell::new(&msg.from).fg(Color::Cyan),
            to,
            Cell::new(&msg.text).fg(text_color),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
