//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::chat::{ChatMessage, ChatScope};
use crate::record::{MatchRecord, PlayerRecord};
use crate::report::EntryOutcome;

/// Format a decoded match for the terminal.
///
/// One line per player in table order, then the chat log and any decode
/// issues.
pub fn format_console(record: &MatchRecord) -> String {
    let mut output = String::new();
    let border = "━".repeat(72);

    let _ = writeln!(output, "{}", border.dimmed());
    let _ = writeln!(
        output,
        "  {} players, winning team {}",
        record.players.len().bold(),
        record
            .winning_team
            .map(|team| team.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );
    let _ = writeln!(output, "{}", border.dimmed());

    for player in record.players_by_table_index() {
        let _ = writeln!(output, "{}", format_player_line(player));
    }

    if !record.messages.is_empty() {
        let _ = writeln!(output, "{}", border.dimmed());
        for message in &record.messages {
            let _ = writeln!(output, "  {}", format_message(message));
        }
    }

    if !record.report.is_clean() {
        let _ = writeln!(output, "{}", border.dimmed());
        for issue in &record.report.issues {
            let _ = writeln!(output, "  {} {}", "!".yellow(), issue);
        }
    }

    let _ = write!(output, "{}", border.dimmed());
    output
}

/// Name, score, air kills, ground kills, assists, captures, deaths, then
/// team, nation and win flag.
pub fn format_player_line(player: &PlayerRecord) -> String {
    let stats = &player.stats;
    let name = match &player.clan_tag {
        Some(tag) => format!("{} {}", tag, player.name),
        None => player.name.clone(),
    };

    let mut line = format!(
        "  {:<24} {:>6} {:>3} {:>3} {:>3} {:>3} {:>3}  team {}  {}",
        name,
        field(stats.score),
        field(stats.air_kills),
        field(stats.ground_kills),
        field(stats.assists),
        field(stats.captures),
        field(stats.deaths),
        field(stats.team),
        player.nation.as_deref().unwrap_or("-"),
    );

    if player.win {
        let _ = write!(line, "  {}", "WIN".green().bold());
    }
    if !matches!(player.outcome, EntryOutcome::Complete) {
        let _ = write!(line, "  {}", "(partial)".yellow());
    }
    line
}

fn format_message(message: &ChatMessage) -> String {
    let scope = match message.scope {
        ChatScope::All => "all".cyan().to_string(),
        ChatScope::Team => "team".blue().to_string(),
        ChatScope::Squad => "squad".green().to_string(),
        ChatScope::Unknown => "?".dimmed().to_string(),
    };
    format!("[{}] {}: {}", scope, message.speaker.bold(), message.body)
}

fn field<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
