//! Output formatting for the battle log and final report.
use anyhow::Result;

use battle_core::{BattleEvent, BattleReport, Side, UnitReport};

/// One output line for an event: the rendered log line, or a JSON object.
pub fn event_line(event: &BattleEvent, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(event)?)
    } else {
        Ok(event.to_string())
    }
}

pub fn report_text(report: &BattleReport) -> String {
    let mut lines = vec![format!(
        "== {}: {}/{} stages cleared in {} ticks ({} rounds) ==",
        report.outcome, report.stages_cleared, report.total_stages, report.ticks, report.rounds
    )];

    for side in [Side::Ally, Side::Enemy] {
        lines.push(match side {
            Side::Ally => "Party".to_string(),
            Side::Enemy => "Final enemies".to_string(),
        });
        lines.extend(report.side(side).map(unit_line));
    }

    lines.join("\n")
}

fn unit_line(unit: &UnitReport) -> String {
    let stats = &unit.statistics;
    let mut line = format!(
        "  {:<16} {:>6}/{:<6} HP  dealt {:>7}  taken {:>7}  healed {:>6}",
        unit.name, unit.hp, unit.max_hp, stats.damage_dealt, stats.damage_received, stats.healing_done
    );
    for (kind, counter) in &stats.rolls {
        line.push_str(&format!("  {}={}/{}", kind, counter.successes, counter.attempts));
    }
    line
}

pub fn report_line(report: &BattleReport, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(report)?)
    } else {
        Ok(report_text(report))
    }
}
