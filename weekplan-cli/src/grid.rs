//! Plain-text week grid: 24 hour rows by 7 day columns.

use serde::Serialize;
use weekplan_core::time::{self, DAY_NAMES, HOURS_PER_DAY};
use weekplan_core::{PlacementState, TaskRecord};

const LABEL_WIDTH: usize = 6;

/// One placed task, resolved against the task list for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledEntry {
    pub id: String,
    pub name: String,
    pub day: &'static str,
    pub start: String,
    pub end: String,
    pub duration_hours: u32,
}

pub fn entries(tasks: &[TaskRecord], state: &PlacementState) -> Vec<ScheduledEntry> {
    state
        .placements()
        .iter()
        .map(|p| {
            let name = tasks
                .iter()
                .find(|t| t.id() == p.task_id)
                .map(|t| t.name().to_string())
                .unwrap_or_default();
            let day = usize::try_from(p.day())
                .ok()
                .and_then(|d| DAY_NAMES.get(d))
                .copied()
                .unwrap_or("?");
            ScheduledEntry {
                id: p.task_id.clone(),
                name,
                day,
                start: p.start.format("%H:%M").to_string(),
                end: p.end().format("%H:%M").to_string(),
                duration_hours: p.duration_hours,
            }
        })
        .collect()
}

/// Render `state` as a grid. Each occupied hour shows the task name cut to
/// `column_width`; hours past the end of the day are not drawn.
pub fn render_grid(tasks: &[TaskRecord], state: &PlacementState, column_width: usize) -> String {
    let width = column_width.max(3);
    let hours = HOURS_PER_DAY as usize;
    let mut cells: Vec<[Option<&str>; 7]> = vec![[None; 7]; hours];

    for p in state.placements() {
        let Some(task) = tasks.iter().find(|t| t.id() == p.task_id) else {
            continue;
        };
        let Ok(day) = usize::try_from(p.day()) else {
            continue;
        };
        if day >= DAY_NAMES.len() {
            continue;
        }
        let first = time::hour_of(p.start) as usize;
        for hour in (first..first + p.duration_hours as usize).take_while(|h| *h < hours) {
            cells[hour][day] = Some(task.name());
        }
    }

    let mut out = String::new();
    out.push_str(&" ".repeat(LABEL_WIDTH));
    for name in DAY_NAMES {
        out.push_str(&format!("| {:<width$} ", fit(name, width)));
    }
    out.push('\n');

    out.push_str(&"-".repeat(LABEL_WIDTH));
    for _ in DAY_NAMES {
        out.push_str(&format!("+{}", "-".repeat(width + 2)));
    }
    out.push('\n');

    for (hour, row) in cells.iter().enumerate() {
        out.push_str(&format!("{:>5} ", format!("{hour}:00")));
        for cell in row {
            out.push_str(&format!("| {:<width$} ", fit(cell.unwrap_or(""), width)));
        }
        out.push('\n');
    }
    out
}

fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width - 1).collect();
        cut.push('~');
        cut
    }
}
