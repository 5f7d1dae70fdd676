//! Stateless views over the repository's current contents. Every caller
//! rebuilds the whole surface from the goal list; nothing here diffs against
//! a previous render.

use study_core::config::Palette;
use study_core::model::{Goal, parse_goal_date};
use study_core::repository::Progress;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::macros::format_description;

const EMPTY_STATE: &str = "Your roadmap is clear. Add your first milestone to get started.";
const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Topic")]
    topic: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// The goal list as a table, or the empty-state placeholder.
/// Goals are expected in display order (the repository sorts by date).
pub fn goal_table(goals: &[Goal], palette: &Palette) -> String {
    if goals.is_empty() {
        return palette.mutedize(EMPTY_STATE);
    }

    let rows: Vec<GoalRow> = goals
        .iter()
        .map(|goal| GoalRow {
            id: goal.id,
            subject: palette.accentize(&goal.subject),
            topic: goal.topic.clone(),
            date: display_date(&goal.date),
            status: if goal.completed {
                palette.successize("done")
            } else {
                "open".to_string()
            },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Summary panel: counts plus a progress bar with the rounded percentage.
pub fn summary(progress: &Progress, palette: &Palette) -> String {
    format!(
        "Total: {}   Completed: {}   Pending: {}\n{} {}%",
        progress.total,
        progress.completed,
        progress.pending,
        palette.accentize(&progress_bar(progress.percent)),
        progress.percent,
    )
}

/// Short human-readable date; raw value when it does not parse.
pub fn display_date(raw: &str) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    let Ok(date) = parse_goal_date(raw) else {
        return raw.to_string();
    };
    date.format(&format).unwrap_or_else(|_| raw.to_string())
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
