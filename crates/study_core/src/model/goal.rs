use crate::error::AppError;
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

/// A single study goal: what to study, when, and whether it is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: u64,
    pub subject: String,
    pub topic: String,
    pub date: String,
    #[serde(default)]
    pub completed: bool,
}

/// Parse a goal's target date (`YYYY-MM-DD`).
///
/// Creation validates dates through this; snapshots edited by hand may still
/// carry values that fail here, so callers sorting or displaying loaded goals
/// must tolerate the error.
pub fn parse_goal_date(value: &str) -> Result<Date, AppError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format)
        .map_err(|_| AppError::invalid_input("date must be a calendar date (YYYY-MM-DD)"))
}
