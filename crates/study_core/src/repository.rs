use crate::error::AppError;
use crate::model::{Goal, parse_goal_date};
use crate::storage::SnapshotStore;

/// The in-memory authoritative goal list plus its persistence sync.
///
/// Every mutating operation rewrites the store's snapshot wholesale; the
/// store never sees a partial patch.
#[derive(Debug)]
pub struct Repository<S: SnapshotStore> {
    goals: Vec<Goal>,
    store: S,
}

/// Result of opening a repository: a malformed or unreadable snapshot
/// degrades to an empty list, carrying the cause as a non-fatal warning.
#[derive(Debug)]
pub struct RepositoryLoad<S: SnapshotStore> {
    pub repository: Repository<S>,
    pub warning: Option<AppError>,
}

/// Aggregate completion statistics for the summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub percent: u8,
}

impl<S: SnapshotStore> Repository<S> {
    pub fn open(store: S) -> RepositoryLoad<S> {
        match store.load() {
            Ok(goals) => RepositoryLoad {
                repository: Self { goals, store },
                warning: None,
            },
            Err(err) => RepositoryLoad {
                repository: Self {
                    goals: Vec::new(),
                    store,
                },
                warning: Some(err),
            },
        }
    }

    /// Create a goal with `completed = false` and a fresh id, append it and
    /// persist. All three inputs are trimmed and must be non-empty; the date
    /// must be a real calendar date.
    pub fn create(&mut self, subject: &str, topic: &str, date: &str) -> Result<Goal, AppError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(AppError::invalid_input("subject is required"));
        }

        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::invalid_input("topic is required"));
        }

        let date = date.trim();
        if date.is_empty() {
            return Err(AppError::invalid_input("date is required"));
        }
        parse_goal_date(date)?;

        let goal = Goal {
            id: self.next_id(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            date: date.to_string(),
            completed: false,
        };

        self.goals.push(goal.clone());
        self.store.save(&self.goals)?;

        Ok(goal)
    }

    /// Flip `completed` on the matching goal. `Ok(None)` when no goal
    /// matches; the snapshot is persisted afterward either way.
    pub fn toggle(&mut self, id: u64) -> Result<Option<Goal>, AppError> {
        let mut updated = None;

        for goal in &mut self.goals {
            if goal.id == id {
                goal.completed = !goal.completed;
                updated = Some(goal.clone());
                break;
            }
        }

        self.store.save(&self.goals)?;
        Ok(updated)
    }

    /// Remove the matching goal. `Ok(None)` when no goal matches; the
    /// snapshot is persisted afterward either way.
    pub fn delete(&mut self, id: u64) -> Result<Option<Goal>, AppError> {
        let removed = self
            .goals
            .iter()
            .position(|goal| goal.id == id)
            .map(|index| self.goals.remove(index));

        self.store.save(&self.goals)?;
        Ok(removed)
    }

    /// Goals in display order: ascending target date, ties keeping their
    /// original relative order. Dates that fail to parse sort first.
    pub fn list(&self) -> Vec<Goal> {
        let mut goals = self.goals.clone();
        goals.sort_by_key(|goal| parse_goal_date(&goal.date).ok());
        goals
    }

    pub fn find(&self, id: u64) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn progress(&self) -> Progress {
        let total = self.goals.len();
        let completed = self.goals.iter().filter(|goal| goal.completed).count();
        let percent = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };

        Progress {
            total,
            completed,
            pending: total - completed,
            percent,
        }
    }

    // Monotonic counter over the active list. Unlike a timestamp-derived id
    // this cannot collide under rapid successive creation.
    fn next_id(&self) -> u64 {
        self.goals.iter().map(|goal| goal.id).max().unwrap_or(0) + 1
    }
}
