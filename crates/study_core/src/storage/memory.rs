use crate::error::AppError;
use crate::model::Goal;
use crate::storage::SnapshotStore;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory snapshot store, mainly for tests.
///
/// Clones share the same backing snapshot, so a test can keep a handle and
/// inspect what the repository persisted.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    goals: Rc<RefCell<Vec<Goal>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_goals(goals: Vec<Goal>) -> Self {
        Self {
            goals: Rc::new(RefCell::new(goals)),
        }
    }

    /// The snapshot as last saved.
    pub fn snapshot(&self) -> Vec<Goal> {
        self.goals.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Vec<Goal>, AppError> {
        Ok(self.goals.borrow().clone())
    }

    fn save(&self, goals: &[Goal]) -> Result<(), AppError> {
        *self.goals.borrow_mut() = goals.to_vec();
        Ok(())
    }
}
