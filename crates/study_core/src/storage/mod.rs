pub mod json_store;
mod memory;

pub use json_store::JsonStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::model::Goal;

/// Persistence seam for the goal snapshot.
///
/// Implementations hold a serialized copy, never a live reference: `save`
/// overwrites the whole snapshot on every call and `load` hands back an owned
/// list. A store that has never been written loads as the empty list.
pub trait SnapshotStore {
    fn load(&self) -> Result<Vec<Goal>, AppError>;
    fn save(&self, goals: &[Goal]) -> Result<(), AppError>;
}
