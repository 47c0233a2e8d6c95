pub mod entity;
pub mod invariants;

pub use entity::RepositoryRecord;
pub use invariants::{is_abandoned, staleness_cutoff};
