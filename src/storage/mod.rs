//! On-disk artifacts: paths, backup-aware writes, and rc block surgery.

pub mod paths;
pub mod rc_block;
pub mod writer;

pub use paths::AppPaths;
pub use rc_block::{InsertOutcome, RemoveOutcome, ensure_present, remove_block};
pub use writer::{WriteAction, WriteReport, write_artifact};
