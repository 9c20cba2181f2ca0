//! tally-core - UI-agnostic sheet model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Sheet;
pub use error::{Result, TallyError};

pub use tally_engine::engine::{CellRef, ErrorKind, Evaluation};
