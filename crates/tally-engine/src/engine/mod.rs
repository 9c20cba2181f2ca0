//! Formula engine API.
//!
//! - [`Token`], [`Operator`] - Token classification
//! - [`CellRef`] - Cell labels (A1 notation <-> row/col indices)
//! - [`Evaluator`], [`Evaluation`] - Two-stack arithmetic evaluation
//! - [`CellStore`], [`resolve`] - Resolution of referenced cells
//! - [`ErrorKind`] - Error taxonomy and rendered messages
//! - [`Cell`], [`Grid`] - Data structures for cell storage
//! - [`tokenize`] - Formula text to raw tokens
//! - [`extract_dependencies`], [`find_cycle`] - Dependency tracking
//! - [`format_evaluation`], [`format_number`] - Display formatting

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod error;
mod eval;
mod format;
mod resolve;
mod token;
mod tokenize;

pub use cell::{Cell, Grid};
pub use cell_ref::CellRef;
pub use cycle::find_cycle;
pub use deps::extract_dependencies;
pub use error::ErrorKind;
pub use eval::{Evaluation, Evaluator, evaluate_raw};
pub use format::{NumberFormat, format_evaluation, format_number};
pub use resolve::{CellSnapshot, CellStore, resolve};
pub use token::{Operator, Token, parse_number};
pub use tokenize::tokenize;
