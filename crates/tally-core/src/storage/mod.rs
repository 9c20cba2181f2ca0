//! Storage for the .tly sheet format and CSV import/export

mod csv;
mod parser;
mod writer;

pub use csv::{parse_csv, write_csv};
pub use parser::{parse_tly, parse_tly_content};
pub use writer::{write_tly, write_tly_content};
