//! Input parsing and import orchestration.

mod cell;
mod import;
mod json;
mod parser;
mod source;

pub use cell::Cell;
pub use import::{
    import, parse_bytes, ImportConfig, ImportError, ImportErrorKind, ImportResult, Importer,
    DEFAULT_MAX_FILE_SIZE,
};
pub use json::JsonParser;
pub use parser::{detect_delimiter, split_quoted, DelimitedParser, FormatParser, ParserConfig};
pub use source::{Dataset, SourceFormat, SourceMetadata};
pub(crate) use cell::{format_number, parse_number};
