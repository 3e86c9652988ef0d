//! Core contracts and helpers for tiddlergen.
//!
//! This crate defines the tiddler record written to the import file, the
//! TiddlyWiki timestamp format, and the tag field helpers shared by the
//! generator and the CLI.

pub mod error;
pub mod schema;
pub mod tags;
pub mod tiddler;
pub mod timestamp;

pub use error::{Error, Result};
pub use schema::tiddlers_json_schema;
pub use tags::{build_tags_field, quote_tag, split_csv};
pub use tiddler::{DEFAULT_CONTENT_TYPE, Tiddler};
pub use timestamp::{TIMESTAMP_LEN, format_tw5_timestamp, offset_timestamp};
