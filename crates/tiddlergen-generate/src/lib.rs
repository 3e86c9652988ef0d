//! Tiddler generation engine for tiddlergen.
//!
//! This crate turns [`GenerateOptions`] into an ordered list of tiddlers,
//! synthesizing body text and random tags from an explicitly threaded,
//! seedable RNG, and writes the result as a TiddlyWiki import file.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;

pub use engine::{GenerationEngine, GenerationResult, rng_from_seed};
pub use errors::GenerationError;
pub use generators::{LoremOptions, RandomTagOptions, Template, TemplateError};
pub use model::{GenerateOptions, GenerationReport, TextMode};
pub use output::{OutputTarget, render_json, write_output};
