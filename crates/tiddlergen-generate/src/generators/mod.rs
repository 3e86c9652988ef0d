//! Per-tiddler value synthesis: body text and random tags.

pub mod lorem;
pub mod tags;
pub mod template;

pub use lorem::{LOREM_WORDS, LoremBounds, LoremOptions, generate_lorem, generate_sentence};
pub use tags::{DEFAULT_TAG_POOL, RandomTagOptions, RandomTagSelector};
pub use template::{Template, TemplateError};
