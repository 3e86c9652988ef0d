use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tiddlergen_core::DEFAULT_CONTENT_TYPE;

use crate::generators::{LoremOptions, RandomTagOptions};

/// Template used when no `--text` is given.
pub const DEFAULT_TEXT_TEMPLATE: &str = "This is tiddler {i}.";

/// Title prefix used when no `--prefix` is given.
pub const DEFAULT_PREFIX: &str = "Tiddler";

/// How the body of each tiddler is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TextMode {
    /// Expand a template with `{i}` and `{title}`.
    Template { template: String },
    /// Synthesize lorem ipsum paragraphs.
    Lorem(LoremOptions),
}

impl TextMode {
    pub fn name(&self) -> &'static str {
        match self {
            TextMode::Template { .. } => "template",
            TextMode::Lorem(_) => "lorem",
        }
    }
}

impl Default for TextMode {
    fn default() -> Self {
        TextMode::Template {
            template: DEFAULT_TEXT_TEMPLATE.to_string(),
        }
    }
}

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Number of tiddlers to generate.
    pub num: u64,
    /// Title prefix; titles are `"{prefix} {index}"`.
    pub prefix: String,
    /// First index used in titles.
    pub start_index: i64,
    /// Body text policy.
    pub text: TextMode,
    /// Tags applied to every tiddler, in order, duplicates kept.
    pub fixed_tags: Vec<String>,
    /// Content type written to the `type` field.
    pub content_type: String,
    pub creator: Option<String>,
    pub modifier: Option<String>,
    /// Seconds added per index step to the base timestamp.
    pub increment_seconds: i64,
    /// Random tag sampling; disabled when `None`.
    pub random_tags: Option<RandomTagOptions>,
    /// Seed for reproducible output.
    pub seed: Option<u64>,
    /// Timestamp of the first tiddler; defaults to the current time.
    pub base_time: Option<DateTime<Utc>>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            num: 0,
            prefix: DEFAULT_PREFIX.to_string(),
            start_index: 1,
            text: TextMode::default(),
            fixed_tags: Vec::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            creator: None,
            modifier: None,
            increment_seconds: 0,
            random_tags: None,
            seed: None,
            base_time: None,
        }
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub records: u64,
    pub start_index: i64,
    pub text_mode: String,
    pub seed: Option<u64>,
    pub base_time: String,
    /// Random tags drawn per tag name.
    pub tag_usage: BTreeMap<String, u64>,
    pub random_tags_total: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, options: &GenerateOptions, base_time: DateTime<Utc>) -> Self {
        Self {
            run_id,
            records: 0,
            start_index: options.start_index,
            text_mode: options.text.name().to_string(),
            seed: options.seed,
            base_time: base_time.to_rfc3339(),
            tag_usage: BTreeMap::new(),
            random_tags_total: 0,
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_tiddler(&mut self) {
        self.records += 1;
    }

    pub fn record_random_tag(&mut self, tag: &str) {
        *self.tag_usage.entry(tag.to_string()).or_insert(0) += 1;
        self.random_tags_total += 1;
    }

    pub fn record_output(&mut self, bytes: u64) {
        self.bytes_written = bytes;
    }
}
