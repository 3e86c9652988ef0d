use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

/// Pool used when random tags are enabled without an explicit pool.
pub const DEFAULT_TAG_POOL: [&str; 12] = [
    "Todo",
    "Note",
    "Work",
    "Personal",
    "Idea",
    "Project",
    "Reading",
    "Reference",
    "Draft",
    "Meeting",
    "Research",
    "Archive",
];

/// Random tag settings as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomTagOptions {
    /// Candidate tags; empty means [`DEFAULT_TAG_POOL`].
    pub pool: Vec<String>,
    pub min_tags: i64,
    pub max_tags: i64,
}

impl Default for RandomTagOptions {
    fn default() -> Self {
        Self {
            pool: Vec::new(),
            min_tags: 0,
            max_tags: 3,
        }
    }
}

/// Samples distinct tags per tiddler from the pool minus the fixed tags.
#[derive(Debug, Clone)]
pub struct RandomTagSelector {
    candidates: Vec<String>,
    min_tags: usize,
    max_tags: usize,
}

impl RandomTagSelector {
    pub fn new(options: &RandomTagOptions, fixed_tags: &[String]) -> Self {
        let pool: Vec<String> = if options.pool.is_empty() {
            DEFAULT_TAG_POOL.iter().map(|tag| tag.to_string()).collect()
        } else {
            options.pool.clone()
        };
        let candidates: Vec<String> = pool
            .into_iter()
            .filter(|tag| !fixed_tags.contains(tag))
            .collect();

        let requested_min = usize::try_from(options.min_tags.max(0)).unwrap_or(usize::MAX);
        let requested_max = usize::try_from(options.max_tags.max(0))
            .unwrap_or(usize::MAX)
            .max(requested_min);
        let max_tags = requested_max.min(candidates.len());
        // the pool caps the lower bound as well
        let min_tags = requested_min.min(max_tags);

        Self {
            candidates,
            min_tags,
            max_tags,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Effective `(min, max)` tag count per tiddler.
    pub fn bounds(&self) -> (usize, usize) {
        (self.min_tags, self.max_tags)
    }

    /// Draw a tag count, then that many distinct candidates.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&str> {
        let count = rng.random_range(self.min_tags..=self.max_tags);
        index::sample(rng, self.candidates.len(), count)
            .iter()
            .map(|idx| self.candidates[idx].as_str())
            .collect()
    }
}
