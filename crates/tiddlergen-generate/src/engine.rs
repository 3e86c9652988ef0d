use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use tiddlergen_core::{Tiddler, build_tags_field, format_tw5_timestamp, offset_timestamp};

use crate::errors::GenerationError;
use crate::generators::{LoremBounds, RandomTagSelector, Template, generate_lorem};
use crate::model::{GenerateOptions, GenerationReport, TextMode};
use crate::output::{OutputTarget, render_json, write_output};

/// Deterministic RNG for a run.
pub fn rng_from_seed(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub tiddlers: Vec<Tiddler>,
    pub report: GenerationReport,
}

impl GenerationResult {
    /// Serialize every tiddler and write the document in one piece.
    pub fn write_to(&mut self, target: &OutputTarget) -> Result<(), GenerationError> {
        let json = render_json(&self.tiddlers)?;
        let bytes = write_output(target, &json)?;
        self.report.record_output(bytes);
        info!(
            run_id = %self.report.run_id,
            target = %target,
            bytes,
            "output written"
        );
        Ok(())
    }
}

enum BodySource {
    Template(Template),
    Lorem(LoremBounds),
}

/// Entry point for generating tiddlers from options.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Run with an RNG seeded from `options.seed`, or a fresh seed that is
    /// recorded in the report.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let seed = self.options.seed.unwrap_or_else(rand::random);
        let mut rng = rng_from_seed(seed);
        let mut result = self.run_with_rng(&mut rng)?;
        result.report.seed = Some(seed);
        Ok(result)
    }

    /// Generate every tiddler, drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let options = &self.options;
        let run_id = uuid::Uuid::new_v4().to_string();
        let base_time: DateTime<Utc> = options.base_time.unwrap_or_else(Utc::now);
        let mut report = GenerationReport::new(run_id.clone(), options, base_time);

        let count = i64::try_from(options.num).map_err(|_| {
            GenerationError::InvalidOptions(format!("num {} is too large", options.num))
        })?;
        let end_index = options.start_index.checked_add(count).ok_or_else(|| {
            GenerationError::InvalidOptions(format!(
                "start index {} plus num {} overflows",
                options.start_index, options.num
            ))
        })?;

        let body = match &options.text {
            TextMode::Template { template } if count > 0 => {
                Some(BodySource::Template(Template::parse(template)?))
            }
            TextMode::Template { .. } => None,
            TextMode::Lorem(lorem) => Some(BodySource::Lorem(lorem.bounds())),
        };

        let selector = options.random_tags.as_ref().map(|random| {
            let selector = RandomTagSelector::new(random, &options.fixed_tags);
            let (min_tags, max_tags) = selector.bounds();
            if i64::try_from(min_tags).is_ok_and(|min| min < random.min_tags) {
                warn!(
                    requested = random.min_tags,
                    available = selector.candidates().len(),
                    "tag pool smaller than min_tags; lowering the minimum"
                );
            }
            debug!(
                candidates = selector.candidates().len(),
                min_tags, max_tags, "random tags enabled"
            );
            selector
        });

        info!(
            run_id = %run_id,
            num = options.num,
            start_index = options.start_index,
            text_mode = options.text.name(),
            random_tags = selector.is_some(),
            "generation started"
        );

        let mut tiddlers = Vec::new();
        for (step, index) in (options.start_index..end_index).enumerate() {
            let title = format!("{} {}", options.prefix, index);
            let step = i64::try_from(step).map_err(|_| {
                GenerationError::InvalidOptions(format!("index step {step} does not fit i64"))
            })?;
            let created = offset_timestamp(base_time, step, options.increment_seconds)?;
            let timestamp = format_tw5_timestamp(&created);

            let text = match &body {
                Some(BodySource::Template(template)) => template.render(index, &title),
                Some(BodySource::Lorem(bounds)) => generate_lorem(&mut *rng, bounds),
                None => String::new(),
            };

            let mut tags: Vec<&str> = options.fixed_tags.iter().map(String::as_str).collect();
            if let Some(selector) = &selector {
                for tag in selector.select(&mut *rng) {
                    report.record_random_tag(tag);
                    tags.push(tag);
                }
            }

            let tiddler = Tiddler::new(
                title,
                text,
                timestamp,
                build_tags_field(&tags),
                options.content_type.clone(),
            )
            .with_authors(options.creator.as_deref(), options.modifier.as_deref());
            tiddlers.push(tiddler);
            report.record_tiddler();
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            records = report.records,
            random_tags = report.random_tags_total,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult { tiddlers, report })
    }
}
