use std::path::{Path, PathBuf};

use serde::Deserialize;

use tiddlergen_core::{DEFAULT_CONTENT_TYPE, split_csv};
use tiddlergen_generate::model::{DEFAULT_PREFIX, DEFAULT_TEXT_TEMPLATE};
use tiddlergen_generate::{
    GenerateOptions, LoremOptions, OutputTarget, RandomTagOptions, TextMode,
};

use crate::{Cli, CliError, parse_base_time};

/// Defaults loaded from `--config`; keys mirror the long flags.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub num: Option<i64>,
    pub output: Option<PathBuf>,
    pub prefix: Option<String>,
    pub start_index: Option<i64>,
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub creator: Option<String>,
    pub modifier: Option<String>,
    pub increment_seconds: Option<i64>,
    pub random_tags: Option<bool>,
    pub tag_pool: Option<Vec<String>>,
    pub min_tags: Option<i64>,
    pub max_tags: Option<i64>,
    pub lorem: Option<bool>,
    pub lorem_paragraphs: Option<i64>,
    pub lorem_min_sentences: Option<i64>,
    pub lorem_max_sentences: Option<i64>,
    pub lorem_min_words: Option<i64>,
    pub lorem_max_words: Option<i64>,
    pub seed: Option<u64>,
    pub base_time: Option<String>,
    pub report: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Everything a run needs after flags and config are merged.
#[derive(Debug)]
pub struct ResolvedRun {
    pub options: GenerateOptions,
    pub output: OutputTarget,
    pub report: Option<PathBuf>,
}

/// Merge flags over the config file over built-in defaults.
pub fn resolve_run(cli: &Cli, file: ConfigFile) -> Result<ResolvedRun, CliError> {
    let num = cli.num.or(file.num).ok_or_else(|| {
        CliError::InvalidConfig("--num is required (flag or `num` in config)".to_string())
    })?;
    // A negative count is an empty run.
    let num = u64::try_from(num).unwrap_or(0);

    let base_time = match (cli.base_time, file.base_time.as_deref()) {
        (Some(value), _) => Some(value),
        (None, Some(raw)) => Some(
            parse_base_time(raw)
                .map_err(|err| CliError::InvalidConfig(format!("base_time: {err}")))?,
        ),
        (None, None) => None,
    };

    let fixed_tags = split_csv(&list_or(&cli.tags, file.tags));

    let random_tags = if switch(cli.random_tags, cli.no_random_tags, file.random_tags) {
        Some(RandomTagOptions {
            pool: split_csv(&list_or(&cli.tag_pool, file.tag_pool)),
            min_tags: cli.min_tags.or(file.min_tags).unwrap_or(0),
            max_tags: cli.max_tags.or(file.max_tags).unwrap_or(3),
        })
    } else {
        None
    };

    let text = if switch(cli.lorem, cli.no_lorem, file.lorem) {
        let defaults = LoremOptions::default();
        TextMode::Lorem(LoremOptions {
            paragraphs: cli
                .lorem_paragraphs
                .or(file.lorem_paragraphs)
                .unwrap_or(defaults.paragraphs),
            min_sentences: cli
                .lorem_min_sentences
                .or(file.lorem_min_sentences)
                .unwrap_or(defaults.min_sentences),
            max_sentences: cli
                .lorem_max_sentences
                .or(file.lorem_max_sentences)
                .unwrap_or(defaults.max_sentences),
            min_words: cli
                .lorem_min_words
                .or(file.lorem_min_words)
                .unwrap_or(defaults.min_words),
            max_words: cli
                .lorem_max_words
                .or(file.lorem_max_words)
                .unwrap_or(defaults.max_words),
        })
    } else {
        TextMode::Template {
            template: cli
                .text
                .clone()
                .or(file.text)
                .unwrap_or_else(|| DEFAULT_TEXT_TEMPLATE.to_string()),
        }
    };

    let options = GenerateOptions {
        num,
        prefix: cli
            .prefix
            .clone()
            .or(file.prefix)
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
        start_index: cli.start_index.or(file.start_index).unwrap_or(1),
        text,
        fixed_tags,
        content_type: cli
            .content_type
            .clone()
            .or(file.content_type)
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        creator: cli.creator.clone().or(file.creator),
        modifier: cli.modifier.clone().or(file.modifier),
        increment_seconds: cli.increment_seconds.or(file.increment_seconds).unwrap_or(0),
        random_tags,
        seed: cli.seed.or(file.seed),
        base_time,
    };

    let output = match cli.output.clone().or(file.output) {
        Some(path) if !path.as_os_str().is_empty() => OutputTarget::File(path),
        _ => OutputTarget::Stdout,
    };

    Ok(ResolvedRun {
        options,
        output,
        report: cli.report.clone().or(file.report),
    })
}

/// `--x` / `--no-x` pairs win over the config value; clap keeps only the last of the pair.
fn switch(on: bool, off: bool, file: Option<bool>) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        file.unwrap_or(false)
    }
}

/// Repeatable flags replace the config list when given at all.
fn list_or(flags: &[String], file: Option<Vec<String>>) -> Vec<String> {
    if flags.is_empty() {
        file.unwrap_or_default()
    } else {
        flags.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tiddlergen").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    fn config(toml: &str) -> ConfigFile {
        toml::from_str(toml).expect("valid config")
    }

    #[test]
    fn defaults_match_the_documented_flags() {
        let resolved = resolve_run(&parse(&["--num", "3"]), ConfigFile::default())
            .expect("resolve");
        let options = resolved.options;
        assert_eq!(options.num, 3);
        assert_eq!(options.prefix, "Tiddler");
        assert_eq!(options.start_index, 1);
        assert_eq!(options.text, TextMode::default());
        assert_eq!(options.content_type, "text/vnd.tiddlywiki");
        assert!(options.random_tags.is_none());
        assert!(options.seed.is_none());
        assert_eq!(resolved.output, OutputTarget::Stdout);
    }

    #[test]
    fn tags_are_split_across_repeats_and_commas() {
        let cli = parse(&["-n", "1", "--tag", "a, b", "--tag", "My Tag", "--tag", ","]);
        let resolved = resolve_run(&cli, ConfigFile::default()).expect("resolve");
        assert_eq!(resolved.options.fixed_tags, ["a", "b", "My Tag"]);
    }

    #[test]
    fn negative_values_are_accepted() {
        let cli = parse(&["-n", "2", "--start-index", "-5", "--min-tags", "-1", "--random-tags"]);
        let resolved = resolve_run(&cli, ConfigFile::default()).expect("resolve");
        assert_eq!(resolved.options.start_index, -5);
        let random = resolved.options.random_tags.expect("random tags enabled");
        assert_eq!(random.min_tags, -1);
        assert_eq!(random.max_tags, 3);
        assert!(random.pool.is_empty());
    }

    #[test]
    fn lorem_flags_select_lorem_mode() {
        let cli = parse(&["-n", "1", "--lorem", "--lorem-paragraphs", "2", "--text", "ignored"]);
        let resolved = resolve_run(&cli, ConfigFile::default()).expect("resolve");
        assert_eq!(
            resolved.options.text,
            TextMode::Lorem(LoremOptions {
                paragraphs: 2,
                ..LoremOptions::default()
            })
        );
    }

    #[test]
    fn flags_override_config_values() {
        let file = config(
            r#"
            num = 10
            prefix = "FromFile"
            tags = ["x", "y"]
            type = "text/markdown"
            output = "file.json"
            seed = 4
            base_time = "2024-01-01T00:00:00+02:00"
            "#,
        );
        let cli = parse(&["--config", "ignored.toml", "--prefix", "FromFlag", "--tag", "z"]);
        let resolved = resolve_run(&cli, file).expect("resolve");
        let options = resolved.options;
        assert_eq!(options.num, 10);
        assert_eq!(options.prefix, "FromFlag");
        assert_eq!(options.fixed_tags, ["z"]);
        assert_eq!(options.content_type, "text/markdown");
        assert_eq!(options.seed, Some(4));
        assert_eq!(
            options.base_time.map(|t| t.to_rfc3339()),
            Some("2023-12-31T22:00:00+00:00".to_string())
        );
        assert_eq!(
            resolved.output,
            OutputTarget::File(PathBuf::from("file.json"))
        );
    }

    #[test]
    fn config_enables_random_tags_and_lorem() {
        let file = config(
            r#"
            num = 1
            random_tags = true
            tag_pool = ["a,b", "c"]
            max_tags = 2
            lorem = true
            lorem_max_words = 6
            "#,
        );
        let resolved = resolve_run(&Cli::default(), file).expect("resolve");
        let random = resolved.options.random_tags.expect("random tags enabled");
        assert_eq!(random.pool, ["a", "b", "c"]);
        assert_eq!(random.max_tags, 2);
        match resolved.options.text {
            TextMode::Lorem(lorem) => assert_eq!(lorem.max_words, 6),
            other => panic!("expected lorem mode, got {other:?}"),
        }
    }

    #[test]
    fn missing_num_is_a_configuration_error() {
        let cli = parse(&["--config", "defaults.toml"]);
        let result = resolve_run(&cli, ConfigFile::default());
        assert!(matches!(result, Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn num_flag_is_required_without_config() {
        assert!(Cli::try_parse_from(["tiddlergen"]).is_err());
    }

    #[test]
    fn negative_num_resolves_to_an_empty_run() {
        let resolved = resolve_run(&parse(&["--num", "-1"]), ConfigFile::default())
            .expect("resolve");
        assert_eq!(resolved.options.num, 0);

        let resolved = resolve_run(&Cli::default(), config("num = -4")).expect("resolve");
        assert_eq!(resolved.options.num, 0);
    }

    #[test]
    fn no_flags_turn_off_config_switches() {
        let file = || config("num = 1\nrandom_tags = true\nlorem = true");
        let cli = parse(&["--config", "c.toml", "--no-random-tags", "--no-lorem"]);
        let resolved = resolve_run(&cli, file()).expect("resolve");
        assert!(resolved.options.random_tags.is_none());
        assert_eq!(resolved.options.text, TextMode::default());

        let cli = parse(&["-n", "1", "--no-lorem", "--lorem", "--random-tags", "--no-random-tags"]);
        let resolved = resolve_run(&cli, file()).expect("resolve");
        assert!(resolved.options.random_tags.is_none());
        assert!(matches!(resolved.options.text, TextMode::Lorem(_)));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let parsed: Result<ConfigFile, _> = toml::from_str("nmu = 3");
        assert!(parsed.is_err());
    }

    #[test]
    fn invalid_base_time_in_config_is_rejected() {
        let file = config("num = 1\nbase_time = \"yesterday\"");
        let result = resolve_run(&Cli::default(), file);
        assert!(matches!(result, Err(CliError::InvalidConfig(_))));
    }
}
