//! Effective settings for one CLI run.
//!
//! Each value is taken from the first source that sets it: command-line
//! flag, config file, environment variable, built-in default.

use std::path::PathBuf;

use anyhow::Context;
use paperstyle_core::config_file::ConfigFile;
use paperstyle_core::history::default_history_path;
use paperstyle_core::{DEFAULT_HISTORY_CAPACITY, FormatStyle, PaperType};
use paperstyle_parsing::ParsingConfigBuilder;
use paperstyle_render::RenderOptions;

pub const STYLE_ENV: &str = "PAPERSTYLE_STYLE";
pub const PAPER_TYPE_ENV: &str = "PAPERSTYLE_PAPER_TYPE";

pub const DEFAULT_STYLE: FormatStyle = FormatStyle::Fpi;
pub const DEFAULT_PAPER_TYPE: PaperType = PaperType::ResearchPaper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySettings {
    pub enabled: bool,
    pub capacity: usize,
    /// `None` when no cache directory exists and none was configured.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub style: FormatStyle,
    pub paper_type: PaperType,
    pub author: Option<String>,
    pub render: RenderOptions,
    pub history: HistorySettings,
}

/// Flags that override config values.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides<'a> {
    pub style: Option<&'a str>,
    pub paper_type: Option<&'a str>,
    pub author: Option<&'a str>,
}

/// Flag, then environment, then config file.
fn first_set(
    flag: Option<&str>,
    config: Option<&str>,
    env_var: &str,
    env: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    flag.map(str::to_string)
        .or_else(|| env(env_var))
        .or_else(|| config.map(str::to_string))
        .filter(|s| !s.trim().is_empty())
}

pub fn resolve(
    flags: Overrides<'_>,
    config: &ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let defaults = config.defaults.clone().unwrap_or_default();
    let render = config.render.clone().unwrap_or_default();
    let history = config.history.clone().unwrap_or_default();
    let parsing = config.parsing.clone().unwrap_or_default();

    let style = match first_set(flags.style, defaults.style.as_deref(), STYLE_ENV, &env) {
        Some(name) => name
            .parse::<FormatStyle>()
            .with_context(|| format!("invalid style '{}'", name))?,
        None => DEFAULT_STYLE,
    };
    let paper_type =
        match first_set(flags.paper_type, defaults.paper_type.as_deref(), PAPER_TYPE_ENV, &env) {
            Some(name) => name
                .parse::<PaperType>()
                .with_context(|| format!("invalid paper type '{}'", name))?,
            None => DEFAULT_PAPER_TYPE,
        };

    let mut builder = ParsingConfigBuilder::new();
    for heading in parsing.extra_headings.unwrap_or_default() {
        builder = builder.add_heading(heading);
    }
    for label in parsing.extra_stop_labels.unwrap_or_default() {
        builder = builder.add_stop_label(label);
    }
    let parsing = builder
        .build()
        .context("invalid [parsing] section in config")?;

    let mut options = RenderOptions {
        affiliation: render.affiliation,
        parsing,
        ..RenderOptions::default()
    };
    if let Some(lines) = render.institution_lines {
        options.institution_lines = lines;
    }

    Ok(Settings {
        style,
        paper_type,
        author: flags.author.map(str::to_string).or(defaults.author),
        render: options,
        history: HistorySettings {
            enabled: history.enabled.unwrap_or(true),
            capacity: history.capacity.unwrap_or(DEFAULT_HISTORY_CAPACITY).max(1),
            path: history.path.map(PathBuf::from).or_else(default_history_path),
        },
    })
}
