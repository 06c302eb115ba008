use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use paperstyle_core::config_file::{ConfigFile, config_path, load_config, save_config};
use paperstyle_core::{
    FormatRequest, HistoryRecord, HistoryStore, JsonHistoryFile, ParsedSections,
};
use paperstyle_export::{ExportTarget, export, suggested_filename};
use paperstyle_ingest::ExtractorRegistry;
use paperstyle_parsing::{Classifier, segment_with_config, structure_body_with};
use paperstyle_render::Renderer;

mod output;
mod settings;

use output::ColorMode;
use settings::{Overrides, Settings};

/// Format academic papers in APA, MLA, IEEE, Springer, Chicago and FPI styles
#[derive(Parser, Debug)]
#[command(name = "paperstyle", version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a paper into abstract, keywords, body and references
    Segment {
        /// Paper file (.txt, .md or .docx); reads stdin when omitted
        input: Option<PathBuf>,

        /// Split the body into the sections of this paper type
        #[arg(short = 't', long)]
        paper_type: Option<String>,

        /// Print the sections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a paper in a citation style
    Render(RenderArgs),

    /// Show or clear recently rendered papers
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// List supported styles and paper types
    Styles,

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the platform config file location
    Path,
    /// Print the merged configuration as TOML
    Show,
    /// Save the merged configuration to the platform config file
    Init,
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Paper file (.txt, .md or .docx); reads stdin when omitted
    input: Option<PathBuf>,

    /// JSON-encoded format request to render as-is
    #[arg(long, conflicts_with = "input")]
    request: Option<PathBuf>,

    /// Citation style, e.g. "apa7", "IEEE" or "MLA 9th Edition"
    #[arg(short, long)]
    style: Option<String>,

    /// Paper type, e.g. "research-paper" or "Lab Report"
    #[arg(short = 't', long)]
    paper_type: Option<String>,

    /// Paper title
    #[arg(long)]
    heading: Option<String>,

    /// Author name
    #[arg(long)]
    author: Option<String>,

    /// Date printed on title pages (YYYY-MM-DD)
    #[arg(long, conflicts_with = "today")]
    date: Option<NaiveDate>,

    /// Print today's date on title pages
    #[arg(long)]
    today: bool,

    /// Wrap the markup as a document: word, html or pdf
    #[arg(short, long)]
    export: Option<ExportTarget>,

    /// Output path (default: stdout, or a name derived from the heading when exporting)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not record this render in the recent history
    #[arg(long)]
    no_history: bool,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List recent papers, newest first
    List,
    /// Print the markup of a recent paper
    Show {
        /// Position in `history list` (1 = newest) or record id
        entry: String,

        /// Write the markup to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Forget all recent papers
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let color = ColorMode(!cli.no_color && std::io::stdout().is_terminal());
    if let Err(e) = run(cli, color) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, color: ColorMode) -> anyhow::Result<()> {
    let config = load_config();
    let env = |key: &str| std::env::var(key).ok();

    match cli.command {
        Command::Segment {
            input,
            paper_type,
            json,
        } => {
            let settings = settings::resolve(
                Overrides {
                    paper_type: paper_type.as_deref(),
                    ..Overrides::default()
                },
                &config,
                env,
            )?;
            // Only split the body when a type was asked for explicitly.
            let split = paper_type.is_some();
            segment_command(input.as_deref(), &settings, split, json, color)
        }
        Command::Render(args) => {
            let settings = settings::resolve(
                Overrides {
                    style: args.style.as_deref(),
                    paper_type: args.paper_type.as_deref(),
                    author: args.author.as_deref(),
                },
                &config,
                env,
            )?;
            render_command(args, &settings)
        }
        Command::History { action } => {
            let settings = settings::resolve(Overrides::default(), &config, env)?;
            history_command(action, &settings, color)
        }
        Command::Styles => {
            let mut stdout = std::io::stdout().lock();
            output::print_catalog(&mut stdout, color)?;
            Ok(())
        }
        Command::Config { action } => config_command(action, &config),
    }
}

fn config_command(action: ConfigAction, config: &ConfigFile) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    match action {
        ConfigAction::Path => match config_path() {
            Some(path) => writeln!(stdout, "{}", path.display())?,
            None => bail!("could not determine the config directory"),
        },
        ConfigAction::Show => {
            let text = toml::to_string_pretty(config).context("failed to serialize config")?;
            write!(stdout, "{}", text)?;
        }
        ConfigAction::Init => {
            let path = save_config(config).map_err(anyhow::Error::msg)?;
            writeln!(stdout, "Saved {}", path.display())?;
        }
    }
    Ok(())
}

/// Text of `input`, or stdin when `None`. Files go through the extractor
/// registry; stdin is taken as UTF-8 text.
fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => ExtractorRegistry::default()
            .extract_path(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
            ExtractorRegistry::default()
                .extract(&bytes, paperstyle_ingest::TEXT_MIME)
                .context("failed to read stdin")
        }
    }
}

fn segment_command(
    input: Option<&Path>,
    settings: &Settings,
    split: bool,
    json: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let parsing = &settings.render.parsing;
    let parsed = segment_with_config(&text, parsing);
    let structured = (split && settings.paper_type.profile().has_structured_body).then(|| {
        let classifier = Classifier::for_paper_type_with_config(settings.paper_type, parsing);
        structure_body_with(&parsed.main_body, &classifier)
    });

    let mut stdout = std::io::stdout().lock();
    if json {
        let value = match &structured {
            Some(sections) => serde_json::json!({
                "abstract": parsed.r#abstract,
                "keywords": parsed.keywords,
                "references": parsed.references,
                "sections": sections,
            }),
            None => serde_json::to_value(&parsed)?,
        };
        writeln!(stdout, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        output::print_sections(&mut stdout, &parsed, structured.as_ref(), color)?;
    }
    Ok(())
}

fn build_request(args: &RenderArgs, settings: &Settings) -> anyhow::Result<FormatRequest> {
    let mut request = match &args.request {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut request: FormatRequest = serde_json::from_str(&json)
                .with_context(|| format!("invalid format request in {}", path.display()))?;
            // Flags still win over the file.
            if args.style.is_some() {
                request.format_style = settings.style;
            }
            if args.paper_type.is_some() {
                request.paper_type = settings.paper_type;
            }
            if let Some(author) = &args.author {
                request.author_name = author.clone();
            }
            if let Some(heading) = &args.heading {
                request.paper_heading = heading.clone();
            }
            request
        }
        None => {
            let text = read_input(args.input.as_deref())?;
            let parsing = &settings.render.parsing;
            let parsed: ParsedSections = segment_with_config(&text, parsing);
            let structured = settings.paper_type.profile().has_structured_body.then(|| {
                let classifier =
                    Classifier::for_paper_type_with_config(settings.paper_type, parsing);
                structure_body_with(&parsed.main_body, &classifier)
            });
            FormatRequest::assemble(
                args.heading.clone().unwrap_or_default(),
                settings.author.clone().unwrap_or_default(),
                settings.paper_type,
                settings.style,
                parsed,
                structured,
            )
        }
    };

    if let Some(date) = args.date {
        request.date = Some(date);
    } else if args.today {
        request.date = Some(chrono::Local::now().date_naive());
    }
    Ok(request)
}

fn render_command(args: RenderArgs, settings: &Settings) -> anyhow::Result<()> {
    let request = build_request(&args, settings)?;
    let renderer = Renderer::with_options(settings.render.clone());
    let markup = renderer.render(&request);
    tracing::info!(
        style = %request.format_style,
        paper_type = %request.paper_type,
        bytes = markup.len(),
        "rendered paper"
    );

    match args.export {
        Some(target) => {
            let exported = export(&markup, target)?;
            let path = args.output.clone().unwrap_or_else(|| {
                PathBuf::from(suggested_filename(&request.paper_heading, target))
            });
            std::fs::write(&path, &exported.bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} ({})", path.display(), exported.mime);
        }
        None => match &args.output {
            Some(path) => std::fs::write(path, &markup)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", markup)?;
            }
        },
    }

    if !args.no_history && settings.history.enabled {
        match open_history(settings)? {
            Some(mut history) => history.append(HistoryRecord::new(
                &request.paper_heading,
                request.format_style,
                markup,
            )),
            None => tracing::warn!("no cache directory; history not recorded"),
        }
    }
    Ok(())
}

fn open_history(settings: &Settings) -> anyhow::Result<Option<JsonHistoryFile>> {
    let Some(path) = &settings.history.path else {
        return Ok(None);
    };
    let history = JsonHistoryFile::open(path, settings.history.capacity)
        .with_context(|| format!("failed to open history at {}", path.display()))?;
    Ok(Some(history))
}

fn history_command(
    action: HistoryAction,
    settings: &Settings,
    color: ColorMode,
) -> anyhow::Result<()> {
    let Some(mut history) = open_history(settings)? else {
        bail!("no history location: set [history] path in the config file");
    };
    let mut stdout = std::io::stdout().lock();

    match action {
        HistoryAction::List => output::print_history(&mut stdout, history.history(), color)?,
        HistoryAction::Show { entry, output } => {
            let records = history.history();
            let record = match entry.parse::<usize>() {
                Ok(n) if n >= 1 => records.iter().nth(n - 1),
                Ok(_) => None,
                Err(_) => records.iter().find(|r| {
                    let id = r.id.simple().to_string();
                    !entry.is_empty() && (id.starts_with(&entry) || r.id.to_string() == entry)
                }),
            };
            let Some(record) = record else {
                bail!("no history entry '{}'", entry);
            };
            match output {
                Some(path) => std::fs::write(&path, &record.markup)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => writeln!(stdout, "{}", record.markup)?,
            }
        }
        HistoryAction::Clear => {
            history.clear()?;
            writeln!(stdout, "History cleared.")?;
        }
    }
    Ok(())
}
