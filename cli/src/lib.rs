//! fontshelf CLI (made by FontLab https://www.fontlab.com/)

pub mod server;

use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use log::info;

use fontshelf_core::catalog::{Catalog, FontRecord, WritingSystem};
use fontshelf_core::criteria::{parse_reveal_limit, CategoryFilter, FilterCriteria};
use fontshelf_core::output::{write_json_pretty, write_ndjson};
use fontshelf_core::projection::Projection;
use fontshelf_core::reveal::{grow_reveal, ScrollMetrics, INITIAL_REVEAL, REVEAL_STEP};
use fontshelf_core::session::{RevealReset, Session, SessionConfig};

/// Environment variable naming a JSON catalog to load instead of the sample.
pub const CATALOG_ENV: &str = "FONTSHELF_CATALOG";

/// CLI entrypoint for fontshelf.
#[derive(Debug, Parser)]
#[command(
    name = "fontshelf",
    about = "Browse a font catalog with search, filters and incremental reveal"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the fonts visible for the given filters
    List(ListArgs),
    /// Apply the reveal growth policy once and print the new limit
    Grow(GrowArgs),
    /// Replay scroll signals through a session and print each step
    Browse(BrowseArgs),
    /// Serve projection and reveal growth over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
struct CatalogArgs {
    /// JSON catalog to load (defaults to $FONTSHELF_CATALOG, then the built-in sample)
    #[arg(long = "catalog", value_hint = ValueHint::FilePath)]
    catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct FilterArgs {
    /// Case-insensitive substring that font names must contain
    #[arg(short = 'q', long = "query", default_value = "")]
    query: String,

    /// Category to show, or "All"
    #[arg(short = 'c', long = "category", default_value = "All")]
    category: String,

    /// Writing system fonts must support
    #[arg(short = 'l', long = "language", default_value = "Latin")]
    language: String,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(flatten)]
    filter: FilterArgs,

    /// Maximum number of fonts to show
    #[arg(long = "limit", default_value_t = INITIAL_REVEAL, conflicts_with = "all")]
    limit: usize,

    /// Show every match (limit = catalog size)
    #[arg(long = "all", action = ArgAction::SetTrue)]
    all: bool,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct GrowArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Current reveal limit
    #[arg(long = "current")]
    current: usize,

    /// Catalog size to cap at (defaults to the loaded catalog's size)
    #[arg(long = "size")]
    size: Option<usize>,

    /// Fonts added per step
    #[arg(long = "step", default_value_t = REVEAL_STEP)]
    step: usize,
}

#[derive(Debug, Args)]
struct BrowseArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(flatten)]
    filter: FilterArgs,

    /// Number of near-end scroll signals to replay
    #[arg(long = "scrolls", default_value_t = 3)]
    scrolls: usize,

    /// Fonts added per signal
    #[arg(long = "step", default_value_t = REVEAL_STEP)]
    step: usize,

    /// Reset the reveal limit when filters change
    #[arg(long = "reset-on-filter", action = ArgAction::SetTrue)]
    reset_on_filter: bool,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Address to bind
    #[arg(long = "bind", default_value = "127.0.0.1:8765")]
    bind: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List(args) => run_list(args),
        Command::Grow(args) => run_grow(args),
        Command::Browse(args) => run_browse(args),
        Command::Serve(args) => run_serve(args),
    }
}

fn run_list(args: ListArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.catalog.as_deref())?;
    let limit = if args.all {
        catalog.len()
    } else {
        parse_reveal_limit(args.limit)?
    };
    let criteria = build_criteria(&args.filter, limit)?;
    let projection = Projection::compute(&catalog, &criteria);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if args.ndjson {
        write_ndjson(&projection.fonts, &mut handle)?;
    } else if args.json {
        write_json_pretty(&projection.fonts, &mut handle)?;
    } else if args.columns {
        write_columns(&projection.fonts, &mut handle, use_color)?;
    } else {
        write_plain(&projection.fonts, &mut handle, use_color)?;
    }

    if projection.has_more() {
        info!(
            "showing {} of {} matches",
            projection.fonts.len(),
            projection.total_matches
        );
    }

    Ok(())
}

fn run_grow(args: GrowArgs) -> Result<()> {
    let size = match args.size {
        Some(size) => size,
        None => load_catalog(args.catalog.catalog.as_deref())?.len(),
    };
    let next = grow_reveal(args.current, size, args.step);
    println!("{next}");
    Ok(())
}

fn run_browse(args: BrowseArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.catalog.as_deref())?;
    let config = SessionConfig {
        reveal_step: args.step,
        reveal_reset: if args.reset_on_filter {
            RevealReset::OnFilterChange
        } else {
            RevealReset::Keep
        },
        ..SessionConfig::default()
    };
    let mut session = Session::with_config(catalog, config)?;
    apply_filter(&mut session, &args.filter)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    browse(&mut session, args.scrolls, &mut handle)
}

/// Replay `scrolls` near-end signals, printing the limit after each.
fn browse(session: &mut Session, scrolls: usize, mut w: impl Write) -> Result<()> {
    writeln!(w, "limit {}", session.reveal_limit())?;
    for _ in 0..scrolls {
        let content = session.visible().len() as f64 * CARD_EXTENT;
        let at_bottom = ScrollMetrics::new(VIEWPORT_EXTENT, content, content);
        session.on_scroll(at_bottom);
        let exhausted = session.reveal_limit() >= session.catalog().len();
        writeln!(
            w,
            "limit {}{}",
            session.reveal_limit(),
            if exhausted { " (end)" } else { "" }
        )?;
    }
    write_plain(&session.visible(), &mut w, false)
}

const CARD_EXTENT: f64 = 320.0;
const VIEWPORT_EXTENT: f64 = 900.0;

fn run_serve(args: ServeArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.catalog.as_deref())?;
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(server::serve(&args.bind, catalog))
}

fn build_criteria(filter: &FilterArgs, limit: usize) -> Result<FilterCriteria> {
    let category: CategoryFilter = filter.category.parse()?;
    let language: WritingSystem = filter.language.parse()?;

    Ok(FilterCriteria::new()
        .with_query(filter.query.clone())
        .with_category(category)
        .with_writing_system(language)
        .with_reveal_limit(limit))
}

fn apply_filter(session: &mut Session, filter: &FilterArgs) -> Result<()> {
    session.set_query(filter.query.clone());
    session.set_category(filter.category.parse::<CategoryFilter>()?);
    session.set_writing_system(filter.language.parse()?);
    Ok(())
}

/// Resolve the catalog: explicit path, then `$FONTSHELF_CATALOG`, then the sample.
pub fn load_catalog(explicit: Option<&Path>) -> Result<Catalog> {
    if let Some(path) = explicit {
        return Catalog::from_json_path(path);
    }

    if let Some(raw) = env::var_os(CATALOG_ENV) {
        if !raw.is_empty() {
            return Catalog::from_json_path(Path::new(&raw))
                .with_context(|| format!("{CATALOG_ENV} is set"));
        }
    }

    Ok(Catalog::sample())
}

fn write_plain(records: &[&FontRecord], mut w: impl Write, color: bool) -> Result<()> {
    for record in records {
        let name = apply_color(&record.name, color, AnsiColor::Cyan);
        writeln!(
            w,
            "{name} ({}, {} styles, {})",
            record.designer, record.styles, record.category
        )?;
    }
    Ok(())
}

fn write_columns(records: &[&FontRecord], mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(String, String, String)> = records
        .iter()
        .map(|r| {
            let languages = r
                .writing_systems
                .iter()
                .map(|ws| ws.label())
                .collect::<Vec<_>>()
                .join(",");
            (
                format!("{:>3} {}", r.id, r.name),
                r.designer.clone(),
                format!("{:<11} styles:{:<2} {}", r.category, r.styles, languages),
            )
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|r| r.0.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 60);
    let designer_width = rows
        .iter()
        .map(|r| r.1.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 40);

    for (name, designer, details) in rows {
        let padded_name = format!("{:<name_width$}", name);
        let padded_designer = format!("{:<designer_width$}", designer);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Cyan);
        let rendered_designer = apply_color(&padded_designer, color, AnsiColor::Yellow);
        let rendered_details = apply_color(&details, color, AnsiColor::Green);

        writeln!(w, "{rendered_name}  {rendered_designer}  {rendered_details}")?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
