use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gantt_builder::model::gantt::{AXIS_FORMATS, TICK_INTERVALS};
use gantt_builder::model::{duration, Duration, ThemeColor};
use gantt_builder::render::{self, ChartConfig};
use gantt_builder::{io, Gantt, SessionStore};

/// Build Gantt documents and render them as Mermaid diagrams
#[derive(Parser)]
#[command(name = "gantt-builder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty document with one swimlane
    New {
        /// Diagram title
        #[arg(short, long)]
        title: Option<String>,

        /// Show the title in the rendered diagram
        #[arg(long)]
        show_title: bool,

        #[command(flatten)]
        settings: DiagramSettings,

        /// Output file (defaults to <title>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the Mermaid definition of a document
    Render {
        /// Document to render
        file: PathBuf,

        /// Prepend the theme and layout front matter
        #[arg(long)]
        front_matter: bool,

        /// JSON file overriding chart layout settings
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a document and summarize it
    Check {
        /// Document to check
        file: PathBuf,
    },

    /// Compute the business-day end date for a start date and duration
    EndDate {
        /// Start date (YYYY-MM-DD)
        start: NaiveDate,

        /// Duration such as 5d, 2w, 1m or 1y
        duration: String,
    },
}

/// Presentation options for a new document
#[derive(Args)]
struct DiagramSettings {
    /// Axis label format
    #[arg(long, value_parser = AXIS_FORMATS)]
    axis_format: Option<String>,

    /// Tick interval on the time axis
    #[arg(long, value_parser = TICK_INTERVALS)]
    tick_interval: Option<String>,

    /// Exclude weekends from the timeline
    #[arg(long)]
    show_weekends: bool,

    /// Hide the today marker
    #[arg(long)]
    hide_today: bool,

    /// Background of the first swimlane (#rrggbb)
    #[arg(long)]
    section_color: Option<String>,

    /// Background of even swimlanes
    #[arg(long)]
    even_section_color: Option<String>,

    /// Background of odd swimlanes
    #[arg(long)]
    odd_section_color: Option<String>,

    /// Task bar background
    #[arg(long)]
    task_color: Option<String>,
}

impl DiagramSettings {
    fn apply(&self, gantt: &mut Gantt) -> gantt_builder::Result<()> {
        if let Some(format) = &self.axis_format {
            gantt.set_axis_format(format)?;
        }
        if let Some(interval) = &self.tick_interval {
            gantt.set_tick_interval(interval)?;
        }
        gantt.show_weekends = self.show_weekends;
        gantt.show_today = !self.hide_today;
        let colors = [
            (ThemeColor::Section0, &self.section_color),
            (ThemeColor::EvenSection, &self.even_section_color),
            (ThemeColor::OddSection, &self.odd_section_color),
            (ThemeColor::Task, &self.task_color),
        ];
        for (slot, color) in colors {
            if let Some(color) = color {
                gantt.set_color(slot, color)?;
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::New {
            title,
            show_title,
            settings,
            output,
        } => cmd_new(title, show_title, &settings, output),
        Commands::Render {
            file,
            front_matter,
            config,
        } => cmd_render(&file, front_matter, config.as_deref()),
        Commands::Check { file } => cmd_check(&file),
        Commands::EndDate { start, duration } => cmd_end_date(start, &duration),
    }
}

fn cmd_new(
    title: Option<String>,
    show_title: bool,
    settings: &DiagramSettings,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut store = SessionStore::new();
    let session = store.open(None);
    if let Some(title) = title {
        session.gantt.set_title(title)?;
    }
    session.gantt.show_title = show_title;
    settings.apply(&mut session.gantt)?;
    session.add_swimlane(chrono::Local::now().date_naive())?;

    let (name, bytes) = session.export()?;
    let path = output.unwrap_or_else(|| PathBuf::from(name));
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

fn cmd_render(file: &Path, front_matter: bool, config: Option<&Path>) -> Result<()> {
    let gantt = io::load_gantt(file).with_context(|| format!("loading {}", file.display()))?;
    let text = if front_matter {
        let config = match config {
            Some(path) => ChartConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ChartConfig::default(),
        };
        render::render_document(&gantt, &config)
    } else {
        render::diagram(&gantt)
    };
    print!("{text}");
    Ok(())
}

fn cmd_check(file: &Path) -> Result<()> {
    let gantt = io::load_gantt(file).with_context(|| format!("loading {}", file.display()))?;
    let tasks = gantt.tasks().count();
    let milestones = gantt.tasks().filter(|t| t.is_milestone()).count();
    println!(
        "{}: {} swimlanes, {} tasks ({} milestones)",
        if gantt.title.is_empty() { "(untitled)" } else { gantt.title.as_str() },
        gantt.sections.len(),
        tasks,
        milestones
    );
    Ok(())
}

fn cmd_end_date(start: NaiveDate, token: &str) -> Result<()> {
    let parsed: Duration = token.parse()?;
    let end = duration::end_date(start, parsed)
        .with_context(|| format!("{parsed} from {start} is out of range"))?;
    println!("{}", end.format("%Y-%m-%d"));
    Ok(())
}
