use anyhow::Result;
use clap::{Parser, Subcommand};
use esv_client::DEFAULT_TIMEOUT_SECS;
use std::path::PathBuf;
use std::time::Duration;
use study::app::DebugSwitch;
use study::{bootstrap, repl, App, AppConfig, Command};
use study_core::files::DataPaths;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

const DATA_DIR_NAME: &str = ".biblestudy-data";

#[derive(Parser)]
#[command(name = "biblestudy", version, about = "Scripture lookup with Strong's annotations")]
struct Cli {
    /// Directory holding the mapping and dictionary files
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Declarations file (default: declarations.txt in the data directory)
    #[arg(long)]
    declarations: Option<PathBuf>,
    /// Timeout for passage API requests
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
    /// Do not fetch missing reference files
    #[arg(long)]
    skip_download: bool,
    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Interactive prompt (the default)
    Repl,
    /// Show a passage
    Show { reference: Vec<String> },
    /// Interlinear view of a verse
    Translate { reference: Vec<String> },
    /// Dictionary entry for a Strong's number, e.g. g4982
    Define { number: String },
    /// Verses using a Strong's number, optionally limited by book filters
    Usage { number: String, filters: Vec<String> },
    /// Full-text search
    Search { query: Vec<String> },
    /// A random proverb
    Proverb,
    /// A random line from the declarations file
    Declaration,
    /// List books, optionally filtered by keyword
    Books {
        #[arg(long)]
        json: bool,
        filters: Vec<String>,
    },
}

impl Cmd {
    fn needs_data(&self) -> bool {
        matches!(self, Cmd::Repl | Cmd::Translate { .. } | Cmd::Define { .. } | Cmd::Usage { .. })
    }
}

/// Install the subscriber. The returned switch raises the filter to `debug`
/// and restores the startup directives when turned off.
fn init_logging() -> DebugSwitch {
    let startup = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| "warn".to_string());
    let filter = EnvFilter::try_new(&startup).unwrap_or_else(|_| EnvFilter::new("warn"));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    Box::new(move |on| {
        let filter = if on {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_new(&startup).unwrap_or_else(|_| EnvFilter::new("warn"))
        };
        handle.reload(filter)?;
        Ok(())
    })
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

#[tokio::main]
async fn main() -> Result<()> {
    let debug_switch = init_logging();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Cmd::Repl);

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    if command.needs_data() && !cli.skip_download {
        let fetched = bootstrap::ensure_data_files(&DataPaths::new(&data_dir)).await?;
        if fetched > 0 {
            tracing::info!(fetched, dir = %data_dir.display(), "reference files ready");
        }
    }

    let config = AppConfig {
        data_dir,
        declarations: cli.declarations,
        api_token: std::env::var("ESV_API_TOKEN").ok().filter(|t| !t.is_empty()),
        api_base_url: std::env::var("ESV_API_URL").ok().filter(|u| !u.is_empty()),
        timeout: Duration::from_secs(cli.timeout_secs),
    };
    let mut app = App::new(config)?.with_debug_switch(debug_switch);

    match command {
        Cmd::Repl => repl::run(&mut app).await?,
        Cmd::Show { reference } => app.show(&reference.join(" ")).await?,
        Cmd::Translate { reference } => app.translate(&reference.join(" ")).await?,
        Cmd::Define { number } => println!("{}", app.definition_text(&number)?),
        Cmd::Usage { number, filters } => {
            let text = format!("{number} search {}", filters.join(" "));
            app.execute(Command::Usage(text)).await?;
        }
        Cmd::Search { query } => {
            app.execute(Command::Search(query.join(" "))).await?;
        }
        Cmd::Proverb => {
            app.execute(Command::Proverb).await?;
        }
        Cmd::Declaration => println!("{}", app.declaration_text()?),
        Cmd::Books { json, filters } => println!("{}", app.books_text(&filters, json)?),
    }
    Ok(())
}
