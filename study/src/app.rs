use anyhow::{Context, Result};
use colored::Colorize;
use esv_client::{EsvClient, Passage, PassageOptions, DEFAULT_BASE_URL};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use study_core::declaration::{format_declaration, random_line, DECLARATION_WIDTH};
use study_core::files::{load_settings, read_lines, DataPaths, Settings};
use study_core::mapping::{annotate_passage, COPYRIGHT_MARKER};
use study_core::records::LineFeed;
use study_core::reference::random_proverb;
use study_core::strongs::definition;
use study_core::usage::{find_usages, UsageMatches, UsageQuery};
use study_core::{parse_reference, resolve, Book, Registry, Resolution, StrongsNumber, StudyError};

use crate::command::Command;
use crate::render;

/// Turns diagnostic logging on or off at runtime.
pub type DebugSwitch = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Declarations file; defaults to `declarations.txt` in the data directory.
    pub declarations: Option<PathBuf>,
    pub api_token: Option<String>,
    /// Overrides both the settings file and the built-in default.
    pub api_base_url: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    registry: Arc<Registry>,
    paths: DataPaths,
    settings: Settings,
    client: EsvClient,
    declarations: PathBuf,
    previous: Option<String>,
    debug_switch: Option<DebugSwitch>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let paths = DataPaths::new(&config.data_dir);
        let settings = load_settings(&paths).context("loading settings")?;
        let base_url = config
            .api_base_url
            .or_else(|| settings.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let client = EsvClient::new(&base_url, config.api_token, config.timeout)?;
        let declarations = config.declarations.unwrap_or_else(|| paths.declarations());
        Ok(Self {
            registry: Arc::new(Registry::new()),
            paths,
            settings,
            client,
            declarations,
            previous: None,
            debug_switch: None,
        })
    }

    pub fn with_debug_switch(mut self, switch: DebugSwitch) -> Self {
        self.debug_switch = Some(switch);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Reference of the passage shown most recently.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => println!("{}", render::help_text()),
            Command::Debug(on) => self.set_debug(on)?,
            Command::Search(text) => self.search(&text).await?,
            Command::Define(token) => println!("{}\n", self.definition_text(&token)?),
            Command::Usage(text) => self.usage(&text).await?,
            Command::Translate => match self.previous.clone() {
                Some(reference) => self.translate(&reference).await?,
                None => warn("You have not looked up a verse to translate."),
            },
            Command::Show => match self.previous.clone() {
                Some(reference) => self.show(&reference).await?,
                None => warn("You have not looked up a verse to show."),
            },
            Command::Proverb => self.proverb().await?,
            Command::Declaration => println!("{}", self.declaration_text()?),
            Command::Passage(text) => self.show(&text).await?,
        }
        Ok(Flow::Continue)
    }

    fn set_debug(&self, on: bool) -> Result<()> {
        match &self.debug_switch {
            Some(switch) => switch(on)?,
            None => tracing::warn!("debug logging cannot be changed in this session"),
        }
        println!("Set debug to {on}");
        Ok(())
    }

    /// Display a passage and remember it as the current one.
    pub async fn show(&mut self, reference: &str) -> Result<()> {
        if let Err(e) = parse_reference(reference) {
            tracing::debug!(error = %e, "passing text to the passage API as typed");
        }
        let passage = self.client.passage(reference, &PassageOptions::display()).await?;
        if passage.passages.is_empty() {
            warn("Passage not found");
            return Ok(());
        }
        for text in &passage.passages {
            println!("{text}");
        }
        self.previous = Some(passage.canonical);
        Ok(())
    }

    pub async fn translate(&mut self, reference: &str) -> Result<()> {
        let passage = self.client.passage(reference, &PassageOptions::translation()).await?;
        let rendered = self
            .off_runtime(move |registry, paths| interlinear_text(registry, paths, &passage))
            .await?;
        match rendered {
            Ok(text) => {
                print!("{text}");
                println!("{COPYRIGHT_MARKER}\n");
                println!("{}\n", render::USAGE_HINT);
                Ok(())
            }
            Err(e) if e.is_lookup_miss() => {
                warn(&e.to_string());
                Ok(())
            }
            Err(e) => Err(e).context("There was an error while annotating your verse"),
        }
    }

    /// Reference heading followed by the right-aligned interlinear lines.
    pub fn interlinear_text(&self, passage: &Passage) -> Result<String, StudyError> {
        interlinear_text(&self.registry, &self.paths, passage)
    }

    /// Run a file scan on the blocking pool so the runtime thread is not
    /// parked on reads or feed receives.
    async fn off_runtime<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&Registry, &DataPaths) -> T + Send + 'static,
        T: Send + 'static,
    {
        let registry = Arc::clone(&self.registry);
        let paths = self.paths.clone();
        Ok(tokio::task::spawn_blocking(move || job(&registry, &paths)).await?)
    }

    pub fn definition_text(&self, token: &str) -> Result<String> {
        let strongs: StrongsNumber = token.parse()?;
        let lines = definition(&self.paths, strongs)?;
        Ok(lines.join("\n"))
    }

    /// Verses whose mapping records use the number in `text`.
    pub fn usages(&self, text: &str) -> Result<UsageMatches> {
        usages(&self.registry, &self.paths, text, self.settings.max_strongs_verses)
    }

    async fn usage(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        let limit = self.settings.max_strongs_verses;
        let found = self
            .off_runtime(move |registry, paths| usages(registry, paths, &text, limit))
            .await??;
        if found.verses.is_empty() {
            warn("No verses found");
            return Ok(());
        }
        if let Some(summary) = render::usage_summary(&found) {
            println!("{summary}");
        }
        let passage = self.client.passage(&found.passage_query(), &PassageOptions::plain()).await?;
        println!("{}\n", render::one_line_passages(&passage));
        Ok(())
    }

    async fn search(&self, text: &str) -> Result<()> {
        let results = self.client.search(text, self.settings.search_page_size).await?;
        if results.results.is_empty() {
            warn("No results found");
        } else {
            println!("{}", render::search_results(&results));
        }
        Ok(())
    }

    async fn proverb(&mut self) -> Result<()> {
        let reference = random_proverb(&mut rand::thread_rng());
        let passage = self.client.passage(&reference, &PassageOptions::plain()).await?;
        match passage.passages.first() {
            Some(text) => {
                println!("{text}");
                self.previous = Some(passage.canonical);
            }
            None => warn("Passage not found"),
        }
        Ok(())
    }

    pub fn declaration_text(&self) -> Result<String> {
        let lines = read_lines(&self.declarations)
            .with_context(|| format!("Error reading declarations file {}", self.declarations.display()))?;
        let line = random_line(lines, &mut rand::thread_rng())?
            .ok_or_else(|| StudyError::lookup_miss("declaration", self.declarations.display().to_string()))?;
        Ok(format_declaration(&line, DECLARATION_WIDTH))
    }

    /// Books selected by `filters` (all books when none match), as a table
    /// or as JSON.
    pub fn books_text(&self, filters: &[String], json: bool) -> Result<String> {
        let selection = resolve(filters, self.registry.filter_index());
        let books: Vec<&Book> =
            self.registry.books().iter().filter(|b| selection.allows(b.short_code)).collect();
        if json {
            Ok(serde_json::to_string_pretty(&books)?)
        } else {
            Ok(render::book_table(books))
        }
    }
}

fn interlinear_text(registry: &Registry, paths: &DataPaths, passage: &Passage) -> Result<String, StudyError> {
    let text = passage
        .passages
        .first()
        .ok_or_else(|| StudyError::lookup_miss("passage", passage.canonical.clone()))?;
    let mapping = LineFeed::spawn(read_lines(paths.translation_map())?);
    let interlinear = annotate_passage(registry, &passage.canonical, text, mapping)?;
    Ok(format!("{}\n{}", passage.canonical, interlinear))
}

fn usages(registry: &Registry, paths: &DataPaths, text: &str, limit: usize) -> Result<UsageMatches> {
    let query = UsageQuery::parse(text)?;
    let books = resolve(&query.filters, registry.filter_index());
    if books == Resolution::NoMatch && !query.filters.is_empty() {
        tracing::debug!(filters = ?query.filters, "no filter keyword matched; searching every book");
    }
    let mapping = LineFeed::spawn(read_lines(paths.translation_map())?);
    Ok(find_usages(mapping, query.strongs, &books, limit)?)
}

pub fn warn(message: &str) {
    println!("{}", message.red());
}
