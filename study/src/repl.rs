use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::app::{App, Flow};
use crate::command::parse_command;
use crate::render::PROMPT_HINT;

const PROMPT: &str = "> ";

/// Read-eval loop. Command failures are reported and the loop carries on;
/// Ctrl-D or a quit command ends it.
pub async fn run(app: &mut App) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        if let Some(current) = app.previous() {
            println!("{}", format!("[{current}]").dimmed());
        }
        println!("{}", PROMPT_HINT.cyan());
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }
        let command = parse_command(&line);
        tracing::debug!(?command, "parsed");
        match app.execute(command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("{}\n", format!("{e:#}").red()),
        }
    }
    Ok(())
}
