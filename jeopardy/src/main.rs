//! Jeopardy board TUI application.
//!
//! Pulls six random categories from jService and lays them out as a grid of
//! clues. Click (or select and press Enter) to see a question, again to see
//! its answer.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a text-based interface suitable for automated testing:
//!
//! ```bash
//! cargo run -p jeopardy -- --headless --offline
//! ```

mod app;
mod events;
mod headless;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jeopardy_core::{GameConfig, JService, JServiceSource, OfflineSource};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::File;
use std::io::{self, stdout};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, DynSource};
use events::{handle_event, EventResult};
use ui::render::render;

/// Command line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    headless: bool,
    offline: bool,
    help: bool,
    categories: Option<usize>,
    clues: Option<usize>,
}

impl Options {
    fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::default();
        if let Some(n) = self.categories {
            config = config.with_categories(n);
        }
        if let Some(n) = self.clues {
            config = config.with_clues_per_category(n);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let options = match parse_options(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if options.help {
        print_help();
        return Ok(());
    }

    init_logging(options.headless)?;
    info!(
        headless = options.headless,
        offline = options.offline,
        "Starting jeopardy"
    );

    let config = options.game_config();
    let source = build_source(&options, &config);

    if options.headless {
        return headless::run_headless(source, config)
            .await
            .map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(source, config)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.viewport = Rect::new(0, 0, size.width, size.height);

        // Draw the loading state before suspending on the fetches
        if app.pending_start {
            terminal.draw(|f| render(f, &app))?;
            app.start_game().await;
        }

        // Render
        terminal.draw(|f| render(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::StartGame => app.request_start(),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }
    }
}

/// Pick the category source for this run.
fn build_source(options: &Options, config: &GameConfig) -> DynSource {
    if options.offline {
        Box::new(OfflineSource::new(config.clues_per_category))
    } else {
        Box::new(JServiceSource::new(
            JService::from_env(),
            config.clues_per_category,
        ))
    }
}

/// Install the tracing subscriber.
///
/// Headless runs log to stderr. The TUI owns the terminal, so it only logs
/// when `JEOPARDY_LOG_FILE` names a file to write to.
fn init_logging(headless: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_env("JEOPARDY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else if let Ok(path) = std::env::var("JEOPARDY_LOG_FILE") {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    Ok(())
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--headless" => options.headless = true,
            "--offline" => options.offline = true,
            "-h" | "--help" => options.help = true,
            flag @ ("--categories" | "--clues") => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{flag} needs a value"))?;
                let n = parse_count(flag, value)?;
                if flag == "--categories" {
                    options.categories = Some(n);
                } else {
                    options.clues = Some(n);
                }
                i += 1;
            }
            other => return Err(format!("unknown option '{other}'")),
        }
        i += 1;
    }

    Ok(options)
}

fn parse_count(flag: &str, value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{flag} expects a positive number, got '{value}'")),
    }
}

fn print_help() {
    println!("Jeopardy - a trivia board in your terminal");
    println!();
    println!("USAGE:");
    println!("  jeopardy [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help          Show this help message");
    println!("  --headless          Run in headless mode (text-only, no TUI)");
    println!("  --offline           Use generated categories instead of jService");
    println!("  --categories <N>    Number of categories (default: 6)");
    println!("  --clues <N>         Clues per category (default: 5)");
    println!();
    println!("ENVIRONMENT:");
    println!("  JSERVICE_URL        jService base URL");
    println!("  JEOPARDY_LOG        Log filter (default: warn)");
    println!("  JEOPARDY_LOG_FILE   Log file for the TUI");
    println!();
    println!("EXAMPLES:");
    println!("  jeopardy                          # Interactive TUI mode");
    println!("  jeopardy --headless --offline     # Headless with generated clues");
    println!("  jeopardy --categories 4 --clues 3");
}

#[cfg(test)]
mod tests {
    use super::*;
    use jeopardy_core::CategorySource;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("jeopardy")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_options(&args(&[])).unwrap();
        assert_eq!(options, Options::default());

        let config = options.game_config();
        assert_eq!(config.categories, 6);
        assert_eq!(config.clues_per_category, 5);
    }

    #[test]
    fn test_parse_flags() {
        let options = parse_options(&args(&[
            "--headless",
            "--offline",
            "--categories",
            "4",
            "--clues",
            "3",
        ]))
        .unwrap();

        assert!(options.headless);
        assert!(options.offline);
        let config = options.game_config();
        assert_eq!(config.categories, 4);
        assert_eq!(config.clues_per_category, 3);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_options(&args(&["--categories"])).is_err());
        assert!(parse_options(&args(&["--clues", "zero"])).is_err());
        assert!(parse_options(&args(&["--clues", "0"])).is_err());
        assert!(parse_options(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_help_flag() {
        assert!(parse_options(&args(&["-h"])).unwrap().help);
        assert!(parse_options(&args(&["--help"])).unwrap().help);
    }

    #[tokio::test]
    async fn test_offline_source_selection() {
        let options = parse_options(&args(&["--offline", "--clues", "2"])).unwrap();
        let config = options.game_config();
        let source = build_source(&options, &config);

        let ids = source.category_ids(3).await.unwrap();
        assert_eq!(ids.len(), 3);
        let data = source.category(ids[0]).await.unwrap();
        assert_eq!(data.clues.len(), 2);
    }
}
