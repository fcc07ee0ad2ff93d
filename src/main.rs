//! user-roster binary entry point.
//!
//! Starts the user retrieval, initializes the terminal in raw mode, runs the
//! TUI event loop, and restores the terminal state on exit.
//!
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use user_roster::app::{self, AppState, Keymap, Theme};
use user_roster::cli::{self, Cli};
use user_roster::error::{Context, Result, simple_error};
use user_roster::source::{HttpUserSource, UserStore};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let args = Cli::parse();
    cli::init_logging(args.log_file.as_deref())?;
    tracing::info!(endpoint = %args.endpoint, "starting user-roster");

    let source = HttpUserSource::new(args.endpoint.clone(), args.connect_timeout())
        .with_ctx(|| "set up HTTP client".to_string())?;
    let theme = Theme::load_or_init(&args.theme);
    let keymap = Keymap::load_or_init(&args.keybinds);
    let mut state = AppState::new(UserStore::spawn(source), theme, keymap);

    let mut terminal = init_terminal().map_err(|e| simple_error(format!("init terminal: {e}")))?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
