//! main.rs
//! Entry point for skiff

use skiff_tui::app::AppState;
use skiff_tui::config::Config;
use skiff_tui::core::terminal;
use skiff_tui::utils::cli::{CliAction, handle_args};

use std::fs::OpenOptions;
use std::sync::Mutex;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[skiff] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();
    if let CliAction::Exit = action {
        return Ok(());
    }

    init_logging();

    let mut config = Config::load();
    if let CliAction::RunAppWithUrl(url) = action {
        config.service_mut().set_url(url);
    }

    let mut app = AppState::new(config)?;
    terminal::run_terminal(&mut app)
}

/// File-backed tracing: the TUI owns the terminal, so logs go next to the
/// config file instead. Filter with SKIFF_LOG (tracing env-filter syntax).
fn init_logging() {
    let Some(dir) = Config::default_path().parent().map(|p| p.to_path_buf()) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("skiff.log"))
    else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SKIFF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
