//! Command-line argument parsing and help for skiff.
//!
//! This module handles all CLI flag parsing used for config initialization
//! and help.
//!
//! When invoked with no args/flags (skiff), the panel connects to the
//! service URL from the config file.

use crate::config::Config;

pub enum CliAction {
    RunApp,
    RunAppWithUrl(String),
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().collect();
    let config_path = Config::default_path();

    if args.len() < 2 {
        return CliAction::RunApp;
    }

    if args.len() > 2 {
        eprintln!("Error: skiff accepts only one argument at a time.");
        eprintln!("Usage: skiff [URL] or skiff [OPTION]");
        return CliAction::Exit;
    }

    match args[1].as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = Config::generate_default(&config_path) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if arg.starts_with("http://") || arg.starts_with("https://") => {
            CliAction::RunAppWithUrl(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("skiff {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"skiff - a terminal panel for browsing a remote file service

USAGE:
  skiff [URL]

URL:
  Base URL of the file service (e.g. http://127.0.0.1:8188).
  Overrides the [service] url from the config file.

OPTIONS:
  -h, --help      Show this help
  -v, --version   Show version
  --init          Write a commented default config file

KEYS:
  j/k, Down/Up        move cursor
  Enter, l, Right     open directory (".." goes up)
  h, Left, Backspace  go up
  ~, Home             go to root
  F5, Ctrl+r          refresh
  Space               toggle selection at cursor
  v / V               range select (replace / add to selection)
  a / n / i           select all / none / invert
  c / C               new file / new folder
  r                   rename selected item
  x, Delete           delete selected items
  s                   save (download) selected files
  u                   upload local files
  + / - / F2          host demo: zoom in / out / collapse node
  q, Esc              quit
"#
    );
}
