//! Interactive terminal entry point.
//!
//! Reads one command per line from stdin, turns it into an application event
//! and redraws the screen once the event and every remote call it started have
//! settled.
//!
//! # Lifecycle
//!
//! 1. **Load**: Read the optional TOML file named by the first argument, apply
//!    `TASKDECK_*` environment overrides, initialize tracing
//! 2. **Restore**: Bring back the persisted session and its tasks
//! 3. **Loop**: Parse, dispatch, render until `quit` or end of input
//!
//! Logs go to `<data_dir>/taskdeck.log`; stdout carries only the screen.

use std::io::{self, Write};
use taskdeck::cli::{parse_command, Command, HELP};
use taskdeck::observability::init_tracing;
use taskdeck::{initialize, ui, App, Config};
use tokio::io::{AsyncBufReadExt, BufReader};

fn load_config() -> taskdeck::Result<Config> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply(&Config::env_overrides(std::env::vars()));
    Ok(config)
}

fn draw(app: &App) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    ui::render(&app.viewmodel(), &mut stdout)?;
    write!(stdout, "> ")?;
    stdout.flush()
}

fn say(message: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{message}")?;
    write!(stdout, "> ")?;
    stdout.flush()
}

async fn run(mut app: App) -> taskdeck::Result<()> {
    app.start().await?;
    draw(&app)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line, app.state()) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(error = %e, "unparseable command");
                say(&e.to_string())?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                say(HELP)?;
                continue;
            }
            Command::Dismiss(number) => {
                if !app.tray().dismiss_nth(number - 1) {
                    say(&format!("no notification {number}"))?;
                    continue;
                }
            }
            Command::Clear => app.bus().clear_all(),
            Command::List => {}
            Command::Dispatch(event) => {
                app.dispatch(event).await?;
            }
        }

        draw(&app)?;
    }

    tracing::info!("taskdeck exiting");
    Ok(())
}

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("taskdeck: {e}");
            std::process::exit(2);
        }
    };

    init_tracing(&config);

    let app = match initialize(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "initialization failed");
            eprintln!("taskdeck: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(app).await {
        tracing::error!(error = %e, "taskdeck stopped");
        eprintln!("taskdeck: {e}");
        std::process::exit(1);
    }
}
