mod app;
mod config;
mod draw;
mod error;
mod form;
mod keys;
mod paths;
mod terminal;
mod toast;

use std::fs::{self, File};
use std::time::{Duration, Instant};

use admin_lib::AdminClient;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use log::{error, info};
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use tokio::sync::mpsc::unbounded_channel;

use crate::app::{App, Backend};
use crate::config::Config;
use crate::error::AppError;
use crate::terminal::TerminalGuard;

#[tokio::main]
async fn main() {
    paths::rotate_logs();
    init_logging();

    if let Err(e) = run().await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, LogConfig::default(), file);
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    info!("API: {} (page size {})", config.api_url, config.page_size);

    let client = AdminClient::builder()
        .url(&config.api_url)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    if let Some((email, password)) = config.credentials() {
        client.login(email, password).await?;
    }
    let session = client.current_session().await?;
    info!("session: {} ({:?})", session.email, session.role);

    let (tx, mut rx) = unbounded_channel();
    let mut app = App::new(config.page_size, Some(Backend { client, session }), tx);
    app.start();

    let mut terminal = TerminalGuard::new()?;
    let mut events = EventStream::new();

    loop {
        let (width, _) = terminal.size()?;
        terminal.draw(&draw::render(&app, width))?;
        if app.should_quit() {
            break;
        }

        let deadline = app.next_deadline();
        tokio::select! {
            next = events.next() => match next {
                Some(Ok(Event::Key(key))) => {
                    if let Some(command) = keys::command_for(key, app.focus()) {
                        app.handle_command(command);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = rx.recv() => app.handle_event(event),
            _ = wait_until(deadline) => {}
        }

        app.tick(Instant::now());
    }

    info!("exiting");
    Ok(())
}

/// Sleep until `deadline`, or forever when there is none.
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
