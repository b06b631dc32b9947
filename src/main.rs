use clap::Parser;
use fieldnotify::clients::rest;
use fieldnotify::{
    Application, ApplicationTrait, BoolFlag, Client, ConsoleLogger, Context, LiveFeedWorker,
    LogLevel, Logger, LoggingSoundPlayer, NotificationStore, PollWorker, RelayHandle,
    SoundPlayer, SyncWorker,
};

use std::io::BufRead;
use std::process::ExitCode;

/// Keeps a local notification list in sync with the field operations API.
#[derive(Parser, Debug)]
#[command(name = "fieldnotify", version)]
struct Args {
    /// Server origin, e.g. http://localhost:4000
    #[arg(long, env = "FIELDNOTIFY_BASE_URL")]
    base_url: Option<String>,

    /// Session token used for the API and the live feed
    #[arg(long, env = "FIELDNOTIFY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// trace, debug, info, warning or error
    #[arg(long, env = "FIELDNOTIFY_LOG_LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match fieldnotify::config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(token) = args.token {
        config = config.with_token(&token);
    }
    if let Some(level) = args.log_level {
        config.log_level = match level.parse::<LogLevel>() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        };
    }

    let logger = Logger::new(ConsoleLogger::new(config.log_level));
    let store = NotificationStore::new(
        Client::new(rest::Client::from_config(&config)),
        logger.clone(),
        SoundPlayer::new(LoggingSoundPlayer::new(logger.clone())),
    );

    let mut app = Application::new(Context::new(store, logger.clone()), config.loop_interval);
    app.add_worker(Box::new(SyncWorker::new()));
    app.add_worker(Box::new(PollWorker::new(config.poll_interval)));
    app.add_worker(Box::new(LiveFeedWorker::new(&config)));

    watch_commands(app.context().quit(), app.context().store().relay());

    match app.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error(&format!("[fieldnotify::main] {}", e));
            ExitCode::FAILURE
        }
    }
}

/// Reads session commands from stdin: `logout` (or `quit`) ends the session and
/// runs teardown, `refresh` asks for a full resync. End of input stops watching
/// without ending the session.
fn watch_commands(quit: BoolFlag, relay: RelayHandle) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            match line.trim() {
                "logout" | "quit" => {
                    quit.set(true);
                    break;
                }
                "refresh" => {
                    relay.signal();
                }
                _ => {}
            }
        }
    });
}
