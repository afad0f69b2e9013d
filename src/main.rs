use clap::Parser;
use stageshot::app::bootstrap;
use stageshot::cli::Cli;
use stageshot::error::{is_startup_fault, user_friendly_message};
use stageshot::{GameError, StartupStage, APP_NAME, LOG_FILE};
use std::error::Error;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        original_hook(panic_info);
    }));
}

/// File logging; the terminal belongs to the game screens
fn init_logging(level: &str) -> std::io::Result<WorkerGuard> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
        .join(APP_NAME);
    std::fs::create_dir_all(&log_dir)?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn report(err: &GameError) {
    eprintln!("Error: {}", user_friendly_message(err));
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_panic_hook();

    let guard = match init_logging(&cli.log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: could not set up logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = run(&cli);
    drop(guard);
    code
}

fn run(cli: &Cli) -> ExitCode {
    let config = match cli
        .load_config()
        .map_err(|e| GameError::startup(StartupStage::Config, e))
    {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Startup fault");
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    if cli.write_config {
        return match cli.write_config_file(&config) {
            Ok(path) => {
                info!(path = %path.display(), "Configuration written");
                println!("Configuration written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Could not write configuration");
                report(&e);
                ExitCode::FAILURE
            }
        };
    }

    let mut controller = match bootstrap(config) {
        Ok(controller) => controller,
        Err(e) => {
            error!(error = %e, startup = is_startup_fault(&e), "Startup fault");
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    let result = controller.run();
    let stages_played = controller.stages_played();
    let (mut app, _progress) = controller.into_parts();
    let restored = app.shutdown();
    drop(app);

    if let Err(e) = result.and(restored) {
        error!(error = %e, "Main loop fault");
        report(&e);
        return ExitCode::FAILURE;
    }

    info!(stages_played, "Exited cleanly");
    ExitCode::SUCCESS
}
