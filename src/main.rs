use std::process;

use dependency_guardian::{
    cli::{Args, Command, LogFormat},
    error::{ErrorSeverity, GuardianError},
};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();

    init_logging(&args.log_level, args.log_format);

    let command = Command::from_args(args);

    process::exit(run_command(command));
}

/// Install the global subscriber; diagnostics go to stderr so reports on
/// stdout stay clean
fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Run the command and map the outcome to an exit code
fn run_command(command: Command) -> i32 {
    match command.execute() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("\nError: {}", err.user_message());

            if let Some(suggestion) = suggestion(&err) {
                eprintln!("Suggestion: {}", suggestion);
            }

            let exit_code = match err.severity() {
                ErrorSeverity::Warning => 0,
                ErrorSeverity::Error => 1,
                ErrorSeverity::Critical => 2,
            };

            if exit_code > 0 {
                eprintln!("\nExiting with code {} due to {}", exit_code, err.severity());
            }

            exit_code
        }
    }
}

fn suggestion(err: &GuardianError) -> Option<&'static str> {
    match err {
        GuardianError::YamlParse { .. } | GuardianError::TomlParse { .. } => {
            Some("Compare the file with the template written by --init")
        }
        GuardianError::OutputWrite { .. } => Some("Check that the output location is writable"),
        GuardianError::ChangedFilesRead { .. } => Some("Pass changed files as arguments or use --changed-files - to read stdin"),
        _ => None,
    }
}
