mod cli;
mod commands;
mod prompt;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// The setup wizard writes `DISCORD_CLIENT_ID` here so it never lands
/// in source or config files. Existing environment variables win.
/// Must run before the async runtime starts: `set_var` is only sound
/// while the process has a single thread.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var(&key).is_err() {
            std::env::set_var(&key, &value);
        }
    }
}

/// Parse KEY=VALUE lines; `#` comments and blank lines are skipped,
/// surrounding quotes are stripped.
fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

fn main() -> ExitCode {
    // Before anything reads the environment, and before any thread exists
    load_dotenv();

    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("presenced=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "presenced=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("presenced v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(presenced_config::DEFAULT_CONFIG_FILE));

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async {
        match args
            .command
            .unwrap_or(cli::Command::Run(cli::RunArgs::default()))
        {
            cli::Command::Run(run_args) => commands::run::execute(&config_path, run_args).await,
            cli::Command::Setup => commands::setup::execute(&config_path),
            cli::Command::Examples(examples_args) => {
                commands::examples::execute(&config_path, examples_args).await
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotenv_lines_parse_to_pairs() {
        let parsed = parse_dotenv(
            "# comment\nDISCORD_CLIENT_ID=123456789012345678\n\nQUOTED=\"abc\"\nSINGLE='def'\n",
        );
        assert_eq!(
            parsed,
            vec![
                (
                    "DISCORD_CLIENT_ID".to_string(),
                    "123456789012345678".to_string()
                ),
                ("QUOTED".to_string(), "abc".to_string()),
                ("SINGLE".to_string(), "def".to_string()),
            ]
        );
    }

    #[test]
    fn dotenv_lines_without_an_equals_sign_are_skipped() {
        assert!(parse_dotenv("no equals sign\n# DISCORD_CLIENT_ID=1\n").is_empty());
    }
}
