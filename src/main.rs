mod cli;

use cli::{Args, Mode};
use mispbot::adapters::inbound::{SlackListener, SocketModeListener};
use mispbot::adapters::outbound::console::StdoutPresenter;
use mispbot::adapters::outbound::network::{MispClient, SlackWebPresenter};
use mispbot::application::use_cases::HandleCommandUseCase;
use mispbot::config::{load_config, BotConfig, LogLevel};
use mispbot::lookup::services::ResultRenderer;
use mispbot::shared::{BotError, ExitCode, Result};
use std::process;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            exit_code_for(&e)
        }
    };

    process::exit(exit_code.as_i32());
}

async fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    let mut config = load_config(args.config.as_deref())?;
    init_logging(config.log_level);
    config.warn_ignored_keys();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        server = %config.misp_server,
        "Starting mispbot"
    );

    let slack_bot_token = config.take_slack_bot_token();
    let slack_app_token = config.take_slack_app_token();

    // Create use case with injected dependencies
    let use_case = build_use_case(config)?;

    if let Some(text) = args.mode.query_text() {
        println!("{}", use_case.execute(&text).await);
        return Ok(());
    }

    match args.mode {
        Mode::Serve { stdout: true, .. } => {
            let input = BufReader::new(tokio::io::stdin());
            SlackListener::new(use_case, StdoutPresenter::new())
                .run(input)
                .await?;
        }
        Mode::Serve { stdin: true, .. } => {
            let input = BufReader::new(tokio::io::stdin());
            let presenter = SlackWebPresenter::new(slack_bot_token?)?;
            SlackListener::new(use_case, presenter).run(input).await?;
        }
        _ => {
            let presenter = SlackWebPresenter::new(slack_bot_token?)?;
            let socket_mode = SocketModeListener::new(slack_app_token?)?;
            let listener = SlackListener::new(use_case, presenter);
            socket_mode.serve(&listener).await?;
        }
    }

    Ok(())
}

fn build_use_case(config: BotConfig) -> Result<HandleCommandUseCase<MispClient>> {
    let renderer = ResultRenderer::new(&config.misp_server);
    let misp_client = MispClient::new(
        &config.misp_server,
        config.misp_api_key,
        config.verify_cert,
        config.search_timeout,
    )?;

    Ok(HandleCommandUseCase::new(
        misp_client,
        renderer,
        config.search_timeout,
    ))
}

/// Logs go to stderr; stdout is reserved for replies
fn init_logging(level: LogLevel) {
    // RUST_LOG wins over the configured LogLevel
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level.as_filter())
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    let is_configuration_error = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<BotError>())
        .any(BotError::is_configuration_error);

    if is_configuration_error {
        ExitCode::ConfigurationError
    } else {
        ExitCode::ApplicationError
    }
}
