use anyhow::Context as _;
use clap::Parser;
use repair_quote::cli::{self, Command};
use repair_quote::{
    ProviderKind, QuoteConfig, WizardAction, WizardController, create_provider, handoff,
    render,
};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ElecStore screen repair quote wizard
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Quote provider, overrides QUOTE_PROVIDER
    #[arg(long, value_enum)]
    provider: Option<ProviderKind>,

    /// Seconds to wait for a quote, overrides QUOTE_TIMEOUT_SECS
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

/// Initialize tracing based on environment variables. Logs go to stderr so
/// they stay out of the wizard's screens.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "repair_quote=info,step_flow=info".into());

    match log_format.as_str() {
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}

fn show(controller: &WizardController) {
    let step = controller.step();
    println!("\n{}", render::render(&controller.view()));
    println!("({})", cli::hint(step));
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Cli::parse();

    let mut config = QuoteConfig::from_env().context("invalid configuration")?;
    if let Some(provider) = args.provider {
        config.provider = provider;
    }
    if let Some(secs) = args.timeout_secs {
        config.quote_timeout = Duration::from_secs(secs);
    }

    let provider = create_provider(&config).context("failed to set up the quote provider")?;
    let mut controller = WizardController::new(provider, config.quote_timeout);

    info!(
        session_id = %controller.session_id(),
        provider = ?config.provider,
        timeout_secs = config.quote_timeout.as_secs(),
        "quote wizard started"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    show(&controller);

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match cli::parse_line(controller.step(), &line) {
            None => {}
            Some(Command::Quit) => break,
            Some(Command::Contact) => {
                match handoff::contact_link(&controller.view(), &config.whatsapp_number) {
                    Some(link) => println!("\nAbrí este enlace para escribirnos:\n{link}"),
                    None => println!("\nNo hay nada para enviar por WhatsApp en este paso."),
                }
            }
            Some(Command::Share) => match handoff::share_for(&controller.view()) {
                Some(text) => println!("\n{text}"),
                None => println!("\nTodavía no hay una cotización para compartir."),
            },
            Some(Command::Actions(actions)) => {
                for action in actions {
                    if action == WizardAction::Submit && controller.can_submit() {
                        println!("\nConsultando Precios ARS...");
                    }
                    if let Err(e) = controller.dispatch(action).await {
                        error!(session_id = %controller.session_id(), error = %e, "action failed");
                        break;
                    }
                }
            }
        }
        show(&controller);
    }

    info!(session_id = %controller.session_id(), "quote wizard closed");
    Ok(())
}
