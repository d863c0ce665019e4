//! `partner-samples` -- interactive partner subscription samples.
//!
//! Prompts for customer and subscription IDs, calls the partner API and
//! prints what came back. Run without arguments for a menu, or pick one
//! scenario with `--scenario`.
//!
//! # Environment variables
//!
//! | Variable                                 | Required | Default                                   |
//! |------------------------------------------|----------|-------------------------------------------|
//! | `PARTNER_CENTER_ACCESS_TOKEN`            | yes      | --                                        |
//! | `PARTNER_CENTER_API_URL`                 | no       | `https://api.partnercenter.microsoft.com` |
//! | `PARTNER_CENTER_LOCALE`                  | no       | `en-US`                                   |
//! | `PARTNER_CENTER_REQUEST_TIMEOUT_SECS`    | no       | `30`                                      |
//! | `PARTNER_CENTER_DEFAULT_CUSTOMER_ID`     | no       | prompt                                    |
//! | `PARTNER_CENTER_DEFAULT_SUBSCRIPTION_ID` | no       | prompt                                    |

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use partner_client::PartnerCenterApi;
use partner_scenarios::config::SampleConfig;
use partner_scenarios::console::ConsoleHelper;
use partner_scenarios::context::ScenarioContext;
use partner_scenarios::{runner, scenarios};

/// Partner subscription sample scenarios.
#[derive(Parser, Debug)]
#[command(name = "partner-samples", version, about)]
struct Cli {
    /// Run a single scenario by name and exit.
    #[arg(long, short = 's')]
    scenario: Option<String>,

    /// List scenario names and exit.
    #[arg(long)]
    list: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr so they never split a prompt line.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "partner_scenarios=warn,partner_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let all = scenarios::all();

    if cli.list {
        let mut console = ConsoleHelper::stdio();
        for scenario in &all {
            console.write_line(&format!("{:<26} {}", scenario.name(), scenario.title()))?;
        }
        return Ok(());
    }

    let selected = match cli.scenario.as_deref() {
        Some(name) => Some(scenarios::find(name).with_context(|| {
            format!("unknown scenario '{name}' (run with --list to see the available names)")
        })?),
        None => None,
    };

    let config = SampleConfig::from_env().context("failed to load configuration")?;
    tracing::info!(
        api_url = %config.client.api_url,
        locale = %config.client.locale,
        "Loaded partner API configuration",
    );

    let api = PartnerCenterApi::new(&config.client).context("failed to build HTTP client")?;
    tracing::debug!(correlation_id = %api.correlation_id(), "Partner API client ready");

    let mut ctx = ScenarioContext::new(Arc::new(api), ConsoleHelper::stdio(), config.defaults);

    match selected {
        Some(scenario) => runner::run_scenario(scenario.as_ref(), &mut ctx).await?,
        None => runner::run_menu(&all, &mut ctx).await?,
    }

    Ok(())
}
