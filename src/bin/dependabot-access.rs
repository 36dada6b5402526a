use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dependabot_access::dependabot::DEFAULT_DEPENDABOT_API_URL;
use dependabot_access::github::DEFAULT_GITHUB_API_URL;
use dependabot_access::{
    load_access_config, normalize, App, DependabotClient, GitHubGateway, Settings,
};

/// Installs the Dependabot app on the main team's repositories and registers update configs.
#[derive(Parser, Debug)]
#[command(name = "dependabot-access", version)]
struct Args {
    /// GitHub organization
    #[arg(long)]
    org: String,

    /// Main team; its repositories are the ones configured
    #[arg(long)]
    team: String,

    /// Path to the JSON access file
    #[arg(long)]
    access: PathBuf,

    /// Installation id of the Dependabot app
    #[arg(long)]
    dependabot_id: u64,

    /// Dependabot account id of the organization
    #[arg(long)]
    account_id: String,

    #[arg(long, default_value = DEFAULT_GITHUB_API_URL)]
    github_api_url: String,

    #[arg(long, default_value = DEFAULT_DEPENDABOT_API_URL)]
    dependabot_api_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let token = std::env::var("GITHUB_TOKEN").context("GITHUB_TOKEN is not set")?;

    let entries = load_access_config(&args.access)?;
    let config = normalize(&entries, &args.team)?;

    let gateway = GitHubGateway::with_base_url(&token, &args.org, &args.github_api_url)?;
    let registrar =
        DependabotClient::with_base_url(&token, &args.account_id, &args.dependabot_api_url)?;
    let settings = Settings {
        org: args.org,
        team: args.team,
        app_id: args.dependabot_id,
    };

    let report = App::new(settings, gateway, registrar)
        .configure(&config)
        .await?;

    if report.has_failures() {
        eprintln!("error(s) were encountered - see above");
        std::process::exit(1);
    }

    Ok(())
}
