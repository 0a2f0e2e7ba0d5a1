//! Entry point for the Rota GitHub triage bot webhook server.

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rota_github_triage_runtime::{run_github_triage_server, BoardConfig, GithubTriageRuntimeConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Webhook-driven GitHub triage bot", long_about = None)]
struct Cli {
    /// Address the webhook server binds to.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// GitHub REST API base URL.
    #[arg(long, default_value = "https://api.github.com")]
    github_api_base: String,

    /// GraphQL endpoint used for project board operations.
    #[arg(long, default_value = "https://api.github.com/graphql")]
    github_graphql_url: String,

    /// Token used for comment and board operations.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Login of the bot account; comments trigger commands via `@<login>`.
    #[arg(long, default_value = "rota-triage-bot")]
    bot_login: String,

    /// Team mention placed at the top of posted triage templates.
    #[arg(long, default_value = "@maintainers")]
    team_mention: String,

    /// Per-request timeout for outbound API calls, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    request_timeout_ms: u64,

    /// Simulated check duration, in milliseconds.
    #[arg(long, default_value_t = 2_000)]
    check_delay_ms: u64,

    /// Hard ceiling for a check run before it is reported as timed out.
    #[arg(long, default_value_t = 180_000)]
    check_timeout_ms: u64,

    /// Page size used when looking up existing board memberships.
    #[arg(long, default_value_t = 50)]
    membership_page_size: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let board = BoardConfig::from_env();
    if !board.is_valid() {
        warn!("board configuration incomplete, board sync will run as a no-op");
    }

    let config = GithubTriageRuntimeConfig {
        api_base: cli.github_api_base,
        graphql_url: cli.github_graphql_url,
        token: cli.github_token,
        bot_login: cli.bot_login,
        team_mention: cli.team_mention,
        board,
        request_timeout_ms: cli.request_timeout_ms,
        check_delay_ms: cli.check_delay_ms,
        check_timeout_ms: cli.check_timeout_ms,
        membership_page_size: cli.membership_page_size,
        bind: cli.bind,
    };

    run_github_triage_server(config).await
}
