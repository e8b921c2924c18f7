use anyhow::Context;
use clap::Parser;
use lottery_core::{LotteryConfig, LotterySession, SessionEnd, StdioTerminal, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lottery")]
#[command(about = "Timed lottery registration with a random winner draw")]
#[command(version)]
struct Cli {
    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Resolves on Ctrl-C. If the handler cannot be installed it never resolves.
async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn run(config: LotteryConfig) -> anyhow::Result<SessionEnd> {
    let mut session = LotterySession::open(config).context("Failed to load lottery state")?;
    let mut terminal = StdioTerminal::new();

    terminal.say("Welcome to the Lottery Registration System!");
    let end = session.run_until(&mut terminal, interrupt()).await?;

    tracing::debug!("Session finished: {:?}", end);
    Ok(end)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "lottery={},lottery_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(LotteryConfig::default()).await;

    // the stdin reader thread may still be parked on a read, so leave
    // without waiting for the runtime to wind down
    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
