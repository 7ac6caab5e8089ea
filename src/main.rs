//! Walswap CLI - composition root for the wallet/swap core
//!
//! `balance` queries a live Sui fullnode; `demo` wires the managers to the
//! simulated wallet environment and runs a full connect -> swap ->
//! disconnect journey in the terminal.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use walswap::adapters::{MemoryPreferenceStore, SimulatedEnv, SuiBalanceOracle};
use walswap::application::{SwapOrchestrator, WalletConnectionManager};
use walswap::config::{SwapConfig, TESTNET_RPC_URL};
use walswap::domain::amount;
use walswap::domain::{EventKind, WalletEvent};
use walswap::ports::oracle::BalanceOracle;
use walswap::ports::storage::PreferenceStore;

#[derive(Parser)]
#[command(name = "walswap", about = "Sui wallet connection and SUI->WAL swap demo")]
struct Cli {
    /// Log at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query an address's SUI balance from a fullnode
    Balance(BalanceCmd),
    /// Run a simulated connect -> swap -> disconnect journey
    Demo(DemoCmd),
}

#[derive(Args)]
struct BalanceCmd {
    /// Account address to query
    address: String,

    /// Fullnode RPC endpoint
    #[arg(long, default_value = TESTNET_RPC_URL)]
    rpc_url: String,
}

#[derive(Args)]
struct DemoCmd {
    /// Amount of SUI to swap
    #[arg(long, default_value = "2.5")]
    amount: String,

    /// Simulated starting balance in SUI
    #[arg(long, default_value = "10")]
    starting_balance: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Command::Balance(cmd) => balance_command(cmd).await,
        Command::Demo(cmd) => demo_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    fmt().with_env_filter(filter).init();
}

async fn balance_command(cmd: BalanceCmd) -> Result<()> {
    let oracle = SuiBalanceOracle::new(cmd.rpc_url);
    let base_units = oracle
        .get_balance(&cmd.address)
        .await
        .context("balance query failed")?;
    let balance = amount::from_base_units(base_units);

    println!("Address: {}", cmd.address);
    println!(
        "Balance: {} MIST ({} SUI)",
        base_units,
        amount::format_display(balance)
    );
    Ok(())
}

async fn demo_command(cmd: DemoCmd) -> Result<()> {
    let starting = amount::parse_amount(&cmd.starting_balance)
        .context("invalid --starting-balance")?;
    let starting_base = amount::to_base_units(starting)
        .context("--starting-balance out of range")?;

    let env = SimulatedEnv::new("Sim Wallet", "0x5101ab", starting_base);
    let connection = Arc::new(WalletConnectionManager::new(
        env.provider(),
        env.oracle(),
        Arc::new(MemoryPreferenceStore::new()) as Arc<dyn PreferenceStore>,
    ));
    let orchestrator = SwapOrchestrator::new(Arc::clone(&connection), SwapConfig::testnet());

    connection
        .events()
        .subscribe(EventKind::Connected, |event| {
            if let WalletEvent::Connected { account } = event {
                println!(
                    "connected: {} via {}",
                    account.short_address(),
                    account.wallet_name
                );
            }
        });
    connection
        .events()
        .subscribe(EventKind::BalanceUpdated, |event| {
            if let WalletEvent::BalanceUpdated { balance } = event {
                println!("balance: {} SUI", amount::format_display(*balance));
            }
        });
    connection
        .events()
        .subscribe(EventKind::Disconnected, |_| println!("disconnected"));

    let account = connection.connect(None).await?;
    println!(
        "max swappable (gas reserve applied): {} SUI",
        amount::format_display(amount::max_swap_amount(
            connection.balance().map(|b| b.amount).unwrap_or_default()
        ))
    );

    let outcome = orchestrator.execute_swap(&cmd.amount).await;
    match outcome {
        walswap::application::SwapOutcome::Success { digest } => {
            println!("swap succeeded: {digest}");
        }
        walswap::application::SwapOutcome::Failure { reason } => {
            println!("swap failed: {reason}");
        }
    }

    connection.disconnect().await;
    println!(
        "ledger after session: {} SUI remaining for {}",
        amount::format_display(amount::from_base_units(env.balance())),
        account.short_address()
    );
    Ok(())
}
