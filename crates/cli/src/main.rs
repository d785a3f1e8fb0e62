use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};

use nlg_cli::{
    commands::{buy as buy_cmd, quote as quote_cmd, status as status_cmd, watch as watch_cmd},
    config::{DEFAULT_CONFIG_PATH, load_config, signer_key},
};

#[derive(Debug, Parser)]
#[command(name = "nlg-cli", about = "NaijaLoyal IDO storefront CLI", version)]
struct Cli {
    /// Path to the IDO configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: PathBuf,

    /// RPC URL for the target chain
    #[arg(long, env = "NLG_RPC_URL", value_name = "URL")]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show current sale statistics (and wallet balances for an account)
    Status(AccountArgs),

    /// Quote how many NLG a given ETH amount buys
    Quote(AmountArgs),

    /// Buy tokens with ETH (requires PRIVATE_KEY)
    Buy(AmountArgs),

    /// Follow the sale live, refreshing until the wallet changes
    Watch(AccountArgs),
}

#[derive(Debug, Args)]
struct AccountArgs {
    /// Account address to display balances for (observer mode)
    #[arg(long, value_name = "ADDRESS")]
    account: Option<String>,
}

#[derive(Debug, Args)]
struct AmountArgs {
    /// ETH amount in human units (e.g. 0.0066)
    #[arg(long, value_name = "AMOUNT")]
    eth: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    let rpc_url = cli
        .rpc_url
        .as_deref()
        .ok_or_else(|| eyre::eyre!("--rpc-url or NLG_RPC_URL is required"))?;

    match cli.command {
        Commands::Status(args) => {
            let account = parse_account(args.account.as_deref())?;
            status_cmd::status(rpc_url, &config, account).await?
        }
        Commands::Quote(args) => quote_cmd::quote(rpc_url, &config, &args.eth).await?,
        Commands::Buy(args) => {
            let key = signer_key()
                .ok_or_else(|| eyre::eyre!("buying requires PRIVATE_KEY in the environment"))?;
            buy_cmd::buy(rpc_url, &config, &key, &args.eth).await?
        }
        Commands::Watch(args) => {
            let account = parse_account(args.account.as_deref())?;
            let key = signer_key();
            watch_cmd::watch(rpc_url, &config, key.as_deref(), account).await?
        }
    }

    Ok(())
}

fn parse_account(account: Option<&str>) -> eyre::Result<Option<Address>> {
    account.map(|s| s.parse::<Address>()).transpose().map_err(Into::into)
}
