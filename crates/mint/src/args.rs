use clap::Parser;
use eyre::Result;

use crate::{
    app::App,
    cmd, handler,
    opts::{NftMint, NftMintSubcommand},
    utils,
};

/// Run the `nft-mint` command-line interface.
pub fn run() -> Result<()> {
    setup();

    let args = NftMint::parse();
    tokio::runtime::Builder::new_current_thread().enable_all().build()?.block_on(run_command(args))
}

/// Setup the global logger and other utilities.
pub fn setup() {
    handler::install();
    utils::subscriber();
    utils::enable_paint();
}

/// Run the subcommand.
pub async fn run_command(args: NftMint) -> Result<()> {
    let config = args.config.load_config()?;
    let command = args.cmd.unwrap_or(NftMintSubcommand::Interactive);

    let provider = match command {
        NftMintSubcommand::Info => None,
        _ => args.wallet.provider(&config).await?,
    };
    if provider.is_none() {
        debug!("running without a wallet");
    }
    let mut app = App::new(config, provider)?;

    match command {
        NftMintSubcommand::Interactive => cmd::interactive::run(&mut app).await,
        NftMintSubcommand::Status => cmd::status::run(&mut app).await,
        NftMintSubcommand::Mint => cmd::mint::run(&mut app).await,
        NftMintSubcommand::Info => cmd::info::run(&app),
    }
}
