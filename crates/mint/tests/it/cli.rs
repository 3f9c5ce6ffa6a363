use clap::Parser;
use nft_mint::opts::{NftMint, NftMintSubcommand};

#[test]
fn parses_wallet_and_config_options() {
    let args = NftMint::parse_from([
        "nft-mint",
        "--rpc-url",
        "http://localhost:8545",
        "--confirmation-timeout",
        "60",
        "--keystore",
        "keystore.json",
        "status",
    ]);
    assert!(matches!(args.cmd, Some(NftMintSubcommand::Status)));
    assert_eq!(args.config.rpc_url.as_deref(), Some("http://localhost:8545"));
    assert_eq!(args.config.confirmation_timeout, Some(60));
    assert!(args.wallet.keystore.is_some());
}

#[test]
fn rejects_conflicting_wallets() {
    let result =
        NftMint::try_parse_from(["nft-mint", "--browser", "--keystore", "keystore.json"]);
    assert!(result.is_err());
}

#[tokio::test]
async fn info_runs_without_a_wallet() {
    let args = NftMint::parse_from(["nft-mint", "info"]);
    nft_mint::args::run_command(args).await.unwrap();
}
