use alloy_primitives::{Address, TxHash, U256, address};
use mint_config::MintConfig;
use mint_wallets::{
    WalletProvider,
    mock::{Confirmation, MockWallet},
};
use nft_mint::{Action, App, MintError, MintStatus, Notice, StatusLine};
use std::{sync::Arc, time::Duration};

const ABC: Address = address!("0x0000000000000000000000000000000000000abc");

fn app(wallet: Option<&MockWallet>) -> App {
    app_with(MintConfig::default(), wallet)
}

fn app_with(config: MintConfig, wallet: Option<&MockWallet>) -> App {
    let provider = wallet.map(|wallet| Arc::new(wallet.clone()) as Arc<dyn WalletProvider>);
    App::new(config, provider).unwrap()
}

#[tokio::test]
async fn provider_absent_at_load() {
    let mut app = app(None);
    let notices = app.load().await;
    assert_eq!(
        notices,
        vec![Notice::InstallWallet { url: "https://metamask.io/download.html".to_string() }]
    );
    assert_eq!(app.connection().account(), None);
    assert_eq!(app.screen().action, Some(Action::Connect));

    // connecting without a wallet only repeats the notice
    assert_eq!(app.connect().await.len(), 1);
    assert!(matches!(app.mint().await, Err(MintError::NotConnected)));
    assert_eq!(app.flow().status(), MintStatus::None);
}

#[tokio::test]
async fn authorized_account_on_right_chain_can_mint_without_prompt() {
    let wallet = MockWallet::new().with_accounts(vec![ABC]).with_chain_id("0x13881");
    let mut app = app(Some(&wallet));
    assert!(app.load().await.is_empty());
    assert_eq!(app.connection().account(), Some(ABC));
    assert_eq!(app.screen().action, Some(Action::Mint));
    assert!(!wallet.calls().contains(&"request_accounts"));
}

#[tokio::test]
async fn no_account_shows_connect_until_authorized() {
    let wallet = MockWallet::new().authorizing(vec![ABC]);
    let mut app = app(Some(&wallet));
    assert!(app.load().await.is_empty());
    assert_eq!(app.screen().action, Some(Action::Connect));

    assert!(app.connect().await.is_empty());
    assert_eq!(app.screen().action, Some(Action::Mint));
    assert_eq!(wallet.calls(), vec!["accounts", "chain_id", "request_accounts"]);
}

#[tokio::test]
async fn wrong_network_blocks_minting() {
    let wallet = MockWallet::new().with_accounts(vec![ABC]).with_chain_id("0x1");
    let mut app = app(Some(&wallet));
    let notices = app.load().await;
    assert_eq!(notices, vec![Notice::SwitchNetwork { network: "Polygon Testnet".to_string() }]);
    assert!(!app.connection().network_match());
    assert_eq!(app.screen().action, Some(Action::Connect));

    assert!(matches!(app.mint().await, Err(MintError::WrongNetwork { .. })));
    assert!(wallet.sent().is_empty());
}

#[tokio::test]
async fn confirmed_mint_shows_hash() {
    let hash = TxHash::with_last_byte(0x42);
    let wallet = MockWallet::new().with_accounts(vec![ABC]).with_tx_hash(hash);
    let mut app = app(Some(&wallet));
    app.load().await;

    assert_eq!(app.mint().await.unwrap(), hash);
    let screen = app.screen();
    assert_eq!(app.flow().status(), MintStatus::Success);
    assert_eq!(screen.tx_hash, Some(hash));
    assert_eq!(screen.action, Some(Action::Mint));
    assert_eq!(screen.status, None);

    let sent = wallet.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, Some(ABC));
    assert_eq!(sent[0].value, Some(U256::from(10_000_000_000_000_000u64)));
}

#[tokio::test]
async fn rejected_mint_shows_failure() {
    let wallet = MockWallet::new()
        .with_accounts(vec![ABC])
        .rejecting_transactions("MetaMask Tx Signature: User denied transaction signature.");
    let mut app = app(Some(&wallet));
    app.load().await;

    let err = app.mint().await.unwrap_err();
    assert!(err.is_rejection());
    let screen = app.screen();
    assert_eq!(app.flow().status(), MintStatus::Error);
    assert_eq!(screen.tx_hash, None);
    assert_eq!(
        screen.status,
        Some(StatusLine::Failed { price: "0.01".to_string(), currency: "MATIC".to_string() })
    );
    assert_eq!(screen.action, Some(Action::Mint));
}

#[tokio::test]
async fn reverted_mint_is_a_failure() {
    let wallet =
        MockWallet::new().with_accounts(vec![ABC]).with_confirmation(Confirmation::Reverted);
    let mut app = app(Some(&wallet));
    app.load().await;

    app.mint().await.unwrap_err();
    assert_eq!(app.flow().status(), MintStatus::Error);
    assert_eq!(app.flow().tx_hash(), None);
}

#[tokio::test(start_paused = true)]
async fn unmined_transaction_times_out() {
    let config = MintConfig { confirmation_timeout: Some(90), ..Default::default() };
    let wallet = MockWallet::new().with_accounts(vec![ABC]).with_confirmation(Confirmation::Never);
    let mut app = app_with(config, Some(&wallet));
    app.load().await;

    let err = app.mint().await.unwrap_err();
    assert!(
        matches!(err, MintError::Timeout { timeout, .. } if timeout == Duration::from_secs(90))
    );
    assert_eq!(app.flow().status(), MintStatus::Error);
}

#[tokio::test]
async fn retry_after_failure() {
    let wallet = MockWallet::new().with_accounts(vec![ABC]).rejecting_transactions("denied");
    let mut app = app(Some(&wallet));
    app.load().await;
    app.mint().await.unwrap_err();

    let hash = TxHash::with_last_byte(3);
    let wallet = wallet.with_tx_hash(hash);
    assert_eq!(app.mint().await.unwrap(), hash);
    assert_eq!(app.flow().status(), MintStatus::Success);
    assert_eq!(wallet.sent().len(), 2);
}

#[test]
fn invalid_config_is_rejected() {
    let config = MintConfig { mint_price: "free".to_string(), ..Default::default() };
    assert!(App::new(config, None).is_err());
}
