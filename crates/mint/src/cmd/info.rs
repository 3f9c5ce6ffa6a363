use alloy_sol_types::SolCall;
use eyre::Result;
use yansi::Paint;

use crate::{app::App, contract::INFTCollectible};

/// Prints the collection and network settings.
pub fn run(app: &App) -> Result<()> {
    let config = app.config();
    let contract = app.contract();
    let rows = [
        ("Contract", contract.address().to_string()),
        ("Function", INFTCollectible::mintNFTsCall::SIGNATURE.to_string()),
        ("Quantity", contract.quantity().to_string()),
        (
            "Price",
            format!("{} {} ({} wei)", config.mint_price, config.native_currency, contract.price()),
        ),
        ("Network", format!("{} ({})", config.network_name, config.required_chain_id)),
        ("RPC URL", config.rpc_url.clone()),
        ("Marketplace", config.marketplace_url.clone()),
    ];
    for (name, value) in rows {
        println!("{:<12} {value}", format!("{name}:").bold());
    }
    Ok(())
}
