//! Subcommands of the `nft-mint` binary.

use alloy_primitives::TxHash;
use yansi::Paint;

use crate::{app::App, connection::Notice, error::MintError, view::StatusLine};

pub mod info;
pub mod interactive;
pub mod mint;
pub mod status;

/// Prints notices without waiting for the user.
fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("{}", notice.yellow().bold());
    }
}

/// Mints, printing the loading line while the transaction is pending.
async fn mint_with_progress(app: &mut App) -> Result<TxHash, MintError> {
    println!("{}", StatusLine::Loading.yellow());
    app.mint().await
}
