use eyre::Result;

use crate::app::App;

/// Runs the startup checks and prints the resulting screen. Never prompts the wallet.
pub async fn run(app: &mut App) -> Result<()> {
    let notices = app.load().await;
    super::print_notices(&notices);
    println!("{}", app.screen());
    Ok(())
}
