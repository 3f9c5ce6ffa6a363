use eyre::{Context, Result};

use crate::app::App;

/// Connects the wallet if no account is authorized yet, then mints once.
pub async fn run(app: &mut App) -> Result<()> {
    let notices = app.load().await;
    super::print_notices(&notices);

    if app.connection().account().is_none() {
        let notices = app.connect().await;
        super::print_notices(&notices);
    }

    let result = super::mint_with_progress(app).await;
    println!("{}", app.screen());
    result.wrap_err("could not mint")?;
    Ok(())
}
