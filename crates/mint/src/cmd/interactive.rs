use dialoguer::{Input, Select};
use eyre::Result;
use yansi::Paint;

use crate::{app::App, connection::Notice, view::Action};

/// Shows the app and acts on its primary action until the user quits.
pub async fn run(app: &mut App) -> Result<()> {
    let notices = app.load().await;
    acknowledge(&notices).await?;

    loop {
        let screen = app.screen();
        println!("\n{screen}\n");

        match choose(screen.action).await? {
            Some(Action::Connect) => {
                let notices = app.connect().await;
                acknowledge(&notices).await?;
            }
            Some(Action::Mint) => {
                if let Err(err) = super::mint_with_progress(app).await {
                    debug!(%err, "mint attempt failed");
                }
            }
            None => break,
        }
    }
    Ok(())
}

/// Offers `action` next to "Quit". `None` means quit.
async fn choose(action: Option<Action>) -> Result<Option<Action>> {
    tokio::task::spawn_blocking(move || -> Result<Option<Action>> {
        let choices: Vec<Option<Action>> = action.into_iter().map(Some).chain([None]).collect();
        let select = choices
            .iter()
            .fold(Select::new().with_prompt("What next?").default(0), |select, choice| {
                select.item(choice.map_or("Quit", Action::label))
            });
        let selection = select.interact_opt()?;
        Ok(selection.and_then(|index| choices.get(index).copied().flatten()))
    })
    .await?
}

/// Shows each notice and waits for the user to acknowledge it.
async fn acknowledge(notices: &[Notice]) -> Result<()> {
    for notice in notices {
        let prompt = format!("{} (press enter)", notice.yellow().bold());
        tokio::task::spawn_blocking(move || {
            Input::<String>::new().with_prompt(prompt).allow_empty(true).interact_text()
        })
        .await??;
    }
    Ok(())
}
