// App orchestrator: applies user commands to the session and pushes the
// resulting views to the TUI.
//
// Provider calls for one command run to completion before the next command
// is read, so views are never computed from a half-loaded player.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::protocol::{UiUpdate, UserCommand};
use crate::session::Session;

/// Run the command loop until `Quit` arrives or the TUI hangs up.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut session: Session,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx
        .send(UiUpdate::Ready {
            category: session.category(),
            thresholds: session.thresholds().to_vec(),
        })
        .await;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                handle_user_command(&mut session, cmd, &ui_tx).await;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Push the current analysis, if a player is loaded.
async fn send_analysis(session: &Session, ui_tx: &mpsc::Sender<UiUpdate>) {
    if let Some(view) = session.analysis() {
        let _ = ui_tx.send(UiUpdate::Analysis(Box::new(view))).await;
    }
}

async fn send_error(ui_tx: &mpsc::Sender<UiUpdate>, err: anyhow::Error) {
    warn!("{:#}", err);
    let _ = ui_tx.send(UiUpdate::Error(format!("Error: {err:#}"))).await;
}

/// Handle a single user command from the TUI.
async fn handle_user_command(
    session: &mut Session,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::LoadPlayer(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return;
            }
            let _ = ui_tx.send(UiUpdate::Busy(format!("Loading {name}..."))).await;
            match session.load_player(&name).await {
                Ok(true) => {
                    if let Some(card) = session.player_card() {
                        let _ = ui_tx
                            .send(UiUpdate::PlayerLoaded(Box::new(card.clone())))
                            .await;
                    }
                    send_analysis(session, ui_tx).await;
                    let loaded = session.events().len();
                    let _ = ui_tx
                        .send(UiUpdate::Notice(format!(
                            "Loaded {loaded} plate appearances for {name}"
                        )))
                        .await;
                }
                Ok(false) => {
                    let _ = ui_tx
                        .send(UiUpdate::NoData(format!("No player found for '{name}'")))
                        .await;
                }
                Err(e) => send_error(ui_tx, e).await,
            }
        }
        UserCommand::SetOpponent(opponent) => {
            session.set_opponent(&opponent);
            info!("Opponent filter set to '{}'", session.opponent());
            send_analysis(session, ui_tx).await;
        }
        UserCommand::SetThresholds(text) => {
            session.set_thresholds(&text);
            info!("Thresholds set to {:?}", session.thresholds());
            send_analysis(session, ui_tx).await;
        }
        UserCommand::SetCategory(category) => {
            session.set_category(category);
            send_analysis(session, ui_tx).await;
        }
        UserCommand::LoadSeason => {
            let _ = ui_tx
                .send(UiUpdate::Busy("Loading season stats...".to_string()))
                .await;
            match session.load_season().await {
                Ok(Some(summary)) if !summary.lines.is_empty() => {
                    let _ = ui_tx.send(UiUpdate::Season(Box::new(summary.clone()))).await;
                    let _ = ui_tx
                        .send(UiUpdate::Notice(format!("Season {} loaded", summary.season)))
                        .await;
                }
                Ok(Some(summary)) => {
                    let _ = ui_tx
                        .send(UiUpdate::Notice(format!(
                            "No {} season stats available",
                            summary.season
                        )))
                        .await;
                }
                Ok(None) => {
                    let _ = ui_tx
                        .send(UiUpdate::Notice("Load a player first".to_string()))
                        .await;
                }
                Err(e) => send_error(ui_tx, e).await,
            }
        }
        UserCommand::LoadCareer => {
            let _ = ui_tx
                .send(UiUpdate::Busy("Loading career stats...".to_string()))
                .await;
            match session.load_career().await {
                Ok(Some([])) => {
                    let _ = ui_tx
                        .send(UiUpdate::Notice("No career data available.".to_string()))
                        .await;
                }
                Ok(Some(lines)) => {
                    let count = lines.len();
                    let _ = ui_tx.send(UiUpdate::Career(lines.to_vec())).await;
                    let _ = ui_tx
                        .send(UiUpdate::Notice(format!("Loaded {count} career seasons")))
                        .await;
                }
                Ok(None) => {
                    let _ = ui_tx
                        .send(UiUpdate::Notice("Load a player first".to_string()))
                        .await;
                }
                Err(e) => send_error(ui_tx, e).await,
            }
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}
