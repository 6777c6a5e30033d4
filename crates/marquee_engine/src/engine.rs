use std::io;
use std::sync::mpsc;
use std::thread;

use marquee_logging::{marquee_debug, marquee_warn};

use crate::{EngineCommand, EngineEvent, ListingApi};

/// Runs fetches on a background tokio runtime and reports one event per command.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(api: ListingApi, event_tx: mpsc::Sender<EngineEvent>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("marquee-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(&api, command).await;
                        if event_tx.send(event).is_err() {
                            marquee_debug!("Engine event dropped; receiver is gone");
                        }
                    });
                }
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, command: EngineCommand) {
        if let Err(err) = self.cmd_tx.send(command) {
            marquee_warn!("Engine stopped; dropping {:?}", err.0);
        }
    }
}

async fn handle_command(api: &ListingApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::BrowsePage { generation, page } => EngineEvent::BrowsePage {
            generation,
            page,
            result: api.fetch_browse_page(page).await,
        },
        EngineCommand::SearchPage {
            generation,
            query,
            page,
        } => EngineEvent::SearchPage {
            generation,
            page,
            result: api.fetch_search_page(&query, page).await,
        },
        EngineCommand::Detail { generation, id } => EngineEvent::Detail {
            generation,
            id,
            result: api.fetch_detail(id).await,
        },
        EngineCommand::Credits { generation, id } => EngineEvent::Credits {
            generation,
            id,
            result: api.fetch_credits(id).await,
        },
    }
}
