use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::ordem_producao::OpStatus;
use crate::entities::peca::PecaStatus;

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Eventos emitidos após o commit das mutações. Apenas telemetria:
/// nenhuma regra de consistência depende deles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    OpCreated(Uuid),
    OpUpdated(Uuid),
    OpDeleted(Uuid),
    OpStatusChanged {
        ordem_id: Uuid,
        old_status: OpStatus,
        new_status: OpStatus,
        /// true quando a mudança veio da derivação por peças,
        /// false quando foi ação explícita do usuário.
        derived: bool,
    },
    PecaCreated(Uuid),
    PecaUpdated(Uuid),
    PecaDeleted(Uuid),
    PecaStatusChanged {
        peca_id: Uuid,
        old_status: PecaStatus,
        new_status: PecaStatus,
    },
    AtividadeCreated(Uuid),
    ClienteCreated(Uuid),
}

/// Drains the event channel, logging every event. Runs as a background
/// task for the lifetime of the process.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::OpStatusChanged {
                ordem_id,
                old_status,
                new_status,
                derived,
            } => {
                info!(
                    ordem_id = %ordem_id,
                    old_status = %old_status,
                    new_status = %new_status,
                    derived = derived,
                    "OP status changed"
                );
            }
            other => debug!("Received event: {:?}", other),
        }
    }

    info!("Event processing loop stopped");
}
