use std::sync::{mpsc, Arc};
use std::thread;

use suggester_logging::{suggester_debug, suggester_warn};
use tokio::sync::mpsc as async_mpsc;

use crate::lookup::{LookupService, LookupSettings, ReqwestLookupService};
use crate::{EngineEvent, LookupError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build engine runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

enum EngineCommand {
    Lookup {
        request_id: RequestId,
        identifier: String,
    },
}

/// Runs lookups on a dedicated thread with a single-threaded tokio runtime.
/// Completions come back in whatever order the service answers.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: LookupSettings) -> Result<Self, EngineError> {
        let service = ReqwestLookupService::new(settings)?;
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn LookupService>) -> Result<Self, EngineError> {
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("suggester-engine".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(command) = cmd_rx.recv().await {
                        let service = service.clone();
                        let event_tx = event_tx.clone();
                        tokio::spawn(async move {
                            handle_command(service.as_ref(), command, event_tx).await;
                        });
                    }
                });
            })
            .map_err(EngineError::Spawn)?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Fire-and-forget: the outcome arrives later as an [`EngineEvent`].
    pub fn lookup(&self, request_id: RequestId, identifier: impl Into<String>) {
        let command = EngineCommand::Lookup {
            request_id,
            identifier: identifier.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            suggester_warn!("engine thread gone; lookup {} dropped", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    service: &dyn LookupService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Lookup {
            request_id,
            identifier,
        } => {
            suggester_debug!("lookup {} started", request_id);
            let result = service
                .lookup(&identifier)
                .await
                .map(|response| response.into_reply());
            let _ = event_tx.send(EngineEvent::LookupCompleted { request_id, result });
        }
    }
}
