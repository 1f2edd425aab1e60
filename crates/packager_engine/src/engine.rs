use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use packager_logging::{packager_debug, packager_info};
use thiserror::Error;

use crate::client::{PackagerClient, ReqwestPackagerClient, ServiceSettings};
use crate::{ConvertPayload, EngineEvent, FailureKind, RequestId, TransportError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("engine thread has stopped")]
    Stopped,
}

enum EngineCommand {
    Convert {
        request_id: RequestId,
        payload: ConvertPayload,
    },
}

/// Runs requests on a background runtime and hands settlements back over a channel.
///
/// Dropping the handle closes both channels; requests still in flight then
/// settle into the void instead of touching their owner's state.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        Self::with_client(Arc::new(ReqwestPackagerClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn PackagerClient>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
            packager_debug!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn dispatch(&self, request_id: RequestId, payload: ConvertPayload) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Convert {
                request_id,
                payload,
            })
            .map_err(|_| EngineError::Stopped)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Sends exactly one settlement for a request, even if the task is dropped
/// or panics before the client call returns.
struct SettleGuard {
    request_id: RequestId,
    event_tx: mpsc::Sender<EngineEvent>,
    settled: bool,
}

impl SettleGuard {
    fn new(request_id: RequestId, event_tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            request_id,
            event_tx,
            settled: false,
        }
    }

    fn settle(mut self, result: Result<crate::ServiceResponse, TransportError>) {
        self.settled = true;
        self.send(result);
    }

    fn send(&self, result: Result<crate::ServiceResponse, TransportError>) {
        // The receiver is gone when the owner was torn down; nothing to update then.
        let _ = self.event_tx.send(EngineEvent::Settled {
            request_id: self.request_id,
            result,
        });
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if !self.settled {
            self.send(Err(TransportError::new(
                FailureKind::Cancelled,
                "request dropped before settling",
            )));
        }
    }
}

async fn handle_command(
    client: &dyn PackagerClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Convert {
            request_id,
            payload,
        } => {
            let guard = SettleGuard::new(request_id, event_tx);
            packager_info!("Dispatching request {} url={}", request_id, payload.url);
            let result = client.convert(&payload).await;
            match &result {
                Ok(response) => {
                    packager_info!("Request {} answered with status {}", request_id, response.status)
                }
                Err(err) => packager_info!("Request {} failed: {}", request_id, err),
            }
            guard.settle(result);
        }
    }
}
