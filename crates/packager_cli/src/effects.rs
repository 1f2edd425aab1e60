use std::time::Duration;

use packager_core::{Effect, Msg, RequestOutcome};
use packager_engine::{
    ConvertPayload, EngineError, EngineEvent, EngineHandle, ServiceResponse, ServiceSettings,
};
use packager_logging::{packager_error, packager_info, packager_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Starts every effect. Returns messages that must be applied right away,
    /// which happens when a request could not even be handed to the engine.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut immediate = Vec::new();
        for effect in effects {
            match effect {
                Effect::DispatchConvert {
                    request_id,
                    request,
                } => {
                    packager_info!(
                        "DispatchConvert request_id={} url={} app_name={:?}",
                        request_id,
                        request.url,
                        request.app_name
                    );
                    let payload = ConvertPayload {
                        url: request.url,
                        app_name: request.app_name,
                    };
                    if let Err(err) = self.engine.dispatch(request_id, payload) {
                        packager_error!("Request {} not dispatched: {}", request_id, err);
                        immediate.push(Msg::SubmissionSettled {
                            request_id,
                            outcome: RequestOutcome::Unreachable {
                                reason: err.to_string(),
                            },
                        });
                    }
                }
            }
        }
        immediate
    }

    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }

    pub fn try_next_msg(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Settled { request_id, result } => Msg::SubmissionSettled {
            request_id,
            outcome: match result {
                Ok(ServiceResponse { status, body }) => RequestOutcome::Responded { status, body },
                Err(err) => {
                    packager_warn!("Request {} failed in transport: {}", request_id, err);
                    RequestOutcome::Unreachable {
                        reason: err.to_string(),
                    }
                }
            },
        },
    }
}
