//! Packager engine: HTTP client for the packaging service and effect execution.
mod client;
mod engine;
mod types;

pub use client::{PackagerClient, ReqwestPackagerClient, ServiceSettings, DEFAULT_BASE_URL};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    ConvertPayload, EngineEvent, FailureKind, RequestId, ServiceResponse, TransportError,
};
