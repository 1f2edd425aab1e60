//! Packager core: pure form and submission state machine plus view-model helpers.
mod effect;
mod field;
mod form;
mod msg;
mod state;
mod submission;
mod update;
mod view_model;

pub use effect::{ConvertRequest, Effect};
pub use field::{validate, validate_app_name, validate_url, Field, ValidationError};
pub use form::{FormState, FormVariant};
pub use msg::{Msg, RequestId};
pub use state::AppState;
pub use submission::{
    classify, RemoteError, RequestOutcome, SubmissionState, CONNECTIVITY_MESSAGE,
    SERVER_ERROR_FALLBACK, SUCCESS_PREFIX,
};
pub use update::update;
pub use view_model::{AppViewModel, FieldView};
