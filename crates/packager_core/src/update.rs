use packager_logging::packager_debug;

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { field, value } => {
            state.change_field(field, value);
            Vec::new()
        }
        Msg::FieldBlurred(field) => {
            state.blur_field(field);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // One request at a time; a click while submitting is dropped, not queued.
            if state.submission().is_submitting() {
                packager_debug!("Submit rejected: request {:?} still in flight", state.in_flight());
                return (state, Vec::new());
            }
            if !state.validate_for_submit() {
                packager_debug!("Submit blocked by field validation");
                return (state, Vec::new());
            }
            let (request_id, request) = state.begin_submission();
            vec![Effect::DispatchConvert {
                request_id,
                request,
            }]
        }
        Msg::SubmissionSettled {
            request_id,
            outcome,
        } => {
            state.settle_submission(request_id, &outcome);
            Vec::new()
        }
    };

    (state, effects)
}
