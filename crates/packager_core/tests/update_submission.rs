use std::sync::Once;

use packager_core::{
    update, AppState, ConvertRequest, Effect, Field, FormVariant, Msg, RequestId, RequestOutcome,
    SubmissionState, CONNECTIVITY_MESSAGE, SERVER_ERROR_FALLBACK,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(packager_logging::initialize_for_tests);
}

fn fill(state: AppState, url: &str, app_name: &str) -> AppState {
    let (state, _) = update(
        state,
        Msg::FieldChanged {
            field: Field::Url,
            value: url.to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::FieldChanged {
            field: Field::AppName,
            value: app_name.to_string(),
        },
    );
    state
}

fn submit(state: AppState) -> (AppState, RequestId) {
    let (state, effects) = update(state, Msg::SubmitClicked);
    match effects.as_slice() {
        [Effect::DispatchConvert { request_id, .. }] => (state, *request_id),
        other => panic!("expected one dispatch, got {other:?}"),
    }
}

fn settle(state: AppState, request_id: RequestId, status: u16, body: &str) -> AppState {
    let (state, effects) = update(
        state,
        Msg::SubmissionSettled {
            request_id,
            outcome: RequestOutcome::Responded {
                status,
                body: body.to_string(),
            },
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn submit_with_empty_url_never_dispatches() {
    init_logging();
    let state = fill(AppState::new(), "", "Demo");

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state.submission(), &SubmissionState::Idle);
    assert_eq!(state.in_flight(), None);
    assert_eq!(state.view().url.error.as_deref(), Some("URL is required"));
}

#[test]
fn submit_validates_fields_that_were_never_touched() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state.submission(), &SubmissionState::Idle);
    let view = state.view();
    assert_eq!(view.url.error.as_deref(), Some("URL is required"));
    assert_eq!(
        view.app_name.unwrap().error.as_deref(),
        Some("App Name is required")
    );
}

#[test]
fn failed_validation_keeps_previous_outcome() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, request_id) = submit(state);
    let state = settle(state, request_id, 400, r#"{"message":"invalid manifest"}"#);

    let state = fill(state, "nope", "Demo");
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.submission(),
        &SubmissionState::Failed("invalid manifest".to_string())
    );
}

#[test]
fn valid_submit_dispatches_current_values() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");

    let (mut state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::DispatchConvert {
            request_id: 1,
            request: ConvertRequest {
                url: "https://my-app.example".to_string(),
                app_name: Some("Demo".to_string()),
            },
        }]
    );
    assert_eq!(state.submission(), &SubmissionState::Submitting);
    assert!(state.consume_dirty());
    let view = state.view();
    assert!(view.submitting);
    assert_eq!(view.button_label(), "Processing...");
}

#[test]
fn url_only_variant_dispatches_without_app_name() {
    init_logging();
    let (state, _) = update(
        AppState::with_variant(FormVariant::UrlOnly),
        Msg::FieldChanged {
            field: Field::Url,
            value: "https://my-app.example".to_string(),
        },
    );

    let (_state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::DispatchConvert {
            request_id: 1,
            request: ConvertRequest {
                url: "https://my-app.example".to_string(),
                app_name: None,
            },
        }]
    );
}

#[test]
fn second_submit_while_submitting_is_rejected() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, request_id) = submit(state);

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state.in_flight(), Some(request_id));
    assert_eq!(state.submission(), &SubmissionState::Submitting);
}

#[test]
fn success_response_reports_export_started() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, request_id) = submit(state);

    let state = settle(state, request_id, 200, r#"{"message":"job-123 queued"}"#);

    assert_eq!(
        state.submission(),
        &SubmissionState::Succeeded("Export started: job-123 queued".to_string())
    );
    let view = state.view();
    assert!(!view.submitting);
    assert_eq!(view.status.as_deref(), Some("Export started: job-123 queued"));
    assert_eq!(view.server_error, None);
}

#[test]
fn rejected_request_reports_server_message_and_keeps_values() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, request_id) = submit(state);

    let state = settle(state, request_id, 400, r#"{"message":"invalid manifest"}"#);

    assert_eq!(
        state.submission(),
        &SubmissionState::Failed("invalid manifest".to_string())
    );
    let view = state.view();
    assert_eq!(view.server_error.as_deref(), Some("invalid manifest"));
    assert_eq!(view.url.value, "https://my-app.example");
    assert_eq!(view.app_name.unwrap().value, "Demo");
}

#[test]
fn empty_error_body_uses_generic_fallback() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, request_id) = submit(state);

    let state = settle(state, request_id, 500, "");

    assert_eq!(
        state.submission(),
        &SubmissionState::Failed(SERVER_ERROR_FALLBACK.to_string())
    );
}

#[test]
fn unreachable_service_reports_connectivity_message() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, request_id) = submit(state);

    let (state, _) = update(
        state,
        Msg::SubmissionSettled {
            request_id,
            outcome: RequestOutcome::Unreachable {
                reason: "connection refused".to_string(),
            },
        },
    );

    assert_eq!(
        state.submission(),
        &SubmissionState::Failed(CONNECTIVITY_MESSAGE.to_string())
    );
    assert_ne!(
        state.submission(),
        &SubmissionState::Failed(SERVER_ERROR_FALLBACK.to_string())
    );
}

#[test]
fn settlement_is_applied_exactly_once() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, request_id) = submit(state);
    let state = settle(state, request_id, 200, r#"{"message":"job-1 queued"}"#);

    // A duplicate settlement for the same request must not overwrite the outcome.
    let mut state = settle(state, request_id, 500, "");

    assert_eq!(
        state.submission(),
        &SubmissionState::Succeeded("Export started: job-1 queued".to_string())
    );
    assert_eq!(state.in_flight(), None);
    assert!(state.consume_dirty());
}

#[test]
fn stale_settlement_is_ignored() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, request_id) = submit(state);

    let mut state = settle(state, request_id + 41, 200, r#"{"message":"other"}"#);

    assert_eq!(state.submission(), &SubmissionState::Submitting);
    assert_eq!(state.in_flight(), Some(request_id));
    assert!(state.consume_dirty());
    let state = settle(state, request_id, 200, r#"{"message":"mine"}"#);
    assert_eq!(
        state.submission(),
        &SubmissionState::Succeeded("Export started: mine".to_string())
    );
}

#[test]
fn resubmission_after_settling_goes_through_submitting_again() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, first) = submit(state);
    let state = settle(state, first, 500, "");
    assert!(matches!(state.submission(), SubmissionState::Failed(_)));

    let (state, second) = submit(state);
    assert_ne!(first, second);
    assert_eq!(state.submission(), &SubmissionState::Submitting);
    let view = state.view();
    assert_eq!(view.status, None);
    assert_eq!(view.server_error, None);

    let state = settle(state, second, 200, r#"{"message":"job-2 queued"}"#);
    let (state, third) = submit(state);
    assert_eq!(state.submission(), &SubmissionState::Submitting);
    assert!(third > second);
}

#[test]
fn field_edits_are_accepted_while_submitting() {
    init_logging();
    let state = fill(AppState::new(), "https://my-app.example", "Demo");
    let (state, request_id) = submit(state);

    let (state, effects) = update(
        state,
        Msg::FieldChanged {
            field: Field::AppName,
            value: "Renamed".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.submission(), &SubmissionState::Submitting);
    assert_eq!(state.form().value(Field::AppName), "Renamed");
    assert_eq!(state.in_flight(), Some(request_id));
}
