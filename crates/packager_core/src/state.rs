use packager_logging::{packager_debug, packager_info};

use crate::view_model::{AppViewModel, FieldView};
use crate::{
    classify, ConvertRequest, Field, FormState, FormVariant, RequestId, RequestOutcome,
    SubmissionState,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: FormState,
    submission: SubmissionState,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(variant: FormVariant) -> Self {
        Self {
            form: FormState::new(variant),
            ..Self::default()
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    /// Id of the outstanding request, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn view(&self) -> AppViewModel {
        let field_view = |field: Field| FieldView {
            value: self.form.value(field).to_string(),
            error: self.form.displayed_error(field).map(ToOwned::to_owned),
            touched: self.form.is_touched(field),
        };

        let (status, server_error) = match &self.submission {
            SubmissionState::Succeeded(message) => (Some(message.clone()), None),
            SubmissionState::Failed(reason) => (None, Some(reason.clone())),
            SubmissionState::Idle | SubmissionState::Submitting => (None, None),
        };

        AppViewModel {
            url: field_view(Field::Url),
            app_name: self
                .form
                .collects(Field::AppName)
                .then(|| field_view(Field::AppName)),
            submission: self.submission.clone(),
            submitting: self.submission.is_submitting(),
            status,
            server_error,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn change_field(&mut self, field: Field, value: String) {
        if self.form.set_field(field, value) {
            self.dirty = true;
        } else {
            packager_debug!("Ignoring change to uncollected field {}", field);
        }
    }

    pub(crate) fn blur_field(&mut self, field: Field) {
        if self.form.touch(field) {
            self.dirty = true;
        }
    }

    /// Full revalidation ahead of a submit; surfaces every failing field.
    pub(crate) fn validate_for_submit(&mut self) -> bool {
        let valid = self.form.validate_all();
        if !valid {
            self.dirty = true;
        }
        valid
    }

    /// Moves to `Submitting` and allocates the id for the single outstanding request.
    pub(crate) fn begin_submission(&mut self) -> (RequestId, ConvertRequest) {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(request_id);
        self.submission = SubmissionState::Submitting;
        self.dirty = true;
        (request_id, self.form.to_request())
    }

    /// Finalizes the outstanding request. Settlements for any other id are
    /// dropped, so a request can only leave `Submitting` once.
    pub(crate) fn settle_submission(&mut self, request_id: RequestId, outcome: &RequestOutcome) {
        if self.in_flight != Some(request_id) {
            packager_debug!(
                "Ignoring settlement for request {} (in flight: {:?})",
                request_id,
                self.in_flight
            );
            return;
        }
        self.in_flight = None;
        self.submission = classify(outcome);
        self.dirty = true;
        packager_info!(
            "Request {} settled: {:?}",
            request_id,
            self.submission
        );
    }
}
