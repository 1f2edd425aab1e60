pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited a form field.
    FieldChanged {
        field: crate::Field,
        value: String,
    },
    /// Field lost focus.
    FieldBlurred(crate::Field),
    /// User clicked Create Package.
    SubmitClicked,
    /// The dispatched request resolved, one way or another.
    SubmissionSettled {
        request_id: RequestId,
        outcome: crate::RequestOutcome,
    },
}
