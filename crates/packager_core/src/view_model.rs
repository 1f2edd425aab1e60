use crate::SubmissionState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldView {
    pub value: String,
    /// Present only when the field is touched and invalid.
    pub error: Option<String>,
    pub touched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url: FieldView,
    pub app_name: Option<FieldView>,
    pub submission: SubmissionState,
    pub submitting: bool,
    pub status: Option<String>,
    pub server_error: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn button_label(&self) -> &'static str {
        if self.submitting {
            "Processing..."
        } else {
            "Create Package"
        }
    }
}
