#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one conversion request to the packaging service.
    DispatchConvert {
        request_id: crate::RequestId,
        request: ConvertRequest,
    },
}

/// Field values captured at the moment a submission starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    pub url: String,
    pub app_name: Option<String>,
}
