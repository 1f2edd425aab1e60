use packager_core::{AppViewModel, FieldView};

/// Text lines for the current view, top to bottom.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(app_name) = &view.app_name {
        push_field(&mut lines, "App Name", app_name);
    }
    push_field(&mut lines, "URL", &view.url);

    lines.push(format!("[ {} ]", view.button_label()));

    if let Some(status) = &view.status {
        lines.push(format!("Status: {status}"));
    }
    if let Some(error) = &view.server_error {
        lines.push(format!("Error: {error}"));
    }

    lines
}

fn push_field(lines: &mut Vec<String>, label: &str, field: &FieldView) {
    let value = if field.value.is_empty() {
        "<empty>"
    } else {
        field.value.as_str()
    };
    lines.push(format!("{label}: {value}"));
    if let Some(error) = &field.error {
        lines.push(format!("  ! {error}"));
    }
}

#[cfg(test)]
mod tests {
    use packager_core::SubmissionState;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn renders_field_errors_and_server_error() {
        let view = AppViewModel {
            url: FieldView {
                value: "example.com".to_string(),
                error: Some("Please enter a valid URL (e.g., https://example.com)".to_string()),
                touched: true,
            },
            app_name: Some(FieldView::default()),
            submission: SubmissionState::Failed("invalid manifest".to_string()),
            server_error: Some("invalid manifest".to_string()),
            ..AppViewModel::default()
        };

        assert_eq!(
            render(&view),
            vec![
                "App Name: <empty>",
                "URL: example.com",
                "  ! Please enter a valid URL (e.g., https://example.com)",
                "[ Create Package ]",
                "Error: invalid manifest",
            ]
        );
    }

    #[test]
    fn renders_processing_label_while_submitting() {
        let view = AppViewModel {
            url: FieldView {
                value: "https://my-app.example".to_string(),
                error: None,
                touched: true,
            },
            submission: SubmissionState::Submitting,
            submitting: true,
            ..AppViewModel::default()
        };

        assert_eq!(
            render(&view),
            vec!["URL: https://my-app.example", "[ Processing... ]"]
        );
    }
}
