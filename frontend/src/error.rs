use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("No window object")]
    NoWindow,
    #[error("No document root element")]
    NoDocument,
    #[error("No localStorage")]
    StorageUnavailable,
    #[error("Failed to persist theme: {0}")]
    StorageWrite(String),
    #[error("DOM update failed: {0}")]
    Dom(String),
    #[error("Failed to dispatch `{event}`: {reason}")]
    Dispatch { event: String, reason: String },
    #[error("Invalid theme config: {0}")]
    Config(String),
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn describe_js(err: &wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_error_names_the_event() {
        let err = ThemeError::Dispatch {
            event: "themechange".into(),
            reason: "blocked".into(),
        };
        assert_eq!(err.to_string(), "Failed to dispatch `themechange`: blocked");
    }

    #[test]
    fn storage_errors_render_reason() {
        assert_eq!(
            ThemeError::StorageWrite("QuotaExceededError".into()).to_string(),
            "Failed to persist theme: QuotaExceededError"
        );
        assert_eq!(ThemeError::StorageUnavailable.to_string(), "No localStorage");
    }
}
