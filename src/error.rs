use thiserror::Error;

/// Non-fatal failures of the tooltip controller.
///
/// None of these ever reach the end user: the controller reports them to the
/// developer console and falls back to showing no tooltip.
#[derive(Debug, Error)]
pub enum TooltipError {
    #[error("booking container `{selector}` not found, tooltips disabled")]
    MissingContainer { selector: String },

    #[error("malformed booking payload: {source}")]
    MalformedPayload {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid tooltip config: {0}")]
    InvalidConfig(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl TooltipError {
    /// Wrap a `JsValue` error thrown by a DOM call
    #[must_use]
    pub fn dom(context: &str, err: &wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{context}: {err:?}"))
    }

    /// Whether this is a per-item problem rather than a broken page
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        !matches!(self, Self::Dom(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_payload_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: TooltipError = serde_err.into();
        assert!(matches!(err, TooltipError::MalformedPayload { .. }));
        assert!(err.to_string().starts_with("malformed booking payload"));
        assert!(err.is_warning());
    }

    #[test]
    fn test_missing_container_message() {
        let err = TooltipError::MissingContainer { selector: "#bookings".to_string() };
        assert_eq!(err.to_string(), "booking container `#bookings` not found, tooltips disabled");
    }

    #[test]
    fn test_dom_error_is_not_warning() {
        assert!(!TooltipError::Dom("append failed".to_string()).is_warning());
    }
}
