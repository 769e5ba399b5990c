use thiserror::Error;

/// Shown when a transport failure carries no message of its own
const FALLBACK_MESSAGE: &str = "Could not calculate BMI";

/// Why a submit cycle ended without a rendered result
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Enter a valid weight in kilograms.")]
    InvalidWeight,

    #[error("Enter a valid height.")]
    InvalidHeight,

    /// Non-ok HTTP status from the BMI service
    #[error("{message}")]
    Service { status: u16, message: String },

    /// Request could not complete, or the success body was malformed
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl SubmitError {
    /// Validation failures are caught before any request is built
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidWeight | Self::InvalidHeight)
    }

    /// HTTP status, when the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text for the blocking alert popup
    pub fn alert_text(&self) -> String {
        if self.is_validation() {
            return self.to_string();
        }

        let message = self.to_string();
        if message.trim().is_empty() {
            format!("Error: {}", FALLBACK_MESSAGE)
        } else {
            format!("Error: {}", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_alerts_have_no_prefix() {
        assert_eq!(
            SubmitError::InvalidWeight.alert_text(),
            "Enter a valid weight in kilograms."
        );
        assert_eq!(SubmitError::InvalidHeight.alert_text(), "Enter a valid height.");
        assert!(SubmitError::InvalidHeight.is_validation());
    }

    #[test]
    fn test_service_alert_is_prefixed() {
        let err = SubmitError::Service {
            status: 400,
            message: "bad input".to_string(),
        };
        assert!(!err.is_validation());
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.alert_text(), "Error: bad input");
    }

    #[test]
    fn test_empty_service_message_falls_back() {
        let err = SubmitError::Service {
            status: 502,
            message: String::new(),
        };
        assert_eq!(err.alert_text(), "Error: Could not calculate BMI");
    }
}
