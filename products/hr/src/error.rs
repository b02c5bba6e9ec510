use platform_api::ApiError;
use platform_session::SessionError;
use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("No location data available for this employee")]
    NoLocation,
    #[error("leave request {0} not found")]
    LeaveNotFound(String),
    #[error("no employee matches `{0}`")]
    NoMatch(String),
    #[error("session has no email address")]
    MissingEmail,
}

impl HrError {
    /// Text to show next to the control that triggered the failure.
    ///
    /// The backend's own `message` wins, then the error itself.
    pub fn user_message(&self) -> String {
        if let HrError::Api(err) = self {
            if let Some(message) = err.backend_message() {
                return message.to_string();
            }
        }
        let message = self.to_string();
        if message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            message
        }
    }
}
