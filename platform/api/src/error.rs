use serde::Deserialize;
use thiserror::Error;

/// Shared result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{}", status_text(.status, .message))]
    Status { status: u16, message: Option<String> },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("base url cannot carry path segments")]
    BaseUrl,
}

fn status_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("backend returned {status}: {message}"),
        None => format!("backend returned {status}"),
    }
}

impl ApiError {
    /// The `message` field of the backend's error body, when it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Turns a finished response into `T`, mapping failures onto [`ApiError`].
///
/// An empty body decodes as JSON `null`, so `Option<T>` and defaulted types
/// survive endpoints that answer 200 with nothing.
pub(crate) fn decode_body<T>(status: u16, body: &[u8]) -> ApiResult<T>
where
    T: serde::de::DeserializeOwned,
{
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty());
        return Err(ApiError::Status { status, message });
    }
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|err| ApiError::Malformed(err.to_string()))
}
