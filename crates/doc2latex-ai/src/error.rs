use doc2latex_core::InputError;
use thiserror::Error;

/// Failure talking to the text-understanding service. Stages recover from
/// every variant locally; none of them reach the caller of a conversion.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("service returned no content")]
    EmptyResponse,
    #[error("text-understanding service is not configured")]
    Unavailable,
}

/// The only failure a conversion surfaces.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConvertError {
    #[error(transparent)]
    Input(#[from] InputError),
}
