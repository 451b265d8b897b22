use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error category
    pub name: String,
    /// Code-style message identifier (i18n key)
    pub message: String,
    /// Human-readable text suitable for a toast
    #[oai(skip_serializing_if_is_none)]
    pub detail: Option<String>,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
