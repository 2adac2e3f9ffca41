use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use hypertext::Rendered;

pub fn see_other_ok(r: Redirect) -> StandardResponse {
    Ok(SuccessResponse::SeeOther(r))
}

pub fn err_not_found(html: Rendered<String>) -> StandardResponse {
    Err(FailureResponse::NotFound(html))
}

pub fn bad_request(html: Rendered<String>) -> StandardResponse {
    Err(FailureResponse::BadRequest(html))
}

pub fn success(html: Rendered<String>) -> StandardResponse {
    Ok(SuccessResponse::Success(html))
}

/// Picks the failure variant matching `status`. Anything which is not a
/// client error is reported as a server error.
pub fn failure(status: StatusCode, html: Rendered<String>) -> StandardResponse {
    Err(match status {
        StatusCode::BAD_REQUEST => FailureResponse::BadRequest(html),
        StatusCode::NOT_FOUND => FailureResponse::NotFound(html),
        StatusCode::CONFLICT => FailureResponse::Conflict(html),
        _ => FailureResponse::ServerError(html),
    })
}

pub type StandardResponse = Result<SuccessResponse, FailureResponse>;

pub enum SuccessResponse {
    Success(Rendered<String>),
    SeeOther(Redirect),
}

pub enum FailureResponse {
    BadRequest(Rendered<String>),
    NotFound(Rendered<String>),
    Conflict(Rendered<String>),
    ServerError(Rendered<String>),
}

impl IntoResponse for SuccessResponse {
    fn into_response(self) -> Response {
        match self {
            SuccessResponse::Success(html) => {
                Html(html.into_inner()).into_response()
            }
            SuccessResponse::SeeOther(redirect) => redirect.into_response(),
        }
    }
}

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        let (status, html) = match self {
            FailureResponse::BadRequest(html) => (StatusCode::BAD_REQUEST, html),
            FailureResponse::NotFound(html) => (StatusCode::NOT_FOUND, html),
            FailureResponse::Conflict(html) => (StatusCode::CONFLICT, html),
            FailureResponse::ServerError(html) => {
                (StatusCode::INTERNAL_SERVER_ERROR, html)
            }
        };
        (status, Html(html.into_inner())).into_response()
    }
}
