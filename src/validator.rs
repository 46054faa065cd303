//! Request-body extraction for the three JSON DTOs this API accepts
//! (signup, login, place-course/update-status). Deserialization failures
//! come back as 400 with a pointed message, `validator::Validate` failures
//! as 422 listing every violated constraint.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use rollbook_core::AppError;

/// Pulls the offending field name out of serde's "missing field `x`"
/// rejection text. serde does not expose this structurally.
fn missing_field(body_text: &str) -> Option<&str> {
    body_text
        .split("missing field `")
        .nth(1)?
        .split('`')
        .next()
}

fn shape_rejection(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow::anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let body_text = rejection.body_text();
    if let Some(field) = missing_field(&body_text) {
        return AppError::bad_request(anyhow::anyhow!("{} is required", field));
    }
    if body_text.contains("invalid type") {
        return AppError::bad_request(anyhow::anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow::anyhow!("Invalid request body"))
}

fn constraint_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(msg) => messages.push(msg.to_string()),
                None => messages.push(format!("{} is invalid", field)),
            }
        }
    }
    messages.join(", ")
}

/// JSON extractor that shapes deserialization rejections into the API's
/// error body and runs `validator::Validate` on the parsed value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(shape_rejection)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow::anyhow!(
                "{}",
                constraint_messages(&errors)
            )))?;

        Ok(ValidatedJson(value))
    }
}
