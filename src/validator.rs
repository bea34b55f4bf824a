//! Request body extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections.
//!
//! - [`JsonBody`] only deserializes; use it when validation depends on more
//!   than the body (configuration, the user store). It reads JSON, or an
//!   urlencoded form when the request says so.
//! - [`ValidatedJson`] deserializes and runs [`Validate`], turning failures into
//!   a 422 with field-keyed messages.
//!
//! Deserialization failures that name a field (missing, `null`, wrong type)
//! are reported as 422s keyed on that field, like any other validation error.

use anyhow::anyhow;
use axum::{
    Form, Json,
    extract::{
        FromRequest, Request,
        rejection::{FormRejection, JsonRejection},
    },
    http::{StatusCode, header},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use rolegate_core::{AppError, FieldErrors};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form_request(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().starts_with(FORM_CONTENT_TYPE))
}

/// Turns a deserializer message (`<path>: <reason>` or `missing field `x``)
/// into a field-keyed error, when it names a field.
fn field_error(detail: &str) -> Option<FieldErrors> {
    if let Some(rest) = detail.split("missing field `").nth(1) {
        let field = rest.split('`').next().filter(|f| !f.is_empty())?;
        return Some(FieldErrors::single(
            field,
            format!("The {field} field is required."),
        ));
    }

    let (field, reason) = detail.split_once(": ")?;
    if field.is_empty() || field == "." || field.contains(char::is_whitespace) {
        return None;
    }

    let message = if reason.starts_with("invalid type: null") {
        format!("The {field} field is required.")
    } else if reason.contains("expected a string") {
        format!("The {field} field must be a string.")
    } else {
        format!("The {field} field is invalid.")
    };
    Some(FieldErrors::single(field, message))
}

/// Strips axum's fixed rejection prefix, leaving the deserializer's message.
fn rejection_detail(body_text: &str) -> &str {
    body_text
        .split_once(": ")
        .map_or(body_text, |(_, detail)| detail)
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        )),
        JsonRejection::JsonDataError(err) => {
            match field_error(rejection_detail(&err.body_text())) {
                Some(fields) => AppError::validation(fields),
                None => AppError::bad_request(anyhow!("Invalid field type in request")),
            }
        }
        _ => AppError::bad_request(anyhow!("Invalid request body")),
    }
}

fn form_rejection_to_error(rejection: FormRejection) -> AppError {
    match rejection {
        FormRejection::FailedToDeserializeFormBody(err) => {
            match field_error(rejection_detail(&err.body_text())) {
                Some(fields) => AppError::validation(fields),
                None => AppError::bad_request(anyhow!("Invalid form body")),
            }
        }
        _ => AppError::bad_request(anyhow!("Invalid form body")),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form_request(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(form_rejection_to_error)?;
            return Ok(JsonBody(value));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_to_error)?;
        Ok(JsonBody(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|errors| AppError::validation(FieldErrors::from(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_required() {
        let fields = field_error("missing field `password` at line 1 column 20").unwrap();
        assert_eq!(
            fields.get("password"),
            Some(&["The password field is required.".to_string()][..])
        );
    }

    #[test]
    fn test_null_field_is_required() {
        let fields =
            field_error("name: invalid type: null, expected a string at line 1 column 12")
                .unwrap();
        assert_eq!(
            fields.get("name"),
            Some(&["The name field is required.".to_string()][..])
        );
    }

    #[test]
    fn test_wrong_type_names_the_field() {
        let fields = field_error(
            "admin_code: invalid type: integer `42`, expected a string at line 1 column 60",
        )
        .unwrap();
        assert_eq!(
            fields.get("admin_code"),
            Some(&["The admin_code field must be a string.".to_string()][..])
        );
    }

    #[test]
    fn test_message_without_field_is_not_keyed() {
        assert!(field_error("invalid type: sequence, expected struct LoginRequest").is_none());
        assert!(field_error("expected value at line 1 column 1").is_none());
    }

    #[test]
    fn test_rejection_prefix_is_stripped() {
        assert_eq!(
            rejection_detail(
                "Failed to deserialize the JSON body into the target type: name: invalid type"
            ),
            "name: invalid type"
        );
    }
}
