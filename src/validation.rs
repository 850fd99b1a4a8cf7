//! Request validation.
//!
//! [`ValidatedJson`] deserializes a JSON body and runs `validator` rules on
//! it before the handler sees the value.

use crate::error::AppError;
use axum::{Json, extract::Request};
use serde::Deserialize;
use validator::Validate;

/// Wrapper for validated JSON data
///
/// # Example
///
/// ```rust,no_run
/// use claimdeck::validation::ValidatedJson;
/// use validator::Validate;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateClientRequest {
///     #[validate(length(min = 1, max = 100))]
///     first_name: String,
/// }
///
/// async fn create_client(
///     ValidatedJson(req): ValidatedJson<CreateClientRequest>
/// ) -> claimdeck::Result<axum::Json<serde_json::Value>> {
///     // req is guaranteed to be valid
///     Ok(axum::Json(serde_json::json!({"status": "ok"})))
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> axum::extract::FromRequest<S> for ValidatedJson<T>
where
    T: for<'de> Deserialize<'de> + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let json: Json<T> = Json::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(format!("Invalid JSON: {}", e)))?;

        json.0.validate().map_err(|errors| {
            let error_messages: Vec<String> = errors
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        let msg = error
                            .message
                            .as_ref()
                            .map(|m| m.as_ref())
                            .unwrap_or_else(|| error.code.as_ref());
                        format!("{}: {}", field, msg)
                    })
                })
                .collect();

            AppError::bad_request(format!("Validation failed: {}", error_messages.join(", ")))
        })?;

        Ok(ValidatedJson(json.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 0))]
        count: i32,
    }

    fn validate_value(value: serde_json::Value) -> std::result::Result<TestPayload, AppError> {
        let payload: TestPayload = serde_json::from_value(value)?;
        payload.validate()?;
        Ok(payload)
    }

    #[test]
    fn test_valid_payload_passes() {
        let payload = validate_value(serde_json::json!({"name": "roof", "count": 2})).unwrap();
        assert_eq!(payload.name, "roof");
    }

    #[test]
    fn test_invalid_payload_rejected() {
        let err = validate_value(serde_json::json!({"name": "", "count": -1})).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
