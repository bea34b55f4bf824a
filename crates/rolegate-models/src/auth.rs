//! Authentication request bodies.
//!
//! [`RegisterRequestDto`] carries only the rules that depend on the input
//! alone. Rules that depend on configuration or the store (password policy,
//! terms, email uniqueness, admin code) are applied by the registration
//! processor on top of these.

use rolegate_core::serde::{
    deserialize_optional_nonempty, deserialize_optional_trimmed, deserialize_trimmed,
};
use serde::Deserialize;
use serde::de::IgnoredAny;
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::users::Role;

pub const MAX_STRING_LENGTH: usize = 255;

/// Registration form submitted by a prospective user.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Ann")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(custom(function = "validate_email_field"))]
    #[schema(example = "ann@x.com")]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "The password field is required."))]
    #[schema(example = "Str0ng!pw")]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_optional_nonempty")]
    pub password_confirmation: Option<String>,

    /// Terms & privacy acceptance; only enforced when the deployment requires it.
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub terms: Option<TermsAcceptance>,

    /// `user` (default) or `admin`.
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(custom(function = "validate_role"))]
    #[schema(example = "user")]
    pub role: Option<String>,

    /// Required when `role` is `admin`.
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub admin_code: Option<String>,
}

impl RegisterRequestDto {
    /// The requested role. Only meaningful after [`Validate::validate`] passed.
    pub fn requested_role(&self) -> Role {
        self.role
            .as_deref()
            .and_then(|role| role.parse().ok())
            .unwrap_or_default()
    }
}

/// Checkbox-style acceptance: HTML forms post `on`/`1`, JSON clients post `true`.
/// Any other value deserializes and is simply not accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TermsAcceptance {
    Bool(bool),
    Number(i64),
    Text(String),
    Other(IgnoredAny),
}

impl TermsAcceptance {
    pub fn is_accepted(&self) -> bool {
        match self {
            TermsAcceptance::Bool(accepted) => *accepted,
            TermsAcceptance::Number(n) => *n == 1,
            TermsAcceptance::Text(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "1" | "yes" | "on" | "true"
            ),
            TermsAcceptance::Other(_) => false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "The email field must be a valid email address."))]
    #[schema(example = "ann@x.com")]
    pub email: String,
    #[validate(length(min = 1, message = "The password field is required."))]
    #[schema(example = "Str0ng!pw")]
    pub password: String,
}

fn error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(error("required", "The name field is required.".to_string()));
    }
    if name.chars().count() > MAX_STRING_LENGTH {
        return Err(error(
            "max",
            format!("The name field must not be greater than {MAX_STRING_LENGTH} characters."),
        ));
    }
    Ok(())
}

fn validate_email_field(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(error("required", "The email field is required.".to_string()));
    }
    if email.chars().count() > MAX_STRING_LENGTH {
        return Err(error(
            "max",
            format!("The email field must not be greater than {MAX_STRING_LENGTH} characters."),
        ));
    }
    if !email.validate_email() {
        return Err(error(
            "email",
            "The email field must be a valid email address.".to_string(),
        ));
    }
    Ok(())
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>()
        .map(|_| ())
        .map_err(|_| error("in", "The selected role is invalid.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RegisterRequestDto {
        RegisterRequestDto {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "Str0ng!pw".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_reported_per_field() {
        let dto: RegisterRequestDto = serde_json::from_str("{}").unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_name_length_limit() {
        let mut dto = valid();
        dto.name = "a".repeat(255);
        assert!(dto.validate().is_ok());
        dto.name = "a".repeat(256);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_email_syntax_and_length() {
        let mut dto = valid();
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());

        dto.email = format!("{}@x.com", "a".repeat(250));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_role_must_be_user_or_admin() {
        let mut dto = valid();
        dto.role = Some("admin".to_string());
        assert!(dto.validate().is_ok());
        dto.role = Some("root".to_string());
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn test_requested_role_defaults_to_user() {
        assert_eq!(valid().requested_role(), Role::User);
        let mut dto = valid();
        dto.role = Some("admin".to_string());
        assert_eq!(dto.requested_role(), Role::Admin);
    }

    #[test]
    fn test_deserialize_normalises_input() {
        let dto: RegisterRequestDto = serde_json::from_str(
            r#"{"name":" Ann ","email":" ann@x.com ","password":" pw ","role":"","admin_code":"  "}"#,
        )
        .unwrap();
        assert_eq!(dto.name, "Ann");
        assert_eq!(dto.email, "ann@x.com");
        assert_eq!(dto.password, " pw ");
        assert_eq!(dto.role, None);
        assert_eq!(dto.admin_code, None);
    }

    #[test]
    fn test_terms_acceptance_values() {
        let accepted: Vec<TermsAcceptance> =
            serde_json::from_str(r#"[true, 1, "1", "yes", "on", "true"]"#).unwrap();
        assert!(accepted.iter().all(TermsAcceptance::is_accepted));

        let rejected: Vec<TermsAcceptance> =
            serde_json::from_str(r#"[false, 0, "0", "no", "off", "", 1.0, [1], {"a": 1}]"#)
                .unwrap();
        assert!(rejected.iter().all(|t| !t.is_accepted()));
    }

    #[test]
    fn test_null_name_is_reported_as_required() {
        let dto: RegisterRequestDto = serde_json::from_str(
            r#"{"name":null,"email":"ann@x.com","password":"Str0ng!pw"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_login_request_validation() {
        let login = LoginRequest {
            email: "ann@x.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(login.validate().is_ok());

        let bad = LoginRequest {
            email: "ann".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }
}
