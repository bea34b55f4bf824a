//! Self-service registration.
//!
//! [`RegistrationProcessor::create`] runs every rule before touching the store:
//!
//! 1. field rules from [`RegisterRequestDto`] plus the configured password
//!    policy, the optional confirmation match, the terms flag, and email
//!    uniqueness, aggregated per field;
//! 2. for `role = admin` only, the admin enrollment check;
//! 3. one insert, with the password stored as its bcrypt hash.
//!
//! A missing admin code and a wrong one fail identically.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use rolegate_config::AuthConfig;
use rolegate_core::{AppError, FieldErrors, PasswordHasher};
use rolegate_db::{StoreError, UserStore};
use rolegate_models::{NewUser, RegisterRequestDto, Role, TermsAcceptance, User};

pub const EMAIL_TAKEN: &str = "The email has already been taken.";
pub const INVALID_ADMIN_CODE: &str = "The admin code is invalid.";
pub const PASSWORD_MISMATCH: &str = "The password field confirmation does not match.";
pub const TERMS_NOT_ACCEPTED: &str = "The terms field must be accepted.";

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("The given data was invalid.")]
    Validation(FieldErrors),
    #[error("{}", EMAIL_TAKEN)]
    DuplicateEmail,
    #[error("{}", INVALID_ADMIN_CODE)]
    InvalidAdminCode,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RegistrationError {
    /// Field-keyed view for rendering next to form inputs. `None` for internal failures.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            RegistrationError::Validation(fields) => Some(fields.clone()),
            RegistrationError::DuplicateEmail => Some(FieldErrors::single("email", EMAIL_TAKEN)),
            RegistrationError::InvalidAdminCode => {
                Some(FieldErrors::single("admin_code", INVALID_ADMIN_CODE))
            }
            RegistrationError::Internal(_) => None,
        }
    }

    /// Short label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            RegistrationError::Validation(_) => "validation",
            RegistrationError::DuplicateEmail => "duplicate_email",
            RegistrationError::InvalidAdminCode => "invalid_admin_code",
            RegistrationError::Internal(_) => "internal",
        }
    }
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err.field_errors() {
            Some(fields) => AppError::validation(fields),
            None => match err {
                RegistrationError::Internal(e) => AppError::internal(e),
                other => AppError::internal(anyhow::anyhow!(other.to_string())),
            },
        }
    }
}

/// Authorises self-registration into the admin role.
pub trait AdminEnrollment: Send + Sync {
    fn authorize(&self, admin_code: Option<&str>) -> bool;
}

/// One code shared by every admin signup, compared case-sensitively.
#[derive(Debug, Clone)]
pub struct SharedCodeEnrollment {
    code: String,
}

impl SharedCodeEnrollment {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl AdminEnrollment for SharedCodeEnrollment {
    fn authorize(&self, admin_code: Option<&str>) -> bool {
        admin_code.is_some_and(|code| code == self.code)
    }
}

#[derive(Clone)]
pub struct RegistrationProcessor {
    config: Arc<AuthConfig>,
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    enrollment: Arc<dyn AdminEnrollment>,
}

impl RegistrationProcessor {
    pub fn new(
        config: Arc<AuthConfig>,
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        let enrollment = Arc::new(SharedCodeEnrollment::new(
            config.admin_registration_code.clone(),
        ));

        Self {
            config,
            store,
            hasher,
            enrollment,
        }
    }

    pub fn with_admin_enrollment(mut self, enrollment: Arc<dyn AdminEnrollment>) -> Self {
        self.enrollment = enrollment;
        self
    }

    #[instrument(skip(self, input), fields(email = %input.email, role = ?input.role))]
    pub async fn create(&self, input: RegisterRequestDto) -> Result<User, RegistrationError> {
        let role = self.validate(&input).await?;

        if role.is_admin() && !self.enrollment.authorize(input.admin_code.as_deref()) {
            warn!("Rejected admin registration");
            return Err(RegistrationError::InvalidAdminCode);
        }

        let password_hash = self.hasher.hash(&input.password)?;

        let user = self
            .store
            .insert(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                StoreError::DuplicateEmail => RegistrationError::DuplicateEmail,
                other => RegistrationError::Internal(other.into()),
            })?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Runs every field rule and returns the role to create.
    async fn validate(&self, input: &RegisterRequestDto) -> Result<Role, RegistrationError> {
        let mut errors = input
            .validate()
            .err()
            .map(FieldErrors::from)
            .unwrap_or_default();

        if !input.password.is_empty() {
            for problem in self.config.password_policy.check(&input.password) {
                errors.add("password", problem);
            }
            if let Some(confirmation) = &input.password_confirmation {
                if confirmation != &input.password {
                    errors.add("password", PASSWORD_MISMATCH);
                }
            }
        }

        if self.config.terms_required
            && !input.terms.as_ref().is_some_and(TermsAcceptance::is_accepted)
        {
            errors.add("terms", TERMS_NOT_ACCEPTED);
        }

        if !errors.contains("email") {
            let taken = self
                .store
                .exists_by_email(&input.email)
                .await
                .map_err(anyhow::Error::from)?;

            if taken {
                if errors.is_empty() {
                    return Err(RegistrationError::DuplicateEmail);
                }
                errors.add("email", EMAIL_TAKEN);
            }
        }

        if !errors.is_empty() {
            return Err(RegistrationError::Validation(errors));
        }

        Ok(input.requested_role())
    }
}
