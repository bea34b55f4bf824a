use tracing::{debug, instrument};
use uuid::Uuid;

use rolegate_core::{AppError, FieldErrors, PasswordHasher};
use rolegate_db::UserStore;
use rolegate_models::{LoginRequest, User};

pub const FAILED_LOGIN: &str = "These credentials do not match our records.";

pub struct AuthService;

impl AuthService {
    /// Checks credentials. Unknown email and wrong password fail the same way.
    #[instrument(skip(store, hasher, dto), fields(email = %dto.email))]
    pub async fn attempt_login(
        store: &dyn UserStore,
        hasher: &dyn PasswordHasher,
        dto: LoginRequest,
    ) -> Result<User, AppError> {
        let Some(user) = store.find_by_email(&dto.email).await? else {
            debug!("Login for unknown email");
            return Err(failed_login());
        };

        if !hasher.verify(&dto.password, &user.password_hash)? {
            debug!(user_id = %user.id, "Login with wrong password");
            return Err(failed_login());
        }

        Ok(user)
    }

    #[instrument(skip(store))]
    pub async fn get_user(store: &dyn UserStore, id: Uuid) -> Result<User, AppError> {
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}

fn failed_login() -> AppError {
    AppError::validation(FieldErrors::single("email", FAILED_LOGIN))
}
