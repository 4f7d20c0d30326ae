//! Account service - registration, authentication and password handling
use crate::error::{ClinicError, Result};
use crate::store::ClinicStore;
use crate::types::{NewUser, RegisterPatient, Role, User};

/// bcrypt cost used when nothing else is configured
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).map_err(ClinicError::from)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash).map_err(ClinicError::from)
}

/// Registers patients and authenticates users against a `ClinicStore`
pub struct AccountService<S> {
    store: S,
    bcrypt_cost: u32,
}

impl<S: ClinicStore> AccountService<S> {
    pub fn new(store: S, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Check a username/password pair
    ///
    /// Unknown usernames and wrong passwords both yield `AuthFailure`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClinicError::validation("username and password are required"));
        }

        let Some(credentials) = self.store.find_credentials(username.trim()).await? else {
            tracing::warn!("Login failed: unknown user {}", username);
            return Err(ClinicError::AuthFailure);
        };

        match verify_password(password, &credentials.password_hash) {
            Ok(true) => Ok(credentials.user),
            Ok(false) => {
                tracing::warn!("Login failed: wrong password for {}", username);
                Err(ClinicError::AuthFailure)
            }
            Err(e) => {
                tracing::warn!("Login failed: unreadable hash for {}: {}", username, e);
                Err(ClinicError::AuthFailure)
            }
        }
    }

    /// Create a new patient account
    ///
    /// Every field is required. A taken username fails with
    /// `DuplicateUsername` before anything is written.
    pub async fn register(&self, form: RegisterPatient) -> Result<User> {
        let fields = [
            ("name", &form.name),
            ("last name", &form.last_name),
            ("email", &form.email),
            ("address", &form.address),
            ("username", &form.username),
            ("password", &form.password),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ClinicError::validation(format!("{} is required", field)));
        }

        let username = form.username.trim().to_string();
        if self.store.find_credentials(&username).await?.is_some() {
            return Err(ClinicError::DuplicateUsername(username));
        }

        let password_hash = hash_password(&form.password, self.bcrypt_cost)?;

        // The store's unique index still guards against a concurrent registration
        let user = self
            .store
            .create_user(NewUser {
                name: form.name.trim().to_string(),
                last_name: Some(form.last_name.trim().to_string()),
                email: Some(form.email.trim().to_string()),
                address: Some(form.address.trim().to_string()),
                username,
                password_hash,
                role: Role::Patient,
            })
            .await?;

        tracing::info!("Registered patient {} ({})", user.username, user.id);

        Ok(user)
    }
}
