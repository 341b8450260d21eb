//! Account Model
//!
//! Local credential store standing in for the hosted identity provider.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Account ID type
pub type AccountId = RecordId;

/// Credential account. The record key is the uid referenced by the
/// role map and by registration requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<AccountId>,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub created_at: i64,
}

impl Account {
    /// Account uid (the record key)
    pub fn uid(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.key().to_string())
            .unwrap_or_default()
    }

    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// Account info safe to return to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

impl From<Account> for AccountInfo {
    fn from(account: Account) -> Self {
        let uid = account.uid();
        Self {
            uid,
            email: account.email,
            display_name: account.display_name,
        }
    }
}

/// Self-registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 200, message = "el nombre es requerido"))]
    pub name: String,
    #[validate(email(message = "correo electrónico inválido"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "la contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[validate(length(min = 2, max = 200, message = "la empresa es requerida"))]
    pub company: String,
    #[validate(length(min = 5, max = 100, message = "el RUC/CI es requerido"))]
    pub ruc: String,
    #[validate(length(min = 5, max = 100, message = "el teléfono es requerido"))]
    pub phone: String,
}

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: bearer token plus the resolved identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Authenticated identity as seen by the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub role: super::role_map::Role,
}
