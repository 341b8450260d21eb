//! Account Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Account;
use crate::utils::time;

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all accounts (admin user management)
    pub async fn find_all(&self) -> RepoResult<Vec<Account>> {
        let accounts: Vec<Account> = self
            .base
            .db()
            .query("SELECT * FROM account ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(accounts)
    }

    /// Find account by uid (the record key)
    pub async fn find_by_uid(&self, uid: &str) -> RepoResult<Option<Account>> {
        let thing = RecordId::from_table_key("account", uid);
        let account: Option<Account> = self.base.db().select(thing).await?;
        Ok(account)
    }

    /// Find account by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Create a new account with a hashed password
    pub async fn create(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> RepoResult<Account> {
        // Check duplicate email
        if self.find_by_email(email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let hash_pass = Account::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let uid = Uuid::new_v4().simple().to_string();
        let thing = RecordId::from_table_key("account", uid);

        let account = Account {
            id: Some(thing.clone()),
            email: email.to_string(),
            display_name: display_name.to_string(),
            hash_pass: hash_pass.clone(),
            created_at: time::now_millis(),
        };

        // hash_pass is skip_serializing on the model, so it is bound explicitly
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE $thing SET
                    email = $email,
                    display_name = $display_name,
                    hash_pass = $hash_pass,
                    created_at = $created_at"#,
            )
            .bind(("thing", thing))
            .bind(("email", account.email.clone()))
            .bind(("display_name", account.display_name.clone()))
            .bind(("hash_pass", hash_pass))
            .bind(("created_at", account.created_at))
            .await?;

        let _: Vec<serde_json::Value> = result.take(0)?;
        Ok(account)
    }
}
