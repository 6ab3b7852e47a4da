use anyhow::{bail, Context};
use serde_json::json;

use crate::auth::{hash_password, Role};
use crate::database::{self, models::NewUser, Store, StoreError};
use crate::validation::{validate_registration, Payload};

#[derive(Debug, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

/// Validate, hash and insert an admin account. An existing email is reported, not overwritten.
pub async fn provision_admin(
    store: &dyn Store,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> anyhow::Result<Provisioned> {
    let mut payload = Payload::new();
    payload.insert("email".to_string(), json!(email.trim()));
    payload.insert("password".to_string(), json!(password));
    validate_registration(&payload)?;

    let user = NewUser {
        email: email.trim().to_string(),
        password_hash: hash_password(password)?,
        role: Role::Admin,
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
    };

    match store.insert_user(user).await {
        Ok(user) => {
            tracing::info!("Created admin {} ({})", user.email, user.id);
            Ok(Provisioned::Created)
        }
        Err(StoreError::Duplicate(_)) => Ok(Provisioned::AlreadyExists),
        Err(e) => Err(e.into()),
    }
}

pub async fn create_admin(
    email: String,
    password: String,
    first_name: String,
    last_name: String,
) -> anyhow::Result<()> {
    let config = super::load_config()?;
    if config.database.is_memory() {
        bail!("create-admin needs a persistent DATABASE_URL; use BOOTSTRAP_ADMIN_EMAIL with serve instead");
    }

    let store = database::connect(&config.database)
        .await
        .context("failed to open the store")?;

    match provision_admin(store.as_ref(), &email, &password, &first_name, &last_name).await? {
        Provisioned::Created => {
            println!("Created admin {}", email.trim());
            Ok(())
        }
        Provisioned::AlreadyExists => bail!("an account for {} already exists", email.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::database::MemoryStore;

    #[tokio::test]
    async fn test_provision_creates_admin_once() {
        let store = MemoryStore::new();

        let first = provision_admin(&store, " chef@example.com ", "longenough", "Head", "Chef")
            .await
            .unwrap();
        assert_eq!(first, Provisioned::Created);

        let user = store.find_user_by_email("chef@example.com").await.unwrap().unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.display_name(), "Head Chef");
        assert!(verify_password("longenough", &user.password_hash).unwrap());

        let again = provision_admin(&store, "CHEF@example.com", "different-pass", "", "")
            .await
            .unwrap();
        assert_eq!(again, Provisioned::AlreadyExists);
    }

    #[tokio::test]
    async fn test_provision_validates_input() {
        let store = MemoryStore::new();
        assert!(provision_admin(&store, "chef@example.com", "short", "", "").await.is_err());
        assert!(provision_admin(&store, "not-an-email", "longenough", "", "").await.is_err());
        assert!(store.find_user_by_email("chef@example.com").await.unwrap().is_none());
    }
}
