//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Principal,
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{CustomerRecord, UserRecord},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn sync_user(&self, principal: &Principal) -> Result<UserRecord, UsersServiceError> {
        let user = NewUser::from_principal(principal).ok_or(UsersServiceError::IncompleteIdentity)?;

        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.upsert_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let customers = self.repository.list_customers(&mut tx).await?;

        tx.commit().await?;

        Ok(customers)
    }

    async fn delete_customer(&self, user_id: &str) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders_deleted = self.repository.delete_user_orders(&mut tx, user_id).await?;
        let users_deleted = self.repository.delete_user(&mut tx, user_id).await?;

        if orders_deleted == 0 && users_deleted == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        tracing::info!(user_id, orders_deleted, "deleted customer");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Insert or refresh the registry entry for `principal`.
    async fn sync_user(&self, principal: &Principal) -> Result<UserRecord, UsersServiceError>;

    /// Everyone who has placed at least one order, newest customer first.
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, UsersServiceError>;

    /// Delete a customer's orders, their items and the registry entry.
    async fn delete_customer(&self, user_id: &str) -> Result<(), UsersServiceError>;
}
