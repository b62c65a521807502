//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::debug;

use crate::domain::{Customer, CustomerId, CustomerRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::customer;

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Name of the unique index guarding `customers.email`
const EMAIL_INDEX: &str = "idx_customers_email";

/// SQLite reports `customers.email`, Postgres reports the index name.
fn is_email_violation(message: &str) -> bool {
    message.contains(EMAIL_INDEX) || message.contains("customers.email")
}

/// A violation of the email index means the email is already taken; any
/// other constraint failure (e.g. a primary key collision) is a storage
/// error.
fn save_err(e: DbErr, email: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) if is_email_violation(&message) => {
            DomainError::email_unavailable(email)
        }
        _ => db_err(e),
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        let models = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: CustomerId) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find()
            .filter(customer::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(Customer::from))
    }

    async fn exists_by_id(&self, id: CustomerId) -> DomainResult<bool> {
        let count = customer::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(count > 0)
    }

    async fn save(&self, c: Customer) -> DomainResult<Customer> {
        let email = c.email.clone();

        let existing = match c.id {
            Some(id) => self.exists_by_id(id).await?,
            None => false,
        };

        let active = customer::ActiveModel {
            id: c.id.map_or(NotSet, Set),
            name: Set(c.name),
            email: Set(c.email),
            address: Set(c.address),
        };

        let model = if existing {
            active.update(&self.db).await
        } else {
            active.insert(&self.db).await
        }
        .map_err(|e| save_err(e, &email))?;

        debug!(customer_id = model.id, updated = existing, "Customer row saved");
        Ok(Customer::from(model))
    }

    async fn delete_by_id(&self, id: CustomerId) -> DomainResult<()> {
        customer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        customer::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
