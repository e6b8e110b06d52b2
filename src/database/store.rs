use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Address, Customer, NewAddress, NewCustomer};

/// Which table a missing row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Customer,
    Address,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Customer => write!(f, "customer"),
            Record::Address => write!(f, "address"),
        }
    }
}

/// Errors from the backing store
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The row was gone when the write ran
    #[error("Not found: {record} {id}")]
    NotFound { record: Record, id: i64 },

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Customer records keyed by id, with a secondary lookup by email
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>, DatabaseError>;

    async fn get_customer_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError>;

    /// Persist a new customer and return the assigned id
    async fn store_customer(&self, customer: NewCustomer) -> Result<i64, DatabaseError>;

    async fn update_customer(&self, customer: &Customer) -> Result<(), DatabaseError>;

    /// Remove the customer together with every address it owns, atomically.
    /// Returns how many addresses went with it.
    async fn delete_customer_cascade(&self, id: i64) -> Result<u64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Address records keyed by id, each owned by one customer
#[async_trait]
pub trait AddressStore: Send + Sync {
    async fn get_address_by_id(&self, id: i64) -> Result<Option<Address>, DatabaseError>;

    async fn get_addresses_by_customer_id(&self, customer_id: i64) -> Result<Vec<Address>, DatabaseError>;

    /// Persist a new address and return the assigned id
    async fn store_address(&self, address: NewAddress) -> Result<i64, DatabaseError>;

    async fn update_address(&self, address: &Address) -> Result<(), DatabaseError>;

    async fn delete_address(&self, id: i64) -> Result<(), DatabaseError>;
}
