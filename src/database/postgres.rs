use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::database::models::{Address, Customer, NewAddress, NewCustomer};
use crate::database::store::{AddressStore, CustomerStore, DatabaseError, Record};

const CREATE_CUSTOMERS: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id           BIGSERIAL PRIMARY KEY,
        first_name   TEXT NOT NULL,
        last_name    TEXT NOT NULL,
        phone_number TEXT NOT NULL,
        email        TEXT NOT NULL,
        password     TEXT NOT NULL
    )
"#;

const CREATE_ADDRESSES: &str = r#"
    CREATE TABLE IF NOT EXISTS addresses (
        id            BIGSERIAL PRIMARY KEY,
        customer_id   BIGINT NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
        address_line1 TEXT NOT NULL,
        address_line2 TEXT NOT NULL DEFAULT '',
        city          TEXT NOT NULL,
        country       TEXT NOT NULL
    )
"#;

const CREATE_ADDRESSES_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS addresses_customer_id_idx ON addresses (customer_id)";

/// PostgreSQL-backed customer and address store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connection_timeout_secs: u64,
    ) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(connection_timeout_secs))
            .connect(database_url)
            .await?;

        info!("Created database pool (max {} connections)", max_connections);
        Ok(Self::new(pool))
    }

    /// Create the tables if they do not exist yet
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        for statement in [CREATE_CUSTOMERS, CREATE_ADDRESSES, CREATE_ADDRESSES_OWNER_INDEX] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

#[async_trait]
impl CustomerStore for PgStore {
    async fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>, DatabaseError> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, first_name, last_name, phone_number, email, password
             FROM customers
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn get_customer_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, first_name, last_name, phone_number, email, password
             FROM customers
             WHERE email = $1
             LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn store_customer(&self, customer: NewCustomer) -> Result<i64, DatabaseError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO customers (first_name, last_name, phone_number, email, password)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.phone_number)
        .bind(&customer.email)
        .bind(&customer.password)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE customers
             SET first_name = $2, last_name = $3, phone_number = $4, email = $5, password = $6
             WHERE id = $1",
        )
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.phone_number)
        .bind(&customer.email)
        .bind(&customer.password)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound { record: Record::Customer, id: customer.id });
        }
        Ok(())
    }

    async fn delete_customer_cascade(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let addresses = sqlx::query("DELETE FROM addresses WHERE customer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DatabaseError::NotFound { record: Record::Customer, id });
        }

        tx.commit().await?;
        Ok(addresses)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl AddressStore for PgStore {
    async fn get_address_by_id(&self, id: i64) -> Result<Option<Address>, DatabaseError> {
        let address = sqlx::query_as::<_, Address>(
            "SELECT id, customer_id, address_line1, address_line2, city, country
             FROM addresses
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    async fn get_addresses_by_customer_id(&self, customer_id: i64) -> Result<Vec<Address>, DatabaseError> {
        let addresses = sqlx::query_as::<_, Address>(
            "SELECT id, customer_id, address_line1, address_line2, city, country
             FROM addresses
             WHERE customer_id = $1
             ORDER BY id",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses)
    }

    async fn store_address(&self, address: NewAddress) -> Result<i64, DatabaseError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO addresses (customer_id, address_line1, address_line2, city, country)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(address.customer_id)
        .bind(&address.address_line1)
        .bind(&address.address_line2)
        .bind(&address.city)
        .bind(&address.country)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_address(&self, address: &Address) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE addresses
             SET customer_id = $2, address_line1 = $3, address_line2 = $4, city = $5, country = $6
             WHERE id = $1",
        )
        .bind(address.id)
        .bind(address.customer_id)
        .bind(&address.address_line1)
        .bind(&address.address_line2)
        .bind(&address.city)
        .bind(&address.country)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound { record: Record::Address, id: address.id });
        }
        Ok(())
    }

    async fn delete_address(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound { record: Record::Address, id });
        }
        Ok(())
    }
}
