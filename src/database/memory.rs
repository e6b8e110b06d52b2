use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::{Address, Customer, NewAddress, NewCustomer};
use crate::database::store::{AddressStore, CustomerStore, DatabaseError, Record};

#[derive(Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    addresses: BTreeMap<i64, Address>,
    next_customer_id: i64,
    next_address_id: i64,
}

/// Process-local store used when no database is configured, and by tests.
///
/// Ids are assigned sequentially from 1. Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-built records with their ids as given
    pub async fn with_records(customers: Vec<Customer>, addresses: Vec<Address>) -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.write().await;
            for customer in customers {
                tables.next_customer_id = tables.next_customer_id.max(customer.id);
                tables.customers.insert(customer.id, customer);
            }
            for address in addresses {
                tables.next_address_id = tables.next_address_id.max(address.id);
                tables.addresses.insert(address.id, address);
            }
        }
        store
    }

    pub async fn customers(&self) -> Vec<Customer> {
        self.tables.read().await.customers.values().cloned().collect()
    }

    pub async fn addresses(&self) -> Vec<Address> {
        self.tables.read().await.addresses.values().cloned().collect()
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>, DatabaseError> {
        Ok(self.tables.read().await.customers.get(&id).cloned())
    }

    async fn get_customer_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.customers.values().find(|c| c.email == email).cloned())
    }

    async fn store_customer(&self, customer: NewCustomer) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_customer_id += 1;
        let id = tables.next_customer_id;
        tables.customers.insert(id, customer.with_id(id));
        Ok(id)
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.customers.get_mut(&customer.id) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(())
            }
            None => Err(DatabaseError::NotFound { record: Record::Customer, id: customer.id }),
        }
    }

    async fn delete_customer_cascade(&self, id: i64) -> Result<u64, DatabaseError> {
        // One write guard covers both tables, so no address can be added in between
        let mut tables = self.tables.write().await;
        if tables.customers.remove(&id).is_none() {
            return Err(DatabaseError::NotFound { record: Record::Customer, id });
        }

        let before = tables.addresses.len();
        tables.addresses.retain(|_, address| address.customer_id != id);
        Ok((before - tables.addresses.len()) as u64)
    }
}

#[async_trait]
impl AddressStore for InMemoryStore {
    async fn get_address_by_id(&self, id: i64) -> Result<Option<Address>, DatabaseError> {
        Ok(self.tables.read().await.addresses.get(&id).cloned())
    }

    async fn get_addresses_by_customer_id(&self, customer_id: i64) -> Result<Vec<Address>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .addresses
            .values()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn store_address(&self, address: NewAddress) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_address_id += 1;
        let id = tables.next_address_id;
        tables.addresses.insert(id, address.with_id(id));
        Ok(id)
    }

    async fn update_address(&self, address: &Address) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.addresses.get_mut(&address.id) {
            Some(existing) => {
                *existing = address.clone();
                Ok(())
            }
            None => Err(DatabaseError::NotFound { record: Record::Address, id: address.id }),
        }
    }

    async fn delete_address(&self, id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables
            .addresses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound { record: Record::Address, id })
    }
}
