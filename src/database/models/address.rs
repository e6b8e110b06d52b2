use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored address. `customer_id` is the owning customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub customer_id: i64,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    pub customer_id: i64,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub country: String,
}

impl NewAddress {
    pub fn with_id(self, id: i64) -> Address {
        Address {
            id,
            customer_id: self.customer_id,
            address_line1: self.address_line1,
            address_line2: self.address_line2,
            city: self.city,
            country: self.country,
        }
    }
}
