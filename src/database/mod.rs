pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::InMemoryStore;
pub use models::{Address, Customer, NewAddress, NewCustomer};
pub use postgres::PgStore;
pub use store::{AddressStore, CustomerStore, DatabaseError, Record};
