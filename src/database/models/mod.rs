pub mod address;
pub mod customer;

pub use address::{Address, NewAddress};
pub use customer::{Customer, NewCustomer};
