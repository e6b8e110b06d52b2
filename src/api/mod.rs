//! Request and response payloads for the customer endpoints.
//!
//! Every request payload carries its own rule table via [`Validate`](crate::validation::Validate).
//! Missing JSON fields decode to empty values so that `Required` reports them.

pub mod address;
pub mod customer;

pub use address::{
    CreateAddressRequest, DeleteAddressRequest, GetAddressResponse, UpdateAddressRequest,
};
pub use customer::{
    CreateCustomerRequest, GetCustomerResponse, LoginCustomerRequest, UpdateCustomerRequest,
};
