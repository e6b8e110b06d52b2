// handlers/public/mod.rs - Public handlers
//
// Token acquisition endpoints that run without the authentication gate.
// Both still validate their payloads before touching the store.

pub mod customer; // POST /customer/ - register and get a token
pub mod login;    // POST /customer/login/ - exchange credentials for a token

pub use customer::create_customer;
pub use login::login;
