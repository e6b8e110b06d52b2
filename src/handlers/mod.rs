// handlers/mod.rs - Handler tiers
//
// Public (no token) → Protected (token verified by the authentication gate)
pub mod public;    // Customer registration and login
pub mod protected; // Customer profile and address operations
