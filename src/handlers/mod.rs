// handlers/mod.rs - two security tiers
//
// Public (no token) → Protected (bearer token, optionally admin role)
pub mod protected;
pub mod public;
pub mod utils;
