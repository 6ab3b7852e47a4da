// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Read-only restaurant queries, token acquisition, and service probes.

pub mod auth;
pub mod restaurants;
pub mod service;
