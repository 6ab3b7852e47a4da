// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Routes here sit behind `require_user` or `require_admin`, so every handler
// can take `Extension<AuthUser>`.

pub mod bookmarks;
pub mod restaurants;
pub mod reviews;
