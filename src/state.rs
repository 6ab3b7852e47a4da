use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::Store;

/// Process-wide handles built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
        }
    }

    pub fn from_config(config: &AppConfig, store: Arc<dyn Store>) -> Self {
        let tokens = TokenService::new(&config.security.jwt_secret, config.security.token_expiry_hours);
        Self::new(store, tokens)
    }
}
