#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use restaurant_api::auth::{hash_password, Role, TokenService};
use restaurant_api::database::{models::NewUser, MemoryStore, Store};
use restaurant_api::routes;
use restaurant_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub tokens: TokenService,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the real router over a fresh in-memory store on an unused port.
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let store = Arc::new(MemoryStore::new());
        let tokens = TokenService::new(SECRET, 24);
        let state = AppState::new(store.clone(), tokens.clone());
        let app = routes::app(state, CorsLayer::permissive());

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            store,
            tokens,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req.send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        let mut req = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req.send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut req = self.client.delete(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req.send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let (status, body) = self
            .post("/auth/login", None, json!({ "email": email, "password": password }))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {} {}", status, body);
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response carried no token")
    }

    /// Register through the API and return a bearer token.
    pub async fn user_token(&self, email: &str, first_name: &str, last_name: &str) -> Result<String> {
        let (status, body) = self
            .post(
                "/auth/register",
                None,
                json!({
                    "email": email,
                    "password": "password123",
                    "first_name": first_name,
                    "last_name": last_name,
                }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);
        self.login(email, "password123").await
    }

    /// Admins can't self-register, so they are written straight to the store.
    pub async fn admin_token(&self) -> Result<String> {
        self.store
            .insert_user(NewUser {
                email: "admin@example.com".to_string(),
                password_hash: hash_password("admin-password")?,
                role: Role::Admin,
                first_name: "Ada".to_string(),
                last_name: "Admin".to_string(),
            })
            .await?;
        self.login("admin@example.com", "admin-password").await
    }

    pub async fn add_restaurant(&self, admin: &str, body: Value) -> Result<String> {
        let (status, created) = self.post("/restaurants", Some(admin), body).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create failed: {} {}", status, created);
        created["id"]
            .as_str()
            .map(str::to_string)
            .context("create response carried no id")
    }
}

pub fn restaurant(name: &str, cuisine: &str, location: &str, dietary: &[&str]) -> Value {
    json!({
        "name": name,
        "cuisine": cuisine,
        "type": "Casual Dining",
        "dietary": dietary,
        "rating": 4.2,
        "location": location,
        "address": format!("1 High Street, {}", location),
        "contact": "555-0100",
    })
}

pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|r| r["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
