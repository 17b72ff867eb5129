#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use todo_api::config::AppConfig;
use todo_api::database::{MemoryStore, Store};
use todo_api::router;
use todo_api::state::AppState;

pub struct TestServer {
    pub base_url: String,
    pub store: MemoryStore,
    pub client: Client,
}

impl TestServer {
    /// Serve the full router over an in-memory store on an unused port.
    /// The server lives as long as the calling test's runtime.
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = MemoryStore::new();
        let state = AppState::new(Arc::new(store.clone()));
        let app = router::build(state, &AppConfig::from_env());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            base_url,
            store,
            client: Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register `username` and return the issued API key
    pub async fn register(&self, username: &str) -> Result<(i64, String)> {
        let res = self
            .client
            .post(self.url("/register"))
            .json(&json!({ "username": username }))
            .send()
            .await?;
        let (status, body) = read(res).await?;
        anyhow::ensure!(status == StatusCode::OK, "register failed: {} {}", status, body);

        let id = body["data"]["id"].as_i64().context("user id missing")?;
        let key = body["data"]["api_key"].as_str().context("api_key missing")?.to_string();
        Ok((id, key))
    }

    pub async fn store_todo_done(&self, id: i32) -> Result<bool> {
        let todo = self.store.find_todo(id).await?.context("todo missing from store")?;
        Ok(todo.done)
    }

    pub async fn post(&self, path: &str, key: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        let mut req = self.client.post(self.url(path)).json(&body);
        if let Some(key) = key {
            req = req.header("Authorization", key);
        }
        read(req.send().await?).await
    }

    pub async fn get(&self, path: &str, key: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut req = self.client.get(self.url(path));
        if let Some(key) = key {
            req = req.header("Authorization", key);
        }
        read(req.send().await?).await
    }
}

pub async fn read(res: Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let body = res.json::<Value>().await.context("response was not JSON")?;
    Ok((status, body))
}
