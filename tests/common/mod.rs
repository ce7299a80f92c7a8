#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::StatusCode;
use serde::Serialize;

/// Signing secret shared between the minted test tokens and the server under test.
pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub base_url: String,
    child: Child,
}

impl TestServer {
    /// Spawn a server on a free port with a fresh database. The server's own
    /// liveness probe doubles as a reachable token provider, and the matcher
    /// points at a closed port so notification failures stay in play.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_inner(None).await
    }

    /// Spawn with a token provider that refuses connections.
    pub async fn spawn_with_unreachable_provider() -> Result<Self> {
        Self::spawn_inner(Some("http://127.0.0.1:9")).await
    }

    async fn spawn_inner(provider_url: Option<&str>) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let db_path = std::env::temp_dir().join(format!("card-trader-test-{}.db", port));
        let _ = std::fs::remove_file(&db_path);

        let provider = provider_url
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}/health/live", base_url));

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_card-trader-api"));
        cmd.env("PORT", port.to_string())
            .env("OAUTH_SIGN_KEY", TEST_SECRET)
            .env("OAUTH_TOKEN_PROVIDER", provider)
            .env("CARD_MATCHER_IP", "http://127.0.0.1:9")
            .env("DATABASE_IP", format!("sqlite://{}", db_path.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        let server = Self { base_url, child };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health/live", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[derive(Serialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// Mint a bearer token the way the external provider would sign one.
pub fn bearer_for(user_id: i64) -> String {
    sign(
        user_id.to_string(),
        Utc::now() + ChronoDuration::minutes(30),
        TEST_SECRET,
    )
}

pub fn expired_bearer_for(user_id: i64) -> String {
    sign(
        user_id.to_string(),
        Utc::now() - ChronoDuration::hours(2),
        TEST_SECRET,
    )
}

pub fn bearer_with_secret(user_id: i64, secret: &str) -> String {
    sign(
        user_id.to_string(),
        Utc::now() + ChronoDuration::minutes(30),
        secret,
    )
}

pub fn bearer_with_subject(sub: &str) -> String {
    sign(
        sub.to_string(),
        Utc::now() + ChronoDuration::minutes(30),
        TEST_SECRET,
    )
}

fn sign(sub: String, exp: DateTime<Utc>, secret: &str) -> String {
    let claims = Claims {
        sub,
        exp: exp.timestamp(),
        iat: (exp - ChronoDuration::minutes(30)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token")
}
