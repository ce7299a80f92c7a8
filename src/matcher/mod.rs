//! Best-effort forwarding of committed writes to the matcher service.
//!
//! The local mutation has already committed by the time a notification is
//! dispatched; delivery is advisory. Failures are logged and dropped, never
//! retried, never surfaced to the caller.

use once_cell::sync::Lazy;
use reqwest::Method;
use serde::Serialize;

use crate::auth;
use crate::config;
use crate::database::models::sample::Sample;
use crate::database::models::wish::Wish;

static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub fn sample_created(sample: &Sample) {
    dispatch(Method::POST, "samples", sample);
}

pub fn sample_updated(sample: &Sample) {
    dispatch(Method::PATCH, "samples", sample);
}

pub fn wish_created(wish: &Wish) {
    dispatch(Method::POST, "wishes", wish);
}

pub fn wish_updated(wish: &Wish) {
    dispatch(Method::PATCH, "wishes", wish);
}

/// Hand the notification to a background task and return immediately; the
/// response path never waits on the matcher.
fn dispatch<T: Serialize>(method: Method, collection: &'static str, record: &T) {
    let matcher_url = &config::config().matcher_url;
    if matcher_url.is_empty() {
        tracing::debug!("matcher URL not configured, skipping {} notification", collection);
        return;
    }

    let url = format!("{}/v1/matches/{}", matcher_url.trim_end_matches('/'), collection);

    let body = match serde_json::to_value(record) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("could not serialize {} notification: {}", collection, e);
            return;
        }
    };

    tokio::spawn(async move {
        let token = match auth::issue_service_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("dropping {} notification, token issuance failed: {}", collection, e);
                return;
            }
        };

        let result = CLIENT
            .request(method, &url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(resp) if !resp.status().is_success() => {
                tracing::warn!("matcher rejected {} notification: {}", collection, resp.status());
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("matcher unreachable, dropping {} notification: {}", collection, e);
            }
        }
    });
}
