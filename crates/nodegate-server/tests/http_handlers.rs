//! Decision and ops handlers, invoked directly with axum extractors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;

use nodegate_server::app_state::AppState;
use nodegate_server::cache::{AdmissionCache, ManualClock};
use nodegate_server::obs::NodeGateMetrics;
use nodegate_server::{config, ops, transport};

use fake_fetcher::{key, ScriptedFetcher, Step};

fn state_with(steps: Vec<Step>, yaml_server: &str) -> (AppState, Arc<ScriptedFetcher>) {
    let yaml = format!("version: 1\n{yaml_server}allowlist:\n  path: \"unused.json\"\n");
    let cfg = config::load_from_str(&yaml).unwrap();

    let fetcher = ScriptedFetcher::new(steps);
    let metrics = Arc::new(NodeGateMetrics::default());
    let cache = AdmissionCache::new(fetcher.clone(), Duration::from_secs(60))
        .with_clock(Arc::new(ManualClock::new(0)))
        .with_metrics(Arc::clone(&metrics));

    (AppState::from_parts(cfg, Arc::new(cache), metrics), fetcher)
}

fn body_for(b: u8) -> Bytes {
    Bytes::from(format!(
        r#"{{"NodePublic":"{}","Source":"198.51.100.4"}}"#,
        key(b)
    ))
}

#[tokio::test]
async fn admit_answers_from_allow_list() {
    let (state, fetcher) = state_with(vec![Step::ok(&[key(1)])], "");

    let allowed = transport::admit::admit(State(state.clone()), Ok(body_for(1))).await.unwrap();
    assert!(allowed.0.allow);

    let denied = transport::admit::admit(State(state.clone()), Ok(body_for(2))).await.unwrap();
    assert!(!denied.0.allow);

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(state.metrics().decisions.get(&[("result", "allow")]), 1);
    assert_eq!(state.metrics().decisions.get(&[("result", "deny")]), 1);
}

#[tokio::test]
async fn fetch_failure_still_answers() {
    let (state, _) = state_with(vec![Step::fail("down")], "");

    let resp = transport::admit::admit(State(state.clone()), Ok(body_for(1)))
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.metrics().refreshes.get(&[("outcome", "failed")]), 1);
}

#[tokio::test]
async fn malformed_request_is_400_and_skips_cache() {
    let (state, fetcher) = state_with(vec![Step::ok(&[key(1)])], "");

    for body in ["", "{}", r#"{"NodePublic":"nodekey:01"}"#] {
        let resp = transport::admit::admit(State(state.clone()), Ok(Bytes::from(body)))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body={body}");
    }

    assert_eq!(fetcher.calls(), 0);
    assert_eq!(state.metrics().request_errors.get(&[("code", "BAD_REQUEST")]), 3);
}

#[tokio::test]
async fn oversized_request_is_413() {
    let (state, fetcher) = state_with(vec![], "server:\n  max_body_bytes: 16\n");

    let resp = transport::admit::admit(State(state), Ok(body_for(1))).await.into_response();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn readyz_waits_for_first_snapshot_when_configured() {
    let (state, _) = state_with(
        vec![Step::ok(&[key(1)])],
        "server:\n  ready_requires_snapshot: true\n",
    );

    let resp = ops::readyz(State(state.clone())).await.into_response();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.cache().refresh_if_stale().await;
    let resp = ops::readyz(State(state.clone())).await.into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    state.set_draining();
    let resp = ops::readyz(State(state)).await.into_response();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn readyz_ignores_empty_cache_by_default() {
    let (state, _) = state_with(vec![], "");
    let resp = ops::readyz(State(state)).await.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn metrics_render_decisions_and_snapshot_size() {
    let (state, _) = state_with(vec![Step::ok(&[key(1), key(2)])], "");
    transport::admit::admit(State(state.clone()), Ok(body_for(1))).await.unwrap();

    let body = state.metrics().render(&state.metrics_extra());
    assert!(body.contains("nodegate_decisions_total{result=\"allow\"} 1"));
    assert!(body.contains("nodegate_refreshes_total{outcome=\"ok\"} 1"));
    assert!(body.contains("nodegate_fetch_duration_micros_count{} 1"));
    assert!(body.contains("nodegate_snapshot_nodes 2"));
    assert!(body.contains("nodegate_draining 0"));

    let resp = ops::metrics(State(state)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_and_status() {
    let (state, _) = state_with(vec![Step::ok(&[key(1)])], "");
    assert_eq!(ops::healthz().await.into_response().status(), StatusCode::OK);

    state.cache().refresh_if_stale().await;
    let status = state.cache().status();
    assert_eq!(status.nodes, 1);
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["state"], "fresh");

    let resp = ops::status(State(state)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
