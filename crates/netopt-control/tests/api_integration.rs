//! API integration tests for netopt-control.
//!
//! These tests exercise the REST API through axum's tower service interface
//! (no TCP).

use axum::body::Body;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use netopt_control::config::ServiceConfig;
use netopt_control::state::AppState;

fn test_app() -> (Router, AppState) {
    let state = AppState::default();
    (netopt_control::app(state.clone()), state)
}

/// Helper: parse JSON response body.
async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        let text = String::from_utf8_lossy(&bytes);
        panic!("not valid JSON: {text}");
    })
}

async fn text_body(resp: axum::response::Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: build a JSON POST request.
fn json_post(uri: &str, body: serde_json::Value) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

fn healthy_link() -> serde_json::Value {
    serde_json::json!({
        "bandwidth": 10.0,
        "throughput": 0.5,
        "packet_loss": 0.0,
        "latency": 20.0,
        "jitter": 5.0
    })
}

fn broken_link() -> serde_json::Value {
    serde_json::json!({
        "bandwidth": 1.0,
        "throughput": 0.0,
        "packet_loss": 20.0,
        "latency": 200.0,
        "jitter": 50.0
    })
}

// ── Service descriptor ──────────────────────────────────────────────

#[tokio::test]
async fn root_describes_service() {
    let (app, _) = test_app();
    let resp = app.oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    assert_eq!(body["title"], "Network Performance Optimizer");
    assert_eq!(body["optimizer_candidates"], 10);
    assert!(body["endpoints"].as_array().unwrap().len() >= 3);
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = test_app();
    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_body(resp).await["status"], "ok");
}

// ── Analyze ─────────────────────────────────────────────────────────

#[tokio::test]
async fn analyze_healthy_link() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_post("/analyze", healthy_link()))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    assert_eq!(body["status"], "success");
    assert!(body["timestamp"].as_str().is_some());
    assert_eq!(body["input_conditions"]["bandwidth"], 10.0);

    let analysis = &body["analysis_results"];
    assert_eq!(analysis["network_score"], 100.0);
    assert_eq!(analysis["congestion_level"], "Low");
    assert_eq!(analysis["performance_rating"], "Excellent");
    assert_eq!(analysis["recommendations"].as_array().unwrap().len(), 0);

    assert_eq!(body["optimization"]["recommended_bandwidth"], 10.0);
    assert_eq!(body["optimization"]["potential_improvement"], "0.0%");

    let video = &body["video_streaming"];
    assert_eq!(video["resolution"], "4K (2160p)");
    assert_eq!(video["fps"], 60);
    assert_eq!(video["bitrate"], "8.0 Mbps");
    assert_eq!(video["codec"], "H.265/HEVC");
    assert_eq!(video["streaming_quality"], "Ultra High");
}

#[tokio::test]
async fn analyze_broken_link() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_post("/analyze", broken_link()))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    let analysis = &body["analysis_results"];
    assert_eq!(analysis["network_score"], 0.0);
    assert_eq!(analysis["congestion_level"], "Severe");
    assert_eq!(analysis["performance_rating"], "Critical");

    let recs = analysis["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 4);
    assert!(recs[0].as_str().unwrap().starts_with("High packet loss"));
    assert!(recs[1].as_str().unwrap().starts_with("High latency"));
    assert!(recs[2].as_str().unwrap().starts_with("High jitter"));
    assert!(recs[3].as_str().unwrap().starts_with("Low throughput"));

    assert_eq!(body["optimization"]["recommended_bandwidth"], 1.5);
    assert_eq!(body["optimization"]["potential_improvement"], "50.0%");
    assert_eq!(body["video_streaming"]["resolution"], "480p");
    assert_eq!(body["video_streaming"]["bitrate"], "0.5 Mbps");
}

#[tokio::test]
async fn analyze_rejects_out_of_range_field() {
    let (app, state) = test_app();
    let mut link = healthy_link();
    link["packet_loss"] = serde_json::json!(150.0);

    let resp = app.oneshot(json_post("/analyze", link)).await.unwrap();
    assert_eq!(resp.status(), 422);
    let body = json_body(resp).await;
    assert!(body["error"].as_str().unwrap().contains("packet_loss"));
    assert_eq!(state.metrics().snapshot().rejected, 1);
    assert_eq!(state.metrics().snapshot().analyze, 0);
}

#[tokio::test]
async fn analyze_rejects_zero_bandwidth() {
    let (app, _) = test_app();
    let mut link = healthy_link();
    link["bandwidth"] = serde_json::json!(0.0);

    let resp = app.oneshot(json_post("/analyze", link)).await.unwrap();
    assert_eq!(resp.status(), 422);
    let body = json_body(resp).await;
    assert!(body["error"].as_str().unwrap().contains("bandwidth"));
}

#[tokio::test]
async fn extreme_bandwidths_rejected_on_every_route() {
    for bw in [1e308, 5e-324] {
        for route in ["/analyze", "/optimize", "/predict"] {
            let (app, state) = test_app();
            let mut link = healthy_link();
            link["bandwidth"] = serde_json::json!(bw);

            let resp = app.oneshot(json_post(route, link)).await.unwrap();
            assert_eq!(resp.status(), 422, "{route} with bandwidth {bw}");
            let body = json_body(resp).await;
            assert!(body["error"].as_str().unwrap().contains("bandwidth"));
            assert_eq!(state.metrics().snapshot().rejected, 1);
        }
    }
}

#[tokio::test]
async fn bandwidth_range_edges_are_served() {
    for bw in [netopt_core::MIN_BANDWIDTH, netopt_core::MAX_BANDWIDTH] {
        let (app, _) = test_app();
        let mut link = healthy_link();
        link["bandwidth"] = serde_json::json!(bw);

        let resp = app
            .clone()
            .oneshot(json_post("/optimize", link.clone()))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "optimize with bandwidth {bw}");
        let body = json_body(resp).await;
        assert!(body["optimal_configuration"]["bandwidth"].as_f64().is_some());

        let resp = app.oneshot(json_post("/analyze", link)).await.unwrap();
        assert_eq!(resp.status(), 200, "analyze with bandwidth {bw}");
        let body = json_body(resp).await;
        assert!(body["optimization"]["recommended_bandwidth"].as_f64().is_some());
    }
}

#[tokio::test]
async fn analyze_rejects_missing_field() {
    let (app, state) = test_app();
    let resp = app
        .oneshot(json_post(
            "/analyze",
            serde_json::json!({ "bandwidth": 10.0, "throughput": 0.5 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    assert!(json_body(resp).await["error"].as_str().is_some());
    assert_eq!(state.metrics().snapshot().rejected, 1);
}

#[tokio::test]
async fn analyze_rejects_malformed_json() {
    let (app, _) = test_app();
    let req = axum::http::Request::builder()
        .uri("/analyze")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), 422);
}

// ── Optimize ────────────────────────────────────────────────────────

#[tokio::test]
async fn optimize_returns_ten_steps() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_post("/optimize", healthy_link()))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    assert_eq!(body["status"], "success");

    let steps = body["step_by_step_optimization"].as_array().unwrap();
    assert_eq!(steps.len(), 10);
    assert_eq!(steps[0]["bandwidth"], 5.0);
    assert_eq!(steps[9]["bandwidth"], 20.0);
    let bws: Vec<f64> = steps
        .iter()
        .map(|s| s["bandwidth"].as_f64().unwrap())
        .collect();
    assert!(bws.windows(2).all(|w| w[1] > w[0]));

    let current = &body["current_conditions"];
    assert_eq!(current["bandwidth"], 10.0);
    assert_eq!(current["jitter"], 5.0);
    assert_eq!(current["current_score"], 100.0);
    assert_eq!(current["current_congestion"], "0.0%");
}

#[tokio::test]
async fn optimize_picks_first_saturating_candidate() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_post(
            "/optimize",
            serde_json::json!({
                "bandwidth": 5.0,
                "throughput": 0.5,
                "packet_loss": 0.0,
                "latency": 40.0,
                "jitter": 10.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    let optimal = &body["optimal_configuration"];
    let bw = optimal["bandwidth"].as_f64().unwrap();
    assert!((bw - (2.5 + 5.0 * 7.5 / 9.0)).abs() < 1e-9);
    assert_eq!(optimal["predicted_score"], 70.0);
    assert_eq!(optimal["predicted_congestion"], "Moderate");
    assert_eq!(optimal["congestion_reduction"], "5.0%");
    assert_eq!(optimal["performance_metrics"]["bandwidth_improvement"], "33.3%");
    assert_eq!(optimal["performance_metrics"]["quality_improvement"], "5.0%");
    assert_eq!(
        optimal["performance_metrics"]["network_efficiency"],
        "10.5 score/Mbps"
    );
    assert_eq!(optimal["video_quality"]["resolution"], "1080p");
    assert_eq!(body["current_conditions"]["current_congestion"], "35.0%");
}

#[tokio::test]
async fn optimize_rejects_invalid_input() {
    let (app, state) = test_app();
    let mut link = broken_link();
    link["throughput"] = serde_json::json!(2.0);

    let resp = app.oneshot(json_post("/optimize", link)).await.unwrap();
    assert_eq!(resp.status(), 422);
    assert_eq!(state.metrics().snapshot().optimize, 0);
}

#[tokio::test]
async fn optimize_respects_configured_grid() {
    let config = ServiceConfig::from_toml_str(
        "[optimizer]\ncandidates = 4\nmin_factor = 1.0\nmax_factor = 4.0\n",
    )
    .unwrap();
    let app = netopt_control::app(AppState::new(config));

    let resp = app
        .oneshot(json_post("/optimize", healthy_link()))
        .await
        .unwrap();
    let body = json_body(resp).await;
    let steps = body["step_by_step_optimization"].as_array().unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0]["bandwidth"], 10.0);
    assert_eq!(steps[3]["bandwidth"], 40.0);
}

// ── Predict ─────────────────────────────────────────────────────────

#[tokio::test]
async fn predict_reports_congestion() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_post("/predict", broken_link()))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    assert_eq!(body["network_score"], 0.0);
    assert_eq!(body["congestion_level"], "Severe");
    assert_eq!(body["predicted_congestion"], "100.0%");
    assert_eq!(body["performance_rating"], "Critical");
}

// ── Metrics ─────────────────────────────────────────────────────────

#[tokio::test]
async fn metrics_count_served_and_rejected_requests() {
    let (app, _) = test_app();

    let resp = app
        .clone()
        .oneshot(json_post("/analyze", healthy_link()))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let resp = app
        .clone()
        .oneshot(json_post("/optimize", healthy_link()))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let resp = app
        .clone()
        .oneshot(json_post("/predict", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let resp = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let text = text_body(resp).await;
    assert!(text.contains(r#"netopt_requests_total{endpoint="analyze"} 1"#));
    assert!(text.contains(r#"netopt_requests_total{endpoint="optimize"} 1"#));
    assert!(text.contains(r#"netopt_requests_total{endpoint="predict"} 0"#));
    assert!(text.contains("netopt_requests_rejected_total 1"));
}
