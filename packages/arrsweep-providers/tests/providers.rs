use std::{
	collections::HashMap,
	future::IntoFuture,
	sync::{Arc, Mutex},
	time::Duration,
};

use axum::{
	Json, Router,
	extract::{Query, State},
	http::{HeaderMap, StatusCode},
	response::IntoResponse,
	routing,
};
use serde_json::Value;
use tokio::{
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
};

use arrsweep_config::{Category, CategoryConfig};
use arrsweep_providers::{API_KEY_HEADER, ErrorKind};

const API_KEY: &str = "stub-key";

#[derive(Clone, Default)]
struct StubState {
	commands: Arc<Mutex<Vec<Value>>>,
	pages_requested: Arc<Mutex<Vec<u32>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
	headers.get(API_KEY_HEADER).and_then(|value| value.to_str().ok()) == Some(API_KEY)
}

async fn wanted_missing(
	State(state): State<StubState>,
	headers: HeaderMap,
	Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
	if !authorized(&headers) {
		return StatusCode::UNAUTHORIZED.into_response();
	}

	let page: u32 = params.get("page").and_then(|raw| raw.parse().ok()).unwrap_or(1);

	state.pages_requested.lock().expect("Lock poisoned.").push(page);

	// Three records across pages of two.
	let records = match page {
		1 => serde_json::json!([{ "id": 11 }, { "id": 12 }]),
		2 => serde_json::json!([{ "id": 13 }]),
		_ => serde_json::json!([]),
	};

	Json(serde_json::json!({
		"page": page,
		"pageSize": 2,
		"totalRecords": 3,
		"records": records,
	}))
	.into_response()
}

async fn wanted_cutoff() -> impl IntoResponse {
	StatusCode::INTERNAL_SERVER_ERROR
}

async fn movies() -> impl IntoResponse {
	Json(serde_json::json!([
		{ "id": 1, "monitored": true, "hasFile": false },
		{ "id": 2, "monitored": true, "hasFile": true },
		{ "id": 3, "monitored": true, "hasFile": false }
	]))
}

async fn command(State(state): State<StubState>, Json(payload): Json<Value>) -> impl IntoResponse {
	let rejected = payload
		.get("episodeIds")
		.and_then(Value::as_array)
		.map(|ids| ids.contains(&Value::from(13)))
		.unwrap_or(false);

	state.commands.lock().expect("Lock poisoned.").push(payload);

	if rejected {
		return StatusCode::INTERNAL_SERVER_ERROR.into_response();
	}

	(StatusCode::CREATED, Json(serde_json::json!({ "id": 1, "status": "queued" }))).into_response()
}

async fn start_stub_server(state: StubState) -> (String, Sender<()>) {
	let app = Router::new()
		.route("/api/v3/wanted/missing", routing::get(wanted_missing))
		.route("/api/v3/wanted/cutoff", routing::get(wanted_cutoff))
		.route("/api/v3/movie", routing::get(movies))
		.route("/api/v3/command", routing::post(command))
		.with_state(state);
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind stub server.");
	let addr = listener.local_addr().expect("Failed to read stub server address.");
	let (tx, rx) = oneshot::channel();
	let server = axum::serve(listener, app).with_graceful_shutdown(async move {
		let _ = rx.await;
	});

	tokio::spawn(async move {
		let _ = server.into_future().await;
	});

	(format!("http://{addr}"), tx)
}

fn category_config(category: Category, base_url: String, api_key: &str) -> CategoryConfig {
	CategoryConfig {
		category,
		base_url,
		api_key: api_key.to_string(),
		limit: 10,
		include_cutoff: true,
		page_size: 2,
		max_pages: 20,
		request_timeout: Duration::from_secs(5),
	}
}

#[test]
fn api_key_header_is_sensitive() {
	let headers = arrsweep_providers::auth_headers("secret").expect("Failed to build headers.");
	let value = headers.get(API_KEY_HEADER).expect("Missing api key header.");

	assert_eq!(value, "secret");
	assert!(value.is_sensitive());
}

#[test]
fn command_payload_matches_category() {
	assert_eq!(
		arrsweep_providers::command_payload(Category::Episodes, 42),
		serde_json::json!({ "name": "EpisodeSearch", "episodeIds": [42] })
	);
	assert_eq!(
		arrsweep_providers::command_payload(Category::Movies, 7),
		serde_json::json!({ "name": "MoviesSearch", "movieIds": [7] })
	);
}

#[tokio::test]
async fn wanted_listing_follows_pages_until_total() {
	let state = StubState::default();
	let (base_url, shutdown) = start_stub_server(state.clone()).await;
	let cfg = category_config(Category::Episodes, base_url, API_KEY);
	let ids = arrsweep_providers::fetch_missing(&cfg).await.expect("Failed to fetch missing.");

	assert_eq!(ids, vec![11, 12, 13]);
	assert_eq!(*state.pages_requested.lock().expect("Lock poisoned."), vec![1, 2]);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn wanted_listing_stops_at_page_limit() {
	let state = StubState::default();
	let (base_url, shutdown) = start_stub_server(state.clone()).await;
	let mut cfg = category_config(Category::Episodes, base_url, API_KEY);

	cfg.max_pages = 1;

	let ids = arrsweep_providers::fetch_missing(&cfg).await.expect("Failed to fetch missing.");

	assert_eq!(ids, vec![11, 12]);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn server_errors_are_transport_failures() {
	let (base_url, shutdown) = start_stub_server(StubState::default()).await;
	let cfg = category_config(Category::Episodes, base_url, API_KEY);
	let err = arrsweep_providers::fetch_cutoff_unmet(&cfg)
		.await
		.expect_err("Expected cutoff listing to fail.");

	assert_eq!(err.kind(), ErrorKind::Transport);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn wrong_api_key_is_rejected() {
	let (base_url, shutdown) = start_stub_server(StubState::default()).await;
	let cfg = category_config(Category::Episodes, base_url, "wrong-key");
	let err =
		arrsweep_providers::fetch_missing(&cfg).await.expect_err("Expected unauthorized error.");

	assert_eq!(err.kind(), ErrorKind::Transport);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn radarr_missing_filters_catalog() {
	let (base_url, shutdown) = start_stub_server(StubState::default()).await;
	let cfg = category_config(Category::Movies, base_url, API_KEY);
	let ids = arrsweep_providers::fetch_missing(&cfg).await.expect("Failed to fetch movies.");

	assert_eq!(ids, vec![1, 3]);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn trigger_search_posts_command_and_reports_failures() {
	let state = StubState::default();
	let (base_url, shutdown) = start_stub_server(state.clone()).await;
	let cfg = category_config(Category::Episodes, base_url, API_KEY);

	arrsweep_providers::trigger_search(&cfg, 12).await.expect("Expected search to succeed.");

	let err = arrsweep_providers::trigger_search(&cfg, 13)
		.await
		.expect_err("Expected rejected search to fail.");

	assert_eq!(err.kind(), ErrorKind::Transport);

	let commands = state.commands.lock().expect("Lock poisoned.").clone();

	assert_eq!(
		commands,
		vec![
			serde_json::json!({ "name": "EpisodeSearch", "episodeIds": [12] }),
			serde_json::json!({ "name": "EpisodeSearch", "episodeIds": [13] }),
		]
	);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn unreachable_host_is_transport_failure() {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind.");
	let addr = listener.local_addr().expect("Failed to read address.");

	drop(listener);

	let cfg = category_config(Category::Movies, format!("http://{addr}"), API_KEY);
	let err = arrsweep_providers::fetch_missing(&cfg).await.expect_err("Expected connect error.");

	assert_eq!(err.kind(), ErrorKind::Transport);
}
