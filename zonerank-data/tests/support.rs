//! Local stand-in for the hosted REST store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;

/// Key the stub store expects in the `apikey` header.
pub const API_KEY: &str = "test-key";

#[derive(Debug, Clone)]
struct StubResponse {
    status: StatusCode,
    body: String,
}

/// Configurable REST store serving canned table bodies.
#[derive(Debug, Clone, Default)]
pub struct StubStore {
    tables: HashMap<String, StubResponse>,
    delay: Option<Duration>,
}

impl StubStore {
    /// Serve `rows` for `table` with a 200 status.
    pub fn with_rows(self, table: &str, rows: serde_json::Value) -> Self {
        self.with_body(table, StatusCode::OK, rows.to_string())
    }

    /// Serve a raw body with the given status for `table`.
    pub fn with_body(mut self, table: &str, status: StatusCode, body: impl Into<String>) -> Self {
        self.tables.insert(
            table.to_owned(),
            StubResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Delay every response by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Start serving on an ephemeral port and return the base URL.
    ///
    /// The server runs on its own thread for the rest of the test process.
    pub fn spawn(self) -> String {
        let (tx, rx) = mpsc::channel();
        let router = Router::new()
            .route("/rest/v1/{table}", get(serve_table))
            .with_state(Arc::new(self));
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub store runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind stub store");
                tx.send(listener.local_addr().expect("stub store address"))
                    .expect("report stub store address");
                axum::serve(listener, router).await.expect("serve stub store");
            });
        });
        let addr = rx.recv().expect("stub store should start");
        format!("http://{addr}")
    }
}

async fn serve_table(
    State(store): State<Arc<StubStore>>,
    Path(table): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    if let Some(delay) = store.delay {
        tokio::time::sleep(delay).await;
    }
    let authorised = headers.get("apikey").is_some_and(|value| value == API_KEY)
        && headers
            .get("authorization")
            .is_some_and(|value| value == format!("Bearer {API_KEY}").as_str());
    if !authorised {
        return (StatusCode::UNAUTHORIZED, "missing api key".to_owned());
    }
    match store.tables.get(&table) {
        Some(response) => (response.status, response.body.clone()),
        None => (StatusCode::NOT_FOUND, format!("no table {table}")),
    }
}

/// Drive `future` to completion on a fresh current-thread runtime.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime")
        .block_on(future)
}
