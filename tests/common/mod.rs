#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::Router;
use http_body_util::BodyExt;
use portfolio_tracker::{
    config,
    error::TrackerError,
    models::PriceBook,
    services::{
        exchange_rate::ExchangeRateClient,
        holding_store::HoldingStore,
        prices_client::{PriceLookup, PricesRequest},
    },
    templates, AppState,
};

/// Price service double: answers every request with the same book.
pub struct FakePrices {
    book: PriceBook,
    failure: Option<(u16, String)>,
    calls: AtomicUsize,
    last: Mutex<Option<PricesRequest>>,
}

impl FakePrices {
    pub fn with_book(prices: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            book: serde_json::from_value(prices).expect("price book json"),
            failure: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            book: PriceBook::new(),
            failure: Some((status, body.to_string())),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<PricesRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceLookup for FakePrices {
    async fn fetch_prices(&self, request: &PricesRequest) -> Result<PriceBook, TrackerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request.clone());

        match &self.failure {
            Some((status, body)) => Err(TrackerError::PriceService {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(self.book.clone()),
        }
    }
}

/// Serves `app` on an ephemeral local port and returns its base url.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    format!("http://{addr}")
}

pub fn test_state(prices: Arc<FakePrices>, exchange_rate_url: &str) -> AppState {
    let mut settings = config::load();
    settings.exchange_rate_url = exchange_rate_url.to_string();
    settings.submit_debounce_ms = 10;
    settings.success_clear_ms = 10;

    AppState {
        hbs: templates::build_handlebars(),
        rates: ExchangeRateClient::new(settings.exchange_rate_url.clone()),
        settings,
        prices,
        holdings: Arc::new(HoldingStore::new()),
    }
}

pub async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}
