//! One stock form: field state, submission, and status notifications.
//!
//! A submission validates the fields, resolves the ticker against the price
//! service, values the position and hands the resulting [`Holding`] to a
//! [`HoldingSink`]. Loading / error / success flags are published through a
//! [`SubmitObserver`]; nothing here renders anything.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    error::TrackerError,
    models::{Exchange, Holding, PopularStock, StockForm},
};

use super::{
    holding_store::HoldingSink,
    prices_client::{PriceLookup, PricesRequest},
    ticker_resolver, valuation,
};

pub const SUCCESS_MESSAGE: &str = "Stock successfully added";

/// Receives the transient UI flags of a form.
pub trait SubmitObserver: Send + Sync {
    fn loading(&self, busy: bool);
    fn error(&self, message: Option<String>);
    fn success(&self, message: Option<String>);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Observer that just remembers the latest flags.
#[derive(Default)]
pub struct FormStatus {
    inner: Mutex<StatusSnapshot>,
}

impl FormStatus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StatusSnapshot> {
        // a poisoned lock still holds usable flags
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.lock().clone()
    }
}

impl SubmitObserver for FormStatus {
    fn loading(&self, busy: bool) {
        self.lock().loading = busy;
    }

    fn error(&self, message: Option<String>) {
        self.lock().error = message;
    }

    fn success(&self, message: Option<String>) {
        self.lock().success = message;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SubmitTiming {
    /// How long the trigger stays disabled after a submission starts.
    pub debounce: Duration,
    /// How long the success message stays up.
    pub success_clear: Duration,
}

impl Default for SubmitTiming {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1500),
            success_clear: Duration::from_millis(3000),
        }
    }
}

pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

pub struct StockInput {
    fields: Mutex<StockForm>,
    prices: Arc<dyn PriceLookup>,
    sink: Arc<dyn HoldingSink>,
    observer: Arc<dyn SubmitObserver>,
    on_complete: Option<CompletionCallback>,
    timing: SubmitTiming,
}

impl StockInput {
    pub fn new(prices: Arc<dyn PriceLookup>, sink: Arc<dyn HoldingSink>) -> Self {
        Self {
            fields: Mutex::new(StockForm::default()),
            prices,
            sink,
            observer: Arc::new(FormStatus::new()),
            on_complete: None,
            timing: SubmitTiming::default(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SubmitObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_on_complete(mut self, on_complete: CompletionCallback) -> Self {
        self.on_complete = Some(on_complete);
        self
    }

    pub fn with_timing(mut self, timing: SubmitTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_fields(self, form: StockForm) -> Self {
        *self.lock_fields() = form;
        self
    }

    fn lock_fields(&self) -> MutexGuard<'_, StockForm> {
        self.fields.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn fields(&self) -> StockForm {
        self.lock_fields().clone()
    }

    pub fn set_ticker(&self, ticker: impl Into<String>) {
        self.lock_fields().ticker = ticker.into();
    }

    pub fn set_lots(&self, lots: impl Into<String>) {
        self.lock_fields().lots = lots.into();
    }

    pub fn set_exchange(&self, exchange: Exchange) {
        self.lock_fields().exchange = exchange;
    }

    pub fn quick_pick(&self, stock: &PopularStock) {
        let mut fields = self.lock_fields();
        fields.ticker = stock.ticker.to_string();
        fields.exchange = stock.exchange;
    }

    /// Runs one submission with the current field values.
    ///
    /// On success the fields are reset and the completion callback runs. On
    /// failure the message goes to the observer and the fields are kept.
    pub async fn submit(&self, exchange_rate: Option<Decimal>) -> Result<Holding, TrackerError> {
        self.observer.loading(true);
        self.observer.error(None);

        let form = self.fields();
        let result = self.add_holding(&form, exchange_rate).await;

        match &result {
            Ok(_) => {
                *self.lock_fields() = StockForm::default();

                self.observer.success(Some(SUCCESS_MESSAGE.to_string()));
                self.schedule(self.timing.success_clear, |o| o.success(None));

                if let Some(on_complete) = &self.on_complete {
                    on_complete();
                }
            }
            Err(e) => {
                tracing::error!("Error submitting stock: {e}");
                self.observer.error(Some(e.to_string()));
            }
        }

        self.observer.loading(false);
        result
    }

    async fn add_holding(
        &self,
        form: &StockForm,
        exchange_rate: Option<Decimal>,
    ) -> Result<Holding, TrackerError> {
        let lots = valuation::parse_lots(&form.ticker, &form.lots)?;

        let candidates = ticker_resolver::candidate_symbols(&form.ticker, form.exchange);
        tracing::debug!(
            tickers = ?candidates,
            exchange = form.exchange.selector(),
            "submitting tickers"
        );

        // re-enabled by the timer, independent of the request below
        self.observer.loading(true);
        self.schedule(self.timing.debounce, |o| o.loading(false));

        let request = PricesRequest::stocks(candidates.clone(), exchange_rate);
        let book = self.prices.fetch_prices(&request).await?;

        let resolved =
            ticker_resolver::resolve_quote(&book, &form.ticker, form.exchange, &candidates)?;
        tracing::debug!(symbol = %resolved.symbol, "used ticker for price");

        let holding = valuation::build_holding(&form.ticker, lots, &resolved.quote, exchange_rate)?;
        tracing::debug!(?holding, "submitting stock data");

        self.sink.add(holding.clone()).await?;
        Ok(holding)
    }

    fn schedule(&self, after: Duration, apply: impl FnOnce(&dyn SubmitObserver) + Send + 'static) {
        let observer = Arc::clone(&self.observer);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            apply(observer.as_ref());
        });
    }
}
