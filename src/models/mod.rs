pub mod quote;
pub mod holding;
pub mod exchange_rate;
pub mod form;

pub use quote::{Currency, PriceBook, PriceQuote, QuoteLookup};
pub use holding::{AssetType, Holding};
pub use exchange_rate::ExchangeRateRecord;
pub use form::{Exchange, PopularStock, StockForm, POPULAR_STOCKS};
