//! Best-effort current-quote lookup.
//!
//! The dashboard treats a live quote as optional decoration: a single read
//! against the quote API, degrading to "no current price" on any failure.
//! The capability is a trait so tests inject a no-op implementation.

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentQuote {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Best-effort read of the current market quote. `None` means "no
    /// current price available" and is never an error.
    async fn current_quote(&self, symbol: &str) -> Option<CurrentQuote>;
}

/// No-quote implementation for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct NoopQuoteProvider;

#[async_trait]
impl QuoteProvider for NoopQuoteProvider {
    async fn current_quote(&self, _symbol: &str) -> Option<CurrentQuote> {
        None
    }
}

#[derive(Clone)]
pub struct YahooQuoteService {
    client: Client,
    base_url: String,
    cache: Arc<Cache<String, CurrentQuote>>,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Option<ChartPayload>,
}

#[derive(Debug, Deserialize)]
struct ChartPayload {
    result: Option<Vec<ChartEntry>>,
}

#[derive(Debug, Deserialize)]
struct ChartEntry {
    meta: Option<ChartMeta>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "previousClose")]
    previous_close: Option<f64>,
}

impl YahooQuoteService {
    pub fn new() -> Self {
        Self::with_base_url("https://query1.finance.yahoo.com".to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(Duration::from_secs(60))
            .build();

        Self {
            client: Client::new(),
            base_url,
            cache: Arc::new(cache),
        }
    }

    async fn fetch_quote(&self, symbol: &str) -> Option<CurrentQuote> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "Mozilla/5.0")
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            tracing::debug!(
                "Quote lookup for {} returned status {}",
                symbol,
                response.status()
            );
            return None;
        }

        let data: ChartResponse = response.json().await.ok()?;
        let meta = data.chart?.result?.into_iter().next()?.meta?;
        quote_from_meta(meta)
    }
}

impl Default for YahooQuoteService {
    fn default() -> Self {
        Self::new()
    }
}

fn quote_from_meta(meta: ChartMeta) -> Option<CurrentQuote> {
    let price = meta.regular_market_price?;
    let previous_close = meta.previous_close.unwrap_or(price);
    let change = price - previous_close;
    let change_percent = if previous_close != 0.0 {
        change / previous_close * 100.0
    } else {
        0.0
    };

    Some(CurrentQuote {
        price,
        change,
        change_percent,
    })
}

#[async_trait]
impl QuoteProvider for YahooQuoteService {
    async fn current_quote(&self, symbol: &str) -> Option<CurrentQuote> {
        if let Some(cached) = self.cache.get(symbol).await {
            tracing::debug!("Quote cache hit for {}", symbol);
            return Some(cached);
        }

        let quote = self.fetch_quote(symbol).await?;
        self.cache.insert(symbol.to_string(), quote.clone()).await;
        Some(quote)
    }
}
