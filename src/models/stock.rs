use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::company_overviews;

/// Request body for POST /api/stocks/{symbol}/prices
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPricesRequest {
    #[serde(default)]
    pub prices: Vec<PriceRowInput>,
}

/// One unvalidated daily price row. Every field is optional so that
/// validation can name the exact missing/invalid field class instead of
/// failing opaquely at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRowInput {
    pub date: Option<String>,
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<i64>,
}

/// A validated daily price row ready for storage
#[derive(Debug, Clone, PartialEq)]
pub struct NewDailyPrice {
    pub date: NaiveDate,
    pub low: f64,
    pub high: f64,
    pub close: f64,
    pub volume: i64,
}

impl PriceRowInput {
    /// Validates one row; `index` is the zero-based position in the
    /// submitted batch, used to point at the offending row.
    pub fn validate(&self, index: usize) -> Result<NewDailyPrice, String> {
        let date_str = self
            .date
            .as_deref()
            .ok_or_else(|| format!("row {}: missing date", index))?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
            format!(
                "row {}: invalid date '{}'. Expected YYYY-MM-DD",
                index, date_str
            )
        })?;

        let low = require_finite(self.low, "low", index)?;
        let high = require_finite(self.high, "high", index)?;
        let close = require_finite(self.close, "close", index)?;

        let volume = self
            .volume
            .ok_or_else(|| format!("row {}: missing volume", index))?;
        if volume < 0 {
            return Err(format!("row {}: volume cannot be negative", index));
        }

        Ok(NewDailyPrice {
            date,
            low,
            high,
            close,
            volume,
        })
    }
}

fn require_finite(value: Option<f64>, field: &str, index: usize) -> Result<f64, String> {
    let value = value.ok_or_else(|| format!("row {}: missing {}", index, field))?;
    if !value.is_finite() {
        return Err(format!("row {}: {} must be a finite number", index, field));
    }
    Ok(value)
}

impl SubmitPricesRequest {
    /// Validates the whole batch before any write. Returns the typed rows
    /// or the first field-class-specific failure.
    pub fn validate(&self) -> Result<Vec<NewDailyPrice>, String> {
        if self.prices.is_empty() {
            return Err("prices array cannot be empty".to_string());
        }
        self.prices
            .iter()
            .enumerate()
            .map(|(i, row)| row.validate(i))
            .collect()
    }
}

/// Result of a bulk price submission: count of rows submitted, which may
/// exceed the rows actually committed if the call failed partway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPrices {
    pub symbol: String,
    pub rows: usize,
}

/// Derived display row: raw close/volume annotated with the day-over-day
/// percent change against the chronological predecessor. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPricePoint {
    /// ISO calendar date (YYYY-MM-DD)
    pub date: String,
    pub close: f64,
    pub volume: i64,
    /// Null when the predecessor is missing, zero-valued or non-finite
    pub change_percent: Option<f64>,
}

/// Overview payload for PUT /api/stocks/{symbol}/overview. Absent fields
/// default to "N/A"; the symbol comes from the request path.
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewInput {
    #[serde(default = "not_available")]
    pub asset_type: String,
    #[serde(default = "not_available")]
    pub name: String,
    #[serde(default = "not_available")]
    pub description: String,
    #[serde(default = "not_available")]
    pub exchange: String,
    #[serde(default = "not_available")]
    pub sector: String,
    #[serde(default = "not_available")]
    pub industry: String,
    #[serde(default = "not_available")]
    pub market_capitalization: String,
}

fn not_available() -> String {
    "N/A".to_string()
}

/// Stored company overview as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyOverviewData {
    pub symbol: String,
    pub asset_type: String,
    pub name: String,
    pub description: String,
    pub exchange: String,
    pub sector: String,
    pub industry: String,
    pub market_capitalization: String,
}

impl From<company_overviews::Model> for CompanyOverviewData {
    fn from(row: company_overviews::Model) -> Self {
        Self {
            symbol: row.symbol,
            asset_type: row.asset_type,
            name: row.name,
            description: row.description,
            exchange: row.exchange,
            sector: row.sector,
            industry: row.industry,
            market_capitalization: row.market_capitalization,
        }
    }
}

/// Query parameters for the raw and historical price reads
#[derive(Debug, Clone, Deserialize)]
pub struct PriceWindowQuery {
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_row() -> PriceRowInput {
        PriceRowInput {
            date: Some("2024-03-01".to_string()),
            low: Some(187.5),
            high: Some(191.25),
            close: Some(190.1),
            volume: Some(52_000_000),
        }
    }

    #[test]
    fn test_validate_accepts_valid_row() {
        let row = valid_row().validate(0).unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(row.close, 190.1);
        assert_eq!(row.volume, 52_000_000);
    }

    #[test]
    fn test_validate_missing_date() {
        let mut row = valid_row();
        row.date = None;
        assert_eq!(row.validate(2).unwrap_err(), "row 2: missing date");
    }

    #[test]
    fn test_validate_malformed_date() {
        let mut row = valid_row();
        row.date = Some("03/01/2024".to_string());
        assert!(row.validate(0).unwrap_err().contains("invalid date"));
    }

    #[test]
    fn test_validate_missing_close() {
        let mut row = valid_row();
        row.close = None;
        assert_eq!(row.validate(1).unwrap_err(), "row 1: missing close");
    }

    #[test]
    fn test_validate_non_finite_low() {
        let mut row = valid_row();
        row.low = Some(f64::NAN);
        assert_eq!(
            row.validate(0).unwrap_err(),
            "row 0: low must be a finite number"
        );
    }

    #[test]
    fn test_validate_infinite_high() {
        let mut row = valid_row();
        row.high = Some(f64::INFINITY);
        assert!(row.validate(0).is_err());
    }

    #[test]
    fn test_validate_negative_volume() {
        let mut row = valid_row();
        row.volume = Some(-1);
        assert_eq!(
            row.validate(0).unwrap_err(),
            "row 0: volume cannot be negative"
        );
    }

    #[test]
    fn test_validate_missing_volume() {
        let mut row = valid_row();
        row.volume = None;
        assert_eq!(row.validate(0).unwrap_err(), "row 0: missing volume");
    }

    #[test]
    fn test_batch_validate_empty() {
        let request = SubmitPricesRequest { prices: vec![] };
        assert_eq!(
            request.validate().unwrap_err(),
            "prices array cannot be empty"
        );
    }

    #[test]
    fn test_batch_validate_reports_offending_row() {
        let mut bad = valid_row();
        bad.date = None;
        let request = SubmitPricesRequest {
            prices: vec![valid_row(), bad],
        };
        assert_eq!(request.validate().unwrap_err(), "row 1: missing date");
    }

    #[test]
    fn test_change_percent_serializes_null_when_absent() {
        let point = HistoricalPricePoint {
            date: "2024-03-01".to_string(),
            close: 190.1,
            volume: 52_000_000,
            change_percent: None,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"change_percent\":null"));
    }

    #[test]
    fn test_overview_input_defaults_to_na() {
        let input: OverviewInput = serde_json::from_str(r#"{"name":"Acme Corp"}"#).unwrap();
        assert_eq!(input.name, "Acme Corp");
        assert_eq!(input.asset_type, "N/A");
        assert_eq!(input.sector, "N/A");
        assert_eq!(input.market_capitalization, "N/A");
    }
}
