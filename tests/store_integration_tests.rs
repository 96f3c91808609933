//! Postgres-backed integration tests for the store layer.
//!
//! These exercise the real upsert/read paths end to end and need a running
//! database; run them with
//! `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

mod common;

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use finboard_backend::entities::invoices::InvoiceStatus;
use finboard_backend::entities::{customers, invoices, prelude::*};
use finboard_backend::models::stock::{NewDailyPrice, OverviewInput};
use finboard_backend::services::{
    customers as customer_queries, daily_prices, historical, invoices as invoice_queries,
    overviews, schema_guard,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn price(day: &str, close: f64, volume: i64) -> NewDailyPrice {
    NewDailyPrice {
        date: date(day),
        low: close - 1.5,
        high: close + 1.5,
        close,
        volume,
    }
}

fn overview(name: &str) -> OverviewInput {
    OverviewInput {
        asset_type: "Common Stock".to_string(),
        name: name.to_string(),
        description: "Integration test fixture".to_string(),
        exchange: "NASDAQ".to_string(),
        sector: "Technology".to_string(),
        industry: "Semiconductors".to_string(),
        market_capitalization: "1.0B".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Postgres (set TEST_DATABASE_URL)"]
async fn test_daily_price_upsert_overwrites_in_place() {
    let db = common::setup_test_db().await.unwrap();
    let symbol = common::unique_symbol("UPS");

    daily_prices::store_daily_prices(&db, &symbol, &[price("2024-03-01", 100.0, 1_000)])
        .await
        .unwrap();
    // second write for the same (symbol, date) must replace, not duplicate
    daily_prices::store_daily_prices(&db, &symbol, &[price("2024-03-01", 105.5, 2_000)])
        .await
        .unwrap();

    let rows = daily_prices::fetch_daily_prices(&db, &symbol, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].close, rust_decimal_macros::dec!(105.5));
    assert_eq!(rows[0].volume, 2_000);
}

#[tokio::test]
#[ignore = "requires Postgres (set TEST_DATABASE_URL)"]
async fn test_concurrent_overlapping_bulk_writes_converge_to_one_row_per_date() {
    let db = common::setup_test_db().await.unwrap();
    let symbol = common::unique_symbol("CON");

    let batch_a = vec![price("2024-03-01", 100.0, 1), price("2024-03-02", 101.0, 1)];
    let batch_b = vec![price("2024-03-01", 200.0, 2), price("2024-03-02", 201.0, 2)];

    let (a, b) = tokio::join!(
        daily_prices::store_daily_prices(&db, &symbol, &batch_a),
        daily_prices::store_daily_prices(&db, &symbol, &batch_b),
    );
    a.unwrap();
    b.unwrap();

    let rows = daily_prices::fetch_daily_prices(&db, &symbol, 10).await.unwrap();
    assert_eq!(rows.len(), 2, "overlapping dates must not duplicate");
    // last-write-wins: whichever batch landed second, each date holds a
    // complete row from a single batch
    for row in rows {
        let close = row.close.to_string();
        assert!(
            close.starts_with("10") || close.starts_with("20"),
            "unexpected close {}",
            close
        );
    }
}

#[tokio::test]
#[ignore = "requires Postgres (set TEST_DATABASE_URL)"]
async fn test_overview_absent_then_last_write_wins() {
    let db = common::setup_test_db().await.unwrap();
    let symbol = common::unique_symbol("OVW");

    let absent = overviews::fetch_company_overview(&db, &symbol).await.unwrap();
    assert!(absent.is_none());

    overviews::store_company_overview(&db, &symbol, &overview("First Name"))
        .await
        .unwrap();
    overviews::store_company_overview(&db, &symbol, &overview("Second Name"))
        .await
        .unwrap();

    let stored = overviews::fetch_company_overview(&db, &symbol)
        .await
        .unwrap()
        .expect("overview should exist after upsert");
    assert_eq!(stored.name, "Second Name");
}

#[tokio::test]
#[ignore = "requires Postgres (set TEST_DATABASE_URL)"]
async fn test_overview_symbol_normalization_round_trip() {
    let db = common::setup_test_db().await.unwrap();
    let symbol = common::unique_symbol("NRM");
    let padded = format!(" {} ", symbol.to_lowercase());

    let stored_symbol = overviews::store_company_overview(&db, &padded, &overview("Acme Corp"))
        .await
        .unwrap();
    assert_eq!(stored_symbol, symbol);

    let fetched = overviews::fetch_company_overview(&db, &symbol).await.unwrap();
    assert_eq!(fetched.unwrap().name, "Acme Corp");
}

#[tokio::test]
#[ignore = "requires Postgres (set TEST_DATABASE_URL)"]
async fn test_historical_change_percent_series() {
    let db = common::setup_test_db().await.unwrap();
    let symbol = common::unique_symbol("HST");

    // oldest -> newest closes: 99, 110, 100
    let rows = vec![
        price("2024-03-01", 99.0, 10),
        price("2024-03-02", 110.0, 20),
        price("2024-03-03", 100.0, 30),
    ];
    daily_prices::store_daily_prices(&db, &symbol, &rows).await.unwrap();

    let points = historical::fetch_historical_prices(&db, &symbol, 3).await.unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].date, "2024-03-03");

    let newest = points[0].change_percent.unwrap();
    assert!((newest - (-9.090909)).abs() < 1e-4);

    let middle = points[1].change_percent.unwrap();
    assert!((middle - 11.111111).abs() < 1e-4);

    assert_eq!(points[2].change_percent, None);
}

#[tokio::test]
#[ignore = "requires Postgres (set TEST_DATABASE_URL)"]
async fn test_invoice_pages_rounds_up_and_customer_without_invoices_is_zeroed() {
    let db = common::setup_test_db().await.unwrap();
    schema_guard::ensure_all(&db).await.unwrap();

    let marker = common::unique_symbol("pagination-fixture-");

    let with_invoices = customers::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("{} busy", marker)),
        email: Set(format!("busy@{}.example.com", marker)),
        image_url: Set("/customers/busy.png".to_string()),
    };
    let busy = Customers::insert(with_invoices).exec(&db).await.unwrap();

    let without_invoices = customers::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("{} idle", marker)),
        email: Set(format!("idle@{}.example.com", marker)),
        image_url: Set("/customers/idle.png".to_string()),
    };
    Customers::insert(without_invoices).exec(&db).await.unwrap();

    // 13 matching invoices at 6 per page -> 3 pages
    for i in 0..13 {
        let invoice = invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(busy.last_insert_id),
            amount: Set(1_000 + i),
            status: Set(if i % 2 == 0 {
                InvoiceStatus::Paid
            } else {
                InvoiceStatus::Pending
            }),
            date: Set(date("2024-01-15")),
        };
        Invoices::insert(invoice).exec(&db).await.unwrap();
    }

    let pages = invoice_queries::fetch_invoices_pages(&db, &marker).await.unwrap();
    assert_eq!(pages, 3);

    let customers_found = customer_queries::fetch_filtered_customers(&db, &marker)
        .await
        .unwrap();
    assert_eq!(customers_found.len(), 2);

    let idle = customers_found
        .iter()
        .find(|c| c.name.ends_with("idle"))
        .expect("zero-invoice customer should still appear");
    assert_eq!(idle.total_invoices, 0);
    assert_eq!(idle.total_pending, 0);
    assert_eq!(idle.total_paid, 0);

    let busy_row = customers_found
        .iter()
        .find(|c| c.name.ends_with("busy"))
        .unwrap();
    assert_eq!(busy_row.total_invoices, 13);
    assert!(busy_row.total_paid > 0);
    assert!(busy_row.total_pending > 0);

    // cleanup so re-runs keep page counts stable
    Invoices::delete_many()
        .filter(invoices::Column::CustomerId.eq(busy.last_insert_id))
        .exec(&db)
        .await
        .unwrap();
}
