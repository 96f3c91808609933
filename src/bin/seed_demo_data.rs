// src/bin/seed_demo_data.rs
//
// Seed demo customers, invoices, company overviews and daily prices so a
// fresh database has something to show. Rows already present are skipped
// (customers/invoices) or overwritten in place (overviews/prices).

use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{Database, EntityTrait, Set};
use uuid::Uuid;

use finboard_backend::entities::invoices::InvoiceStatus;
use finboard_backend::entities::{customers, invoices, prelude::*};
use finboard_backend::models::stock::{NewDailyPrice, OverviewInput};
use finboard_backend::services::{daily_prices, overviews, schema_guard};

struct DemoCustomer {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    image_url: &'static str,
}

struct DemoInvoice {
    customer_id: &'static str,
    amount: i32,
    status: InvoiceStatus,
    date: &'static str,
}

const CUSTOMERS: &[DemoCustomer] = &[
    DemoCustomer {
        id: "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
        name: "Evil Rabbit",
        email: "evil@rabbit.com",
        image_url: "/customers/evil-rabbit.png",
    },
    DemoCustomer {
        id: "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        name: "Delba de Oliveira",
        email: "delba@oliveira.com",
        image_url: "/customers/delba-de-oliveira.png",
    },
    DemoCustomer {
        id: "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        name: "Lee Robinson",
        email: "lee@robinson.com",
        image_url: "/customers/lee-robinson.png",
    },
    DemoCustomer {
        id: "76d65c26-f784-44a2-ac19-586678f7c2f2",
        name: "Michael Novotny",
        email: "michael@novotny.com",
        image_url: "/customers/michael-novotny.png",
    },
    DemoCustomer {
        id: "cc27c14a-0acf-4f4a-a6c9-d45682c144b9",
        name: "Amy Burns",
        email: "amy@burns.com",
        image_url: "/customers/amy-burns.png",
    },
    DemoCustomer {
        id: "13d07535-c59e-4157-a011-f8d2ef4e0cbb",
        name: "Balazs Orban",
        email: "balazs@orban.com",
        image_url: "/customers/balazs-orban.png",
    },
];

const INVOICES: &[DemoInvoice] = &[
    DemoInvoice {
        customer_id: "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
        amount: 15795,
        status: InvoiceStatus::Pending,
        date: "2022-12-06",
    },
    DemoInvoice {
        customer_id: "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        amount: 20348,
        status: InvoiceStatus::Pending,
        date: "2022-11-14",
    },
    DemoInvoice {
        customer_id: "cc27c14a-0acf-4f4a-a6c9-d45682c144b9",
        amount: 3040,
        status: InvoiceStatus::Paid,
        date: "2022-10-29",
    },
    DemoInvoice {
        customer_id: "76d65c26-f784-44a2-ac19-586678f7c2f2",
        amount: 44800,
        status: InvoiceStatus::Paid,
        date: "2023-09-10",
    },
    DemoInvoice {
        customer_id: "13d07535-c59e-4157-a011-f8d2ef4e0cbb",
        amount: 34577,
        status: InvoiceStatus::Pending,
        date: "2023-08-05",
    },
    DemoInvoice {
        customer_id: "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        amount: 54246,
        status: InvoiceStatus::Pending,
        date: "2023-07-16",
    },
    DemoInvoice {
        customer_id: "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
        amount: 666,
        status: InvoiceStatus::Pending,
        date: "2023-06-27",
    },
    DemoInvoice {
        customer_id: "76d65c26-f784-44a2-ac19-586678f7c2f2",
        amount: 32545,
        status: InvoiceStatus::Paid,
        date: "2023-06-09",
    },
    DemoInvoice {
        customer_id: "cc27c14a-0acf-4f4a-a6c9-d45682c144b9",
        amount: 1250,
        status: InvoiceStatus::Paid,
        date: "2023-06-17",
    },
    DemoInvoice {
        customer_id: "13d07535-c59e-4157-a011-f8d2ef4e0cbb",
        amount: 8546,
        status: InvoiceStatus::Paid,
        date: "2023-06-07",
    },
    DemoInvoice {
        customer_id: "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        amount: 500,
        status: InvoiceStatus::Paid,
        date: "2023-08-19",
    },
    DemoInvoice {
        customer_id: "13d07535-c59e-4157-a011-f8d2ef4e0cbb",
        amount: 8945,
        status: InvoiceStatus::Paid,
        date: "2023-06-03",
    },
    DemoInvoice {
        customer_id: "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        amount: 1000,
        status: InvoiceStatus::Paid,
        date: "2022-06-05",
    },
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = finboard_backend::config::database_url()?;
    let db = Database::connect(&database_url).await?;

    println!("Ensuring schema...");
    schema_guard::ensure_all(&db).await?;

    let mut imported = 0;
    let mut skipped = 0;

    for customer in CUSTOMERS {
        let model = customers::ActiveModel {
            id: Set(Uuid::parse_str(customer.id)?),
            name: Set(customer.name.to_string()),
            email: Set(customer.email.to_string()),
            image_url: Set(customer.image_url.to_string()),
        };

        let result = Customers::insert(model)
            .on_conflict(
                OnConflict::column(customers::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&db)
            .await?;

        if result == 0 {
            skipped += 1;
        } else {
            imported += 1;
        }
    }
    println!("Customers: {} inserted, {} already present", imported, skipped);

    let mut imported = 0;
    let mut skipped = 0;

    // Demo invoices are identified by (customer, amount, date); re-runs
    // would otherwise duplicate them since real ids are random.
    let existing_invoices = Invoices::find().all(&db).await?;

    for invoice in INVOICES {
        let customer_id = Uuid::parse_str(invoice.customer_id)?;
        let date = NaiveDate::parse_from_str(invoice.date, "%Y-%m-%d")?;

        let existing = existing_invoices.iter().any(|row| {
            row.customer_id == customer_id && row.amount == invoice.amount && row.date == date
        });

        if existing {
            skipped += 1;
            continue;
        }

        let model = invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer_id),
            amount: Set(invoice.amount),
            status: Set(invoice.status.clone()),
            date: Set(date),
        };
        Invoices::insert(model).exec_without_returning(&db).await?;
        imported += 1;
    }
    println!("Invoices: {} inserted, {} already present", imported, skipped);

    // Stock demo data goes through the stores so re-runs overwrite in place
    let overview = OverviewInput {
        asset_type: "Common Stock".to_string(),
        name: "Advanced Micro Devices Inc".to_string(),
        description: "Semiconductor company developing CPUs, GPUs and adaptive SoCs.".to_string(),
        exchange: "NASDAQ".to_string(),
        sector: "Technology".to_string(),
        industry: "Semiconductors".to_string(),
        market_capitalization: "268.5B".to_string(),
    };
    let symbol = overviews::store_company_overview(&db, "AMD", &overview).await?;
    println!("Overview stored for {}", symbol);

    let prices: Vec<NewDailyPrice> = [
        ("2024-02-26", 172.42, 178.91, 176.52, 61_202_100),
        ("2024-02-27", 174.62, 181.20, 180.10, 66_204_400),
        ("2024-02-28", 176.59, 180.25, 176.74, 56_827_900),
        ("2024-02-29", 176.02, 184.91, 180.49, 76_202_000),
        ("2024-03-01", 180.51, 192.92, 192.53, 95_021_900),
    ]
    .into_iter()
    .map(|(date, low, high, close, volume)| NewDailyPrice {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid demo date"),
        low,
        high,
        close,
        volume,
    })
    .collect();

    let stored = daily_prices::store_daily_prices(&db, &symbol, &prices).await?;
    println!("Daily prices stored for {}: {} rows", stored.symbol, stored.rows);

    Ok(())
}
