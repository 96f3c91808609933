pub use super::company_overviews::Entity as CompanyOverviews;
pub use super::customers::Entity as Customers;
pub use super::invoices::Entity as Invoices;
pub use super::stocks::Entity as Stocks;
