pub mod aggregate;
pub mod chart;
pub mod config;
pub mod country;
pub mod error;
pub mod models;
pub mod mysql;
pub mod query;
pub mod report;
pub mod source;
pub mod viewer;

pub use aggregate::{CountryRevenueAggregate, RevenueTable};
pub use config::{ConnectionDescriptor, Settings};
pub use error::{Error, Result};
pub use models::{CountryRevenue, OrderLineRow};
pub use report::{run, ReportSummary};
