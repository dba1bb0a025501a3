use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::aggregate::RevenueTable;
use crate::chart;
use crate::config::{Settings, CATALOG};
use crate::error::Result;
use crate::query;
use crate::source::{Connection, Connector};
use crate::viewer::Viewer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportSummary {
    pub rows: usize,
    pub countries: usize,
    pub total: Decimal,
}

/// Connects, reports and disconnects. Once opened, the connection is closed
/// exactly once whatever the outcome; a stage error wins over a close error.
pub fn run<C, V>(settings: &Settings, connector: &C, viewer: &V) -> Result<ReportSummary>
where
    C: Connector,
    V: Viewer,
{
    let mut conn = connector.connect(&settings.descriptor())?;

    let outcome = report(&mut conn, viewer);
    match (outcome, conn.close()) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!("failed to close connection: {}", close_err);
            Err(e)
        }
    }
}

fn report<C, V>(conn: &mut C, viewer: &V) -> Result<ReportSummary>
where
    C: Connection,
    V: Viewer,
{
    query::use_catalog(conn, CATALOG)?;
    let table = RevenueTable::new(query::fetch_order_lines(conn)?);
    let aggregate = table.revenue_by_country();

    let summary = ReportSummary {
        rows: table.len(),
        countries: aggregate.len(),
        total: aggregate.total(),
    };
    info!(
        rows = summary.rows,
        countries = summary.countries,
        total = %summary.total,
        "revenue aggregated"
    );

    let svg = chart::render_svg(&aggregate)?;
    viewer.show(&svg)?;
    Ok(summary)
}
