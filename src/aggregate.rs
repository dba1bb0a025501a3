use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::country::Country;
use crate::models::{CountryRevenue, OrderLineRow, SaleRow};

/// Fetched rows with their derived sale amounts, in query order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevenueTable {
    rows: Vec<SaleRow>,
}

impl RevenueTable {
    pub fn new(rows: impl IntoIterator<Item = OrderLineRow>) -> Self {
        RevenueTable {
            rows: rows.into_iter().map(SaleRow::from).collect(),
        }
    }

    pub fn rows(&self) -> &[SaleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.rows.iter().map(SaleRow::total_sale).sum()
    }

    /// Sums sale amounts per ship country.
    ///
    /// Countries keep the position of their first row, so the output follows
    /// the query's `ORDER BY ShipCountry`. Equal revenues are never reordered.
    pub fn revenue_by_country(&self) -> CountryRevenueAggregate {
        let mut index: HashMap<&Country, usize> = HashMap::new();
        let mut entries: Vec<CountryRevenue> = vec![];
        for row in &self.rows {
            match index.get(row.ship_country()) {
                Some(&pos) => entries[pos].revenue += row.total_sale(),
                None => {
                    index.insert(row.ship_country(), entries.len());
                    entries.push(CountryRevenue {
                        country: row.ship_country().clone(),
                        revenue: row.total_sale(),
                    });
                }
            }
        }
        CountryRevenueAggregate { entries }
    }
}

/// Summed revenue per ship country, one entry per distinct country.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountryRevenueAggregate {
    entries: Vec<CountryRevenue>,
}

impl CountryRevenueAggregate {
    pub fn iter(&self) -> impl Iterator<Item = &CountryRevenue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, country: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.country.as_str() == country)
            .map(|e| e.revenue)
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.revenue).sum()
    }
}

impl<'a> IntoIterator for &'a CountryRevenueAggregate {
    type Item = &'a CountryRevenue;
    type IntoIter = std::slice::Iter<'a, CountryRevenue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
