use rust_decimal::Decimal;

use crate::country::Country;

/// One line item joined with the ship country of its order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderLineRow {
    pub unit_price: Decimal,
    pub quantity: i64,
    /// Fraction in `[0, 1]`.
    pub discount: Decimal,
    pub ship_country: Country,
}

impl OrderLineRow {
    pub fn new(
        unit_price: Decimal,
        quantity: i64,
        discount: Decimal,
        ship_country: impl Into<Country>,
    ) -> Self {
        OrderLineRow {
            unit_price,
            quantity,
            discount,
            ship_country: ship_country.into(),
        }
    }

    /// `unit_price * quantity * (1 - discount)`, unrounded.
    pub fn total_sale(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity) * (Decimal::ONE - self.discount)
    }
}

/// An `OrderLineRow` carrying its derived sale amount. The amount can only be
/// produced from the row itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaleRow {
    row: OrderLineRow,
    total_sale: Decimal,
}

impl SaleRow {
    pub fn row(&self) -> &OrderLineRow {
        &self.row
    }

    pub fn ship_country(&self) -> &Country {
        &self.row.ship_country
    }

    pub fn total_sale(&self) -> Decimal {
        self.total_sale
    }
}

impl From<OrderLineRow> for SaleRow {
    fn from(row: OrderLineRow) -> Self {
        let total_sale = row.total_sale();
        SaleRow { row, total_sale }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CountryRevenue {
    pub country: Country,
    pub revenue: Decimal,
}
