use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use tracing::info;

use crate::config::SERVER;
use crate::error::{Error, Result};
use crate::models::OrderLineRow;
use crate::source::{Connection, ResultSet, Value};

pub const ORDER_LINES_SQL: &str = "
SELECT OrderDetails.UnitPrice, OrderDetails.Quantity, OrderDetails.Discount, Orders.ShipCountry
FROM OrderDetails
JOIN Orders ON OrderDetails.OrderID = Orders.OrderID
ORDER BY ShipCountry;
";

const UNIT_PRICE: &str = "UnitPrice";
const QUANTITY: &str = "Quantity";
const DISCOUNT: &str = "Discount";
const SHIP_COUNTRY: &str = "ShipCountry";

/// Scopes the session to `catalog`. A rejected selection is a connection failure.
pub fn use_catalog<C: Connection>(conn: &mut C, catalog: &str) -> Result<()> {
    conn.execute(&format!("USE {};", catalog))
        .map_err(|e| match e {
            Error::Query { source, .. } => Error::connection(SERVER, source),
            other => other,
        })?;
    info!(catalog, "catalog selected");
    Ok(())
}

/// Runs the line-item query and materializes every row.
pub fn fetch_order_lines<C: Connection>(conn: &mut C) -> Result<Vec<OrderLineRow>> {
    let result = conn.fetch_all(ORDER_LINES_SQL)?;
    let rows = order_lines(&result)?;
    info!(rows = rows.len(), "order lines fetched");
    Ok(rows)
}

pub fn order_lines(result: &ResultSet) -> Result<Vec<OrderLineRow>> {
    if result.is_empty() {
        return Ok(vec![]);
    }
    let unit_price = required_column(result, UNIT_PRICE)?;
    let quantity = required_column(result, QUANTITY)?;
    let discount = required_column(result, DISCOUNT)?;
    let ship_country = required_column(result, SHIP_COUNTRY)?;

    let mut ret = Vec::with_capacity(result.len());
    for (num, values) in result.rows.iter().enumerate() {
        let field = |idx: usize| {
            values.get(idx).ok_or_else(|| Error::Decode {
                row: num,
                reason: format!("expected {} values, got {}", result.columns.len(), values.len()),
            })
        };
        let row = OrderLineRow::new(
            decimal_field(field(unit_price)?).map_err(|r| decode_error(num, UNIT_PRICE, r))?,
            int_field(field(quantity)?).map_err(|r| decode_error(num, QUANTITY, r))?,
            decimal_field(field(discount)?).map_err(|r| decode_error(num, DISCOUNT, r))?,
            text_field(field(ship_country)?).map_err(|r| decode_error(num, SHIP_COUNTRY, r))?,
        );
        ret.push(row);
    }
    Ok(ret)
}

fn required_column(result: &ResultSet, name: &str) -> Result<usize> {
    result.column_index(name).ok_or_else(|| Error::Decode {
        row: 0,
        reason: format!("missing column `{}`", name),
    })
}

fn decode_error(row: usize, column: &str, reason: String) -> Error {
    Error::Decode {
        row,
        reason: format!("column `{}`: {}", column, reason),
    }
}

fn decimal_field(value: &Value) -> std::result::Result<Decimal, String> {
    match value {
        Value::Decimal(d) => Ok(*d),
        Value::Int(i) => Ok(Decimal::from(*i)),
        Value::Float(f) => Decimal::from_f64(*f).ok_or_else(|| format!("{} is not representable", f)),
        Value::Text(s) => Decimal::from_str(s.trim()).map_err(|e| format!("{:?}: {}", s, e)),
        Value::Null => Err("unexpected NULL".to_string()),
    }
}

fn int_field(value: &Value) -> std::result::Result<i64, String> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Decimal(d) if d.fract().is_zero() => {
            d.to_i64().ok_or_else(|| format!("{} out of range", d))
        }
        Value::Null => Err("unexpected NULL".to_string()),
        other => Err(format!("expected an integer, got {}", other)),
    }
}

fn text_field(value: &Value) -> std::result::Result<String, String> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Null => Err("unexpected NULL".to_string()),
        other => Err(format!("expected text, got {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Column;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("UnitPrice", "DECIMAL"),
            Column::new("Quantity", "SMALLINT"),
            Column::new("Discount", "DOUBLE"),
            Column::new("ShipCountry", "VARCHAR"),
        ]
    }

    #[test]
    fn test_float_discount_keeps_shortest_form() {
        let result = ResultSet::new(
            columns(),
            vec![vec![
                Value::Decimal(Decimal::new(1440, 2)),
                Value::Int(12),
                Value::Float(0.15),
                Value::Text("Germany".into()),
            ]],
        );
        let rows = order_lines(&result).unwrap();
        assert_eq!(rows[0].discount, Decimal::new(15, 2));
        assert_eq!(rows[0].quantity, 12);
        assert_eq!(rows[0].ship_country.as_str(), "Germany");
    }

    #[test]
    fn test_null_quantity_is_rejected() {
        let result = ResultSet::new(
            columns(),
            vec![vec![
                Value::Decimal(Decimal::ONE),
                Value::Null,
                Value::Float(0.0),
                Value::Text("Brazil".into()),
            ]],
        );
        let err = order_lines(&result).unwrap_err();
        assert!(matches!(err, Error::Decode { row: 0, .. }));
        assert!(err.to_string().contains("Quantity"));
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let mut cols = columns();
        cols.pop();
        let result = ResultSet::new(
            cols,
            vec![vec![Value::Decimal(Decimal::ONE), Value::Int(1), Value::Float(0.0)]],
        );
        let err = order_lines(&result).unwrap_err();
        assert!(err.to_string().contains("ShipCountry"));
    }

    #[test]
    fn test_empty_result_has_no_columns_to_check() {
        let rows = order_lines(&ResultSet::default()).unwrap();
        assert!(rows.is_empty());
    }
}
