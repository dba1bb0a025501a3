use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;

use crate::config::ConnectionDescriptor;
use crate::error::Result;

/// A single cell of a fetched row.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Decimal(Decimal),
    Float(f64),
    Text(String),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{:?}", v),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub type_name: String,
}

impl Column {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A fully materialized result: column metadata plus every row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        ResultSet { columns, rows }
    }

    /// Position of a column, compared case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub trait Connector {
    type Conn: Connection;

    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<Self::Conn>;
}

/// An open session. `close` consumes it, so a connection is closed at most once.
pub trait Connection {
    fn execute(&mut self, sql: &str) -> Result<()>;

    fn fetch_all(&mut self, sql: &str) -> Result<ResultSet>;

    fn close(self) -> Result<()>;
}
