#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rust_decimal::Decimal;
use shiprevenue::config::ConnectionDescriptor;
use shiprevenue::source::{Column, Connection, Connector, ResultSet, Value};
use shiprevenue::viewer::Viewer;
use shiprevenue::{Error, OrderLineRow, Result, Settings};

pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn settings() -> Settings {
    Settings {
        username: "report".to_string(),
        password: "secret".to_string(),
    }
}

pub fn order_lines(rows: &[(Decimal, i64, f64, &str)]) -> ResultSet {
    let columns = vec![
        Column::new("UnitPrice", "DECIMAL"),
        Column::new("Quantity", "SMALLINT"),
        Column::new("Discount", "DOUBLE"),
        Column::new("ShipCountry", "VARCHAR"),
    ];
    let rows = rows
        .iter()
        .map(|(price, quantity, discount, country)| {
            vec![
                Value::Decimal(*price),
                Value::Int(*quantity),
                Value::Float(*discount),
                Value::Text(country.to_string()),
            ]
        })
        .collect();
    ResultSet::new(columns, rows)
}

pub fn row(price: Decimal, quantity: i64, discount: Decimal, country: &str) -> OrderLineRow {
    OrderLineRow::new(price, quantity, discount, country)
}

#[derive(Default)]
pub struct FakeConnector {
    pub result: ResultSet,
    pub refuse_connect: bool,
    pub reject_catalog: bool,
    pub reject_query: bool,
    pub log: CallLog,
}

pub struct FakeConnection {
    result: ResultSet,
    reject_catalog: bool,
    reject_query: bool,
    log: CallLog,
}

impl Connector for FakeConnector {
    type Conn = FakeConnection;

    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<FakeConnection> {
        self.log.borrow_mut().push(format!("connect {}", descriptor.username));
        if self.refuse_connect {
            let e = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
            return Err(Error::connection(descriptor.server.clone(), e));
        }
        Ok(FakeConnection {
            result: self.result.clone(),
            reject_catalog: self.reject_catalog,
            reject_query: self.reject_query,
            log: self.log.clone(),
        })
    }
}

impl Connection for FakeConnection {
    fn execute(&mut self, sql: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("execute {}", sql));
        if self.reject_catalog && sql.starts_with("USE ") {
            return Err(Error::query(sql, "Unknown database 'northwind'"));
        }
        Ok(())
    }

    fn fetch_all(&mut self, sql: &str) -> Result<ResultSet> {
        self.log.borrow_mut().push("fetch".to_string());
        if self.reject_query {
            return Err(Error::query(sql, "Table 'northwind.OrderDetails' doesn't exist"));
        }
        Ok(self.result.clone())
    }

    fn close(self) -> Result<()> {
        self.log.borrow_mut().push("close".to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingViewer {
    pub shown: RefCell<Vec<String>>,
}

impl Viewer for RecordingViewer {
    fn show(&self, svg: &str) -> Result<()> {
        self.shown.borrow_mut().push(svg.to_string());
        Ok(())
    }
}

pub struct BrokenViewer;

impl Viewer for BrokenViewer {
    fn show(&self, _svg: &str) -> Result<()> {
        Err(Error::Render("no display available".to_string()))
    }
}
