use rust_decimal::Decimal;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column as _, ConnectOptions, Connection as _, Executor, Row, TypeInfo, ValueRef};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::config::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::source::{Column, Connection, Connector, ResultSet, Value};

/// Opens MySQL sessions. Each session drives its socket on a private
/// current-thread runtime, so callers stay synchronous.
#[derive(Clone, Copy, Debug, Default)]
pub struct MySqlConnector;

pub struct MySqlSession {
    server: String,
    runtime: Runtime,
    conn: MySqlConnection,
}

impl Connector for MySqlConnector {
    type Conn = MySqlSession;

    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<MySqlSession> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let options = MySqlConnectOptions::new()
            .host(&descriptor.server)
            .username(&descriptor.username)
            .password(&descriptor.password);

        info!(driver = %descriptor.driver, server = %descriptor.server, user = %descriptor.username, "connecting");
        let conn = runtime
            .block_on(options.connect())
            .map_err(|e| Error::connection(descriptor.server.clone(), e))?;

        Ok(MySqlSession {
            server: descriptor.server.clone(),
            runtime,
            conn,
        })
    }
}

impl Connection for MySqlSession {
    fn execute(&mut self, sql: &str) -> Result<()> {
        let conn = &mut self.conn;
        let done = self
            .runtime
            .block_on(conn.execute(sql))
            .map_err(|e| Error::query(sql.trim(), e))?;
        debug!("executed `{}`, rows affected: {}", sql.trim(), done.rows_affected());
        Ok(())
    }

    fn fetch_all(&mut self, sql: &str) -> Result<ResultSet> {
        let conn = &mut self.conn;
        let rows = self
            .runtime
            .block_on(conn.fetch_all(sql))
            .map_err(|e| Error::query(sql.trim(), e))?;

        let columns = match rows.first() {
            Some(row) => row
                .columns()
                .iter()
                .map(|c| Column::new(c.name(), c.type_info().name()))
                .collect(),
            None => vec![],
        };

        let mut data = Vec::with_capacity(rows.len());
        for (num, row) in rows.iter().enumerate() {
            let mut values = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                let value = decode_cell(row, idx).map_err(|e| Error::Decode {
                    row: num,
                    reason: format!("column `{}`: {}", columns[idx].name, e),
                })?;
                values.push(value);
            }
            data.push(values);
        }
        Ok(ResultSet::new(columns, data))
    }

    fn close(self) -> Result<()> {
        let MySqlSession {
            server,
            runtime,
            conn,
        } = self;
        runtime
            .block_on(conn.close())
            .map_err(|e| Error::connection(server.clone(), e))?;
        info!(server = %server, "connection closed");
        Ok(())
    }
}

fn decode_cell(row: &MySqlRow, idx: usize) -> std::result::Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_ascii_uppercase();

    let value = match type_name.as_str() {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "BOOLEAN" => {
            Value::Int(row.try_get::<i64, _>(idx)?)
        }
        t if t.ends_with(" UNSIGNED") => {
            let v = row.try_get::<u64, _>(idx)?;
            let v = i64::try_from(v).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            Value::Int(v)
        }
        "DECIMAL" => Value::Decimal(row.try_get::<Decimal, _>(idx)?),
        "FLOAT" => Value::Float(f64::from(row.try_get::<f32, _>(idx)?)),
        "DOUBLE" => Value::Float(row.try_get::<f64, _>(idx)?),
        _ => Value::Text(row.try_get::<String, _>(idx)?),
    };
    Ok(value)
}
