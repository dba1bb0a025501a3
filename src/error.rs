use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to connect to {server}: {source}")]
    Connection {
        server: String,
        #[source]
        source: BoxError,
    },

    #[error("statement rejected: {sql}: {source}")]
    Query {
        sql: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to decode row[{row}]: {reason}")]
    Decode { row: usize, reason: String },

    #[error("failed to render chart: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn connection(server: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Connection {
            server: server.into(),
            source: source.into(),
        }
    }

    pub fn query(sql: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Query {
            sql: sql.into(),
            source: source.into(),
        }
    }
}

impl From<figment::Error> for Error {
    fn from(e: figment::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
