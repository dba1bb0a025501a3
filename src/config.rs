use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const SERVER: &str = "localhost";
pub const CATALOG: &str = "northwind";
pub const ENV_FILE: &str = ".env";
const ENV_PREFIX: &str = "SQL_";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Driver {
    MySql,
}

impl Display for Driver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Driver::MySql => write!(f, "mysql"),
        }
    }
}

/// The env file shipped next to the crate manifest.
pub fn default_env_file() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(ENV_FILE)
}

/// Absent credentials stay empty; the server rejects them at connect time.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub username: String,
    pub password: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(default_env_file())
    }

    /// Layers `SQL_*` entries of the env file under the `SQL_*` variables of
    /// the process environment. A missing file is tolerated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_values = read_env_file(path)?;
        debug!("env file {} provided {} value(s)", path.display(), file_values.len());
        let settings = Figment::new()
            .merge(Serialized::defaults(file_values))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract::<Settings>()?;
        if settings.username.is_empty() || settings.password.is_empty() {
            warn!("SQL_USERNAME or SQL_PASSWORD is not set");
        }
        Ok(settings)
    }

    pub fn descriptor(&self) -> ConnectionDescriptor {
        ConnectionDescriptor {
            driver: Driver::MySql,
            server: SERVER.to_string(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl Debug for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn read_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("env file {} not found", path.display());
            return Ok(BTreeMap::new());
        }
        Err(e) => return Err(Error::Config(format!("{}: {}", path.display(), e))),
    };

    let mut values = BTreeMap::new();
    for item in iter {
        let (key, value) =
            item.map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        if let Some(name) = key.strip_prefix(ENV_PREFIX) {
            values.insert(name.to_ascii_lowercase(), value);
        }
    }
    Ok(values)
}

/// Everything needed to open the one database session of a run.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub driver: Driver,
    pub server: String,
    pub username: String,
    pub password: String,
}

impl Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("driver", &self.driver)
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_hides_password() {
        let settings = Settings {
            username: "report".into(),
            password: "hunter2".into(),
        };
        let descriptor = settings.descriptor();
        assert_eq!(descriptor.server, "localhost");
        assert_eq!(descriptor.driver.to_string(), "mysql");

        let s = format!("{:?} {:?}", settings, descriptor);
        assert!(!s.contains("hunter2"));
    }
}
