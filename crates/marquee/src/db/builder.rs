use super::{Connect, Db};
use crate::{Connection, Result, Serializer};

/// Environment variable holding the connection URL.
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Connection URL used when none is configured.
pub const DEFAULT_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone, Default)]
pub struct Builder {
    /// Connection URL, `DEFAULT_URL` when unset
    url: Option<String>,

    /// Terminate compiled statements with `;`
    terminate: bool,
}

impl Builder {
    /// Reads the connection URL from `DATABASE_URL`.
    pub fn from_env() -> Builder {
        Builder::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Builder {
        Builder {
            url: lookup(DATABASE_URL).filter(|url| !url.trim().is_empty()),
            ..Builder::default()
        }
    }

    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    /// Terminates every compiled statement with `;`.
    pub fn terminate_statements(&mut self, terminate: bool) -> &mut Self {
        self.terminate = terminate;
        self
    }

    /// The URL [`Builder::connect`] will open.
    pub fn connection_url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_URL)
    }

    pub fn connect(&self) -> Result<Db> {
        let url = self.connection_url();
        let connection = Connect::new(url)?.connect()?;
        tracing::debug!(url, "connected to database");
        self.build(connection)
    }

    /// Builds a handle around an already open connection.
    pub fn build(&self, connection: Box<dyn Connection>) -> Result<Db> {
        let serializer = if self.terminate {
            Serializer::new().terminated()
        } else {
            Serializer::new()
        };

        Ok(Db {
            connection,
            serializer,
        })
    }
}
