use crate::{Connection, Error, Result};

use url::Url;

/// Opens a connection to the database named by a URL, dispatching on its
/// scheme.
#[derive(Debug)]
pub struct Connect {
    url: Url,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn connect(&self) -> Result<Box<dyn Connection>> {
        match self.url.scheme() {
            "sqlite" => connect_sqlite(&self.url),
            scheme => Err(Error::invalid_connection_url(format!(
                "unsupported database; scheme={scheme}; url={}",
                self.url
            ))),
        }
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &Url) -> Result<Box<dyn Connection>> {
    let driver = marquee_driver_sqlite::Sqlite::new(url.as_str())?;
    Ok(Box::new(driver.connect()?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &Url) -> Result<Box<dyn Connection>> {
    Err(Error::invalid_connection_url("`sqlite` feature not enabled"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_scheme() {
        let err = Connect::new("postgresql://localhost/movies")
            .unwrap()
            .connect()
            .unwrap_err();

        assert!(err.is_invalid_connection_url());
        assert!(err.to_string().contains("scheme=postgresql"));
    }

    #[test]
    fn unparsable_url() {
        let err = Connect::new("movies.db").unwrap_err();
        assert!(err.is_invalid_connection_url());
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn sqlite_in_memory() {
        let connect = Connect::new("sqlite::memory:").unwrap();
        assert_eq!(connect.url(), "sqlite::memory:");
        assert!(connect.connect().is_ok());
    }
}
