//! Adapter configuration, populated from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use plm_oslc::ServiceUrls;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Runtime configuration for the adapter.
///
/// All fields are populated from environment variables with defaults, so
/// the adapter can be started with zero configuration.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `ADAPTER_BIND` | `0.0.0.0:5000` | TCP socket address to listen on |
/// | `ADAPTER_PUBLIC_BASE` | `http://{ADAPTER_BIND}` | Base of every URL the adapter emits |
/// | `ADAPTER_VOCAB_NS` | `{public_base}/ns/plm#` | Namespace of item-type classes |
/// | `SOURCE_BASE_API_URI` | `http://localhost/InnovatorServer` | PLM server; OData lives at `{uri}/server/odata/` |
/// | `SOURCE_TIMEOUT_SECS` | `30` | Per-request timeout for source calls |
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,

    /// Scheme, host and port clients use to reach the adapter, without a
    /// trailing slash. Example: `"https://plm.example.com"`.
    pub public_base: String,

    pub vocab_ns: String,

    pub source_base_api_uri: String,

    pub source_timeout: Duration,
}

impl AdapterConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Populate config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("ADAPTER_BIND").unwrap_or_else(|| "0.0.0.0:5000".into());
        let bind_addr: SocketAddr = bind.parse().map_err(|_| ConfigError::Invalid {
            name: "ADAPTER_BIND",
            expected: "a socket address (e.g. 0.0.0.0:5000)",
            value: bind.clone(),
        })?;

        let public_base = lookup("ADAPTER_PUBLIC_BASE")
            .unwrap_or_else(|| format!("http://{bind_addr}"))
            .trim_end_matches('/')
            .to_string();

        let vocab_ns = lookup("ADAPTER_VOCAB_NS").unwrap_or_else(|| format!("{public_base}/ns/plm#"));

        let source_base_api_uri = lookup("SOURCE_BASE_API_URI")
            .unwrap_or_else(|| "http://localhost/InnovatorServer".into());

        let source_timeout = match lookup("SOURCE_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    name: "SOURCE_TIMEOUT_SECS",
                    expected: "a positive number of seconds",
                    value: v,
                })?,
            None => Duration::from_secs(30),
        };

        Ok(Self {
            bind_addr,
            public_base,
            vocab_ns,
            source_base_api_uri,
            source_timeout,
        })
    }

    /// The service root every produced URL hangs off: `{public_base}/api/oslc`.
    pub fn service_urls(&self) -> ServiceUrls {
        ServiceUrls::new(format!("{}/api/oslc", self.public_base), self.vocab_ns.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AdapterConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AdapterConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.bind_addr.to_string(), "0.0.0.0:5000");
        assert_eq!(c.public_base, "http://0.0.0.0:5000");
        assert_eq!(c.vocab_ns, "http://0.0.0.0:5000/ns/plm#");
        assert_eq!(c.source_base_api_uri, "http://localhost/InnovatorServer");
        assert_eq!(c.source_timeout, Duration::from_secs(30));
        assert_eq!(c.service_urls().service_provider(), "http://0.0.0.0:5000/api/oslc");
    }

    #[test]
    fn public_base_drives_urls() {
        let c = config(&[("ADAPTER_PUBLIC_BASE", "https://plm.example.com/")]).unwrap();
        assert_eq!(c.vocab_ns, "https://plm.example.com/ns/plm#");
        assert_eq!(
            c.service_urls().query_base(&plm_oslc::ItemTypeName::from_source("Part")),
            "https://plm.example.com/api/oslc/Part"
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config(&[("ADAPTER_BIND", "nope")]).is_err());
        assert!(config(&[("SOURCE_TIMEOUT_SECS", "0")]).is_err());
        assert!(config(&[("SOURCE_TIMEOUT_SECS", "soon")]).is_err());
    }
}
