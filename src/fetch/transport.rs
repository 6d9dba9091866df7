// src/fetch/transport.rs
// =============================================================================
// Builds the one HTTP client shared by the page fetch and every download.
//
// All traffic goes through the SOCKS proxy from the config. With the
// "socks5h" scheme Tor resolves the hostname, which is the only way a
// .onion name can be reached at all.
// =============================================================================

use reqwest::{Client, Proxy};
use tracing::debug;

use crate::config::Config;
use crate::error::ScrapeError;

// Creates the HTTP client from the config
//
// reqwest::Client is reference counted internally, so the download tasks
// simply clone it.
pub fn build_client(config: &Config) -> Result<Client, ScrapeError> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(5));

    if let Some(proxy) = &config.proxy {
        debug!(proxy = %proxy, "Routing requests through proxy");
        builder = builder.proxy(Proxy::all(proxy.as_str())?);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tor_proxy_is_accepted() {
        assert!(build_client(&Config::default()).is_ok());
    }

    #[test]
    fn test_malformed_proxy_is_a_transport_error() {
        let config = Config {
            proxy: Some("::not a proxy::".to_string()),
            ..Config::default()
        };
        assert!(matches!(build_client(&config), Err(ScrapeError::Transport(_))));
    }
}
