// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::ServiceConfig;

/// Create a configured asynchronous HTTP client.
///
/// No timeout is applied unless the configuration sets one.
pub fn create_client(config: &ServiceConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_default() {
        assert!(create_client(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_create_client_with_timeout() {
        let config = ServiceConfig {
            timeout_secs: Some(5),
            ..ServiceConfig::default()
        };
        assert!(create_client(&config).is_ok());
    }
}
