//! Acceptance-run settings gathered from the environment.
//!
//! Live acceptance runs need the console endpoint and an API key. Both
//! come from `KALEIDO_API` and `KALEIDO_API_KEY`; gathering them doubles
//! as the pre-check, since a missing credential should abort a run before
//! anything is applied.

use figment::{Figment, providers::Env};
use serde::Deserialize;

use crate::error::HarnessError;

/// Credentials and endpoint for a live acceptance run.
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessSettings {
    /// Console API base URL, e.g. `https://console.kaleido.io/api/v1`.
    pub api: String,
    /// Bearer API key.
    pub api_key: String,
}

impl HarnessSettings {
    /// Gathers settings from `KALEIDO_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Settings`] when either variable is absent
    /// or fails to deserialize.
    pub fn from_env() -> Result<Self, HarnessError> {
        Figment::new()
            .merge(Env::prefixed("KALEIDO_"))
            .extract()
            .map_err(|e| HarnessError::Settings(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::HarnessSettings;
    use crate::error::HarnessError;

    #[test]
    fn gathers_endpoint_and_key_from_the_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("KALEIDO_API", "https://console.kaleido.io/api/v1");
            jail.set_env("KALEIDO_API_KEY", "secret");
            let settings = HarnessSettings::from_env().map_err(|e| e.to_string())?;
            assert_eq!(settings.api, "https://console.kaleido.io/api/v1");
            assert_eq!(settings.api_key, "secret");
            Ok(())
        });
    }

    #[test]
    fn missing_credentials_fail_the_pre_check() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("KALEIDO_API", "https://console.kaleido.io/api/v1");
            let err = HarnessSettings::from_env().expect_err("api key absent");
            assert!(matches!(err, HarnessError::Settings(_)), "got {err:?}");
            Ok(())
        });
    }
}
