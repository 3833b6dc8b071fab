use std::time::Duration;

use clap::Parser;

use oauthgate_core::{RetryPolicy, UpstreamClientConfig};
use oauthgate_provider_core::{
    ANTIGRAVITY_VERSION_ENV, DEFAULT_ANTIGRAVITY_VERSION, ProviderSettings,
};
use oauthgate_router::ScopeMode;

#[derive(Parser, Debug)]
#[command(name = "oauthgate", version, about = "Per-request OAuth credential gateway")]
pub(crate) struct Cli {
    #[arg(long, env = "OAUTHGATE_HOST", default_value = "127.0.0.1")]
    pub(crate) host: String,
    #[arg(long, env = "OAUTHGATE_PORT", default_value_t = 9621)]
    pub(crate) port: u16,
    /// Outbound proxy for upstream calls.
    #[arg(long, env = "OAUTHGATE_PROXY")]
    pub(crate) proxy: Option<String>,
    #[arg(long, env = ANTIGRAVITY_VERSION_ENV, default_value = DEFAULT_ANTIGRAVITY_VERSION)]
    pub(crate) antigravity_version: String,
    #[arg(long, env = "OAUTHGATE_MAX_RETRIES", default_value_t = 2)]
    pub(crate) max_retries: u32,
    #[arg(long, env = "OAUTHGATE_REQUEST_TIMEOUT_SECS", default_value_t = 180)]
    pub(crate) request_timeout_secs: u64,
    #[arg(long, env = "OAUTHGATE_CONNECT_TIMEOUT_SECS", default_value_t = 5)]
    pub(crate) connect_timeout_secs: u64,
    /// Also write per-request credentials into the process environment.
    /// Only safe when requests are not served concurrently.
    #[arg(long, env = "OAUTHGATE_ENV_INJECTION", default_value_t = false)]
    pub(crate) env_injection: bool,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("--{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("--antigravity-version must not be blank")]
    BlankVersion,
}

/// Everything the server needs, validated once at startup.
#[derive(Debug, Clone)]
pub(crate) struct GatewayConfig {
    pub(crate) bind: String,
    pub(crate) settings: ProviderSettings,
    pub(crate) policy: RetryPolicy,
    pub(crate) client: UpstreamClientConfig,
    pub(crate) mode: ScopeMode,
}

impl Cli {
    pub(crate) fn into_config(self) -> Result<GatewayConfig, ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("request-timeout-secs"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("connect-timeout-secs"));
        }
        let antigravity_version = self.antigravity_version.trim().to_string();
        if antigravity_version.is_empty() {
            return Err(ConfigError::BlankVersion);
        }
        let request_timeout = Duration::from_secs(self.request_timeout_secs);

        Ok(GatewayConfig {
            bind: format!("{}:{}", self.host, self.port),
            settings: ProviderSettings {
                antigravity_version,
            },
            policy: RetryPolicy {
                max_retries: self.max_retries,
                request_timeout,
                ..RetryPolicy::default()
            },
            client: UpstreamClientConfig {
                proxy: self.proxy.filter(|p| !p.trim().is_empty()),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout,
            },
            mode: if self.env_injection {
                ScopeMode::SharedEnv
            } else {
                ScopeMode::ScopedOnly
            },
        })
    }
}
