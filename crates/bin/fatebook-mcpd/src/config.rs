use clap::{Parser, builder::BoolishValueParser};
use fatebook_core::client::{ApiKey, ClientConfig};
use fatebook_mcp::server::DEFAULT_MCP_HTTP_ADDR;
use fatebook_store::schema::DEFAULT_BASE_URL;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "fatebook-mcpd", version, about = "Fatebook MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "FATEBOOK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "FATEBOOK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(
        long,
        env = "FATEBOOK_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "FATEBOOK_ENABLE_STDIO",
        default_value_t = true,
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "FATEBOOK_MCP_SERVE",
        default_value_t = false,
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "FATEBOOK_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone, Debug)]
pub struct FatebookConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub timeout: Duration,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
    NoTransportEnabled,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::NoTransportEnabled => write!(
                f,
                "no transport enabled: set FATEBOOK_ENABLE_STDIO or FATEBOOK_MCP_SERVE"
            ),
        }
    }
}

impl Error for ConfigError {}

impl FatebookConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_timeout(self.timeout)
    }
}

impl TryFrom<CliArgs> for FatebookConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let api_key = args
            .api_key
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingSetting("FATEBOOK_API_KEY"))?;
        let api_key =
            ApiKey::new(api_key).map_err(|_| ConfigError::MissingSetting("FATEBOOK_API_KEY"))?;

        let base_url = args.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidSetting {
                name: "FATEBOOK_BASE_URL",
                value: args.base_url,
            });
        }

        if args.timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "FATEBOOK_TIMEOUT_SECS",
                value: args.timeout_secs.to_string(),
            });
        }

        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::NoTransportEnabled);
        }

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(args.timeout_secs),
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}
