use std::path::Path;

use url::Url;

use crate::errors::CustomError;

pub const DEFAULT_RPC_URL: &str = "https://archival-rpc.testnet.near.org/";
pub const DEFAULT_CONTRACT_ACCOUNT_ID: &str =
    "4bb5d093c0c0e1b4874c41216cdabc5ef1c81c5535b25788202f2a8ce145a7d7";
pub const DEFAULT_PRODUCER_ACCOUNT: &str = "prod_droplinked.testnet";
pub const DEFAULT_PUBLISHER_ACCOUNT: &str = "pub_droplinked.testnet";
pub const DEFAULT_CUSTOMER_ACCOUNT: &str = "cust_droplinked.testnet";

/// Environment variables overriding the settings, e.g. `DROPLINKED__NEAR__RPC_URL`.
pub const ENV_PREFIX: &str = "DROPLINKED";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NearSettings {
    pub rpc_url: Url,
    pub contract_account_id: String,
}

/// The three accounts whose state goes into a snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoleAccounts {
    pub producer: String,
    pub publisher: String,
    pub customer: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    pub near: NearSettings,
    pub accounts: RoleAccounts,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            near: NearSettings {
                rpc_url: Url::parse(DEFAULT_RPC_URL).expect("default RPC url is valid"),
                contract_account_id: DEFAULT_CONTRACT_ACCOUNT_ID.to_string(),
            },
            accounts: RoleAccounts {
                producer: DEFAULT_PRODUCER_ACCOUNT.to_string(),
                publisher: DEFAULT_PUBLISHER_ACCOUNT.to_string(),
                customer: DEFAULT_CUSTOMER_ACCOUNT.to_string(),
            },
        }
    }
}

impl Settings {
    /// Layers built-in defaults, the optional JSON file and the environment.
    pub fn init(file_path: Option<&Path>) -> Result<Settings, CustomError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Settings::default())?);

        if let Some(path) = file_path {
            if !path.exists() {
                return Err(CustomError::ConfigPathNotFound(path.display().to_string()));
            }
            builder = builder.add_source(
                config::File::from(path).format(config::FileFormat::Json),
            );
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
