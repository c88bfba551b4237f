use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "barcodes.toml";
const ENV_PREFIX: &str = "BARCODES";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const DEFAULT_URLS: &[&str] = &[
    "https://www.paguemenos.com.br/inalador-nebulizador-pague-menos-portatil-ultrassonico-mesh-nb1100/p?skuId=100141&srsltid=AfmBOoqwD9v54eYWCbhMpUEnaSxrWk4BaWeWr0BGIhmNLysout0mVbdM5mI",
];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("no URLs configured")]
    NoUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub urls: Vec<String>,
    pub user_agent: String,
    /// Per-request timeout. Unset means the request may block indefinitely.
    pub timeout_secs: Option<u64>,
    pub output: OutputSettings,
    pub selectors: SelectorSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub text_path: PathBuf,
    pub xlsx_path: PathBuf,
}

/// CSS selectors for the storefront markup. The price has two generations of
/// markup; `price_container` is tried before `selling_price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorSettings {
    pub product_name: String,
    pub price_container: String,
    pub price_integer: String,
    pub price_fraction: String,
    pub selling_price: String,
    pub currency_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            urls: DEFAULT_URLS.iter().map(|u| u.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            output: OutputSettings::default(),
            selectors: SelectorSettings::default(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            text_path: PathBuf::from("barcodes.txt"),
            xlsx_path: PathBuf::from("barcodes.xlsx"),
        }
    }
}

impl Default for SelectorSettings {
    fn default() -> Self {
        SelectorSettings {
            product_name: "h1.vtex-store-components-3-x-productNameContainer".to_string(),
            price_container: ".vtex-product-price-1-x-sellingPriceValue".to_string(),
            price_integer: ".vtex-product-price-1-x-currencyInteger".to_string(),
            price_fraction: ".vtex-product-price-1-x-currencyFraction".to_string(),
            selling_price: ".skuBestPrice".to_string(),
            currency_prefix: "R$".to_string(),
        }
    }
}

/// `BARCODES_OUTPUT__TEXT_PATH=...` for nested keys; `BARCODES_URLS=a,b` for the URL list.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("urls")
}

impl Settings {
    /// Defaults, then the TOML file (explicit path or `barcodes.toml` if present),
    /// then `BARCODES_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.urls.is_empty() {
            return Err(SettingsError::NoUrls);
        }
        Ok(self)
    }
}
