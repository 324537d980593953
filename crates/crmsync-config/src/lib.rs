use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crmsync_core::normalize::{CallingCodes, LocalityTable, Normalizer};
use crmsync_core::{IndustryMatch, MergeEngine};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "crmsync";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_API_BASE: &str = "https://api.hubapi.com";
pub const DEFAULT_TOKEN_ENV: &str = "HUBSPOT_TOKEN";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// HubSpot caps both search pages and batch-create calls at 100 objects.
pub const MAX_PAGE_SIZE: u32 = 100;
pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub hubspot: HubSpotConfig,
    pub merge: MergeConfig,
    pub normalize: NormalizeConfig,
}

#[derive(Debug, Clone)]
pub struct HubSpotConfig {
    pub api_base: String,
    pub token_env: String,
    pub token: Option<String>,
    pub page_size: u32,
    pub batch_size: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MergeConfig {
    pub industry_match: IndustryMatch,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeConfig {
    pub localities: LocalityTable,
    pub calling_codes: CallingCodes,
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            token: None,
            page_size: MAX_PAGE_SIZE,
            batch_size: MAX_BATCH_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HubSpotConfig {
    /// The inline token wins over the environment variable.
    pub fn resolve_token(&self) -> Option<String> {
        if let Some(token) = self.token.as_ref() {
            return Some(token.clone());
        }
        env::var(&self.token_env)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

impl AppConfig {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(
            self.normalize.localities.clone(),
            self.normalize.calling_codes.clone(),
        )
    }

    pub fn merge_engine(&self) -> MergeEngine {
        MergeEngine::new(self.merge.industry_match)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid hubspot.api_base value: {0}")]
    InvalidApiBase(String),
    #[error("invalid hubspot.token_env value: {0:?}")]
    InvalidTokenEnv(String),
    #[error("invalid hubspot.page_size value: {0}")]
    InvalidPageSize(u32),
    #[error("invalid hubspot.batch_size value: {0}")]
    InvalidBatchSize(usize),
    #[error("invalid hubspot.timeout_secs value: {0}")]
    InvalidTimeout(u64),
    #[error("invalid calling code: {0:?}")]
    InvalidCallingCode(String),
    #[error("invalid locality entry: {0:?}")]
    InvalidLocality(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    hubspot: Option<HubSpotFile>,
    merge: Option<MergeFile>,
    normalize: Option<NormalizeFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HubSpotFile {
    api_base: Option<String>,
    token_env: Option<String>,
    token: Option<String>,
    page_size: Option<u32>,
    batch_size: Option<usize>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MergeFile {
    industry_match: Option<IndustryMatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NormalizeFile {
    default_calling_code: Option<String>,
    #[serde(default)]
    calling_codes: BTreeMap<String, String>,
    #[serde(default)]
    localities: BTreeMap<String, String>,
    #[serde(default)]
    countries: Vec<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(hubspot) = parsed.hubspot {
        merge_hubspot(&mut config.hubspot, hubspot)?;
    }

    if let Some(merge) = parsed.merge {
        if let Some(industry_match) = merge.industry_match {
            config.merge.industry_match = industry_match;
        }
    }

    if let Some(normalize) = parsed.normalize {
        merge_normalize(&mut config.normalize, normalize)?;
    }

    Ok(config)
}

fn merge_hubspot(config: &mut HubSpotConfig, parsed: HubSpotFile) -> Result<()> {
    if let Some(api_base) = parsed.api_base {
        let trimmed = api_base.trim().trim_end_matches('/').to_string();
        match Url::parse(&trimmed) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => config.api_base = trimmed,
            _ => return Err(ConfigError::InvalidApiBase(api_base)),
        }
    }

    if let Some(token_env) = parsed.token_env {
        let trimmed = token_env.trim();
        if trimmed.is_empty() || trimmed.contains('=') {
            return Err(ConfigError::InvalidTokenEnv(token_env));
        }
        config.token_env = trimmed.to_string();
    }

    if let Some(token) = parsed.token {
        let trimmed = token.trim();
        if !trimmed.is_empty() {
            config.token = Some(trimmed.to_string());
        }
    }

    if let Some(page_size) = parsed.page_size {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize(page_size));
        }
        config.page_size = page_size;
    }

    if let Some(batch_size) = parsed.batch_size {
        if batch_size == 0 || batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidBatchSize(batch_size));
        }
        config.batch_size = batch_size;
    }

    if let Some(timeout_secs) = parsed.timeout_secs {
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(timeout_secs));
        }
        config.timeout_secs = timeout_secs;
    }

    Ok(())
}

fn merge_normalize(config: &mut NormalizeConfig, parsed: NormalizeFile) -> Result<()> {
    if let Some(code) = parsed.default_calling_code {
        let code = validate_calling_code(&code)?;
        config.calling_codes.set_default(code);
    }
    for (country, code) in parsed.calling_codes {
        if country.trim().is_empty() {
            return Err(ConfigError::InvalidCallingCode(format!("{country} = {code}")));
        }
        let code = validate_calling_code(&code)?;
        config.calling_codes.insert(country.trim(), code);
    }

    for country in parsed.countries {
        if country.trim().is_empty() {
            return Err(ConfigError::InvalidLocality(country));
        }
        config.localities.insert_country(&country);
    }
    for (city, country) in parsed.localities {
        if city.trim().is_empty() || country.trim().is_empty() {
            return Err(ConfigError::InvalidLocality(format!("{city} = {country}")));
        }
        config.localities.insert_city(&city, &country);
    }

    Ok(())
}

fn validate_calling_code(code: &str) -> Result<String> {
    let trimmed = code.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or_default();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ConfigError::InvalidCallingCode(code.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
