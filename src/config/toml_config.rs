use crate::core::exchange::DEFAULT_OUTPUT_PATH;
use crate::core::ConfigProvider;
use crate::domain::model::{CoupleGroup, Roster};
use crate::utils::error::{ExchangeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 名單設定檔
///
/// ```toml
/// participants = ["Ann", ["Greg", "Megan"]]
///
/// [exchange]
/// name = "Family 2026"
/// allow_reciprocal = false
///
/// [output]
/// path = "./output"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub participants: Vec<CoupleGroup>,
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub name: Option<String>,
    pub allow_reciprocal: Option<bool>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

impl RosterConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExchangeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExchangeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExchangeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(name) = &self.exchange.name {
            validate_non_empty_string("exchange.name", name)?;
        }

        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
        }

        if self.participants.is_empty() {
            return Err(ExchangeError::MissingConfigError {
                field: "participants".to_string(),
            });
        }

        Ok(())
    }

    /// 建立名單，同時檢查名稱唯一與合法
    pub fn roster(&self) -> Result<Roster> {
        Ok(Roster::new(self.participants.clone())?)
    }

    pub fn exchange_name(&self) -> &str {
        self.exchange.name.as_deref().unwrap_or("Secret Santa")
    }

    /// 命令列參數優先於設定檔
    pub fn with_overrides(
        mut self,
        output_path: Option<String>,
        allow_reciprocal: bool,
        seed: Option<u64>,
    ) -> Self {
        if output_path.is_some() {
            self.output.path = output_path;
        }
        if allow_reciprocal {
            self.exchange.allow_reciprocal = Some(true);
        }
        if seed.is_some() {
            self.exchange.seed = seed;
        }
        self
    }
}

impl ConfigProvider for RosterConfig {
    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn allow_reciprocal(&self) -> bool {
        self.exchange.allow_reciprocal.unwrap_or(false)
    }

    fn seed(&self) -> Option<u64> {
        self.exchange.seed
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
