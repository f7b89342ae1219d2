use crate::utils::error::{CurriculumError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration. All storage locations are injected through this
/// document; the engine never reads the process working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub catalog: CatalogConfig,
    pub data: DataConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CurriculumError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CurriculumError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Construct directly, for embedders and tests that do not go through a
    /// config file.
    pub fn with_dirs(catalog_dir: impl Into<String>, data_dir: impl Into<String>) -> Self {
        Self {
            catalog: CatalogConfig {
                dir: catalog_dir.into(),
            },
            data: DataConfig {
                dir: data_dir.into(),
            },
            logging: None,
        }
    }

    /// Substitute `${VAR_NAME}` references with environment values.
    /// Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("catalog.dir", &self.catalog.dir)?;
        validation::validate_path("data.dir", &self.data.dir)?;
        Ok(())
    }
}
