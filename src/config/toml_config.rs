use crate::domain::model::{OperatorId, OutputFormat};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FilterError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub datastore: DatastoreConfig,
    pub filter: Option<FilterConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
    #[serde(skip)]
    resolved_input: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatastoreConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub property: Option<u64>,
    pub operator: Option<String>,
    pub input: Option<InputSetting>,
}

/// `input = 7`、`input = "cotton"` 或 `input = ["red", "blue"]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputSetting {
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl InputSetting {
    fn to_raw(&self) -> Vec<String> {
        match self {
            InputSetting::Integer(n) => vec![n.to_string()],
            InputSetting::Float(n) => vec![n.to_string()],
            InputSetting::Text(s) => vec![s.clone()],
            InputSetting::List(items) => items.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FilterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| FilterError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        config.resolved_input = config
            .filter
            .as_ref()
            .and_then(|f| f.input.as_ref())
            .map(InputSetting::to_raw)
            .unwrap_or_default();

        Ok(config)
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("datastore.path", &self.datastore.path)?;

        if let Some(filter) = &self.filter {
            if let Some(operator) = &filter.operator {
                if OperatorId::parse(operator).is_none() {
                    return Err(FilterError::InvalidConfigValueError {
                        field: "filter.operator".to_string(),
                        value: operator.clone(),
                        reason: format!(
                            "Unknown operator. Valid operators: {}",
                            OperatorId::ALL.map(|op| op.as_str()).join(", ")
                        ),
                    });
                }
            }
            validation::validate_filter_selection(
                filter.property,
                filter.operator.as_deref(),
                &self.resolved_input,
            )?;
        }

        if let Some(output) = &self.output {
            if let Some(format) = &output.format {
                validation::validate_one_of("output.format", format, &OutputFormat::NAMES)?;
            }
            if let Some(path) = &output.path {
                validation::validate_path("output.path", path)?;
            }
        }

        if let Some(level) = self.log_level() {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }

    /// 取得日誌等級
    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    /// 是否使用 JSON 日誌
    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        let name = OutputFormat::NAMES[format as usize].to_string();
        self.output.get_or_insert_with(OutputConfig::default).format = Some(name);
    }
}

impl ConfigProvider for TomlConfig {
    fn datastore_path(&self) -> &str {
        &self.datastore.path
    }

    fn property(&self) -> Option<u64> {
        self.filter.as_ref().and_then(|f| f.property)
    }

    fn operator(&self) -> Option<&str> {
        self.filter.as_ref().and_then(|f| f.operator.as_deref())
    }

    fn input(&self) -> &[String] {
        &self.resolved_input
    }

    fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .and_then(OutputFormat::parse)
            .unwrap_or_default()
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[datastore]
path = "./datastore.json"

[filter]
property = 1
operator = "greater_than"
input = 7

[output]
format = "csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.datastore_path(), "./datastore.json");
        assert_eq!(config.property(), Some(1));
        assert_eq!(config.operator(), Some("greater_than"));
        assert_eq!(config.input(), ["7"]);
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_list_and_text_inputs() {
        let list = TomlConfig::from_toml_str(
            r#"
[datastore]
path = "a.json"

[filter]
property = 2
operator = "in"
input = ["red", "blue"]
"#,
        )
        .unwrap();
        assert_eq!(list.input(), ["red", "blue"]);

        let text = TomlConfig::from_toml_str(
            r#"
[datastore]
path = "a.json"

[filter]
property = 0
operator = "contains"
input = "cotton"
"#,
        )
        .unwrap();
        assert_eq!(text.input(), ["cotton"]);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PRODUCT_FILTER_TEST_DIR", "/tmp/stores");

        let toml_content = r#"
[datastore]
path = "${PRODUCT_FILTER_TEST_DIR}/datastore.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.datastore.path, "/tmp/stores/datastore.json");

        std::env::remove_var("PRODUCT_FILTER_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let unknown_operator = TomlConfig::from_toml_str(
            r#"
[datastore]
path = "a.json"

[filter]
property = 1
operator = "between"
"#,
        )
        .unwrap();
        assert!(unknown_operator.validate().is_err());

        let bad_format = TomlConfig::from_toml_str(
            r#"
[datastore]
path = "a.json"

[output]
format = "xml"
"#,
        )
        .unwrap();
        assert!(bad_format.validate().is_err());

        let missing_property = TomlConfig::from_toml_str(
            r#"
[datastore]
path = "a.json"

[filter]
operator = "any"
"#,
        )
        .unwrap();
        assert!(missing_property.validate().is_err());
    }

    #[test]
    fn test_set_output_format_overrides_file() {
        let mut config = TomlConfig::from_toml_str("[datastore]\npath = \"a.json\"\n").unwrap();
        assert_eq!(config.output_format(), OutputFormat::Table);

        config.set_output_format(OutputFormat::Json);
        assert_eq!(config.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[datastore]
path = "./products.json"

[logging]
level = "debug"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.datastore.path, "./products.json");
        assert_eq!(config.log_level(), Some("debug"));
        assert!(!config.json_logs());
    }
}
