pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::OutputFormat;
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_filter_selection, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "product-filter")]
#[command(about = "Filter a product table by a single property clause")]
pub struct CliConfig {
    /// Path to the JSON datastore (properties, operators, products)
    #[arg(long, default_value = "./datastore.json")]
    pub data: String,

    /// Property id to filter on
    #[arg(short, long)]
    pub property: Option<u64>,

    /// Operator id (equals, greater_than, less_than, any, none, in, contains)
    #[arg(short, long)]
    pub operator: Option<String>,

    /// Input value; repeat or comma separate for multi-select properties
    #[arg(short, long)]
    pub input: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the table to this file instead of stdout
    #[arg(long)]
    pub output: Option<String>,

    /// Start the interactive shell
    #[arg(long)]
    pub interactive: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn datastore_path(&self) -> &str {
        &self.data
    }

    fn property(&self) -> Option<u64> {
        self.property
    }

    fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    fn input(&self) -> &[String] {
        &self.input
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data", &self.data)?;
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        validate_filter_selection(self.property, self.operator.as_deref(), &self.input)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_arguments() {
        let config = CliConfig::parse_from([
            "product-filter",
            "--data",
            "store.json",
            "-p",
            "2",
            "-o",
            "in",
            "-i",
            "red",
            "-i",
            "blue",
            "--format",
            "csv",
        ]);

        assert_eq!(config.datastore_path(), "store.json");
        assert_eq!(config.property(), Some(2));
        assert_eq!(config.operator(), Some("in"));
        assert_eq!(config.input(), ["red", "blue"]);
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_operator_without_property_is_invalid() {
        let config = CliConfig::parse_from(["product-filter", "-o", "any"]);
        assert!(config.validate().is_err());
    }
}
