use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data source unavailable: {location}")]
    DataSourceUnavailable { location: String },

    #[error("Data source error: {message}")]
    DataSourceError { message: String },

    #[error("Unknown property: {id}")]
    UnknownProperty { id: String },

    #[error("Unknown operator: {id}")]
    UnknownOperator { id: String },

    #[error("Operator '{operator}' is not available for property '{property}'")]
    OperatorNotAvailable { operator: String, property: String },

    #[error("Invalid input '{value}': {reason}")]
    InvalidInput { value: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    DataSource,
    Interaction,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FilterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FilterError::MissingConfigError { .. }
            | FilterError::InvalidConfigValueError { .. }
            | FilterError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            FilterError::DataSourceUnavailable { .. }
            | FilterError::DataSourceError { .. }
            | FilterError::SerializationError(_) => ErrorCategory::DataSource,
            FilterError::UnknownProperty { .. }
            | FilterError::UnknownOperator { .. }
            | FilterError::OperatorNotAvailable { .. }
            | FilterError::InvalidInput { .. } => ErrorCategory::Interaction,
            FilterError::CsvError(_) | FilterError::IoError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 互動錯誤不影響狀態，使用者可以直接重試
            ErrorCategory::Interaction => ErrorSeverity::Medium,
            ErrorCategory::Output | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::DataSource => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FilterError::CsvError(_) => "Check that the output path is writable".to_string(),
            FilterError::IoError(_) => {
                "Check file permissions and that the path exists".to_string()
            }
            FilterError::SerializationError(_) => {
                "Make sure the datastore is valid JSON with properties, operators and products"
                    .to_string()
            }
            FilterError::ConfigValidationError { .. } => {
                "Review the configuration file and command line arguments".to_string()
            }
            FilterError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            FilterError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            FilterError::DataSourceUnavailable { location } => {
                format!("Make sure the datastore exists at {}", location)
            }
            FilterError::DataSourceError { .. } => {
                "Verify the datastore contents".to_string()
            }
            FilterError::UnknownProperty { .. } => {
                "Use `properties` to list the available property ids".to_string()
            }
            FilterError::UnknownOperator { .. } | FilterError::OperatorNotAvailable { .. } => {
                "Use `operators` to list the operators for the selected property".to_string()
            }
            FilterError::InvalidInput { .. } => {
                "Enter a value matching the property type".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::DataSource => format!("Could not read product data: {}", self),
            ErrorCategory::Interaction => self.to_string(),
            ErrorCategory::Output => format!("Could not write output: {}", self),
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
