use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read input CSV '{0}'")]
    InputNotFound(PathBuf, #[source] std::io::Error),

    #[error("Input CSV '{0}' is not valid UTF-8")]
    InputDecode(PathBuf, #[source] std::string::FromUtf8Error),

    #[error("No line starting with '{marker}' found in input")]
    HeaderNotFound { marker: String },

    #[error("CSV parse error at record {record}")]
    Csv {
        record: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write output JSON '{0}'")]
    OutputWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to serialize weather dataset")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to read config file '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    ConfigParse(PathBuf, #[source] serde_yaml::Error),
}
