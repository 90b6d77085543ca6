use crate::error::ConvertError;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_INPUT: &str = "open-meteo-33.62N73.12E583m (2).csv";
pub const DEFAULT_OUTPUT: &str = "clean_output.json";
pub const DEFAULT_HEADER_MARKER: &str = "time";
pub const DEFAULT_INDENT: usize = 4;

/// Where to read the export from, where to write the JSON, and how to find
/// the start of the table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// First line starting with this text is the header row.
    pub header_marker: String,
    /// Spaces per indentation level in the output document.
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            header_marker: DEFAULT_HEADER_MARKER.to_string(),
            indent: DEFAULT_INDENT,
        }
    }
}

impl Config {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Load a YAML config; fields missing from the file keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConvertError::ConfigRead(path.to_path_buf(), e))?;
        serde_yaml::from_str(&text).map_err(|e| ConvertError::ConfigParse(path.to_path_buf(), e))
    }

    /// Apply command-line overrides on top of this config.
    pub fn with_overrides(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input_path = input;
        }
        if let Some(output) = output {
            self.output_path = output;
        }
        self
    }
}
