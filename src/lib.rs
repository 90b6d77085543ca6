pub mod config;
pub mod error;
pub mod process;

pub use config::Config;
pub use error::ConvertError;
pub use process::convert::{CellValue, DataRow};
pub use process::{convert_file, convert_str, Conversion, ConvertSummary, WeatherDataset};
