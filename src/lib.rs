pub mod batch;
pub mod config;
pub mod convert;
pub mod error;
pub mod subtitle;

pub use batch::{convert_directory, convert_inputs, print_summary, BatchStats};
pub use config::Config;
pub use convert::{ConvertOptions, Converter, FileStats};
pub use error::{ConvertError, Result};
