pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;
pub mod size;

pub use error::{CompressorError, CompressorResult, RejectionReason};
pub use validation::{validate_config, validate_quality_percent};
pub use formats::{ImageFormat, format_from_extension};
pub use fs::{extract_filename, read_candidate, write_output};
pub use size::format_file_size;
