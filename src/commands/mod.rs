//! Command handlers driven by the CLI:
//! - [`select_paths`]: read files into the session's selection
//! - [`save_output`] / [`save_all`]: write compressed results

mod files;

pub use files::*;
