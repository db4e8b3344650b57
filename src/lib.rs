#![doc = include_str!("../readme.md")]
pub mod args;
pub mod convert;
pub mod css;
pub mod eot;
pub mod format;
pub mod sfnt;
pub mod woff;

mod buffer_util;
mod checksum;
mod magic_numbers;
mod tables;
mod ttf_header;

#[cfg(test)]
mod test_resources;

pub use args::{Args, ConfigError, JobConfig};
pub use convert::{run, run_with, RunError, RUNTIME_ERROR_EXIT_CODE};
pub use css::{CssConfig, CssTarget};
pub use format::{ConversionError, FontConverter, FormatId, FormatRequest};
