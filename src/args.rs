use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser};
use thiserror::Error;

use crate::{
    css::{default_family, default_prefix, CssConfig},
    format::{FormatId, FormatRequest, UnknownFormatError},
};

/// Convert TrueType/OpenType fonts and font collections to WOFF and/or EOT.
///
/// Output files are written next to each input, named after it with the format's extension.
/// When more than one font of a file is converted, the names are numbered: `font.1.woff`,
/// `font.2.woff`, ...
#[derive(Debug, Parser)]
#[command(author, version, about, args_override_self = true)]
pub struct Args {
    /// Font files to convert
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Comma separated list of output formats (woff, eot). A `:inline` suffix (`woff:inline`)
    /// embeds that format in the stylesheet as a data URL
    #[arg(short, long, value_name = "FORMATS")]
    pub format: Option<String>,

    /// Convert only the N-th font of each file (1-based) instead of all of them
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub select: Option<u32>,

    /// Write output files to DIR instead of next to the inputs
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write an @font-face stylesheet for the converted fonts to FILE (`-` for standard output)
    #[arg(short, long, value_name = "FILE")]
    pub css: Option<PathBuf>,

    /// Prefix of the font URLs in the stylesheet [default: the output directory]
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Font family name used in the stylesheet [default: file name of the first input]
    #[arg(long, value_name = "NAME")]
    pub family: Option<String>,

    /// Log every file as it is written
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no input files given")]
    NoInput,
    #[error("no output format given (use --format)")]
    NoFormat,
    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormatError),
}

impl ConfigError {
    /// The clap error kind used to report this error with the usage text.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::NoInput | ConfigError::NoFormat => ErrorKind::MissingRequiredArgument,
            ConfigError::UnknownFormat(_) => ErrorKind::InvalidValue,
        }
    }

    /// The error as clap reports usage errors: with the usage text and exit status 2.
    pub fn into_clap_error(self) -> clap::Error {
        let kind = self.kind();
        Args::command().error(kind, self)
    }
}

/// A validated conversion job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub inputs: Vec<PathBuf>,
    pub formats: Vec<FormatId>,
    /// 0-based index of the font to convert from each file; `None` converts all of them
    pub selection: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub css: Option<CssConfig>,
}

impl TryFrom<Args> for JobConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, ConfigError> {
        if args.inputs.is_empty() {
            return Err(ConfigError::NoInput);
        }
        let requests = match args.format.as_deref() {
            None | Some("") => return Err(ConfigError::NoFormat),
            Some(list) => parse_format_list(list)?,
        };
        let formats = requests.iter().map(|request| request.format).collect();
        let css = match args.css {
            Some(target) => Some(CssConfig {
                target: target.into(),
                prefix: args
                    .prefix
                    .unwrap_or_else(|| default_prefix(args.output_dir.as_deref())),
                family: args
                    .family
                    .unwrap_or_else(|| default_family(&args.inputs[0])),
                sources: requests,
            }),
            None => None,
        };
        Ok(JobConfig {
            inputs: args.inputs,
            formats,
            selection: args.select.map(|n| n as usize - 1),
            output_dir: args.output_dir,
            css,
        })
    }
}

/// Parses a comma separated, case insensitive list of format names, keeping the given order.
pub fn parse_format_list(list: &str) -> Result<Vec<FormatRequest>, UnknownFormatError> {
    list.split(',').map(str::parse).collect()
}
