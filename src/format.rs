//! Output formats and the converters that produce them

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
    eot::{convert_font_to_eot, EotError},
    sfnt::Font,
    woff::{convert_font_to_woff, WoffError},
};

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    Woff(#[from] WoffError),
    #[error(transparent)]
    Eot(#[from] EotError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized output format `{0}` (supported formats: {supported})", supported = FormatId::supported())]
pub struct UnknownFormatError(pub String);

/// Converts a single font into one output format.
pub trait FontConverter {
    fn convert(&self, font: &Font) -> Result<Vec<u8>, ConversionError>;

    /// File extension of the output, without the leading dot.
    fn extension(&self) -> &'static str;
}

/// An output format that can be requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatId {
    Woff,
    Eot,
}

impl FormatId {
    pub const ALL: [FormatId; 2] = [FormatId::Woff, FormatId::Eot];

    pub fn extension(self) -> &'static str {
        match self {
            FormatId::Woff => "woff",
            FormatId::Eot => "eot",
        }
    }

    pub fn converter(self) -> Box<dyn FontConverter> {
        match self {
            FormatId::Woff => Box::new(WoffConverter),
            FormatId::Eot => Box::new(EotConverter),
        }
    }

    /// Comma separated list of the supported format names
    pub fn supported() -> String {
        Self::ALL.map(FormatId::extension).join(", ")
    }
}

impl FromStr for FormatId {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == name)
            .ok_or_else(|| UnknownFormatError(s.to_string()))
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Suffix of a format name asking for the font to be embedded in the stylesheet
pub const INLINE_SUFFIX: &str = ":inline";

/// One entry of the `--format` list: a format, optionally marked `:inline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatRequest {
    pub format: FormatId,
    pub inline: bool,
}

impl FromStr for FormatRequest {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let (name, inline) = match name.strip_suffix(INLINE_SUFFIX) {
            Some(format) => (format, true),
            None => (name.as_str(), false),
        };
        let format = name
            .parse()
            .map_err(|_| UnknownFormatError(s.to_string()))?;
        Ok(FormatRequest { format, inline })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WoffConverter;

impl FontConverter for WoffConverter {
    fn convert(&self, font: &Font) -> Result<Vec<u8>, ConversionError> {
        Ok(convert_font_to_woff(font)?)
    }

    fn extension(&self) -> &'static str {
        FormatId::Woff.extension()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EotConverter;

impl FontConverter for EotConverter {
    fn convert(&self, font: &Font) -> Result<Vec<u8>, ConversionError> {
        Ok(convert_font_to_eot(font)?)
    }

    fn extension(&self) -> &'static str {
        FormatId::Eot.extension()
    }
}
