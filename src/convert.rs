//! Running a conversion job: every selected font of every input file, in every requested format.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use bytes::Bytes;
use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    args::JobConfig,
    css::{CssTarget, Stylesheet},
    format::{ConversionError, FontConverter},
    sfnt::{parse_fonts, Font, ParseError},
};

/// Exit status for failures while converting. Usage errors exit with clap's status 2.
pub const RUNTIME_ERROR_EXIT_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot load fonts from {}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
    #[error("selection {selection} not found in {} ({available} font(s) in file)", .path.display())]
    SelectionOutOfRange {
        path: PathBuf,
        /// 1-based, as given on the command line
        selection: usize,
        available: usize,
    },
    #[error("cannot convert {} to {format}: {source}", .path.display())]
    Convert {
        path: PathBuf,
        format: &'static str,
        source: ConversionError,
    },
    #[error("cannot create output directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("cannot write stylesheet to {target}: {source}")]
    Stylesheet { target: CssTarget, source: io::Error },
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        RUNTIME_ERROR_EXIT_CODE
    }
}

/// Runs `config` with the converters for its formats.
///
/// Stops at the first error. Files written before the error are left in place.
pub fn run(config: &JobConfig) -> Result<(), RunError> {
    let converters: Vec<_> = config
        .formats
        .iter()
        .map(|format| format.converter())
        .collect();
    run_with(config, &converters)
}

/// Runs `config` with the given converters (one per requested format, in order) instead of the
/// ones its formats name.
pub fn run_with(config: &JobConfig, converters: &[Box<dyn FontConverter>]) -> Result<(), RunError> {
    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir).map_err(|source| RunError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    }
    let mut stylesheet = config.css.as_ref().map(Stylesheet::new);
    let mut written = 0;
    for input in &config.inputs {
        written += convert_file(input, config, converters, stylesheet.as_mut())?;
    }
    info!("{written} file(s) written");

    if let Some(stylesheet) = stylesheet {
        let target = stylesheet.target();
        stylesheet.write().map_err(|source| RunError::Stylesheet {
            target: target.clone(),
            source,
        })?;
        info!("wrote stylesheet to {target}");
    }
    Ok(())
}

/// Converts the selected fonts of one input file, returning the number of files written.
fn convert_file(
    input: &Path,
    config: &JobConfig,
    converters: &[Box<dyn FontConverter>],
    mut stylesheet: Option<&mut Stylesheet<'_>>,
) -> Result<usize, RunError> {
    let data = fs::read(input).map_err(|source| RunError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let fonts = parse_fonts(Bytes::from(data)).map_err(|source| RunError::Parse {
        path: input.to_path_buf(),
        source,
    })?;
    debug!("{}: {} font(s)", input.display(), fonts.len());

    let selected = select_fonts(&fonts, config.selection).ok_or_else(|| {
        RunError::SelectionOutOfRange {
            path: input.to_path_buf(),
            selection: config.selection.map_or(0, |index| index + 1),
            available: fonts.len(),
        }
    })?;
    if selected.is_empty() {
        warn!("{}: no fonts found", input.display());
    }

    let first_face = stylesheet
        .as_deref_mut()
        .map(|stylesheet| stylesheet.add_fonts(selected));
    let numbered = selected.len() > 1;
    let mut written = 0;
    for converter in converters {
        for (index, font) in selected.iter().enumerate() {
            let data = converter
                .convert(font)
                .map_err(|source| RunError::Convert {
                    path: input.to_path_buf(),
                    format: converter.extension(),
                    source,
                })?;
            let output = output_path(
                input,
                numbered.then_some(index + 1),
                converter.extension(),
                config.output_dir.as_deref(),
            );
            write_output(&output, &data)?;
            info!("wrote {}", output.display());
            if let (Some(stylesheet), Some(first)) = (stylesheet.as_deref_mut(), first_face) {
                stylesheet.add_file(first + index, converter.extension(), &output, &data);
            }
            written += 1;
        }
    }
    Ok(written)
}

/// Returns all fonts, or just the one at `selection`; `None` if `selection` is out of range.
fn select_fonts(fonts: &[Font], selection: Option<usize>) -> Option<&[Font]> {
    match selection {
        None => Some(fonts),
        Some(index) => fonts.get(index..=index),
    }
}

/// The output file for a font of `input`.
///
/// The input's extension is replaced by `extension`, with `ordinal` inserted before it when
/// several fonts of the file are converted. With `output_dir`, the file is placed there
/// instead of next to the input.
pub fn output_path(
    input: &Path,
    ordinal: Option<usize>,
    extension: &str,
    output_dir: Option<&Path>,
) -> PathBuf {
    let stem = match output_dir {
        Some(dir) => dir.join(input.file_stem().unwrap_or_default()),
        None => input.with_extension(""),
    };
    let mut name = OsString::from(stem);
    if let Some(ordinal) = ordinal {
        name.push(format!(".{ordinal}"));
    }
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Creates (or truncates) `path` and writes `data` to it. The file is closed on every path out.
fn write_output(path: &Path, data: &[u8]) -> Result<(), RunError> {
    let to_error = |source| RunError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(to_error)?;
    file.write_all(data)
        .and_then(|()| file.flush())
        .map_err(to_error)
}
