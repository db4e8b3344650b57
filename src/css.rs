//! `@font-face` stylesheets for the converted fonts

use std::{
    fmt,
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf, MAIN_SEPARATOR},
};

use base64::{engine::general_purpose::STANDARD, Engine};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{
    format::{FormatId, FormatRequest},
    sfnt::Font,
    tables::{os2::Os2, OS2_TAG},
};

/// Characters left as they are in file names placed in URLs
const FILE_NAME: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Where the stylesheet is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssTarget {
    Stdout,
    File(PathBuf),
}

impl From<PathBuf> for CssTarget {
    /// `-` is standard output
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            CssTarget::Stdout
        } else {
            CssTarget::File(path)
        }
    }
}

impl fmt::Display for CssTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssTarget::Stdout => f.write_str("standard output"),
            CssTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssConfig {
    pub target: CssTarget,
    /// Prepended to the output file names in `url(...)`
    pub prefix: String,
    pub family: String,
    /// The `src` entries of every rule, in order
    pub sources: Vec<FormatRequest>,
}

impl CssConfig {
    fn is_inlined(&self, extension: &str) -> bool {
        self.sources
            .iter()
            .any(|source| source.inline && source.format.extension() == extension)
    }
}

/// The URL prefix used when none is given: the output directory with a trailing `/`, or nothing.
pub fn default_prefix(output_dir: Option<&Path>) -> String {
    let Some(dir) = output_dir else {
        return String::new();
    };
    let dir = dir.to_string_lossy();
    let mut parts: Vec<&str> = dir.split(MAIN_SEPARATOR).collect();
    if parts.last() == Some(&"") {
        parts.pop();
    }
    if !parts.is_empty() {
        parts.push("");
    }
    parts.join("/")
}

/// The family name used when none is given: the file stem of the first input.
pub fn default_family(first_input: &Path) -> String {
    first_input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Value of the `format()` hint for `format`.
pub fn css_format(format: FormatId) -> &'static str {
    match format {
        FormatId::Woff => "woff",
        FormatId::Eot => "embedded-opentype",
    }
}

pub fn media_type(format: FormatId) -> &'static str {
    match format {
        FormatId::Woff => "application/font-woff",
        FormatId::Eot => "application/vnd.ms-fontobject",
    }
}

/// Escapes a value for a single-quoted CSS string.
pub fn escape_css_str(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\A"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escapes the characters that would end an unquoted `url(...)`.
pub fn escape_css_url(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '(' | ')' | '\'' | '"') || c.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn data_url(format: FormatId, data: &[u8]) -> String {
    format!("data:{};base64,{}", media_type(format), STANDARD.encode(data))
}

#[derive(Debug)]
struct FaceFile {
    extension: &'static str,
    file_name: String,
    /// Kept only for inlined formats
    data: Option<Vec<u8>>,
}

#[derive(Debug)]
struct FontFace {
    style: Option<Os2>,
    files: Vec<FaceFile>,
}

impl FontFace {
    fn file(&self, extension: &str) -> Option<&FaceFile> {
        self.files.iter().find(|file| file.extension == extension)
    }
}

/// Collects the files written for each converted font and renders one `@font-face` rule per font.
#[derive(Debug)]
pub struct Stylesheet<'a> {
    config: &'a CssConfig,
    faces: Vec<FontFace>,
}

impl<'a> Stylesheet<'a> {
    pub fn new(config: &'a CssConfig) -> Self {
        Stylesheet {
            config,
            faces: Vec::new(),
        }
    }

    pub fn target(&self) -> &'a CssTarget {
        &self.config.target
    }

    /// Starts a rule for each of `fonts` and returns the index of the first one.
    pub fn add_fonts(&mut self, fonts: &[Font]) -> usize {
        let first = self.faces.len();
        self.faces.extend(fonts.iter().map(|font| FontFace {
            style: font
                .table(OS2_TAG)
                .and_then(|data| Os2::from_buf(&mut data.clone()).ok()),
            files: Vec::new(),
        }));
        first
    }

    /// Records the output file written for the font at `face`.
    pub fn add_file(&mut self, face: usize, extension: &'static str, path: &Path, data: &[u8]) {
        let inlined = self.config.is_inlined(extension);
        let Some(face) = self.faces.get_mut(face) else {
            return;
        };
        let file = FaceFile {
            extension,
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            data: inlined.then(|| data.to_vec()),
        };
        match face.files.iter_mut().find(|old| old.extension == extension) {
            Some(old) => *old = file,
            None => face.files.push(file),
        }
    }

    pub fn render(&self) -> String {
        let describe_style = self.faces.len() > 1;
        self.faces
            .iter()
            .map(|face| self.render_face(face, describe_style))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn file_url(&self, file: &FaceFile) -> String {
        let name = utf8_percent_encode(&file.file_name, FILE_NAME);
        escape_css_url(&format!("{}{}", self.config.prefix, name))
    }

    fn render_face(&self, face: &FontFace, describe_style: bool) -> String {
        let mut css = format!(
            "@font-face {{\n  font-family: '{}';\n",
            escape_css_str(&self.config.family)
        );
        let mut entries = Vec::new();
        let mut sources: Vec<&FormatRequest> = self.config.sources.iter().collect();

        // old IE only reads a plain `src` and stops at the `?#iefix` query in the list
        let linked_eot = FormatRequest {
            format: FormatId::Eot,
            inline: false,
        };
        if let Some(position) = sources.iter().position(|source| **source == linked_eot) {
            sources.remove(position);
            if let Some(file) = face.file(FormatId::Eot.extension()) {
                let url = self.file_url(file);
                css.push_str(&format!("  src: url({url});\n"));
                entries.push(format!("url({url}?#iefix) format('embedded-opentype')"));
            }
        }

        for source in sources {
            let Some(file) = face.file(source.format.extension()) else {
                continue;
            };
            let url = match (&file.data, source.inline) {
                (Some(data), true) => data_url(source.format, data),
                _ => self.file_url(file),
            };
            entries.push(format!("url({url}) format('{}')", css_format(source.format)));
        }
        css.push_str(&format!("  src: {};\n", entries.join(",\n       ")));

        if let (true, Some(os2)) = (describe_style, face.style) {
            let style = if os2.is_italic() { "italic" } else { "normal" };
            css.push_str(&format!("  font-style: {style};\n"));
            css.push_str(&format!("  font-weight: {};\n", os2.weight_class));
        }
        css.push_str("}\n");
        css
    }

    pub fn write(&self) -> io::Result<()> {
        let css = self.render();
        match &self.config.target {
            CssTarget::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(css.as_bytes())?;
                out.flush()
            }
            CssTarget::File(path) => {
                let mut file = File::create(path)?;
                file.write_all(css.as_bytes())?;
                file.flush()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_resources::{test_font, FontSpec};

    fn config(sources: &[(FormatId, bool)]) -> CssConfig {
        CssConfig {
            target: CssTarget::Stdout,
            prefix: "fonts/".into(),
            family: "Test".into(),
            sources: sources
                .iter()
                .map(|&(format, inline)| FormatRequest { format, inline })
                .collect(),
        }
    }

    fn sheet_with_files<'a>(config: &'a CssConfig, fonts: &[Font], stem: &str) -> Stylesheet<'a> {
        let mut sheet = Stylesheet::new(config);
        let first = sheet.add_fonts(fonts);
        for index in 0..fonts.len() {
            for (extension, data) in [("woff", &[0u8, 1, 2][..]), ("eot", &[3u8][..])] {
                let name = if fonts.len() > 1 {
                    format!("{stem}.{}.{extension}", index + 1)
                } else {
                    format!("{stem}.{extension}")
                };
                sheet.add_file(first + index, extension, Path::new("out").join(name).as_path(), data);
            }
        }
        sheet
    }

    #[test]
    fn escapes_strings() {
        assert_eq!(escape_css_str("Plain Name"), "Plain Name");
        assert_eq!(escape_css_str("It's"), "It\\'s");
        assert_eq!(escape_css_str("a\nb"), "a\\Ab");
        assert_eq!(escape_css_str("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn escapes_urls() {
        assert_eq!(escape_css_url("fonts/a.woff"), "fonts/a.woff");
        assert_eq!(
            escape_css_url("my fonts/(a)'b\".woff"),
            "my\\ fonts/\\(a\\)\\'b\\\".woff"
        );
    }

    #[test]
    fn default_prefix_ends_with_slash() {
        assert_eq!(default_prefix(None), "");
        assert_eq!(default_prefix(Some(Path::new("out"))), "out/");
        assert_eq!(default_prefix(Some(Path::new("out/"))), "out/");
        assert_eq!(default_prefix(Some(Path::new("a/b"))), "a/b/");
        assert_eq!(default_prefix(Some(Path::new(""))), "");
    }

    #[test]
    fn default_family_is_file_stem() {
        assert_eq!(default_family(Path::new("fonts/Lato-Bold.ttf")), "Lato-Bold");
        assert_eq!(default_family(Path::new("a.b.ttc")), "a.b");
    }

    #[test]
    fn target_from_path() {
        assert_eq!(CssTarget::from(PathBuf::from("-")), CssTarget::Stdout);
        assert_eq!(
            CssTarget::from(PathBuf::from("fonts.css")),
            CssTarget::File(PathBuf::from("fonts.css"))
        );
    }

    #[test]
    fn linked_eot_comes_first() {
        let config = config(&[(FormatId::Woff, false), (FormatId::Eot, false)]);
        let fonts = [test_font(&FontSpec::default())];
        let css = sheet_with_files(&config, &fonts, "Test").render();
        assert_eq!(
            css,
            "@font-face {\n  font-family: 'Test';\n  src: url(fonts/Test.eot);\n  src: \
             url(fonts/Test.eot?#iefix) format('embedded-opentype'),\n       \
             url(fonts/Test.woff) format('woff');\n}\n"
        );
    }

    #[test]
    fn inlined_sources_keep_their_place() {
        let config = config(&[(FormatId::Woff, true), (FormatId::Eot, true)]);
        let fonts = [test_font(&FontSpec::default())];
        let css = sheet_with_files(&config, &fonts, "Test").render();
        assert_eq!(
            css,
            "@font-face {\n  font-family: 'Test';\n  src: \
             url(data:application/font-woff;base64,AAEC) format('woff'),\n       \
             url(data:application/vnd.ms-fontobject;base64,Aw==) format('embedded-opentype');\n}\n"
        );
    }

    #[test]
    fn file_names_are_quoted() {
        let mut config = config(&[(FormatId::Woff, false)]);
        config.prefix = "my fonts/".into();
        config.family = "O'Font".into();
        let fonts = [test_font(&FontSpec::default())];
        let css = sheet_with_files(&config, &fonts, "A B+C").render();
        assert!(css.contains("font-family: 'O\\'Font';"), "{css}");
        assert!(
            css.contains("url(my\\ fonts/A%20B%2BC.woff) format('woff')"),
            "{css}"
        );
    }

    #[test]
    fn one_rule_per_font_with_style() {
        let config = config(&[(FormatId::Woff, false)]);
        let bold_italic = FontSpec {
            weight: 700,
            italic: true,
            ..FontSpec::default()
        };
        let fonts = [test_font(&FontSpec::default()), test_font(&bold_italic)];
        let css = sheet_with_files(&config, &fonts, "Family").render();

        let rules: Vec<&str> = css.split("\n@font-face").collect();
        assert_eq!(rules.len(), 2, "{css}");
        assert!(rules[0].contains("url(fonts/Family.1.woff)"), "{css}");
        assert!(rules[0].contains("font-style: normal;\n  font-weight: 400;"), "{css}");
        assert!(rules[1].contains("url(fonts/Family.2.woff)"), "{css}");
        assert!(rules[1].contains("font-style: italic;\n  font-weight: 700;"), "{css}");
    }

    #[test]
    fn only_inlined_formats_keep_data() {
        let config = config(&[(FormatId::Woff, true), (FormatId::Eot, false)]);
        let fonts = [test_font(&FontSpec::default())];
        let sheet = sheet_with_files(&config, &fonts, "Test");
        assert!(sheet.faces[0].file("woff").unwrap().data.is_some());
        assert!(sheet.faces[0].file("eot").unwrap().data.is_none());
    }
}
