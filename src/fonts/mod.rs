//! Font loading utilities for the resume renderer.
//!
//! The PDF references the built-in Helvetica faces, so no font program is
//! embedded.  `genpdf` still needs real metrics to measure and wrap text, which
//! are read from a Helvetica-compatible TrueType family found on disk.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use log::{debug, warn};
use printpdf::BuiltinFont;

/// Environment variable pointing at a directory with the metric font files.
pub const FONTS_DIR_ENV: &str = "RESUME_RENDER_FONTS_DIR";

/// Environment variable overriding the Windows fonts directory used as fallback.
pub const WINDOWS_FONTS_DIR_ENV: &str = "RESUME_RENDER_WINDOWS_FONTS_DIR";

/// Name of the preferred metric font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "LiberationSans";

const WINDOWS_FALLBACK_FAMILY_NAME: &str = "Arial";

const BUNDLED_FAMILY_NAME: &str = "DejaVu Sans";

static BUNDLED_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static BUNDLED_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// File names of the four faces of a family.
struct FamilyFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

impl FamilyFiles {
    fn all(&self) -> [&'static str; 4] {
        [self.regular, self.bold, self.italic, self.bold_italic]
    }
}

const LIBERATION_FILES: FamilyFiles = FamilyFiles {
    regular: "LiberationSans-Regular.ttf",
    bold: "LiberationSans-Bold.ttf",
    italic: "LiberationSans-Italic.ttf",
    bold_italic: "LiberationSans-BoldItalic.ttf",
};

const WINDOWS_FONT_FILES: FamilyFiles = FamilyFiles {
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts/liberation",
];

/// Directory of bundled fonts inside the crate sources.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        push_unique(&mut candidates, path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(&mut candidates, bundled_fonts_source_dir());

    for dir in SYSTEM_FONT_DIRECTORIES {
        push_unique(&mut candidates, PathBuf::from(dir));
    }

    candidates
}

fn missing_font_files(path: &Path, files: &FamilyFiles) -> Vec<&'static str> {
    files
        .all()
        .into_iter()
        .filter(|name| !path.join(name).is_file())
        .collect()
}

fn resolve_font_directory(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(explicit) {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_font_files(&candidate, &LIBERATION_FILES);
        if missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    Err(Error::new(
        format!(
            "Unable to locate the {} font family. Checked: {}. Set {} to a directory containing it.",
            DEFAULT_FONT_FAMILY_NAME,
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "metric fonts directory not found"),
    ))
}

fn load_face(directory: &Path, file: &str, builtin: BuiltinFont) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, Some(builtin)).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!("Failed to load font {}: {}", path.display(), err),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

/// Loads the four faces from `directory`, mapping each onto its built-in
/// Helvetica counterpart.
fn load_helvetica_family(
    directory: &Path,
    files: &FamilyFiles,
) -> Result<FontFamily<FontData>, Error> {
    Ok(FontFamily {
        regular: load_face(directory, files.regular, BuiltinFont::Helvetica)?,
        bold: load_face(directory, files.bold, BuiltinFont::HelveticaBold)?,
        italic: load_face(directory, files.italic, BuiltinFont::HelveticaOblique)?,
        bold_italic: load_face(
            directory,
            files.bold_italic,
            BuiltinFont::HelveticaBoldOblique,
        )?,
    })
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path(WINDOWS_FONTS_DIR_ENV) {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn windows_fallback_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = windows_font_directory().ok_or_else(|| {
        Error::new(
            "Windows font directory not found for fallback",
            io::Error::new(io::ErrorKind::NotFound, "windows fonts directory not found"),
        )
    })?;

    load_helvetica_family(&directory, &WINDOWS_FONT_FILES)
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Loads the DejaVu Sans faces compiled into the crate.
///
/// DejaVu runs wider than Helvetica, so lines wrap a little early but never
/// overflow the column.  There is no italic face; the upright ones stand in.
pub fn bundled_font_family() -> Result<FontFamily<FontData>, Error> {
    let regular = BUNDLED_REGULAR.to_vec();
    let bold = BUNDLED_BOLD.to_vec();
    Ok(FontFamily {
        regular: FontData::new(regular.clone(), Some(BuiltinFont::Helvetica))?,
        bold: FontData::new(bold.clone(), Some(BuiltinFont::HelveticaBold))?,
        italic: FontData::new(regular, Some(BuiltinFont::HelveticaOblique))?,
        bold_italic: FontData::new(bold, Some(BuiltinFont::HelveticaBoldOblique))?,
    })
}

/// Loads the metric font family, searching `explicit` first.
///
/// Search order: `explicit`, `RESUME_RENDER_FONTS_DIR`, `assets/fonts` next to
/// the executable, `assets/fonts` in the crate sources, common system Liberation
/// Sans directories.  When none of them has the family, the Windows Arial
/// family is tried, then the bundled DejaVu Sans metrics.
pub fn font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let primary = resolve_font_directory(explicit).and_then(|dir| {
        debug!(
            "Loading {} metrics from {}",
            DEFAULT_FONT_FAMILY_NAME,
            dir.display()
        );
        load_helvetica_family(&dir, &LIBERATION_FILES)
    });

    match primary {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match windows_fallback_font_family() {
            Ok(fallback) => {
                warn!(
                    "{} fonts unavailable ({}); falling back to Windows '{}' family.",
                    DEFAULT_FONT_FAMILY_NAME, err, WINDOWS_FALLBACK_FAMILY_NAME
                );
                Ok(fallback)
            }
            Err(fallback_err) if fonts_missing(&fallback_err) => {
                debug!(
                    "{} fonts unavailable ({}); Windows fallback failed ({}); using bundled {} metrics",
                    DEFAULT_FONT_FAMILY_NAME, err, fallback_err, BUNDLED_FAMILY_NAME
                );
                bundled_font_family()
            }
            Err(fallback_err) => Err(fallback_err),
        },
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_searched_first() {
        let explicit = PathBuf::from("/__resume_render_explicit_fonts__");
        let candidates = font_directory_candidates(Some(&explicit));
        assert_eq!(candidates.first(), Some(&explicit));
        assert!(candidates.contains(&bundled_fonts_source_dir()));
    }

    #[test]
    fn bundled_directory_is_listed_once() {
        let candidates = font_directory_candidates(Some(&bundled_fonts_source_dir()));
        assert_eq!(
            candidates
                .iter()
                .filter(|c| **c == bundled_fonts_source_dir())
                .count(),
            1
        );
    }

    #[test]
    fn missing_directory_reports_every_face() {
        let missing =
            missing_font_files(Path::new("/__resume_render_nowhere__"), &LIBERATION_FILES);
        assert_eq!(missing.len(), 4);
    }

    #[test]
    fn bundled_family_always_loads() {
        let family = bundled_font_family().expect("bundled fonts");
        let cache = genpdf::fonts::FontCache::new(family);
        let style = genpdf::style::Style::new().with_font_size(10);
        let width: f64 = style.str_width(&cache, "Resume").into();
        assert!(width > 0.0);
    }

    #[test]
    fn missing_directories_fall_back_to_bundled_metrics() {
        let family = font_family(Some(Path::new("/__resume_render_nowhere__")));
        assert!(family.is_ok());
    }
}
