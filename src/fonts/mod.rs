//! Bundled font resolution for the document renderer.
//!
//! The renderer needs a complete regular/bold/italic/bold-italic family.
//! The search order is the `SALESDOC_FONTS_DIR` environment variable, an
//! `assets/fonts` directory next to the running binary, then the crate's
//! own `assets/fonts` directory.  See `assets/fonts/README.md` for setup.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};

/// Name of the bundled font family.
pub const FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable overriding the font search path.
pub const FONTS_DIR_VAR: &str = "SALESDOC_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

fn candidate_directories() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(path) = env::var(FONTS_DIR_VAR) {
        if !path.trim().is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_files(directory: &Path) -> Vec<&'static str> {
    FONT_FILES
        .iter()
        .copied()
        .filter(|name| !directory.join(name).is_file())
        .collect()
}

fn resolve_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in candidate_directories() {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_files(&candidate);
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
            "Unable to locate the document fonts. Checked: {}. See assets/fonts/README.md or set {}.",
            attempts.join(", "),
            FONTS_DIR_VAR
        ),
        io::Error::new(io::ErrorKind::NotFound, "document fonts not found"),
    ))
}

/// Loads the bundled font family for use with `genpdf::Document::new`.
pub fn document_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_directory()?;

    fonts::from_files(&directory, FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

/// Whether a complete bundled font family is present on disk.
///
/// Rendering tests use this to skip (with a message) on machines that have
/// not set up the font assets.
pub fn fonts_available() -> bool {
    resolve_directory().is_ok()
}
