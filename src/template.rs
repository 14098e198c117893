//! Loads HTML templates and fills in their `{{placeholder}}` tokens.
//!
//! There is no template language here: a placeholder is a literal token that
//! is replaced, everywhere it occurs, by a literal value. Nothing is escaped.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// An HTML template read from disk.
#[derive(Clone, Debug)]
pub struct Template {
    text: String,
}

impl Template {
    /// Reads the template at `path`. A missing file is reported as
    /// [`Error::Missing`] so callers can tell it apart from other I/O errors.
    pub fn load(path: &Path) -> Result<Template> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Template { text }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::Missing {
                    path: path.to_owned(),
                })
            }
            Err(err) => Err(Error::Read {
                path: path.to_owned(),
                err,
            }),
        }
    }

    /// Replaces each `(token, value)` pair in turn. Substitutions are applied
    /// sequentially, so a value that itself contains a later token will have
    /// that token replaced too.
    pub fn render(&self, substitutions: &[(&str, &str)]) -> String {
        substitutions
            .iter()
            .fold(self.text.clone(), |html, &(token, value)| {
                html.replace(token, value)
            })
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Template {
        Template {
            text: text.to_owned(),
        }
    }
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a template.
#[derive(Debug)]
pub enum Error {
    /// Returned when the template file does not exist.
    Missing { path: PathBuf },

    /// Returned for other I/O problems reading the template file.
    Read { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Missing { path } => {
                write!(f, "template not found: {}", path.display())
            }
            Error::Read { path, err } => {
                write!(f, "reading template '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Missing { .. } => None,
            Error::Read { path: _, err } => Some(err),
        }
    }
}
