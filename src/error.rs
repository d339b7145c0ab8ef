#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the generator crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the loader, the renderers and the CLI.
///
/// Every failure is fatal for the current run. Instances are usually built
/// through [`Error::shape`], [`io_error`] and [`write_error`], or converted
/// from serde error types via the provided `From` implementations.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Returned when the redirect configuration does not exist.
    #[error("{display} not found!")]
    ConfigNotFound {
        /// Location that was expected to hold the configuration.
        path:    PathBuf,
        /// Path rendered for the message, without quoting.
        display: String
    },
    /// Wraps I/O errors that occur while reading the configuration.
    #[error("failed to read configuration from {path:?}: {source}")]
    Io {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when the configuration does not have the expected structure.
    #[error("invalid configuration: {message}")]
    ConfigShape {
        /// Human readable message describing the structural problem.
        message: String
    },
    /// Wraps I/O errors that occur while writing generated artifacts.
    #[error("failed to write artifact at {path:?}: {source}")]
    Write {
        /// Location of the artifact being produced.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    },
    /// Wraps serialization errors when printing the normalized model.
    #[error("failed to serialize configuration: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    }
}

impl Error {
    /// Constructs a configuration shape error from the provided message.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the structural problem.
    pub fn shape<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::ConfigShape {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation
    /// and is what the CLI prints before exiting.
    pub fn to_display_string(&self) -> String {
        format!("Error: {self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::ConfigNotFound`] variant for the missing path.
pub fn not_found(path: &Path) -> Error {
    Error::ConfigNotFound {
        path:    path.to_path_buf(),
        display: path.display().to_string()
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Write`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the artifact that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn shape_constructor_populates_message() {
        let error = Error::shape("redirects must be a list");
        match error {
            Error::ConfigShape {
                ref message
            } => {
                assert_eq!(message, "redirects must be a list");
            }
            other => panic!("expected shape error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_prefixes_display() {
        let error = Error::shape("display me");
        assert_eq!(error.to_display_string(), format!("Error: {error}"));
    }

    #[test]
    fn not_found_message_names_the_path() {
        let error = super::not_found(std::path::Path::new("redirects.yaml"));
        assert_eq!(error.to_display_string(), "Error: redirects.yaml not found!");
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/redirects.yaml");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn write_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/_redirects");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = super::write_error(path, io_error);

        match error {
            Error::Write {
                path: ref stored_path,
                ..
            } => assert_eq!(stored_path, path),
            other => panic!("expected write error, got {other:?}")
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_parse_variant() {
        let error = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: Error = error.into();
        assert!(matches!(mapped, Error::Parse { .. }));
    }

    #[test]
    fn serde_json_conversion_maps_to_serialize_variant() {
        let invalid = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Serialize { .. }));
    }
}
