// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of reporting to TeamCity.

use std::io;

use derive_more::with_trait::{Display, Error as StdError, From};

/// Error of emitting TeamCity output.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Writing into the output failed.
    #[display("I/O error: {_0}")]
    Io(io::Error),

    /// Required build metadata is absent at the moment of emission.
    ///
    /// This is a configuration error: the run should abort rather than emit
    /// a malformed message.
    #[display("Missing required environment variable `{var}`")]
    #[from(ignore)]
    MissingEnv {
        /// Name of the environment variable supplying the value.
        #[error(not(source))]
        var: &'static str,
    },

    /// Status name not recognized as a [`Status`].
    ///
    /// [`Status`]: crate::Status
    #[display("Unknown status: `{_0}`")]
    #[from(ignore)]
    UnknownStatus(#[error(not(source))] String),

    /// Suite end reported while no suite is current.
    #[display("No suite is started")]
    #[from(ignore)]
    NoSuite,
}

/// Alias for [`Result`] with an [`Error`].
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Returns the name of the missing environment variable, if this is a
    /// [`Error::MissingEnv`].
    #[must_use]
    pub const fn missing_var(&self) -> Option<&'static str> {
        match self {
            Self::MissingEnv { var } => Some(*var),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn io_error_keeps_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));

        assert!(err.to_string().contains("gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn missing_env_names_variable() {
        let err = Error::MissingEnv { var: "SITE" };

        assert_eq!(
            err.to_string(),
            "Missing required environment variable `SITE`",
        );
        assert_eq!(err.missing_var(), Some("SITE"));
        assert!(err.source().is_none());
    }

    #[test]
    fn unknown_status_has_no_source() {
        let err = Error::UnknownStatus("weird".into());

        assert_eq!(err.to_string(), "Unknown status: `weird`");
        assert_eq!(err.missing_var(), None);
        assert!(err.source().is_none());
    }
}
