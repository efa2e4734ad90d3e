// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Canonical outcome of a [`Step`], [`Test`] or [`Suite`].
//!
//! [`Step`]: crate::Step
//! [`Suite`]: crate::Suite
//! [`Test`]: crate::Test

use std::str::FromStr;

use derive_more::with_trait::Display;

use crate::Error;

/// Outcome of a [`Step`], [`Test`] or [`Suite`].
///
/// Runners representing statuses differently (plain strings, qualified
/// enum-like names) convert into this type on receipt via [`FromStr`].
///
/// [`Step`]: crate::Step
/// [`Suite`]: crate::Suite
/// [`Test`]: crate::Test
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Status {
    /// Executed successfully.
    #[display("passed")]
    Passed,

    /// Executed and failed.
    #[display("failed")]
    Failed,

    /// Not executed, either filtered out upstream or following a failure.
    #[display("skipped")]
    Skipped,

    /// No step definition matches.
    #[display("undefined")]
    Undefined,

    /// Not (yet) conclusively executed.
    #[display("untested")]
    Untested,
}

impl Status {
    /// All [`Status`]es in the order summaries render them.
    pub const ALL: [Self; 5] = [
        Self::Passed,
        Self::Failed,
        Self::Skipped,
        Self::Undefined,
        Self::Untested,
    ];

    /// Returns the lowercase name of this [`Status`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Undefined => "undefined",
            Self::Untested => "untested",
        }
    }

    /// Indicates whether this [`Status`] concludes a [`Test`].
    ///
    /// [`Test`]: crate::Test
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Untested)
    }
}

impl FromStr for Status {
    type Err = Error;

    /// Parses `passed`, `Passed`, `PASSED` and qualified names like
    /// `Status.passed` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.rsplit_once('.').map_or(name, |(_, n)| n);
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownStatus(s.to_owned()))
    }
}

impl TryFrom<&str> for Status {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
