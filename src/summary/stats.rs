// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Status counts of a run.

use std::collections::HashMap;

use derive_more::with_trait::Display;

use crate::Status;

/// Kind of a statement the [`StatusSummary`] counts.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum StatementType {
    /// [`Suite`]s.
    ///
    /// [`Suite`]: crate::Suite
    #[display("feature")]
    Feature,

    /// [`Test`]s.
    ///
    /// [`Test`]: crate::Test
    #[display("scenario")]
    Scenario,

    /// [`Step`]s.
    ///
    /// [`Step`]: crate::Step
    #[display("step")]
    Step,
}

impl StatementType {
    /// All [`StatementType`]s in the order a [`RunSummary`] renders them.
    pub const ALL: [Self; 3] = [Self::Feature, Self::Scenario, Self::Step];

    /// Returns the singular label of this [`StatementType`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Scenario => "scenario",
            Self::Step => "step",
        }
    }
}

/// Counts of [`Status`]es of a single [`StatementType`] over a whole run.
///
/// A [`Status`] never recorded is absent, which differs from being counted
/// as `0`: absent ones aren't rendered at all.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StatusSummary(HashMap<Status, usize>);

impl StatusSummary {
    /// Creates a new empty [`StatusSummary`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`StatusSummary`] with every of the given `statuses`
    /// present and counted as `0`.
    #[must_use]
    pub fn zeroed(statuses: impl IntoIterator<Item = Status>) -> Self {
        statuses.into_iter().map(|st| (st, 0)).collect()
    }

    /// Sets the `count` of the given [`Status`].
    #[must_use]
    pub fn with(mut self, status: Status, count: usize) -> Self {
        _ = self.0.insert(status, count);
        self
    }

    /// Adds `n` to the count of the given [`Status`].
    pub fn add(&mut self, status: Status, n: usize) {
        *self.0.entry(status).or_default() += n;
    }

    /// Increments the count of the given [`Status`] by one.
    pub fn increment(&mut self, status: Status) {
        self.add(status, 1);
    }

    /// Returns the count of the given [`Status`], if it's present.
    #[must_use]
    pub fn get(&self, status: Status) -> Option<usize> {
        self.0.get(&status).copied()
    }
}

impl FromIterator<(Status, usize)> for StatusSummary {
    fn from_iter<I: IntoIterator<Item = (Status, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// [`StatusSummary`]s of every [`StatementType`] of a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunSummary {
    /// Outcomes of [`Suite`]s.
    ///
    /// [`Suite`]: crate::Suite
    pub features: StatusSummary,

    /// Outcomes of [`Test`]s.
    ///
    /// [`Test`]: crate::Test
    pub scenarios: StatusSummary,

    /// Outcomes of [`Step`]s.
    ///
    /// [`Step`]: crate::Step
    pub steps: StatusSummary,
}

impl Default for RunSummary {
    fn default() -> Self {
        use Status as S;

        let common = [S::Passed, S::Failed, S::Skipped, S::Untested];
        Self {
            features: StatusSummary::zeroed(common),
            scenarios: StatusSummary::zeroed(common),
            steps: StatusSummary::zeroed(Status::ALL),
        }
    }
}

impl RunSummary {
    /// Creates a new [`RunSummary`] with nothing counted yet.
    ///
    /// `undefined` is tracked for [`StatementType::Step`]s only, until a
    /// [`Suite`] or a [`Test`] actually ends up undefined.
    ///
    /// [`Suite`]: crate::Suite
    /// [`Test`]: crate::Test
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the [`StatusSummary`] of the given [`StatementType`].
    #[must_use]
    pub const fn get(&self, statement: StatementType) -> &StatusSummary {
        match statement {
            StatementType::Feature => &self.features,
            StatementType::Scenario => &self.scenarios,
            StatementType::Step => &self.steps,
        }
    }

    /// Indicates whether anything failed or stayed undefined during the run.
    #[must_use]
    pub fn execution_has_failed(&self) -> bool {
        [Status::Failed, Status::Undefined].into_iter().any(|st| {
            StatementType::ALL
                .into_iter()
                .any(|stmt| self.get(stmt).get(st).unwrap_or(0) > 0)
        })
    }
}
