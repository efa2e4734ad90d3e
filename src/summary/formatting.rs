// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Renderings of a [`StatusSummary`].

use itertools::Itertools as _;

use crate::{writer::teamcity::message::ServiceMessage, Status};

use super::stats::{RunSummary, StatementType, StatusSummary};

/// Strategy of rendering the [`StatusSummary`] of one [`StatementType`].
///
/// Chosen once, when a runner is configured, and used for every summary the
/// process renders afterwards.
pub trait SummaryFormatter {
    /// Renders the given [`StatusSummary`] of `statement`s.
    fn format_summary(
        &self,
        statement: StatementType,
        summary: &StatusSummary,
    ) -> String;

    /// Renders the whole [`RunSummary`]: features, scenarios and steps, in
    /// this order.
    fn format_run(&self, run: &RunSummary) -> String {
        StatementType::ALL
            .into_iter()
            .map(|stmt| self.format_summary(stmt, run.get(stmt)))
            .collect()
    }
}

/// Counts to render, in the order to render them.
///
/// `untested` is optional: it's omitted when its count is `0`.
fn visible_counts(
    summary: &StatusSummary,
) -> impl Iterator<Item = (Status, usize)> + '_ {
    Status::ALL.into_iter().filter_map(move |st| {
        summary
            .get(st)
            .filter(|&n| !(st == Status::Untested && n == 0))
            .map(|n| (st, n))
    })
}

/// Adds plural suffix to the `singular` label, unless `num` is `1`.
fn maybe_plural(singular: &str, num: usize) -> String {
    if num == 1 {
        singular.to_owned()
    } else {
        format!("{singular}s")
    }
}

/// Runner's own rendering: `3 scenarios passed, 1 scenario failed`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Plain;

impl SummaryFormatter for Plain {
    fn format_summary(
        &self,
        statement: StatementType,
        summary: &StatusSummary,
    ) -> String {
        let line = visible_counts(summary)
            .map(|(st, n)| {
                format!("{n} {} {st}", maybe_plural(statement.as_str(), n))
            })
            .join(", ");
        format!("{line}\n")
    }
}

/// [`Plain`] rendering followed by a [`setParameter`][1] service message per
/// rendered count, exposing it to the build as `env.<LABELS>_<STATUS>`.
///
/// [1]: https://www.jetbrains.com/help/teamcity/service-messages.html#set-parameter
#[derive(Clone, Copy, Debug, Default)]
pub struct TeamCity;

impl TeamCity {
    /// Returns the name of the build parameter holding the count of
    /// `statement`s ended with the given [`Status`], like
    /// `env.SCENARIOS_PASSED`.
    #[must_use]
    pub fn parameter_name(statement: StatementType, status: Status) -> String {
        format!(
            "env.{}S_{}",
            statement.as_str().to_uppercase(),
            status.as_str().to_uppercase(),
        )
    }
}

impl SummaryFormatter for TeamCity {
    fn format_summary(
        &self,
        statement: StatementType,
        summary: &StatusSummary,
    ) -> String {
        let mut out = Plain.format_summary(statement, summary);
        for (st, n) in visible_counts(summary) {
            let msg = ServiceMessage::new("setParameter")
                .attr("name", Self::parameter_name(statement, st))
                .attr("value", n.to_string());
            out.push_str(&msg.to_string());
            out.push('\n');
        }
        out
    }
}

/// [`SummaryFormatter`] selectable on startup.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum SummaryFormat {
    /// [`Plain`] rendering.
    Plain,

    /// [`TeamCity`] rendering.
    #[default]
    #[value(name = "teamcity")]
    TeamCity,
}

impl SummaryFormatter for SummaryFormat {
    fn format_summary(
        &self,
        statement: StatementType,
        summary: &StatusSummary,
    ) -> String {
        match self {
            Self::Plain => Plain.format_summary(statement, summary),
            Self::TeamCity => TeamCity.format_summary(statement, summary),
        }
    }
}
