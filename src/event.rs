// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Entities a runner reports, and the [`Event`]s carrying them.
//!
//! A [`Suite`] is a [Feature], a [`Test`] is a [Scenario] and a [`Step`] is a
//! [Step][1]. Each can be built from its parsed [`gherkin`] counterpart.
//!
//! [Feature]: https://cucumber.io/docs/gherkin/reference#feature
//! [Scenario]: https://cucumber.io/docs/gherkin/reference#example
//! [1]: https://cucumber.io/docs/gherkin/reference#steps

use std::time::Duration;

use crate::Status;

/// Named group of [`Test`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Suite {
    /// Name of this [`Suite`].
    pub name: String,
}

impl Suite {
    /// Creates a new [`Suite`] with the given `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&gherkin::Feature> for Suite {
    fn from(feature: &gherkin::Feature) -> Self {
        Self::new(feature.name.clone())
    }
}

/// Independently passing or failing unit of a [`Suite`].
///
/// Its [`Status`] isn't carried here: it's derived from the [`StepResult`]s
/// reported for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Test {
    /// Name of this [`Test`].
    pub name: String,

    /// Number of [`Step`]s the runner is going to execute for this [`Test`],
    /// background ones included.
    pub steps: usize,

    /// Indicator whether this [`Test`] was filtered out upstream and won't be
    /// executed at all.
    pub skipped: bool,
}

impl Test {
    /// Creates a new [`Test`] expected to execute `steps` [`Step`]s.
    #[must_use]
    pub fn new(name: impl Into<String>, steps: usize) -> Self {
        Self {
            name: name.into(),
            steps,
            skipped: false,
        }
    }

    /// Marks this [`Test`] as filtered out upstream.
    #[must_use]
    pub fn skipped(mut self) -> Self {
        self.skipped = true;
        self
    }

    /// Creates a new [`Test`] out of a parsed [`gherkin::Scenario`], counting
    /// the steps of the `background` it runs after.
    #[must_use]
    pub fn from_scenario(
        scenario: &gherkin::Scenario,
        background: Option<&gherkin::Background>,
    ) -> Self {
        let background = background.map_or(0, |bg| bg.steps.len());
        Self::new(scenario.name.clone(), background + scenario.steps.len())
    }
}

/// Tabular data attached to a [`Step`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    /// Rows of cells, the heading row first.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a new [`Table`] out of the given `rows`.
    #[must_use]
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

impl From<&gherkin::Table> for Table {
    fn from(table: &gherkin::Table) -> Self {
        Self {
            rows: table.rows.clone(),
        }
    }
}

/// Single executable instruction of a [`Test`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    /// Keyword of this [`Step`] (`Given`, `When`, `Then`, `And`, ...).
    pub keyword: String,

    /// Text of this [`Step`] following its keyword.
    pub name: String,

    /// [`Table`] attached to this [`Step`], if any.
    pub table: Option<Table>,

    /// Free text (doc string) attached to this [`Step`], if any.
    pub text: Option<String>,
}

impl Step {
    /// Creates a new [`Step`] without any attachments.
    #[must_use]
    pub fn new(keyword: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            table: None,
            text: None,
        }
    }

    /// Attaches the given [`Table`] to this [`Step`].
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }

    /// Attaches the given free `text` to this [`Step`].
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl From<&gherkin::Step> for Step {
    fn from(step: &gherkin::Step) -> Self {
        Self {
            keyword: step.keyword.trim().to_owned(),
            name: step.value.clone(),
            table: step.table.as_ref().map(Table::from),
            text: step.docstring.clone(),
        }
    }
}

/// Outcome of executing a single [`Step`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StepResult {
    /// Keyword of the executed [`Step`].
    pub keyword: String,

    /// Name of the executed [`Step`].
    pub name: String,

    /// [`Status`] the [`Step`] ended with.
    pub status: Status,

    /// Time the [`Step`] took.
    pub duration: Duration,

    /// Error message of a failed [`Step`], if any.
    pub error_message: Option<String>,
}

impl StepResult {
    /// Creates a new [`StepResult`] of the given [`Step`].
    #[must_use]
    pub fn new(step: &Step, status: Status) -> Self {
        Self {
            keyword: step.keyword.clone(),
            name: step.name.clone(),
            status,
            duration: Duration::ZERO,
            error_message: None,
        }
    }

    /// Creates a new [`Status::Passed`] [`StepResult`] of the given [`Step`].
    #[must_use]
    pub fn passed(step: &Step) -> Self {
        Self::new(step, Status::Passed)
    }

    /// Creates a new [`Status::Failed`] [`StepResult`] of the given [`Step`]
    /// with the provided `error` message.
    #[must_use]
    pub fn failed(step: &Step, error: impl Into<String>) -> Self {
        Self::new(step, Status::Failed).with_error(error)
    }

    /// Sets the time the [`Step`] took.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the error message of the [`Step`].
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error_message = Some(error.into());
        self
    }
}

/// Lifecycle callback of a runner, in the order a runner fires them.
#[derive(Clone, Copy, Debug)]
pub enum Event<'a> {
    /// [`Suite`] started.
    SuiteStarted(&'a Suite),

    /// [`Test`] started.
    TestStarted(&'a Test),

    /// [`Step`] started.
    StepStarted(&'a Step),

    /// [`Step`] finished with a [`StepResult`].
    StepFinished(&'a StepResult),

    /// Current [`Suite`] ended.
    Ended,
}

#[cfg(test)]
mod tests {
    use gherkin::GherkinEnv;

    use super::*;

    const FEATURE: &str = "\
Feature: Deliveries

  Background:
    Given a warehouse

  Scenario: Ship a parcel
    Given the parcels:
      | id | weight |
      | 1  | 10     |
    When I ship it
    Then the label reads:
      \"\"\"
      FRAGILE
      \"\"\"
";

    fn feature() -> gherkin::Feature {
        gherkin::Feature::parse(FEATURE, GherkinEnv::default())
            .expect("valid feature")
    }

    #[test]
    fn suite_from_feature() {
        assert_eq!(Suite::from(&feature()), Suite::new("Deliveries"));
    }

    #[test]
    fn test_counts_background_steps() {
        let feature = feature();
        let test =
            Test::from_scenario(&feature.scenarios[0], feature.background.as_ref());

        assert_eq!(test, Test::new("Ship a parcel", 4));
        assert!(!test.skipped);
        assert!(test.skipped().skipped);
    }

    #[test]
    fn step_carries_table_and_text() {
        let feature = feature();
        let steps = &feature.scenarios[0].steps;

        let with_table = Step::from(&steps[0]);
        assert_eq!(with_table.keyword, "Given");
        assert_eq!(with_table.name, "the parcels:");
        assert_eq!(
            with_table.table,
            Some(Table::new([["id", "weight"], ["1", "10"]])),
        );
        assert_eq!(with_table.text, None);

        let with_text = Step::from(&steps[2]);
        assert_eq!(with_text.keyword, "Then");
        assert_eq!(with_text.table, None);
        assert_eq!(with_text.text.as_deref().map(str::trim), Some("FRAGILE"));
    }

    #[test]
    fn step_result_builders() {
        let step = Step::new("When", "I ship it");

        let passed = StepResult::passed(&step)
            .with_duration(Duration::from_millis(1500));
        assert_eq!(passed.status, Status::Passed);
        assert_eq!(passed.duration, Duration::from_millis(1500));
        assert_eq!(passed.error_message, None);

        let failed = StepResult::failed(&step, "boom");
        assert_eq!(failed.keyword, "When");
        assert_eq!(failed.name, "I ship it");
        assert_eq!(failed.status, Status::Failed);
        assert_eq!(failed.error_message.as_deref(), Some("boom"));
    }
}
