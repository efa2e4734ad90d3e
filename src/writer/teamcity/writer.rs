// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Main TeamCity writer implementation.

use std::{
    io, mem,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    summary::{RunSummary, SummaryFormatter},
    writer::{Formatter, WriteStrExt as _},
    Error, Result, Status, Step, StepResult, Suite, Test,
};

use super::{
    cli::{Cli, Environment},
    failure,
    message::{self, ServiceMessage},
    state::{Phase, TestState},
};

/// [TeamCity service messages][1] [`Formatter`] writing into an
/// [`io::Write`] implementor.
///
/// Only the outcome of a whole [`Test`] is reported: [`Step`]s show up as
/// progress messages. Every message carries the `flowId` generated once on
/// construction, so TeamCity doesn't interleave concurrent runs of one agent.
///
/// [1]: https://www.jetbrains.com/help/teamcity/service-messages.html
#[derive(Debug)]
pub struct TeamCity<Out: io::Write> {
    /// [`io::Write`] implementor to output service messages into.
    output: Out,

    /// Build metadata attached to finished [`Test`]s.
    env: Environment,

    /// Identifier of the flow all the messages belong to.
    flow_id: String,

    /// Whether to add a `timestamp` to messages.
    timestamps: bool,

    /// Current [`Suite`].
    suite: Option<Suite>,

    /// [`Status`]es of the [`Test`]s of the current [`Suite`].
    suite_results: Vec<Status>,

    /// Current [`Test`].
    test: Option<TestState>,

    /// Current [`Step`].
    step: Option<Step>,

    /// Totals of the run so far.
    summary: RunSummary,
}

impl<Out: io::Write> TeamCity<Out> {
    /// Creates a new [`TeamCity`] writer outputting into the given `output`,
    /// taking build metadata from the process environment.
    #[must_use]
    pub fn new(output: Out) -> Self {
        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64());
        Self {
            output,
            env: Environment::default(),
            flow_id: format!("Build{started:?}"),
            timestamps: false,
            suite: None,
            suite_results: Vec::new(),
            test: None,
            step: None,
            summary: RunSummary::new(),
        }
    }

    /// Sets the [`Environment`] to take build metadata from.
    #[must_use]
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Sets whether to add a `timestamp` to every message.
    #[must_use]
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// Overrides the generated flow identifier.
    #[must_use]
    pub fn with_flow_id(mut self, id: impl Into<String>) -> Self {
        self.flow_id = id.into();
        self
    }

    /// Applies the given [`Cli`] options to this [`TeamCity`] writer.
    pub fn apply_cli(&mut self, cli: &Cli) {
        self.env = cli.environment();
        self.timestamps = cli.timestamps;
    }

    /// Returns the flow identifier of this writer.
    #[must_use]
    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    /// Returns the totals of the run so far.
    #[must_use]
    pub const fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Returns the underlying output.
    #[must_use]
    pub const fn output(&self) -> &Out {
        &self.output
    }

    /// Consumes this writer returning the underlying output.
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }

    /// Writes the totals of the run rendered with the given
    /// [`SummaryFormatter`].
    ///
    /// # Errors
    ///
    /// If output fails to be written.
    pub fn write_summary(
        &mut self,
        formatter: &impl SummaryFormatter,
    ) -> Result<()> {
        self.output.write_str(formatter.format_run(&self.summary))?;
        self.output.flush()?;
        Ok(())
    }

    /// Writes the given [`ServiceMessage`] tagged with the flow identifier
    /// (and a timestamp, if enabled).
    fn emit(&mut self, msg: ServiceMessage) -> Result<()> {
        let mut msg = msg.attr("flowId", &self.flow_id);
        if self.timestamps {
            msg = msg.attr("timestamp", message::format_timestamp(SystemTime::now()));
        }
        self.output.write_line(msg.to_string())?;
        Ok(())
    }

    /// Emits `testFinished` of the current [`Test`] with the given
    /// [`Status`], preceded by `testFailed` describing the `failure`, if any.
    ///
    /// Build metadata is resolved before anything is written.
    fn finish_test(
        &mut self,
        status: Status,
        failure: Option<&StepResult>,
    ) -> Result<()> {
        let Some(state) = self.test.as_ref() else {
            return Ok(());
        };
        let name = state.test().name.clone();
        let duration = state.duration();
        let meta = self.env.resolve()?;

        if let Some(result) = failure.filter(|_| status == Status::Failed) {
            let msg = failure::compose_message(result, self.step.as_ref());
            self.emit(
                ServiceMessage::new("testFailed")
                    .attr("name", &name)
                    .attr("message", msg)
                    .attr("details", result.error_message.as_deref().unwrap_or_default()),
            )?;
        }
        self.emit(
            ServiceMessage::new("testFinished")
                .attr("name", &name)
                .attr("duration", format!("{:?}", duration.as_secs_f64()))
                .attr("outcome", status.as_str())
                .attr("framework", meta.framework)
                .attr("service", meta.service)
                .attr("environment", meta.environment),
        )?;

        tracing::debug!(test = %name, %status, "test finished");
        if let Some(state) = self.test.as_mut() {
            state.finish(status);
        }
        Ok(())
    }

    /// Concludes the current [`Test`], if any: a skipped one not reported
    /// yet gets its `testIgnored`, one with another terminal [`Status`] its
    /// `testFinished`, and the run totals are updated.
    fn close_test(&mut self) -> Result<()> {
        let pending = self
            .test
            .as_ref()
            .filter(|st| !st.is_reported())
            .map(|st| (st.status(), st.test().name.clone()));
        match pending {
            Some((Status::Skipped, name)) => {
                self.emit(
                    ServiceMessage::new("testIgnored")
                        .attr("name", name)
                        .attr("message", ""),
                )?;
                if let Some(state) = self.test.as_mut() {
                    state.ignore();
                }
            }
            Some((status, _)) if status.is_terminal() => {
                self.finish_test(status, None)?;
            }
            _ => {}
        }

        self.step = None;
        let Some(state) = self.test.take() else {
            return Ok(());
        };
        let status = match state.phase() {
            Phase::Finished(st) => st,
            Phase::Ignored => Status::Skipped,
            Phase::Running => {
                let status = state.status();
                tracing::warn!(
                    test = %state.test().name,
                    %status,
                    "test ended without a terminal status, not reported",
                );
                status
            }
        };
        let remaining = if status == Status::Untested {
            Status::Untested
        } else {
            Status::Skipped
        };
        self.summary.steps.add(remaining, state.remaining_steps());
        self.summary.scenarios.increment(status);
        self.suite_results.push(status);
        Ok(())
    }

    /// Counts the current [`Suite`], if any, into the run totals.
    fn close_suite(&mut self) -> Option<Suite> {
        let suite = self.suite.take()?;
        let results = mem::take(&mut self.suite_results);
        let any = |st| results.contains(&st);

        let status = if any(Status::Failed) {
            Status::Failed
        } else if any(Status::Undefined) {
            Status::Undefined
        } else if results.is_empty() || any(Status::Untested) {
            Status::Untested
        } else if any(Status::Passed) {
            Status::Passed
        } else {
            Status::Skipped
        };
        self.summary.features.increment(status);
        Some(suite)
    }
}

impl<Out: io::Write> Formatter for TeamCity<Out> {
    fn on_suite_start(&mut self, suite: &Suite) -> Result<()> {
        self.close_test()?;
        if let Some(prev) = self.close_suite() {
            tracing::warn!(suite = %prev.name, "suite started before the previous one ended");
            self.emit(ServiceMessage::new("testSuiteFinished").attr("name", &prev.name))?;
        }

        tracing::debug!(suite = %suite.name, "suite started");
        self.suite = Some(suite.clone());
        self.emit(ServiceMessage::new("testSuiteStarted").attr("name", &suite.name))
    }

    fn on_test_start(&mut self, test: &Test) -> Result<()> {
        self.close_test()?;

        tracing::debug!(test = %test.name, skipped = test.skipped, "test started");
        self.test = Some(TestState::new(test.clone()));
        self.emit(
            ServiceMessage::new("testStarted")
                .attr("name", &test.name)
                .attr("captureStandardOutput", "false"),
        )
    }

    fn on_step_start(&mut self, step: &Step) -> Result<()> {
        self.step = Some(step.clone());
        Ok(())
    }

    fn on_step_result(&mut self, result: &StepResult) -> Result<()> {
        let progress = format!("{:>6} {} ... ", result.keyword, result.name);
        self.emit(ServiceMessage::single("progressMessage", &progress))?;
        self.summary.steps.increment(result.status);

        let Some(state) = self.test.as_mut() else {
            tracing::warn!(step = %result.name, "step result outside of any test");
            return Ok(());
        };
        state.record(result);
        if state.is_reported() {
            return Ok(());
        }
        let status = state.status();
        if status == Status::Untested {
            return Ok(());
        }

        self.finish_test(status, Some(result))
    }

    fn on_end(&mut self) -> Result<()> {
        self.close_test()?;
        let suite = self.close_suite().ok_or(Error::NoSuite)?;

        tracing::debug!(suite = %suite.name, "suite finished");
        self.emit(ServiceMessage::new("testSuiteFinished").attr("name", &suite.name))?;
        self.output.flush()?;
        Ok(())
    }
}
