// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-[`Test`] reporting state.

use std::time::Duration;

use crate::{Status, StepResult, Test};

/// Reporting phase of a [`Test`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// `testStarted` is emitted, no terminal message yet.
    Running,

    /// `testFinished` is emitted with the contained [`Status`].
    Finished(Status),

    /// `testIgnored` is emitted.
    Ignored,
}

/// Current [`Test`] along with the [`StepResult`]s observed for it.
#[derive(Clone, Debug)]
pub struct TestState {
    /// [`Test`] being reported.
    test: Test,

    /// Reporting [`Phase`] of the [`Test`].
    phase: Phase,

    /// [`Status`]es of the observed [`StepResult`]s.
    results: Vec<Status>,

    /// Sum of durations of the observed [`StepResult`]s.
    duration: Duration,
}

impl TestState {
    /// Creates a new [`Phase::Running`] [`TestState`] of the given [`Test`].
    #[must_use]
    pub const fn new(test: Test) -> Self {
        Self {
            test,
            phase: Phase::Running,
            results: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Returns the [`Test`] being reported.
    #[must_use]
    pub const fn test(&self) -> &Test {
        &self.test
    }

    /// Returns the current [`Phase`].
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the time the observed [`StepResult`]s took.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Records the given [`StepResult`].
    pub fn record(&mut self, result: &StepResult) {
        self.results.push(result.status);
        self.duration += result.duration;
    }

    /// Returns the [`Status`] of the [`Test`] as of the observed
    /// [`StepResult`]s.
    #[must_use]
    pub fn status(&self) -> Status {
        let any = |st| self.results.contains(&st);

        if self.test.skipped {
            Status::Skipped
        } else if any(Status::Failed) {
            Status::Failed
        } else if any(Status::Undefined) {
            Status::Undefined
        } else if self.results.len() < self.test.steps {
            Status::Untested
        } else if !self.results.is_empty()
            && self.results.iter().all(|&st| st == Status::Skipped)
        {
            Status::Skipped
        } else {
            Status::Passed
        }
    }

    /// Returns the number of [`Step`]s no [`StepResult`] was observed for.
    ///
    /// [`Step`]: crate::Step
    #[must_use]
    pub fn remaining_steps(&self) -> usize {
        self.test.steps.saturating_sub(self.results.len())
    }

    /// Moves into [`Phase::Finished`].
    pub fn finish(&mut self, status: Status) {
        self.phase = Phase::Finished(status);
    }

    /// Moves into [`Phase::Ignored`].
    pub fn ignore(&mut self) {
        self.phase = Phase::Ignored;
    }

    /// Indicates whether a terminal message has been emitted already.
    #[must_use]
    pub fn is_reported(&self) -> bool {
        self.phase != Phase::Running
    }
}

#[cfg(test)]
mod tests {
    use crate::Step;

    use super::*;

    fn result(status: Status) -> StepResult {
        StepResult::new(&Step::new("Given", "x"), status)
            .with_duration(Duration::from_millis(250))
    }

    fn state(steps: usize, results: &[Status]) -> TestState {
        let mut state = TestState::new(Test::new("T", steps));
        for &st in results {
            state.record(&result(st));
        }
        state
    }

    #[test]
    fn untested_until_all_steps_observed() {
        use Status as S;

        assert_eq!(state(3, &[]).status(), S::Untested);
        assert_eq!(state(3, &[S::Passed, S::Passed]).status(), S::Untested);
        assert_eq!(
            state(3, &[S::Passed, S::Passed, S::Passed]).status(),
            S::Passed,
        );
    }

    #[test]
    fn failure_concludes_early() {
        use Status as S;

        let st = state(3, &[S::Passed, S::Failed]);

        assert_eq!(st.status(), S::Failed);
        assert_eq!(st.remaining_steps(), 1);
        assert_eq!(st.duration(), Duration::from_millis(500));
    }

    #[test]
    fn failure_outranks_undefined() {
        use Status as S;

        assert_eq!(state(4, &[S::Undefined]).status(), S::Undefined);
        assert_eq!(state(4, &[S::Undefined, S::Failed]).status(), S::Failed);
    }

    #[test]
    fn all_skipped_steps_skip_the_test() {
        use Status as S;

        assert_eq!(state(2, &[S::Skipped, S::Skipped]).status(), S::Skipped);
        assert_eq!(state(2, &[S::Skipped, S::Passed]).status(), S::Passed);
    }

    #[test]
    fn filtered_test_is_skipped_regardless() {
        let st = TestState::new(Test::new("T", 2).skipped());

        assert_eq!(st.status(), Status::Skipped);
        assert_eq!(st.remaining_steps(), 2);
    }

    #[test]
    fn phases() {
        let mut st = state(1, &[Status::Passed]);
        assert_eq!(st.phase(), Phase::Running);
        assert!(!st.is_reported());

        st.finish(Status::Passed);
        assert_eq!(st.phase(), Phase::Finished(Status::Passed));
        assert!(st.is_reported());

        st.ignore();
        assert_eq!(st.phase(), Phase::Ignored);
        assert_eq!(st.test().name, "T");
    }
}
