// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for outputting runner [`Event`]s.

pub mod teamcity;

use std::io;

use crate::{Event, Result, Step, StepResult, Suite, Test};

#[doc(inline)]
pub use self::teamcity::TeamCity;

/// Receiver of runner lifecycle callbacks.
///
/// A runner calls these sequentially, on a single thread, in the order of
/// [`Event`] variants: a suite start, then for every test its start followed
/// by a start and a result per executed step, and finally the suite end.
pub trait Formatter {
    /// Handles the start of a [`Suite`].
    ///
    /// # Errors
    ///
    /// If output fails to be written.
    fn on_suite_start(&mut self, suite: &Suite) -> Result<()>;

    /// Handles the start of a [`Test`].
    ///
    /// # Errors
    ///
    /// If output fails to be written.
    fn on_test_start(&mut self, test: &Test) -> Result<()>;

    /// Handles the start of a [`Step`].
    ///
    /// # Errors
    ///
    /// If output fails to be written.
    fn on_step_start(&mut self, step: &Step) -> Result<()>;

    /// Handles the [`StepResult`] of the current [`Step`].
    ///
    /// # Errors
    ///
    /// If output fails to be written, or required build metadata is missing.
    fn on_step_result(&mut self, result: &StepResult) -> Result<()>;

    /// Handles the end of the current [`Suite`].
    ///
    /// # Errors
    ///
    /// If output fails to be written, or no [`Suite`] is started.
    fn on_end(&mut self) -> Result<()>;

    /// Dispatches the given [`Event`] to the matching callback.
    ///
    /// # Errors
    ///
    /// See the callbacks.
    fn handle_event(&mut self, ev: Event<'_>) -> Result<()> {
        match ev {
            Event::SuiteStarted(suite) => self.on_suite_start(suite),
            Event::TestStarted(test) => self.on_test_start(test),
            Event::StepStarted(step) => self.on_step_start(step),
            Event::StepFinished(result) => self.on_step_result(result),
            Event::Ended => self.on_end(),
        }
    }
}

/// [`io::Write`] extension for easier manipulation with strings.
pub trait WriteStrExt: io::Write {
    /// Writes the given `string` into this writer.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_str(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_all(string.as_ref().as_bytes())
    }

    /// Writes the given `string` into this writer followed by a newline.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_line(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_str(string.as_ref())
            .and_then(|()| self.write_str("\n"))
    }
}

impl<T: io::Write + ?Sized> WriteStrExt for T {}
