// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = "[TeamCity service messages][1] output for Cucumber-style BDD \
          runners.\n\n\
          A runner drives a [`writer::TeamCity`] through the [`Formatter`] \
          callbacks (suite start, test start, step start, step result, end), \
          and renders the run totals with a [`summary::SummaryFormatter`] \
          chosen at startup.\n\n\
          [1]: https://www.jetbrains.com/help/teamcity/service-messages.html"]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_import_braces,
    unused_qualifications
)]

pub mod error;
pub mod event;
pub mod status;
pub mod summary;
pub mod writer;

pub extern crate gherkin;

#[doc(inline)]
pub use self::{
    error::{Error, Result},
    event::{Event, Step, StepResult, Suite, Table, Test},
    status::Status,
    summary::{RunSummary, StatementType, StatusSummary, SummaryFormat},
    writer::{Formatter, TeamCity},
};
