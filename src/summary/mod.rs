// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Run totals and their rendering.
//!
//! A runner picks one [`SummaryFormatter`] at startup (usually through the
//! [`SummaryFormat`] CLI option) and renders every summary of the process
//! with it:
//!
//! - [`stats`]: status counts per [`StatementType`]
//! - [`formatting`]: [`Plain`] and [`TeamCity`] renderings

pub mod formatting;
pub mod stats;

pub use self::{
    formatting::{Plain, SummaryFormat, SummaryFormatter, TeamCity},
    stats::{RunSummary, StatementType, StatusSummary},
};
