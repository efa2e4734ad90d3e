// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [TeamCity service messages][1] [`Formatter`] implementation.
//!
//! - [`cli`]: CLI options and build metadata
//! - [`message`]: service message rendering and escaping
//! - [`failure`]: `testFailed` message composition
//! - [`state`]: per-test reporting state
//! - [`writer`]: the [`TeamCity`] writer itself
//!
//! [`Formatter`]: crate::Formatter
//! [1]: https://www.jetbrains.com/help/teamcity/service-messages.html

pub mod cli;
pub mod failure;
pub mod message;
pub mod state;
pub mod writer;

pub use self::{
    cli::{Cli, Environment, Metadata},
    message::{ascii_safe, escape, ServiceMessage},
    writer::TeamCity,
};
