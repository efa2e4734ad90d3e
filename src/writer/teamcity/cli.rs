// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options and build metadata of a [`TeamCity`] writer.
//!
//! [`TeamCity`]: super::TeamCity

use std::env;

use crate::{summary::SummaryFormat, Error, Result};

/// Variable holding the name of the TeamCity build configuration.
pub const FRAMEWORK_VAR: &str = "TEAMCITY_BUILDCONF_NAME";

/// Variable holding the name of the TeamCity project.
pub const SERVICE_VAR: &str = "TEAMCITY_PROJECT_NAME";

/// Variable holding the identifier of the site the run targets.
pub const ENVIRONMENT_VAR: &str = "SITE";

/// CLI options of a [`TeamCity`] writer.
///
/// Meant to be flattened into a runner's own CLI.
///
/// [`TeamCity`]: super::TeamCity
#[derive(Clone, Debug, Default, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Build configuration name reported as `framework` of finished tests.
    #[arg(
        id = "tc-framework",
        long = "tc-framework",
        value_name = "name",
        env = FRAMEWORK_VAR,
        global = true
    )]
    pub framework: Option<String>,

    /// Project name reported as `service` of finished tests.
    #[arg(
        id = "tc-service",
        long = "tc-service",
        value_name = "name",
        env = SERVICE_VAR,
        global = true
    )]
    pub service: Option<String>,

    /// Site identifier reported as `environment` of finished tests.
    #[arg(
        id = "tc-environment",
        long = "tc-environment",
        value_name = "site",
        env = ENVIRONMENT_VAR,
        global = true
    )]
    pub environment: Option<String>,

    /// Adds a `timestamp` to every service message.
    #[arg(id = "tc-timestamps", long = "tc-timestamps", global = true)]
    pub timestamps: bool,

    /// Rendering of the run summary.
    #[arg(
        id = "tc-summary",
        long = "tc-summary",
        value_name = "plain|teamcity",
        value_enum,
        default_value_t,
        global = true
    )]
    pub summary: SummaryFormat,
}

impl Cli {
    /// Returns the [`Environment`] these options describe.
    ///
    /// Values not given still fall back to the process environment at
    /// emission time.
    #[must_use]
    pub fn environment(&self) -> Environment {
        Environment {
            framework: self.framework.clone(),
            service: self.service.clone(),
            environment: self.environment.clone(),
            inherit: true,
        }
    }
}

/// Build metadata attached to every finished test.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Environment {
    /// Build configuration name.
    pub framework: Option<String>,

    /// Project name.
    pub service: Option<String>,

    /// Site identifier.
    pub environment: Option<String>,

    /// Whether values not set explicitly are read from the process
    /// environment when needed.
    pub inherit: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            framework: None,
            service: None,
            environment: None,
            inherit: true,
        }
    }
}

/// Resolved [`Environment`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    /// Build configuration name.
    pub framework: String,

    /// Project name.
    pub service: String,

    /// Site identifier.
    pub environment: String,
}

impl Environment {
    /// Creates a new [`Environment`] never looking into the process
    /// environment.
    #[must_use]
    pub fn isolated() -> Self {
        Self {
            inherit: false,
            ..Self::default()
        }
    }

    /// Sets the build configuration name.
    #[must_use]
    pub fn with_framework(mut self, name: impl Into<String>) -> Self {
        self.framework = Some(name.into());
        self
    }

    /// Sets the project name.
    #[must_use]
    pub fn with_service(mut self, name: impl Into<String>) -> Self {
        self.service = Some(name.into());
        self
    }

    /// Sets the site identifier.
    #[must_use]
    pub fn with_environment(mut self, site: impl Into<String>) -> Self {
        self.environment = Some(site.into());
        self
    }

    /// Resolves all the values.
    ///
    /// # Errors
    ///
    /// With [`Error::MissingEnv`] naming the first value neither set nor
    /// present in the process environment.
    pub fn resolve(&self) -> Result<Metadata> {
        Ok(Metadata {
            framework: self.lookup(self.framework.as_deref(), FRAMEWORK_VAR)?,
            service: self.lookup(self.service.as_deref(), SERVICE_VAR)?,
            environment: self
                .lookup(self.environment.as_deref(), ENVIRONMENT_VAR)?,
        })
    }

    fn lookup(&self, value: Option<&str>, var: &'static str) -> Result<String> {
        value
            .map(str::to_owned)
            .or_else(|| self.inherit.then(|| env::var(var).ok()).flatten())
            .ok_or(Error::MissingEnv { var })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Opts {
        #[command(flatten)]
        teamcity: Cli,
    }

    #[test]
    fn explicit_values_resolve() {
        let env = Environment::isolated()
            .with_framework("Nightly")
            .with_service("Shipping")
            .with_environment("staging");

        assert_eq!(
            env.resolve().unwrap(),
            Metadata {
                framework: "Nightly".into(),
                service: "Shipping".into(),
                environment: "staging".into(),
            },
        );
    }

    #[test]
    fn isolated_reports_first_missing_var() {
        let env = Environment::isolated().with_framework("Nightly");

        let err = env.resolve().unwrap_err();
        assert_eq!(err.missing_var(), Some(SERVICE_VAR));
    }

    #[test]
    fn parses_flattened_options() {
        let opts = Opts::try_parse_from([
            "runner",
            "--tc-framework",
            "Nightly",
            "--tc-service=Shipping",
            "--tc-environment",
            "prod",
            "--tc-timestamps",
            "--tc-summary",
            "plain",
        ])
        .unwrap();

        assert!(opts.teamcity.timestamps);
        assert_eq!(opts.teamcity.summary, SummaryFormat::Plain);
        assert_eq!(
            opts.teamcity.environment(),
            Environment {
                framework: Some("Nightly".into()),
                service: Some("Shipping".into()),
                environment: Some("prod".into()),
                inherit: true,
            },
        );
    }

    #[test]
    fn default_summary_is_teamcity() {
        assert_eq!(Cli::default().summary, SummaryFormat::TeamCity);
        assert!(!Cli::default().timestamps);
    }
}
