//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    DEFAULT_CONFIG_FILE,
    TaskSettings,
};

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct CliArgs {
    /// Path to the task configuration file. Relative paths inside it are
    /// resolved against its directory.
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Minify rendered HTML, regardless of the configuration file.
    #[arg(long)]
    pub minify: bool,

    /// Write outputs without their subdirectories, regardless of the configuration file.
    #[arg(long)]
    pub flatten: bool,

    /// Increase logging (-v: debug, -vv: trace). RUST_LOG takes precedence.
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Applies flags that force configuration options on.
    #[must_use]
    pub fn apply_overrides(&self, mut settings: TaskSettings) -> TaskSettings {
        settings.minify |= self.minify;
        settings.flatten |= self.flatten;
        settings
    }

    /// Default log directive for the verbosity level.
    #[must_use]
    pub const fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "locale_html=info",
            1 => "locale_html=debug",
            _ => "locale_html=trace",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[googletest::test]
    fn parse_defaults() {
        let args = CliArgs::try_parse_from(["locale-html"]).unwrap();

        expect_that!(args.config, eq(&PathBuf::from("locale-html.json")));
        expect_that!(args.minify, eq(false));
        expect_that!(args.flatten, eq(false));
        expect_that!(args.log_directive(), eq("locale_html=info"));
    }

    #[rstest]
    #[case::none(&["locale-html"], "locale_html=info")]
    #[case::debug(&["locale-html", "-v"], "locale_html=debug")]
    #[case::trace(&["locale-html", "-vv"], "locale_html=trace")]
    #[case::more(&["locale-html", "-v", "-v", "-v"], "locale_html=trace")]
    fn verbosity_sets_log_directive(#[case] argv: &[&str], #[case] directive: &str) {
        let args = CliArgs::try_parse_from(argv).unwrap();

        assert_that!(args.log_directive(), eq(directive));
    }

    #[googletest::test]
    fn flags_force_options_on() {
        let args =
            CliArgs::try_parse_from(["locale-html", "--config", "site/i18n.json", "--minify"])
                .unwrap();
        let settings = TaskSettings { flatten: true, ..TaskSettings::default() };

        let settings = args.apply_overrides(settings);

        expect_that!(args.config, eq(&PathBuf::from("site/i18n.json")));
        expect_that!(settings.minify, eq(true));
        expect_that!(settings.flatten, eq(true));
    }

    #[rstest]
    fn unknown_flag_is_rejected() {
        assert!(CliArgs::try_parse_from(["locale-html", "--watch"]).is_err());
    }
}
