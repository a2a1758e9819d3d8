//! One build run: read the locale source, build the reference table, render
//! every (template, locale) pair and write the results.
//!
//! Configuration and locale-source problems abort the run. Everything that
//! goes wrong for a single template or output is logged, recorded in the
//! [`RunReport`] and skipped.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::config::{
    ConfigError,
    FileMapping,
    FileMatcher,
    MatcherError,
    TaskConfig,
    TemplateFile,
};
use crate::input::SourceError;
use crate::ir::{
    LocaleVariables,
    ReferenceBuilder,
    ReferenceError,
    ReferenceTable,
};
use crate::output::{
    DestinationLayout,
    WriteError,
    write_file,
    write_reference,
};
use crate::render::{
    CrawlerInjection,
    RenderError,
    minify,
    render,
};
use crate::syntax::Template;
use crate::types::{
    Locale,
    LocaleSet,
};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read the locale source \"{}\": {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("Failed to write the reference file: {0}")]
    Write(#[from] WriteError),
}

impl PipelineError {
    /// Process exit status for a run that was aborted.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        1
    }
}

/// A template or output that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// What a completed run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Every rendered output and crawler page, in write order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    pub reference_file: PathBuf,
}

impl RunReport {
    /// `true` when nothing was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Process exit status: `0` when clean, `2` when something was skipped.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        if self.is_clean() { 0 } else { 2 }
    }

    fn fail(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.failures.push(FileFailure { path: path.into(), reason: reason.into() });
    }
}

/// Runs the whole build for one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: TaskConfig,
    current_year: Option<String>,
}

impl Pipeline {
    #[must_use]
    pub const fn new(config: TaskConfig) -> Self {
        Self { config, current_year: None }
    }

    /// Fixes the `currentYear` variable instead of reading the clock.
    #[must_use]
    pub fn with_current_year(mut self, year: impl Into<String>) -> Self {
        self.current_year = Some(year.into());
        self
    }

    #[must_use]
    pub const fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Executes the run.
    ///
    /// # Errors
    /// Configuration, locale source, reference table and reference file
    /// failures. Per-template failures are reported in [`RunReport::failures`].
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let configured = self.config.locale_set()?;
        let source = self.config.locale_source()?;
        let loaded = source
            .load(&configured)
            .map_err(|err| PipelineError::Source { path: source.path().to_path_buf(), source: err })?;
        tracing::debug!(
            units = loaded.units.len(),
            locales = ?loaded.locales.ids(),
            "Locale source loaded"
        );

        let settings = self.config.settings();
        let mut builder = ReferenceBuilder::new(&loaded.locales)
            .with_collision_policy(settings.on_collision);
        if let Some(year) = &self.current_year {
            builder = builder.with_current_year(year.clone());
        }
        let table = builder.build(&loaded.units)?;

        let crawler = self.config.crawler(&loaded.locales)?;
        let run = Run {
            table: &table,
            locales: &loaded.locales,
            crawler: crawler.as_ref(),
            source_path: source.path(),
            minify: settings.minify,
        };

        let mut report = RunReport::default();
        let matcher = FileMatcher::new(self.config.base_dir().to_path_buf());
        for mapping in &settings.files {
            self.process_mapping(&run, &matcher, mapping, &mut report)?;
        }

        report.reference_file = self.config.variables_file();
        write_reference(&report.reference_file, &table)?;
        tracing::info!("File \"{}\" created.", report.reference_file.display());

        if report.is_clean() {
            tracing::info!("{} files written", report.written.len());
        } else {
            tracing::warn!(
                "{} files written, {} skipped",
                report.written.len(),
                report.failures.len()
            );
        }
        Ok(report)
    }

    fn process_mapping(
        &self,
        run: &Run<'_>,
        matcher: &FileMatcher,
        mapping: &FileMapping,
        report: &mut RunReport,
    ) -> Result<(), PipelineError> {
        let settings = self.config.settings();
        let layout = DestinationLayout::new(
            self.config.resolve(&mapping.dest),
            settings.flatten,
            settings.omit_primary_slug,
        );

        let locales: Vec<&Locale> = match &mapping.locale {
            None => run.locales.iter().collect(),
            Some(id) => {
                let Some(locale) = run.locales.get(id) else {
                    tracing::warn!(
                        "The locale \"{}\" of the mapping to \"{}\" is not in the locale source; skipping the mapping.",
                        id,
                        layout.root.display()
                    );
                    report.fail(&layout.root, format!("unknown locale \"{id}\""));
                    return Ok(());
                };
                vec![locale]
            }
        };

        let expansion = matcher.expand(mapping.src.as_slice())?;
        for missing in expansion.missing {
            tracing::warn!("The source file \"{}\" was not found.", missing.display());
            report.fail(missing, "source file not found");
        }

        for template in &expansion.templates {
            run.process_template(template, &locales, &layout, report);
        }
        Ok(())
    }
}

/// State shared by every template of one run.
struct Run<'a> {
    table: &'a ReferenceTable,
    locales: &'a LocaleSet,
    crawler: Option<&'a CrawlerInjection>,
    source_path: &'a Path,
    minify: bool,
}

impl Run<'_> {
    /// Renders `template` for every locale, then writes the outputs.
    ///
    /// Nothing is written for the template if any locale fails to render.
    fn process_template(
        &self,
        template: &TemplateFile,
        locales: &[&Locale],
        layout: &DestinationLayout,
        report: &mut RunReport,
    ) {
        tracing::debug!(template = %template.path.display(), "Rendering template");

        let text = match std::fs::read_to_string(&template.path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("Failed to read \"{}\": {}", template.path.display(), err);
                report.fail(&template.path, err.to_string());
                return;
            }
        };

        let rendered = match self.render_all(&text, locales) {
            Ok(rendered) => rendered,
            Err(err) => {
                self.warn_render_failure(&template.path, &err);
                report.fail(&template.path, err.to_string());
                return;
            }
        };

        for (locale, html) in rendered {
            let dest =
                layout.path_for(&template.relative, locale, self.locales.is_primary(locale));
            let html = if self.minify {
                match minify(&html) {
                    Ok(minified) => minified,
                    Err(err) => {
                        tracing::warn!("Failed to minify \"{}\": {}", dest.display(), err);
                        report.fail(dest, err.to_string());
                        continue;
                    }
                }
            } else {
                html
            };

            write_output(&dest, &html, report);

            if let Some(crawler) = self.crawler
                && crawler.applies_to(&template.relative, &locale.id)
            {
                write_output(&crawler.output_path(&dest), &crawler.inject(&html), report);
            }
        }
    }

    fn render_all<'l>(
        &self,
        text: &str,
        locales: &[&'l Locale],
    ) -> Result<Vec<(&'l Locale, String)>, RenderError> {
        let template = Template::parse(text)?;
        let empty = LocaleVariables::new();

        locales
            .iter()
            .map(|locale| {
                let variables = self.table.locale(&locale.id).unwrap_or(&empty);
                render(&template, variables).map(|html| (*locale, html))
            })
            .collect()
    }

    fn warn_render_failure(&self, template: &Path, err: &RenderError) {
        match err {
            RenderError::UndefinedVariable { name, line } => tracing::warn!(
                "Variable `{}` used in \"{}\" (line {}) is not defined in \"{}\"; skipping the template.",
                name,
                template.display(),
                line,
                self.source_path.display()
            ),
            RenderError::Syntax(syntax) => tracing::warn!(
                "Template \"{}\" is invalid: {}; skipping the template.",
                template.display(),
                syntax
            ),
        }
    }
}

fn write_output(path: &Path, html: &str, report: &mut RunReport) {
    match write_file(path, html) {
        Ok(()) => {
            tracing::info!("File \"{}\" created.", path.display());
            report.written.push(path.to_path_buf());
        }
        Err(err) => {
            tracing::warn!("{}", err);
            report.fail(path, err.to_string());
        }
    }
}
