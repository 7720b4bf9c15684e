//! `quire` build command implementation.

use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config};
use quire_site::{BuildConfig, BuildReport, StaticSiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for a site build.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Prefix for root-relative links, e.g. `/my-repo/` (overrides config).
    #[arg(env = "QUIRE_BASE_PATH")]
    base_path: Option<String>,

    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Abort on the first page that fails to generate.
    #[arg(long)]
    fail_fast: bool,

    /// Worker threads for page generation (0 = one per CPU).
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let mut config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        self.apply_build_overrides(&mut config);
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");

        let site = &config.site_resolved;
        output.info(&format!("Content: {}", site.content_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        let builder = StaticSiteBuilder::new(BuildConfig {
            content_dir: site.content_dir.clone(),
            static_dir: site.static_dir.clone(),
            template: site.template.clone(),
            output_dir: site.output_dir.clone(),
            base_path: site.base_path.clone(),
            fail_fast: config.build.fail_fast,
            jobs: config.build.jobs,
        });

        let report = builder.build()?;
        print_summary(&output, &report);
        report.ensure_success()?;

        output.success(&format!(
            "Site built successfully to {}",
            site.output_dir.display()
        ));
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base_path: self.base_path.clone(),
        }
    }

    /// Apply `--fail-fast` and `--jobs` on top of the `[build]` table.
    fn apply_build_overrides(&self, config: &mut Config) {
        if self.fail_fast {
            config.build.fail_fast = true;
        }
        if let Some(jobs) = self.jobs {
            config.build.jobs = jobs;
        }
    }
}

fn print_summary(output: &Output, report: &BuildReport) {
    output.info(&format!(
        "Generated {} of {} pages, copied {} static files",
        report.generated.len(),
        report.total_pages(),
        report.copied_files
    ));
    for failure in &report.failures {
        output.warning(&format!(
            "  {}: {}",
            failure.source.display(),
            failure.error
        ));
    }
}
