use anyhow::{Context, Result};
use conform_parser::load_schemas;
use conform_storage::RoutingLoader;
use conform_validator::BatchRunner;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::output;
use crate::report::FileReporter;

/// Options of the `validate` command.
pub struct Options {
    pub jobs: Option<usize>,
    pub format: String,
    pub report_dir: Option<PathBuf>,
    pub no_report: bool,
}

pub async fn execute(config_path: &str, options: Options) -> Result<()> {
    info!("Validating configuration: {}", config_path);

    let (conf, schemas) = load_schemas(Path::new(config_path))
        .with_context(|| format!("Failed to load configuration file: {}", config_path))?;

    let file_count: usize = schemas.iter().map(|s| s.paths().len()).sum();
    if options.format != "json" {
        output::print_info(&format!(
            "Configuration loaded: {} datasets, {} files",
            schemas.len(),
            file_count
        ));
    }

    let loader = Arc::new(RoutingLoader::new(conf.region.clone()));
    let mut runner = BatchRunner::new(loader);
    if let Some(jobs) = options.jobs {
        runner = runner.with_max_concurrency(jobs);
    }
    if !options.no_report {
        runner = runner.with_reporter(Arc::new(FileReporter::new(options.report_dir)));
    }

    let token = runner.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling remaining files");
            token.cancel();
        }
    });

    let summary = runner.run(&schemas).await;
    interrupt.abort();

    output::print_batch_report(&summary, &options.format);

    if summary.skipped_count() > 0 {
        output::print_error(&format!(
            "Validation cancelled, {} files skipped",
            summary.skipped_count()
        ));
    }

    if !summary.passed() {
        std::process::exit(1);
    }

    Ok(())
}
