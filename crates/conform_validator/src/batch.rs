//! Batch validation of every file declared in a configuration.
//!
//! [`BatchRunner`] loads each declared file through an injected
//! [`FileLoader`], parses and validates it, then hands the result to an
//! optional [`Reporter`]. Files are independent of each other: they are
//! processed concurrently and a failure on one file never stops the others.

use crate::{Dataset, FileError, SchemaValidator};
use conform_core::{ErrorRecord, FileLoader, LoadError, ValidationSchema};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of validating one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Source location
    pub path: String,

    /// Index of the dataset declaration the file belongs to
    pub dataset: usize,

    /// Separator of the dataset
    pub separator: char,

    /// Header names as read from the file
    pub headers: Vec<String>,

    /// Number of data rows validated
    pub rows: usize,

    /// Violations, in discovery order
    pub errors: Vec<ErrorRecord>,
}

impl FileReport {
    /// Returns true if no violation was found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Receives the report of every file that could be validated.
pub trait Reporter: Send + Sync {
    /// Publishes one file report.
    fn report(&self, report: &FileReport) -> std::io::Result<()>;
}

/// What happened to a single file.
#[derive(Debug)]
pub enum FileStatus {
    /// The file was validated; it may still contain violations
    Checked(FileReport),
    /// The file could not be validated
    Failed(FileError),
    /// The batch was cancelled before the file was started
    Skipped,
}

/// Outcome of one declared file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Source location
    pub path: String,

    /// Index of the dataset declaration the file belongs to
    pub dataset: usize,

    /// Final status
    pub status: FileStatus,
}

impl FileOutcome {
    /// Returns true if the file was validated and has no violations.
    pub fn is_valid(&self) -> bool {
        matches!(&self.status, FileStatus::Checked(report) if report.is_valid())
    }
}

/// Outcomes of a whole batch, in declaration order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// One outcome per declared file
    pub outcomes: Vec<FileOutcome>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl BatchSummary {
    /// Returns true if every file was validated and none has violations.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_valid)
    }

    /// Number of files validated without violations.
    pub fn valid_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_valid()).count()
    }

    /// Number of files validated with at least one violation.
    pub fn invalid_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(&o.status, FileStatus::Checked(r) if !r.is_valid()))
            .count()
    }

    /// Number of files that could not be validated.
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Failed(_)))
            .count()
    }

    /// Number of files skipped because of cancellation.
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Skipped))
            .count()
    }

    /// Total number of violations across all files.
    pub fn error_count(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match &o.status {
                FileStatus::Checked(r) => r.errors.len(),
                _ => 0,
            })
            .sum()
    }
}

struct Job {
    order: usize,
    dataset: usize,
    path: String,
    schema: Arc<ValidationSchema>,
}

/// Runs the validation of every file declared by a set of schemas.
///
/// # Example
///
/// ```rust,no_run
/// use conform_validator::BatchRunner;
/// # use conform_core::{FileLoader, LoadError, ValidationSchema};
/// # use std::sync::Arc;
/// # async fn example(loader: Arc<dyn FileLoader>, schemas: Vec<ValidationSchema>) {
/// let runner = BatchRunner::new(loader).with_max_concurrency(4);
/// let summary = runner.run(&schemas).await;
///
/// if !summary.passed() {
///     println!("{} files with violations", summary.invalid_count());
/// }
/// # }
/// ```
pub struct BatchRunner {
    loader: Arc<dyn FileLoader>,
    reporter: Option<Arc<dyn Reporter>>,
    max_concurrency: Option<usize>,
    cancel: CancellationToken,
}

impl BatchRunner {
    /// Creates a runner reading files through `loader`.
    pub fn new(loader: Arc<dyn FileLoader>) -> Self {
        Self {
            loader,
            reporter: None,
            max_concurrency: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Sets the reporter that receives every file report.
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Limits how many files are processed at once.
    ///
    /// Defaults to the number of declared files.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = Some(max.max(1));
        self
    }

    /// Uses an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns a handle that cancels the batch.
    ///
    /// Cancelling aborts loads in flight and skips files not started yet;
    /// files already being validated run to completion.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Validates every file of every schema.
    pub async fn run(&self, schemas: &[ValidationSchema]) -> BatchSummary {
        let start = Instant::now();

        let mut jobs = Vec::new();
        for (dataset, schema) in schemas.iter().enumerate() {
            let schema = Arc::new(schema.clone());
            for path in schema.paths() {
                jobs.push(Job {
                    order: jobs.len(),
                    dataset,
                    path: path.clone(),
                    schema: Arc::clone(&schema),
                });
            }
        }

        let concurrency = self.max_concurrency.unwrap_or(jobs.len()).max(1);
        debug!(
            "Validating {} files with concurrency {}",
            jobs.len(),
            concurrency
        );

        let mut results: Vec<(usize, FileOutcome)> = stream::iter(jobs)
            .map(|job| async move {
                let order = job.order;
                (order, self.run_file(job).await)
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;
        results.sort_by_key(|(order, _)| *order);

        let summary = BatchSummary {
            outcomes: results.into_iter().map(|(_, outcome)| outcome).collect(),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "Batch finished in {}ms: {} valid, {} invalid, {} failed, {} skipped",
            summary.duration_ms,
            summary.valid_count(),
            summary.invalid_count(),
            summary.failed_count(),
            summary.skipped_count()
        );
        summary
    }

    async fn run_file(&self, job: Job) -> FileOutcome {
        let status = self.process(&job).await;
        match &status {
            FileStatus::Checked(report) if report.is_valid() => {
                info!("File [{}] is valid!", job.path)
            }
            FileStatus::Checked(report) => warn!(
                "File [{}] has {} validation errors",
                job.path,
                report.errors.len()
            ),
            FileStatus::Failed(e) => error!("File [{}] could not be validated: {}", job.path, e),
            FileStatus::Skipped => info!("File [{}] skipped, batch cancelled", job.path),
        }

        FileOutcome {
            path: job.path,
            dataset: job.dataset,
            status,
        }
    }

    async fn process(&self, job: &Job) -> FileStatus {
        if self.cancel.is_cancelled() {
            return FileStatus::Skipped;
        }

        info!("Validating file [{}]", job.path);
        let loaded = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(LoadError::Cancelled(job.path.clone())),
            result = self.loader.read(&job.path) => result,
        };
        let content = match loaded {
            Ok(content) => content,
            Err(e) => return FileStatus::Failed(e.into()),
        };

        let schema = Arc::clone(&job.schema);
        let path = job.path.clone();
        let dataset = job.dataset;
        let validated =
            tokio::task::spawn_blocking(move || validate_content(path, dataset, &content, &schema))
                .await;

        let report = match validated {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => return FileStatus::Failed(e),
            Err(e) => return FileStatus::Failed(FileError::Worker(e.to_string())),
        };

        if let Some(reporter) = &self.reporter {
            if let Err(e) = reporter.report(&report) {
                error!(
                    "Unable to report {} errors of [{}]",
                    report.errors.len(),
                    job.path
                );
                return FileStatus::Failed(FileError::Report(e));
            }
        }

        FileStatus::Checked(report)
    }
}

/// Parses and validates the content of one file.
pub fn validate_content(
    path: String,
    dataset: usize,
    content: &[u8],
    schema: &ValidationSchema,
) -> Result<FileReport, FileError> {
    let parsed = Dataset::from_bytes(content, schema.separator())?;
    let errors = SchemaValidator::new().validate_dataset(&parsed, schema)?;

    Ok(FileReport {
        path,
        dataset,
        separator: schema.separator_char(),
        headers: parsed.header_names(),
        rows: parsed.len(),
        errors,
    })
}
