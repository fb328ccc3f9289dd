//! Error report files.
//!
//! For every file with violations a `<file>.errors.csv` is written holding the
//! header row followed by each flagged row once, in file order.

use conform_storage::RemoteLocation;
use conform_validator::{FileReport, Reporter, join_record};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::info;

const REPORT_SUFFIX: &str = ".errors.csv";
const FILE_SCHEME: &str = "file";

pub struct FileReporter {
    report_dir: Option<PathBuf>,
}

impl FileReporter {
    pub fn new(report_dir: Option<PathBuf>) -> Self {
        Self { report_dir }
    }

    /// Local sources get their report next to them unless a directory is set.
    /// Otherwise the whole location (bucket and key for remote sources) is
    /// mirrored below the report directory, or the working directory.
    fn target(&self, source: &str) -> PathBuf {
        let (location, remote) = match RemoteLocation::scheme_of(source) {
            Some(scheme) => {
                let rest = &source[scheme.len() + "://".len()..];
                (rest, !scheme.eq_ignore_ascii_case(FILE_SCHEME))
            }
            None => (source, false),
        };

        match &self.report_dir {
            Some(dir) => dir.join(mirrored(location)),
            None if remote => mirrored(location),
            None => PathBuf::from(format!("{}{}", location, REPORT_SUFFIX)),
        }
    }
}

/// Relative report path keeping every component of `location`.
fn mirrored(location: &str) -> PathBuf {
    let relative: PathBuf = Path::new(location)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_os_string()),
            Component::ParentDir => Some(OsString::from("__")),
            _ => None,
        })
        .collect();

    let mut name = if relative.as_os_str().is_empty() {
        OsString::from("dataset")
    } else {
        relative.into_os_string()
    };
    name.push(REPORT_SUFFIX);
    PathBuf::from(name)
}

/// Renders the report body: header line, then each offending row once.
fn render(report: &FileReport) -> String {
    let separator = u8::try_from(report.separator).unwrap_or(b',');

    let rows: BTreeMap<usize, &str> = report
        .errors
        .iter()
        .filter(|e| !e.kind.is_header_level())
        .map(|e| (e.row_index, e.raw_row.as_str()))
        .collect();

    let mut content = join_record(&report.headers, separator);
    content.push('\n');
    for row in rows.values() {
        content.push_str(row);
        content.push('\n');
    }
    content
}

impl Reporter for FileReporter {
    fn report(&self, report: &FileReport) -> io::Result<()> {
        if report.is_valid() {
            return Ok(());
        }

        let target = self.target(&report.path);
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, render(report))?;

        info!(
            "Wrote {} errors of [{}] to {}",
            report.errors.len(),
            report.path,
            target.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::{ErrorKind, ErrorRecord};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn report(path: &str, errors: Vec<ErrorRecord>) -> FileReport {
        FileReport {
            path: path.to_string(),
            dataset: 0,
            separator: ';',
            headers: vec!["Price".to_string(), "Season".to_string()],
            rows: 3,
            errors,
        }
    }

    #[test]
    fn test_render_lists_each_row_once() {
        let errors = vec![
            ErrorRecord::field(2, "x;", ErrorKind::NotFloat, "Price", "[x]"),
            ErrorRecord::field(2, "x;", ErrorKind::NotString, "Season", "[]"),
            ErrorRecord::field(0, "abc;SS22", ErrorKind::NotFloat, "Price", "[abc]"),
        ];

        assert_eq!(
            render(&report("pricing.csv", errors)),
            "Price;Season\nabc;SS22\nx;\n"
        );
    }

    #[test]
    fn test_header_errors_have_no_rows() {
        let errors = vec![ErrorRecord::header(
            ErrorKind::MissingHeader,
            Some("Channel".to_string()),
            "column not found",
        )];

        assert_eq!(render(&report("pricing.csv", errors)), "Price;Season\n");
    }

    #[test]
    fn test_report_targets() {
        let local = FileReporter::new(None);
        assert_eq!(
            local.target("data/pricing.csv"),
            PathBuf::from("data/pricing.csv.errors.csv")
        );
        assert_eq!(
            local.target("s3://exports/2022/pricing.csv"),
            PathBuf::from("exports/2022/pricing.csv.errors.csv")
        );

        let dir = FileReporter::new(Some(PathBuf::from("reports")));
        assert_eq!(
            dir.target("data/pricing.csv"),
            PathBuf::from("reports/data/pricing.csv.errors.csv")
        );
        assert_eq!(
            dir.target("/srv/exports/pricing.csv"),
            PathBuf::from("reports/srv/exports/pricing.csv.errors.csv")
        );
        assert_eq!(
            dir.target("../pricing.csv"),
            PathBuf::from("reports/__/pricing.csv.errors.csv")
        );
    }

    #[test]
    fn test_file_scheme_is_local() {
        let local = FileReporter::new(None);
        assert_eq!(
            local.target("file:///tmp/x/p.csv"),
            PathBuf::from("/tmp/x/p.csv.errors.csv")
        );

        let dir = FileReporter::new(Some(PathBuf::from("reports")));
        assert_eq!(
            dir.target("file:///tmp/x/p.csv"),
            PathBuf::from("reports/tmp/x/p.csv.errors.csv")
        );
    }

    #[test]
    fn test_same_file_names_get_distinct_targets() {
        let dir = FileReporter::new(Some(PathBuf::from("reports")));
        assert_ne!(dir.target("eu/pricing.csv"), dir.target("us/pricing.csv"));

        let remote = FileReporter::new(None);
        assert_eq!(
            remote.target("s3://a/x/p.csv"),
            PathBuf::from("a/x/p.csv.errors.csv")
        );
        assert_eq!(
            remote.target("s3://b/y/p.csv"),
            PathBuf::from("b/y/p.csv.errors.csv")
        );
    }

    #[test]
    fn test_same_file_names_keep_both_reports() {
        let dir = TempDir::new().unwrap();
        let reporter = FileReporter::new(Some(dir.path().join("reports")));
        for (path, value) in [("eu/pricing.csv", "EU_BAD"), ("us/pricing.csv", "US_BAD")] {
            let raw = format!("{};SS22", value);
            let errors = vec![ErrorRecord::field(
                0,
                raw.as_str(),
                ErrorKind::NotFloat,
                "Price",
                "[x]",
            )];
            reporter.report(&report(path, errors)).unwrap();
        }

        let eu = std::fs::read_to_string(dir.path().join("reports/eu/pricing.csv.errors.csv"))
            .unwrap();
        let us = std::fs::read_to_string(dir.path().join("reports/us/pricing.csv.errors.csv"))
            .unwrap();
        assert_eq!(eu, "Price;Season\nEU_BAD;SS22\n");
        assert_eq!(us, "Price;Season\nUS_BAD;SS22\n");
    }

    #[test]
    fn test_render_quotes_cells_holding_the_separator() {
        let mut file = report("pricing.csv", vec![]);
        file.headers = vec!["Price".to_string(), "Season;Year".to_string()];
        file.errors = vec![ErrorRecord::field(
            0,
            "abc;\"SS;22\"",
            ErrorKind::NotFloat,
            "Price",
            "[abc]",
        )];

        let body = render(&file);
        assert_eq!(body, "Price;\"Season;Year\"\nabc;\"SS;22\"\n");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(body.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(&row[1], "SS;22");
    }

    #[test]
    fn test_valid_file_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let reporter = FileReporter::new(Some(dir.path().join("reports")));

        reporter.report(&report("pricing.csv", vec![])).unwrap();
        assert!(!dir.path().join("reports").exists());
    }

    #[test]
    fn test_report_written_to_directory() {
        let dir = TempDir::new().unwrap();
        let reporter = FileReporter::new(Some(dir.path().join("reports")));
        let errors = vec![ErrorRecord::field(
            1,
            "abc;SS22",
            ErrorKind::NotFloat,
            "Price",
            "[abc]",
        )];

        reporter.report(&report("pricing.csv", errors)).unwrap();

        let written =
            std::fs::read_to_string(dir.path().join("reports/pricing.csv.errors.csv")).unwrap();
        assert_eq!(written, "Price;Season\nabc;SS22\n");
    }
}
