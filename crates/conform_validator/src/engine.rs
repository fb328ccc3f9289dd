//! Schema validation of tabular data.
//!
//! [`SchemaValidator`] checks a header row against the declared columns and
//! then classifies every field of every row against its column type. Type
//! violations are collected, never raised: the caller always gets the full
//! list. Only a row with the wrong number of fields aborts the dataset.

use crate::{Dataset, ValidateError, bom, join_record};
use conform_core::{BaseType, DateLayout, ErrorKind, ErrorRecord, TypeSpec, ValidationSchema};
use tracing::{debug, warn};

/// Validates headers and rows against a [`ValidationSchema`].
///
/// The validator holds no state; one instance (or many) can validate any
/// number of datasets concurrently.
///
/// # Example
///
/// ```rust
/// use conform_core::{ErrorKind, SchemaBuilder};
/// use conform_validator::SchemaValidator;
///
/// let schema = SchemaBuilder::new()
///     .path("pricing.csv")
///     .date_format("%Y-%m-%d")
///     .column("Price", "FLOAT")
///     .column("Season", "STRING")
///     .column("Subclass", "INTEGER|NULLABLE")
///     .build()
///     .unwrap();
///
/// let headers = ["Price", "Season", "Subclass"];
/// let rows = vec![vec!["440", "SS22", ""], vec!["abc", "SS22", "129"]];
///
/// let errors = SchemaValidator::new().validate(&headers, &rows, &schema).unwrap();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].kind, ErrorKind::NotFloat);
/// assert_eq!(errors[0].field_name.as_deref(), Some("Price"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Creates a new schema validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates rows against the schema.
    ///
    /// Header-level problems (wrong header length, missing declared columns)
    /// are returned as records without looking at any row.
    ///
    /// # Errors
    ///
    /// [`ValidateError::FieldCountMismatch`] when a row does not have as many
    /// fields as the header; no records are returned in that case.
    pub fn validate<H, R, F>(
        &self,
        headers: &[H],
        rows: &[R],
        schema: &ValidationSchema,
    ) -> Result<Vec<ErrorRecord>, ValidateError>
    where
        H: AsRef<[u8]>,
        R: AsRef<[F]>,
        F: AsRef<[u8]>,
    {
        if headers.len() != schema.columns().len() {
            // Usually a separator mismatch: the whole line ended up in one cell.
            return Ok(vec![ErrorRecord::header(
                ErrorKind::HeaderCountMismatch,
                None,
                format!(
                    "header has {} columns, schema declares {}",
                    headers.len(),
                    schema.columns().len()
                ),
            )]);
        }

        if let Some(name) = headers.first().and_then(|h| bom::detect_bom(h.as_ref())) {
            debug!("Stripping {} byte-order mark from header", name);
        }
        let names = bom::header_names(headers);

        let missing = self.missing_columns(&names, schema);
        if !missing.is_empty() {
            return Ok(missing);
        }

        let specs = self.resolve_columns(&names, schema);
        let layout = schema.date_layout();
        let separator = schema.separator();
        let mut errors = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            let fields = row.as_ref();
            if fields.len() != names.len() {
                return Err(ValidateError::field_count(
                    row_index,
                    names.len(),
                    fields.len(),
                ));
            }

            let mut raw_row: Option<String> = None;
            for ((name, spec), field) in names.iter().zip(&specs).zip(fields) {
                let Some(spec) = spec else {
                    continue;
                };
                let field = field.as_ref();
                if let Some((kind, detail)) = check_field(spec, field, layout) {
                    let raw = raw_row.get_or_insert_with(|| join_record(fields, separator));
                    errors.push(ErrorRecord::field(
                        row_index,
                        raw.as_str(),
                        kind,
                        name.as_str(),
                        detail,
                    ));
                }
            }
        }

        debug!(
            "Validated {} rows, {} errors found",
            rows.len(),
            errors.len()
        );
        Ok(errors)
    }

    /// Validates a parsed [`Dataset`].
    pub fn validate_dataset(
        &self,
        dataset: &Dataset,
        schema: &ValidationSchema,
    ) -> Result<Vec<ErrorRecord>, ValidateError> {
        self.validate(dataset.headers(), dataset.rows(), schema)
    }

    /// Reports every declared column absent from the header.
    fn missing_columns(&self, names: &[String], schema: &ValidationSchema) -> Vec<ErrorRecord> {
        schema
            .columns()
            .keys()
            .filter(|column| !names.iter().any(|name| name == *column))
            .map(|column| {
                ErrorRecord::header(
                    ErrorKind::MissingHeader,
                    Some(column.clone()),
                    format!("headers {:?} do not contain [{}]", names, column),
                )
            })
            .collect()
    }

    /// Looks up the declared type of each header position.
    fn resolve_columns<'a>(
        &self,
        names: &[String],
        schema: &'a ValidationSchema,
    ) -> Vec<Option<&'a TypeSpec>> {
        names
            .iter()
            .map(|name| {
                let spec = schema.column(name);
                if let Some(TypeSpec {
                    base_type: BaseType::Unknown(type_name),
                    ..
                }) = spec
                {
                    warn!(
                        "Condition [{}] for column [{}] not managed, values are not checked",
                        type_name, name
                    );
                }
                spec
            })
            .collect()
    }
}

/// Classifies one field; returns the violation kind and a diagnostic, if any.
fn check_field(spec: &TypeSpec, field: &[u8], layout: &DateLayout) -> Option<(ErrorKind, String)> {
    if spec.nullable && is_blank(field) {
        return None;
    }

    let text = std::str::from_utf8(field).ok();
    match &spec.base_type {
        BaseType::Integer => match text {
            Some(t) if t.parse::<i64>().is_ok() => None,
            _ => Some((ErrorKind::NotInteger, describe(field, "is not an INTEGER"))),
        },
        BaseType::Float => match text {
            Some(t) if t.parse::<f64>().is_ok() => None,
            _ => Some((ErrorKind::NotFloat, describe(field, "is not a FLOAT"))),
        },
        BaseType::Date => match text {
            Some(t) => layout.parse(t).err().map(|e| {
                (
                    ErrorKind::NotDate,
                    format!("[{}] is not a valid DATE for layout '{}': {}", t, layout, e),
                )
            }),
            None => Some((ErrorKind::NotDate, describe(field, "is not valid UTF-8"))),
        },
        BaseType::String => match text {
            Some(t) if !t.trim().is_empty() => None,
            Some(_) => Some((ErrorKind::NotString, describe(field, "is blank"))),
            None => Some((ErrorKind::NotString, describe(field, "is not valid UTF-8"))),
        },
        BaseType::Unknown(_) => None,
    }
}

fn is_blank(field: &[u8]) -> bool {
    std::str::from_utf8(field)
        .map(|s| s.trim().is_empty())
        .unwrap_or(false)
}

fn describe(field: &[u8], problem: &str) -> String {
    format!("[{}] {}", String::from_utf8_lossy(field), problem)
}
