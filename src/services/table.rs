use serde_json::{Map, Value};
use thiserror::Error;
use crate::models::{EvidenceVector, RawNamePair};

/// Errors raised while turning tabular input into name pairs
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Columns '{subject}' and '{reference}' are required (missing: {missing})")]
    MissingColumn {
        subject: String,
        reference: String,
        missing: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Batch of {rows} rows exceeds the limit of {limit}")]
    RowLimitExceeded { rows: usize, limit: usize },
}

/// Names of the subject and reference columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameColumns {
    pub subject: String,
    pub reference: String,
}

impl NameColumns {
    pub fn new(subject: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            reference: reference.into(),
        }
    }

    /// Fail with [`TableError::MissingColumn`] unless both columns are present
    ///
    /// Header names are compared after trimming surrounding whitespace.
    pub fn ensure_present<'a, I>(&self, headers: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut has_subject = false;
        let mut has_reference = false;
        for header in headers {
            let header = header.trim();
            has_subject |= header == self.subject;
            has_reference |= header == self.reference;
        }

        let missing: Vec<&str> = [
            (!has_subject).then_some(self.subject.as_str()),
            (!has_reference).then_some(self.reference.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(TableError::MissingColumn {
                subject: self.subject.clone(),
                reference: self.reference.clone(),
                missing: missing.join(", "),
            })
        }
    }
}

impl Default for NameColumns {
    fn default() -> Self {
        Self::new("farmerName", "pfmsFarmerName")
    }
}

/// Reject batches above `limit` rows
pub fn check_row_limit(rows: usize, limit: usize) -> Result<(), TableError> {
    if rows > limit {
        return Err(TableError::RowLimitExceeded { rows, limit });
    }
    Ok(())
}

/// Coerce an arbitrary cell to text
///
/// Strings pass through, `null` becomes empty, everything else uses its JSON
/// rendering (numbers and booleans are later stripped by normalization).
pub fn cell_to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Look up a column in a JSON row, tolerating whitespace around the key
fn lookup<'a>(row: &'a Map<String, Value>, column: &str) -> Option<&'a Value> {
    row.get(column)
        .or_else(|| row.iter().find(|(key, _)| key.trim() == column).map(|(_, v)| v))
}

/// Extract name pairs from JSON rows
///
/// The required columns must appear in at least one row. Rows lacking a
/// value still produce a pair with an empty name.
pub fn pairs_from_records(
    rows: &[Map<String, Value>],
    columns: &NameColumns,
) -> Result<Vec<RawNamePair>, TableError> {
    if !rows.is_empty() {
        columns.ensure_present(rows.iter().flat_map(|row| row.keys().map(String::as_str)))?;
    }

    Ok(rows
        .iter()
        .map(|row| {
            RawNamePair::new(
                cell_to_text(lookup(row, &columns.subject)),
                cell_to_text(lookup(row, &columns.reference)),
            )
        })
        .collect())
}

/// Append the derived columns to each JSON row
pub fn augment_records(
    rows: Vec<Map<String, Value>>,
    evidence: &[EvidenceVector],
) -> Vec<Map<String, Value>> {
    rows.into_iter()
        .zip(evidence)
        .map(|(mut row, e)| {
            row.insert("farmer_split".to_string(), Value::from(e.farmer_split.clone()));
            row.insert("score_main".to_string(), Value::from(e.score_main));
            row.insert("score_partial".to_string(), Value::from(e.score_partial));
            row.insert("score_set".to_string(), Value::from(e.score_set));
            row.insert("phonetic_match".to_string(), Value::from(e.phonetic_match));
            row.insert("token_match".to_string(), Value::from(e.token_match));
            row.insert("remark".to_string(), Value::from(e.remark.as_str()));
            row
        })
        .collect()
}

/// A delimited table held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse CSV text with a header row; headers are trimmed
    pub fn parse(input: &[u8]) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, records })
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Extract name pairs; short records yield empty names
    pub fn pairs(&self, columns: &NameColumns) -> Result<Vec<RawNamePair>, TableError> {
        columns.ensure_present(self.headers.iter().map(String::as_str))?;

        let subject = self.column_index(&columns.subject);
        let reference = self.column_index(&columns.reference);
        let cell = |record: &Vec<String>, idx: Option<usize>| {
            idx.and_then(|i| record.get(i)).cloned().unwrap_or_default()
        };

        Ok(self
            .records
            .iter()
            .map(|record| RawNamePair::new(cell(record, subject), cell(record, reference)))
            .collect())
    }

    /// Render the table with the derived columns appended
    pub fn write_augmented(&self, evidence: &[EvidenceVector]) -> Result<Vec<u8>, TableError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        let mut header = self.headers.clone();
        header.extend(EvidenceVector::COLUMNS.iter().map(|c| c.to_string()));
        writer.write_record(&header)?;

        for (record, e) in self.records.iter().zip(evidence) {
            let mut row = record.clone();
            row.resize(self.headers.len(), String::new());
            row.extend([
                e.farmer_split.clone(),
                e.score_main.to_string(),
                e.score_partial.to_string(),
                e.score_set.to_string(),
                e.phonetic_match.to_string(),
                e.token_match.to_string(),
                e.remark.to_string(),
            ]);
            writer.write_record(&row)?;
        }

        writer
            .into_inner()
            .map_err(|e| TableError::Csv(csv::Error::from(e.into_error())))
    }
}
