use std::collections::HashMap;
use std::time::Duration;

use crate::ApplicationError;

pub const DEFAULT_UPLOAD_PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct UploadFolderCommand {
    pub folder: String,
    pub mapping: NameMapping,
    pub pause: Duration,
}

impl UploadFolderCommand {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            mapping: NameMapping::default(),
            pause: DEFAULT_UPLOAD_PAUSE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedName {
    pub name: String,
    pub description: Option<String>,
}

/// File name to person lookup read from a CSV file with a header row.
/// Columns are found by header name: `filename` and `name` are required,
/// `description` is optional and anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMapping {
    entries: HashMap<String, MappedName>,
}

struct MappingColumns {
    file_name: usize,
    name: usize,
    description: Option<usize>,
}

impl MappingColumns {
    fn from_header(header: &str) -> Result<Self, ApplicationError> {
        let names: Vec<String> = split_csv_line(header)
            .ok_or_else(|| mapping_error("header has an unterminated quote"))?
            .iter()
            .map(|column| column.trim().to_ascii_lowercase())
            .collect();
        let find = |wanted: &str| names.iter().position(|column| column == wanted);
        match (find("filename"), find("name")) {
            (Some(file_name), Some(name)) => Ok(Self {
                file_name,
                name,
                description: find("description"),
            }),
            _ => Err(mapping_error(&format!(
                "header must name filename and name columns, got \"{}\"",
                header.trim()
            ))),
        }
    }
}

impl NameMapping {
    /// Parses mapping text. Fields may be quoted; a quote inside a quoted
    /// field is written twice. Quoted fields do not span lines.
    pub fn parse(text: &str) -> Result<Self, ApplicationError> {
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());
        let Some((_, header)) = lines.next() else {
            return Ok(Self::default());
        };
        let columns = MappingColumns::from_header(header.trim_start_matches('\u{feff}'))?;

        let mut entries = HashMap::new();
        for (number, line) in lines {
            let fields = split_csv_line(line).ok_or_else(|| {
                mapping_error(&format!("line {} has an unterminated quote", number + 1))
            })?;
            let column = |index: usize| {
                fields
                    .get(index)
                    .map(|field| field.trim())
                    .unwrap_or_default()
            };
            let file_name = column(columns.file_name);
            let name = column(columns.name);
            if file_name.is_empty() || name.is_empty() {
                return Err(mapping_error(&format!(
                    "line {} needs both a filename and a name",
                    number + 1
                )));
            }
            let description = columns
                .description
                .map(|index| column(index))
                .filter(|text| !text.is_empty())
                .map(str::to_string);
            entries.insert(
                file_name.to_string(),
                MappedName {
                    name: name.to_string(),
                    description,
                },
            );
        }
        Ok(Self { entries })
    }

    pub fn get(&self, file_name: &str) -> Option<&MappedName> {
        self.entries.get(file_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn mapping_error(detail: &str) -> ApplicationError {
    ApplicationError::Validation(format!("mapping file: {detail}"))
}

/// Splits one CSV record. Returns `None` when a quoted field is left open.
fn split_csv_line(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match (quoted, ch) {
            (true, '"') if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            (true, '"') => quoted = false,
            (false, '"') if field.trim().is_empty() => {
                field.clear();
                quoted = true;
            }
            (false, ',') => fields.push(std::mem::take(&mut field)),
            (_, ch) => field.push(ch),
        }
    }
    if quoted {
        return None;
    }
    fields.push(field);
    Some(fields)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchUploadReport {
    pub scanned_files: usize,
    pub total: usize,
    pub succeeded: usize,
    /// `(file name, error text)` for every upload that failed.
    pub failures: Vec<(String, String)>,
}

impl BatchUploadReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
