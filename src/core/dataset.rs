use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::core::error::MatchError;
use crate::models::{Mentee, Mentor, RawMentee, RawMentor};

pub const MENTOR_DATASET: &str = "mentor";
pub const MENTEE_DATASET: &str = "mentee";

/// Mentor dataset columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MentorField {
    Name,
    Department,
    CompanyCategory,
    IndustryExperience,
    JobRole,
    Interests,
    Keywords,
}

impl MentorField {
    pub const ALL: [MentorField; 7] = [
        MentorField::Name,
        MentorField::Department,
        MentorField::CompanyCategory,
        MentorField::IndustryExperience,
        MentorField::JobRole,
        MentorField::Interests,
        MentorField::Keywords,
    ];

    pub fn column(self) -> &'static str {
        match self {
            MentorField::Name => "Mentor Name",
            MentorField::Department => "Mentor_Department",
            MentorField::CompanyCategory => "Mentor Company Category",
            MentorField::IndustryExperience => "Areas of Industry Experience",
            MentorField::JobRole => "Mentor Job Role Category",
            MentorField::Interests => "Mentor Area of Interests Keywords",
            MentorField::Keywords => "Mentor Combined Keywords-Cleaned",
        }
    }
}

/// Mentee dataset columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenteeField {
    Name,
    Department,
    FirstChoice,
    SecondChoice,
    ThirdChoice,
    JobRole,
    Interests,
    Keywords,
}

impl MenteeField {
    pub const ALL: [MenteeField; 8] = [
        MenteeField::Name,
        MenteeField::Department,
        MenteeField::FirstChoice,
        MenteeField::SecondChoice,
        MenteeField::ThirdChoice,
        MenteeField::JobRole,
        MenteeField::Interests,
        MenteeField::Keywords,
    ];

    pub fn column(self) -> &'static str {
        match self {
            MenteeField::Name => "UG_Full_Name",
            MenteeField::Department => "UG_Department",
            MenteeField::FirstChoice => "Mentee 1st Choice of Industry",
            MenteeField::SecondChoice => "Mentee 2nd Choice of Industry",
            MenteeField::ThirdChoice => "Mentee 3rd Choice of Industry",
            MenteeField::JobRole => "Mentee Job Role Category",
            MenteeField::Interests => "Mentee Area of Personal Interest",
            MenteeField::Keywords => "Mentee Keywords",
        }
    }
}

/// Tabular dataset: ordered column names and string rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = columns.into_iter().map(|c| c.trim().to_string()).collect();
        Self { columns, rows }
    }

    /// Parse CSV text with a header row. Short rows are padded with empty cells.
    pub fn from_csv(text: &str) -> Result<Self, MatchError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }

        Ok(Self::new(columns, rows))
    }

    /// Build from JSON row objects
    ///
    /// The header is the union of keys across all rows. Null becomes an empty cell,
    /// arrays are joined with `;`.
    pub fn from_json_rows(objects: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for object in objects {
            for key in object.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = objects
            .iter()
            .map(|object| {
                columns
                    .iter()
                    .map(|c| object.get(c).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// A table with neither header nor rows is an empty population, not a schema violation
    fn has_schema(&self) -> bool {
        !self.columns.is_empty() || !self.rows.is_empty()
    }

    fn require(&self, dataset: &'static str, columns: impl IntoIterator<Item = &'static str>) -> Result<(), MatchError> {
        if !self.has_schema() {
            return Ok(());
        }

        for field in columns {
            if self.column_index(field).is_none() {
                return Err(MatchError::MissingField { dataset, field });
            }
        }
        Ok(())
    }

    /// Rows that hold at least one non-blank cell, with their 1-based position under the header
    fn data_rows(&self) -> impl Iterator<Item = (usize, &Vec<String>)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|(i, row)| (i + 1, row))
    }

    /// The identity cell of a data row; a row with content but no name cannot be paired
    fn name_cell<'a>(
        dataset: &'static str,
        row_number: usize,
        row: &'a [String],
        index: Option<usize>,
    ) -> Result<&'a str, MatchError> {
        let name = Self::cell(row, index);
        if name.trim().is_empty() {
            return Err(MatchError::MissingName { dataset, row: row_number });
        }
        Ok(name)
    }

    fn cell<'a>(row: &'a [String], index: Option<usize>) -> &'a str {
        index.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(";"),
        other => other.to_string(),
    }
}

/// Read and normalize the mentor population
///
/// Every column in `required` must exist in the header; other known columns are read when
/// present and treated as empty otherwise.
pub fn load_mentors(table: &Table, required: &[MentorField]) -> Result<Vec<Mentor>, MatchError> {
    table.require(MENTOR_DATASET, required.iter().map(|f| f.column()))?;

    let index = |field: MentorField| table.column_index(field.column());
    let name = index(MentorField::Name);
    let department = index(MentorField::Department);
    let category = index(MentorField::CompanyCategory);
    let experience = index(MentorField::IndustryExperience);
    let role = index(MentorField::JobRole);
    let interests = index(MentorField::Interests);
    let keywords = index(MentorField::Keywords);

    let mentors: Vec<Mentor> = table
        .data_rows()
        .map(|(number, row)| -> Result<Mentor, MatchError> {
            Ok(RawMentor {
                name: Table::name_cell(MENTOR_DATASET, number, row, name)?.to_string(),
                department: Table::cell(row, department).to_string(),
                company_category: Table::cell(row, category).to_string(),
                industry_experience: Table::cell(row, experience).to_string(),
                job_role: Table::cell(row, role).to_string(),
                interests: Table::cell(row, interests).to_string(),
                keywords: Table::cell(row, keywords).to_string(),
            }
            .normalize())
        })
        .collect::<Result<_, MatchError>>()?;

    ensure_unique(MENTOR_DATASET, mentors.iter().map(|m| m.name.as_str()))?;
    Ok(mentors)
}

/// Read and normalize the mentee population
pub fn load_mentees(table: &Table, required: &[MenteeField]) -> Result<Vec<Mentee>, MatchError> {
    table.require(MENTEE_DATASET, required.iter().map(|f| f.column()))?;

    let index = |field: MenteeField| table.column_index(field.column());
    let name = index(MenteeField::Name);
    let department = index(MenteeField::Department);
    let choices = [
        index(MenteeField::FirstChoice),
        index(MenteeField::SecondChoice),
        index(MenteeField::ThirdChoice),
    ];
    let role = index(MenteeField::JobRole);
    let interests = index(MenteeField::Interests);
    let keywords = index(MenteeField::Keywords);

    let mentees: Vec<Mentee> = table
        .data_rows()
        .map(|(number, row)| -> Result<Mentee, MatchError> {
            Ok(RawMentee {
                name: Table::name_cell(MENTEE_DATASET, number, row, name)?.to_string(),
                department: Table::cell(row, department).to_string(),
                industry_choices: choices.map(|c| Table::cell(row, c).to_string()),
                job_role: Table::cell(row, role).to_string(),
                interests: Table::cell(row, interests).to_string(),
                keywords: Table::cell(row, keywords).to_string(),
            }
            .normalize())
        })
        .collect::<Result<_, MatchError>>()?;

    ensure_unique(MENTEE_DATASET, mentees.iter().map(|m| m.name.as_str()))?;
    Ok(mentees)
}

fn ensure_unique<'a>(dataset: &'static str, names: impl Iterator<Item = &'a str>) -> Result<(), MatchError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(MatchError::DuplicateIdentity {
                dataset,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
