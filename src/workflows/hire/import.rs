//! Bulk intake of quick-form requests from a CSV export (phone or walk-in bookings).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::QuickHireRequest;

#[derive(Debug)]
pub enum HireImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for HireImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HireImportError::Io(err) => write!(f, "failed to read request export: {}", err),
            HireImportError::Csv(err) => write!(f, "invalid request CSV data: {}", err),
        }
    }
}

impl std::error::Error for HireImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HireImportError::Io(err) => Some(err),
            HireImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for HireImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for HireImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct RequestRow {
    #[serde(rename = "Full Name")]
    full_name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Phone")]
    phone: String,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "Request Details", default)]
    request_details: String,
}

impl From<RequestRow> for QuickHireRequest {
    fn from(row: RequestRow) -> Self {
        Self {
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            location: row.location,
            request_details: row.request_details,
        }
    }
}

pub struct QuickRequestImporter;

impl QuickRequestImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<QuickHireRequest>, HireImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<QuickHireRequest>, HireImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut requests = Vec::new();
        for row in csv_reader.deserialize::<RequestRow>() {
            requests.push(QuickHireRequest::from(row?));
        }
        Ok(requests)
    }
}
