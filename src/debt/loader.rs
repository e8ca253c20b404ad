//! Load loan lists from CSV
//!
//! Expected header: `name,principal,annual_rate_pct,min_payment,extra_payment,start_date`.
//! Amounts may use Danish formatting (`12.500,50`); the rate column is a
//! percentage; `start_date` is `YYYY-MM` and may be blank (which fails validation).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Reader;

use super::{Loan, YearMonth};
use crate::error::LoadError;
use crate::input::{parse_locale_number, parse_percent, validate_loans, LoanDraft};

/// Raw CSV row; numbers stay text until they go through the locale parser
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    principal: String,
    annual_rate_pct: String,
    min_payment: String,
    #[serde(default)]
    extra_payment: String,
    #[serde(default)]
    start_date: String,
}

impl CsvRow {
    fn to_draft(self) -> Result<LoanDraft, LoadError> {
        let start_date = match self.start_date.trim() {
            "" => None,
            label => Some(YearMonth::parse(label)?),
        };

        Ok(LoanDraft {
            name: self.name.trim().to_string(),
            principal: parse_locale_number(&self.principal),
            annual_rate: parse_percent(&self.annual_rate_pct) / 100.0,
            min_payment: parse_locale_number(&self.min_payment),
            extra_payment: parse_locale_number(&self.extra_payment),
            start_date,
        })
    }
}

/// Read every row as an unvalidated draft
pub fn read_drafts<R: Read>(reader: R) -> Result<Vec<LoanDraft>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut drafts = Vec::new();

    for record in csv_reader.deserialize() {
        let row: CsvRow = record?;
        drafts.push(row.to_draft()?);
    }

    Ok(drafts)
}

/// Read and validate a loan list
pub fn load_loans<R: Read>(reader: R) -> Result<Vec<Loan>, LoadError> {
    let drafts = read_drafts(reader)?;
    Ok(validate_loans(&drafts)?)
}

/// Read and validate a loan list from a CSV file
pub fn load_loans_csv(path: &Path) -> Result<Vec<Loan>, LoadError> {
    load_loans(File::open(path)?)
}
