//! Loan records and the year-month calendar used by the payoff simulation

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// A calendar month, serialized as its `YYYY-MM` label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// `month` is 1-based; returns None outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Parse a `YYYY-MM` label
    pub fn parse(label: &str) -> Result<Self, InputError> {
        let trimmed = label.trim();
        let date = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").map_err(
            |_| InputError::InvalidMonth {
                value: label.to_string(),
            },
        )?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn is_december(&self) -> bool {
        self.month == 12
    }

    /// The following calendar month
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Zero-padded `YYYY-MM` label
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.label()
    }
}

/// One debt in a payoff plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub name: String,

    /// Remaining balance
    pub principal: f64,

    /// Nominal annual rate as a decimal (0.05 = 5%)
    pub annual_rate: f64,

    /// Contractual minimum monthly payment
    pub min_payment: f64,

    /// Discretionary extra paid on top of the minimum each month
    pub extra_payment: f64,

    pub start_date: YearMonth,
}

impl Loan {
    pub fn new(
        name: impl Into<String>,
        principal: f64,
        annual_rate: f64,
        min_payment: f64,
        extra_payment: f64,
        start_date: YearMonth,
    ) -> Self {
        Self {
            name: name.into(),
            principal,
            annual_rate,
            min_payment,
            extra_payment,
            start_date,
        }
    }

    /// Minimum plus extra
    pub fn scheduled_payment(&self) -> f64 {
        self.min_payment + self.extra_payment
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }

    /// Interest accrued on the current balance over one month
    pub fn monthly_interest(&self) -> f64 {
        self.principal * self.monthly_rate()
    }
}
