//! Reference months (`YYYY-MM`) and due dates.

use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Storage and display format of due dates.
pub const DUE_DATE_FORMAT: &str = "%d/%m/%Y";

/// The month a bill charges for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceMonth {
    year: u16,
    month: u8,
}

impl ValueObject for ReferenceMonth {}

impl ReferenceMonth {
    pub fn new(year: u16, month: u8) -> DomainResult<Self> {
        if year > 9999 {
            return Err(DomainError::validation("reference month year must have 4 digits"));
        }
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(format!(
                "reference month must be between 01 and 12 (got {month:02})"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// Portuguese label printed on invoices: `2025-03 -> "Março/2025"`.
    pub fn label_pt(&self) -> String {
        format!("{}/{:04}", MONTHS_PT[usize::from(self.month - 1)], self.year)
    }
}

impl FromStr for ReferenceMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(DomainError::validation(format!(
                "reference month must look like YYYY-MM (got {s:?})"
            )));
        }

        let year = s[..4]
            .parse::<u16>()
            .map_err(|e| DomainError::validation(format!("reference month year: {e}")))?;
        let month = s[5..]
            .parse::<u8>()
            .map_err(|e| DomainError::validation(format!("reference month: {e}")))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for ReferenceMonth {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReferenceMonth> for String {
    fn from(value: ReferenceMonth) -> Self {
        value.to_string()
    }
}

impl core::fmt::Display for ReferenceMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a `dd/mm/YYYY` due date.
pub fn parse_due_date(text: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DUE_DATE_FORMAT)
        .map_err(|e| DomainError::validation(format!("due date {text:?}: {e}")))
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_reference_month() {
        let month: ReferenceMonth = "2025-03".parse().unwrap();
        assert_eq!(month.year(), 2025);
        assert_eq!(month.month(), 3);
        assert_eq!(month.to_string(), "2025-03");
    }

    #[test]
    fn rejects_malformed_reference_months() {
        for bad in ["", "2025-3", "2025/03", "25-03", "2025-03-01", "abcd-ef", "2025-00", "2025-13"] {
            match bad.parse::<ReferenceMonth>() {
                Err(DomainError::Validation(_)) => {}
                other => panic!("expected validation error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn portuguese_label() {
        let month: ReferenceMonth = "2025-03".parse().unwrap();
        assert_eq!(month.label_pt(), "Março/2025");
        let month: ReferenceMonth = "2024-12".parse().unwrap();
        assert_eq!(month.label_pt(), "Dezembro/2024");
    }

    #[test]
    fn serializes_as_plain_string() {
        let month: ReferenceMonth = "2025-03".parse().unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2025-03\"");
        let back: ReferenceMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
        assert!(serde_json::from_str::<ReferenceMonth>("\"2025-3\"").is_err());
    }

    #[test]
    fn due_date_round_trip() {
        let date = parse_due_date("10/04/2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
        assert_eq!(format_due_date(date), "10/04/2025");
        assert!(parse_due_date("2025-04-10").is_err());
        assert!(parse_due_date("invalid").is_err());
    }
}
