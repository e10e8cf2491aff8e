// src/holders/model.rs

use serde::Serialize;
use thiserror::Error;

/// One row of the ranked shareholder table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareholderRecord {
    /// 1-based position of the source row among the processed rows.
    pub rank: u32,
    /// Surname, or company name for corporate holders.
    pub surname_company: String,
    /// First name; empty for companies.
    pub first_name: String,
    /// Number of shares held, digits only (e.g. `"1234567"`).
    pub holdings: String,
    /// Ownership share with a dot decimal separator (e.g. `"12.5"`).
    pub percent: String,
}

impl ShareholderRecord {
    /// Surname/company and first name joined for display.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.surname_company, self.first_name)
            .trim()
            .to_string()
    }
}

/// Why a table row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row has fewer than the four required cells.
    #[error("expected 4 cells, found {found}")]
    TooFewCells {
        /// Number of `td` cells found.
        found: usize,
    },
}
