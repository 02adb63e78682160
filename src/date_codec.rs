//! Reading and writing the `дата` column.
//!
//! VTB exports dates as `DD.MM.YYYY`. Historically the reports produced by
//! this tool have read that text with `%d.%M.%Y`, so the middle field lands in
//! the minutes and every date falls in January. `DateFields::Positional` keeps
//! that layout so existing reports stay comparable; `DateFields::Calendar`
//! reads the middle field as the month.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::NaiveDateTime;

use crate::errors::*;

const POSITIONAL_FORMAT: &str = "%d.%M.%Y";
const CALENDAR_FORMAT: &str = "%d.%m.%Y";
const YEAR_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DateFields {
    /// Day, minute, year. Month is always January.
    Positional,
    /// Day, month, year at midnight.
    Calendar,
}

impl Default for DateFields {
    fn default() -> Self {
        DateFields::Positional
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateCodec {
    pub fields: DateFields,
}

impl DateCodec {
    pub fn new(fields: DateFields) -> DateCodec {
        DateCodec { fields }
    }

    fn format_str(&self) -> &'static str {
        match self.fields {
            DateFields::Positional => POSITIONAL_FORMAT,
            DateFields::Calendar => CALENDAR_FORMAT,
        }
    }

    pub fn parse(&self, text: &str) -> Result<NaiveDateTime> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, text, StrftimeItems::new(self.format_str()))
            .chain_err(|| format!("Badly formatted date '{}'", text))?;

        // `%Y` takes any number of digits; exports always carry four.
        let year = text.rsplit('.').next().unwrap_or_default();
        if year.len() != YEAR_DIGITS || !year.bytes().all(|b| b.is_ascii_digit()) {
            error_chain::bail!("Badly formatted year in date '{}'", text);
        }

        // Fill in whatever the format leaves out.
        let filled = match self.fields {
            DateFields::Positional => parsed.set_month(1).and_then(|_| parsed.set_hour(0)),
            DateFields::Calendar => parsed.set_hour(0).and_then(|_| parsed.set_minute(0)),
        };
        filled
            .and_then(|_| parsed.to_naive_datetime_with_offset(0))
            .chain_err(|| format!("Invalid date '{}'", text))
    }

    pub fn format(&self, date: &NaiveDateTime) -> String {
        date.format(self.format_str()).to_string()
    }
}
