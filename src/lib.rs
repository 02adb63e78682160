#![recursion_limit = "1024"]
use std::path;

use chrono::NaiveDateTime;
use itertools::Itertools;
use log::info;
use serde::Deserialize;

use crate::comment::{extract_company, extract_tax, is_taxed_dividend};
use crate::date_codec::DateCodec;
use crate::errors::*;

pub mod args;
pub mod comment;
pub mod date_codec;
pub mod report;

pub mod errors {
    error_chain::error_chain! {
        errors {
            MissingDividendPrefix(comment: String) {
                description("comment has no known dividend prefix")
                display("Comment has no known dividend prefix: '{}'", comment)
            }
            MissingTaxClause(comment: String) {
                description("comment has no tax clause")
                display("Comment has no tax clause: '{}'", comment)
            }
            MalformedTaxClause(comment: String) {
                description("tax clause is not '<label> <amount> <currency>'")
                display("Tax clause is not '<label> <amount> <currency>': '{}'", comment)
            }
        }
    }
}

/// One line of the VTB operations export.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "дата")]
    pub date: String,
    #[serde(rename = "сумма")]
    pub amount: String,
    #[serde(rename = "коммент")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxInfo {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividendRecord {
    pub date: NaiveDateTime,
    pub total: f64,
    pub company: String,
    pub tax: f64,
    pub tax_currency: String,
}

pub fn load_rows(file_path: &path::Path) -> Result<Vec<TransactionRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(file_path)
        .chain_err(|| format!("Cannot open {}", file_path.to_string_lossy()))?;

    rdr.deserialize()
        .map(|r: std::result::Result<TransactionRow, csv::Error>| {
            r.chain_err(|| "Badly formatted csv.")
        })
        .collect::<Result<Vec<TransactionRow>>>()
}

pub fn filter_dividends<'a, I>(rows: I) -> impl Iterator<Item = &'a TransactionRow>
where
    I: IntoIterator<Item = &'a TransactionRow>,
{
    rows.into_iter().filter(|r| is_taxed_dividend(&r.comment))
}

/// Parses `1 234,56` style amounts.
pub fn parse_amount(text: &str) -> Result<f64> {
    text.replace(' ', "")
        .replace(',', ".")
        .trim()
        .parse::<f64>()
        .chain_err(|| format!("Badly formatted amount '{}'", text))
}

/// Returns `None` for rows where no tax was withheld. The filter already
/// drops those, so in practice every filtered row yields a record.
pub fn parse_row(row: &TransactionRow, codec: &DateCodec) -> Result<Option<DividendRecord>> {
    let date = codec.parse(&row.date)?;
    let total = parse_amount(&row.amount)?;
    let company = extract_company(&row.comment)?;
    let tax = extract_tax(&row.comment)?;

    Ok(tax.map(|tax| DividendRecord {
        date,
        total,
        company,
        tax: tax.amount,
        tax_currency: tax.currency,
    }))
}

/// Stable: records sharing a date keep their input order.
pub fn sort_by_date(records: Vec<DividendRecord>) -> Vec<DividendRecord> {
    records.into_iter().sorted_by_key(|r| r.date).collect()
}

pub fn parse_rows(rows: &[TransactionRow], codec: &DateCodec) -> Result<Vec<DividendRecord>> {
    let parsed = filter_dividends(rows)
        .map(|r| parse_row(r, codec))
        .collect::<Result<Vec<Option<DividendRecord>>>>()?;
    Ok(sort_by_date(parsed.into_iter().flatten().collect()))
}

pub fn parse_dividends(file_path: &path::Path, codec: &DateCodec) -> Result<Vec<DividendRecord>> {
    let rows = load_rows(file_path)?;
    let records = parse_rows(&rows, codec)?;
    info!(
        "{}: {} rows read, {} taxed dividends found",
        file_path.to_string_lossy(),
        rows.len(),
        records.len()
    );
    Ok(records)
}
