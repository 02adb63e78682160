//! Heuristics over the free-text `коммент` column.
use itertools::Itertools;

use crate::errors::*;
use crate::TaxInfo;

pub const DIVIDEND_MARKER: &str = "Дивиденды";
pub const SECURITIES_PREFIX: &str = "Дивиденды по ценным бумагам";
pub const SHARES_PREFIX: &str = "Дивиденды по акциям";
pub const NO_TAX_PHRASE: &str = "Налог не удерживается";
pub const TAX_STEM: &str = "налог";

/// True for dividend comments that carry a withheld tax.
pub fn is_taxed_dividend(comment: &str) -> bool {
    comment.starts_with(DIVIDEND_MARKER) && !comment.contains(NO_TAX_PHRASE)
}

/// The company name sits between the dividend prefix and the last
/// "Дивиденды" that follows it.
pub fn extract_company(comment: &str) -> Result<String> {
    let rest = comment
        .strip_prefix(SECURITIES_PREFIX)
        .or_else(|| comment.strip_prefix(SHARES_PREFIX))
        .ok_or_else(|| ErrorKind::MissingDividendPrefix(comment.to_owned()))?;

    let name = match rest.rfind(DIVIDEND_MARKER) {
        Some(end) => &rest[..end],
        None => "",
    };
    Ok(name.trim().to_owned())
}

pub fn extract_tax(comment: &str) -> Result<Option<TaxInfo>> {
    if comment.contains(NO_TAX_PHRASE) {
        return Ok(None);
    }

    let start = comment
        .find(TAX_STEM)
        .ok_or_else(|| ErrorKind::MissingTaxClause(comment.to_owned()))?;

    let (_, amount, currency) = comment[start..]
        .trim_end_matches('.')
        .split_whitespace()
        .collect_tuple()
        .ok_or_else(|| ErrorKind::MalformedTaxClause(comment.to_owned()))?;

    let amount = amount
        .parse::<f64>()
        .chain_err(|| format!("Badly formatted tax amount '{}'", amount))?;

    Ok(Some(TaxInfo {
        amount,
        currency: currency.to_owned(),
    }))
}
