use std::path;

use log::{debug, info};

use crate::date_codec::DateCodec;
use crate::errors::*;
use crate::DividendRecord;

pub const REPORT_HEADER: [&str; 4] = ["Дата", "Дивиденды", "Компания", "Налог"];

const RULE_WIDTH: usize = 70;

// `{:?}` keeps the fractional part, so 100.0 is written as "100.0".
// Exponents get a sign and two digits: 1e-05, 1e+16.
fn number(value: f64) -> String {
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

pub fn trace_block(record: &DividendRecord, codec: &DateCodec) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "\n{}\n{}\nДивиденды: {}\nКомпания: {}\nНалог: {} {}\n{}",
        rule,
        codec.format(&record.date),
        number(record.total),
        record.company,
        number(record.tax),
        record.tax_currency,
        rule
    )
}

/// Writes the report. The tax currency only shows up in the debug trace.
pub fn write_report(
    records: &[DividendRecord],
    file_path: &path::Path,
    codec: &DateCodec,
) -> Result<()> {
    let path_str = file_path.to_string_lossy();
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(file_path)
        .chain_err(|| format!("Can't open report file {}", path_str))?;

    wtr.write_record(&REPORT_HEADER)
        .chain_err(|| "Error writing the report header")?;

    for r in records {
        wtr.write_record(&[
            codec.format(&r.date),
            number(r.total),
            r.company.clone(),
            number(r.tax),
        ])
        .chain_err(|| format!("Error writing the record for {}", r.company))?;
        debug!("{}", trace_block(r, codec));
    }

    wtr.flush()
        .chain_err(|| format!("Error flushing the report file {}", path_str))?;
    info!("{}: {} dividends written", path_str, records.len());
    Ok(())
}
