use log::error;

use vtb_dividends::args::*;
use vtb_dividends::date_codec::DateCodec;
use vtb_dividends::errors::*;
use vtb_dividends::report::write_report;

fn main() {
    if let Err(ref e) = run() {
        let mut s = e.to_string();

        for e in e.iter().skip(1) {
            s.push_str(&format!("\n\tcaused by: {}", e));
        }

        // with `RUST_BACKTRACE=1`.
        if let Some(backtrace) = e.backtrace() {
            s.push_str(&format!("\n\tbacktrace:\n{:?}", backtrace));
        }

        error!("{}", s);

        ::std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let opts = parse_args();

    stderrlog::new()
        .module(module_path!())
        .show_level(true)
        .quiet(opts.quiet)
        .verbosity(3 + opts.verbose as usize) // Trace blocks are logged at debug
        .timestamp(opts.ts.unwrap_or(stderrlog::Timestamp::Second))
        .init()
        .map_err(|e| format!("Cannot initialize logging: {}", e))?;

    let codec = DateCodec::new(opts.date_fields);

    // Everything is parsed before the report is opened, so a bad row leaves no output.
    let records = vtb_dividends::parse_dividends(&opts.csvfile, &codec)?;
    write_report(&records, &opts.output, &codec)
}
