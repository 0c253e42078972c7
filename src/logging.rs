//! Logger setup for the command-line tools.

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Install the global logger.
///
/// `verbose` counts `-v` flags: none logs at `Info`, one at `Debug`, more at
/// `Trace`. `RUST_LOG` is applied on top. Records go to stderr so stdout
/// carries only the report.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter(Some("testbed_analyzer"), level)
        .filter(Some("connectivity"), level)
        .filter(Some("rng_eval"), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}
