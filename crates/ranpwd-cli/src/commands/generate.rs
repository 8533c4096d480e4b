use std::io::{self, Write};

use ranpwd_core::{Entropy, EntropyConfig, Error, generate_line};

use super::GenerateOptions;

/// Validate, open entropy once, and print one line to stdout.
pub fn run(options: &GenerateOptions, entropy_config: &EntropyConfig) -> ranpwd_core::Result<()> {
    write_line(options, entropy_config, io::stdout().lock())
}

/// Same as [`run`], writing to `out`.
///
/// Configuration errors are raised before the device is touched. If entropy
/// fails mid-line, whatever was already produced is still flushed so the
/// caller sees the truncated line.
pub fn write_line<W: Write>(
    options: &GenerateOptions,
    entropy_config: &EntropyConfig,
    out: W,
) -> ranpwd_core::Result<()> {
    let config = options.to_config()?;
    log::debug!(
        "format={} length={} decorate={} secure={}",
        config.format(),
        config.length(),
        config.is_decorated(),
        config.is_secure()
    );

    let mut entropy = Entropy::open(entropy_config, config.is_secure())?;

    let mut out = io::BufWriter::new(out);
    let written = generate_line(&config, &mut entropy, &mut out);
    let flushed = out.flush().map_err(Error::Output);
    written.and(flushed)
}
