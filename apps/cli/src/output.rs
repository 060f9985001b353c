use crate::args::Format;
use std::io::Write;
use tuner_options::Service;

/// Writes the sealed configuration of `service` to `out`.
///
/// # Errors
///
/// Fails if `out` cannot be written to.
pub fn render(service: &Service, format: Format, out: &mut impl Write) -> anyhow::Result<()> {
    match format {
        Format::Text => {
            let config = service.config();
            writeln!(out, "address = {}", service.address())?;
            writeln!(out, "timeout = {}", humantime::format_duration(config.timeout))?;
            writeln!(out, "retries = {}", config.retries)?;
            writeln!(out, "cache_enabled = {}", config.cache_enabled)?;
            writeln!(out, "log_level = {}", config.log_level)?;
        },
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, service)?;
            writeln!(out)?;
        },
    }
    Ok(())
}
