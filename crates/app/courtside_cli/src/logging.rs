use std::io::Write;

use flexi_logger::{DeferredNow, Logger, Record};

use crate::Error;

/// Logs go to stderr; stdout is reserved for command output.
pub fn init() -> Result<(), Error> {
    Logger::try_with_env_or_str("warn")?
        .format(cli_format)
        .log_to_stderr()
        .start()?;

    Ok(())
}

fn cli_format(w: &mut dyn Write, _now: &mut DeferredNow, record: &Record) -> std::io::Result<()> {
    write!(w, "{}: {}", record.level().as_str().to_lowercase(), record.args())
}
