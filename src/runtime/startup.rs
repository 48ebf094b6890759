use crate::config::TerminalSettings;
use crate::process::{CommandRunner, CommandSpec};

/// Best-effort terminal font resize. Whatever happens is only logged.
pub fn resize_font(runner: &dyn CommandRunner, settings: &TerminalSettings) {
    if !settings.resize_font {
        return;
    }

    let cmd = CommandSpec::new(&settings.font_command).args(&settings.font_args);
    match runner.capture(&cmd) {
        Ok(out) if out.success => tracing::debug!(command = %cmd, "font size adjusted"),
        Ok(out) => tracing::debug!(command = %cmd, reason = %out.failure_reason(), "font resize ignored"),
        Err(e) => tracing::debug!(command = %cmd, error = %e, "font resize ignored"),
    }
}
