use crate::config::Settings;

/// Settings for this run. A broken or invalid config never stops the display:
/// defaults are used and the reason is handed back so it can be logged once
/// logging is up.
pub fn load_settings() -> (Settings, Option<String>) {
    let loaded = Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| {
            s.validate()
                .map(|()| s)
                .map_err(|msg| format!("invalid config: {msg}"))
        });

    match loaded {
        Ok(s) => (s, None),
        Err(reason) => (Settings::default(), Some(reason)),
    }
}
