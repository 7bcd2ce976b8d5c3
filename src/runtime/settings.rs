use crate::config::Settings;

/// Settings to run with, plus why the config file was set aside, if it was.
pub struct LoadedSettings {
    pub settings: Settings,
    pub fallback_reason: Option<String>,
}

/// Config is optional: a missing, unreadable or invalid one never stops
/// the player from starting, it just runs on defaults.
pub fn load_settings() -> LoadedSettings {
    let loaded = Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("invalid config: {msg}")),
        });

    match loaded {
        Ok(settings) => LoadedSettings {
            settings,
            fallback_reason: None,
        },
        Err(reason) => {
            eprintln!("musicova: {reason}; using defaults");
            LoadedSettings {
                settings: Settings::default(),
                fallback_reason: Some(reason),
            }
        }
    }
}
