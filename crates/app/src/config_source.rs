//! Where the runtime [`EngineConfig`] comes from.
//!
//! Native builds read an optional JSON file named by `PURIFY_CONFIG`, then
//! apply `PURIFY_<KEY>` environment overrides. Browser builds read the page's
//! query string and the `prefers-reduced-motion` media query.
//! Any error is logged and the defaults are used instead.

use bevy::prelude::*;

use simulation::config::EngineConfig;
use simulation::error::ConfigError;
use simulation::motion::MotionPreference;

#[cfg(not(target_arch = "wasm32"))]
const ENV_PREFIX: &str = "PURIFY_";
#[cfg(not(target_arch = "wasm32"))]
const ENV_CONFIG_FILE: &str = "PURIFY_CONFIG";

/// Parse the optional JSON document and apply `overrides` on top.
pub fn resolve<I, K, V>(json: Option<&str>, overrides: I) -> Result<EngineConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let base = match json {
        Some(text) => EngineConfig::from_json(text)?,
        None => EngineConfig::default(),
    };
    base.with_overrides(overrides)
}

/// `PURIFY_SPEED=2` becomes `("speed", "2")`. The config-file variable
/// itself and unrelated variables are dropped.
#[cfg(not(target_arch = "wasm32"))]
pub fn env_overrides(vars: impl IntoIterator<Item = (String, String)>) -> Vec<(String, String)> {
    vars.into_iter()
        .filter(|(key, _)| key != ENV_CONFIG_FILE)
        .filter_map(|(key, value)| {
            key.strip_prefix(ENV_PREFIX)
                .map(|k| (k.to_ascii_lowercase(), value))
        })
        .collect()
}

fn or_default(result: Result<EngineConfig, ConfigError>) -> EngineConfig {
    match result {
        Ok(config) => config,
        Err(e) => {
            warn!("Config: {}; starting with defaults", e);
            EngineConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> (EngineConfig, MotionPreference) {
    let json = std::env::var(ENV_CONFIG_FILE).ok().and_then(|path| {
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                info!("Config: reading {}", path);
                Some(text)
            }
            Err(e) => {
                warn!("Config: cannot read {}: {}", path, e);
                None
            }
        }
    });
    let config = or_default(resolve(json.as_deref(), env_overrides(std::env::vars())));
    // Native windows have no platform motion setting; only the override applies.
    (config, MotionPreference::default())
}

#[cfg(target_arch = "wasm32")]
pub fn load() -> (EngineConfig, MotionPreference) {
    let config = or_default(resolve(None, query_pairs()));
    (config, MotionPreference { reduced: prefers_reduced_motion() })
}

#[cfg(target_arch = "wasm32")]
fn query_pairs() -> Vec<(String, String)> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let Ok(search) = window.location().search() else {
        return Vec::new();
    };
    let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
        return Vec::new();
    };
    ["speed", "auto_advance", "seed", "reduced_motion", "dose", "mix_time", "settle_time"]
        .into_iter()
        .filter_map(|key| params.get(key).map(|value| (key.to_string(), value)))
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_sources_is_default() {
        let config = resolve(None, Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_overrides_apply_after_json() {
        let config = resolve(Some(r#"{"speed": 1.5, "seed": 3}"#), [("seed", "9")]).unwrap();
        assert_eq!(config.speed, 1.5);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_bad_json_is_an_error_and_falls_back() {
        let result = resolve(Some("{ speed"), Vec::<(String, String)>::new());
        assert!(matches!(result, Err(ConfigError::Json(_))));
        assert_eq!(or_default(result), EngineConfig::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_env_overrides_strip_prefix() {
        let vars = vec![
            ("PURIFY_SPEED".to_string(), "2".to_string()),
            ("PURIFY_CONFIG".to_string(), "/tmp/x.json".to_string()),
            ("HOME".to_string(), "/root".to_string()),
        ];
        assert_eq!(
            env_overrides(vars),
            vec![("speed".to_string(), "2".to_string())]
        );
    }
}
