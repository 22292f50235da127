use std::env;
use std::str::FromStr;

/// Viewer settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Points in the generated demo dataset.
    pub points: usize,
    /// Run the pipeline on the main thread instead of the render worker.
    pub inline: bool,
    /// Sprite diameter in physical pixels.
    pub point_size: f32,
    /// Seed for the demo dataset; random when unset.
    pub seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            points: 100_000,
            inline: false,
            point_size: 10.0,
            seed: None,
        }
    }
}

impl ViewerConfig {
    /// Reads `STIPPLE_POINTS`, `STIPPLE_INLINE`, `STIPPLE_POINT_SIZE` and
    /// `STIPPLE_SEED`. Unparsable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            points: parse(&lookup, "STIPPLE_POINTS").unwrap_or(defaults.points),
            inline: lookup("STIPPLE_INLINE")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(defaults.inline),
            point_size: parse(&lookup, "STIPPLE_POINT_SIZE")
                .filter(|s: &f32| s.is_finite() && *s > 0.0)
                .unwrap_or(defaults.point_size),
            seed: parse(&lookup, "STIPPLE_SEED"),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}");
            None
        }
    }
}
