use thiserror::Error;

/// A configuration value rejected at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("map must be at least 3x3 tiles, got {width}x{height}")]
    MapTooSmall { width: usize, height: usize },

    #[error("wall probability must lie in [0, 1], got {0}")]
    WallProbability(f64),

    #[error("neighbour threshold must lie in 0..=8, got {0}")]
    Threshold(u8),

    #[error("safe zone radius {0} does not fit inside the map")]
    SafeZoneTooLarge(usize),

    #[error("decoration density must lie in [0, 1], got {0}")]
    DecorationDensity(f64),

    #[error("noise scale must be positive and finite, got {0}")]
    NoiseScale(f64),

    #[error("noise needs at least one octave")]
    NoiseOctaves,

    #[error("noise persistence must be positive and finite, got {0}")]
    NoisePersistence(f64),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid seed {value:?}: {source}")]
    InvalidSeed {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid seed {0:?}: not valid unicode")]
    SeedNotUnicode(std::ffi::OsString),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
