//! Configuration types for Concertina.
//!
//! The configuration file supports JSONC format (JSON with comments).

pub mod leader;
pub mod root;
pub mod rules;
pub mod tiling;

pub use leader::{LeaderBinding, LeaderConfig};
pub use root::{ConcertinaConfig, ConfigError, config_paths, load_config, load_config_from_path};
pub use rules::WindowRule;
pub use tiling::{AnimationsConfig, EasingType, TilingConfig};
