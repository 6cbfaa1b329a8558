/// Application configuration
pub mod app;
pub use app::{load_app_config, load_or_default, AppConfig, ConfigOverrides};

/// Configuration traits
pub mod traits;
pub use traits::{Configuration, MergeableConfiguration, PathConfiguration};


/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG: &str = "statnorm.yml";

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "STATNORM_CONFIG";
