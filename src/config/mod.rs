pub mod stage_config;

pub use stage_config::{
    CameraConfig, ConfigError, ElementIds, ExpressionConfig, InitialState, StageConfig,
    DEFAULT_EXPRESSIONS,
};
