pub mod config;
pub mod modules;
pub mod api;

pub use config::{StageConfig, ElementIds, ExpressionConfig, CameraConfig, InitialState, ConfigError};
pub use modules::command::{Command, CommandError, Decoded, MouthShape};
pub use modules::dispatch::{Dispatcher, IgnoreReason, Outcome, StageError};
pub use modules::stage::{Display, ElementState, InMemoryStage, StageView, ViewError};
pub use api::{DispatchReport, DispatchStatus};
