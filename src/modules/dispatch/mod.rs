pub mod dispatcher;

pub use dispatcher::{css_number, Dispatcher, IgnoreReason, Outcome, StageError};
