pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod endpoints;

pub use types::{dispatch_json_report, dispatch_value_report, DispatchReport, DispatchStatus};

#[cfg(target_arch = "wasm32")]
pub use endpoints::*;
