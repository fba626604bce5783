pub mod memory;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use memory::{ElementState, InMemoryStage};
pub use view::{Display, StageView, ViewError};

#[cfg(target_arch = "wasm32")]
pub use dom::DomView;
