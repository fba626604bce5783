pub mod stage_mock;

pub use stage_mock::*;
