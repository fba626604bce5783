pub mod decode;
pub mod model;

pub use decode::{decode_json, decode_value, CommandError, Decoded, MISSING_TYPE};
pub use model::{is_class_token, Command, MouthShape};
