pub mod json_compact;
pub mod text;

pub use json_compact::JsonCompactFormatter;
pub use text::{size_to_string, TextFormatter};
