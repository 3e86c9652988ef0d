pub mod atomic;
pub mod json;

pub use atomic::write_bytes_atomic;
pub use json::{OutputTarget, render_json, write_output};
