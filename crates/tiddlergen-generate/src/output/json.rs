use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use tiddlergen_core::Tiddler;

use super::atomic::write_bytes_atomic;

/// Where the import file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("<stdout>"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Pretty JSON array (2-space indent, non-ASCII kept as-is).
pub fn render_json(tiddlers: &[Tiddler]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tiddlers)
}

/// Write a rendered document, returning the number of bytes written.
///
/// Standard output gets a trailing newline; files are replaced atomically.
pub fn write_output(target: &OutputTarget, json: &str) -> io::Result<u64> {
    match target {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(json.as_bytes())?;
            handle.write_all(b"\n")?;
            handle.flush()?;
            Ok(json.len() as u64 + 1)
        }
        OutputTarget::File(path) => {
            write_bytes_atomic(path, json.as_bytes())?;
            Ok(json.len() as u64)
        }
    }
}
