//! JSON writer

use crate::error::{Result, ResultExt};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const INDENT: &[u8] = b"    ";

/// Where a result ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Print to the given console stream
    Console,
    /// Write to a file, replacing it
    File(PathBuf),
}

impl OutputTarget {
    /// Emit `value`; console output goes to `console`
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T, console: &mut dyn Write) -> Result<()> {
        match self {
            OutputTarget::Console => {
                writeln!(console, "{}", to_pretty_json(value)?)?;
                Ok(())
            }
            OutputTarget::File(path) => write_json_file(path, value),
        }
    }
}

/// Serialize with a four-space indent
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    write_pretty(&mut buf, value)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `value` to `path` as indented JSON
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_pretty(&mut writer, value)?;
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}

fn write_pretty<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    Ok(())
}
