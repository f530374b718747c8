//! Feed output sinks.
//!
//! The feed is a single JSON array of normalized records, written either to
//! stdout or atomically to a file.

mod local;

pub use local::LocalStorage;

use std::io::Write;

use crate::error::Result;
use crate::models::NormalizedEstate;

/// Serialize records as one JSON array, followed by a newline.
pub fn write_estates<W: Write>(mut writer: W, estates: &[NormalizedEstate], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, estates)?;
    } else {
        serde_json::to_writer(&mut writer, estates)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
