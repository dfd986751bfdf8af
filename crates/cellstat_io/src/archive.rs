//! Run document persistence.
//!
//! A run is stored as the JSON form of its [`Group`] tree. Files whose name
//! ends in `.gz` are written gzip-compressed; on load, compression is detected
//! from the content so either form is accepted under any name.

use crate::error::{IoError, Result};
use cellstat_data::{Group, Node};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Loads and validates the run document at `path`.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Group> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| IoError::from(e).with_context(format!("reading {}", path.display())))?;

    let json = if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoded = Vec::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_end(&mut decoded)
            .map_err(|e| IoError::compression(format!("{}: {}", path.display(), e)))?;
        decoded
    } else {
        bytes
    };

    let root: Group = serde_json::from_slice(&json)
        .map_err(|e| IoError::from(e).with_context(format!("parsing {}", path.display())))?;
    validate_document(&root)?;
    tracing::debug!(path = %path.display(), "Loaded run document");
    Ok(root)
}

/// Writes `root` to `path`, gzip-compressed when the name ends in `.gz`.
pub fn save_document<P: AsRef<Path>>(root: &Group, path: P) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    if is_gzip_path(path) {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        serde_json::to_writer(&mut encoder, root)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = writer;
        serde_json::to_writer(&mut writer, root)?;
        writer.flush()?;
    }
    Ok(())
}

/// Checks that every dataset's shape matches its element count.
pub fn validate_document(root: &Group) -> Result<()> {
    fn walk(group: &Group, prefix: &str) -> Result<()> {
        for (name, node) in &group.members {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            match node {
                Node::Group(child) => walk(child, &path)?,
                Node::Dataset(ds) if !ds.is_consistent() => {
                    return Err(IoError::validation(format!(
                        "dataset {path} has shape {:?} but {} elements",
                        ds.shape,
                        ds.values.len()
                    )));
                }
                Node::Dataset(_) => {}
            }
        }
        Ok(())
    }
    walk(root, "")
}
