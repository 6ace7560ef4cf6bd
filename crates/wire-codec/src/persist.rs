// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! File persistence with suffix-selected compression.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info, instrument};
use wire_schema::Store;

use crate::serial::{deserialize, from_value, serialize, serialize_store, Document};
use crate::{CodecConfig, CodecError, Value};

/// On-disk encoding, chosen by file suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Plain JSON text (`.json`).
    Json,
    /// bzip2-compressed JSON (`.json.bz2`).
    JsonBz2,
    /// gzip-compressed JSON (`.json.gz`).
    JsonGz,
}

impl Format {
    /// Picks the format from the file name, or `None` if it matches no
    /// supported suffix. Matching is case-sensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        [Self::JsonBz2, Self::JsonGz, Self::Json]
            .into_iter()
            .find(|format| name.ends_with(format.suffix()))
    }

    /// File suffix including the leading dot.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Json => ".json",
            Self::JsonBz2 => ".json.bz2",
            Self::JsonGz => ".json.gz",
        }
    }

    fn require(path: &Path) -> Result<Self, CodecError> {
        Self::from_path(path).ok_or_else(|| CodecError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// Renders `value` as JSON text.
pub fn dumps(value: &Value, config: &CodecConfig) -> Result<String, CodecError> {
    render(&serialize(value), config)
}

/// Parses JSON text and decodes it.
pub fn loads(text: &str) -> Result<Value, CodecError> {
    let doc: Document = serde_json::from_str(text)?;
    deserialize(&doc)
}

/// Writes `value` to `path` with the default [`CodecConfig`].
pub fn dump(path: impl AsRef<Path>, value: &Value) -> Result<(), CodecError> {
    dump_with(path, value, &CodecConfig::default())
}

/// Writes `value` to `path`, compressed per the file suffix.
///
/// The target is replaced atomically; a failed write leaves any existing
/// file untouched.
pub fn dump_with(path: impl AsRef<Path>, value: &Value, config: &CodecConfig) -> Result<(), CodecError> {
    write_document(path.as_ref(), &serialize(value), config)
}

/// Writes a store to `path` with the default [`CodecConfig`].
pub fn dump_store(path: impl AsRef<Path>, store: &Store) -> Result<(), CodecError> {
    dump_store_with(path, store, &CodecConfig::default())
}

/// Writes a store to `path` with explicit output settings.
pub fn dump_store_with(path: impl AsRef<Path>, store: &Store, config: &CodecConfig) -> Result<(), CodecError> {
    write_document(path.as_ref(), &serialize_store(store), config)
}

/// Reads and decodes the document at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Value, CodecError> {
    read_document(path.as_ref())
}

/// Reads a document that must hold a single [`Store`].
pub fn load_store(path: impl AsRef<Path>) -> Result<Store, CodecError> {
    from_value(read_document(path.as_ref())?)
}

#[instrument(skip_all, fields(path = %path.display()))]
fn write_document(path: &Path, doc: &Document, config: &CodecConfig) -> Result<(), CodecError> {
    let format = Format::require(path)?;
    let text = render(doc, config)?;
    let bytes = encode(format, text.as_bytes(), config)?;
    debug!(?format, text = text.len(), encoded = bytes.len(), "encoded document");
    write_atomic(path, &bytes)?;
    info!(bytes = bytes.len(), "wrote document");
    Ok(())
}

#[instrument(skip_all, fields(path = %path.display()))]
fn read_document(path: &Path) -> Result<Value, CodecError> {
    let format = Format::require(path)?;
    let raw = fs::read(path)?;
    let text = decode(format, &raw)?;
    debug!(?format, encoded = raw.len(), text = text.len(), "decoded document");
    let value = loads(&text)?;
    info!("loaded document");
    Ok(value)
}

fn render(doc: &Document, config: &CodecConfig) -> Result<String, CodecError> {
    let Some(width) = config.indent else {
        return Ok(serde_json::to_string(doc)?);
    };
    let pad = vec![b' '; width];
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&pad));
    doc.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| CodecError::Io(std::io::Error::other(e)))
}

fn encode(format: Format, text: &[u8], config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    Ok(match format {
        Format::Json => text.to_vec(),
        Format::JsonGz => {
            let level = flate2::Compression::new(config.gzip_level.min(9));
            let mut enc = flate2::write::GzEncoder::new(Vec::new(), level);
            enc.write_all(text)?;
            enc.finish()?
        }
        Format::JsonBz2 => {
            let level = bzip2::Compression::new(config.bzip2_level.clamp(1, 9));
            let mut enc = bzip2::write::BzEncoder::new(Vec::new(), level);
            enc.write_all(text)?;
            enc.finish()?
        }
    })
}

fn decode(format: Format, mut raw: &[u8]) -> Result<String, CodecError> {
    let mut text = String::new();
    match format {
        Format::Json => raw.read_to_string(&mut text)?,
        Format::JsonGz => flate2::read::GzDecoder::new(raw).read_to_string(&mut text)?,
        Format::JsonBz2 => bzip2::read::BzDecoder::new(raw).read_to_string(&mut text)?,
    };
    Ok(text)
}

/// New files get `0o666` less the umask; a replaced file keeps its mode.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CodecError> {
    let dir: PathBuf = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let existing = fs::metadata(path).ok().map(|m| m.permissions());
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(&dir)?;
    tmp.write_all(bytes)?;
    if let Some(perms) = existing {
        tmp.as_file().set_permissions(perms)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
