/*!
# Input Decoding

Reads a document from a file or standard input and decodes it into a tree the
searches can walk. JSON is decoded zero-copy into
[`serde_json_borrow::Value`], which keeps object entries in document order;
the other formats go through [`serde_json::Value`].
*/
use anyhow::{Context as _, Result};
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

/// Serialization format of the input document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// JSON (RFC 8259)
    #[default]
    Json,
    /// YAML 1.2
    #[cfg(feature = "yaml")]
    Yaml,
    /// TOML
    #[cfg(feature = "toml")]
    Toml,
    /// CBOR (RFC 8949)
    #[cfg(feature = "cbor")]
    Cbor,
    /// `MessagePack`
    #[cfg(feature = "msgpack")]
    Msgpack,
}

impl InputFormat {
    /// Infers the format from a file extension, if it is a known one.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Some(Self::Yaml),
            #[cfg(feature = "toml")]
            "toml" => Some(Self::Toml),
            #[cfg(feature = "cbor")]
            "cbor" => Some(Self::Cbor),
            #[cfg(feature = "msgpack")]
            "msgpack" | "mpk" => Some(Self::Msgpack),
            _ => None,
        }
    }
}

/// Raw bytes of an input document.
pub enum Source {
    /// A memory-mapped file
    Mapped(Mmap),
    /// Bytes read into memory (standard input or an empty file)
    Buffer(Vec<u8>),
}

impl Deref for Source {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(map) => &map[..],
            Self::Buffer(buf) => buf.as_slice(),
        }
    }
}

impl Source {
    /// Memory-maps the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or mapped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();
        if len == 0 {
            return Ok(Self::Buffer(Vec::new()));
        }
        // SAFETY: the mapping is only read, and the file is assumed not to be
        // truncated by another process while it is searched.
        let map = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map file {}", path.display()))?;
        debug!("mapped {} ({len} bytes)", path.display());
        Ok(Self::Mapped(map))
    }

    /// Reads all of `reader` into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buffer = Vec::new();
        reader
            .read_to_end(&mut buffer)
            .context("Failed to read input")?;
        Ok(Self::Buffer(buffer))
    }

    /// Reads standard input to the end.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn from_stdin() -> Result<Self> {
        Self::from_reader(io::stdin().lock())
    }
}

/// A decoded document.
#[derive(Debug)]
pub enum Document<'a> {
    /// Zero-copy JSON tree borrowing from the source bytes
    Borrowed(serde_json_borrow::Value<'a>),
    /// Owned tree decoded from a non-JSON format
    Owned(serde_json::Value),
}

/// Decodes `bytes` as a document of the given format.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid document of that format.
pub fn decode(bytes: &[u8], format: InputFormat) -> Result<Document<'_>> {
    debug!("decoding {} bytes as {format:?}", bytes.len());
    let doc = match format {
        InputFormat::Json => {
            let text = std::str::from_utf8(bytes)
                .context("Input is not valid UTF-8")?;
            Document::Borrowed(
                serde_json::from_str(text).context("Failed to parse JSON")?,
            )
        }
        #[cfg(feature = "yaml")]
        InputFormat::Yaml => Document::Owned(
            serde_yaml::from_slice(bytes).context("Failed to parse YAML")?,
        ),
        #[cfg(feature = "toml")]
        InputFormat::Toml => {
            let text = std::str::from_utf8(bytes)
                .context("Input is not valid UTF-8")?;
            Document::Owned(toml::from_str(text).context("Failed to parse TOML")?)
        }
        #[cfg(feature = "cbor")]
        InputFormat::Cbor => Document::Owned(
            ciborium::de::from_reader(bytes).context("Failed to parse CBOR")?,
        ),
        #[cfg(feature = "msgpack")]
        InputFormat::Msgpack => Document::Owned(
            rmp_serde::from_slice(bytes).context("Failed to parse MessagePack")?,
        ),
    };
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::find_all;
    use std::io::Write as _;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("data.JSON")),
            Some(InputFormat::Json)
        );
        assert_eq!(InputFormat::from_path(Path::new("data.txt")), None);
        assert_eq!(InputFormat::from_path(Path::new("data")), None);
        #[cfg(feature = "yaml")]
        assert_eq!(
            InputFormat::from_path(Path::new("cfg.yml")),
            Some(InputFormat::Yaml)
        );
    }

    #[test]
    fn json_decodes_borrowed() {
        let bytes = br#"{"a": {"k": 1}}"#;
        let doc = decode(bytes, InputFormat::Json).expect("valid json");
        let Document::Borrowed(root) = doc else {
            panic!("json should decode zero-copy");
        };
        assert_eq!(find_all(&root, "k").len(), 1);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(decode(b"{\"a\":", InputFormat::Json).is_err());
        assert!(decode(b"\xff\xfe", InputFormat::Json).is_err());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_decodes_owned() {
        let bytes = b"a:\n  - k: 1\n  - k: 2\n";
        let Document::Owned(root) =
            decode(bytes, InputFormat::Yaml).expect("valid yaml")
        else {
            panic!("yaml decodes to an owned tree");
        };
        assert_eq!(find_all(&root, "k").len(), 2);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_decodes_owned() {
        let bytes = b"[server]\nport = 8080\n";
        let Document::Owned(root) =
            decode(bytes, InputFormat::Toml).expect("valid toml")
        else {
            panic!("toml decodes to an owned tree");
        };
        assert_eq!(find_all(&root, "port"), vec![&serde_json::json!(8080)]);
    }

    #[cfg(feature = "cbor")]
    #[test]
    fn cbor_decodes_owned() {
        let value = serde_json::json!({"a": [{"k": "x"}]});
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(&value, &mut bytes).expect("encode cbor");
        let Document::Owned(root) =
            decode(&bytes, InputFormat::Cbor).expect("valid cbor")
        else {
            panic!("cbor decodes to an owned tree");
        };
        assert_eq!(root, value);
    }

    #[cfg(feature = "msgpack")]
    #[test]
    fn msgpack_decodes_owned() {
        let value = serde_json::json!({"a": {"b": [1, 2]}});
        let bytes = rmp_serde::to_vec(&value).expect("encode msgpack");
        let Document::Owned(root) =
            decode(&bytes, InputFormat::Msgpack).expect("valid msgpack")
        else {
            panic!("msgpack decodes to an owned tree");
        };
        let found = crate::search::find_chain(&root, &["a", "b"])
            .expect("chain matches");
        assert_eq!(found, vec![&serde_json::json!([1, 2])]);
    }

    #[test]
    fn file_source_is_mapped() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"k": true}}"#).expect("write temp file");
        let source = Source::from_file(file.path()).expect("readable file");
        assert!(matches!(source, Source::Mapped(_)));
        assert_eq!(&*source, br#"{"k": true}"#);
    }

    #[test]
    fn empty_file_is_buffered() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let source = Source::from_file(file.path()).expect("readable file");
        assert!(source.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Source::from_file(Path::new("does/not/exist.json")).is_err());
    }

    #[test]
    fn reader_source_is_buffered() {
        let source = Source::from_reader(&b"[1, 2]"[..]).expect("readable");
        assert_eq!(&*source, b"[1, 2]");
    }
}
