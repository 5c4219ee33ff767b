use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{CacheEnvelope, CacheFileInfo, Catalog};
use crate::util::{sha256_hex, system_time_utc_string, write_file_replacing};

const CACHE_FORMAT: &str = "hst-catalog";
const CACHE_FORMAT_VERSION: u32 = 1;
const CACHE_FILE_NAME: &str = ".hst";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("cache content is empty")]
    Empty,
    #[error("cache content is not valid base64")]
    Base64(#[from] base64::DecodeError),
    #[error("cache payload is not a valid catalog envelope")]
    Json(#[from] serde_json::Error),
    #[error("unsupported cache format {format} version {version}")]
    UnsupportedFormat { format: String, version: u32 },
    #[error("cache checksum mismatch: expected {expected}, found {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

/// Text-safe at-rest form of a catalog: base64 around a checksummed JSON envelope.
pub fn encode(catalog: &Catalog) -> Result<String> {
    let envelope = CacheEnvelope {
        format: CACHE_FORMAT.to_string(),
        format_version: CACHE_FORMAT_VERSION,
        catalog_sha256: catalog_digest(catalog)?,
        catalog: catalog.clone(),
    };

    let payload = serde_json::to_vec(&envelope).context("failed to serialize cache envelope")?;
    Ok(STANDARD.encode(payload))
}

pub fn decode(input: &[u8]) -> Result<Catalog, DecodeError> {
    let trimmed = input.trim_ascii();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }

    let payload = STANDARD.decode(trimmed)?;
    let envelope: CacheEnvelope = serde_json::from_slice(&payload)?;

    if envelope.format != CACHE_FORMAT || envelope.format_version != CACHE_FORMAT_VERSION {
        return Err(DecodeError::UnsupportedFormat {
            format: envelope.format,
            version: envelope.format_version,
        });
    }

    let actual = sha256_hex(&serde_json::to_vec(&envelope.catalog)?);
    if actual != envelope.catalog_sha256 {
        return Err(DecodeError::ChecksumMismatch {
            expected: envelope.catalog_sha256,
            actual,
        });
    }

    Ok(envelope.catalog)
}

fn catalog_digest(catalog: &Catalog) -> Result<String> {
    let canonical = serde_json::to_vec(catalog).context("failed to serialize catalog")?;
    Ok(sha256_hex(&canonical))
}

/// Single-file catalog cache.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist; invalid content is an error.
    pub fn load(&self) -> Result<Option<Catalog>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cached catalog");
                return Ok(None);
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        let catalog = decode(&raw)
            .with_context(|| format!("failed to decode cached catalog {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            revision = catalog.revision,
            groups = catalog.groups.len(),
            "loaded cached catalog"
        );

        Ok(Some(catalog))
    }

    pub fn store(&self, catalog: &Catalog) -> Result<()> {
        let encoded = encode(catalog)?;
        write_file_replacing(&self.path, encoded.as_bytes())?;

        info!(
            path = %self.path.display(),
            revision = catalog.revision,
            "wrote cached catalog"
        );

        Ok(())
    }

    pub fn describe(&self) -> Result<CacheFileInfo> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(CacheFileInfo {
                    path: self.path.display().to_string(),
                    exists: false,
                    size_bytes: None,
                    modified_at: None,
                });
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to inspect {}", self.path.display()));
            }
        };

        Ok(CacheFileInfo {
            path: self.path.display().to_string(),
            exists: true,
            size_bytes: Some(metadata.len()),
            modified_at: metadata.modified().ok().map(system_time_utc_string),
        })
    }
}

/// `$HOME/.hst`, or `%USERPROFILE%\.hst` where `HOME` is unset.
pub fn default_path() -> Result<PathBuf> {
    let Some(home) = std::env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .or_else(|| std::env::var_os("USERPROFILE").filter(|value| !value.is_empty()))
    else {
        bail!("cannot locate home directory for the cache file; pass --cache-path");
    };

    Ok(PathBuf::from(home).join(CACHE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryGroup, StatusRecord};

    fn sample() -> Catalog {
        Catalog {
            revision: 1_317_392_915,
            groups: vec![
                CategoryGroup {
                    label: "2xx success".to_string(),
                    records: vec![StatusRecord {
                        code: "200".to_string(),
                        name: "OK".to_string(),
                        description: "Standard response for \"successful\" requests.".to_string(),
                    }],
                },
                CategoryGroup {
                    label: "See also".to_string(),
                    records: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn decode_inverts_encode() {
        for catalog in [sample(), Catalog::default()] {
            let encoded = encode(&catalog).expect("encode");
            assert_eq!(decode(encoded.as_bytes()).expect("decode"), catalog);
        }
    }

    #[test]
    fn encode_is_text_safe_and_deterministic() {
        let first = encode(&sample()).expect("encode");
        let second = encode(&sample()).expect("encode");
        assert_eq!(first, second);
        assert!(first.bytes().all(|b| b.is_ascii_graphic()));

        let with_newline = format!("{first}\n");
        assert_eq!(decode(with_newline.as_bytes()).expect("decode"), sample());
    }

    #[test]
    fn decode_rejects_empty_input() {
        assert!(matches!(decode(b""), Err(DecodeError::Empty)));
        assert!(matches!(decode(b"  \n"), Err(DecodeError::Empty)));
    }

    #[test]
    fn decode_rejects_truncated_input() {
        let encoded = encode(&sample()).expect("encode");
        let truncated = &encoded.as_bytes()[..encoded.len() / 2];
        assert!(decode(truncated).is_err());

        let clean_cut = STANDARD.encode(&STANDARD.decode(&encoded).expect("base64")[..40]);
        assert!(matches!(
            decode(clean_cut.as_bytes()),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn decode_rejects_non_base64() {
        assert!(matches!(
            decode(b"{not base64}"),
            Err(DecodeError::Base64(_))
        ));
    }

    #[test]
    fn decode_detects_tampered_catalog() {
        let encoded = encode(&sample()).expect("encode");
        let json = String::from_utf8(STANDARD.decode(&encoded).expect("base64")).expect("utf8");
        let tampered = STANDARD.encode(json.replace("\"200\"", "\"201\""));

        assert!(matches!(
            decode(tampered.as_bytes()),
            Err(DecodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn decode_rejects_unknown_format_version() {
        let envelope = serde_json::json!({
            "format": CACHE_FORMAT,
            "format_version": 99,
            "catalog_sha256": "",
            "catalog": {"revision": 1, "code_types": []},
        });
        let encoded = STANDARD.encode(envelope.to_string());

        assert!(matches!(
            decode(encoded.as_bytes()),
            Err(DecodeError::UnsupportedFormat { version: 99, .. })
        ));
    }

    #[test]
    fn store_round_trips_and_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path().join("nested").join(".hst"));

        assert!(store.load().expect("load").is_none());
        assert!(!store.describe().expect("describe").exists);

        store.store(&sample()).expect("store");
        assert_eq!(store.load().expect("load"), Some(sample()));

        let info = store.describe().expect("describe");
        assert!(info.exists);
        assert!(info.size_bytes.unwrap_or(0) > 0);
        assert!(info.modified_at.is_some());
    }

    #[test]
    fn store_load_surfaces_decode_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".hst");
        fs::write(&path, "not a catalog").expect("write");

        let err = CacheStore::new(&path).load().expect_err("corrupt cache");
        assert!(err.downcast_ref::<DecodeError>().is_some());
    }
}
