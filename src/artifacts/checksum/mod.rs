//! Checksum sidecars
//!
//! Every file placed in the repository gets a `<file>.md5` and a `<file>.sha1`
//! companion holding one line in the format printed by `md5sum`/`sha1sum`:
//!
//! ```text
//! <lowercase-hex-digest>  <file-name>
//! ```
//!
//! Only the bare file name is recorded, so `md5sum -c` works when run from
//! the directory holding the artifact.

use sha1::{Digest, Sha1};

/// Separator between digest and file name in text mode
const SIDECAR_SEPARATOR: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumKind {
    Md5,
    Sha1,
}

/// Sidecars written for every stored file, in write order
pub const SIDECAR_KINDS: [ChecksumKind; 2] = [ChecksumKind::Md5, ChecksumKind::Sha1];

impl ChecksumKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ChecksumKind::Md5 => "md5",
            ChecksumKind::Sha1 => "sha1",
        }
    }

    pub fn hex_len(&self) -> usize {
        match self {
            ChecksumKind::Md5 => 32,
            ChecksumKind::Sha1 => 40,
        }
    }

    /// Sidecar file name for `file_name`, e.g. `mylib-1.0.aar.sha1`
    pub fn sidecar_name(&self, file_name: &str) -> String {
        format!("{}.{}", file_name, self.extension())
    }
}

/// Computes the digest of an in-memory buffer
pub trait Digester {
    /// Lowercase hex digest of `data`
    fn digest(&self, data: &[u8]) -> String;
}

impl Digester for ChecksumKind {
    fn digest(&self, data: &[u8]) -> String {
        match self {
            ChecksumKind::Md5 => format!("{:x}", md5::compute(data)),
            ChecksumKind::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(data);
                format!("{:x}", hasher.finalize())
            }
        }
    }
}

impl std::fmt::Display for ChecksumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecksumKind::Md5 => write!(f, "MD5"),
            ChecksumKind::Sha1 => write!(f, "SHA-1"),
        }
    }
}

pub fn sidecar_line(digest: &str, file_name: &str) -> String {
    format!("{digest}{SIDECAR_SEPARATOR}{file_name}\n")
}

/// Split a sidecar line into its digest and file name
///
/// Accepts the binary-mode marker (`<digest> *<file>`) that checksum tools
/// emit on some platforms.
pub fn parse_sidecar_line(line: &str) -> anyhow::Result<(String, String)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (digest, file_name) = line
        .split_once(' ')
        .ok_or_else(|| anyhow::anyhow!("malformed checksum line: '{line}'"))?;
    let file_name = file_name
        .strip_prefix(' ')
        .or_else(|| file_name.strip_prefix('*'))
        .unwrap_or(file_name);

    if digest.is_empty() || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("malformed checksum digest: '{digest}'");
    }
    if file_name.is_empty() {
        anyhow::bail!("checksum line has no file name: '{line}'");
    }

    Ok((digest.to_ascii_lowercase(), file_name.to_string()))
}
