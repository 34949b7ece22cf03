use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

use sha2::Digest;
use sha2::Sha256;
use sha2::Sha512;

use super::errors::DigestError;
use crate::algorithm::DigestAlgorithm;

/// Compute the digest of a file's content.
///
/// The file is streamed, not loaded whole. The handle is closed on every
/// return path when it goes out of scope.
///
/// # Errors
/// * `Io` - The file could not be opened or read
pub fn digest_file(
    path: impl AsRef<Path>,
    algorithm: DigestAlgorithm,
) -> Result<Vec<u8>, DigestError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "Failed to open file for digest");
        DigestError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let digest = digest_reader(file, algorithm).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "Failed to read file for digest");
        DigestError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::debug!(path = %path.display(), ?algorithm, "File digest computed");

    Ok(digest)
}

/// Compute the digest of everything `reader` yields.
pub fn digest_reader<R: Read>(mut reader: R, algorithm: DigestAlgorithm) -> io::Result<Vec<u8>> {
    match algorithm {
        DigestAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            io::copy(&mut reader, &mut hasher)?;
            Ok(hasher.finalize().to_vec())
        }
        DigestAlgorithm::Sha512 => {
            let mut hasher = Sha512::new();
            io::copy(&mut reader, &mut hasher)?;
            Ok(hasher.finalize().to_vec())
        }
    }
}

/// Compute the digest of an in-memory buffer.
pub fn digest_bytes(bytes: &[u8], algorithm: DigestAlgorithm) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Sha256 => Sha256::digest(bytes).to_vec(),
        DigestAlgorithm::Sha512 => Sha512::digest(bytes).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const EMPTY_SHA256: [u8; 4] = [0xe3, 0xb0, 0xc4, 0x42];
    const ABC_SHA256: [u8; 4] = [0xba, 0x78, 0x16, 0xbf];

    #[test]
    fn test_digest_bytes() {
        let digest = digest_bytes(b"abc", DigestAlgorithm::Sha256);

        assert_eq!(digest.len(), 32);
        assert_eq!(digest[..4], ABC_SHA256);
    }

    #[test]
    fn test_digest_empty_file() {
        let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");

        let digest = digest_file(file.path(), DigestAlgorithm::Sha256).unwrap();
        assert_eq!(digest[..4], EMPTY_SHA256);
        assert_eq!(digest, digest_bytes(b"", DigestAlgorithm::Sha256));
    }

    #[test]
    fn test_digest_file_matches_in_memory_digest() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let content: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        file.write_all(&content).unwrap();
        file.flush().unwrap();

        for algorithm in [DigestAlgorithm::Sha256, DigestAlgorithm::Sha512] {
            let digest = digest_file(file.path(), algorithm).unwrap();
            assert_eq!(digest.len(), algorithm.digest_size());
            assert_eq!(digest, digest_bytes(&content, algorithm));
        }
    }

    #[test]
    fn test_digest_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bin");

        let err = digest_file(&missing, DigestAlgorithm::Sha256).unwrap_err();
        match err {
            DigestError::Io { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
        }
    }

    #[test]
    fn test_digest_reader_propagates_read_errors() {
        struct Failing;

        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let result = digest_reader(Failing, DigestAlgorithm::Sha512);
        assert!(result.is_err());
    }
}
