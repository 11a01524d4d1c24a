//! `std::io` and `tokio::io` adapters around [`Sha256`]

use crate::digest::Sha256Digest;
use crate::sha256::Sha256;
use crate::Result;
use std::io::{ErrorKind, Read};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Read buffer size used by the reader helpers
const READ_BUF_LEN: usize = 8192;

impl std::io::Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Hash everything `reader` yields until EOF
///
/// Only a fixed 8 KiB buffer is held in memory.
///
/// # Errors
///
/// Returns `HashError::StreamProcessing` if reading fails, or
/// `HashError::LengthOverflow` for inputs past the SHA-256 limit.
pub fn hash_reader<R: Read>(mut reader: R) -> Result<Sha256Digest> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; READ_BUF_LEN];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.update(&buf[..n])?;
    }
    hasher.finalize()
}

/// Async counterpart of [`hash_reader`]
///
/// # Errors
///
/// Same conditions as [`hash_reader`].
pub async fn hash_async_reader<R: AsyncRead + Unpin>(mut reader: R) -> Result<Sha256Digest> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; READ_BUF_LEN];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n])?;
    }
    let digest = hasher.finalize()?;
    tracing::debug!(digest = %digest, "SHA-256 computed from async reader");
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HashError;
    use std::io::Write;

    const ABC_HEX: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_write_impl_feeds_hasher() -> Result<()> {
        let mut hasher = Sha256::new();
        write!(hasher, "a")?;
        hasher.write_all(b"bc")?;
        hasher.flush()?;
        assert_eq!(hasher.finalize()?.to_hex(), ABC_HEX);
        Ok(())
    }

    #[test]
    fn test_write_after_finish_is_invalid_input() -> Result<()> {
        let mut hasher = Sha256::new();
        let mut out = [0u8; 32];
        hasher.finish(&mut out)?;
        let err = hasher.write(b"x").map(|_| ()).err();
        assert_eq!(err.map(|e| e.kind()), Some(ErrorKind::InvalidInput));
        Ok(())
    }

    #[test]
    fn test_hash_reader_large_input() -> Result<()> {
        let data = vec![b'a'; 3 * READ_BUF_LEN + 17];
        let expected = Sha256::digest(&data)?;
        assert_eq!(hash_reader(data.as_slice())?, expected);
        Ok(())
    }

    #[test]
    fn test_hash_reader_propagates_errors() {
        assert!(matches!(
            hash_reader(FailingReader),
            Err(HashError::StreamProcessing(msg)) if msg.contains("disk on fire")
        ));
    }

    #[tokio::test]
    async fn test_hash_async_reader() -> Result<()> {
        let digest = hash_async_reader(&b"abc"[..]).await?;
        assert_eq!(digest.to_hex(), ABC_HEX);
        Ok(())
    }
}
