//! Incremental SHA-256 hasher
//!
//! [`Sha256`] buffers partial 64-byte blocks across [`Sha256::update`] calls,
//! compresses every complete block as soon as it is available and applies the
//! FIPS 180-4 padding in [`Sha256::finish`]. The digest is independent of how
//! the input was chunked.
//!
//! ```
//! use hashkit_hashing::Sha256;
//!
//! # fn main() -> hashkit_hashing::Result<()> {
//! let mut hasher = Sha256::new();
//! hasher.update(b"ab")?;
//! hasher.update(b"c")?;
//! let digest = hasher.finalize()?;
//! assert_eq!(
//!     digest.to_hex(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! # Ok(())
//! # }
//! ```

mod compress;

use crate::digest::Sha256Digest;
use crate::{HashError, Result};
use compress::compress;
use hashkit_common::LoggingTransformer;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of one compression block in bytes
pub const BLOCK_LEN: usize = 64;

/// Size of a SHA-256 digest in bytes
pub const DIGEST_LEN: usize = 32;

/// Largest total input, in bytes, whose bit length still fits the 64-bit length field
pub const MAX_INPUT_BYTES: u64 = u64::MAX >> 3;

/// Offset of the big-endian bit-length field inside the final block
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// First 32 bits of the fractional parts of the square roots of the first 8 primes
pub(crate) const INITIAL_STATE: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Report a lifecycle or length-limit violation and hand the error back
fn contract_violation(operation: &str, err: HashError) -> HashError {
    LoggingTransformer::log_contract_violation(operation, &err);
    err
}

/// Lifecycle phase of a [`Sha256`] instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Freshly created or reset; no input seen
    Initialized,
    /// At least one non-empty update has been applied
    Accumulating,
    /// The digest has been written out; only [`Sha256::reset`] is allowed
    Finished,
}

/// Streaming SHA-256 hasher
///
/// A plain value with fixed-size state and no heap allocation. Mutation needs
/// `&mut self`, so one instance cannot be fed from several threads at once;
/// use one hasher per concurrent stream. The state is wiped on drop.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    total_len: u64,
    phase: Phase,
}

impl Drop for Sha256 {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
        self.buffer_len.zeroize();
        self.total_len.zeroize();
    }
}

impl ZeroizeOnDrop for Sha256 {}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Buffered input and intermediate state stay out of logs
        f.debug_struct("Sha256")
            .field("buffer_len", &self.buffer_len)
            .field("total_len", &self.total_len)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl Sha256 {
    /// Create a hasher in the initialized phase
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            total_len: 0,
            phase: Phase::Initialized,
        }
    }

    /// Discard all progress and return to the initialized phase
    ///
    /// Valid from any phase, including after [`Sha256::finish`].
    pub fn reset(&mut self) {
        self.buffer.zeroize();
        self.state = INITIAL_STATE;
        self.buffer_len = 0;
        self.total_len = 0;
        self.phase = Phase::Initialized;
    }

    /// Feed `data` into the running computation
    ///
    /// Any slice length is accepted; an empty slice is a no-op.
    ///
    /// # Errors
    ///
    /// - [`HashError::Finalized`] if the hasher was already finished
    /// - [`HashError::LengthOverflow`] if the total input would exceed
    ///   [`MAX_INPUT_BYTES`]; the state is left untouched
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.phase == Phase::Finished {
            return Err(contract_violation("update", HashError::Finalized));
        }
        if data.is_empty() {
            return Ok(());
        }

        let requested = u64::try_from(data.len()).unwrap_or(u64::MAX);
        let Some(total) = self
            .total_len
            .checked_add(requested)
            .filter(|total| *total <= MAX_INPUT_BYTES)
        else {
            return Err(contract_violation(
                "update",
                HashError::LengthOverflow {
                    total: self.total_len,
                    requested,
                },
            ));
        };
        self.total_len = total;
        self.phase = Phase::Accumulating;

        let mut data = data;

        // Top up a partially filled buffer first
        if self.buffer_len > 0 {
            let take = (BLOCK_LEN - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len < BLOCK_LEN {
                return Ok(());
            }
            compress(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        // Whole blocks straight from the caller's slice
        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();

        tracing::trace!(
            len = requested,
            total = self.total_len,
            buffered = self.buffer_len,
            "SHA-256 update"
        );
        Ok(())
    }

    /// Apply the final padding and write the digest into `out`
    ///
    /// Afterwards the hasher is in [`Phase::Finished`] with its state wiped; call
    /// [`Sha256::reset`] before hashing another message.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Finalized`] if the hasher was already finished.
    pub fn finish(&mut self, out: &mut [u8; DIGEST_LEN]) -> Result<()> {
        if self.phase == Phase::Finished {
            return Err(contract_violation("finish", HashError::Finalized));
        }

        // total_len <= MAX_INPUT_BYTES, so the shift cannot overflow
        let bit_len = self.total_len << 3;

        let mut pos = self.buffer_len;
        self.buffer[pos] = 0x80;
        pos += 1;

        // No room left for the length field: pad out and flush an extra block
        if pos > LENGTH_OFFSET {
            self.buffer[pos..].fill(0);
            compress(&mut self.state, &self.buffer);
            pos = 0;
        }

        self.buffer[pos..LENGTH_OFFSET].fill(0);
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.state, &self.buffer);

        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        tracing::trace!(total = self.total_len, "SHA-256 finish");

        self.state.zeroize();
        self.buffer.zeroize();
        self.buffer_len = 0;
        self.phase = Phase::Finished;
        Ok(())
    }

    /// Consume the hasher and return the digest
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Finalized`] if [`Sha256::finish`] was already called.
    pub fn finalize(mut self) -> Result<Sha256Digest> {
        let mut out = [0u8; DIGEST_LEN];
        self.finish(&mut out)?;
        Ok(Sha256Digest::from(out))
    }

    /// Return the digest and reset the hasher for the next message
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Finalized`] if the hasher was already finished.
    pub fn finalize_reset(&mut self) -> Result<Sha256Digest> {
        let mut out = [0u8; DIGEST_LEN];
        self.finish(&mut out)?;
        self.reset();
        Ok(Sha256Digest::from(out))
    }

    /// Hash `data` in one call
    ///
    /// # Errors
    ///
    /// Returns [`HashError::LengthOverflow`] if `data` exceeds [`MAX_INPUT_BYTES`].
    pub fn digest(data: &[u8]) -> Result<Sha256Digest> {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }

    /// Current lifecycle phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Total number of bytes fed since the last reset
    #[must_use]
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Bytes waiting in the internal buffer for a complete block (always below 64)
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_of(hasher: Sha256) -> String {
        hasher.finalize().map(|d| d.to_hex()).unwrap_or_default()
    }

    #[test]
    fn test_empty_input() -> Result<()> {
        assert_eq!(
            Sha256::digest(b"")?.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        Ok(())
    }

    #[test]
    fn test_zero_length_update_is_noop() -> Result<()> {
        let mut hasher = Sha256::new();
        hasher.update(&[])?;
        assert_eq!(hasher.phase(), Phase::Initialized);
        assert_eq!(hasher.total_len(), 0);
        assert_eq!(hex_of(hasher), Sha256::digest(b"")?.to_hex());
        Ok(())
    }

    #[test]
    fn test_single_block_leaves_no_residue() -> Result<()> {
        let mut hasher = Sha256::new();
        hasher.update(&[0x5a; 64])?;
        assert_eq!(hasher.buffered_len(), 0);
        assert_eq!(hasher.total_len(), 64);
        assert_eq!(hasher.phase(), Phase::Accumulating);
        Ok(())
    }

    #[test]
    fn test_65_bytes_leaves_one_buffered() -> Result<()> {
        let mut hasher = Sha256::new();
        hasher.update(&[0x5a; 65])?;
        assert_eq!(hasher.buffered_len(), 1);
        assert_eq!(hasher.total_len(), 65);
        Ok(())
    }

    #[test]
    fn test_buffer_top_up_across_calls() -> Result<()> {
        let data: Vec<u8> = (0..=200u8).collect();
        let mut hasher = Sha256::new();
        hasher.update(&data[..10])?;
        assert_eq!(hasher.buffered_len(), 10);
        hasher.update(&data[10..70])?;
        assert_eq!(hasher.buffered_len(), 6);
        hasher.update(&data[70..])?;
        assert_eq!(hasher.buffered_len(), 201 % 64);
        assert_eq!(hex_of(hasher), Sha256::digest(&data)?.to_hex());
        Ok(())
    }

    #[test]
    fn test_padding_boundaries_match_one_shot() -> Result<()> {
        // 55 fits 0x80 and the length in one block, 56..=63 spill into a second one
        for len in 54..=66 {
            let data = vec![0xa5u8; len];
            let mut split = Sha256::new();
            for byte in &data {
                split.update(std::slice::from_ref(byte))?;
            }
            assert_eq!(hex_of(split), Sha256::digest(&data)?.to_hex(), "len {len}");
        }
        Ok(())
    }

    #[test]
    fn test_update_after_finish_is_rejected() -> Result<()> {
        let mut hasher = Sha256::new();
        hasher.update(b"abc")?;
        let mut out = [0u8; DIGEST_LEN];
        hasher.finish(&mut out)?;
        assert_eq!(hasher.phase(), Phase::Finished);

        assert!(matches!(hasher.update(b"more"), Err(HashError::Finalized)));
        assert!(matches!(hasher.finish(&mut out), Err(HashError::Finalized)));
        assert!(matches!(hasher.finalize(), Err(HashError::Finalized)));
        Ok(())
    }

    #[test]
    fn test_reset_discards_progress() -> Result<()> {
        let mut hasher = Sha256::new();
        hasher.update(b"some earlier message that is discarded")?;
        hasher.reset();
        assert_eq!(hasher.phase(), Phase::Initialized);
        assert_eq!(hasher.buffered_len(), 0);
        hasher.update(b"abc")?;
        assert_eq!(hex_of(hasher), Sha256::digest(b"abc")?.to_hex());
        Ok(())
    }

    #[test]
    fn test_finalize_reset_reuses_instance() -> Result<()> {
        let mut hasher = Sha256::new();
        hasher.update(b"abc")?;
        let first = hasher.finalize_reset()?;
        hasher.update(b"abc")?;
        let second = hasher.finalize_reset()?;
        assert_eq!(first, second);
        assert_eq!(hasher.phase(), Phase::Initialized);
        Ok(())
    }

    #[test]
    fn test_length_overflow_leaves_state_untouched() -> Result<()> {
        let mut hasher = Sha256::new();
        hasher.update(b"abc")?;
        hasher.total_len = MAX_INPUT_BYTES - 1;

        let err = hasher.update(b"xy");
        assert!(matches!(
            err,
            Err(HashError::LengthOverflow {
                total,
                requested: 2
            }) if total == MAX_INPUT_BYTES - 1
        ));
        assert_eq!(hasher.total_len(), MAX_INPUT_BYTES - 1);
        assert_eq!(hasher.buffered_len(), 3);

        // Exactly reaching the limit is still allowed
        hasher.update(b"z")?;
        assert_eq!(hasher.total_len(), MAX_INPUT_BYTES);
        Ok(())
    }

    #[test]
    fn test_violations_are_reported_as_contract_errors() -> Result<()> {
        LoggingTransformer::init_test();

        let mut near_limit = Sha256::new();
        near_limit.total_len = MAX_INPUT_BYTES;
        let overflow = near_limit.update(b"x");
        assert!(overflow.is_err_and(|e| e.is_contract_violation()));

        let mut finished = Sha256::new();
        let mut out = [0u8; DIGEST_LEN];
        finished.finish(&mut out)?;
        assert!(finished.update(b"x").is_err_and(|e| e.is_contract_violation()));
        assert!(finished.finish(&mut out).is_err_and(|e| e.is_contract_violation()));
        Ok(())
    }

    #[test]
    fn test_debug_hides_buffer() -> Result<()> {
        let mut hasher = Sha256::new();
        hasher.update(b"secret")?;
        let rendered = format!("{hasher:?}");
        assert!(rendered.contains("buffer_len: 6"));
        assert!(!rendered.contains("115")); // 's' as a byte
        Ok(())
    }
}
