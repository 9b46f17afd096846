use super::encryption::{KdfParams, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::errors::CoreError;

/// Magic bytes identifying a wallet file.
pub const MAGIC: &[u8; 4] = b"VCTW";

/// Current wallet file format version.
pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(3 × 4) + salt + nonce
pub const HEADER_LEN: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN;

/// Header of an encrypted wallet file. The ciphertext follows it directly
/// and runs to the end of the file.
///
/// ```text
/// [VCTW] [version u16 LE] [memory_cost u32 LE] [time_cost u32 LE]
/// [parallelism u32 LE] [salt 16B] [nonce 12B] [ciphertext + tag ...]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultHeader {
    pub version: u16,
    pub kdf: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
}

impl VaultHeader {
    /// Serialize the header followed by `ciphertext`.
    pub fn encode(&self, ciphertext: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&self.version.to_le_bytes());
        for word in [self.kdf.memory_cost, self.kdf.time_cost, self.kdf.parallelism] {
            out.extend_from_slice(&word.to_le_bytes());
        }
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(ciphertext);
        out
    }

    /// Parse and validate a header. Returns it with the ciphertext slice.
    pub fn decode(data: &[u8]) -> Result<(Self, &[u8]), CoreError> {
        if data.len() < HEADER_LEN + TAG_LEN {
            return Err(CoreError::InvalidFileFormat(format!(
                "File too small for a wallet ({} bytes)",
                data.len()
            )));
        }

        let mut reader = ByteReader::new(data);
        if &reader.take::<4>() != MAGIC {
            return Err(CoreError::InvalidFileFormat("Not a wallet file (bad magic)".into()));
        }

        let version = u16::from_le_bytes(reader.take());
        if version == 0 || version > CURRENT_VERSION {
            return Err(CoreError::UnsupportedVersion(version));
        }

        let kdf = KdfParams {
            memory_cost: u32::from_le_bytes(reader.take()),
            time_cost: u32::from_le_bytes(reader.take()),
            parallelism: u32::from_le_bytes(reader.take()),
        };
        kdf.validate()?;

        let header = Self {
            version,
            kdf,
            salt: reader.take(),
            nonce: reader.take(),
        };
        Ok((header, reader.rest()))
    }
}

/// Forward-only cursor. Callers check the total length up front.
struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        buf
    }

    fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> VaultHeader {
        VaultHeader {
            version: CURRENT_VERSION,
            kdf: KdfParams::default(),
            salt: [3u8; SALT_LEN],
            nonce: [4u8; NONCE_LEN],
        }
    }

    #[test]
    fn decode_reads_back_header_and_payload() {
        let payload = [9u8; 40];
        let bytes = header().encode(&payload);
        assert_eq!(&bytes[..4], MAGIC);
        let (decoded, rest) = VaultHeader::decode(&bytes).unwrap();
        assert_eq!(decoded, header());
        assert_eq!(rest, &payload);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = header().encode(&[0u8; 32]);
        bytes[0] = b'X';
        assert!(matches!(
            VaultHeader::decode(&bytes),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn rejects_future_version() {
        let mut h = header();
        h.version = CURRENT_VERSION + 1;
        let bytes = h.encode(&[0u8; 32]);
        assert!(matches!(
            VaultHeader::decode(&bytes),
            Err(CoreError::UnsupportedVersion(v)) if v == CURRENT_VERSION + 1
        ));
    }

    #[test]
    fn rejects_truncated_file() {
        let bytes = header().encode(&[]);
        assert!(VaultHeader::decode(&bytes).is_err());
    }

    #[test]
    fn rejects_hostile_kdf_params() {
        let mut h = header();
        h.kdf.parallelism = 200;
        let bytes = h.encode(&[0u8; 32]);
        assert!(VaultHeader::decode(&bytes).is_err());
    }
}
