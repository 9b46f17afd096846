use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::CoreError;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
/// AES-GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Argon2id cost parameters. Written into the file header so that files
/// keep opening after the defaults change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 19_456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Reject parameters outside what a wallet file may ask for, so a crafted
    /// header cannot make us allocate gigabytes.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(8..=262_144).contains(&self.memory_cost) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF memory cost {} KiB out of range 8..=262144",
                self.memory_cost
            )));
        }
        if !(1..=10).contains(&self.time_cost) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF time cost {} out of range 1..=10",
                self.time_cost
            )));
        }
        if !(1..=8).contains(&self.parallelism) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF parallelism {} out of range 1..=8",
                self.parallelism
            )));
        }
        Ok(())
    }
}

/// 256-bit AES key derived from the wallet password.
pub struct VaultKey([u8; 32]);

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VaultKey(<redacted>)")
    }
}

impl VaultKey {
    /// Argon2id(password, salt) with the given cost parameters.
    pub fn derive(password: &str, salt: &[u8; SALT_LEN], params: &KdfParams) -> Result<Self, CoreError> {
        let argon_params = Params::new(params.memory_cost, params.time_cost, params.parallelism, Some(32))
            .map_err(|e| CoreError::Encryption(format!("Invalid Argon2 params: {e}")))?;

        let mut key = [0u8; 32];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params)
            .hash_password_into(password.as_bytes(), salt, &mut key)
            .map_err(|e| CoreError::Encryption(format!("Key derivation failed: {e}")))?;
        Ok(Self(key))
    }

    fn cipher(&self) -> Result<Aes256Gcm, CoreError> {
        Aes256Gcm::new_from_slice(&self.0)
            .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))
    }

    /// Encrypt and authenticate. The tag is appended to the output.
    pub fn seal(&self, plaintext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, CoreError> {
        self.cipher()?
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|e| CoreError::Encryption(format!("Encryption failed: {e}")))
    }

    /// Verify and decrypt. A wrong key or tampered bytes yield [`CoreError::Decryption`].
    pub fn open(&self, ciphertext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, CoreError> {
        Ok(self.cipher()?.decrypt(Nonce::from_slice(nonce), ciphertext)?)
    }
}

/// Fill an array from the OS CSPRNG.
pub fn random_bytes<const N: usize>() -> Result<[u8; N], CoreError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::Encryption(format!("Random source unavailable: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> KdfParams {
        KdfParams {
            memory_cost: 64,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn seal_then_open_with_same_key() {
        let salt = random_bytes::<SALT_LEN>().unwrap();
        let nonce = random_bytes::<NONCE_LEN>().unwrap();
        let key = VaultKey::derive("mật khẩu", &salt, &cheap()).unwrap();
        let sealed = key.seal(b"expenses", &nonce).unwrap();
        assert_eq!(sealed.len(), b"expenses".len() + TAG_LEN);
        assert_eq!(key.open(&sealed, &nonce).unwrap(), b"expenses");
    }

    #[test]
    fn wrong_password_fails_to_open() {
        let salt = [7u8; SALT_LEN];
        let nonce = [1u8; NONCE_LEN];
        let sealed = VaultKey::derive("right", &salt, &cheap())
            .unwrap()
            .seal(b"data", &nonce)
            .unwrap();
        let wrong = VaultKey::derive("wrong", &salt, &cheap()).unwrap();
        assert!(matches!(wrong.open(&sealed, &nonce), Err(CoreError::Decryption)));
    }

    #[test]
    fn debug_hides_key_material() {
        let key = VaultKey::derive("pw", &[0u8; SALT_LEN], &cheap()).unwrap();
        assert_eq!(format!("{key:?}"), "VaultKey(<redacted>)");
    }

    #[test]
    fn oversized_memory_cost_rejected() {
        let params = KdfParams {
            memory_cost: 4_000_000,
            ..KdfParams::default()
        };
        assert!(params.validate().is_err());
        assert!(KdfParams::default().validate().is_ok());
    }
}
