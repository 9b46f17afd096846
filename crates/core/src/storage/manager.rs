use crate::errors::CoreError;
use crate::models::wallet_data::WalletData;
use crate::models::Validate;

use super::encryption::{random_bytes, KdfParams, VaultKey, NONCE_LEN, SALT_LEN};
use super::format::{VaultHeader, CURRENT_VERSION};

/// Save/load the wallet to/from password-protected bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// WalletData → bincode → AES-256-GCM(Argon2id(password)) → wallet file bytes.
    /// A fresh salt and nonce are drawn on every save.
    pub fn save_to_bytes(data: &WalletData, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_with_params(data, password, KdfParams::default())
    }

    /// Like [`StorageManager::save_to_bytes`] with explicit KDF cost parameters.
    pub fn save_with_params(
        data: &WalletData,
        password: &str,
        kdf: KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        if password.is_empty() {
            return Err(CoreError::ValidationError("Password must not be empty".into()));
        }
        kdf.validate()?;

        let plaintext = bincode::serialize(data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize wallet: {e}")))?;

        let header = VaultHeader {
            version: CURRENT_VERSION,
            kdf,
            salt: random_bytes::<SALT_LEN>()?,
            nonce: random_bytes::<NONCE_LEN>()?,
        };
        let key = VaultKey::derive(password, &header.salt, &header.kdf)?;
        let ciphertext = key.seal(&plaintext, &header.nonce)?;

        tracing::debug!(
            expenses = data.expenses.len(),
            budgets = data.budgets.len(),
            alerts = data.alerts.len(),
            "wallet sealed"
        );
        Ok(header.encode(&ciphertext))
    }

    /// Parse the header, re-derive the key, decrypt, and decode.
    pub fn load_from_bytes(bytes: &[u8], password: &str) -> Result<WalletData, CoreError> {
        let (header, ciphertext) = VaultHeader::decode(bytes)?;
        let key = VaultKey::derive(password, &header.salt, &header.kdf)?;
        let plaintext = key.open(ciphertext, &header.nonce)?;

        let data: WalletData = bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize wallet: {e}")))?;
        data.validate()?;
        Ok(data)
    }

    /// Save the wallet to an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(
        data: &WalletData,
        path: impl AsRef<std::path::Path>,
        password: &str,
    ) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(data, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load the wallet from an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(
        path: impl AsRef<std::path::Path>,
        password: &str,
    ) -> Result<WalletData, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
