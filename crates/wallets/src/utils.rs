use crate::{error::PrivateKeyError, rpc::LocalSigner};
use alloy_primitives::{B256, hex::FromHex};
use alloy_signer_local::PrivateKeySigner;
use eyre::{Context, Result};
use std::{fs, path::Path};

fn ensure_pk_not_env(pk: &str) -> Result<()> {
    if !pk.starts_with("0x") && std::env::var(pk).is_ok() {
        return Err(PrivateKeyError::ExistsAsEnvVar(pk.to_string()).into());
    }
    Ok(())
}

/// Validates and sanitizes user inputs, returning an unlocked [LocalSigner].
pub fn create_private_key_signer(private_key_str: &str) -> Result<LocalSigner> {
    let Ok(private_key) = B256::from_hex(private_key_str.trim()) else {
        ensure_pk_not_env(private_key_str)?;
        eyre::bail!("Failed to decode private key")
    };
    match PrivateKeySigner::from_bytes(&private_key) {
        Ok(pk) => Ok(LocalSigner::Unlocked(pk)),
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            eyre::bail!("Failed to create wallet from private key: {err}")
        }
    }
}

/// Creates a keystore signer from given parameters.
///
/// If a password or password file is provided, the keystore is decrypted right away and the
/// signer's account counts as already authorized.
///
/// Otherwise the keystore stays locked until the user is prompted for its password.
pub fn create_keystore_signer(
    path: &Path,
    maybe_password: Option<&str>,
    maybe_password_file: Option<&Path>,
) -> Result<LocalSigner> {
    if !path.exists() {
        eyre::bail!("Keystore file `{path:?}` does not exist")
    }

    if path.is_dir() {
        eyre::bail!(
            "Keystore path `{path:?}` is a directory. Please specify the keystore file directly."
        )
    }

    let password = match (maybe_password, maybe_password_file) {
        (Some(password), _) => Some(password.to_string()),
        (_, Some(password_file)) => {
            if !password_file.is_file() {
                eyre::bail!("Keystore password file `{password_file:?}` does not exist")
            }
            Some(
                fs::read_to_string(password_file)
                    .wrap_err_with(|| {
                        format!("Failed to read keystore password file at {password_file:?}")
                    })?
                    .trim_end()
                    .to_string(),
            )
        }
        (None, None) => None,
    };

    if let Some(password) = password {
        let wallet = PrivateKeySigner::decrypt_keystore(path, password)
            .wrap_err_with(|| format!("Failed to decrypt keystore {path:?}"))?;
        Ok(LocalSigner::Unlocked(wallet))
    } else {
        Ok(LocalSigner::Keystore(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_private_key_signer() {
        let pk = B256::random();
        let pk_str = pk.to_string();
        assert!(matches!(create_private_key_signer(&pk_str), Ok(LocalSigner::Unlocked(_))));
        // skip 0x
        assert!(create_private_key_signer(&pk_str[2..]).is_ok());
        assert!(create_private_key_signer("not a key").is_err());
    }

    #[test]
    fn missing_keystore_is_an_error() {
        let err = create_keystore_signer(Path::new("/nonexistent/keystore.json"), None, None)
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn keystore_without_password_stays_locked() {
        let dir = std::env::temp_dir();
        let file = dir.join(format!("nft-mint-keystore-{}", B256::random()));
        fs::write(&file, "{}").unwrap();
        let signer = create_keystore_signer(&file, None, None).unwrap();
        assert!(matches!(signer, LocalSigner::Keystore(ref path) if path == &file));
        fs::remove_file(file).unwrap();
    }
}
