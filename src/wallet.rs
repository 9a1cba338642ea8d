use std::path::PathBuf;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("no wallet configured - set WAVEPORTAL_PRIVATE_KEY or pass --keystore")]
    NoCredentials,

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("keystore password required - set WAVEPORTAL_KEYSTORE_PASSWORD")]
    MissingPassword,

    #[error("failed to unlock keystore {}: {reason}", path.display())]
    Keystore { path: PathBuf, reason: String },
}

/// Where the signing credential comes from.
#[derive(Debug, Clone)]
enum CredentialSource {
    PrivateKey(String),
    Keystore(PathBuf),
}

/// Wallet availability, made explicit so every signing operation can be
/// guarded by the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletState {
    /// No credential configured.
    Unavailable,
    /// A credential is configured but has not been loaded.
    Available,
    /// A signer is loaded for this account. There is no transition out:
    /// a local signer cannot be revoked mid-session.
    Connected(Address),
}

/// Detects locally configured signing credentials and loads them on
/// request. A plain private key counts as already authorized and is
/// loaded without interaction; a keystore stays `Available` until the
/// user explicitly connects, since unlocking it is the grant step.
pub struct WalletGateway {
    source: Option<CredentialSource>,
    keystore_password: Option<String>,
    state: WalletState,
    wallet: Option<EthereumWallet>,
}

impl WalletGateway {
    pub fn from_config(config: &Config) -> Self {
        let source = if let Some(ref key) = config.private_key {
            Some(CredentialSource::PrivateKey(key.clone()))
        } else {
            config
                .keystore
                .as_ref()
                .map(|path| CredentialSource::Keystore(path.clone()))
        };

        let state = if source.is_some() {
            WalletState::Available
        } else {
            WalletState::Unavailable
        };

        Self {
            source,
            keystore_password: config.keystore_password.clone(),
            state,
            wallet: None,
        }
    }

    pub fn state(&self) -> WalletState {
        self.state
    }

    /// Non-interactive startup check: connect if a credential needs no
    /// unlock step, otherwise leave the state as detected. Never fails on
    /// a merely absent wallet.
    pub fn check_existing(&mut self) -> Result<Option<Address>, WalletError> {
        if matches!(self.source, Some(CredentialSource::PrivateKey(_))) {
            return self.connect().map(Some);
        }
        Ok(None)
    }

    /// Load the configured credential and derive the account. Connecting
    /// while already connected returns the current account untouched.
    pub fn connect(&mut self) -> Result<Address, WalletError> {
        if let WalletState::Connected(address) = self.state {
            return Ok(address);
        }

        let source = self.source.as_ref().ok_or(WalletError::NoCredentials)?;

        let signer = match source {
            CredentialSource::PrivateKey(key) => key
                .trim()
                .parse::<PrivateKeySigner>()
                .map_err(|e| WalletError::InvalidKey(e.to_string()))?,
            CredentialSource::Keystore(path) => {
                let password = self
                    .keystore_password
                    .as_ref()
                    .ok_or(WalletError::MissingPassword)?;
                PrivateKeySigner::decrypt_keystore(path, password).map_err(|e| {
                    WalletError::Keystore {
                        path: path.clone(),
                        reason: e.to_string(),
                    }
                })?
            }
        };

        let address = signer.address();
        self.wallet = Some(EthereumWallet::from(signer));
        self.state = WalletState::Connected(address);
        Ok(address)
    }

    /// The loaded wallet, present once `Connected`.
    pub fn wallet(&self) -> Option<&EthereumWallet> {
        self.wallet.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // First well-known anvil/hardhat dev account.
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn config_with_key(key: Option<&str>) -> Config {
        Config {
            private_key: key.map(String::from),
            ..Config::for_tests()
        }
    }

    #[test]
    fn test_no_credentials_is_unavailable_not_an_error() {
        let mut gateway = WalletGateway::from_config(&config_with_key(None));
        assert_eq!(gateway.state(), WalletState::Unavailable);
        assert_eq!(gateway.check_existing().unwrap(), None);
        assert_eq!(gateway.state(), WalletState::Unavailable);
    }

    #[test]
    fn test_connect_without_credentials_fails() {
        let mut gateway = WalletGateway::from_config(&config_with_key(None));
        assert!(matches!(
            gateway.connect(),
            Err(WalletError::NoCredentials)
        ));
    }

    #[test]
    fn test_private_key_connects_on_startup_check() {
        let mut gateway = WalletGateway::from_config(&config_with_key(Some(DEV_KEY)));
        assert_eq!(gateway.state(), WalletState::Available);

        let account = gateway.check_existing().unwrap().unwrap();
        assert_eq!(format!("{account}"), DEV_ADDRESS);
        assert_eq!(gateway.state(), WalletState::Connected(account));
        assert!(gateway.wallet().is_some());
    }

    #[test]
    fn test_connect_accepts_0x_prefix() {
        let key = format!("0x{DEV_KEY}");
        let mut gateway = WalletGateway::from_config(&config_with_key(Some(&key)));
        let account = gateway.connect().unwrap();
        assert_eq!(format!("{account}"), DEV_ADDRESS);
    }

    #[test]
    fn test_connect_twice_is_coalesced() {
        let mut gateway = WalletGateway::from_config(&config_with_key(Some(DEV_KEY)));
        let first = gateway.connect().unwrap();
        let second = gateway.connect().unwrap();
        assert_eq!(first, second);
        assert_eq!(gateway.state(), WalletState::Connected(first));
    }

    #[test]
    fn test_invalid_key_surfaces_notice() {
        let mut gateway = WalletGateway::from_config(&config_with_key(Some("not-a-key")));
        assert!(matches!(gateway.connect(), Err(WalletError::InvalidKey(_))));
        // Failed connect leaves the state unchanged.
        assert_eq!(gateway.state(), WalletState::Available);
    }

    #[test]
    fn test_keystore_without_password() {
        let config = Config {
            keystore: Some(PathBuf::from("/nonexistent/keystore.json")),
            ..Config::for_tests()
        };
        let mut gateway = WalletGateway::from_config(&config);
        // Keystores are not unlocked by the startup check.
        assert_eq!(gateway.check_existing().unwrap(), None);
        assert_eq!(gateway.state(), WalletState::Available);
        assert!(matches!(
            gateway.connect(),
            Err(WalletError::MissingPassword)
        ));
    }
}
