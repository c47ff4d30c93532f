/*
    Version byte configuration for extended keys.

    A KeyScheme ties the private and public version bytes to the
    address type produced from keys serialized under them. The
    VersionTable maps version bytes found in a serialized key back
    to the scheme and key kind, and can be extended with custom
    schemes (SLIP-132, altcoins, ...).
*/

use crate::{
    address::Address,
    encoding::version_prefix::{ToVersionPrefix, VersionPrefix},
    hdwallet::{ExtendedKeySerializer, HDWError},
    key::PubKey,
    util::Network
};
use serde::{Deserialize, Serialize};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletType {
    P2PKH,
    P2SH_P2WPKH,
    P2WPKH
}

impl WalletType {
    /**
        BIP-43 purpose field of the account path.
    */
    pub fn purpose(&self) -> u32 {
        match self {
            WalletType::P2PKH => 44,
            WalletType::P2SH_P2WPKH => 49,
            WalletType::P2WPKH => 84
        }
    }

    /**
        Encodes the address of a public key for this wallet type.
    */
    pub fn address(&self, pk: &PubKey, network: Network) -> Result<String, HDWError> {
        Ok(match self {
            WalletType::P2PKH => Address::legacy(pk, network),
            WalletType::P2SH_P2WPKH => Address::wrapped_segwit(pk, network),
            WalletType::P2WPKH => Address::p2wpkh(pk, network)?
        })
    }

    /**
        Detects the wallet type from the version bytes of a serialized extended key.
        The key must pass the same checks as a full deserialization.
    */
    pub fn from_xkey(key: &str) -> Result<Self, HDWError> {
        Ok(ExtendedKeySerializer::standard().deserialize(key)?.scheme().wallet_type)
    }
}

impl ToVersionPrefix for WalletType {
    fn private_version_prefix(&self, network: Network) -> VersionPrefix {
        match (self, network) {
            (WalletType::P2PKH, Network::Bitcoin) => VersionPrefix::Xprv,
            (WalletType::P2PKH, Network::Testnet) => VersionPrefix::Tprv,
            (WalletType::P2SH_P2WPKH, Network::Bitcoin) => VersionPrefix::Yprv,
            (WalletType::P2SH_P2WPKH, Network::Testnet) => VersionPrefix::Uprv,
            (WalletType::P2WPKH, Network::Bitcoin) => VersionPrefix::Zprv,
            (WalletType::P2WPKH, Network::Testnet) => VersionPrefix::Vprv
        }
    }

    fn public_version_prefix(&self, network: Network) -> VersionPrefix {
        match (self, network) {
            (WalletType::P2PKH, Network::Bitcoin) => VersionPrefix::Xpub,
            (WalletType::P2PKH, Network::Testnet) => VersionPrefix::Tpub,
            (WalletType::P2SH_P2WPKH, Network::Bitcoin) => VersionPrefix::Ypub,
            (WalletType::P2SH_P2WPKH, Network::Testnet) => VersionPrefix::Upub,
            (WalletType::P2WPKH, Network::Bitcoin) => VersionPrefix::Zpub,
            (WalletType::P2WPKH, Network::Testnet) => VersionPrefix::Vpub
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Private,
    Public
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyScheme {
    pub private_version: u32,
    pub public_version: u32,
    pub wallet_type: WalletType,
    pub network: Network
}

impl KeyScheme {
    /**
        The registered version bytes for a wallet type (xprv/yprv/zprv and testnet variants).
    */
    pub fn new(wallet_type: WalletType, network: Network) -> Self {
        let (private, public) = wallet_type.get_version_prefix(network);
        Self {
            private_version: private.as_u32(),
            public_version: public.as_u32(),
            wallet_type,
            network
        }
    }

    pub fn bip44(network: Network) -> Self {
        Self::new(WalletType::P2PKH, network)
    }

    pub fn bip49(network: Network) -> Self {
        Self::new(WalletType::P2SH_P2WPKH, network)
    }

    pub fn bip84(network: Network) -> Self {
        Self::new(WalletType::P2WPKH, network)
    }

    /**
        A scheme with caller supplied version bytes.
    */
    pub fn custom(private_version: u32, public_version: u32, wallet_type: WalletType, network: Network) -> Result<Self, HDWError> {
        if private_version == public_version {
            return Err(HDWError::BadScheme(format!(
                "private and public version are both {:#010x}", private_version
            )))
        }

        Ok(Self {
            private_version,
            public_version,
            wallet_type,
            network
        })
    }

    pub fn version(&self, kind: KeyKind) -> u32 {
        match kind {
            KeyKind::Private => self.private_version,
            KeyKind::Public => self.public_version
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionTable {
    schemes: Vec<KeyScheme>
}

impl VersionTable {
    /**
        BIP-44, BIP-49 and BIP-84 schemes for mainnet and testnet.
    */
    pub fn standard() -> Self {
        let mut schemes = vec![];
        for network in [Network::Bitcoin, Network::Testnet] {
            for wallet_type in [WalletType::P2PKH, WalletType::P2SH_P2WPKH, WalletType::P2WPKH] {
                schemes.push(KeyScheme::new(wallet_type, network));
            }
        }

        Self { schemes }
    }

    /**
        Adds a scheme. Registering the same scheme twice is a no-op; reusing
        version bytes that are already claimed by a different scheme is an error.
    */
    pub fn register(&mut self, scheme: KeyScheme) -> Result<(), HDWError> {
        for existing in &self.schemes {
            if *existing == scheme { return Ok(()) }

            let claimed = [existing.private_version, existing.public_version];
            if claimed.contains(&scheme.private_version) || claimed.contains(&scheme.public_version) {
                return Err(HDWError::BadScheme(format!(
                    "version bytes {:#010x}/{:#010x} are already registered",
                    scheme.private_version, scheme.public_version
                )))
            }
        }

        self.schemes.push(scheme);
        Ok(())
    }

    /**
        Finds the scheme and key kind that own the given version bytes.
    */
    pub fn lookup(&self, version: u32) -> Option<(KeyScheme, KeyKind)> {
        self.schemes.iter().find_map(|s| {
            if s.private_version == version {
                Some((*s, KeyKind::Private))
            } else if s.public_version == version {
                Some((*s, KeyKind::Public))
            } else {
                None
            }
        })
    }

    pub fn schemes(&self) -> &[KeyScheme] {
        &self.schemes
    }
}
