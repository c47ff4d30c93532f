/*
    This module implements hierarchical deterministic wallets
    under the BIP 32 standard, with the BIP 44/49/84 account
    structure and extended key version bytes layered on top.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

pub mod ckd;
pub mod path;
pub mod scheme;
pub mod extended_keys;
pub mod serializer;
pub mod hdwallet;

pub use ckd::{
    ChildOptions,
    HARDENED_OFFSET,
    MAX_CHILD_ATTEMPTS
};
pub use path::Path;
pub use scheme::{
    KeyKind,
    KeyScheme,
    VersionTable,
    WalletType
};
pub use extended_keys::{
    ExtendedKey,
    Xprv,
    Xpub
};
pub use serializer::{
    ExtendedKeySerializer,
    XKey
};
pub use hdwallet::{
    HDWallet,
    WatchOnly
};

use crate::{
    encoding::bech32::Bech32Err,
    key::KeyError
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HDWError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("master key derived from seed is zero or not less than the curve order")]
    InvalidMasterKey,
    #[error("no valid child key found starting at index {index:#x} after {attempts} attempts")]
    ChildKeyDerivationExhausted { index: u32, attempts: u32 },
    #[error("cannot derive hardened child {0:#x} from an extended public key")]
    HardenedPublicDerivation(u32),
    #[error("index {0} must be less than 2^31")]
    IndexTooLarge(u32),
    #[error("deriving a child would exceed the maximum depth of 255")]
    DepthOverflow,
    #[error("invalid derivation path {path:?}: bad segment {segment:?}")]
    InvalidPathSyntax { path: String, segment: String },
    #[error("malformed extended key: {0}")]
    MalformedExtendedKey(String),
    #[error("version {0:#010x} does not match the key data")]
    VersionMismatch(u32),
    #[error("bad key scheme: {0}")]
    BadScheme(String),
    #[error(transparent)]
    Address(#[from] Bech32Err)
}
