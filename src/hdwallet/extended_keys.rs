/*
    This module implements extended keys that are
    used in BIP32 hierarchal deterministic wallets.

    An extended key is a key paired with a 32 byte chaincode plus the
    metadata needed to serialize it: depth, parent fingerprint, child
    index and the version bytes of the scheme it belongs to.
    Extended keys are immutable, deriving a child returns a new key.
*/

use std::str::FromStr;

use crate::{
    hdwallet::{
        ckd::{
            self,
            ChildOptions,
            MAX_CHILD_ATTEMPTS
        },
        serializer::{self, ExtendedKeySerializer, XKey},
        HDWError,
        KeyKind,
        KeyScheme,
        Path
    },
    key::{
        ChainCode,
        Fingerprint,
        PrivKey,
        PubKey
    }
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xprv {
    key: PrivKey,
    chaincode: ChainCode,
    depth: u8,
    parent_fingerprint: Fingerprint,
    index: u32,
    scheme: KeyScheme
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xpub {
    key: PubKey,
    chaincode: ChainCode,
    depth: u8,
    parent_fingerprint: Fingerprint,
    index: u32,
    scheme: KeyScheme
}

pub trait ExtendedKey: Sized + Clone {
    const KIND: KeyKind;

    fn chaincode(&self) -> ChainCode;

    fn depth(&self) -> u8;

    fn parent_fingerprint(&self) -> Fingerprint;

    /**
        Child index including the hardened bit.
    */
    fn index(&self) -> u32;

    fn scheme(&self) -> &KeyScheme;

    /**
        The 33 byte key data field: 0x00 | private key, or the compressed public key.
    */
    fn key_data(&self) -> [u8; 33];

    /**
        Return the non extended public key of self.
    */
    fn get_pub(&self) -> PubKey;

    /**
        Derives the child at the raw index (hardened if the high bit is set).
    */
    fn derive_child(&self, index: u32) -> Result<Self, HDWError>;

    fn version(&self) -> u32 {
        self.scheme().version(Self::KIND)
    }

    /**
        Fingerprint of this key, which is the parent fingerprint of its children.
    */
    fn fingerprint(&self) -> Fingerprint {
        self.get_pub().fingerprint()
    }

    /**
        Base58Check encoding of the 78 byte extended key payload.
    */
    fn serialize(&self) -> String {
        serializer::encode(
            self.version(),
            self.depth(),
            &self.parent_fingerprint(),
            self.index(),
            &self.chaincode(),
            &self.key_data()
        )
    }

    fn get_xchild(&self, options: ChildOptions) -> Result<Self, HDWError> {
        self.derive_child(options.to_index()?)
    }

    /**
        Derive the key at the given path relative to self.
        eg. [44', 0', 0', 0] would represent the path m/44'/0'/0'/0
    */
    fn derive_from_path(&self, path: &Path) -> Result<Self, HDWError> {
        let mut current_key: Self = self.clone();
        for child in &path.children {
            current_key = current_key.get_xchild(*child)?;
        }
        Ok(current_key)
    }

    /**
        Converts the extended key to an address of its scheme's wallet type.
    */
    fn get_address(&self) -> Result<String, HDWError> {
        let scheme = self.scheme();
        scheme.wallet_type.address(&self.get_pub(), scheme.network)
    }
}

impl Xprv {
    pub(crate) fn construct(key: PrivKey, chaincode: ChainCode, depth: u8, pf: Fingerprint, index: u32, scheme: KeyScheme) -> Self {
        Self {
            key,
            chaincode,
            depth,
            parent_fingerprint: pf,
            index,
            scheme
        }
    }

    /**
        Creates the master extended private key from a seed.
    */
    pub fn from_seed(seed: &[u8], scheme: KeyScheme) -> Result<Self, HDWError> {
        let (key, chaincode) = ckd::master_key_from_seed(seed)?;
        Ok(Self::construct(key, chaincode, 0, Fingerprint::default(), 0, scheme))
    }

    /**
        Return the private key part of self
    */
    pub fn get_prv(&self) -> PrivKey {
        self.key
    }

    /**
        The extended public key with the same chaincode and metadata.
    */
    pub fn get_xpub(&self) -> Xpub {
        Xpub::construct(
            self.get_pub(),
            self.chaincode,
            self.depth,
            self.parent_fingerprint,
            self.index,
            self.scheme
        )
    }

    /**
        Same as derive_child with a caller supplied bound on skipped indexes.
    */
    pub fn derive_child_bounded(&self, index: u32, max_attempts: u32) -> Result<Self, HDWError> {
        ckd::derive_xprv(self, index, max_attempts)
    }

    /**
        Re-labels the key with another scheme (eg. serialize a BIP-44 key as yprv).
    */
    pub fn with_scheme(&self, scheme: KeyScheme) -> Self {
        Self { scheme, ..*self }
    }
}

impl ExtendedKey for Xprv {
    const KIND: KeyKind = KeyKind::Private;

    fn chaincode(&self) -> ChainCode {
        self.chaincode
    }

    fn depth(&self) -> u8 {
        self.depth
    }

    fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn scheme(&self) -> &KeyScheme {
        &self.scheme
    }

    fn key_data(&self) -> [u8; 33] {
        let mut data = [0u8; 33];
        data[1..].copy_from_slice(&self.key.as_bytes());
        data
    }

    fn get_pub(&self) -> PubKey {
        PubKey::from_priv_key(&self.key)
    }

    fn derive_child(&self, index: u32) -> Result<Self, HDWError> {
        ckd::derive_xprv(self, index, MAX_CHILD_ATTEMPTS)
    }
}

impl Xpub {
    pub(crate) fn construct(key: PubKey, chaincode: ChainCode, depth: u8, pf: Fingerprint, index: u32, scheme: KeyScheme) -> Self {
        Self {
            key,
            chaincode,
            depth,
            parent_fingerprint: pf,
            index,
            scheme
        }
    }

    pub fn derive_child_bounded(&self, index: u32, max_attempts: u32) -> Result<Self, HDWError> {
        ckd::derive_xpub(self, index, max_attempts)
    }

    pub fn with_scheme(&self, scheme: KeyScheme) -> Self {
        Self { scheme, ..*self }
    }
}

impl ExtendedKey for Xpub {
    const KIND: KeyKind = KeyKind::Public;

    fn chaincode(&self) -> ChainCode {
        self.chaincode
    }

    fn depth(&self) -> u8 {
        self.depth
    }

    fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn scheme(&self) -> &KeyScheme {
        &self.scheme
    }

    fn key_data(&self) -> [u8; 33] {
        self.key.as_bytes()
    }

    fn get_pub(&self) -> PubKey {
        self.key
    }

    fn derive_child(&self, index: u32) -> Result<Self, HDWError> {
        ckd::derive_xpub(self, index, MAX_CHILD_ATTEMPTS)
    }
}

/*
    Import extended keys from strings using the standard version table.
    Use ExtendedKeySerializer directly for custom schemes.
*/
impl FromStr for Xprv {
    type Err = HDWError;

    fn from_str(key: &str) -> Result<Self, HDWError> {
        match ExtendedKeySerializer::standard().deserialize(key)? {
            XKey::Private(x) => Ok(x),
            XKey::Public(_) => Err(HDWError::MalformedExtendedKey("expected an extended private key".to_string()))
        }
    }
}

impl FromStr for Xpub {
    type Err = HDWError;

    fn from_str(key: &str) -> Result<Self, HDWError> {
        match ExtendedKeySerializer::standard().deserialize(key)? {
            XKey::Public(x) => Ok(x),
            XKey::Private(_) => Err(HDWError::MalformedExtendedKey("expected an extended public key".to_string()))
        }
    }
}
