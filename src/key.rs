/*
    Fixed size key material: private keys, compressed public keys,
    chain codes and fingerprints.

    Every constructor validates length (and prefix for public keys).
    Converting a private key into a public key is explicit and goes
    through the curve module.
*/

use crate::{
    curve,
    encoding::{
        base58::Base58,
        version_prefix::VersionPrefix
    },
    hash,
    util::{
        to_array,
        Network
    },
    PublicKey,
    SecretKey
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("scalar is zero or not less than the curve order")]
    InvalidScalar,
    #[error("malformed key material: {0}")]
    MalformedKey(String),
    #[error("invalid wallet import format: {0}")]
    BadWif(String)
}

/**
    Common interface of raw key material.
*/
pub trait Key: Sized {
    fn from_slice(bytes: &[u8]) -> Result<Self, KeyError>;

    fn to_vec(&self) -> Vec<u8>;

    /**
        Lowercase hex of the serialized key.
    */
    fn hex(&self) -> String {
        hex::encode(self.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivKey(SecretKey);

impl PrivKey {
    /**
        Serializes the private key into 32 big endian bytes.
    */
    pub fn as_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }

    pub(crate) fn secret_key(&self) -> &SecretKey {
        &self.0
    }

    pub(crate) fn from_secret_key(sk: SecretKey) -> Self {
        Self(sk)
    }

    /**
        Export the private key in wallet import format (Base58Check encoded with prefix).
        Use compressed to append the compression byte.
    */
    pub fn export_as_wif(&self, compressed: bool, network: Network) -> String {
        let prefix = match network {
            Network::Bitcoin => VersionPrefix::PrivateKeyWIF,
            Network::Testnet => VersionPrefix::TestNetPrivateKeyWIF
        };

        let mut key: Vec<u8> = self.as_bytes().to_vec();
        if compressed {
            key.push(0x01);
        }

        Base58::new(&prefix.to_bytes(), &key).check_encode()
    }

    /**
        Import a private key from wallet import format.
        Returns the key with the network and compression flag it was exported with,
        so export_as_wif reproduces the same string.
    */
    pub fn from_wif(wif: &str) -> Result<(Self, Network, bool), KeyError> {
        let bytes = Base58::check_decode(wif)
            .map_err(|e| KeyError::BadWif(e.to_string()))?;

        let network = match bytes.first() {
            Some(0x80) => Network::Bitcoin,
            Some(0xef) => Network::Testnet,
            _ => return Err(KeyError::BadWif("unknown prefix".to_string()))
        };

        //prefix | key | optional compression byte
        let compressed = match (bytes.len(), bytes.last()) {
            (33, _) => false,
            (34, Some(0x01)) => true,
            _ => return Err(KeyError::BadWif(format!("unexpected payload length {}", bytes.len())))
        };

        Ok((Self::from_slice(&bytes[1..33])?, network, compressed))
    }
}

impl Key for PrivKey {
    /**
        Use a predefined byte array as a secret key.
        The slice must be 32 bytes and encode 0 < k < N.
    */
    fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let k: [u8; 32] = to_array(bytes)?;
        if !curve::is_valid_scalar(&k) {
            return Err(KeyError::InvalidScalar)
        }

        SecretKey::from_slice(&k)
            .map(Self)
            .map_err(|_| KeyError::InvalidScalar)
    }

    fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PubKey(PublicKey);

impl PubKey {
    /**
        Finds the public key of a secret key.
        It is the base point G multiplied k times, where k is the private key.
    */
    pub fn from_priv_key(k: &PrivKey) -> Self {
        Self(curve::base_point_multiply(k.secret_key()))
    }

    pub(crate) fn from_point(point: PublicKey) -> Self {
        Self(point)
    }

    pub(crate) fn point(&self) -> &PublicKey {
        &self.0
    }

    /**
        Returns the compressed public key.
    */
    pub fn as_bytes(&self) -> [u8; 33] {
        curve::compress(&self.0)
    }

    /**
        Returns the uncompressed public key (0x04 | X | Y).
    */
    pub fn decompressed_bytes(&self) -> [u8; 65] {
        self.0.serialize_uncompressed()
    }

    /**
        Hash160 of the compressed public key.
    */
    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(self.as_bytes())
    }

    /**
        First 4 bytes of the Hash160 of the compressed key.
    */
    pub fn fingerprint(&self) -> Fingerprint {
        let h = self.hash160();
        Fingerprint([h[0], h[1], h[2], h[3]])
    }
}

impl Key for PubKey {

    /**
        Use a compressed public key (0x02 or 0x03 followed by X).
    */
    fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let k: [u8; 33] = to_array(bytes)?;
        match k[0] {
            0x02 | 0x03 => { /* Continue */ },
            x => return Err(KeyError::MalformedKey(format!("bad public key prefix {:#04x}", x)))
        }

        PublicKey::from_slice(&k)
            .map(Self)
            .map_err(|_| KeyError::MalformedKey("point is not on the curve".to_string()))
    }

    fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainCode(pub [u8; 32]);

impl ChainCode {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Key for ChainCode {

    fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(Self(to_array(bytes)?))
    }

    fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint(pub [u8; 4]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}
