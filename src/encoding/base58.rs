use crate::hash;
use thiserror::Error;

#[derive(Debug)]
pub struct Base58 {
    prefix: Vec<u8>,
    payload: Vec<u8>
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("invalid base58 character {0:?} at index {1}")]
    BadChar(char, usize),
    #[error("decoded data is too short to hold a checksum")]
    TooShort,
    #[error("checksum mismatch")]
    BadChecksum,
    #[error("base58 decode failed: {0}")]
    Other(String)
}

impl Base58 {
    /**
        Prefix is the version bytes (one byte for addresses and WIF, four for extended keys)
    */
    pub fn new(prefix: &[u8], payload: &[u8]) -> Base58 {
        Base58 {
            prefix: prefix.to_vec(),
            payload: payload.to_vec()
        }
    }

    /// Check encode data by appending the checksum and then encoding it.
    pub fn check_encode(self) -> String {
        //Concatenate: prefix | payload | checksum
        let mut bytes: Vec<u8> = self.prefix;
        bytes.extend_from_slice(&self.payload);
        let checksum = hash::sha256d(&bytes);
        bytes.extend_from_slice(&checksum[0..4]);

        bs58::encode(bytes).into_string()
    }

    /// Encode prefix | payload in base58 format without a checksum.
    pub fn encode(self) -> String {
        let mut bytes: Vec<u8> = self.prefix;
        bytes.extend_from_slice(&self.payload);

        bs58::encode(bytes).into_string()
    }

    /// Decodes a base58 string into a byte vector.
    /// DOES NOT remove the checksum or version prefix if present.
    pub fn decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        bs58::decode(encoded).into_vec().map_err(|e| match e {
            bs58::decode::Error::InvalidCharacter { character, index } => Base58Error::BadChar(character, index),
            bs58::decode::Error::NonAsciiCharacter { index } => Base58Error::BadChar(
                encoded.chars().nth(index).unwrap_or('?'), index
            ),
            x => Base58Error::Other(x.to_string())
        })
    }

    /// Returns the decoded payload with the checksum removed.
    /// Version prefix is NOT removed as it is variable length depending on context.
    pub fn check_decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        let mut bytes = Base58::decode(encoded)?;
        if bytes.len() < 4 { return Err(Base58Error::TooShort) }

        let split = bytes.len() - 4;
        if hash::sha256d(&bytes[..split])[0..4] != bytes[split..] {
            return Err(Base58Error::BadChecksum);
        }

        bytes.truncate(split);
        Ok(bytes)
    }
}
