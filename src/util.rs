use serde::{Deserialize, Serialize};

use crate::key::KeyError;

/**
    Copies a slice into a fixed size array, failing if the lengths differ.
*/
pub fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N], KeyError> {
    bytes.try_into().map_err(|_| KeyError::MalformedKey(
        format!("expected {} bytes, found {}", N, bytes.len())
    ))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Bitcoin,
    Testnet
}

impl Network {
    /**
        SLIP-44 coin type used at the second level of BIP44 style paths.
    */
    pub fn coin_type(&self) -> u32 {
        match self {
            Network::Bitcoin => 0,
            Network::Testnet => 1
        }
    }
}
