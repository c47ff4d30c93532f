/*
    Module implements bech32 encoding of segwit witness programs
*/
use crate::util::Network;

use bitcoin_bech32::{
    WitnessProgram,
    u5
};
use bitcoin_bech32::constants::Network as Bech32Network;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bech32Err {
    #[error("invalid witness version {0}")]
    InvalidVersion(u8),
    #[error("cannot encode witness program: {0}")]
    CannotEncode(String)
}

/**
    Encodes a witness program (pubkey hash for P2WPKH, script hash for P2WSH)
    as a segwit address for the given network.
*/
pub fn encode(witness_version: u8, data: &[u8], network: &Network) -> Result<String, Bech32Err> {
    let network = match network {
        Network::Bitcoin => Bech32Network::Bitcoin,
        Network::Testnet => Bech32Network::Testnet
    };

    let version = u5::try_from_u8(witness_version)
        .map_err(|_| Bech32Err::InvalidVersion(witness_version))?;

    let witness_program = WitnessProgram::new(version, data.to_vec(), network)
        .map_err(|e| Bech32Err::CannotEncode(e.to_string()))?;

    Ok(witness_program.to_address())
}
