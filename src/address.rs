/*
    Wallet addresses derived from compressed public keys.

    P2PKH:       Base58Check( 0x00 | Hash160(pubkey) )
    P2SH-P2WPKH: Base58Check( 0x05 | Hash160(0x00 0x14 | Hash160(pubkey)) )
    P2WPKH:      Bech32( 0, Hash160(pubkey) )
*/

use crate::{
    encoding::{
        base58::Base58,
        bech32::{self, Bech32Err},
        version_prefix::VersionPrefix
    },
    key::PubKey,
    script::RedeemScript,
    util::Network
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    P2PKH(PubKey, Network),
    P2SH(RedeemScript, Network),
    P2WPKH(PubKey, Network)
}

impl Address {
    /**
        Encodes the address as a string.
        Only the bech32 variants can fail.
    */
    pub fn encode(&self) -> Result<String, Bech32Err> {
        Ok(match self {
            Address::P2PKH(pk, network) => Self::legacy(pk, *network),
            Address::P2SH(script, network) => Self::script_address(script, *network),
            Address::P2WPKH(pk, network) => bech32::encode(0, &pk.hash160(), network)?
        })
    }

    /**
        Legacy pay to public key hash address ("1..." on mainnet).
    */
    pub fn legacy(pk: &PubKey, network: Network) -> String {
        let prefix = match network {
            Network::Bitcoin => VersionPrefix::BTCAddress,
            Network::Testnet => VersionPrefix::BTCTestNetAddress
        };
        Base58::new(&prefix.to_bytes(), &pk.hash160()).check_encode()
    }

    /**
        Pay to script hash address of a redeem script ("3..." on mainnet).
    */
    pub fn script_address(script: &RedeemScript, network: Network) -> String {
        let prefix = match network {
            Network::Bitcoin => VersionPrefix::P2ScriptAddress,
            Network::Testnet => VersionPrefix::TestnetP2SHAddress
        };
        Base58::new(&prefix.to_bytes(), &script.hash()).check_encode()
    }

    /**
        P2SH wrapped segwit address, the BIP-49 scheme.
    */
    pub fn wrapped_segwit(pk: &PubKey, network: Network) -> String {
        Self::script_address(&RedeemScript::p2wpkh(pk), network)
    }

    /**
        Native segwit address ("bc1q..." on mainnet), the BIP-84 scheme.
    */
    pub fn p2wpkh(pk: &PubKey, network: Network) -> Result<String, Bech32Err> {
        Address::P2WPKH(*pk, network).encode()
    }

    /**
        Verifies that a Base58Check address is valid by checking the payload length and checksum
    */
    pub fn is_valid(address: &str) -> bool {
        match Base58::check_decode(address) {
            Ok(x) => x.len() == 21,
            Err(_) => false
        }
    }
}
