/**
    This module combines all the boilerplate
    implementations of fmt::Display.
*/

use crate::{
    address,
    hdwallet::{
        ExtendedKey,
        Xprv,
        Xpub
    },
    key::{
        self,
        Key
    }
};
use std::fmt;

/*
    key module impls
*/
impl fmt::Display for key::PubKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl fmt::Display for key::ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl fmt::Display for key::Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_bytes()))
    }
}

/*
    address module impls
*/
impl fmt::Display for address::Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        //Only fails for witness programs bech32 cannot encode
        let encoded = self.encode().map_err(|_| fmt::Error)?;
        write!(f, "{}", encoded)
    }
}

/*
    hdwallet module impls
*/
impl fmt::Display for Xprv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl fmt::Display for Xpub {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        address::Address,
        key::{Fingerprint, PubKey},
        util::Network
    };

    #[test]
    fn display_impls() {
        let pk = PubKey::from_slice(&hex::decode("0204664c60ceabd82967055ccbd0f56a1585dfbd42032656efa501c463b16fbdfe").unwrap()).unwrap();
        assert_eq!(pk.to_string(), "0204664c60ceabd82967055ccbd0f56a1585dfbd42032656efa501c463b16fbdfe");
        assert_eq!(Fingerprint([0x34, 0x42, 0x19, 0x3e]).to_string(), "3442193e");

        let addr = Address::P2PKH(pk, Network::Bitcoin);
        assert_eq!(addr.to_string(), addr.encode().unwrap());
    }
}
