use crate::{
    hash,
    key::PubKey
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemScript {
    pub code: Vec<u8>
}

impl RedeemScript {
    /**
        Create a new instance of self
    */
    pub fn new(code: Vec<u8>) -> Self {
        Self {
            code
        }
    }

    /**
        Hash the script with Hash160
    */
    pub fn hash(&self) -> [u8; 20] {
        hash::hash160(&self.code)
    }

    /**
        The P2WPKH witness program of a public key, 0x00 0x14 | Hash160(pubkey).
        Used as the redeem script of a P2SH-P2WPKH address.
    */
    pub fn p2wpkh(pk: &PubKey) -> Self {
        let mut code: Vec<u8> = vec![0x00, 0x14];
        code.extend_from_slice(&pk.hash160());
        Self::new(code)
    }
}
