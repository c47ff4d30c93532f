use crate::util::Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPrefix {
    //One byte version prefixes
        BTCAddress = 0x00,
        BTCTestNetAddress = 0x6F,
        P2ScriptAddress = 0x05,
        TestnetP2SHAddress = 0xC4,
        PrivateKeyWIF = 0x80,
        TestNetPrivateKeyWIF = 0xef,

    //Four byte version prefixes
        //BIP-32
        Xprv = 0x0488ADE4, //Legacy P2PKH
        Xpub = 0x0488B21E,
        Tprv = 0x04358394,
        Tpub = 0x043587CF,
        //BIP-49
        Yprv = 0x049d7878, //P2SH nested P2WPKH
        Ypub = 0x049d7cb2,
        Uprv = 0x044a4e28,
        Upub = 0x044a5262,
        //BIP-84
        Zprv = 0x04b2430c, //P2WPKH
        Zpub = 0x04b24746,
        Vprv = 0x045f18bc,
        Vpub = 0x045f1cf6
}

impl VersionPrefix {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            //Special cases where version bytes is 1 byte long
            VersionPrefix::BTCAddress |
            VersionPrefix::BTCTestNetAddress |
            VersionPrefix::P2ScriptAddress |
            VersionPrefix::TestnetP2SHAddress |
            VersionPrefix::PrivateKeyWIF |
            VersionPrefix::TestNetPrivateKeyWIF => vec![*self as u32 as u8],

            //Cases where version bytes is 4 bytes long
            _ => self.as_u32().to_be_bytes().to_vec()
        }
    }

    pub fn as_u32(&self) -> u32 {
        *self as u32
    }
}

/**
    Implemented by anything that knows which extended key versions it serializes under.
*/
pub trait ToVersionPrefix {
    fn public_version_prefix(&self, network: Network) -> VersionPrefix;
    fn private_version_prefix(&self, network: Network) -> VersionPrefix;

    /**
        (private, public)
    */
    fn get_version_prefix(&self, network: Network) -> (VersionPrefix, VersionPrefix) {
        (self.private_version_prefix(network), self.public_version_prefix(network))
    }
}
