/*
    Serialization of extended keys:

        version(4) | depth(1) | parent fingerprint(4) | index(4) | chaincode(32) | key data(33)

    78 bytes, big endian, Base58Check encoded. The version bytes are
    resolved against a VersionTable so custom schemes can be read back.
*/

use std::fmt;

use crate::{
    encoding::base58::Base58,
    hash,
    hdwallet::{
        ExtendedKey,
        HDWError,
        KeyKind,
        KeyScheme,
        VersionTable,
        Xprv,
        Xpub
    },
    key::{
        ChainCode,
        Fingerprint,
        Key,
        PrivKey,
        PubKey
    }
};

pub const XKEY_PAYLOAD_LEN: usize = 78;

/**
    A deserialized extended key of either kind.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XKey {
    Private(Xprv),
    Public(Xpub)
}

impl XKey {
    pub fn serialize(&self) -> String {
        match self {
            XKey::Private(x) => x.serialize(),
            XKey::Public(x) => x.serialize()
        }
    }

    pub fn scheme(&self) -> &KeyScheme {
        match self {
            XKey::Private(x) => x.scheme(),
            XKey::Public(x) => x.scheme()
        }
    }

    pub fn kind(&self) -> KeyKind {
        match self {
            XKey::Private(_) => KeyKind::Private,
            XKey::Public(_) => KeyKind::Public
        }
    }

    /**
        Drops the private key if present.
    */
    pub fn to_public(&self) -> Xpub {
        match self {
            XKey::Private(x) => x.get_xpub(),
            XKey::Public(x) => *x
        }
    }
}

impl fmt::Display for XKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

/**
    Builds and Base58Check encodes the 78 byte payload.
*/
pub(crate) fn encode(version: u32, depth: u8, pf: &Fingerprint, index: u32, chaincode: &ChainCode, key_data: &[u8; 33]) -> String {
    let mut payload: Vec<u8> = Vec::with_capacity(XKEY_PAYLOAD_LEN - 4);
    payload.push(depth);
    payload.extend_from_slice(pf.as_bytes());
    payload.extend_from_slice(&index.to_be_bytes());
    payload.extend_from_slice(chaincode.as_bytes());
    payload.extend_from_slice(key_data);

    Base58::new(&version.to_be_bytes(), &payload).check_encode()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedKeySerializer {
    table: VersionTable
}

impl ExtendedKeySerializer {
    pub fn new(table: VersionTable) -> Self {
        Self { table }
    }

    /**
        Serializer that knows the BIP-44/49/84 version bytes.
    */
    pub fn standard() -> Self {
        Self::new(VersionTable::standard())
    }

    pub fn table(&self) -> &VersionTable {
        &self.table
    }

    /**
        Encodes a key whose scheme is registered in this serializer's table,
        so that deserialize can always read the result back.
    */
    pub fn serialize(&self, key: &XKey) -> Result<String, HDWError> {
        let scheme = *key.scheme();
        let version = scheme.version(key.kind());
        match self.table.lookup(version) {
            Some((registered, _)) if registered == scheme => Ok(key.serialize()),
            _ => Err(HDWError::BadScheme(format!("version {:#010x} is not registered", version)))
        }
    }

    /**
        Decodes an extended key string. Fails on bad length, checksum,
        unknown version bytes, or key data that does not match the version.
    */
    pub fn deserialize(&self, encoded: &str) -> Result<XKey, HDWError> {
        let reject = |reason: String| {
            log::debug!("rejected extended key: {}", reason);
            HDWError::MalformedExtendedKey(reason)
        };

        let bytes = Base58::decode(encoded).map_err(|e| reject(e.to_string()))?;
        if bytes.len() != XKEY_PAYLOAD_LEN + 4 {
            return Err(reject(format!("expected {} bytes, found {}", XKEY_PAYLOAD_LEN + 4, bytes.len())))
        }

        let (payload, checksum) = bytes.split_at(XKEY_PAYLOAD_LEN);
        if hash::sha256d(payload)[0..4] != *checksum {
            return Err(reject("checksum mismatch".to_string()))
        }

        let version = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
        let (scheme, kind) = self.table.lookup(version)
            .ok_or_else(|| reject(format!("unknown version {:#010x}", version)))?;

        let depth: u8 = payload[4];
        let fingerprint = Fingerprint([payload[5], payload[6], payload[7], payload[8]]);
        let index = u32::from_be_bytes([payload[9], payload[10], payload[11], payload[12]]);
        let chaincode = ChainCode::from_slice(&payload[13..45])?;
        let key_data = &payload[45..78];

        if depth == 0 && (fingerprint != Fingerprint::default() || index != 0) {
            return Err(reject("master key with non-zero parent fingerprint or index".to_string()))
        }

        match (key_data[0], kind) {
            (0x00, KeyKind::Private) => {
                let key = PrivKey::from_slice(&key_data[1..])
                    .map_err(|e| reject(e.to_string()))?;
                Ok(XKey::Private(Xprv::construct(key, chaincode, depth, fingerprint, index, scheme)))
            },
            (0x02 | 0x03, KeyKind::Public) => {
                let key = PubKey::from_slice(key_data)
                    .map_err(|e| reject(e.to_string()))?;
                Ok(XKey::Public(Xpub::construct(key, chaincode, depth, fingerprint, index, scheme)))
            },
            (0x00, KeyKind::Public) | (0x02 | 0x03, KeyKind::Private) => {
                log::debug!("rejected extended key: version {:#010x} does not match the key data", version);
                Err(HDWError::VersionMismatch(version))
            },
            (x, _) => Err(reject(format!("invalid key data prefix {:#04x}", x)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hdwallet::{KeyScheme, WalletType},
        util::Network
    };

    const XPRV: &str = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";
    const XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";

    fn reencode(payload: &[u8]) -> String {
        Base58::new(&[], payload).check_encode()
    }

    fn xprv(encoded: &str) -> Xprv {
        match ExtendedKeySerializer::standard().deserialize(encoded).unwrap() {
            XKey::Private(x) => x,
            XKey::Public(_) => panic!("expected xprv")
        }
    }

    fn raw(encoded: &str) -> Vec<u8> {
        Base58::check_decode(encoded).unwrap()
    }

    #[test]
    fn payload_layout() {
        let bytes = raw(XPRV);
        assert_eq!(bytes.len(), XKEY_PAYLOAD_LEN);
        assert_eq!(bytes[0..4], [0x04, 0x88, 0xAD, 0xE4]);
        assert_eq!(bytes[4], 0);
        assert_eq!(bytes[45], 0x00);
        assert_eq!(hex::encode(&bytes[46..78]), "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35");
    }

    #[test]
    fn round_trip_both_kinds() {
        let s = ExtendedKeySerializer::standard();
        for encoded in [XPRV, XPUB] {
            let key = s.deserialize(encoded).unwrap();
            assert_eq!(s.serialize(&key).unwrap(), encoded);
        }
        assert_eq!(s.deserialize(XPRV).unwrap().kind(), KeyKind::Private);
        assert_eq!(s.deserialize(XPUB).unwrap().kind(), KeyKind::Public);
        assert_eq!(s.deserialize(XPRV).unwrap().to_public(), s.deserialize(XPUB).unwrap().to_public());
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut bytes = Base58::decode(XPRV).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = Base58::new(&[], &bytes).encode();

        assert_eq!(
            ExtendedKeySerializer::standard().deserialize(&tampered),
            Err(HDWError::MalformedExtendedKey("checksum mismatch".to_string()))
        );
    }

    #[test]
    fn rejects_wrong_length() {
        let mut payload = raw(XPUB);
        payload.push(0x00);
        assert!(matches!(
            ExtendedKeySerializer::standard().deserialize(&reencode(&payload)),
            Err(HDWError::MalformedExtendedKey(_))
        ));
        assert!(ExtendedKeySerializer::standard().deserialize("").is_err());
    }

    #[test]
    fn rejects_mismatched_key_data() {
        //Public key data under a private version
        let mut payload = raw(XPUB);
        payload[0..4].copy_from_slice(&0x0488ADE4u32.to_be_bytes());
        assert_eq!(
            ExtendedKeySerializer::standard().deserialize(&reencode(&payload)),
            Err(HDWError::VersionMismatch(0x0488ADE4))
        );

        //Private key data under a public version
        let mut payload = raw(XPRV);
        payload[0..4].copy_from_slice(&0x0488B21Eu32.to_be_bytes());
        assert_eq!(
            ExtendedKeySerializer::standard().deserialize(&reencode(&payload)),
            Err(HDWError::VersionMismatch(0x0488B21E))
        );

        //Unknown key data prefix
        let mut payload = raw(XPUB);
        payload[45] = 0x04;
        assert_eq!(
            ExtendedKeySerializer::standard().deserialize(&reencode(&payload)),
            Err(HDWError::MalformedExtendedKey("invalid key data prefix 0x04".to_string()))
        );
    }

    #[test]
    fn rejects_out_of_range_private_key() {
        let mut payload = raw(XPRV);
        payload[46..78].copy_from_slice(&[0u8; 32]);
        assert!(ExtendedKeySerializer::standard().deserialize(&reencode(&payload)).is_err());

        payload[46..78].copy_from_slice(&crate::curve::CURVE_ORDER);
        assert!(ExtendedKeySerializer::standard().deserialize(&reencode(&payload)).is_err());
    }

    #[test]
    fn rejects_bad_master_metadata() {
        //depth 0 with a parent fingerprint
        let mut payload = raw(XPUB);
        payload[5] = 0x01;
        assert!(ExtendedKeySerializer::standard().deserialize(&reencode(&payload)).is_err());

        //depth 0 with a child index
        let mut payload = raw(XPUB);
        payload[12] = 0x01;
        assert!(ExtendedKeySerializer::standard().deserialize(&reencode(&payload)).is_err());
    }

    #[test]
    fn unknown_version_until_registered() {
        let scheme = KeyScheme::custom(0x0295b005, 0x0295b43f, WalletType::P2SH_P2WPKH, Network::Bitcoin).unwrap();
        let key = xprv(XPRV).with_scheme(scheme);
        let encoded = key.serialize();

        assert!(ExtendedKeySerializer::standard().deserialize(&encoded).is_err());
        assert_eq!(
            ExtendedKeySerializer::standard().serialize(&XKey::Private(key)),
            Err(HDWError::BadScheme("version 0x0295b005 is not registered".to_string()))
        );

        let mut table = VersionTable::standard();
        table.register(scheme).unwrap();
        let custom = ExtendedKeySerializer::new(table);
        assert_eq!(custom.serialize(&XKey::Private(key)).unwrap(), encoded);
        assert_eq!(custom.deserialize(&encoded).unwrap(), XKey::Private(key));
    }
}
