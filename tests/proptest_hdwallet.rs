use proptest::prelude::*;

use btc_hdkeys::encoding::base58::Base58;
use btc_hdkeys::prelude::*;

fn master(seed: &[u8]) -> Xprv {
    Xprv::from_seed(seed, KeyScheme::bip44(Network::Bitcoin)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn derivation_is_deterministic(
        seed in prop::collection::vec(any::<u8>(), 16..=64),
        index in any::<u32>(),
    ) {
        let a = master(&seed).derive_child(index);
        let b = master(&seed).derive_child(index);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn serialization_roundtrip_all_schemes(
        seed in prop::collection::vec(any::<u8>(), 16..=64),
        index in any::<u32>(),
    ) {
        let serializer = ExtendedKeySerializer::standard();
        let child = master(&seed).derive_child(index).unwrap();

        for scheme in serializer.table().schemes() {
            let xprv = child.with_scheme(*scheme);
            let xpub = xprv.get_xpub();

            prop_assert_eq!(serializer.deserialize(&xprv.serialize()).unwrap(), XKey::Private(xprv));
            prop_assert_eq!(serializer.deserialize(&xpub.serialize()).unwrap(), XKey::Public(xpub));
        }
    }

    #[test]
    fn public_derivation_matches_private(
        seed in prop::collection::vec(any::<u8>(), 16..=64),
        index in 0u32..HARDENED_OFFSET,
    ) {
        let m = master(&seed);
        let via_private = m.derive_child(index).unwrap().get_xpub();
        let via_public = m.get_xpub().derive_child(index).unwrap();
        prop_assert_eq!(via_private, via_public);
    }

    #[test]
    fn hardened_children_need_private_keys(
        seed in prop::collection::vec(any::<u8>(), 16..=64),
        index in HARDENED_OFFSET..=u32::MAX,
    ) {
        let m = master(&seed);
        prop_assert!(m.derive_child(index).is_ok());
        prop_assert_eq!(m.get_xpub().derive_child(index), Err(HDWError::HardenedPublicDerivation(index)));
    }

    #[test]
    fn single_byte_corruption_is_rejected(
        seed in prop::collection::vec(any::<u8>(), 16..=64),
        position in 0usize..82,
        flip in 1u8..=255,
        public in any::<bool>(),
    ) {
        let m = master(&seed);
        let encoded = if public { m.get_xpub().serialize() } else { m.serialize() };

        //Corrupt the raw payload or checksum and re-encode without fixing the checksum
        let mut raw = Base58::decode(&encoded).unwrap();
        prop_assert_eq!(raw.len(), 82);
        raw[position] ^= flip;
        let tampered = Base58::new(&[], &raw).encode();

        let res = ExtendedKeySerializer::standard().deserialize(&tampered);
        prop_assert!(matches!(res, Err(HDWError::MalformedExtendedKey(_))), "{:?}", res);
    }

    #[test]
    fn path_display_roundtrip(
        children in prop::collection::vec((0u32..HARDENED_OFFSET, any::<bool>()), 0..8),
    ) {
        let path = Path {
            children: children.into_iter()
                .map(|(i, h)| if h { ChildOptions::Hardened(i) } else { ChildOptions::Normal(i) })
                .collect()
        };
        prop_assert_eq!(path.to_string().parse::<Path>().unwrap(), path);
    }
}
