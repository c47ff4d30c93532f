/*
    This module contains the default imports for the library.

    Import the library using:
        use btc_hdkeys::prelude::*;
    to quickly import the essential parts of the library.
*/

pub use crate::{

    key::{
        PubKey,
        PrivKey,
        ChainCode,
        Fingerprint,
        Key,
        KeyError
    },

    address::Address,

    hdwallet::{
        HDWallet,
        WatchOnly,
        ChildOptions,
        ExtendedKey,
        ExtendedKeySerializer,
        XKey,
        Xprv, Xpub,
        HDWError,
        Path,
        KeyKind,
        KeyScheme,
        VersionTable,
        WalletType,
        HARDENED_OFFSET
    },

    encoding::{
        version_prefix::VersionPrefix,
        ToVersionPrefix
    },

    util::Network,

    script::RedeemScript

};
