/*
    Library to derive hierarchical deterministic keys
    and addresses for Bitcoin under BIP 32.

    Covers master key generation from a seed, private and public child
    key derivation, string derivation paths, extended key serialization
    with BIP 44/49/84 (and registrable custom) version bytes, and the
    P2PKH, P2SH-P2WPKH and P2WPKH addresses of derived keys.

    References:
        - BIP 32 (https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)

        - BIP 44, 49 and 84 for the account structure and version bytes

        - learn me a bitcoin (https://learnmeabitcoin.com/)
            for great visualisation of the concepts

    Logging goes through the log crate facade. Install any logger
    (env_logger, simple_logger...) in the binary to see it.
*/

//Outward facing modules
pub mod key;
pub mod address;
pub mod hdwallet;
pub mod encoding;
pub mod script;
pub mod curve;
pub mod util;
pub mod prelude;

//Modules for internal use
mod hash;
mod impls;

//Dependencies
use secp256k1::{PublicKey, Scalar, SecretKey, SECP256K1};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use ripemd::Ripemd160;
