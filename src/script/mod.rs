/*
    Minimal script support: just enough to build the redeem script
    of a P2SH wrapped segwit (BIP-49) address.
*/

pub mod redeem_script;

pub use redeem_script::RedeemScript;
