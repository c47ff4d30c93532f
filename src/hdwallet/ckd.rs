/*
    This module implements master key generation and child key
    deriveration from parent extended private and public keys
    under the BIP32 standard.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

use crate::{
    curve,
    hash::hmac_sha512,
    hdwallet::{
        ExtendedKey, HDWError, Xprv, Xpub
    },
    key::{
        ChainCode,
        Key,
        PrivKey,
        PubKey
    }
};

/// Indexes at or above this are hardened.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// How many consecutive indexes are tried before giving up on an invalid child.
pub const MAX_CHILD_ATTEMPTS: u32 = 16;

const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/**
    Enum to pattern match child key deriveration options.
    The value is the index without the hardened bit.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildOptions {
    Normal(u32),
    Hardened(u32)
}

impl ChildOptions {
    /**
        The raw 32 bit child index, with the high bit set for hardened children.
    */
    pub fn to_index(&self) -> Result<u32, HDWError> {
        match *self {
            ChildOptions::Normal(x) if x < HARDENED_OFFSET => Ok(x),
            ChildOptions::Hardened(x) if x < HARDENED_OFFSET => Ok(x | HARDENED_OFFSET),
            ChildOptions::Normal(x) | ChildOptions::Hardened(x) => Err(HDWError::IndexTooLarge(x))
        }
    }

    pub fn from_index(index: u32) -> Self {
        if is_hardened(index) {
            ChildOptions::Hardened(index & !HARDENED_OFFSET)
        } else {
            ChildOptions::Normal(index)
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildOptions::Hardened(_))
    }
}

pub fn is_hardened(index: u32) -> bool {
    index & HARDENED_OFFSET != 0
}

fn split(i: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&i[0..32]);
    right.copy_from_slice(&i[32..64]);
    (left, right)
}

/**
    HMAC-SHA512("Bitcoin seed", seed). The left half is the master key,
    the right half the master chaincode.
*/
pub fn master_key_from_seed(seed: &[u8]) -> Result<(PrivKey, ChainCode), HDWError> {
    let (il, ir) = split(&hmac_sha512(seed, MASTER_HMAC_KEY)?);
    let key = PrivKey::from_slice(&il).map_err(|_| HDWError::InvalidMasterKey)?;

    log::debug!("derived master key {} from {} byte seed", PubKey::from_priv_key(&key).fingerprint(), seed.len());
    Ok((key, ChainCode(ir)))
}

/**
    One CKDpriv step. None if IL >= N or the child key is zero.
*/
fn ckd_priv(parent_key: &PrivKey, parent_pub: &PubKey, chaincode: &ChainCode, index: u32) -> Result<Option<(PrivKey, ChainCode)>, HDWError> {
    let mut data: Vec<u8> = Vec::with_capacity(37);
    if is_hardened(index) {
        //Hardened child is [0x00 || parent priv bytes || index bytes]
        data.push(0x00);
        data.extend_from_slice(&parent_key.as_bytes());
    } else {
        //Normal child is [parent pub bytes || index bytes]
        data.extend_from_slice(&parent_pub.as_bytes());
    }
    data.extend_from_slice(&index.to_be_bytes());

    let (il, ir) = split(&hmac_sha512(&data, chaincode.as_bytes())?);
    let child = curve::add_scalar(parent_key.secret_key(), &il).ok();

    Ok(child.map(|k| (PrivKey::from_secret_key(k), ChainCode(ir))))
}

/**
    One CKDpub step. None if IL >= N or the child is the point at infinity.
*/
fn ckd_pub(parent_pub: &PubKey, chaincode: &ChainCode, index: u32) -> Result<Option<(PubKey, ChainCode)>, HDWError> {
    let mut data: Vec<u8> = Vec::with_capacity(37);
    data.extend_from_slice(&parent_pub.as_bytes());
    data.extend_from_slice(&index.to_be_bytes());

    let (il, ir) = split(&hmac_sha512(&data, chaincode.as_bytes())?);
    let child = curve::add_point_tweak(parent_pub.point(), &il).ok();

    Ok(child.map(|p| (PubKey::from_point(p), ChainCode(ir))))
}

/**
    Tries index, index+1, ... until step yields a child or max_attempts is reached.
    The search never crosses from normal into hardened indexes or past 2^32 - 1.

    Returns the index that was actually used alongside the child.
*/
pub(crate) fn find_valid_child<T, F>(index: u32, max_attempts: u32, mut step: F) -> Result<(u32, T), HDWError>
where F: FnMut(u32) -> Result<Option<T>, HDWError>
{
    let mut candidate = index;
    let mut attempts = 0;
    while attempts < max_attempts {
        attempts += 1;
        if let Some(child) = step(candidate)? {
            return Ok((candidate, child));
        }

        log::warn!("child index {:#x} produced an invalid key, skipping to the next index", candidate);
        candidate = match candidate.checked_add(1) {
            Some(next) if is_hardened(next) == is_hardened(index) => next,
            _ => break
        };
    }

    Err(HDWError::ChildKeyDerivationExhausted { index, attempts })
}

/**
    Derives the child xprv at index (hardened if the high bit is set).
*/
pub fn derive_xprv(parent: &Xprv, index: u32, max_attempts: u32) -> Result<Xprv, HDWError> {
    let depth = parent.depth().checked_add(1).ok_or(HDWError::DepthOverflow)?;
    let parent_key = parent.get_prv();
    let parent_pub = parent.get_pub();
    let chaincode = parent.chaincode();

    let (index, (key, chaincode)) = find_valid_child(index, max_attempts, |i| {
        ckd_priv(&parent_key, &parent_pub, &chaincode, i)
    })?;

    log::trace!("derived private child {:#x} at depth {}", index, depth);
    Ok(Xprv::construct(
        key,
        chaincode,
        depth,
        parent_pub.fingerprint(),
        index,
        *parent.scheme()
    ))
}

/**
    Derives the child xpub at a non hardened index.
*/
pub fn derive_xpub(parent: &Xpub, index: u32, max_attempts: u32) -> Result<Xpub, HDWError> {
    if is_hardened(index) {
        return Err(HDWError::HardenedPublicDerivation(index))
    }
    let depth = parent.depth().checked_add(1).ok_or(HDWError::DepthOverflow)?;
    let parent_pub = parent.get_pub();
    let chaincode = parent.chaincode();

    let (index, (key, chaincode)) = find_valid_child(index, max_attempts, |i| {
        ckd_pub(&parent_pub, &chaincode, i)
    })?;

    log::trace!("derived public child {:#x} at depth {}", index, depth);
    Ok(Xpub::construct(
        key,
        chaincode,
        depth,
        parent_pub.fingerprint(),
        index,
        *parent.scheme()
    ))
}
