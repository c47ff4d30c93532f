/*
    Hash module includes the hash functions necessary to hash
    a public key into an address, checksum a Base58 payload
    and run child key derivation.
*/

use crate::{
    key::KeyError,
    Digest, Hmac, Mac, Ripemd160, Sha256, Sha512
};

/*
    Takes in a byte array and returns the ripemd160 hash of it
*/
pub fn ripemd160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    let mut out = [0u8; 20];
    out.copy_from_slice(&Ripemd160::digest(input));
    out
}

/*
    Takes in a byte array and returns the sha256 hash of it
*/
pub fn sha256<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(input));
    out
}

/**
    Double sha256. Used for Base58Check checksums.
*/
pub fn sha256d<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    sha256(sha256(input))
}

/**
    Ripemd160( Sha256( input ) )
*/
pub fn hash160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    ripemd160(sha256(input))
}

/**
    HMAC-SHA512 of data keyed with key.
*/
pub fn hmac_sha512(data: &[u8], key: &[u8]) -> Result<[u8; 64], KeyError> {
    let mut mac = <Hmac<Sha512> as Mac>::new_from_slice(key)
        .map_err(|e| KeyError::MalformedKey(format!("hmac key: {}", e)))?;
    mac.update(data);

    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
