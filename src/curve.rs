/*
    Thin adapter over libsecp256k1 for the scalar and point
    arithmetic used by child key deriveration.

    All operations use the process wide read only context
    `SECP256K1` so no context has to be threaded through callers.
*/

use crate::{
    key::KeyError,
    PublicKey,
    Scalar,
    SecretKey,
    SECP256K1
};

/// Order of the secp256k1 base point G.
pub const CURVE_ORDER: [u8; 32] = secp256k1::constants::CURVE_ORDER;

/**
    Checks 0 < k < N for a big endian 32 byte scalar.
*/
pub fn is_valid_scalar(k: &[u8; 32]) -> bool {
    //Byte arrays compare lexicographically, which is numeric order for big endian
    *k != [0u8; 32] && *k < CURVE_ORDER
}

/**
    Multiplies the base point G by the scalar k.

    Fails with InvalidScalar if k is zero or not less than the curve order.
*/
pub fn scalar_base_multiply(k: &[u8; 32]) -> Result<PublicKey, KeyError> {
    if !is_valid_scalar(k) {
        return Err(KeyError::InvalidScalar)
    }
    let sk = SecretKey::from_slice(k).map_err(|_| KeyError::InvalidScalar)?;
    Ok(base_point_multiply(&sk))
}

/**
    k*G for a secret key, which is already known to be in range.
*/
pub fn base_point_multiply(k: &SecretKey) -> PublicKey {
    PublicKey::from_secret_key(SECP256K1, k)
}

/**
    Encodes a point as 33 bytes: parity prefix (0x02 even, 0x03 odd) followed by X.
*/
pub fn compress(point: &PublicKey) -> [u8; 33] {
    point.serialize()
}

/**
    Computes (k + tweak) mod N.

    Fails with InvalidScalar if the tweak is not less than N or the sum is zero.
*/
pub fn add_scalar(k: &SecretKey, tweak: &[u8; 32]) -> Result<SecretKey, KeyError> {
    let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| KeyError::InvalidScalar)?;
    k.add_tweak(&tweak).map_err(|_| KeyError::InvalidScalar)
}

/**
    Computes tweak*G + point.

    Fails with InvalidScalar if the tweak is not less than N or the sum is the point at infinity.
*/
pub fn add_point_tweak(point: &PublicKey, tweak: &[u8; 32]) -> Result<PublicKey, KeyError> {
    let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| KeyError::InvalidScalar)?;
    point.add_exp_tweak(SECP256K1, &tweak).map_err(|_| KeyError::InvalidScalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> [u8; 32] {
        let mut k = [0u8; 32];
        k[31] = 1;
        k
    }

    #[test]
    fn generator_point() {
        //1*G is the generator itself
        let g = scalar_base_multiply(&one()).unwrap();
        assert_eq!(
            hex::encode(compress(&g)),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn scalar_range() {
        assert!(!is_valid_scalar(&[0u8; 32]));
        assert!(!is_valid_scalar(&CURVE_ORDER));
        assert!(!is_valid_scalar(&[0xff; 32]));
        assert!(is_valid_scalar(&one()));

        let mut n_minus_one = CURVE_ORDER;
        n_minus_one[31] -= 1;
        assert!(is_valid_scalar(&n_minus_one));

        assert_eq!(scalar_base_multiply(&[0u8; 32]), Err(KeyError::InvalidScalar));
        assert_eq!(scalar_base_multiply(&CURVE_ORDER), Err(KeyError::InvalidScalar));
    }

    #[test]
    fn compressed_prefix_is_parity() {
        for i in 1..20u8 {
            let mut k = [0u8; 32];
            k[31] = i;
            let c = compress(&scalar_base_multiply(&k).unwrap());
            assert!(c[0] == 0x02 || c[0] == 0x03);
        }
    }

    #[test]
    fn scalar_addition_wraps_to_zero() {
        //(N-1) + 1 = 0 mod N, which is not a valid key
        let mut n_minus_one = CURVE_ORDER;
        n_minus_one[31] -= 1;
        let k = SecretKey::from_slice(&n_minus_one).unwrap();
        assert_eq!(add_scalar(&k, &one()), Err(KeyError::InvalidScalar));

        //A tweak >= N is rejected rather than reduced
        let k = SecretKey::from_slice(&one()).unwrap();
        assert_eq!(add_scalar(&k, &CURVE_ORDER), Err(KeyError::InvalidScalar));
    }

    #[test]
    fn point_tweak_matches_scalar_tweak() {
        let mut a = [0u8; 32];
        a[31] = 7;
        let mut t = [0u8; 32];
        t[31] = 35;

        let sk = SecretKey::from_slice(&a).unwrap();
        let via_scalar = PublicKey::from_secret_key(SECP256K1, &add_scalar(&sk, &t).unwrap());
        let via_point = add_point_tweak(&scalar_base_multiply(&a).unwrap(), &t).unwrap();
        assert_eq!(via_scalar, via_point);
    }
}
