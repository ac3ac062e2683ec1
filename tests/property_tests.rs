//! tests/property_tests.rs
//! Property-based checks of the symmetric pipeline

use passport_crypt::crypto::padding::strip_padding;
use passport_crypt::encryptor::{add_padding, padding_length, seal_secure_data};
use passport_crypt::{decrypt_secure_data, derive_key_iv, PassportError};
use proptest::prelude::*;
use secure_gate::RevealSecret;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sealed_payload_round_trips(
        secret in prop::array::uniform32(any::<u8>()),
        payload in prop::collection::vec(any::<u8>(), 1..512),
    ) {
        let sealed = seal_secure_data(&secret, &payload).unwrap();
        prop_assert_eq!(sealed.data.len() % 16, 0);
        let plaintext = decrypt_secure_data(&secret, &sealed.hash, &sealed.data).unwrap();
        prop_assert_eq!(plaintext.expose_secret(), &payload);
    }

    #[test]
    fn any_bit_flip_fails_integrity(
        payload in prop::collection::vec(any::<u8>(), 1..128),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let secret = [0x3c; 32];
        let mut sealed = seal_secure_data(&secret, &payload).unwrap();
        let at = position.index(sealed.data.len());
        sealed.data[at] ^= 1 << bit;

        let err = decrypt_secure_data(&secret, &sealed.hash, &sealed.data).unwrap_err();
        prop_assert!(err.is_integrity(), "{}", err);
    }

    #[test]
    fn derivation_is_deterministic_and_hash_bound(
        secret in prop::collection::vec(any::<u8>(), 1..64),
        hash_a in prop::array::uniform32(any::<u8>()),
        hash_b in prop::array::uniform32(any::<u8>()),
    ) {
        let (key_1, iv_1) = derive_key_iv(&secret, &hash_a);
        let (key_2, iv_2) = derive_key_iv(&secret, &hash_a);
        prop_assert_eq!(key_1.expose_secret(), key_2.expose_secret());
        prop_assert_eq!(iv_1.expose_secret(), iv_2.expose_secret());

        prop_assume!(hash_a != hash_b);
        let (key_3, _) = derive_key_iv(&secret, &hash_b);
        prop_assert_ne!(key_1.expose_secret(), key_3.expose_secret());
    }

    #[test]
    fn padding_prefix_is_always_stripped(payload in prop::collection::vec(any::<u8>(), 1..256)) {
        let padded = add_padding(&payload);
        prop_assert_eq!(padded.len() % 16, 0);
        prop_assert_eq!(padded[0], padding_length(payload.len()));
        prop_assert_eq!(strip_padding(&padded).unwrap(), payload.as_slice());
    }

    #[test]
    fn strip_padding_never_panics(input in prop::collection::vec(any::<u8>(), 0..300)) {
        match strip_padding(&input) {
            Ok(payload) => {
                prop_assert!(input[0] >= 32);
                prop_assert_eq!(payload.len(), input.len() - usize::from(input[0]));
                prop_assert!(!payload.is_empty());
            }
            Err(err) => prop_assert!(matches!(err, PassportError::Validation(_))),
        }
    }
}
