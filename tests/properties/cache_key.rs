//! Property tests for dependency cache keys.

use proptest::prelude::*;

use replay::CacheKey;

fn specifier() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,10}(==[0-9]\\.[0-9]{1,2})?").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Any permutation of a dependency set gives the same key.
    #[test]
    fn property_key_ignores_declaration_order(
        (specs, shuffled) in proptest::collection::vec(specifier(), 0..8)
            .prop_flat_map(|specs| {
                let shuffled = Just(specs.clone()).prop_shuffle();
                (Just(specs), shuffled)
            })
    ) {
        prop_assert_eq!(
            CacheKey::from_specifiers(&specs),
            CacheKey::from_specifiers(&shuffled)
        );
    }

    /// PROPERTY: Repeating a specifier does not change the key.
    #[test]
    fn property_key_ignores_duplicates(
        specs in proptest::collection::vec(specifier(), 1..6)
    ) {
        let mut doubled = specs.clone();
        doubled.extend(specs.iter().cloned());
        prop_assert_eq!(
            CacheKey::from_specifiers(&specs),
            CacheKey::from_specifiers(&doubled)
        );
    }

    /// PROPERTY: Keys are 64 lowercase hex digits and name a `sandbox_` dir.
    #[test]
    fn property_key_is_sha256_hex(
        specs in proptest::collection::vec(specifier(), 0..6)
    ) {
        let key = CacheKey::from_specifiers(&specs);
        prop_assert_eq!(key.hex().len(), 64);
        prop_assert!(key.hex().chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        prop_assert_eq!(key.sandbox_dir_name(), format!("sandbox_{}", key.hex()));
    }
}
