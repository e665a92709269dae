//! Property tests for script name validation.

use proptest::prelude::*;

use replay::{ReplayError, ScriptName};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Validation never panics, whatever the input.
    #[test]
    fn property_parse_never_panics(name in any::<String>()) {
        let _ = ScriptName::parse(&name);
    }

    /// PROPERTY: Well-formed names are accepted unchanged.
    #[test]
    fn property_well_formed_names_accepted(name in "[A-Za-z][A-Za-z0-9_]{0,24}") {
        let parsed = ScriptName::parse(&name);
        prop_assert!(parsed.is_ok());
        let parsed = parsed.unwrap();
        prop_assert_eq!(parsed.as_str(), name.as_str());
    }

    /// PROPERTY: A leading digit or underscore is always rejected.
    #[test]
    fn property_bad_first_character_rejected(name in "[0-9_][A-Za-z0-9_]{0,24}") {
        let is_invalid_name = matches!(
            ScriptName::parse(&name),
            Err(ReplayError::InvalidScriptName { .. })
        );
        prop_assert!(is_invalid_name);
    }
}
