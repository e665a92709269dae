//! Property tests for environment overlays.

use proptest::prelude::*;

use replay::Environment;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Restoring an overlay undoes any sequence of writes to its key.
    #[test]
    fn property_overlay_restores_prior_state(
        prior in proptest::option::of(".{0,12}"),
        writes in proptest::collection::vec(proptest::option::of(".{0,12}"), 0..5)
    ) {
        let mut env = Environment::new("/");
        if let Some(value) = &prior {
            env.set("PGDATABASE", value.clone());
        }
        let before = env.clone();

        let overlay = env.overlay("PGDATABASE");
        for write in writes {
            match write {
                Some(value) => env.set("PGDATABASE", value),
                None => {
                    env.remove("PGDATABASE");
                }
            }
        }
        overlay.restore(&mut env);

        prop_assert_eq!(env, before);
    }
}
