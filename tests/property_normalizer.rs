use proptest::prelude::*;
use taxalign::services::normalize;

const QUALIFIERS: [&str; 5] = ["var", "ssp", "subsp", "x", "f"];

proptest! {
    /// Property: normalizing twice changes nothing
    #[test]
    fn prop_normalize_is_idempotent(input in "\\PC{0,40}") {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Property: output holds only lower-case ASCII letters separated by
    /// single spaces
    #[test]
    fn prop_normalize_output_charset(input in "\\PC{0,40}") {
        let out = normalize(&input);
        prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.contains("  "));
    }

    /// Property: names longer than two words lose their rank qualifiers
    #[test]
    fn prop_long_names_drop_qualifiers(
        genus in "[A-Z][a-z]{2,10}",
        species in "[a-z]{3,10}",
        qualifier in prop::sample::select(QUALIFIERS.to_vec()),
        infra in "[a-z]{3,10}",
    ) {
        prop_assume!(!QUALIFIERS.contains(&species.as_str()));
        prop_assume!(!QUALIFIERS.contains(&infra.as_str()));

        let input = format!("{genus} {species} {qualifier}. {infra}");
        let out = normalize(&input);
        prop_assert_eq!(out, format!("{} {species} {infra}", genus.to_lowercase()));
    }

    /// Property: case and punctuation never change the key
    #[test]
    fn prop_case_and_punctuation_insensitive(name in "[a-z]{2,8} [a-z]{2,8}") {
        let shouted = format!("{}.", name.to_uppercase());
        prop_assert_eq!(normalize(&shouted), normalize(&name));
    }
}

#[test]
fn test_two_word_names_keep_qualifier_like_words() {
    assert_eq!(normalize("Rosa x"), "rosa x");
    assert_eq!(normalize("Quercus alba var. alba"), "quercus alba alba");
}
