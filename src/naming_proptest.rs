//! Property-based tests for group and host naming.
//!
//! These tests use proptest to generate directory and group names and check
//! that the sanitizer, tree-level group names and prefix chains keep their
//! invariants for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::prefix::PrefixChain;
    use crate::registry::safe_group_name;
    use crate::tree_groups::{is_shadow_name, shadow_name};
    use proptest::prelude::*;

    // ============================================================================
    // safe_group_name property tests
    // ============================================================================

    proptest! {
        /// Property: output only contains [A-Za-z0-9_]
        #[test]
        fn safe_group_name_only_safe_chars(input in ".*") {
            let result = safe_group_name(&input);
            prop_assert!(
                result.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "unsafe character in '{}' from '{}'",
                result,
                input
            );
        }

        /// Property: sanitizing twice changes nothing
        #[test]
        fn safe_group_name_is_idempotent(input in ".*") {
            let once = safe_group_name(&input);
            prop_assert_eq!(safe_group_name(&once), once);
        }

        /// Property: one output character per input character
        #[test]
        fn safe_group_name_preserves_char_count(input in ".*") {
            prop_assert_eq!(safe_group_name(&input).chars().count(), input.chars().count());
        }
    }

    // ============================================================================
    // shadow_name property tests
    // ============================================================================

    proptest! {
        /// Property: tree-level names are recognizable and sanitized
        #[test]
        fn shadow_name_is_marked_and_safe(
            dirs in prop::collection::vec("[a-z0-9.-]{1,8}", 0..4),
            group in "[a-z][a-z0-9_-]{0,10}",
        ) {
            let chain = dirs.iter().fold(PrefixChain::root(), |chain, dir| chain.child(dir));
            let name = shadow_name(chain.current(), &group);
            prop_assert!(is_shadow_name(&name));
            prop_assert!(!name.contains('-'));
            prop_assert_eq!(safe_group_name(&name), name.clone());
        }

        /// Property: user group names never look like tree-level names
        #[test]
        fn plain_group_names_are_not_shadow_names(group in "[a-z][a-z0-9_]{0,12}") {
            prop_assert!(!is_shadow_name(&group));
        }
    }

    // ============================================================================
    // PrefixChain property tests
    // ============================================================================

    proptest! {
        /// Property: one entry per level plus the root, each extending its parent
        #[test]
        fn chain_entries_extend_their_parent(dirs in prop::collection::vec("[a-zA-Z0-9_]{1,8}", 0..6)) {
            let chain = dirs.iter().fold(PrefixChain::root(), |chain, dir| chain.child(dir));
            prop_assert_eq!(chain.depth(), dirs.len());
            prop_assert_eq!(chain.entries().len(), dirs.len() + 1);
            prop_assert_eq!(chain.entries()[0].as_str(), "");
            for pair in chain.entries().windows(2) {
                prop_assert!(pair[1].starts_with(pair[0].as_str()));
                prop_assert!(pair[1].ends_with('-'));
            }
        }

        /// Property: the expected host-name prefix is the joined directory names
        #[test]
        fn chain_current_joins_dirs(dirs in prop::collection::vec("[a-z0-9]{1,8}", 1..6)) {
            let chain = dirs.iter().fold(PrefixChain::root(), |chain, dir| chain.child(dir));
            prop_assert_eq!(chain.current(), format!("{}-", dirs.join("-")));
            prop_assert_eq!(
                chain.naming_prefix(true),
                chain.parent().unwrap_or_default()
            );
        }

        /// Property: ancestors are strict and nearest first
        #[test]
        fn chain_ancestors_exclude_current(dirs in prop::collection::vec("[a-z]{1,5}", 0..5)) {
            let chain = dirs.iter().fold(PrefixChain::root(), |chain, dir| chain.child(dir));
            let ancestors: Vec<&str> = chain.ancestors().collect();
            prop_assert_eq!(ancestors.len(), dirs.len());
            if let Some(first) = ancestors.first() {
                prop_assert_eq!(Some(*first), chain.parent());
            }
        }

        /// Property: one level group per directory, all sanitized
        #[test]
        fn level_groups_one_per_level(dirs in prop::collection::vec("[a-z0-9-]{1,6}", 0..5)) {
            let chain = dirs.iter().fold(PrefixChain::root(), |chain, dir| chain.child(dir));
            let names = chain.level_group_names();
            prop_assert_eq!(names.len(), dirs.len());
            for name in &names {
                prop_assert_eq!(safe_group_name(name), name.clone());
            }
        }
    }
}
