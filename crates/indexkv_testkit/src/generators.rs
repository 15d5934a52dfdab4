//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use crate::fixtures::User;
use proptest::prelude::*;

/// Strategy for generating record ids.
pub fn id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_-]{1,24}").expect("Invalid regex")
}

/// Strategy for generating strings accepted by ordered indexes.
///
/// Covers ASCII, multi-byte and astral characters; never U+0000.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range('a', 'f'),
            2 => prop::char::range('\u{1}', '\u{7f}'),
            1 => prop::char::range('\u{80}', '\u{10FFFF}'),
        ],
        0..12,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for generating users with distinct ids.
pub fn users_strategy(max: usize) -> impl Strategy<Value = Vec<User>> {
    prop::collection::vec(
        (text_strategy(), any::<i64>(), any::<bool>()),
        0..max,
    )
    .prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (tag, created, active))| {
                User::new(format!("user-{i:04}"))
                    .with_tag(tag)
                    .with_created(created)
                    .with_active(active)
            })
            .collect()
    })
}
