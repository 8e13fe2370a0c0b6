//! Artifact naming.
//!
//! Both the generation driver (to name the emitted files and functions) and
//! the runtime dispatcher (to look them up) derive artifact identity from the
//! same pure function. There is no shared state between the two sides; any
//! divergence here would silently disable every generated artifact.

use crate::id::ClassId;

/// Prefix for encode artifacts.
pub const SERIALIZER_PREFIX: &str = "serialize";

/// Prefix for decode artifacts. Decoding is context-free, so these names
/// never carry a version or groups.
pub const DESERIALIZER_PREFIX: &str = "deserialize";

/// Derive the artifact name for one (class, version, groups) triple.
///
/// Groups are sorted here so that `{a, b}` and `{b, a}` yield the same
/// artifact; an empty version (or `None`) means unversioned. Every character
/// outside `[A-Za-z0-9_]` becomes `_`, which flattens path separators in
/// class identities into legal function-name characters.
#[must_use]
pub fn function_name(
    prefix: &str,
    class: &ClassId,
    version: Option<&str>,
    groups: &[String],
) -> String {
    let mut name = format!("{prefix}_{class}");

    let mut groups: Vec<&String> = groups.iter().collect();
    groups.sort();
    for group in groups {
        name.push('_');
        name.push_str(group);
    }

    match version {
        Some(version) if !version.is_empty() => {
            name.push('_');
            name.push_str(version);
        }
        _ => {}
    }

    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Name of the encode artifact for a (class, version, groups) triple.
#[must_use]
pub fn serializer_function_name(
    class: &ClassId,
    version: Option<&str>,
    groups: &[String],
) -> String {
    function_name(SERIALIZER_PREFIX, class, version, groups)
}

/// Name of the decode artifact for a class.
#[must_use]
pub fn deserializer_function_name(class: &ClassId) -> String {
    function_name(DESERIALIZER_PREFIX, class, None, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sanitizes_path_separators() {
        let class = ClassId::new("app::models::Product");

        assert_eq!(
            serializer_function_name(&class, None, &[]),
            "serialize_app__models__Product"
        );
        assert_eq!(
            deserializer_function_name(&class),
            "deserialize_app__models__Product"
        );
    }

    #[test]
    fn group_order_does_not_matter() {
        let class = ClassId::new("app::Product");
        let ab = serializer_function_name(&class, None, &["a".into(), "b".into()]);
        let ba = serializer_function_name(&class, None, &["b".into(), "a".into()]);

        assert_eq!(ab, ba);
        assert_eq!(ab, "serialize_app__Product_a_b");
    }

    #[test]
    fn version_is_a_distinct_axis() {
        let class = ClassId::new("app::Product");

        let unversioned = serializer_function_name(&class, None, &[]);
        let versioned = serializer_function_name(&class, Some("2"), &[]);
        assert_ne!(unversioned, versioned);
        assert_eq!(versioned, "serialize_app__Product_2");

        // empty string means unversioned
        let empty = serializer_function_name(&class, Some(""), &[]);
        assert_eq!(unversioned, empty);
    }

    proptest! {
        #[test]
        fn name_is_deterministic_and_order_insensitive(
            class in "[a-zA-Z:_][a-zA-Z0-9:_]{0,30}",
            mut groups in proptest::collection::vec("[a-z]{1,8}", 0..4),
            version in proptest::option::of("[0-9]{1,3}"),
        ) {
            let class = ClassId::new(class);
            let forward = serializer_function_name(&class, version.as_deref(), &groups);
            groups.reverse();
            let reversed = serializer_function_name(&class, version.as_deref(), &groups);

            prop_assert_eq!(&forward, &reversed);
            prop_assert!(forward.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }
}
