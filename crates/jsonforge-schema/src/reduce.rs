use crate::{property::PropertyDef, version::Version};
use std::cmp::Ordering;

///
/// Reducer
///
/// A named filter strategy applied when resolving a class's view for a
/// specific version/group context. Reducers run in chain order over the raw
/// candidate list; the generator only decides which chain to apply, the
/// semantics live here.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reducer {
    /// Keep the best candidate per serialized name: writable candidates win
    /// over read-only (virtual) ones, earlier declaration breaks ties.
    TakeBest,

    /// Where any candidate for a serialized name is flagged preferred, drop
    /// the others.
    Preferred,

    /// Keep candidates whose since/until bounds admit the given version.
    Version(Version),

    /// Keep candidates visible under the given groups. Candidates with no
    /// groups are visible everywhere.
    Group(Vec<String>),
}

impl Reducer {
    #[must_use]
    pub fn apply(&self, candidates: Vec<PropertyDef>) -> Vec<PropertyDef> {
        match self {
            Self::TakeBest => take_best(candidates),
            Self::Preferred => preferred(candidates),
            Self::Version(version) => candidates
                .into_iter()
                .filter(|p| admits_version(p, version))
                .collect(),
            Self::Group(groups) => candidates
                .into_iter()
                .filter(|p| p.groups.is_empty() || p.groups.iter().any(|g| groups.contains(g)))
                .collect(),
        }
    }
}

fn admits_version(property: &PropertyDef, version: &Version) -> bool {
    if let Some(since) = &property.since
        && version.compare(since) == Ordering::Less
    {
        return false;
    }
    if let Some(until) = &property.until
        && version.compare(until) == Ordering::Greater
    {
        return false;
    }

    true
}

fn take_best(candidates: Vec<PropertyDef>) -> Vec<PropertyDef> {
    let mut result: Vec<PropertyDef> = Vec::new();

    for candidate in candidates {
        match result
            .iter_mut()
            .find(|p| p.serialized_name == candidate.serialized_name)
        {
            None => result.push(candidate),
            Some(existing) => {
                // a writable candidate beats a virtual one; otherwise the
                // earlier declaration stands
                if existing.read_only && !candidate.read_only {
                    *existing = candidate;
                }
            }
        }
    }

    result
}

fn preferred(candidates: Vec<PropertyDef>) -> Vec<PropertyDef> {
    let preferred_names: Vec<String> = candidates
        .iter()
        .filter(|p| p.preferred)
        .map(|p| p.serialized_name.clone())
        .collect();

    candidates
        .into_iter()
        .filter(|p| p.preferred || !preferred_names.contains(&p.serialized_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Primitive, PropertyType};

    fn prop(name: &str) -> PropertyDef {
        PropertyDef::new(name, PropertyType::Primitive(Primitive::String))
    }

    #[test]
    fn version_reducer_honors_since_and_until() {
        let candidates = vec![
            prop("old").until("2"),
            prop("new").since("3"),
            prop("always"),
        ];

        let v1 = Reducer::Version(Version::new("1")).apply(candidates.clone());
        assert_eq!(names(&v1), vec!["old", "always"]);

        let v3 = Reducer::Version(Version::new("3")).apply(candidates.clone());
        assert_eq!(names(&v3), vec!["new", "always"]);

        let v2 = Reducer::Version(Version::new("2")).apply(candidates);
        assert_eq!(names(&v2), vec!["old", "always"]);
    }

    #[test]
    fn group_reducer_keeps_ungated_properties() {
        let candidates = vec![
            prop("api").with_groups(["api"]),
            prop("detail").with_groups(["details"]),
            prop("open"),
        ];

        let reduced = Reducer::Group(vec!["api".to_string()]).apply(candidates);
        assert_eq!(names(&reduced), vec!["api", "open"]);
    }

    #[test]
    fn take_best_prefers_writable_candidate() {
        let field = prop("changed");
        let virtual_accessor = prop("changed_in_v3")
            .with_serialized_name("changed")
            .read_only();

        let reduced = Reducer::TakeBest.apply(vec![field, virtual_accessor]);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].name, "changed");

        // reversed declaration order: the writable field still wins
        let field = prop("changed");
        let virtual_accessor = prop("changed_in_v3")
            .with_serialized_name("changed")
            .read_only();
        let reduced = Reducer::TakeBest.apply(vec![virtual_accessor, field]);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].name, "changed");
    }

    #[test]
    fn preferred_reducer_drops_unpreferred_twins() {
        let candidates = vec![
            prop("a"),
            prop("a_v2").with_serialized_name("a").preferred(),
            prop("b"),
        ];

        let reduced = Reducer::Preferred.apply(candidates);
        assert_eq!(names(&reduced), vec!["a_v2", "b"]);
    }

    fn names(properties: &[PropertyDef]) -> Vec<&str> {
        properties.iter().map(|p| p.name.as_str()).collect()
    }
}
