//! Ownership resolution: which members does an entity genuinely declare,
//! as opposed to inheriting from its ancestor chain or composing from traits.
//!
//! Resolution is name-based and override-blind by contract: a declared
//! member whose name also appears in an ancestor or trait is excluded even
//! when the declaration is a genuine override. The provenance map makes that
//! policy a single explicit decision instead of incidental set arithmetic.

use std::collections::{HashMap, HashSet};

use crate::index::ProjectIndex;
use crate::types::{EntityDescriptor, MemberDescriptor, MemberKind};

/// Where a member name visible on an entity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The name is defined by a composed trait.
    Composed,
    /// The name is declared directly by the entity and nowhere above it.
    Declared,
    /// The name appears somewhere in the ancestor chain.
    Inherited,
}

/// The members of `kind` that `entity` owns, in declaration order.
///
/// A member is owned when its provenance is `Declared`: its name is absent
/// from the transitive ancestor name-set and from every composed trait.
pub fn owned_members<'a>(
    entity: &'a EntityDescriptor,
    index: &ProjectIndex,
    kind: MemberKind,
) -> Vec<&'a MemberDescriptor> {
    let provenance = provenance_map(entity, index, kind);
    entity
        .members(kind)
        .iter()
        .filter(|m| provenance.get(&m.name) == Some(&Provenance::Declared))
        .collect()
}

/// Compute the provenance of every member name declared by `entity`.
///
/// Inherited beats composed when a name appears in both, mirroring the
/// ancestor-first exclusion order of the reference behavior; either way the
/// member is not owned.
pub fn provenance_map(
    entity: &EntityDescriptor,
    index: &ProjectIndex,
    kind: MemberKind,
) -> HashMap<String, Provenance> {
    let inherited = ancestor_member_names(entity, index, kind);
    let composed = composed_member_names(entity, index, kind);

    let mut map = HashMap::new();
    for member in entity.members(kind) {
        let provenance = if inherited.contains(&member.name) {
            Provenance::Inherited
        } else if composed.contains(&member.name) {
            Provenance::Composed
        } else {
            Provenance::Declared
        };
        map.insert(member.name.clone(), provenance);
    }
    map
}

/// Member names visible anywhere on the ancestor chain: each ancestor's own
/// declarations plus its composed traits, walked transitively. Ancestors
/// outside the index contribute nothing (their member lists are unknown to
/// a static index). Cycle-guarded.
fn ancestor_member_names(
    entity: &EntityDescriptor,
    index: &ProjectIndex,
    kind: MemberKind,
) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut visited = HashSet::new();
    // A cycle that loops back to the entity itself must not count the
    // entity's own declarations as inherited.
    visited.insert(entity.qualified_name.clone());
    let mut current = entity.ancestor.clone();

    while let Some(qualified) = current {
        if !visited.insert(qualified.clone()) {
            break;
        }
        let Some(ancestor) = index.get(&qualified) else {
            break;
        };
        for member in ancestor.members(kind) {
            names.insert(member.name.clone());
        }
        names.extend(composed_member_names(ancestor, index, kind));
        current = ancestor.ancestor.clone();
    }

    names
}

/// Union of member names defined by the entity's composed traits,
/// transitively through traits that themselves use traits. Cycle-guarded.
fn composed_member_names(
    entity: &EntityDescriptor,
    index: &ProjectIndex,
    kind: MemberKind,
) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut visited = HashSet::new();
    let mut pending: Vec<String> = entity.traits.clone();

    while let Some(qualified) = pending.pop() {
        if !visited.insert(qualified.clone()) {
            continue;
        }
        let Some(composed) = index.get(&qualified) else {
            continue;
        };
        for member in composed.members(kind) {
            names.insert(member.name.clone());
        }
        pending.extend(composed.traits.iter().cloned());
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityKind, Modifiers};

    fn method(name: &str) -> MemberDescriptor {
        MemberDescriptor {
            doc_comment: None,
            kind: MemberKind::Method,
            modifiers: Modifiers::default(),
            name: name.to_string(),
            parameters: Vec::new(),
        }
    }

    fn entity(qualified: &str, methods: &[&str]) -> EntityDescriptor {
        EntityDescriptor {
            ancestor: None,
            fields: Vec::new(),
            interfaces: Vec::new(),
            kind: EntityKind::Class,
            methods: methods.iter().map(|n| method(n)).collect(),
            namespace: String::new(),
            qualified_name: qualified.to_string(),
            short_name: qualified.rsplit('\\').next().unwrap_or(qualified).to_string(),
            traits: Vec::new(),
        }
    }

    fn owned_names(entity: &EntityDescriptor, index: &ProjectIndex) -> Vec<String> {
        owned_members(entity, index, MemberKind::Method)
            .iter()
            .map(|m| m.name.clone())
            .collect()
    }

    #[test]
    fn ancestor_name_collisions_are_excluded_even_for_overrides() {
        let ancestor = entity("App\\Base", &["foo", "bar"]);
        let mut child = entity("App\\Child", &["foo", "baz"]);
        child.ancestor = Some("App\\Base".to_string());

        let index = ProjectIndex::from_entities(vec![ancestor, child.clone()]);
        assert_eq!(owned_names(&child, &index), vec!["baz"]);
    }

    #[test]
    fn trait_name_collisions_are_excluded() {
        let composed = entity("App\\Concerns\\Cachable", &["qux"]);
        let mut user = entity("App\\User", &["baz", "qux"]);
        user.traits = vec!["App\\Concerns\\Cachable".to_string()];

        let index = ProjectIndex::from_entities(vec![composed, user.clone()]);
        assert_eq!(owned_names(&user, &index), vec!["baz"]);
    }

    #[test]
    fn declaration_order_is_preserved() {
        let e = entity("App\\Thing", &["zeta", "alpha", "mid"]);
        let index = ProjectIndex::from_entities(vec![e.clone()]);
        assert_eq!(owned_names(&e, &index), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn ancestor_chain_is_transitive() {
        let grand = entity("App\\Grand", &["root"]);
        let mut parent = entity("App\\Parent", &["mid"]);
        parent.ancestor = Some("App\\Grand".to_string());
        let mut child = entity("App\\Child", &["root", "mid", "own"]);
        child.ancestor = Some("App\\Parent".to_string());

        let index = ProjectIndex::from_entities(vec![grand, parent, child.clone()]);
        assert_eq!(owned_names(&child, &index), vec!["own"]);
    }

    #[test]
    fn ancestor_trait_members_count_as_inherited() {
        let composed = entity("App\\Concerns\\Loggable", &["log"]);
        let mut parent = entity("App\\Base", &[]);
        parent.traits = vec!["App\\Concerns\\Loggable".to_string()];
        let mut child = entity("App\\Child", &["log", "own"]);
        child.ancestor = Some("App\\Base".to_string());

        let index = ProjectIndex::from_entities(vec![composed, parent, child.clone()]);

        let provenance = provenance_map(&child, &index, MemberKind::Method);
        assert_eq!(provenance.get("log"), Some(&Provenance::Inherited));
        assert_eq!(owned_names(&child, &index), vec!["own"]);
    }

    #[test]
    fn external_ancestors_contribute_nothing() {
        let mut orphan = entity("App\\Job", &["handle"]);
        orphan.ancestor = Some("Illuminate\\Queue\\Job".to_string());

        let index = ProjectIndex::from_entities(vec![orphan.clone()]);
        assert_eq!(owned_names(&orphan, &index), vec!["handle"]);
    }

    #[test]
    fn ancestor_cycles_terminate() {
        let mut a = entity("App\\A", &["one"]);
        a.ancestor = Some("App\\B".to_string());
        let mut b = entity("App\\B", &["two"]);
        b.ancestor = Some("App\\A".to_string());

        let index = ProjectIndex::from_entities(vec![a.clone(), b]);
        assert_eq!(owned_names(&a, &index), vec!["one"]);
    }
}
