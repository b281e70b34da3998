//! Multi-parent entity type resolution.
//!
//! Types form a DAG through `extends`. Resolution walks it depth-first,
//! emitting every ancestor after its own parents (post-order), so merging
//! in that order lets children override ancestors and later parents
//! override earlier ones. A visited set makes diamonds resolve each ancestor
//! once and keeps cycles from recursing forever.

use std::collections::BTreeSet;

use super::{Attributes, EntityTypeRegistry, Params};
use crate::error::ConfigError;

/// Effective entity type after inheritance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedType {
    pub id: String,
    /// Every type in the hierarchy, root-first, ending with `id`.
    pub ancestors: Vec<String>,
    pub attributes: Attributes,
    /// Components in order of first declaration along the ancestor chain.
    pub components: Vec<(String, Params)>,
}

impl ResolvedType {
    pub fn component(&self, id: &str) -> Option<&Params> {
        self.components
            .iter()
            .find_map(|(component, params)| (component == id).then_some(params))
    }
}

pub(super) fn resolve(registry: &EntityTypeRegistry, id: &str) -> Result<ResolvedType, ConfigError> {
    if !registry.contains(id) {
        return Err(ConfigError::UnknownEntityType(id.to_string()));
    }

    let mut visited = BTreeSet::new();
    let mut order = Vec::new();
    visit(registry, id, id, &mut visited, &mut order)?;

    let mut attributes = Attributes::default();
    let mut components: Vec<(String, Params)> = Vec::new();

    for type_id in &order {
        let Some(entity_type) = registry.get(type_id) else {
            continue;
        };
        attributes.merge(&entity_type.attributes());

        for (component, params) in &entity_type.components {
            match components.iter_mut().find(|(existing, _)| existing == component) {
                Some((_, existing)) => *existing = params.clone(),
                None => components.push((component.clone(), params.clone())),
            }
        }
    }

    Ok(ResolvedType {
        id: id.to_string(),
        ancestors: order,
        attributes,
        components,
    })
}

fn visit(
    registry: &EntityTypeRegistry,
    root: &str,
    id: &str,
    visited: &mut BTreeSet<String>,
    order: &mut Vec<String>,
) -> Result<(), ConfigError> {
    if !visited.insert(id.to_string()) {
        return Ok(());
    }

    let entity_type = registry.get(id).ok_or_else(|| ConfigError::UnknownAncestor {
        root: root.to_string(),
        parent: id.to_string(),
    })?;

    for parent in &entity_type.extends {
        visit(registry, root, parent, visited, order)?;
    }

    order.push(id.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityType;

    fn registry(types: impl IntoIterator<Item = EntityType>) -> EntityTypeRegistry {
        let mut registry = EntityTypeRegistry::new();
        registry.register(types);
        registry
    }

    #[test]
    fn child_overrides_both_parents() {
        let registry = registry([
            EntityType::new("A")
                .glyph(1)
                .color(1)
                .component("Holdable", Params::Int(1))
                .component("Souls", Params::Int(1)),
            EntityType::new("B")
                .color(2)
                .z(2)
                .component("Souls", Params::Int(2))
                .component("Describe", "b".into()),
            EntityType::new("C")
                .extends(["A", "B"])
                .z(3)
                .component("Describe", "c".into()),
        ]);

        let resolved = registry.resolve("C").unwrap();

        assert_eq!(resolved.ancestors, ["A", "B", "C"]);
        assert_eq!(
            resolved.attributes,
            Attributes {
                glyph: Some(1),
                color: Some(2),
                z: Some(3),
            }
        );
        let ids: Vec<_> = resolved.components.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["Holdable", "Souls", "Describe"]);
        assert_eq!(resolved.component("Souls"), Some(&Params::Int(2)));
        assert_eq!(resolved.component("Describe"), Some(&Params::from("c")));
    }

    #[test]
    fn diamond_does_not_duplicate_components() {
        let registry = registry([
            EntityType::new("Base").component("Actor", "Rest".into()),
            EntityType::new("Left").extends(["Base"]),
            EntityType::new("Right")
                .extends(["Base"])
                .component("Actor", "Wander".into()),
            EntityType::new("Leaf").extends(["Left", "Right"]),
        ]);

        let resolved = registry.resolve("Leaf").unwrap();

        assert_eq!(resolved.ancestors, ["Base", "Left", "Right", "Leaf"]);
        assert_eq!(resolved.components.len(), 1);
        assert_eq!(resolved.component("Actor"), Some(&Params::from("Wander")));
    }

    #[test]
    fn cycles_terminate() {
        let registry = registry([
            EntityType::new("Egg").extends(["Chicken"]).glyph(1),
            EntityType::new("Chicken").extends(["Egg"]).glyph(2),
        ]);

        let resolved = registry.resolve("Egg").unwrap();

        assert_eq!(resolved.ancestors, ["Chicken", "Egg"]);
        assert_eq!(resolved.attributes.glyph, Some(1));
    }

    #[test]
    fn unknown_types_are_errors() {
        let registry = registry([EntityType::new("Orphan").extends(["Ghost"])]);

        assert_eq!(
            registry.resolve("Nobody"),
            Err(ConfigError::UnknownEntityType("Nobody".into()))
        );
        assert_eq!(
            registry.resolve("Orphan"),
            Err(ConfigError::UnknownAncestor {
                root: "Orphan".into(),
                parent: "Ghost".into(),
            })
        );
    }
}
