//! # Graph Model
//!
//! The container that owns one model's entities and relationships.
//!
//! ## Limitations
//!
//! - **No internal locking**: a `Model` is a plain owned value. Share it
//!   across threads only behind an external lock (see [`crate::SharedManager`]).
//! - **Linear scans**: dedup and lookups walk the entity list in insertion
//!   order; the first match wins.
//! - **No referential integrity**: edges may point at nodes that were never
//!   added, and ids are not checked for uniqueness.

pub mod factory;
pub mod query;

use std::sync::Arc;

use hashbrown::HashMap;
use tracing::debug;

use crate::model::*;

// ============================================================================
// Configuration
// ============================================================================

/// Tunables for a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    /// Componentwise coordinate tolerance for point dedup and coincidence.
    pub tolerance: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { tolerance: DEFAULT_TOLERANCE }
    }
}

// ============================================================================
// Model
// ============================================================================

/// One logical model: ordered entities plus ordered relationships.
#[derive(Debug, Clone, Default)]
pub struct Model {
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
    config: ModelConfig,
    next_rel_id: u64,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ModelConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    // ========================================================================
    // Raw adds (no dedup, no wiring)
    // ========================================================================

    pub fn add_entity(&mut self, entity: impl Into<Entity>) -> Entity {
        let entity = entity.into();
        self.entities.push(entity.clone());
        entity
    }

    pub fn add_entities(&mut self, entities: impl IntoIterator<Item = Entity>) {
        self.entities.extend(entities);
    }

    /// Append an edge verbatim. Endpoints are not checked.
    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }

    pub fn add_relationships(&mut self, relationships: impl IntoIterator<Item = Relationship>) {
        self.relationships.extend(relationships);
    }

    /// Append an edge with an auto-generated id.
    pub fn link(
        &mut self,
        source: impl Into<Entity>,
        target: impl Into<Entity>,
        relationship_type: RelationshipType,
    ) -> &Relationship {
        let id = self.next_relationship_id();
        let rel = Relationship::new(id, relationship_type, source, target);
        debug!(rel = %rel.id, source = rel.source.id(), target = rel.target.id(), kind = %relationship_type, "Wired relationship");
        self.relationships.push(rel);
        &self.relationships[self.relationships.len() - 1]
    }

    /// Next `rel-N` not already taken by a caller-supplied relationship.
    fn next_relationship_id(&mut self) -> String {
        loop {
            self.next_rel_id += 1;
            let id = format!("rel-{}", self.next_rel_id);
            if self.relationship_by_id(&id).is_none() {
                return id;
            }
        }
    }

    // ========================================================================
    // Typed queries
    // ========================================================================

    /// Every `T`, in insertion order. Returns a new `Vec`, not a view.
    pub fn entities_of_type<T: EntityKind>(&self) -> Vec<Arc<T>> {
        self.iter_of_type::<T>().cloned().collect()
    }

    /// First `T` whose id matches.
    pub fn entity_by_id<T: EntityKind>(&self, id: &str) -> Option<Arc<T>> {
        self.iter_of_type::<T>().find(|e| e.id() == id).cloned()
    }

    /// First entity of any kind whose id matches.
    pub fn find_entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn relationship_by_id(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    pub fn relationships_of_type(&self, relationship_type: RelationshipType) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.relationship_type == relationship_type)
            .collect()
    }

    /// Outgoing edges of the given node instance.
    pub fn relationships_from(&self, entity: &Entity) -> Vec<&Relationship> {
        self.relationships.iter().filter(|r| r.source.ptr_eq(entity)).collect()
    }

    /// Incoming edges of the given node instance.
    pub fn relationships_to(&self, entity: &Entity) -> Vec<&Relationship> {
        self.relationships.iter().filter(|r| r.target.ptr_eq(entity)).collect()
    }

    /// True when this exact node instance is in the entity list.
    pub fn contains(&self, entity: &Entity) -> bool {
        self.entities.iter().any(|e| e.ptr_eq(entity))
    }

    pub(crate) fn iter_of_type<T: EntityKind>(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entities.iter().filter_map(T::from_entity)
    }

    // ========================================================================
    // Auxiliary CRUD
    // ========================================================================

    /// Drop every entity and relationship.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.relationships.clear();
    }

    /// Remove the first entity with this id. Its edges are left in place.
    pub fn remove_entity(&mut self, id: &str) -> Option<Entity> {
        let pos = self.entities.iter().position(|e| e.id() == id)?;
        Some(self.entities.remove(pos))
    }

    /// Remove the first relationship with this id.
    pub fn remove_relationship(&mut self, id: &str) -> Option<Relationship> {
        let pos = self.relationships.iter().position(|r| r.id == id)?;
        Some(self.relationships.remove(pos))
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    pub fn stats(&self) -> ModelStats {
        let mut stats = ModelStats {
            entities: self.entities.len(),
            relationships: self.relationships.len(),
            ..ModelStats::default()
        };
        for e in &self.entities {
            *stats.entities_by_type.entry(e.entity_type()).or_default() += 1;
        }
        for r in &self.relationships {
            *stats.relationships_by_type.entry(r.relationship_type).or_default() += 1;
            if !self.contains(&r.source) || !self.contains(&r.target) {
                stats.orphaned_relationships += 1;
            }
        }
        stats
    }
}

/// Counts over a model's contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelStats {
    pub entities: usize,
    pub relationships: usize,
    pub entities_by_type: HashMap<&'static str, usize>,
    pub relationships_by_type: HashMap<RelationshipType, usize>,
    /// Edges with at least one endpoint missing from the entity list.
    pub orphaned_relationships: usize,
}

impl std::fmt::Display for ModelStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ModelStats {{ entities: {}, relationships: {}, orphaned: {} }}",
            self.entities, self.relationships, self.orphaned_relationships,
        )
    }
}
