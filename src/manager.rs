//! # Model Manager
//!
//! An ordered collection of independent [`Model`]s addressed by index.
//! Every forwarding method bounds-checks the index before touching any
//! model; the domain logic lives in [`Model`].

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::export;
use crate::graph::{Model, ModelConfig};
use crate::model::*;
use crate::{Error, Result};

/// A manager shared across threads. The lock is the caller's
/// serialization point; the manager itself has none.
pub type SharedManager = Arc<RwLock<ModelManager>>;

#[derive(Debug, Clone, Default)]
pub struct ModelManager {
    models: Vec<Model>,
}

impl ModelManager {
    /// A manager with no models.
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager holding one empty model at index 0.
    pub fn with_default_model() -> Self {
        Self { models: vec![Model::new()] }
    }

    pub fn into_shared(self) -> SharedManager {
        Arc::new(RwLock::new(self))
    }

    /// Append an empty model; returns its index.
    pub fn add_model(&mut self) -> usize {
        self.push_model(Model::new())
    }

    pub fn add_model_with_config(&mut self, config: ModelConfig) -> usize {
        self.push_model(Model::with_config(config))
    }

    pub fn push_model(&mut self, model: Model) -> usize {
        self.models.push(model);
        self.models.len() - 1
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model(&self, index: usize) -> Result<&Model> {
        let count = self.models.len();
        self.models.get(index).ok_or(Error::ModelIndexOutOfRange { index, count })
    }

    pub fn model_mut(&mut self, index: usize) -> Result<&mut Model> {
        let count = self.models.len();
        self.models.get_mut(index).ok_or(Error::ModelIndexOutOfRange { index, count })
    }

    // ========================================================================
    // Factories (forwarded)
    // ========================================================================

    pub fn create_point3d(&mut self, index: usize, point: Point3D) -> Result<Arc<Point3D>> {
        self.model_mut(index)?.create_point3d(point)
    }

    pub fn create_line_segment(&mut self, index: usize, line: LineSegment) -> Result<Arc<LineSegment>> {
        self.model_mut(index)?.create_line_segment(line)
    }

    pub fn create_arc_segment(&mut self, index: usize, arc: ArcSegment) -> Result<Arc<ArcSegment>> {
        self.model_mut(index)?.create_arc_segment(arc)
    }

    pub fn create_material(&mut self, index: usize, material: Material) -> Result<Arc<Material>> {
        self.model_mut(index)?.create_material(material)
    }

    pub fn create_cross_section(&mut self, index: usize, section: CrossSection) -> Result<Arc<CrossSection>> {
        self.model_mut(index)?.create_cross_section(section)
    }

    pub fn create_storey(&mut self, index: usize, storey: Storey) -> Result<Arc<Storey>> {
        self.model_mut(index)?.create_storey(storey)
    }

    pub fn create_structural_point_connection(
        &mut self,
        index: usize,
        connection: StructuralPointConnection,
    ) -> Result<Arc<StructuralPointConnection>> {
        self.model_mut(index)?.create_structural_point_connection(connection)
    }

    pub fn create_structural_curve_member(
        &mut self,
        index: usize,
        member: StructuralCurveMember,
    ) -> Result<Arc<StructuralCurveMember>> {
        self.model_mut(index)?.create_structural_curve_member(member)
    }

    pub fn create_structural_surface_member(
        &mut self,
        index: usize,
        member: StructuralSurfaceMember,
    ) -> Result<Arc<StructuralSurfaceMember>> {
        self.model_mut(index)?.create_structural_surface_member(member)
    }

    pub fn create_beam(&mut self, index: usize, beam: Beam) -> Result<Arc<Beam>> {
        self.model_mut(index)?.create_beam(beam)
    }

    pub fn create_column(&mut self, index: usize, column: Column) -> Result<Arc<Column>> {
        self.model_mut(index)?.create_column(column)
    }

    pub fn create_slab(&mut self, index: usize, slab: Slab) -> Result<Arc<Slab>> {
        self.model_mut(index)?.create_slab(slab)
    }

    pub fn create_wall(&mut self, index: usize, wall: Wall) -> Result<Arc<Wall>> {
        self.model_mut(index)?.create_wall(wall)
    }

    // ========================================================================
    // Raw adds (no dedup)
    // ========================================================================

    pub fn add_entity(&mut self, index: usize, entity: impl Into<Entity>) -> Result<Entity> {
        Ok(self.model_mut(index)?.add_entity(entity))
    }

    /// Append every entity verbatim.
    pub fn add_entities(&mut self, index: usize, entities: impl IntoIterator<Item = Entity>) -> Result<()> {
        self.model_mut(index)?.add_entities(entities);
        Ok(())
    }

    pub fn add_relationship(&mut self, index: usize, relationship: Relationship) -> Result<()> {
        self.model_mut(index)?.add_relationship(relationship);
        Ok(())
    }

    pub fn add_relationships(
        &mut self,
        index: usize,
        relationships: impl IntoIterator<Item = Relationship>,
    ) -> Result<()> {
        self.model_mut(index)?.add_relationships(relationships);
        Ok(())
    }

    // ========================================================================
    // Queries (forwarded)
    // ========================================================================

    pub fn entities_of_type<T: EntityKind>(&self, index: usize) -> Result<Vec<Arc<T>>> {
        Ok(self.model(index)?.entities_of_type::<T>())
    }

    pub fn entity_by_id<T: EntityKind>(&self, index: usize, id: &str) -> Result<Option<Arc<T>>> {
        Ok(self.model(index)?.entity_by_id::<T>(id))
    }

    pub fn find_matching_point_connection_by_point3d(
        &self,
        index: usize,
        connection: &Arc<StructuralPointConnection>,
    ) -> Result<Option<String>> {
        Ok(self.model(index)?.find_matching_point_connection_by_point3d(connection))
    }

    pub fn find_coincident_lines(
        &self,
        index: usize,
        line: Option<&Arc<LineSegment>>,
    ) -> Result<Vec<Arc<LineSegment>>> {
        Ok(self.model(index)?.find_coincident_lines(line))
    }

    pub fn find_directionally_equal_lines(
        &self,
        index: usize,
        line: Option<&Arc<LineSegment>>,
    ) -> Result<Vec<Arc<LineSegment>>> {
        Ok(self.model(index)?.find_directionally_equal_lines(line))
    }

    // ========================================================================
    // Export
    // ========================================================================

    pub fn build_json(&self, index: usize) -> Result<String> {
        export::build_json(self.model(index)?)
    }

    /// Serialize model 0 to `path`, overwriting any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let model = self.model(0)?;
        export::save(model, path)?;
        info!(path = %path.display(), nodes = model.entity_count(), edges = model.relationship_count(), "Saved model");
        Ok(())
    }
}
