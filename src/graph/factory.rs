//! Create-or-reuse factories.
//!
//! Every factory follows the same steps:
//!
//! 1. validate `id` / `name` (nothing is mutated on failure),
//! 2. look for an equivalent node of the same kind (coordinates for points,
//!    native id for everything else) and return it unchanged if found,
//! 3. resolve each reference argument to the node already stored in the
//!    model, dropping references that resolve to nothing,
//! 4. append the node, then one edge per resolved reference.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::Model;
use crate::model::*;
use crate::{Error, Result};

/// Edges collected while resolving a draft's references.
struct Links {
    edges: Vec<(RelationshipType, Entity)>,
}

impl Links {
    fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Resolve a required reference in place.
    fn required<T: EntityKind>(&mut self, model: &Model, kind: RelationshipType, slot: &mut Arc<T>) {
        match model.resolve(slot) {
            Some(found) => {
                *slot = found.clone();
                self.edges.push((kind, T::into_entity(found)));
            }
            None => skipped::<T>(slot, kind),
        }
    }

    /// Resolve an optional reference in place.
    fn optional<T: EntityKind>(&mut self, model: &Model, kind: RelationshipType, slot: &mut Option<Arc<T>>) {
        if let Some(reference) = slot {
            self.required(model, kind, reference);
        }
    }

    /// Resolve every reference of a collection in place, keeping order.
    fn each<T: EntityKind>(&mut self, model: &Model, kind: RelationshipType, slots: &mut [Arc<T>]) {
        for slot in slots {
            self.required(model, kind, slot);
        }
    }

    fn segments(&mut self, model: &Model, slots: &mut [Segment]) {
        for segment in slots {
            match segment {
                Segment::Line(line) => self.required(model, RelationshipType::HasSegment, line),
                Segment::Arc(arc) => self.required(model, RelationshipType::HasSegment, arc),
            }
        }
    }
}

fn skipped<T: EntityKind>(reference: &T, kind: RelationshipType) {
    debug!(
        target_type = T::ENTITY_TYPE,
        target = reference.id(),
        kind = %kind,
        "Reference not present in model, no relationship created"
    );
}

fn finite_coordinate(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(parameter, format!("must be finite, got {value}")))
    }
}

/// Pair positions with segments: invalid or missing positions become 0,
/// positions without a segment are dropped.
pub(crate) fn normalize_positions(segment_count: usize, positions: &[f64]) -> Vec<f64> {
    (0..segment_count)
        .map(|i| match positions.get(i) {
            Some(&p) if p.is_finite() && p >= 0.0 => p,
            _ => 0.0,
        })
        .collect()
}

impl Model {
    /// First existing `T` equivalent to `candidate` under its dedup key.
    pub fn find_existing<T: EntityKind>(&self, candidate: &T) -> Option<Arc<T>> {
        let key = candidate.dedup_key();
        let tolerance = self.tolerance();
        self.iter_of_type::<T>()
            .find(|e| e.dedup_key().matches(&key, tolerance))
            .cloned()
    }

    /// The stored node a reference stands for: the same instance if it was
    /// added, else the first equivalent node, else `None`.
    pub fn resolve<T: EntityKind>(&self, reference: &Arc<T>) -> Option<Arc<T>> {
        if self.iter_of_type::<T>().any(|e| Arc::ptr_eq(e, reference)) {
            return Some(reference.clone());
        }
        self.find_existing(reference.as_ref())
    }

    fn insert_or_reuse<T: EntityKind>(
        &mut self,
        draft: T,
        resolve: impl FnOnce(&Model, &mut T, &mut Links),
    ) -> Result<Arc<T>> {
        draft.base().validate()?;

        if let Some(existing) = self.find_existing(&draft) {
            debug!(
                entity_type = T::ENTITY_TYPE,
                requested = draft.id(),
                existing = existing.id(),
                "Reusing existing entity"
            );
            return Ok(existing);
        }

        let mut draft = draft;
        let mut links = Links::new();
        resolve(&*self, &mut draft, &mut links);

        let node = Arc::new(draft);
        self.entities.push(T::into_entity(node.clone()));
        let source = T::into_entity(node.clone());
        for (kind, target) in links.edges {
            self.link(source.clone(), target, kind);
        }
        Ok(node)
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Returns the existing point when one lies within tolerance.
    /// Non-finite coordinates are rejected.
    #[instrument(level = "trace", skip_all, fields(id = %point.base.id))]
    pub fn create_point3d(&mut self, point: Point3D) -> Result<Arc<Point3D>> {
        finite_coordinate("x", point.x)?;
        finite_coordinate("y", point.y)?;
        finite_coordinate("z", point.z)?;
        self.insert_or_reuse(point, |_, _, _| {})
    }

    pub fn create_line_segment(&mut self, line: LineSegment) -> Result<Arc<LineSegment>> {
        self.insert_or_reuse(line, |model, line, links| {
            links.required(model, RelationshipType::HasStartPoint, &mut line.start_point);
            links.required(model, RelationshipType::HasEndPoint, &mut line.end_point);
        })
    }

    pub fn create_arc_segment(&mut self, arc: ArcSegment) -> Result<Arc<ArcSegment>> {
        self.insert_or_reuse(arc, |model, arc, links| {
            links.required(model, RelationshipType::HasStartPoint, &mut arc.start_point);
            links.required(model, RelationshipType::HasMidPoint, &mut arc.mid_point);
            links.required(model, RelationshipType::HasEndPoint, &mut arc.end_point);
        })
    }

    // ========================================================================
    // Shared definitions
    // ========================================================================

    pub fn create_material(&mut self, material: Material) -> Result<Arc<Material>> {
        self.insert_or_reuse(material, |_, _, _| {})
    }

    /// Shape parameters are re-validated, so hand-built variants with bad
    /// dimensions are rejected.
    pub fn create_cross_section(&mut self, section: CrossSection) -> Result<Arc<CrossSection>> {
        if let Some(parameters) = &section.parameters {
            parameters.validate()?;
        }
        self.insert_or_reuse(section, |model, section, links| {
            links.optional(model, RelationshipType::HasMaterial, &mut section.material);
        })
    }

    pub fn create_storey(&mut self, storey: Storey) -> Result<Arc<Storey>> {
        self.insert_or_reuse(storey, |_, _, _| {})
    }

    // ========================================================================
    // Structural analysis
    // ========================================================================

    pub fn create_structural_point_connection(
        &mut self,
        connection: StructuralPointConnection,
    ) -> Result<Arc<StructuralPointConnection>> {
        self.insert_or_reuse(connection, |model, conn, links| {
            links.required(model, RelationshipType::HasPoint3D, &mut conn.point);
            links.optional(model, RelationshipType::HasStorey, &mut conn.storey);
        })
    }

    #[instrument(level = "trace", skip_all, fields(id = %member.base.id))]
    pub fn create_structural_curve_member(
        &mut self,
        member: StructuralCurveMember,
    ) -> Result<Arc<StructuralCurveMember>> {
        self.insert_or_reuse(member, |model, member, links| {
            member.segment_positions = normalize_positions(member.segments.len(), &member.segment_positions);
            links.optional(model, RelationshipType::HasMaterial, &mut member.material);
            links.optional(model, RelationshipType::HasCrossSection, &mut member.cross_section);
            links.optional(model, RelationshipType::HasStorey, &mut member.storey);
            links.optional(model, RelationshipType::HasStartNode, &mut member.start_node);
            links.optional(model, RelationshipType::HasEndNode, &mut member.end_node);
            links.segments(model, &mut member.segments);
        })
    }

    pub fn create_structural_surface_member(
        &mut self,
        member: StructuralSurfaceMember,
    ) -> Result<Arc<StructuralSurfaceMember>> {
        self.insert_or_reuse(member, |model, member, links| {
            links.optional(model, RelationshipType::HasMaterial, &mut member.material);
            links.optional(model, RelationshipType::HasStorey, &mut member.storey);
            links.each(model, RelationshipType::HasBoundaryNode, &mut member.boundary_nodes);
        })
    }

    // ========================================================================
    // Building elements
    // ========================================================================

    pub fn create_beam(&mut self, beam: Beam) -> Result<Arc<Beam>> {
        self.insert_or_reuse(beam, |model, beam, links| {
            links.optional(model, RelationshipType::HasMaterial, &mut beam.material);
            links.optional(model, RelationshipType::HasCrossSection, &mut beam.cross_section);
            links.optional(model, RelationshipType::HasStorey, &mut beam.storey);
            links.required(model, RelationshipType::HasStartPoint, &mut beam.start_point);
            links.required(model, RelationshipType::HasEndPoint, &mut beam.end_point);
        })
    }

    pub fn create_column(&mut self, column: Column) -> Result<Arc<Column>> {
        self.insert_or_reuse(column, |model, column, links| {
            links.optional(model, RelationshipType::HasMaterial, &mut column.material);
            links.optional(model, RelationshipType::HasCrossSection, &mut column.cross_section);
            links.optional(model, RelationshipType::HasStorey, &mut column.storey);
            links.required(model, RelationshipType::HasStartPoint, &mut column.start_point);
            links.required(model, RelationshipType::HasEndPoint, &mut column.end_point);
        })
    }

    pub fn create_slab(&mut self, slab: Slab) -> Result<Arc<Slab>> {
        self.insert_or_reuse(slab, |model, slab, links| {
            links.optional(model, RelationshipType::HasMaterial, &mut slab.material);
            links.optional(model, RelationshipType::HasStorey, &mut slab.storey);
            links.each(model, RelationshipType::HasBoundaryPoint, &mut slab.outline);
        })
    }

    pub fn create_wall(&mut self, wall: Wall) -> Result<Arc<Wall>> {
        self.insert_or_reuse(wall, |model, wall, links| {
            links.optional(model, RelationshipType::HasMaterial, &mut wall.material);
            links.optional(model, RelationshipType::HasStorey, &mut wall.storey);
            links.required(model, RelationshipType::HasStartPoint, &mut wall.start_point);
            links.required(model, RelationshipType::HasEndPoint, &mut wall.end_point);
        })
    }
}
