//! End-to-end tests for the create-or-reuse factories.
//!
//! Each test builds a model through the public factory surface and checks
//! the resulting entity and relationship lists.

use std::sync::Arc;

use proptest::prelude::*;
use structgraph::{
    Beam, Column, CrossSection, CurveMemberType, EntityKind, LineSegment, ArcSegment, Material,
    MaterialType, Model, Point3D, Relationship, RelationshipType, SectionParameters, Slab, Storey,
    StructuralCurveMember, StructuralPointConnection, StructuralSurfaceMember, SurfaceMemberType,
    Wall,
};

// ============================================================================
// Helpers
// ============================================================================

fn edges_from<'a>(model: &'a Model, source_id: &str) -> Vec<&'a Relationship> {
    model.relationships().iter().filter(|r| r.source.id() == source_id).collect()
}

fn count_of(edges: &[&Relationship], kind: RelationshipType) -> usize {
    edges.iter().filter(|r| r.relationship_type == kind).count()
}

struct Frame {
    material: Arc<Material>,
    section: Arc<CrossSection>,
    storey: Arc<Storey>,
    n1: Arc<StructuralPointConnection>,
    n2: Arc<StructuralPointConnection>,
    line: Arc<LineSegment>,
}

fn frame(model: &mut Model) -> Frame {
    let material = model
        .create_material(Material::new("m1", "S355", MaterialType::Steel).with_native_id("STEEL-S355"))
        .unwrap();
    let section = model
        .create_cross_section(
            CrossSection::from_parameters(
                "cs1",
                "IPE300",
                SectionParameters::i_section(300.0, 150.0, 7.1, 10.7, 15.0).unwrap(),
            )
            .with_native_id("IPE300")
            .with_material(material.clone()),
        )
        .unwrap();
    let storey = model
        .create_storey(Storey::new("s1", "Level 1", 3.5).with_native_id("L1"))
        .unwrap();
    let p1 = model.create_point3d(Point3D::new("p1", 0.0, 0.0, 3.5)).unwrap();
    let p2 = model.create_point3d(Point3D::new("p2", 6.0, 0.0, 3.5)).unwrap();
    let n1 = model
        .create_structural_point_connection(StructuralPointConnection::new("n1", "N1", p1.clone()))
        .unwrap();
    let n2 = model
        .create_structural_point_connection(StructuralPointConnection::new("n2", "N2", p2.clone()))
        .unwrap();
    let line = model.create_line_segment(LineSegment::new("l1", "Axis", p1, p2)).unwrap();
    Frame { material, section, storey, n1, n2, line }
}

// ============================================================================
// 1. Points
// ============================================================================

#[test]
fn test_point_scenario() {
    let mut model = Model::new();
    let p1 = model.create_point3d(Point3D::new("pt-1", 1.0, 2.0, 3.0)).unwrap();
    let p2 = model.create_point3d(Point3D::new("pt-2", 1.0, 2.0, 3.0)).unwrap();
    assert!(Arc::ptr_eq(&p1, &p2));
    assert_eq!(model.entity_count(), 1);

    model
        .create_material(Material::new("m1", "Steel", MaterialType::Steel).with_native_id("STEEL-A"))
        .unwrap();
    model
        .create_material(Material::new("m2", "Steel", MaterialType::Steel).with_native_id("steel-a"))
        .unwrap();
    assert_eq!(model.entity_count(), 3);
    assert_eq!(model.entities_of_type::<Material>().len(), 2);
}

proptest! {
    #[test]
    fn prop_point_creation_is_idempotent(
        x in -1e4f64..1e4,
        y in -1e4f64..1e4,
        z in -1e4f64..1e4,
        jitter in -5e-11f64..5e-11,
    ) {
        let mut model = Model::new();
        let a = model.create_point3d(Point3D::new("a", x, y, z)).unwrap();
        let b = model.create_point3d(Point3D::new("b", x + jitter, y, z - jitter)).unwrap();
        prop_assert!(Arc::ptr_eq(&a, &b));
        prop_assert_eq!(model.entity_count(), 1);
    }

    #[test]
    fn prop_native_id_reuse(native in "[A-Za-z0-9-]{1,16}") {
        let mut model = Model::new();
        let a = model.create_storey(Storey::new("s1", "L", 0.0).with_native_id(native.clone())).unwrap();
        let b = model.create_storey(Storey::new("s2", "L", 9.0).with_native_id(native)).unwrap();
        prop_assert!(Arc::ptr_eq(&a, &b));
        prop_assert_eq!(model.entity_count(), 1);
    }

    #[test]
    fn prop_empty_native_id_always_inserts(n in 2usize..8) {
        let mut model = Model::new();
        for i in 0..n {
            model.create_material(Material::new(format!("m{i}"), "X", MaterialType::Timber).with_native_id("")).unwrap();
        }
        prop_assert_eq!(model.entity_count(), n);
    }
}

// ============================================================================
// 2. Curve members
// ============================================================================

#[test]
fn test_curve_member_relationship_completeness() {
    let mut model = Model::new();
    let f = frame(&mut model);
    let before = model.relationship_count();

    let member = model
        .create_structural_curve_member(
            StructuralCurveMember::new("cm1", "B1", CurveMemberType::Beam)
                .with_material(f.material.clone())
                .with_cross_section(f.section.clone())
                .with_storey(f.storey.clone())
                .with_nodes(f.n1.clone(), f.n2.clone())
                .with_segment(f.line.clone(), 0.0),
        )
        .unwrap();

    let edges = edges_from(&model, member.id());
    assert_eq!(model.relationship_count() - before, 6);
    assert_eq!(count_of(&edges, RelationshipType::HasMaterial), 1);
    assert_eq!(count_of(&edges, RelationshipType::HasCrossSection), 1);
    assert_eq!(count_of(&edges, RelationshipType::HasStorey), 1);
    assert_eq!(count_of(&edges, RelationshipType::HasStartNode), 1);
    assert_eq!(count_of(&edges, RelationshipType::HasEndNode), 1);
    assert_eq!(count_of(&edges, RelationshipType::HasSegment), 1);
}

#[test]
fn test_curve_member_targets_existing_nodes() {
    let mut model = Model::new();
    let f = frame(&mut model);
    let copy_of_material = Arc::new(
        Material::new("m-copy", "S355 copy", MaterialType::Steel).with_native_id("STEEL-S355"),
    );

    let member = model
        .create_structural_curve_member(
            StructuralCurveMember::new("cm1", "B1", CurveMemberType::Beam).with_material(copy_of_material),
        )
        .unwrap();

    assert!(Arc::ptr_eq(member.material.as_ref().unwrap(), &f.material));
    let rel = edges_from(&model, "cm1")[0];
    assert_eq!(rel.target.id(), "m1");
}

#[test]
fn test_curve_member_positions_normalized() {
    let mut model = Model::new();
    let f = frame(&mut model);
    let p3 = model.create_point3d(Point3D::new("p3", 12.0, 0.0, 3.5)).unwrap();
    let p_mid = model.create_point3d(Point3D::new("pm", 9.0, 1.0, 3.5)).unwrap();
    let arc = model
        .create_arc_segment(ArcSegment::new("a1", "Arc", f.line.end_point.clone(), p_mid, p3))
        .unwrap();

    let member = model
        .create_structural_curve_member(
            StructuralCurveMember::new("cm1", "B1", CurveMemberType::Beam)
                .with_segment(f.line.clone(), -3.0)
                .with_segment(arc, 0.5),
        )
        .unwrap();
    assert_eq!(member.segment_positions, vec![0.0, 0.5]);
    assert_eq!(count_of(&edges_from(&model, "cm1"), RelationshipType::HasSegment), 2);
}

#[test]
fn test_curve_member_native_id_reuse() {
    let mut model = Model::new();
    let f = frame(&mut model);
    let a = model
        .create_structural_curve_member(
            StructuralCurveMember::new("cm1", "B1", CurveMemberType::Beam)
                .with_native_id("MEMBER-1")
                .with_material(f.material.clone()),
        )
        .unwrap();
    let edges = model.relationship_count();
    let b = model
        .create_structural_curve_member(
            StructuralCurveMember::new("cm2", "B2", CurveMemberType::Column).with_native_id("MEMBER-1"),
        )
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(b.member_type, CurveMemberType::Beam);
    assert_eq!(model.relationship_count(), edges);
}

// ============================================================================
// 3. Surface members and building elements
// ============================================================================

#[test]
fn test_surface_member_boundary_edges() {
    let mut model = Model::new();
    let f = frame(&mut model);
    let p3 = model.create_point3d(Point3D::new("p3", 6.0, 6.0, 3.5)).unwrap();
    let n3 = model
        .create_structural_point_connection(StructuralPointConnection::new("n3", "N3", p3))
        .unwrap();

    model
        .create_structural_surface_member(
            StructuralSurfaceMember::new("sm1", "Slab", SurfaceMemberType::Slab, 0.2)
                .with_material(f.material.clone())
                .with_storey(f.storey.clone())
                .with_boundary_nodes(vec![f.n1.clone(), f.n2.clone(), n3]),
        )
        .unwrap();

    let edges = edges_from(&model, "sm1");
    assert_eq!(count_of(&edges, RelationshipType::HasBoundaryNode), 3);
    assert_eq!(count_of(&edges, RelationshipType::HasMaterial), 1);
    assert_eq!(count_of(&edges, RelationshipType::HasStorey), 1);
}

#[test]
fn test_beam_column_slab_wall() {
    let mut model = Model::new();
    let f = frame(&mut model);
    let base = model.create_point3d(Point3D::new("b0", 0.0, 0.0, 0.0)).unwrap();
    let top = model.create_point3d(Point3D::new("b1", 0.0, 0.0, 3.5)).unwrap();

    let beam = model
        .create_beam(
            Beam::new("beam-1", "Beam 1", f.line.start_point.clone(), f.line.end_point.clone())
                .with_material(f.material.clone())
                .with_cross_section(f.section.clone())
                .with_storey(f.storey.clone()),
        )
        .unwrap();
    assert_eq!(edges_from(&model, "beam-1").len(), 5);
    assert!((beam.length() - 6.0).abs() < 1e-12);

    let column = model
        .create_column(Column::new("col-1", "Column 1", base.clone(), top.clone()).with_cross_section(f.section.clone()))
        .unwrap();
    assert_eq!(edges_from(&model, "col-1").len(), 3);
    assert!((column.height() - 3.5).abs() < 1e-12);

    model
        .create_slab(
            Slab::new("slab-1", "Slab 1", 0.25)
                .with_storey(f.storey.clone())
                .with_outline(vec![base.clone(), f.line.start_point.clone(), f.line.end_point.clone()]),
        )
        .unwrap();
    assert_eq!(count_of(&edges_from(&model, "slab-1"), RelationshipType::HasBoundaryPoint), 3);

    model
        .create_wall(Wall::new("wall-1", "Wall 1", base, top, 0.3, 3.5).with_material(f.material.clone()))
        .unwrap();
    assert_eq!(edges_from(&model, "wall-1").len(), 3);

    assert_eq!(model.entities_of_type::<Beam>().len(), 1);
    assert_eq!(model.entity_by_id::<Wall>("wall-1").map(|w| w.thickness), Some(0.3));
}

#[test]
fn test_unpersisted_references_skipped() {
    let mut model = Model::new();
    let p1 = model.create_point3d(Point3D::new("p1", 0.0, 0.0, 0.0)).unwrap();
    let p2 = model.create_point3d(Point3D::new("p2", 4.0, 0.0, 0.0)).unwrap();
    let ghost_material = Arc::new(Material::new("ghost", "Ghost", MaterialType::Other));
    let ghost_storey = Arc::new(Storey::new("ghost-storey", "Ghost", 0.0).with_native_id("NOT-IN-MODEL"));

    model
        .create_beam(
            Beam::new("beam-1", "Beam", p1, p2)
                .with_material(ghost_material)
                .with_storey(ghost_storey),
        )
        .unwrap();

    let edges = edges_from(&model, "beam-1");
    assert_eq!(edges.len(), 2);
    assert_eq!(count_of(&edges, RelationshipType::HasMaterial), 0);
    assert_eq!(count_of(&edges, RelationshipType::HasStorey), 0);
}

// ============================================================================
// 4. Orphans and raw adds
// ============================================================================

#[test]
fn test_orphan_relationship_appears() {
    let mut model = Model::new();
    let a = Arc::new(Storey::new("s-x", "Nowhere", 0.0));
    let b = Arc::new(Material::new("m-x", "Nothing", MaterialType::Other));
    model.add_relationship(Relationship::new("r1", RelationshipType::Associated, a, b));
    assert_eq!(model.relationship_count(), 1);
    assert_eq!(model.relationships()[0].id, "r1");
    assert_eq!(model.entity_count(), 0);
}

#[test]
fn test_parallel_edges_allowed() {
    let mut model = Model::new();
    let s = model.add_entity(Storey::new("s1", "L1", 0.0));
    let m = model.add_entity(Material::new("m1", "C25", MaterialType::Concrete));
    model.link(s.clone(), m.clone(), RelationshipType::Associated);
    model.link(s, m, RelationshipType::Associated);
    assert_eq!(model.relationships_of_type(RelationshipType::Associated).len(), 2);
}
