//! # structgraph-rs: Structural Building-Element Graph
//!
//! A directed, typed, attributed graph of structural and physical building
//! elements (materials, cross-sections, members, geometry, storeys) with a
//! stable `{nodes, edges}` JSON export for BIM / structural-analysis interchange.
//!
//! ## Design Principles
//!
//! 1. **Create-or-reuse**: factories deduplicate points by coordinate tolerance
//!    and every other kind by native id, first writer wins
//! 2. **Shared DTOs**: entities are immutable `Arc`s, so "same node" is pointer identity
//! 3. **Edges never own**: relationships hold references; orphans are legal
//! 4. **Ordered projection**: every type writes its JSON fields in a fixed order
//!
//! ## Quick Start
//!
//! ```rust
//! use structgraph::{Model, Point3D, Material, MaterialType};
//!
//! # fn example() -> structgraph::Result<()> {
//! let mut model = Model::new();
//!
//! let p1 = model.create_point3d(Point3D::new("pt-1", 1.0, 2.0, 3.0))?;
//! let p2 = model.create_point3d(Point3D::new("pt-2", 1.0, 2.0, 3.0))?;
//! assert!(std::sync::Arc::ptr_eq(&p1, &p2));
//!
//! model.create_material(
//!     Material::new("m1", "S355", MaterialType::Steel).with_native_id("STEEL-A"),
//! )?;
//!
//! let json = structgraph::export::build_json(&model)?;
//! assert!(json.contains("\"nodes\""));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod manager;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Entity, EntityBase, EntityKind, Value, Record, ToRecord, EnumTag,
    Point3D, LineSegment, ArcSegment, Segment,
    Material, CrossSection, Storey,
    StructuralPointConnection, StructuralCurveMember, StructuralSurfaceMember,
    Beam, Column, Slab, Wall,
    Relationship, RelationshipType,
    MaterialType, ShapeKind, CurveMemberType, SurfaceMemberType,
    SectionParameters, ShapeParameters,
    points_equal, native_id_equals, DEFAULT_TOLERANCE,
};

// ============================================================================
// Re-exports: Graph + Manager
// ============================================================================

pub use graph::{Model, ModelConfig, ModelStats};
pub use manager::{ModelManager, SharedManager};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument `{parameter}`: {reason}")]
    InvalidArgument { parameter: &'static str, reason: String },

    #[error("Model index {index} out of range (model count: {count})")]
    ModelIndexOutOfRange { index: usize, count: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument { parameter, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
