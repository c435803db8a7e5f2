//! # Structural Graph Model
//!
//! DTOs for nodes, edges and their projected records. These types are
//! shared by the graph container, the manager and the exporter.
//!
//! Design rule: this module is pure data. No I/O, no model state.

pub mod value;
pub mod record;
pub mod identity;
pub mod enums;
pub mod parameters;
pub mod entity;
pub mod geometry;
pub mod elements;
pub mod relationship;

pub use value::Value;
pub use record::{Record, ToRecord};
pub use identity::{points_equal, native_id_equals, coordinates_equal, DedupKey, DEFAULT_TOLERANCE};
pub use enums::{EnumTag, MaterialType, ShapeKind, CurveMemberType, SurfaceMemberType};
pub use parameters::{SectionParameters, ShapeParameters};
pub use entity::{Entity, EntityBase, EntityKind};
pub use geometry::{Point3D, LineSegment, ArcSegment, Segment};
pub use elements::{
    Material, CrossSection, Storey,
    StructuralPointConnection, StructuralCurveMember, StructuralSurfaceMember,
    Beam, Column, Slab, Wall,
};
pub use relationship::{Relationship, RelationshipType};
