//! Geometry nodes: points and the segments built from them.

use std::sync::Arc;

use super::{EntityBase, EntityKind, Entity, Record, ToRecord};
use super::identity::coordinates_equal;

/// A point in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct Point3D {
    pub base: EntityBase,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// New point named after its kind; use `with_name` to override.
    pub fn new(id: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            base: EntityBase::new(id, Self::ENTITY_TYPE),
            x,
            y,
            z,
        }
    }

    pub fn coordinates(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn coincides_with(&self, other: &Point3D, tolerance: f64) -> bool {
        coordinates_equal(self.coordinates(), other.coordinates(), tolerance)
    }

    pub fn distance_to(&self, other: &Point3D) -> f64 {
        let [dx, dy, dz] = [other.x - self.x, other.y - self.y, other.z - self.z];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl ToRecord for Point3D {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.field("X", self.x).field("Y", self.y).field("Z", self.z);
        r
    }
}

/// Straight segment between two points.
#[derive(Debug, Clone)]
pub struct LineSegment {
    pub base: EntityBase,
    pub start_point: Arc<Point3D>,
    pub end_point: Arc<Point3D>,
}

impl LineSegment {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_point: Arc<Point3D>,
        end_point: Arc<Point3D>,
    ) -> Self {
        Self { base: EntityBase::new(id, name), start_point, end_point }
    }

    pub fn length(&self) -> f64 {
        self.start_point.distance_to(&self.end_point)
    }

    /// Same endpoints in the same order.
    pub fn is_directionally_equal(&self, other: &LineSegment, tolerance: f64) -> bool {
        self.start_point.coincides_with(&other.start_point, tolerance)
            && self.end_point.coincides_with(&other.end_point, tolerance)
    }

    /// Same endpoints in either order.
    pub fn is_coincident(&self, other: &LineSegment, tolerance: f64) -> bool {
        self.is_directionally_equal(other, tolerance)
            || (self.start_point.coincides_with(&other.end_point, tolerance)
                && self.end_point.coincides_with(&other.start_point, tolerance))
    }
}

impl ToRecord for LineSegment {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.reference("StartPoint", Some(self.start_point.id()))
            .reference("EndPoint", Some(self.end_point.id()));
        r
    }
}

/// Circular arc through three points.
#[derive(Debug, Clone)]
pub struct ArcSegment {
    pub base: EntityBase,
    pub start_point: Arc<Point3D>,
    pub mid_point: Arc<Point3D>,
    pub end_point: Arc<Point3D>,
}

impl ArcSegment {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_point: Arc<Point3D>,
        mid_point: Arc<Point3D>,
        end_point: Arc<Point3D>,
    ) -> Self {
        Self { base: EntityBase::new(id, name), start_point, mid_point, end_point }
    }
}

impl ToRecord for ArcSegment {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.reference("StartPoint", Some(self.start_point.id()))
            .reference("MidPoint", Some(self.mid_point.id()))
            .reference("EndPoint", Some(self.end_point.id()));
        r
    }
}

/// A segment of a curve member's geometry.
#[derive(Debug, Clone)]
pub enum Segment {
    Line(Arc<LineSegment>),
    Arc(Arc<ArcSegment>),
}

impl Segment {
    pub fn id(&self) -> &str {
        match self {
            Segment::Line(s) => s.id(),
            Segment::Arc(s) => s.id(),
        }
    }

    pub fn to_entity(&self) -> Entity {
        match self {
            Segment::Line(s) => Entity::from(s.clone()),
            Segment::Arc(s) => Entity::from(s.clone()),
        }
    }
}

impl From<Arc<LineSegment>> for Segment {
    fn from(s: Arc<LineSegment>) -> Self { Segment::Line(s) }
}

impl From<Arc<ArcSegment>> for Segment {
    fn from(s: Arc<ArcSegment>) -> Self { Segment::Arc(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_TOLERANCE;
    use pretty_assertions::assert_eq;

    fn pt(id: &str, x: f64, y: f64, z: f64) -> Arc<Point3D> {
        Arc::new(Point3D::new(id, x, y, z))
    }

    #[test]
    fn test_point_record_order() {
        let p = Point3D::new("pt-1", 1.0, 2.0, 3.0).with_native_id("N-1");
        let keys: Vec<String> = p.to_record().keys().map(str::to_string).collect();
        assert_eq!(keys, vec!["Id", "Name", "NativeId", "EntityType", "X", "Y", "Z"]);
    }

    #[test]
    fn test_line_coincidence() {
        let a = LineSegment::new("l1", "L1", pt("a", 0.0, 0.0, 0.0), pt("b", 10.0, 10.0, 10.0));
        let b = LineSegment::new("l2", "L2", pt("c", 10.0, 10.0, 10.0), pt("d", 0.0, 0.0, 0.0));
        assert!(a.is_coincident(&b, DEFAULT_TOLERANCE));
        assert!(!a.is_directionally_equal(&b, DEFAULT_TOLERANCE));
        assert!((a.length() - 300f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_segment_record_flattens_points() {
        let arc = ArcSegment::new("a1", "Arc", pt("s", 0.0, 0.0, 0.0), pt("m", 1.0, 1.0, 0.0), pt("e", 2.0, 0.0, 0.0));
        let r = arc.to_record();
        assert_eq!(r.get("StartPoint").and_then(|v| v.as_str()), Some("s"));
        assert_eq!(r.get("MidPoint").and_then(|v| v.as_str()), Some("m"));
        assert_eq!(r.get("EntityType").and_then(|v| v.as_str()), Some("ArcSegment"));
    }
}
