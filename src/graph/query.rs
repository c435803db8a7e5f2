//! Whole-graph lookups: shared geometry and coincident lines.

use std::sync::Arc;

use super::Model;
use crate::model::*;

impl Model {
    /// The point a connection is attached to through its `HasPoint3D` edge.
    pub fn point_of_connection(&self, connection: &Arc<StructuralPointConnection>) -> Option<Arc<Point3D>> {
        let source = Entity::from(connection.clone());
        self.relationships
            .iter()
            .filter(|r| r.relationship_type == RelationshipType::HasPoint3D)
            .find(|r| r.source.ptr_eq(&source))
            .and_then(|r| r.target.downcast::<Point3D>().cloned())
    }

    /// Id of another point connection sitting on a tolerance-equal point.
    ///
    /// `None` when the input has no `HasPoint3D` edge or nothing matches.
    pub fn find_matching_point_connection_by_point3d(
        &self,
        connection: &Arc<StructuralPointConnection>,
    ) -> Option<String> {
        let point = self.point_of_connection(connection)?;
        let tolerance = self.tolerance();
        self.relationships
            .iter()
            .filter(|r| r.relationship_type == RelationshipType::HasPoint3D)
            .filter_map(|r| {
                let other = r.source.downcast::<StructuralPointConnection>()?;
                let target = r.target.downcast::<Point3D>()?;
                Some((other, target))
            })
            .find(|(other, target)| !Arc::ptr_eq(other, connection) && target.coincides_with(&point, tolerance))
            .map(|(other, _)| other.id().to_string())
    }

    /// Other line segments with the same endpoints in either order.
    pub fn find_coincident_lines(&self, line: Option<&Arc<LineSegment>>) -> Vec<Arc<LineSegment>> {
        let tolerance = self.tolerance();
        self.other_lines(line, |a, b| a.is_coincident(b, tolerance))
    }

    /// Other line segments with the same start and end points.
    pub fn find_directionally_equal_lines(&self, line: Option<&Arc<LineSegment>>) -> Vec<Arc<LineSegment>> {
        let tolerance = self.tolerance();
        self.other_lines(line, |a, b| a.is_directionally_equal(b, tolerance))
    }

    fn other_lines(
        &self,
        line: Option<&Arc<LineSegment>>,
        matches: impl Fn(&LineSegment, &LineSegment) -> bool,
    ) -> Vec<Arc<LineSegment>> {
        let Some(line) = line else {
            return Vec::new();
        };
        self.iter_of_type::<LineSegment>()
            .filter(|other| !Arc::ptr_eq(other, line) && matches(line, other))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(model: &mut Model, id: &str, a: [f64; 3], b: [f64; 3]) -> Arc<LineSegment> {
        let p = model.create_point3d(Point3D::new(format!("{id}-a"), a[0], a[1], a[2])).unwrap();
        let q = model.create_point3d(Point3D::new(format!("{id}-b"), b[0], b[1], b[2])).unwrap();
        model.create_line_segment(LineSegment::new(id, id, p, q)).unwrap()
    }

    #[test]
    fn test_reversed_line_is_coincident_not_directional() {
        let mut model = Model::new();
        let l1 = line(&mut model, "l1", [0.0; 3], [10.0; 3]);
        let l2 = line(&mut model, "l2", [10.0; 3], [0.0; 3]);
        let coincident = model.find_coincident_lines(Some(&l1));
        assert_eq!(coincident.len(), 1);
        assert!(Arc::ptr_eq(&coincident[0], &l2));
        assert!(model.find_directionally_equal_lines(Some(&l1)).is_empty());
    }

    #[test]
    fn test_same_direction_line_matches_both() {
        let mut model = Model::new();
        let l1 = line(&mut model, "l1", [0.0; 3], [5.0, 0.0, 0.0]);
        line(&mut model, "l2", [0.0; 3], [5.0, 0.0, 0.0]);
        line(&mut model, "l3", [0.0; 3], [6.0, 0.0, 0.0]);
        assert_eq!(model.find_coincident_lines(Some(&l1)).len(), 1);
        assert_eq!(model.find_directionally_equal_lines(Some(&l1)).len(), 1);
    }

    #[test]
    fn test_none_input_is_empty() {
        let model = Model::new();
        assert!(model.find_coincident_lines(None).is_empty());
        assert!(model.find_directionally_equal_lines(None).is_empty());
    }

    #[test]
    fn test_matching_point_connection() {
        let mut model = Model::new();
        let p = model.create_point3d(Point3D::new("p1", 2.0, 3.0, 0.0)).unwrap();
        let n1 = model
            .create_structural_point_connection(StructuralPointConnection::new("n1", "N1", p.clone()))
            .unwrap();
        assert_eq!(model.find_matching_point_connection_by_point3d(&n1), None);

        let same_spot = Arc::new(Point3D::new("p2", 2.0, 3.0, 0.0));
        let n2 = model
            .create_structural_point_connection(StructuralPointConnection::new("n2", "N2", same_spot))
            .unwrap();
        assert_eq!(model.find_matching_point_connection_by_point3d(&n1).as_deref(), Some("n2"));
        assert_eq!(model.find_matching_point_connection_by_point3d(&n2).as_deref(), Some("n1"));
    }

    #[test]
    fn test_matching_connection_on_distinct_point_instance() {
        let mut model = Model::new();
        // raw adds skip dedup, so both points stay as separate instances
        let p1 = model.add_entity(Point3D::new("p1", 4.0, 4.0, 0.0));
        let p2 = model.add_entity(Point3D::new("p2", 4.0, 4.0, 5e-11));
        let p1 = p1.downcast::<Point3D>().unwrap().clone();
        let p2 = p2.downcast::<Point3D>().unwrap().clone();
        assert!(!Arc::ptr_eq(&p1, &p2));

        let n1 = model
            .create_structural_point_connection(StructuralPointConnection::new("n1", "N1", p1))
            .unwrap();
        let n2 = model
            .create_structural_point_connection(StructuralPointConnection::new("n2", "N2", p2.clone()))
            .unwrap();
        assert!(Arc::ptr_eq(&n2.point, &p2));
        assert!(!Arc::ptr_eq(&n1.point, &n2.point));
        assert_eq!(model.find_matching_point_connection_by_point3d(&n1).as_deref(), Some("n2"));
        assert_eq!(model.find_matching_point_connection_by_point3d(&n2).as_deref(), Some("n1"));

        let far = model.add_entity(Point3D::new("p3", 4.0, 4.0, 1e-9));
        let far = far.downcast::<Point3D>().unwrap().clone();
        let n3 = model
            .create_structural_point_connection(StructuralPointConnection::new("n3", "N3", far))
            .unwrap();
        assert_eq!(model.find_matching_point_connection_by_point3d(&n3), None);
    }

    #[test]
    fn test_connection_without_point_edge() {
        let mut model = Model::new();
        let p = Arc::new(Point3D::new("p1", 0.0, 0.0, 0.0));
        let loose = model.add_entity(StructuralPointConnection::new("n1", "N1", p));
        let loose = loose.downcast::<StructuralPointConnection>().unwrap().clone();
        assert_eq!(model.find_matching_point_connection_by_point3d(&loose), None);
    }
}
