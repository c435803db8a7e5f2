//! Identity and equality primitives used by deduplication and queries.

use super::Point3D;

/// Default componentwise coordinate tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Tolerance-aware point comparison. Absent operands never compare equal.
pub fn points_equal(p1: Option<&Point3D>, p2: Option<&Point3D>, tolerance: f64) -> bool {
    match (p1, p2) {
        (Some(a), Some(b)) => coordinates_equal(a.coordinates(), b.coordinates(), tolerance),
        _ => false,
    }
}

/// `|Δx| < tol ∧ |Δy| < tol ∧ |Δz| < tol`
pub fn coordinates_equal(a: [f64; 3], b: [f64; 3], tolerance: f64) -> bool {
    a.iter().zip(b.iter()).all(|(u, v)| (u - v).abs() < tolerance)
}

/// Case-sensitive native id comparison.
///
/// Absent or empty ids never match anything, including another empty id.
pub fn native_id_equals(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a == b,
        _ => false,
    }
}

/// The key a factory uses to decide whether a node already exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DedupKey<'a> {
    NativeId(Option<&'a str>),
    Coordinates([f64; 3]),
}

impl DedupKey<'_> {
    pub fn matches(&self, other: &DedupKey<'_>, tolerance: f64) -> bool {
        match (self, other) {
            (DedupKey::NativeId(a), DedupKey::NativeId(b)) => native_id_equals(*a, *b),
            (DedupKey::Coordinates(a), DedupKey::Coordinates(b)) => coordinates_equal(*a, *b, tolerance),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_absent_point_never_equal() {
        let p = Point3D::new("p", 0.0, 0.0, 0.0);
        assert!(!points_equal(Some(&p), None, DEFAULT_TOLERANCE));
        assert!(!points_equal(None, None, DEFAULT_TOLERANCE));
        assert!(points_equal(Some(&p), Some(&p), DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_tolerance_is_strict() {
        assert!(coordinates_equal([0.0; 3], [0.5e-10, 0.0, 0.0], DEFAULT_TOLERANCE));
        assert!(!coordinates_equal([0.0; 3], [0.0, 2e-10, 0.0], DEFAULT_TOLERANCE));
        assert!(!coordinates_equal([0.0; 3], [0.0, 0.0, 1.0], 1.0));
    }

    #[test]
    fn test_native_id_equals() {
        assert!(native_id_equals(Some("STEEL-A"), Some("STEEL-A")));
        assert!(!native_id_equals(Some("STEEL-A"), Some("steel-a")));
        assert!(!native_id_equals(Some(""), Some("")));
        assert!(!native_id_equals(None, None));
        assert!(!native_id_equals(Some("X"), None));
    }

    #[test]
    fn test_mixed_keys_never_match() {
        let a = DedupKey::NativeId(Some("A"));
        let b = DedupKey::Coordinates([0.0; 3]);
        assert!(!a.matches(&b, 1.0));
    }

    proptest! {
        #[test]
        fn prop_point_equal_to_itself(x in -1e6f64..1e6, y in -1e6f64..1e6, z in -1e6f64..1e6) {
            let p = Point3D::new("p", x, y, z);
            let q = Point3D::new("q", x, y, z);
            prop_assert!(points_equal(Some(&p), Some(&q), DEFAULT_TOLERANCE));
        }

        #[test]
        fn prop_native_id_reflexive_unless_empty(s in ".{0,12}") {
            prop_assert_eq!(native_id_equals(Some(&s), Some(&s)), !s.is_empty());
        }
    }
}
