//! Domain enumerations and their serialization tags.
//!
//! Every enum implements [`EnumTag`]: a static `match` table from variant to
//! the string written into JSON. Variants without a registered tag fall back
//! to their variant name.

/// Variant → serialization string lookup.
pub trait EnumTag {
    /// The Rust variant name, used when no tag is registered.
    fn variant_name(&self) -> &'static str;

    /// The registered serialization tag, if any.
    fn serialization_tag(&self) -> Option<&'static str>;

    /// Tag if registered, else the variant name.
    fn tag(&self) -> &'static str {
        self.serialization_tag().unwrap_or_else(|| self.variant_name())
    }
}

/// Material family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialType {
    #[default]
    Steel,
    Concrete,
    Timber,
    Aluminium,
    Masonry,
    Reinforcement,
    Other,
}

impl EnumTag for MaterialType {
    fn variant_name(&self) -> &'static str {
        match self {
            MaterialType::Steel => "Steel",
            MaterialType::Concrete => "Concrete",
            MaterialType::Timber => "Timber",
            MaterialType::Aluminium => "Aluminium",
            MaterialType::Masonry => "Masonry",
            MaterialType::Reinforcement => "Reinforcement",
            MaterialType::Other => "Other",
        }
    }

    fn serialization_tag(&self) -> Option<&'static str> {
        match self {
            MaterialType::Steel => Some("steel"),
            MaterialType::Concrete => Some("concrete"),
            MaterialType::Timber => Some("timber"),
            MaterialType::Aluminium => Some("aluminium"),
            MaterialType::Masonry => Some("masonry"),
            MaterialType::Reinforcement => Some("rebar"),
            MaterialType::Other => None,
        }
    }
}

/// Cross-section shape family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangular,
    Circular,
    ISection,
    RectangularHollow,
    CircularHollow,
    Custom,
}

impl EnumTag for ShapeKind {
    fn variant_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangular => "Rectangular",
            ShapeKind::Circular => "Circular",
            ShapeKind::ISection => "ISection",
            ShapeKind::RectangularHollow => "RectangularHollow",
            ShapeKind::CircularHollow => "CircularHollow",
            ShapeKind::Custom => "Custom",
        }
    }

    fn serialization_tag(&self) -> Option<&'static str> {
        match self {
            ShapeKind::Rectangular => Some("rectangular"),
            ShapeKind::Circular => Some("circular"),
            ShapeKind::ISection => Some("i-section"),
            ShapeKind::RectangularHollow => Some("rectangular-hollow"),
            ShapeKind::CircularHollow => Some("circular-hollow"),
            ShapeKind::Custom => None,
        }
    }
}

/// Analytical role of a curve (1D) member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurveMemberType {
    #[default]
    Beam,
    Column,
    Brace,
    Rib,
    Other,
}

impl EnumTag for CurveMemberType {
    fn variant_name(&self) -> &'static str {
        match self {
            CurveMemberType::Beam => "Beam",
            CurveMemberType::Column => "Column",
            CurveMemberType::Brace => "Brace",
            CurveMemberType::Rib => "Rib",
            CurveMemberType::Other => "Other",
        }
    }

    fn serialization_tag(&self) -> Option<&'static str> {
        match self {
            CurveMemberType::Beam => Some("beam"),
            CurveMemberType::Column => Some("column"),
            CurveMemberType::Brace => Some("brace"),
            CurveMemberType::Rib => Some("rib"),
            CurveMemberType::Other => None,
        }
    }
}

/// Analytical role of a surface (2D) member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceMemberType {
    #[default]
    Slab,
    Wall,
    Plate,
    Shell,
    Other,
}

impl EnumTag for SurfaceMemberType {
    fn variant_name(&self) -> &'static str {
        match self {
            SurfaceMemberType::Slab => "Slab",
            SurfaceMemberType::Wall => "Wall",
            SurfaceMemberType::Plate => "Plate",
            SurfaceMemberType::Shell => "Shell",
            SurfaceMemberType::Other => "Other",
        }
    }

    fn serialization_tag(&self) -> Option<&'static str> {
        match self {
            SurfaceMemberType::Slab => Some("slab"),
            SurfaceMemberType::Wall => Some("wall"),
            SurfaceMemberType::Plate => Some("plate"),
            SurfaceMemberType::Shell => Some("shell"),
            SurfaceMemberType::Other => None,
        }
    }
}
