//! Building and structural-analysis nodes.
//!
//! All of these are plain data with builder methods. References to other
//! nodes are `Arc`s; the model factories swap them for the instances already
//! stored in the model when they resolve.

use std::sync::Arc;

use super::{
    CurveMemberType, EntityBase, EntityKind, MaterialType, Point3D, Record, Segment,
    SectionParameters, ShapeKind, SurfaceMemberType, ToRecord, Value,
};

fn id_of<T: EntityKind>(reference: &Option<Arc<T>>) -> Option<&str> {
    reference.as_deref().map(|e| e.id())
}

// ============================================================================
// Material
// ============================================================================

#[derive(Debug, Clone)]
pub struct Material {
    pub base: EntityBase,
    pub material_type: MaterialType,
    pub grade: Option<String>,
    /// kg/m³
    pub density: Option<f64>,
    pub elastic_modulus: Option<f64>,
    pub shear_modulus: Option<f64>,
    pub poisson_ratio: Option<f64>,
    pub thermal_expansion: Option<f64>,
    pub yield_strength: Option<f64>,
    /// Free-form vendor properties.
    pub properties: Option<Record>,
}

impl Material {
    pub fn new(id: impl Into<String>, name: impl Into<String>, material_type: MaterialType) -> Self {
        Self {
            base: EntityBase::new(id, name),
            material_type,
            grade: None,
            density: None,
            elastic_modulus: None,
            shear_modulus: None,
            poisson_ratio: None,
            thermal_expansion: None,
            yield_strength: None,
            properties: None,
        }
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_elastic_modulus(mut self, e: f64) -> Self {
        self.elastic_modulus = Some(e);
        self
    }

    pub fn with_shear_modulus(mut self, g: f64) -> Self {
        self.shear_modulus = Some(g);
        self
    }

    pub fn with_poisson_ratio(mut self, nu: f64) -> Self {
        self.poisson_ratio = Some(nu);
        self
    }

    pub fn with_thermal_expansion(mut self, alpha: f64) -> Self {
        self.thermal_expansion = Some(alpha);
        self
    }

    pub fn with_yield_strength(mut self, fy: f64) -> Self {
        self.yield_strength = Some(fy);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.get_or_insert_with(Record::new).insert(key, value);
        self
    }
}

impl ToRecord for Material {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.enumeration("MaterialType", &self.material_type)
            .text("Grade", self.grade.as_deref())
            .field("Density", self.density)
            .field("ElasticModulus", self.elastic_modulus)
            .field("ShearModulus", self.shear_modulus)
            .field("PoissonRatio", self.poisson_ratio)
            .field("ThermalExpansion", self.thermal_expansion)
            .field("YieldStrength", self.yield_strength);
        if let Some(props) = &self.properties {
            r.map("Properties", props);
        }
        r
    }
}

// ============================================================================
// CrossSection
// ============================================================================

#[derive(Debug, Clone)]
pub struct CrossSection {
    pub base: EntityBase,
    pub shape: ShapeKind,
    pub material: Option<Arc<Material>>,
    pub parameters: Option<SectionParameters>,
    /// Explicit area; falls back to the parameters' area when unset.
    pub area: Option<f64>,
}

impl CrossSection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, shape: ShapeKind) -> Self {
        Self {
            base: EntityBase::new(id, name),
            shape,
            material: None,
            parameters: None,
            area: None,
        }
    }

    /// Section defined by parameters; the shape follows the parameters.
    pub fn from_parameters(
        id: impl Into<String>,
        name: impl Into<String>,
        parameters: SectionParameters,
    ) -> Self {
        Self::new(id, name, ShapeKind::Custom).with_parameters(parameters)
    }

    pub fn with_parameters(mut self, parameters: SectionParameters) -> Self {
        use super::ShapeParameters;
        self.shape = parameters.shape_kind();
        self.parameters = Some(parameters);
        self
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    pub fn effective_area(&self) -> Option<f64> {
        self.area.or_else(|| self.parameters.as_ref().and_then(SectionParameters::area))
    }
}

impl ToRecord for CrossSection {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.enumeration("Shape", &self.shape)
            .reference("Material", id_of(&self.material))
            .field("Area", self.effective_area());
        if let Some(params) = &self.parameters {
            r.parameters("Parameters", params);
        }
        r
    }
}

// ============================================================================
// Storey
// ============================================================================

#[derive(Debug, Clone)]
pub struct Storey {
    pub base: EntityBase,
    pub elevation: f64,
    pub height: Option<f64>,
}

impl Storey {
    pub fn new(id: impl Into<String>, name: impl Into<String>, elevation: f64) -> Self {
        Self { base: EntityBase::new(id, name), elevation, height: None }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }
}

impl ToRecord for Storey {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.field("Elevation", self.elevation).field("Height", self.height);
        r
    }
}

// ============================================================================
// Structural analysis nodes
// ============================================================================

/// Analytical node located at a point.
#[derive(Debug, Clone)]
pub struct StructuralPointConnection {
    pub base: EntityBase,
    pub point: Arc<Point3D>,
    pub storey: Option<Arc<Storey>>,
}

impl StructuralPointConnection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, point: Arc<Point3D>) -> Self {
        Self { base: EntityBase::new(id, name), point, storey: None }
    }

    pub fn with_storey(mut self, storey: Arc<Storey>) -> Self {
        self.storey = Some(storey);
        self
    }
}

impl ToRecord for StructuralPointConnection {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.reference("Point", Some(self.point.id()))
            .reference("Storey", id_of(&self.storey));
        r
    }
}

/// Analytical 1D member.
#[derive(Debug, Clone)]
pub struct StructuralCurveMember {
    pub base: EntityBase,
    pub member_type: CurveMemberType,
    pub material: Option<Arc<Material>>,
    pub cross_section: Option<Arc<CrossSection>>,
    pub storey: Option<Arc<Storey>>,
    pub start_node: Option<Arc<StructuralPointConnection>>,
    pub end_node: Option<Arc<StructuralPointConnection>>,
    pub segments: Vec<Segment>,
    /// Start position of each segment along the member, paired by index.
    pub segment_positions: Vec<f64>,
    /// Rotation about the member axis, degrees.
    pub rotation: f64,
}

impl StructuralCurveMember {
    pub fn new(id: impl Into<String>, name: impl Into<String>, member_type: CurveMemberType) -> Self {
        Self {
            base: EntityBase::new(id, name),
            member_type,
            material: None,
            cross_section: None,
            storey: None,
            start_node: None,
            end_node: None,
            segments: Vec::new(),
            segment_positions: Vec::new(),
            rotation: 0.0,
        }
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_cross_section(mut self, cross_section: Arc<CrossSection>) -> Self {
        self.cross_section = Some(cross_section);
        self
    }

    pub fn with_storey(mut self, storey: Arc<Storey>) -> Self {
        self.storey = Some(storey);
        self
    }

    pub fn with_nodes(
        mut self,
        start: Arc<StructuralPointConnection>,
        end: Arc<StructuralPointConnection>,
    ) -> Self {
        self.start_node = Some(start);
        self.end_node = Some(end);
        self
    }

    pub fn with_segment(mut self, segment: impl Into<Segment>, position: f64) -> Self {
        self.segments.push(segment.into());
        self.segment_positions.push(position);
        self
    }

    pub fn with_segments(mut self, segments: Vec<Segment>, positions: Vec<f64>) -> Self {
        self.segments = segments;
        self.segment_positions = positions;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

impl ToRecord for StructuralCurveMember {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.enumeration("MemberType", &self.member_type)
            .reference("Material", id_of(&self.material))
            .reference("CrossSection", id_of(&self.cross_section))
            .reference("Storey", id_of(&self.storey))
            .reference("StartNode", id_of(&self.start_node))
            .reference("EndNode", id_of(&self.end_node))
            .references("Segments", self.segments.iter().map(Segment::id))
            .field("SegmentPositions", self.segment_positions.clone())
            .field("Rotation", self.rotation);
        r
    }
}

/// Analytical 2D member bounded by point connections.
#[derive(Debug, Clone)]
pub struct StructuralSurfaceMember {
    pub base: EntityBase,
    pub member_type: SurfaceMemberType,
    pub material: Option<Arc<Material>>,
    pub thickness: f64,
    pub storey: Option<Arc<Storey>>,
    pub boundary_nodes: Vec<Arc<StructuralPointConnection>>,
}

impl StructuralSurfaceMember {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        member_type: SurfaceMemberType,
        thickness: f64,
    ) -> Self {
        Self {
            base: EntityBase::new(id, name),
            member_type,
            material: None,
            thickness,
            storey: None,
            boundary_nodes: Vec::new(),
        }
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_storey(mut self, storey: Arc<Storey>) -> Self {
        self.storey = Some(storey);
        self
    }

    pub fn with_boundary_nodes(mut self, nodes: Vec<Arc<StructuralPointConnection>>) -> Self {
        self.boundary_nodes = nodes;
        self
    }
}

impl ToRecord for StructuralSurfaceMember {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.enumeration("MemberType", &self.member_type)
            .reference("Material", id_of(&self.material))
            .field("Thickness", self.thickness)
            .reference("Storey", id_of(&self.storey))
            .references("BoundaryNodes", self.boundary_nodes.iter().map(|n| n.id()));
        r
    }
}

// ============================================================================
// Physical building elements
// ============================================================================

#[derive(Debug, Clone)]
pub struct Beam {
    pub base: EntityBase,
    pub material: Option<Arc<Material>>,
    pub cross_section: Option<Arc<CrossSection>>,
    pub storey: Option<Arc<Storey>>,
    pub start_point: Arc<Point3D>,
    pub end_point: Arc<Point3D>,
    pub rotation: f64,
}

impl Beam {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_point: Arc<Point3D>,
        end_point: Arc<Point3D>,
    ) -> Self {
        Self {
            base: EntityBase::new(id, name),
            material: None,
            cross_section: None,
            storey: None,
            start_point,
            end_point,
            rotation: 0.0,
        }
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_cross_section(mut self, cross_section: Arc<CrossSection>) -> Self {
        self.cross_section = Some(cross_section);
        self
    }

    pub fn with_storey(mut self, storey: Arc<Storey>) -> Self {
        self.storey = Some(storey);
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn length(&self) -> f64 {
        self.start_point.distance_to(&self.end_point)
    }
}

impl ToRecord for Beam {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.reference("Material", id_of(&self.material))
            .reference("CrossSection", id_of(&self.cross_section))
            .reference("Storey", id_of(&self.storey))
            .reference("StartPoint", Some(self.start_point.id()))
            .reference("EndPoint", Some(self.end_point.id()))
            .field("Rotation", self.rotation);
        r
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub base: EntityBase,
    pub material: Option<Arc<Material>>,
    pub cross_section: Option<Arc<CrossSection>>,
    pub storey: Option<Arc<Storey>>,
    /// Bottom point.
    pub start_point: Arc<Point3D>,
    /// Top point.
    pub end_point: Arc<Point3D>,
    pub rotation: f64,
}

impl Column {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_point: Arc<Point3D>,
        top_point: Arc<Point3D>,
    ) -> Self {
        Self {
            base: EntityBase::new(id, name),
            material: None,
            cross_section: None,
            storey: None,
            start_point: base_point,
            end_point: top_point,
            rotation: 0.0,
        }
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_cross_section(mut self, cross_section: Arc<CrossSection>) -> Self {
        self.cross_section = Some(cross_section);
        self
    }

    pub fn with_storey(mut self, storey: Arc<Storey>) -> Self {
        self.storey = Some(storey);
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn height(&self) -> f64 {
        self.start_point.distance_to(&self.end_point)
    }
}

impl ToRecord for Column {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.reference("Material", id_of(&self.material))
            .reference("CrossSection", id_of(&self.cross_section))
            .reference("Storey", id_of(&self.storey))
            .reference("StartPoint", Some(self.start_point.id()))
            .reference("EndPoint", Some(self.end_point.id()))
            .field("Rotation", self.rotation);
        r
    }
}

#[derive(Debug, Clone)]
pub struct Slab {
    pub base: EntityBase,
    pub material: Option<Arc<Material>>,
    pub storey: Option<Arc<Storey>>,
    pub thickness: f64,
    /// Closed outline, first point not repeated.
    pub outline: Vec<Arc<Point3D>>,
}

impl Slab {
    pub fn new(id: impl Into<String>, name: impl Into<String>, thickness: f64) -> Self {
        Self {
            base: EntityBase::new(id, name),
            material: None,
            storey: None,
            thickness,
            outline: Vec::new(),
        }
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_storey(mut self, storey: Arc<Storey>) -> Self {
        self.storey = Some(storey);
        self
    }

    pub fn with_outline(mut self, outline: Vec<Arc<Point3D>>) -> Self {
        self.outline = outline;
        self
    }
}

impl ToRecord for Slab {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.reference("Material", id_of(&self.material))
            .reference("Storey", id_of(&self.storey))
            .field("Thickness", self.thickness)
            .references("Outline", self.outline.iter().map(|p| p.id()));
        r
    }
}

#[derive(Debug, Clone)]
pub struct Wall {
    pub base: EntityBase,
    pub material: Option<Arc<Material>>,
    pub storey: Option<Arc<Storey>>,
    pub thickness: f64,
    pub height: f64,
    pub start_point: Arc<Point3D>,
    pub end_point: Arc<Point3D>,
}

impl Wall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_point: Arc<Point3D>,
        end_point: Arc<Point3D>,
        thickness: f64,
        height: f64,
    ) -> Self {
        Self {
            base: EntityBase::new(id, name),
            material: None,
            storey: None,
            thickness,
            height,
            start_point,
            end_point,
        }
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_storey(mut self, storey: Arc<Storey>) -> Self {
        self.storey = Some(storey);
        self
    }
}

impl ToRecord for Wall {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        self.base.write_record(&mut r, Self::ENTITY_TYPE);
        r.reference("Material", id_of(&self.material))
            .reference("Storey", id_of(&self.storey))
            .field("Thickness", self.thickness)
            .field("Height", self.height)
            .reference("StartPoint", Some(self.start_point.id()))
            .reference("EndPoint", Some(self.end_point.id()));
        r
    }
}
