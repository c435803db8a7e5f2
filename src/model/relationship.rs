//! Relationship (edge) in the structural graph.

use super::{Entity, EnumTag, Record, ToRecord};

/// Edge kinds the factories wire automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    HasMaterial,
    HasCrossSection,
    HasStorey,
    HasPoint3D,
    HasStartPoint,
    HasMidPoint,
    HasEndPoint,
    HasStartNode,
    HasEndNode,
    HasSegment,
    HasBoundaryNode,
    HasBoundaryPoint,
    /// Caller-defined association.
    Associated,
}

impl EnumTag for RelationshipType {
    fn variant_name(&self) -> &'static str {
        match self {
            RelationshipType::HasMaterial => "HasMaterial",
            RelationshipType::HasCrossSection => "HasCrossSection",
            RelationshipType::HasStorey => "HasStorey",
            RelationshipType::HasPoint3D => "HasPoint3D",
            RelationshipType::HasStartPoint => "HasStartPoint",
            RelationshipType::HasMidPoint => "HasMidPoint",
            RelationshipType::HasEndPoint => "HasEndPoint",
            RelationshipType::HasStartNode => "HasStartNode",
            RelationshipType::HasEndNode => "HasEndNode",
            RelationshipType::HasSegment => "HasSegment",
            RelationshipType::HasBoundaryNode => "HasBoundaryNode",
            RelationshipType::HasBoundaryPoint => "HasBoundaryPoint",
            RelationshipType::Associated => "Associated",
        }
    }

    fn serialization_tag(&self) -> Option<&'static str> {
        match self {
            RelationshipType::Associated => None,
            other => Some(other.variant_name()),
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A directed edge. Holds its endpoints without owning them; they need
/// not be present in the model's entity list.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub id: String,
    /// Defaults to the relationship type tag.
    pub name: String,
    pub relationship_type: RelationshipType,
    pub description: Option<String>,
    pub source: Entity,
    pub target: Entity,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        relationship_type: RelationshipType,
        source: impl Into<Entity>,
        target: impl Into<Entity>,
    ) -> Self {
        Self {
            id: id.into(),
            name: relationship_type.tag().to_string(),
            relationship_type,
            description: None,
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The "other" end of the relationship from the given node.
    pub fn other_end(&self, from: &Entity) -> Option<&Entity> {
        if from.ptr_eq(&self.source) { Some(&self.target) }
        else if from.ptr_eq(&self.target) { Some(&self.source) }
        else { None }
    }
}

impl ToRecord for Relationship {
    fn to_record(&self) -> Record {
        let mut r = Record::new();
        r.field("Id", self.id.as_str())
            .field("Name", self.name.as_str())
            .enumeration("RelationshipType", &self.relationship_type)
            .text("Description", self.description.as_deref())
            .reference("Source", Some(self.source.id()))
            .reference("Target", Some(self.target.id()));
        r
    }
}
