//! Entity (node) base contract and the closed set of entity kinds.

use std::sync::Arc;

use super::identity::DedupKey;
use super::{
    ArcSegment, Beam, Column, CrossSection, LineSegment, Material, Point3D, Record, Slab, Storey,
    StructuralCurveMember, StructuralPointConnection, StructuralSurfaceMember, ToRecord, Wall,
};
use crate::{Error, Result};

/// Attributes every node carries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityBase {
    pub id: String,
    pub name: String,
    /// External-system identifier, used only as a reuse key.
    pub native_id: Option<String>,
    pub ifc_guid: Option<String>,
    pub description: Option<String>,
}

impl EntityBase {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn native_id(&self) -> Option<&str> {
        self.native_id.as_deref()
    }

    /// `id` and `name` must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::invalid("id", "must not be empty"));
        }
        if self.name.is_empty() {
            return Err(Error::invalid("name", "must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn write_record(&self, record: &mut Record, entity_type: &str) {
        record
            .field("Id", self.id.as_str())
            .field("Name", self.name.as_str())
            .text("NativeId", self.native_id.as_deref())
            .text("IfcGuid", self.ifc_guid.as_deref())
            .text("Description", self.description.as_deref())
            .field("EntityType", entity_type);
    }
}

/// A concrete node kind that can live in a [`Model`](crate::Model).
pub trait EntityKind: ToRecord + std::fmt::Debug + Send + Sync + Sized + 'static {
    /// Type discriminator written as `EntityType`.
    const ENTITY_TYPE: &'static str;

    fn base(&self) -> &EntityBase;

    fn from_entity(entity: &Entity) -> Option<&Arc<Self>>;

    fn into_entity(this: Arc<Self>) -> Entity;

    /// Key used by factories to find an existing equivalent node.
    fn dedup_key(&self) -> DedupKey<'_> {
        DedupKey::NativeId(self.base().native_id())
    }

    fn id(&self) -> &str {
        &self.base().id
    }

    fn name(&self) -> &str {
        &self.base().name
    }
}

macro_rules! entity_kinds {
    ($($kind:ident { $($body:tt)* }),* $(,)?) => {
        /// Any node in the graph. Cloning is cheap: it clones the `Arc`.
        #[derive(Debug, Clone)]
        pub enum Entity {
            $($kind(Arc<$kind>),)*
        }

        impl Entity {
            pub fn base(&self) -> &EntityBase {
                match self {
                    $(Entity::$kind(e) => &e.base,)*
                }
            }

            /// Type discriminator of the concrete kind.
            pub fn entity_type(&self) -> &'static str {
                match self {
                    $(Entity::$kind(_) => <$kind as EntityKind>::ENTITY_TYPE,)*
                }
            }

            /// True when both handles point at the same node instance.
            pub fn ptr_eq(&self, other: &Entity) -> bool {
                match (self, other) {
                    $((Entity::$kind(a), Entity::$kind(b)) => Arc::ptr_eq(a, b),)*
                    _ => false,
                }
            }
        }

        impl ToRecord for Entity {
            fn to_record(&self) -> Record {
                match self {
                    $(Entity::$kind(e) => e.to_record(),)*
                }
            }
        }

        $(
            impl EntityKind for $kind {
                const ENTITY_TYPE: &'static str = stringify!($kind);

                fn base(&self) -> &EntityBase {
                    &self.base
                }

                fn from_entity(entity: &Entity) -> Option<&Arc<Self>> {
                    match entity {
                        Entity::$kind(e) => Some(e),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn into_entity(this: Arc<Self>) -> Entity {
                    Entity::$kind(this)
                }

                $($body)*
            }

            impl From<Arc<$kind>> for Entity {
                fn from(e: Arc<$kind>) -> Self {
                    Entity::$kind(e)
                }
            }

            impl From<$kind> for Entity {
                fn from(e: $kind) -> Self {
                    Entity::$kind(Arc::new(e))
                }
            }

            impl $kind {
                pub fn with_name(mut self, name: impl Into<String>) -> Self {
                    self.base.name = name.into();
                    self
                }

                pub fn with_native_id(mut self, native_id: impl Into<String>) -> Self {
                    self.base.native_id = Some(native_id.into());
                    self
                }

                pub fn with_ifc_guid(mut self, ifc_guid: impl Into<String>) -> Self {
                    self.base.ifc_guid = Some(ifc_guid.into());
                    self
                }

                pub fn with_description(mut self, description: impl Into<String>) -> Self {
                    self.base.description = Some(description.into());
                    self
                }
            }
        )*
    };
}

entity_kinds! {
    Point3D {
        fn dedup_key(&self) -> DedupKey<'_> {
            DedupKey::Coordinates(self.coordinates())
        }
    },
    Material {},
    CrossSection {},
    Storey {},
    LineSegment {},
    ArcSegment {},
    StructuralPointConnection {},
    StructuralCurveMember {},
    StructuralSurfaceMember {},
    Beam {},
    Column {},
    Slab {},
    Wall {},
}

impl Entity {
    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn native_id(&self) -> Option<&str> {
        self.base().native_id()
    }

    /// Typed view of this entity, if it is a `T`.
    pub fn downcast<T: EntityKind>(&self) -> Option<&Arc<T>> {
        T::from_entity(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialType;

    #[test]
    fn test_validate_requires_id_and_name() {
        assert!(EntityBase::new("a", "b").validate().is_ok());
        match EntityBase::new("", "b").validate() {
            Err(Error::InvalidArgument { parameter, .. }) => assert_eq!(parameter, "id"),
            other => panic!("expected id error, got {other:?}"),
        }
        match EntityBase::new("a", "").validate() {
            Err(Error::InvalidArgument { parameter, .. }) => assert_eq!(parameter, "name"),
            other => panic!("expected name error, got {other:?}"),
        }
    }

    #[test]
    fn test_entity_dispatch() {
        let m: Entity = Material::new("m1", "S235", MaterialType::Steel).with_native_id("N1").into();
        assert_eq!(m.entity_type(), "Material");
        assert_eq!(m.id(), "m1");
        assert_eq!(m.native_id(), Some("N1"));
        assert!(m.downcast::<Material>().is_some());
        assert!(m.downcast::<Storey>().is_none());
    }

    #[test]
    fn test_ptr_eq_is_identity() {
        let a = Arc::new(Point3D::new("p", 0.0, 0.0, 0.0));
        let e1 = Entity::from(a.clone());
        let e2 = Entity::from(a);
        let e3: Entity = Point3D::new("p", 0.0, 0.0, 0.0).into();
        assert!(e1.ptr_eq(&e2));
        assert!(!e1.ptr_eq(&e3));
    }
}
