use crate::{types::PropertyType, version::Version};
use serde::{Deserialize, Serialize};

///
/// Accessor
///
/// How generated code reaches a property: through a getter and/or setter
/// method, or directly through the field when none is declared.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Accessor {
    pub getter: Option<String>,
    pub setter: Option<String>,
}

impl Accessor {
    /// Direct field access in both directions.
    #[must_use]
    pub const fn direct() -> Self {
        Self {
            getter: None,
            setter: None,
        }
    }

    pub fn methods(getter: impl Into<String>, setter: impl Into<String>) -> Self {
        Self {
            getter: Some(getter.into()),
            setter: Some(setter.into()),
        }
    }

    pub fn getter_only(getter: impl Into<String>) -> Self {
        Self {
            getter: Some(getter.into()),
            setter: None,
        }
    }

    #[must_use]
    pub const fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    #[must_use]
    pub const fn has_setter(&self) -> bool {
        self.setter.is_some()
    }
}

///
/// PropertyMetadata
///
/// One resolved property as the emitters see it, after the reducer chain has
/// collapsed version/group candidates. Order within the owning class is
/// significant: it fixes emission order and constructor binding attempts.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyMetadata {
    pub name: String,
    pub serialized_name: String,
    pub ty: PropertyType,
    pub accessor: Accessor,
    pub public: bool,
    pub read_only: bool,
    pub max_depth: Option<u32>,

    /// The model stores this class-typed property behind a `Box` (required
    /// for self-referential schemas, optional elsewhere).
    pub boxed: bool,
}

///
/// PropertyDef
///
/// One property candidate in a raw class definition. Several candidates may
/// share a serialized name (a field and a versioned virtual accessor, say);
/// the reducers select which candidate survives for a given context.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyDef {
    pub name: String,
    pub serialized_name: String,
    pub ty: PropertyType,
    pub accessor: Accessor,
    pub public: bool,
    pub read_only: bool,
    pub max_depth: Option<u32>,
    pub boxed: bool,

    // selection facets, consumed by the reducers
    pub groups: Vec<String>,
    pub since: Option<Version>,
    pub until: Option<Version>,
    pub preferred: bool,
}

impl PropertyDef {
    /// A public direct-access property; chain `with_*` calls to refine.
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        let name = name.into();

        Self {
            serialized_name: name.clone(),
            name,
            ty,
            accessor: Accessor::direct(),
            public: true,
            read_only: false,
            max_depth: None,
            boxed: false,
            groups: Vec::new(),
            since: None,
            until: None,
            preferred: false,
        }
    }

    #[must_use]
    pub fn with_serialized_name(mut self, serialized_name: impl Into<String>) -> Self {
        self.serialized_name = serialized_name.into();
        self
    }

    #[must_use]
    pub fn with_accessor(mut self, accessor: Accessor) -> Self {
        self.accessor = accessor;
        self
    }

    #[must_use]
    pub const fn private(mut self) -> Self {
        self.public = false;
        self
    }

    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    #[must_use]
    pub const fn boxed(mut self) -> Self {
        self.boxed = true;
        self
    }

    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn since(mut self, version: impl Into<Version>) -> Self {
        self.since = Some(version.into());
        self
    }

    #[must_use]
    pub fn until(mut self, version: impl Into<Version>) -> Self {
        self.until = Some(version.into());
        self
    }

    #[must_use]
    pub const fn preferred(mut self) -> Self {
        self.preferred = true;
        self
    }

    /// Strip the selection facets, leaving the resolved view.
    #[must_use]
    pub fn resolve(self) -> PropertyMetadata {
        PropertyMetadata {
            name: self.name,
            serialized_name: self.serialized_name,
            ty: self.ty,
            accessor: self.accessor,
            public: self.public,
            read_only: self.read_only,
            max_depth: self.max_depth,
            boxed: self.boxed,
        }
    }
}
