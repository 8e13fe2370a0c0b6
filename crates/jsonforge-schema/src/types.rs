use crate::id::ClassId;
use serde::{Deserialize, Serialize};

///
/// Primitive
///
/// The scalar leaf kinds a property can resolve to. `Float` is distinct from
/// `Int` because decoding must apply a numeric cast: the wire literal `1` has
/// to become `1.0` in a float field.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Primitive {
    Bool,
    Float,
    Int,
    String,
}

///
/// DateTimeRepr
///
/// Concrete temporal representation of a date-time property. This is the
/// typed rendition of the source model's choice of date class: a fixed-offset
/// instant, a wall-clock date-time without zone, or a bare calendar date.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DateTimeRepr {
    Date,
    OffsetDateTime,
    PrimitiveDateTime,
}

///
/// ZoneOffset
///
/// Fixed UTC offset declared on a date-time property. Honored when decoding
/// (the parsed wall-clock value is assumed to be at this offset); declaring
/// one on an encoded property is a generation-time error.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ZoneOffset {
    pub hours: i8,
    pub minutes: i8,
}

impl ZoneOffset {
    #[must_use]
    pub const fn new(hours: i8, minutes: i8) -> Self {
        Self { hours, minutes }
    }
}

///
/// DateTimeType
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DateTimeType {
    pub repr: DateTimeRepr,

    /// Format used when encoding, and as the single decode format when no
    /// explicit decode list is declared. `time` format-description syntax.
    pub format: Option<String>,

    /// Ordered list of accepted decode formats. The first format that parses
    /// wins; declaration order is significant.
    pub deserialize_formats: Option<Vec<String>>,

    pub zone: Option<ZoneOffset>,
}

impl DateTimeType {
    #[must_use]
    pub const fn new(repr: DateTimeRepr) -> Self {
        Self {
            repr,
            format: None,
            deserialize_formats: None,
            zone: None,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_deserialize_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deserialize_formats = Some(formats.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn with_zone(mut self, zone: ZoneOffset) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Decode formats in trial order, falling back to the encode format.
    #[must_use]
    pub fn decode_formats(&self) -> Vec<String> {
        match (&self.deserialize_formats, &self.format) {
            (Some(formats), _) => formats.clone(),
            (None, Some(format)) => vec![format.clone()],
            (None, None) => Vec::new(),
        }
    }
}

///
/// ArrayType
///
/// An array-shaped property. `map` selects the string-keyed wire shape
/// (object) over the sequential one (list); `collection` marks arrays the
/// model wraps in a traversable collection type rather than a plain vector.
/// Arrays nest arbitrarily; the leaf type decides whether the whole value is
/// copied wholesale or walked element by element.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ArrayType {
    pub element: Box<PropertyType>,
    pub map: bool,
    pub collection: bool,
}

impl ArrayType {
    #[must_use]
    pub fn list(element: PropertyType) -> Self {
        Self {
            element: Box::new(element),
            map: false,
            collection: false,
        }
    }

    #[must_use]
    pub fn map(element: PropertyType) -> Self {
        Self {
            element: Box::new(element),
            map: true,
            collection: false,
        }
    }

    #[must_use]
    pub fn collection(element: PropertyType) -> Self {
        Self {
            element: Box::new(element),
            map: false,
            collection: true,
        }
    }

    /// The innermost non-array type.
    #[must_use]
    pub fn leaf(&self) -> &PropertyType {
        match self.element.as_ref() {
            PropertyType::Array(inner) => inner.leaf(),
            other => other,
        }
    }
}

///
/// PropertyType
///
/// The closed set of resolved property types. Every emitter matches this
/// exhaustively; adding a variant is intentionally a breaking change that
/// forces every switch to be revisited.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PropertyType {
    Primitive(Primitive),
    Unknown,
    DateTime(DateTimeType),
    Array(ArrayType),
    Class(ClassId),
}

impl PropertyType {
    /// Human-readable kind label, used in generation-time error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Unknown => "unknown",
            Self::DateTime(_) => "date-time",
            Self::Array(_) => "array",
            Self::Class(_) => "class",
        }
    }

    /// The class this type resolves to after unwrapping any array nesting.
    #[must_use]
    pub fn leaf_class(&self) -> Option<&ClassId> {
        match self {
            Self::Class(class) => Some(class),
            Self::Array(array) => match array.leaf() {
                Self::Class(class) => Some(class),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_leaf_unwraps_nesting() {
        let ty = ArrayType::list(PropertyType::Array(ArrayType::list(PropertyType::Primitive(
            Primitive::Int,
        ))));

        assert_eq!(ty.leaf(), &PropertyType::Primitive(Primitive::Int));
    }

    #[test]
    fn leaf_class_sees_through_arrays() {
        let class = ClassId::new("app::Nested");
        let ty = PropertyType::Array(ArrayType::map(PropertyType::Class(class.clone())));

        assert_eq!(ty.leaf_class(), Some(&class));
        assert_eq!(PropertyType::Unknown.leaf_class(), None);
    }

    #[test]
    fn decode_formats_fall_back_to_encode_format() {
        let ty = DateTimeType::new(DateTimeRepr::Date).with_format("[year]-[month]-[day]");
        assert_eq!(ty.decode_formats(), vec!["[year]-[month]-[day]".to_string()]);

        let ty = ty.with_deserialize_formats(["[month]/[day]/[year]", "[year]-[month]-[day]"]);
        assert_eq!(ty.decode_formats().len(), 2);
        assert_eq!(ty.decode_formats()[0], "[month]/[day]/[year]");
    }
}
