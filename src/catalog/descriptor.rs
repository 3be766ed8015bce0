//! Type, member and parameter descriptors.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque handle naming a type.
///
/// Handles compare by name only. A handle does not need a descriptor in any
/// catalog: leaf value types such as `string` are plain names.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(Arc<str>);

impl TypeName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&TypeName> for TypeName {
    fn from(name: &TypeName) -> Self {
        name.clone()
    }
}

/// Structural kind of a member.
///
/// Only fields, properties, methods and constructors take part in mapping;
/// the remaining kinds exist so catalogs can describe types faithfully and
/// get a precise error when one of them shows up where a route is expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Constructor,
    Event,
    NestedType,
    Custom,
}

impl MemberKind {
    /// Whether the member carries a single declared value.
    pub fn has_value(self) -> bool {
        matches!(self, Self::Field | Self::Property)
    }

    /// Whether the member takes parameters.
    pub fn is_callable(self) -> bool {
        matches!(self, Self::Method | Self::Constructor)
    }

    pub fn is_routable(self) -> bool {
        self.has_value() || self.is_callable()
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Field => "field",
            Self::Property => "property",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Event => "event",
            Self::NestedType => "nested type",
            Self::Custom => "custom member",
        };
        f.write_str(name)
    }
}

/// A parameter of a method or constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value_type: TypeName,
    binding: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            binding: None,
        }
    }

    /// Attaches a binding marker: the dot path of the source member feeding
    /// this parameter.
    #[must_use]
    pub fn bound_to(mut self, path: impl Into<String>) -> Self {
        self.binding = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &TypeName {
        &self.value_type
    }

    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }
}

/// A member declared on a type.
///
/// The declaring type is stamped when the member is registered on a
/// [`TypeDescriptor`]; inherited members keep the type that declared them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    name: String,
    kind: MemberKind,
    declaring_type: Option<TypeName>,
    value_type: Option<TypeName>,
    parameters: Vec<Parameter>,
    binding: Option<String>,
}

impl Member {
    fn with_kind(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            declaring_type: None,
            value_type: None,
            parameters: Vec::new(),
            binding: None,
        }
    }

    pub fn field(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        let mut member = Self::with_kind(name, MemberKind::Field);
        member.value_type = Some(value_type.into());
        member
    }

    pub fn property(name: impl Into<String>, value_type: impl Into<TypeName>) -> Self {
        let mut member = Self::with_kind(name, MemberKind::Property);
        member.value_type = Some(value_type.into());
        member
    }

    pub fn method(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
    ) -> Self {
        let mut member = Self::with_kind(name, MemberKind::Method);
        member.parameters = parameters.into_iter().collect();
        member
    }

    pub fn constructor(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
    ) -> Self {
        let mut member = Self::with_kind(name, MemberKind::Constructor);
        member.parameters = parameters.into_iter().collect();
        member
    }

    /// A member of a kind that cannot be mapped (events, nested types, ...).
    pub fn other(name: impl Into<String>, kind: MemberKind) -> Self {
        Self::with_kind(name, kind)
    }

    /// Attaches a binding marker to a field or property.
    #[must_use]
    pub fn bound_to(mut self, path: impl Into<String>) -> Self {
        self.binding = Some(path.into());
        self
    }

    pub(crate) fn declared_on(mut self, declaring_type: TypeName) -> Self {
        self.declaring_type = Some(declaring_type);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// The type that declared this member, `None` until it is registered.
    pub fn declaring_type(&self) -> Option<&TypeName> {
        self.declaring_type.as_ref()
    }

    /// Declared value type; only fields and properties have one.
    pub fn value_type(&self) -> Option<&TypeName> {
        self.value_type.as_ref()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }
}

/// Declaration of one type: its members, optional base type and optional
/// model marker naming the source type it maps from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: TypeName,
    base: Option<TypeName>,
    mapped_from: Option<TypeName>,
    members: Vec<Member>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            base: None,
            mapped_from: None,
            members: Vec::new(),
        }
    }

    /// Marks this type as a mapping destination populated from `source`.
    #[must_use]
    pub fn mapped_from(mut self, source: impl Into<TypeName>) -> Self {
        self.mapped_from = Some(source.into());
        self
    }

    /// Makes this type inherit the members of `base`.
    #[must_use]
    pub fn extends(mut self, base: impl Into<TypeName>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        let member = member.declared_on(self.name.clone());
        self.members.push(member);
        self
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn base(&self) -> Option<&TypeName> {
        self.base.as_ref()
    }

    /// The model marker: the source type this destination maps from.
    pub fn source_type(&self) -> Option<&TypeName> {
        self.mapped_from.as_ref()
    }

    /// Members declared directly on this type, in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_stamped_with_declaring_type() {
        let ty = TypeDescriptor::new("Order").with_member(Member::field("Id", "int"));

        let member = &ty.members()[0];
        assert_eq!(member.declaring_type(), Some(&TypeName::new("Order")));
        assert_eq!(member.value_type(), Some(&TypeName::new("int")));
    }

    #[test]
    fn test_callables_have_no_value_type() {
        let ctor = Member::constructor("new", [Parameter::new("id", "int").bound_to("Id")]);

        assert_eq!(ctor.kind(), MemberKind::Constructor);
        assert!(ctor.value_type().is_none());
        assert_eq!(ctor.parameters()[0].binding(), Some("Id"));
    }

    #[test]
    fn test_routable_kinds() {
        assert!(MemberKind::Field.is_routable());
        assert!(MemberKind::Constructor.is_routable());
        assert!(!MemberKind::Event.is_routable());
        assert!(!MemberKind::NestedType.has_value());
    }
}
