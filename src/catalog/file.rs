//! File-based catalog source.
//!
//! A catalog file is a TOML document listing type declarations:
//!
//! ```toml
//! [[types]]
//! name = "Customer"
//!
//! [[types.members]]
//! name = "Address"
//! kind = "property"
//! value_type = "Address"
//!
//! [[types]]
//! name = "CustomerDto"
//! mapped_from = "Customer"
//!
//! [[types.members]]
//! name = "City"
//! kind = "property"
//! value_type = "string"
//! binding = "Address.City"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{Catalog, CatalogError, Member, MemberKind, Parameter, TypeDescriptor, TypeName};

/// A catalog loaded from a TOML file.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist are silently skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFile {
    path: PathBuf,
    required: bool,
}

impl CatalogFile {
    /// Creates a new file source.
    ///
    /// If `required` is true, loading fails if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog. Returns `Ok(None)` for a missing optional file.
    pub fn load(&self) -> Result<Option<Catalog>, CatalogError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if self.required {
                    return Err(CatalogError::FileNotFound(self.path.clone()));
                }
                tracing::debug!(
                    path = %self.path.display(),
                    "optional catalog file not found, skipping"
                );
                return Ok(None);
            }
            Err(e) => {
                return Err(CatalogError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let document: CatalogDocument =
            toml::from_str(&contents).map_err(|e| CatalogError::ParseError {
                path: self.path.clone(),
                source: e,
            })?;

        let catalog = document.into_catalog()?;
        tracing::debug!(path = %self.path.display(), types = catalog.len(), "loaded catalog file");
        Ok(Some(catalog))
    }
}

/// Parses a catalog from TOML text.
pub fn parse_catalog(contents: &str) -> Result<Catalog, CatalogError> {
    let document: CatalogDocument = toml::from_str(contents)?;
    document.into_catalog()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(default)]
    types: Vec<TypeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeEntry {
    name: TypeName,
    base: Option<TypeName>,
    mapped_from: Option<TypeName>,
    #[serde(default)]
    members: Vec<MemberEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemberEntry {
    name: String,
    kind: MemberKind,
    value_type: Option<TypeName>,
    binding: Option<String>,
    #[serde(default)]
    parameters: Vec<ParameterEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParameterEntry {
    name: String,
    value_type: TypeName,
    binding: Option<String>,
}

impl CatalogDocument {
    fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let mut builder = Catalog::builder();

        for entry in self.types {
            let mut descriptor = TypeDescriptor::new(entry.name.clone());
            if let Some(base) = entry.base {
                descriptor = descriptor.extends(base);
            }
            if let Some(source) = entry.mapped_from {
                descriptor = descriptor.mapped_from(source);
            }
            for member in entry.members {
                descriptor = descriptor.with_member(member.into_member(&entry.name)?);
            }
            builder = builder.with_type(descriptor);
        }

        builder.build()
    }
}

impl MemberEntry {
    fn into_member(self, owner: &TypeName) -> Result<Member, CatalogError> {
        let invalid = |reason| CatalogError::InvalidDescriptor {
            type_name: owner.clone(),
            member: self.name.clone(),
            reason,
        };

        if self.kind.has_value() {
            if !self.parameters.is_empty() {
                return Err(invalid("fields and properties take no parameters"));
            }
            let value_type = self
                .value_type
                .clone()
                .ok_or_else(|| invalid("fields and properties require a value_type"))?;

            let member = match self.kind {
                MemberKind::Field => Member::field(self.name, value_type),
                _ => Member::property(self.name, value_type),
            };
            return Ok(match self.binding {
                Some(path) => member.bound_to(path),
                None => member,
            });
        }

        if self.value_type.is_some() {
            return Err(invalid("only fields and properties declare a value_type"));
        }
        if self.binding.is_some() {
            return Err(invalid("bind the parameters of a callable, not the callable itself"));
        }

        if self.kind.is_callable() {
            let parameters = self.parameters.into_iter().map(|entry| {
                let parameter = Parameter::new(entry.name, entry.value_type);
                match entry.binding {
                    Some(path) => parameter.bound_to(path),
                    None => parameter,
                }
            });
            return Ok(match self.kind {
                MemberKind::Method => Member::method(self.name, parameters),
                _ => Member::constructor(self.name, parameters),
            });
        }

        if !self.parameters.is_empty() {
            return Err(invalid("only methods and constructors take parameters"));
        }
        Ok(Member::other(self.name, self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TypeCatalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = r#"
        [[types]]
        name = "Order"

        [[types.members]]
        name = "Number"
        kind = "field"
        value_type = "string"

        [[types]]
        name = "OrderDto"
        mapped_from = "Order"

        [[types.members]]
        name = "new"
        kind = "constructor"

        [[types.members.parameters]]
        name = "number"
        value_type = "string"
        binding = "Number"
    "#;

    #[test]
    fn test_catalog_file_loads_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{CATALOG}").unwrap();

        let catalog = CatalogFile::new(file.path(), true).load().unwrap().unwrap();

        assert_eq!(catalog.len(), 2);
        let dto = catalog.descriptor(&"OrderDto".into()).unwrap();
        assert_eq!(dto.source_type(), Some(&TypeName::new("Order")));
        let ctor = &dto.members()[0];
        assert_eq!(ctor.kind(), MemberKind::Constructor);
        assert_eq!(ctor.parameters()[0].binding(), Some("Number"));
    }

    #[test]
    fn test_catalog_file_required_missing() {
        let source = CatalogFile::new("/nonexistent/path/catalog.toml", true);
        let result = source.load();

        assert!(matches!(result, Err(CatalogError::FileNotFound(_))));
    }

    #[test]
    fn test_catalog_file_optional_missing() {
        let source = CatalogFile::new("/nonexistent/path/catalog.toml", false);

        assert!(source.load().unwrap().is_none());
    }

    #[test]
    fn test_catalog_file_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[types]").unwrap();

        let result = CatalogFile::new(file.path(), true).load();
        assert!(matches!(result, Err(CatalogError::ParseError { .. })));
    }

    #[test]
    fn test_property_without_value_type_rejected() {
        let result = parse_catalog(
            r#"
            [[types]]
            name = "A"

            [[types.members]]
            name = "x"
            kind = "property"
            "#,
        );

        assert!(matches!(
            result,
            Err(CatalogError::InvalidDescriptor { ref member, .. }) if member == "x"
        ));
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let result = parse_catalog(
            r#"
            [[types]]
            name = "A"

            [[types.members]]
            name = "x"
            kind = "indexer"
            "#,
        );

        assert!(matches!(result, Err(CatalogError::DeserializeError(_))));
    }

    #[test]
    fn test_event_member_parsed_as_other() {
        let catalog = parse_catalog(
            r#"
            [[types]]
            name = "A"

            [[types.members]]
            name = "Changed"
            kind = "event"
            "#,
        )
        .unwrap();

        let member = catalog.member(&"A".into(), "Changed").unwrap();
        assert_eq!(member.kind(), MemberKind::Event);
    }
}
