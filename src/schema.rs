use crate::{tools::split_attributes, CompositeKey, Domain, Error, Value};
use std::fmt;
use tracing::warn;

/// Describes why two schemas are not union compatible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mismatch {
    /// The schemas have a different number of attributes.
    Arity { left: usize, right: usize },

    /// The schemas disagree on the domain of the attribute at `position`.
    Domain {
        position: usize,
        left: Domain,
        right: Domain,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity { left, right } => {
                write!(f, "tables have different arity ({} vs {})", left, right)
            }
            Self::Domain {
                position,
                left,
                right,
            } => write!(
                f,
                "tables disagree on domain {} ({} vs {})",
                position, left, right
            ),
        }
    }
}

/// Is the static description of a table: its name, the names and domains of its
/// attributes and the attributes forming its primary key.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    name: String,
    attributes: Vec<String>,
    domains: Vec<Domain>,
    key: Vec<String>,

    /// Positions of the key attributes, in key order.
    key_columns: Vec<usize>,
}

impl Schema {
    /// Creates a new schema after checking that attribute names are unique, that every
    /// attribute has a domain and that the key is a non-empty subset of the attributes.
    pub fn new(
        name: impl Into<String>,
        attributes: Vec<String>,
        domains: Vec<Domain>,
        key: Vec<String>,
    ) -> Result<Self, Error> {
        let name = name.into();
        let invalid = |reason: String| Error::InvalidSchema {
            table: name.clone(),
            reason,
        };

        if attributes.len() != domains.len() {
            return Err(invalid(format!(
                "{} attributes but {} domains",
                attributes.len(),
                domains.len()
            )));
        }
        for (i, attribute) in attributes.iter().enumerate() {
            if attributes[..i].contains(attribute) {
                return Err(invalid(format!("duplicate attribute '{}'", attribute)));
            }
        }
        if key.is_empty() {
            return Err(invalid("empty key".to_string()));
        }
        for attribute in &key {
            if !attributes.contains(attribute) {
                return Err(invalid(format!(
                    "key attribute '{}' is not an attribute",
                    attribute
                )));
            }
        }

        Ok(Self::from_parts(name, attributes, domains, key))
    }

    /// Creates a new schema from whitespace separated lists of attribute names, domain
    /// names and key attribute names, e.g. `("studio", "name address", "String String",
    /// "name")`.
    pub fn parse(name: &str, attributes: &str, domains: &str, key: &str) -> Result<Self, Error> {
        Self::new(
            name,
            to_strings(&split_attributes(attributes)),
            Domain::parse_list(domains)?,
            to_strings(&split_attributes(key)),
        )
    }

    /// Creates a schema for a table derived by an operator. Derived schemas may repeat
    /// attribute names (an equi-join does not disambiguate them); key attributes resolve
    /// to their first occurrence.
    pub(crate) fn from_parts(
        name: String,
        attributes: Vec<String>,
        domains: Vec<Domain>,
        key: Vec<String>,
    ) -> Self {
        debug_assert_eq!(attributes.len(), domains.len());
        let key_columns = key
            .iter()
            .filter_map(|k| attributes.iter().position(|a| a == k))
            .collect::<Vec<_>>();
        debug_assert_eq!(key.len(), key_columns.len());

        Self {
            name,
            attributes,
            domains,
            key,
            key_columns,
        }
    }

    /// Returns a copy of the receiver under a different table name.
    pub(crate) fn renamed(&self, name: String) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[inline(always)]
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Returns the names of the key attributes.
    #[inline(always)]
    pub fn key(&self) -> &[String] {
        &self.key
    }

    /// Returns the number of attributes.
    #[inline(always)]
    pub fn arity(&self) -> usize {
        self.attributes.len()
    }

    /// Returns the position of the attribute named `attribute` or `None` if there is no
    /// such attribute.
    pub fn col(&self, attribute: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a == attribute)
    }

    /// Returns the positions of the given attributes, failing on the first name that
    /// is not an attribute of the receiver.
    pub fn resolve(&self, attributes: &[&str]) -> Result<Vec<usize>, Error> {
        attributes
            .iter()
            .map(|&attribute| {
                self.col(attribute).ok_or_else(|| {
                    warn!("match: domain not found for {} in {}", attribute, self.name);
                    Error::UnresolvedAttribute {
                        table: self.name.clone(),
                        attribute: attribute.to_string(),
                    }
                })
            })
            .collect()
    }

    /// Returns true if `tuple` has one value per attribute and every value belongs to the
    /// domain of its attribute.
    pub fn type_check(&self, tuple: &[Value]) -> bool {
        self.check(tuple).is_ok()
    }

    /// Is the same as [`Schema::type_check`] but describes the first violation.
    pub fn check(&self, tuple: &[Value]) -> Result<(), Error> {
        if tuple.len() != self.arity() {
            return Err(Error::SchemaViolation {
                table: self.name.clone(),
                reason: format!(
                    "expected {} values but found {}",
                    self.arity(),
                    tuple.len()
                ),
            });
        }
        for (i, (value, domain)) in tuple.iter().zip(self.domains.iter()).enumerate() {
            if value.domain() != *domain {
                return Err(Error::SchemaViolation {
                    table: self.name.clone(),
                    reason: format!(
                        "value '{}' of attribute '{}' is a {} but the attribute is a {}",
                        value,
                        self.attributes[i],
                        value.domain(),
                        domain
                    ),
                });
            }
        }
        Ok(())
    }

    /// Checks that `other` has the same arity and the same domain at every position.
    pub fn compatible(&self, other: &Schema) -> Result<(), Mismatch> {
        if self.arity() != other.arity() {
            return Err(Mismatch::Arity {
                left: self.arity(),
                right: other.arity(),
            });
        }
        for (position, (left, right)) in self.domains.iter().zip(other.domains.iter()).enumerate()
        {
            if left != right {
                return Err(Mismatch::Domain {
                    position,
                    left: *left,
                    right: *right,
                });
            }
        }
        Ok(())
    }

    /// Checks that `key` holds one value per key attribute, each of the domain of its
    /// attribute.
    pub fn check_key(&self, key: &CompositeKey) -> Result<(), Error> {
        if key.len() != self.key_columns.len() {
            return Err(Error::SchemaViolation {
                table: self.name.clone(),
                reason: format!(
                    "expected a key of {} values but found {}",
                    self.key_columns.len(),
                    key.len()
                ),
            });
        }
        for (value, &column) in key.values().iter().zip(self.key_columns.iter()) {
            let domain = self.domains[column];
            if value.domain() != domain {
                return Err(Error::DomainMismatch {
                    left: value.domain(),
                    right: domain,
                });
            }
        }
        Ok(())
    }

    /// Extracts the key of `tuple`, which must already fit the receiver.
    pub(crate) fn key_of(&self, tuple: &[Value]) -> CompositeKey {
        CompositeKey::new(self.key_columns.iter().map(|&i| tuple[i].clone()).collect())
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
