//! Structured OData query builder.
//!
//! Queries are assembled from parts and only serialised at the end, so
//! quoting, percent-encoding and item-type name normalisation happen in one
//! place. [`std::fmt::Display`] gives the readable (unencoded) form used in
//! logs; [`ODataQuery::to_url`] gives the wire form.
//!
//! Parameters are always emitted in the order `$select`, `$expand`,
//! `$filter`, `$top`, `$skip`.

use std::fmt;

use plm_oslc::ItemTypeName;

/// A `$filter` predicate. String literals are single-quoted with embedded
/// quotes doubled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq(String, String),
    Gt(String, String),
    And(Box<Filter>, Box<Filter>),
}

impl Filter {
    pub fn eq(path: impl Into<String>, literal: impl Into<String>) -> Self {
        Filter::Eq(path.into(), literal.into())
    }

    pub fn gt(path: impl Into<String>, literal: impl Into<String>) -> Self {
        Filter::Gt(path.into(), literal.into())
    }

    pub fn and(self, other: Filter) -> Self {
        Filter::And(Box::new(self), Box::new(other))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Eq(path, lit) => write!(f, "{path} eq {}", quote(lit)),
            Filter::Gt(path, lit) => write!(f, "{path} gt {}", quote(lit)),
            Filter::And(a, b) => write!(f, "{a} and {b}"),
        }
    }
}

/// An `$expand` entry, optionally with a nested `$expand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expand {
    pub property: String,
    pub nested: Vec<String>,
}

impl Expand {
    pub fn property(name: impl Into<String>) -> Self {
        Self {
            property: name.into(),
            nested: Vec::new(),
        }
    }

    /// `name($expand=config_id)`: the related item with its configuration.
    pub fn with_config_id(name: impl Into<String>) -> Self {
        Self {
            property: name.into(),
            nested: vec!["config_id".to_string()],
        }
    }
}

impl fmt::Display for Expand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nested.is_empty() {
            f.write_str(&self.property)
        } else {
            write!(f, "{}($expand={})", self.property, self.nested.join(","))
        }
    }
}

/// A GET query against one entity set, optionally addressed by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ODataQuery {
    entity: String,
    key: Option<String>,
    select: Vec<String>,
    expand: Vec<Expand>,
    filter: Option<Filter>,
    top: Option<u64>,
    skip: Option<u64>,
}

impl ODataQuery {
    /// Query the entity set `name` (space form, e.g. `"Part Document"`).
    pub fn entity(name: impl Into<String>) -> Self {
        Self {
            entity: name.into(),
            key: None,
            select: Vec::new(),
            expand: Vec::new(),
            filter: None,
            top: None,
            skip: None,
        }
    }

    /// Query the entity set of an item type.
    pub fn item_type(item_type: &ItemTypeName) -> Self {
        Self::entity(item_type.source_name())
    }

    /// Address one entity: `Entity('key')`.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn expand(mut self, expand: Expand) -> Self {
        self.expand.push(expand);
        self
    }

    /// Set the filter, AND-ing with any filter already present.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(filter),
            None => filter,
        });
        self
    }

    pub fn top(mut self, n: u64) -> Self {
        self.top = Some(n);
        self
    }

    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.select.is_empty() {
            params.push(("$select", self.select.join(",")));
        }
        if !self.expand.is_empty() {
            let expand: Vec<String> = self.expand.iter().map(ToString::to_string).collect();
            params.push(("$expand", expand.join(",")));
        }
        if let Some(filter) = &self.filter {
            params.push(("$filter", filter.to_string()));
        }
        if let Some(top) = self.top {
            params.push(("$top", top.to_string()));
        }
        if let Some(skip) = self.skip {
            params.push(("$skip", skip.to_string()));
        }
        params
    }

    /// The percent-encoded URL under `base` (the OData service root).
    pub fn to_url(&self, base: &str) -> String {
        let mut url = String::from(base);
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(&urlencoding::encode(&self.entity));
        if let Some(key) = &self.key {
            url.push('(');
            url.push_str(&urlencoding::encode(&quote(key)));
            url.push(')');
        }
        for (i, (name, value)) in self.params().into_iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }
        url
    }
}

impl fmt::Display for ODataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entity)?;
        if let Some(key) = &self.key {
            write!(f, "({})", quote(key))?;
        }
        for (i, (name, value)) in self.params().into_iter().enumerate() {
            write!(f, "{}{name}={value}", if i == 0 { '?' } else { '&' })?;
        }
        Ok(())
    }
}

fn quote(literal: &str) -> String {
    format!("'{}'", literal.replace('\'', "''"))
}
