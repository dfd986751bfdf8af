use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Typed element storage of a dataset, always row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dtype", content = "data", rename_all = "lowercase")]
pub enum Values {
    /// Unsigned integers (indices, channel ids, type codes).
    U64(Vec<u64>),
    /// Signed integers.
    I64(Vec<i64>),
    /// Floating point samples.
    F64(Vec<f64>),
}

impl Values {
    pub fn len(&self) -> usize {
        match self {
            Values::U64(v) => v.len(),
            Values::I64(v) => v.len(),
            Values::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the element type, as written in the `dtype` tag.
    pub fn dtype(&self) -> &'static str {
        match self {
            Values::U64(_) => "u64",
            Values::I64(_) => "i64",
            Values::F64(_) => "f64",
        }
    }
}

/// A multi-dimensional array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Extent of every axis. The element count is the product of the extents.
    pub shape: Vec<usize>,
    pub values: Values,
}

impl Dataset {
    /// A one-dimensional dataset holding `values`.
    pub fn from_values(values: Values) -> Self {
        Self {
            shape: vec![values.len()],
            values,
        }
    }

    pub fn from_u64(data: Vec<u64>) -> Self {
        Self::from_values(Values::U64(data))
    }

    pub fn from_i64(data: Vec<i64>) -> Self {
        Self::from_values(Values::I64(data))
    }

    pub fn from_f64(data: Vec<f64>) -> Self {
        Self::from_values(Values::F64(data))
    }

    /// Reinterprets the dataset with a new shape. The element count is not checked
    /// here; see [`Dataset::is_consistent`].
    #[must_use]
    pub fn with_shape(mut self, shape: Vec<usize>) -> Self {
        self.shape = shape;
        self
    }

    /// Number of elements implied by the shape.
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// True when the shape describes exactly the stored elements.
    pub fn is_consistent(&self) -> bool {
        self.size() == self.values.len()
    }
}

/// A member of a [`Group`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Group(Group),
    Dataset(Dataset),
}

impl Node {
    /// The group held by this node, replacing a dataset with an empty group.
    fn make_group(&mut self) -> &mut Group {
        match self {
            Node::Group(g) => g,
            Node::Dataset(_) => {
                *self = Node::Group(Group::new());
                self.make_group()
            }
        }
    }
}

/// A named collection of groups and datasets with optional integer attributes.
///
/// Members are kept in name order, so iterating a group is deterministic and
/// matches the alphabetical member order of the files the simulation writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, Vec<i64>>,
    #[serde(default)]
    pub members: BTreeMap<String, Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a member by `/`-separated path relative to this group.
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let first = parts.next()?;
        let mut node = self.members.get(first)?;
        for part in parts {
            match node {
                Node::Group(g) => node = g.members.get(part)?,
                Node::Dataset(_) => return None,
            }
        }
        Some(node)
    }

    pub fn group(&self, path: &str) -> Option<&Group> {
        match self.get(path)? {
            Node::Group(g) => Some(g),
            Node::Dataset(_) => None,
        }
    }

    pub fn dataset(&self, path: &str) -> Option<&Dataset> {
        match self.get(path)? {
            Node::Dataset(d) => Some(d),
            Node::Group(_) => None,
        }
    }

    /// Member names in iteration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn attr(&self, name: &str) -> Option<&[i64]> {
        self.attrs.get(name).map(Vec::as_slice)
    }

    pub fn set_attr<S: Into<String>>(&mut self, name: S, values: Vec<i64>) {
        self.attrs.insert(name.into(), values);
    }

    /// Returns the group at `path`, creating any missing groups on the way.
    ///
    /// A dataset sitting where a group is needed is discarded and replaced by
    /// an empty group, so writing `a/b` after `a` drops the dataset `a`.
    pub fn ensure_group(&mut self, path: &str) -> &mut Group {
        let mut current = self;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current = current
                .members
                .entry(part.to_string())
                .or_insert_with(|| Node::Group(Group::new()))
                .make_group();
        }
        current
    }

    /// Stores `dataset` at `path`, creating parent groups as needed.
    pub fn put_dataset(&mut self, path: &str, dataset: Dataset) {
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", path),
        };
        self.ensure_group(parent)
            .members
            .insert(name.to_string(), Node::Dataset(dataset));
    }
}
