//! GTU type hierarchy as a flat parent-linked table.
//!
//! Each registered type stores at most one parent.  Lookups that must fall
//! back to a more general type (lane bias, speed limits, access rules) walk
//! the chain with [`GtuTypes::ancestors`], which yields the type itself
//! first.  The table only grows, and a parent must already be registered, so
//! the chain can never contain a cycle.

use lg_core::GtuTypeId;

use crate::{NetworkError, NetworkResult};

/// Registry of GTU types, indexed by `GtuTypeId`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GtuTypes {
    names:  Vec<String>,
    parent: Vec<Option<GtuTypeId>>,
}

impl GtuTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type under `name`, optionally below `parent`.
    pub fn add(&mut self, name: &str, parent: Option<GtuTypeId>) -> NetworkResult<GtuTypeId> {
        if let Some(p) = parent {
            if p.index() >= self.names.len() {
                return Err(NetworkError::UnknownGtuType(p));
            }
        }
        if self.by_name(name).is_some() {
            return Err(NetworkError::DuplicateGtuType(name.to_owned()));
        }
        let id = GtuTypeId(self.names.len() as u16);
        self.names.push(name.to_owned());
        self.parent.push(parent);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, id: GtuTypeId) -> bool {
        id.index() < self.names.len()
    }

    pub fn name(&self, id: GtuTypeId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    pub fn by_name(&self, name: &str) -> Option<GtuTypeId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| GtuTypeId(i as u16))
    }

    pub fn parent(&self, id: GtuTypeId) -> Option<GtuTypeId> {
        self.parent.get(id.index()).copied().flatten()
    }

    /// `id`, its parent, its grandparent, … up to the root.
    ///
    /// Unknown ids yield nothing.
    pub fn ancestors(&self, id: GtuTypeId) -> impl Iterator<Item = GtuTypeId> + '_ {
        let first = if self.contains(id) { Some(id) } else { None };
        std::iter::successors(first, move |&t| self.parent(t))
    }

    /// `true` if `id` equals `ancestor` or descends from it.
    pub fn is_of(&self, id: GtuTypeId, ancestor: GtuTypeId) -> bool {
        self.ancestors(id).any(|t| t == ancestor)
    }
}
