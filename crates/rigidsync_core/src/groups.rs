//! Named collision groups
//!
//! Every registered group owns one bit of the collision mask. The group at
//! index `i` gets bit `2^(i + 1)`; bit `2^0` stays reserved for
//! [`CollisionGroups::DEFAULT`], the group every body starts in.

use std::collections::{BTreeSet, HashMap, HashSet};

use rigidsync_physics::{CollisionFilter, CollisionGroups};

use crate::error::{Result, SyncError};

/// Maximum number of named groups (bit 0 is reserved)
pub const MAX_GROUPS: usize = 31;

/// One or several group names
///
/// Lets mask operations take a single `&str` as readily as a slice, array,
/// `Vec` or set of names.
pub trait GroupNames {
    fn group_names(&self) -> Vec<&str>;
}

impl GroupNames for str {
    fn group_names(&self) -> Vec<&str> {
        vec![self]
    }
}

impl GroupNames for String {
    fn group_names(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl<S: AsRef<str>> GroupNames for [S] {
    fn group_names(&self) -> Vec<&str> {
        self.iter().map(<S as AsRef<str>>::as_ref).collect()
    }
}

impl<S: AsRef<str>, const N: usize> GroupNames for [S; N] {
    fn group_names(&self) -> Vec<&str> {
        self.iter().map(<S as AsRef<str>>::as_ref).collect()
    }
}

impl<S: AsRef<str>> GroupNames for Vec<S> {
    fn group_names(&self) -> Vec<&str> {
        self.iter().map(<S as AsRef<str>>::as_ref).collect()
    }
}

impl<S: AsRef<str>> GroupNames for HashSet<S> {
    fn group_names(&self) -> Vec<&str> {
        self.iter().map(<S as AsRef<str>>::as_ref).collect()
    }
}

impl<S: AsRef<str>> GroupNames for BTreeSet<S> {
    fn group_names(&self) -> Vec<&str> {
        self.iter().map(<S as AsRef<str>>::as_ref).collect()
    }
}

impl<T: GroupNames + ?Sized> GroupNames for &T {
    fn group_names(&self) -> Vec<&str> {
        (**self).group_names()
    }
}

/// Mapping from group name to collision bit
///
/// [`set_groups`](Self::set_groups) replaces the whole mapping. Filters
/// built before a replacement keep their old bit values; re-apply group
/// settings to existing bodies after changing the groups.
#[derive(Clone, Debug, Default)]
pub struct CollisionGroupRegistry {
    names: Vec<String>,
    bits: HashMap<String, u32>,
}

impl CollisionGroupRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given groups in order
    pub fn with_groups<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        registry.set_groups(names)?;
        Ok(registry)
    }

    /// Replace every registered group with `names`, in order
    ///
    /// This is not additive: previous names and bits are discarded. On error
    /// the registry is left unchanged.
    pub fn set_groups<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() > MAX_GROUPS {
            return Err(SyncError::TooManyGroups(names.len()));
        }

        let mut bits = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if bits.insert(name.clone(), 1u32 << (i + 1)).is_some() {
                return Err(SyncError::DuplicateGroup(name.clone()));
            }
        }

        if !self.names.is_empty() {
            log::debug!("Replacing collision groups {:?} with {:?}", self.names, names);
        }
        self.names = names;
        self.bits = bits;
        Ok(())
    }

    /// Bit assigned to a group
    pub fn group_bit(&self, name: &str) -> Result<u32> {
        self.bits
            .get(name)
            .copied()
            .ok_or_else(|| SyncError::UnknownGroup(name.to_string()))
    }

    /// OR of the bits of exactly the named groups
    ///
    /// Used for bodies that should collide only with these groups.
    pub fn inclusion_mask(&self, groups: impl GroupNames) -> Result<u32> {
        groups
            .group_names()
            .into_iter()
            .try_fold(0, |mask: u32, name| -> Result<u32> { Ok(mask | self.group_bit(name)?) })
    }

    /// OR of the bits of every registered group except the named ones
    ///
    /// Used for bodies that should collide with everything but these groups.
    /// Every name must be registered.
    pub fn exclusion_mask(&self, groups: impl GroupNames) -> Result<u32> {
        let excluded = self.inclusion_mask(groups)?;
        Ok(self.all_groups_mask() & !excluded)
    }

    /// OR of every registered group's bit
    pub fn all_groups_mask(&self) -> u32 {
        self.bits.values().fold(0, |mask, bit| mask | bit)
    }

    /// Put a filter in `group` and let it collide with every registered group
    ///
    /// Repeating the call with the same group yields the same filter.
    pub fn apply_group(&self, filter: &mut CollisionFilter, group: &str) -> Result<()> {
        let bit = self.group_bit(group)?;
        filter.group = CollisionGroups::from_bits_retain(bit);
        filter.mask = CollisionGroups::from_bits_retain(self.all_groups_mask());
        Ok(())
    }

    /// Let a filter collide with every registered group except `groups`
    pub fn apply_exclusion(&self, filter: &mut CollisionFilter, groups: impl GroupNames) -> Result<()> {
        filter.mask = CollisionGroups::from_bits_retain(self.exclusion_mask(groups)?);
        Ok(())
    }

    /// Let a filter collide only with `groups`
    pub fn apply_inclusion(&self, filter: &mut CollisionFilter, groups: impl GroupNames) -> Result<()> {
        filter.mask = CollisionGroups::from_bits_retain(self.inclusion_mask(groups)?);
        Ok(())
    }

    /// Registered names in bit order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bits.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
