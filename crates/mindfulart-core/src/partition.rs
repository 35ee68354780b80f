//! Grouping of search results by institution.

use crate::artwork::{Artwork, Institution, sort_by_title};

/// Search results grouped by institution in a fixed display order.
#[derive(Debug, Clone, Default)]
pub struct PartitionedResults {
    groups: Vec<(Institution, Vec<Artwork>)>,
}

impl PartitionedResults {
    /// Iterates over `(institution, items)` in display order, including empty groups.
    pub fn iter(&self) -> impl Iterator<Item = (Institution, &[Artwork])> {
        self.groups
            .iter()
            .map(|(institution, items)| (*institution, items.as_slice()))
    }

    /// Returns the items for one institution.
    pub fn get(&self, institution: Institution) -> &[Artwork] {
        self.groups
            .iter()
            .find(|(i, _)| *i == institution)
            .map(|(_, items)| items.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates over every item in display order.
    pub fn items(&self) -> impl Iterator<Item = &Artwork> {
        self.groups.iter().flat_map(|(_, items)| items.iter())
    }

    /// Total number of items across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Groups items by institution: Rijksmuseum first, then Harvard.
///
/// Each group is sorted by title; items with equal titles keep their input order.
pub fn partition_by_institution<'a, I>(items: I) -> PartitionedResults
where
    I: IntoIterator<Item = &'a Artwork>,
{
    let mut groups: Vec<(Institution, Vec<Artwork>)> = Institution::ALL
        .iter()
        .map(|institution| (*institution, Vec::new()))
        .collect();

    for item in items {
        if let Some((_, bucket)) = groups.iter_mut().find(|(i, _)| *i == item.institution) {
            bucket.push(item.clone());
        }
    }

    for (_, bucket) in &mut groups {
        sort_by_title(bucket);
    }

    PartitionedResults { groups }
}
