//! Sorted and optionally grouped result of a resolution.

use super::ContentRecord;
use serde::Serialize;

/// Records sharing one `status` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusGroup {
    /// `None` collects records without a status.
    pub status: Option<String>,
    pub records: Vec<ContentRecord>,
}

/// The final list handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedCollection {
    Flat(Vec<ContentRecord>),
    Grouped(Vec<StatusGroup>),
}

impl ResolvedCollection {
    /// Sort records by `order` and optionally partition them by `status`.
    ///
    /// The sort is stable: equal or missing orders keep their arrival order.
    /// Groups appear in the order their first record does, and only
    /// non-empty groups are returned.
    pub fn build(mut records: Vec<ContentRecord>, group_by_status: bool) -> Self {
        records.sort_by(|a, b| a.order().total_cmp(&b.order()));

        if !group_by_status {
            return Self::Flat(records);
        }

        let mut groups: Vec<StatusGroup> = Vec::new();
        for record in records {
            let status = record.status().map(str::to_owned);
            match groups.iter_mut().find(|g| g.status == status) {
                Some(group) => group.records.push(record),
                None => groups.push(StatusGroup {
                    status,
                    records: vec![record],
                }),
            }
        }
        Self::Grouped(groups)
    }

    /// Total number of records across all groups.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(records) => records.len(),
            Self::Grouped(groups) => groups.iter().map(|g| g.records.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every record in display order.
    pub fn records(&self) -> Box<dyn Iterator<Item = &ContentRecord> + '_> {
        match self {
            Self::Flat(records) => Box::new(records.iter()),
            Self::Grouped(groups) => Box::new(groups.iter().flat_map(|g| g.records.iter())),
        }
    }

    /// Records of one status bucket, if present.
    pub fn group(&self, status: &str) -> Option<&[ContentRecord]> {
        match self {
            Self::Flat(_) => None,
            Self::Grouped(groups) => groups
                .iter()
                .find(|g| g.status.as_deref() == Some(status))
                .map(|g| g.records.as_slice()),
        }
    }
}
