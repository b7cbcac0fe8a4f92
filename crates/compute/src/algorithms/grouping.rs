use std::collections::BTreeMap;

/// Row indices partitioned by label, in ascending label order.
///
/// Built in a single pass over the label vector. Within a group, row indices
/// keep their original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGroups<L> {
    labels: Vec<L>,
    groups: Vec<Vec<usize>>,
    /// Group position for every row, indexed by row.
    row_group: Vec<usize>,
}

impl<L: Ord + Clone> LabelGroups<L> {
    /// Partition row indices `0..labels.len()` by label value.
    pub fn from_labels(labels: &[L]) -> Self {
        let mut by_label: BTreeMap<&L, Vec<usize>> = BTreeMap::new();
        for (row, label) in labels.iter().enumerate() {
            by_label.entry(label).or_default().push(row);
        }

        let mut ordered_labels = Vec::with_capacity(by_label.len());
        let mut groups = Vec::with_capacity(by_label.len());
        let mut row_group = vec![0usize; labels.len()];

        for (pos, (label, rows)) in by_label.into_iter().enumerate() {
            for &row in &rows {
                row_group[row] = pos;
            }
            ordered_labels.push(label.clone());
            groups.push(rows);
        }

        Self {
            labels: ordered_labels,
            groups,
            row_group,
        }
    }
}

impl<L> LabelGroups<L> {
    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Distinct labels in ascending order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Row indices of the group at position `group`.
    pub fn indices(&self, group: usize) -> Option<&[usize]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// (label, row indices) pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &[usize])> {
        self.labels
            .iter()
            .zip(self.groups.iter().map(Vec::as_slice))
    }

    pub(crate) fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Total number of rows across all groups.
    pub fn row_count(&self) -> usize {
        self.row_group.len()
    }

    /// Group position of `row`, or `None` when out of range.
    pub fn group_of_row(&self, row: usize) -> Option<usize> {
        self.row_group.get(row).copied()
    }
}
