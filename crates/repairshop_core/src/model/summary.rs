//! Aggregated cost/income groups produced by summaries.

use serde::{Deserialize, Serialize};

/// Label given to the synthetic group that absorbs overflow descriptions.
pub const OTHER_GROUP_LABEL: &str = "Other";
/// Largest group count shown without collapsing.
pub const MAX_DESCRIPTION_GROUPS: usize = 8;

/// Summed cost and income for one group key (a date or a description).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub label: String,
    pub cost: f64,
    pub income: f64,
}

impl GroupTotal {
    pub fn new(label: impl Into<String>, cost: f64, income: f64) -> Self {
        Self {
            label: label.into(),
            cost,
            income,
        }
    }

    pub fn net_profit(&self) -> f64 {
        self.income - self.cost
    }
}

/// Grand totals across a sequence of groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub cost: f64,
    pub income: f64,
}

impl Totals {
    pub fn of(groups: &[GroupTotal]) -> Self {
        groups.iter().fold(Self::default(), |acc, group| Self {
            cost: acc.cost + group.cost,
            income: acc.income + group.income,
        })
    }

    pub fn net_profit(&self) -> f64 {
        self.income - self.cost
    }
}

/// Collapses groups beyond [`MAX_DESCRIPTION_GROUPS`] into one `"Other"`
/// group.
///
/// Keeps the first seven groups in their given order and sums the rest.
/// Sequences of eight or fewer groups are returned unchanged.
pub fn collapse_overflow(mut groups: Vec<GroupTotal>) -> Vec<GroupTotal> {
    if groups.len() <= MAX_DESCRIPTION_GROUPS {
        return groups;
    }

    let overflow = groups.split_off(MAX_DESCRIPTION_GROUPS - 1);
    let collapsed = Totals::of(&overflow);
    groups.push(GroupTotal::new(
        OTHER_GROUP_LABEL,
        collapsed.cost,
        collapsed.income,
    ));
    groups
}

#[cfg(test)]
mod tests {
    use super::{collapse_overflow, GroupTotal, Totals, OTHER_GROUP_LABEL};

    fn groups(count: usize) -> Vec<GroupTotal> {
        (0..count)
            .map(|index| GroupTotal::new(format!("job-{index}"), index as f64, 10.0))
            .collect()
    }

    #[test]
    fn eight_groups_are_left_alone() {
        let input = groups(8);
        assert_eq!(collapse_overflow(input.clone()), input);
    }

    #[test]
    fn nine_groups_fold_last_two_into_other() {
        let collapsed = collapse_overflow(groups(9));

        assert_eq!(collapsed.len(), 8);
        assert_eq!(collapsed[6].label, "job-6");
        assert_eq!(collapsed[7].label, OTHER_GROUP_LABEL);
        assert_eq!(collapsed[7].cost, 7.0 + 8.0);
        assert_eq!(collapsed[7].income, 20.0);
    }

    #[test]
    fn totals_sum_groups_and_derive_net_profit() {
        let totals = Totals::of(&[
            GroupTotal::new("a", 50.0, 100.0),
            GroupTotal::new("b", 20.0, 40.0),
        ]);

        assert_eq!(totals.cost, 70.0);
        assert_eq!(totals.income, 140.0);
        assert_eq!(totals.net_profit(), 70.0);
        assert_eq!(Totals::of(&[]), Totals::default());
    }
}
