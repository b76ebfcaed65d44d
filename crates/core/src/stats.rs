//! Origin aggregation helpers.

use serde::{Deserialize, Serialize};

use crate::{OTHER_ORIGIN_LABEL, RankedName};

/// Number of names sharing one origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginCount {
    pub origin: String,
    pub count: u64,
}

/// Record total, search ranking and per-origin counts read together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameOverview {
    pub total: u64,
    pub top: Vec<RankedName>,
    pub origins: Vec<OriginCount>,
}

/// Keep the first `slots` entries and sum the rest into one `Other` entry.
///
/// `counts` must already be ordered by descending count. The `Other` entry is
/// only added when there are more than `slots` origins. A real origin called
/// `Other` among the kept entries absorbs the folded count instead of getting
/// a second `Other` row; the result is re-sorted by descending count.
pub fn fold_origins(counts: Vec<OriginCount>, slots: usize) -> Vec<OriginCount> {
    if counts.len() <= slots {
        return counts;
    }
    let mut counts = counts;
    let rest = counts.split_off(slots);
    let other: u64 = rest.iter().map(|c| c.count).sum();
    match counts.iter_mut().find(|c| c.origin == OTHER_ORIGIN_LABEL) {
        Some(existing) => {
            existing.count += other;
            counts.sort_by(|a, b| b.count.cmp(&a.count));
        },
        None => counts.push(OriginCount { origin: OTHER_ORIGIN_LABEL.to_owned(), count: other }),
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oc(origin: &str, count: u64) -> OriginCount {
        OriginCount { origin: origin.to_owned(), count }
    }

    #[test]
    fn eleven_origins_fold_the_smallest() {
        let mut counts = vec![oc("A", 12), oc("B", 7), oc("C", 3)];
        for (i, letter) in ["D", "E", "F", "G", "H", "I", "J", "K"].iter().enumerate() {
            counts.push(oc(letter, 2 - u64::from(i >= 4)));
        }
        let total: u64 = counts.iter().map(|c| c.count).sum();
        let top_ten: u64 = counts[..10].iter().map(|c| c.count).sum();

        let folded = fold_origins(counts, 10);
        assert_eq!(folded.len(), 11);
        assert_eq!(folded[0], oc("A", 12));
        assert_eq!(folded[10].origin, "Other");
        assert_eq!(folded[10].count, total - top_ten);
    }

    #[test]
    fn ten_or_fewer_origins_are_untouched() {
        let counts: Vec<_> = (0..10).map(|i| oc(&format!("O{i}"), 10 - i)).collect();
        let folded = fold_origins(counts.clone(), 10);
        assert_eq!(folded, counts);
    }

    #[test]
    fn real_other_origin_absorbs_the_folded_rest() {
        let mut counts = vec![oc("Other", 50)];
        counts.extend((0..9).map(|i| oc(&format!("O{i}"), 30 - i)));
        counts.extend([oc("Tail1", 12), oc("Tail2", 9)]);

        let folded = fold_origins(counts, 10);
        assert_eq!(folded.len(), 10);
        assert_eq!(folded.iter().filter(|c| c.origin == "Other").count(), 1);
        assert_eq!(folded[0], oc("Other", 71));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(fold_origins(Vec::new(), 10).is_empty());
    }
}
