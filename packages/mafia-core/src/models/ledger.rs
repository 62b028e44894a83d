use std::collections::BTreeMap;

use super::resident::{ResidentId, Vote};

/// Append-only record of every open-vote ballot.
///
/// Each resident owns one column entry per vote attempt, so all histories
/// always have the same length. A dead resident's entry is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VotingLedger {
    histories: BTreeMap<ResidentId, Vec<Option<ResidentId>>>,
    columns: usize,
}

impl VotingLedger {
    pub fn new(ids: impl IntoIterator<Item = ResidentId>) -> Self {
        VotingLedger {
            histories: ids.into_iter().map(|id| (id, Vec::new())).collect(),
            columns: 0,
        }
    }

    /// Appends one column and returns its index.
    ///
    /// Residents missing from `votes` are recorded as `None`; votes from
    /// unknown voters are ignored.
    pub fn record_column(&mut self, votes: &[Vote]) -> usize {
        let cast: BTreeMap<ResidentId, Option<ResidentId>> =
            votes.iter().map(|v| (v.voter, v.target)).collect();

        for (id, history) in self.histories.iter_mut() {
            history.push(cast.get(id).copied().flatten());
        }
        self.columns += 1;
        self.columns - 1
    }

    pub fn column(&self, index: usize) -> Option<Vec<(ResidentId, Option<ResidentId>)>> {
        if index >= self.columns {
            return None;
        }
        Some(
            self.histories
                .iter()
                .map(|(id, history)| (*id, history[index]))
                .collect(),
        )
    }

    /// Counts votes per target in column `index`, ignoring abstentions.
    pub fn tally(&self, index: usize) -> BTreeMap<ResidentId, usize> {
        let mut counts = BTreeMap::new();
        for target in self
            .histories
            .values()
            .filter_map(|history| history.get(index).copied().flatten())
        {
            *counts.entry(target).or_insert(0) += 1;
        }
        counts
    }

    pub fn history(&self, id: ResidentId) -> Option<&[Option<ResidentId>]> {
        self.histories.get(&id).map(Vec::as_slice)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0
    }

    pub fn snapshot(&self) -> BTreeMap<ResidentId, Vec<Option<ResidentId>>> {
        self.histories.clone()
    }
}

/// Returns the target holding a strict majority of `alive` residents.
///
/// The winning count must exceed `alive / 2`. When several targets share the
/// highest count the lowest ID is taken.
pub fn majority(tally: &BTreeMap<ResidentId, usize>, alive: usize) -> Option<ResidentId> {
    let (&target, &count) = tally
        .iter()
        .fold(None, |best: Option<(&ResidentId, &usize)>, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })?;

    (count > alive / 2).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(voter: ResidentId, target: Option<ResidentId>) -> Vote {
        Vote { voter, target }
    }

    #[test]
    fn new_ledger_has_empty_histories() {
        let ledger = VotingLedger::new(1..=3);
        assert!(ledger.is_empty());
        assert_eq!(ledger.history(2), Some(&[][..]));
        assert_eq!(ledger.history(4), None);
    }

    #[test]
    fn record_column_fills_missing_voters_with_none() {
        let mut ledger = VotingLedger::new(1..=3);
        let index = ledger.record_column(&[vote(1, Some(2)), vote(2, Some(1))]);

        assert_eq!(index, 0);
        assert_eq!(
            ledger.column(0).unwrap(),
            vec![(1, Some(2)), (2, Some(1)), (3, None)]
        );
        assert_eq!(ledger.column(1), None);
    }

    #[test]
    fn tally_ignores_abstentions() {
        let mut ledger = VotingLedger::new(1..=4);
        ledger.record_column(&[vote(1, Some(3)), vote(2, Some(3)), vote(3, None), vote(4, Some(1))]);
        ledger.record_column(&[vote(1, Some(4)), vote(2, None), vote(3, None), vote(4, Some(1))]);

        assert_eq!(ledger.tally(0), BTreeMap::from([(3, 2), (1, 1)]));
        assert_eq!(ledger.tally(1), BTreeMap::from([(4, 1), (1, 1)]));
        assert_eq!(ledger.history(2).unwrap(), &[Some(3), None]);
    }

    #[test]
    fn majority_with_three_alive() {
        let tally = BTreeMap::from([(7, 2), (9, 1)]);
        assert_eq!(majority(&tally, 3), Some(7));
    }

    #[test]
    fn even_split_with_four_alive_has_no_majority() {
        let tally = BTreeMap::from([(7, 2), (9, 2)]);
        assert_eq!(majority(&tally, 4), None);
    }

    #[test]
    fn tie_goes_to_lowest_id() {
        let tally = BTreeMap::from([(9, 3), (4, 3), (6, 1)]);
        assert_eq!(majority(&tally, 5), Some(4));
    }

    #[test]
    fn empty_tally_has_no_majority() {
        assert_eq!(majority(&BTreeMap::new(), 0), None);
    }
}
