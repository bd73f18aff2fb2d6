//! Hand evaluation result types.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::PlayerId;

/// Categories of poker hands, ordered from weakest to strongest
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandRankCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeKind,
    Straight,
    Flush,
    FullHouse,
    FourKind,
    StraightFlush,
}

/// Complete hand ranking: category first, then kickers in descending
/// significance. Derived `Ord` gives the total order required at showdown.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandRank {
    pub category: HandRankCategory,
    pub tiebreakers: Vec<u8>,
}

/// One player's revealed hand at a contested showdown.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub player_id: PlayerId,
    pub rank: HandRank,
    pub best_five: [Card; 5],
    /// The hole cards shown down, preserved past round teardown.
    pub hole: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_order() {
        assert!(HandRankCategory::StraightFlush > HandRankCategory::FourKind);
        assert!(HandRankCategory::Pair > HandRankCategory::HighCard);
    }

    #[test]
    fn tiebreakers_order_within_category() {
        let kings = HandRank {
            category: HandRankCategory::Pair,
            tiebreakers: vec![13, 9, 7, 4],
        };
        let queens = HandRank {
            category: HandRankCategory::Pair,
            tiebreakers: vec![12, 14, 7, 4],
        };
        assert!(kings > queens);
    }
}
