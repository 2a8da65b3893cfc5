use crate::{Card, DealError, Rank, Result, Seat, Suit};

/// The ranks a seat still holds in one suit, as a 13-bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Holding(u16);

impl Holding {
    /// Empty holding
    pub fn new() -> Self {
        Holding(0)
    }

    pub fn contains(&self, rank: Rank) -> bool {
        self.0 & (1 << rank as u16) != 0
    }

    pub fn add(&mut self, rank: Rank) {
        self.0 |= 1 << rank as u16;
    }

    pub fn remove(&mut self, rank: Rank) {
        self.0 &= !(1 << rank as u16);
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Ranks present, highest first
    pub fn ranks(&self) -> Vec<Rank> {
        Rank::ALL
            .iter()
            .rev()
            .copied()
            .filter(|r| self.contains(*r))
            .collect()
    }
}

/// A complete bridge deal: per seat, per suit, the ranks still held.
///
/// Play removes cards as they hit the table and restores them on undo,
/// so mid-play the deal reflects the remaining holdings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Deal {
    holdings: [[Holding; 4]; 4],
}

impl Deal {
    /// Create a new empty deal
    pub fn new() -> Self {
        Deal::default()
    }

    /// The given seat's holding in one suit
    pub fn holding(&self, seat: Seat, suit: Suit) -> Holding {
        self.holdings[seat as usize][suit as usize]
    }

    /// Deal a card to a seat; rejects a card already dealt to any seat
    pub fn give(&mut self, seat: Seat, card: Card) -> Result<()> {
        for s in Seat::ALL {
            if self.holdings[s as usize][card.suit as usize].contains(card.rank) {
                return Err(DealError::RuleViolation("card dealt twice"));
            }
        }
        self.holdings[seat as usize][card.suit as usize].add(card.rank);
        Ok(())
    }

    /// Does the seat currently hold this card?
    pub fn has(&self, seat: Seat, card: Card) -> bool {
        self.holdings[seat as usize][card.suit as usize].contains(card.rank)
    }

    /// Does the seat hold any card of the suit?
    pub fn has_suit(&self, seat: Seat, suit: Suit) -> bool {
        !self.holdings[seat as usize][suit as usize].is_empty()
    }

    /// Remove a played card from its seat's holding
    pub fn remove(&mut self, seat: Seat, card: Card) {
        self.holdings[seat as usize][card.suit as usize].remove(card.rank);
    }

    /// Put an undone card back into its seat's holding
    pub fn restore(&mut self, seat: Seat, card: Card) {
        self.holdings[seat as usize][card.suit as usize].add(card.rank);
    }

    /// Total cards held by a seat
    pub fn seat_len(&self, seat: Seat) -> usize {
        Suit::ALL
            .iter()
            .map(|&suit| self.holding(seat, suit).len())
            .sum()
    }

    /// Is this a full 52-card deal with 13 cards per seat?
    pub fn is_complete(&self) -> bool {
        Seat::ALL.iter().all(|&seat| self.seat_len(seat) == 13)
    }
}
