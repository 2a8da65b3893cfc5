use once_cell::sync::Lazy;
use tracing::trace;

use crate::{Card, Contract, Deal, DealError, Denom, Result, Seat, Suit};

/// Trick-rank table, built once: for every (trump, suit led) pair, the rank
/// of each of the 52 cards. Cards of the suit led rank 0..12, trump cards
/// rank 13..25 and always outrank the suit led, everything else is a
/// discard at rank 0.
static TRICK_RANK: Lazy<[[[u8; 52]; 4]; 5]> = Lazy::new(|| {
    let mut table = [[[0u8; 52]; 4]; 5];
    for trump in 0..5u8 {
        for led in 0..4u8 {
            for index in 0..52u8 {
                let suit = index / 13;
                let rank = index % 13;
                table[trump as usize][led as usize][index as usize] = if suit == trump {
                    13 + rank
                } else if suit == led {
                    rank
                } else {
                    0
                };
            }
        }
    }
    table
});

fn trick_rank(trump: Denom, suit_led: Suit, card: Card) -> u8 {
    TRICK_RANK[trump as usize][suit_led as usize][card.to_index() as usize]
}

/// One completed trick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trick {
    pub leader: Seat,
    pub suit_led: Suit,
    pub winner: Seat,
}

/// The card-play state machine for one board.
///
/// Cards are played one at a time against the remaining holdings; each play
/// is checked for possession and for revokes. The fourth card of a trick
/// settles the winner, updates the trick counters and hands the lead on.
/// A claim fixes the declarer's final trick count and ends play.
#[derive(Debug, Clone)]
pub struct Play {
    deal: Deal,
    trump: Denom,
    declarer: Seat,
    opening_leader: Seat,
    seq: Vec<Card>,
    tricks: Vec<Trick>,
    current_leader: Seat,
    declarer_tricks: u8,
    defense_tricks: u8,
    claimed: Option<u8>,
}

impl Play {
    /// Start play of a contract against a full 52-card deal. The opening
    /// leader is the seat left of declarer.
    pub fn new(deal: Deal, trump: Denom, declarer: Seat) -> Result<Self> {
        if !deal.is_complete() {
            return Err(DealError::RuleViolation("deal is not 52 cards"));
        }
        let opening_leader = declarer.next();
        Ok(Play {
            deal,
            trump,
            declarer,
            opening_leader,
            seq: Vec::with_capacity(52),
            tricks: Vec::with_capacity(13),
            current_leader: opening_leader,
            declarer_tricks: 0,
            defense_tricks: 0,
            claimed: None,
        })
    }

    /// Start play from an auction's finished contract skeleton
    pub fn from_contract(deal: Deal, contract: &Contract) -> Result<Self> {
        if !contract.is_set() || contract.is_passed_out() {
            return Err(DealError::RuleViolation("no contract to play"));
        }
        Play::new(deal, contract.denom(), contract.declarer())
    }

    pub fn trump(&self) -> Denom {
        self.trump
    }

    pub fn declarer(&self) -> Seat {
        self.declarer
    }

    pub fn opening_leader(&self) -> Seat {
        self.opening_leader
    }

    /// Cards played so far, in table order
    pub fn sequence(&self) -> &[Card] {
        &self.seq
    }

    /// Completed tricks so far
    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn declarer_tricks(&self) -> u8 {
        self.declarer_tricks
    }

    pub fn defense_tricks(&self) -> u8 {
        self.defense_tricks
    }

    /// Remaining holdings (cards not yet played)
    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    pub fn is_over(&self) -> bool {
        self.claimed.is_some() || self.tricks.len() == 13
    }

    /// Leader of the trick in progress (or of the next trick)
    pub fn leader(&self) -> Seat {
        self.current_leader
    }

    /// Seat due to play the next card
    pub fn current_seat(&self) -> Seat {
        self.current_leader.advance(self.seq.len() % 4)
    }

    /// Suit led to the trick in progress, if a card is down
    pub fn suit_led(&self) -> Option<Suit> {
        let pos = self.seq.len() % 4;
        if pos == 0 {
            None
        } else {
            Some(self.seq[self.seq.len() - pos].suit)
        }
    }

    /// Declarer's final trick count: a claim if one was made, otherwise the
    /// counted total once all 13 tricks are in
    pub fn final_tricks(&self) -> Option<u8> {
        if let Some(claimed) = self.claimed {
            Some(claimed)
        } else if self.tricks.len() == 13 {
            Some(self.declarer_tricks)
        } else {
            None
        }
    }

    /// Play one card, enforcing possession and follow-suit legality
    pub fn play(&mut self, card: Card) -> Result<()> {
        if self.is_over() {
            return Err(DealError::RuleViolation("play after play is over"));
        }
        let seat = self.current_seat();
        if !self.deal.has(seat, card) {
            return Err(DealError::RuleViolation("card not held"));
        }
        if let Some(suit_led) = self.suit_led() {
            if card.suit != suit_led && self.deal.has_suit(seat, suit_led) {
                return Err(DealError::RuleViolation("revoke"));
            }
        }
        self.deal.remove(seat, card);
        self.seq.push(card);
        if self.seq.len() % 4 == 0 {
            self.complete_trick();
        }
        Ok(())
    }

    /// Settle the trick just completed: highest card under the trick-rank
    /// table wins (ties impossible by construction), counters update and
    /// the winner leads next.
    fn complete_trick(&mut self) {
        let cards = &self.seq[self.seq.len() - 4..];
        let suit_led = cards[0].suit;
        let mut best = 0usize;
        for i in 1..4 {
            if trick_rank(self.trump, suit_led, cards[i])
                > trick_rank(self.trump, suit_led, cards[best])
            {
                best = i;
            }
        }
        let winner = self.current_leader.advance(best);
        if winner.side() == self.declarer.side() {
            self.declarer_tricks += 1;
        } else {
            self.defense_tricks += 1;
        }
        trace!(trick = self.tricks.len() + 1, ?winner, "trick complete");
        self.tricks.push(Trick {
            leader: self.current_leader,
            suit_led,
            winner,
        });
        self.current_leader = winner;
    }

    /// Remove the last played card, reversing trick bookkeeping when the
    /// undone card had completed a trick
    pub fn undo(&mut self) -> Result<()> {
        if self.claimed.is_some() {
            return Err(DealError::RuleViolation("undo after claim"));
        }
        let card = match self.seq.last() {
            Some(&card) => card,
            None => return Err(DealError::RuleViolation("nothing to undo")),
        };
        if self.seq.len() % 4 == 0 {
            let trick = self.tricks.pop().ok_or(DealError::RuleViolation("nothing to undo"))?;
            if trick.winner.side() == self.declarer.side() {
                self.declarer_tricks -= 1;
            } else {
                self.defense_tricks -= 1;
            }
            self.current_leader = trick.leader;
        }
        self.seq.pop();
        let seat = self.current_leader.advance(self.seq.len() % 4);
        self.deal.restore(seat, card);
        Ok(())
    }

    /// Fix the declarer's final trick count by claim. Repeating an existing
    /// claim is a no-op; a conflicting claim, or a claim disagreeing with a
    /// fully played-out board, is rejected.
    pub fn claim(&mut self, declarer_tricks: u8) -> Result<()> {
        if declarer_tricks > 13 {
            return Err(DealError::Range(format!("claimed tricks {}", declarer_tricks)));
        }
        if let Some(existing) = self.claimed {
            if existing == declarer_tricks {
                return Ok(());
            }
            return Err(DealError::RuleViolation("conflicting claim"));
        }
        if self.tricks.len() == 13 && self.declarer_tricks != declarer_tricks {
            return Err(DealError::RuleViolation("claim disagrees with played result"));
        }
        self.claimed = Some(declarer_tricks);
        Ok(())
    }
}
