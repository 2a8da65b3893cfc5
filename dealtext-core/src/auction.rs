use tracing::trace;

use crate::{Contract, DealError, Denom, Multiplier, Result, Seat, Vulnerability};

pub const CALL_PASS: u8 = 0;
pub const CALL_DOUBLE: u8 = 1;
pub const CALL_REDOUBLE: u8 = 2;

/// One call in an auction: a call number 0..37 plus any alert attached to
/// it. `note` is the numbered placeholder some dialects use to point at a
/// footnote supplied later; `alerted` covers the bare "alerted, no text"
/// marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub number: u8,
    pub alerted: bool,
    pub note: Option<u8>,
    pub alert: Option<String>,
}

impl Call {
    /// Create a call from its number (0..37)
    pub fn new(number: u8) -> Option<Self> {
        if number >= 38 {
            return None;
        }
        Some(Call {
            number,
            alerted: false,
            note: None,
            alert: None,
        })
    }

    /// Create a bid call for a level and denomination
    pub fn bid(level: u8, denom: Denom) -> Option<Self> {
        if !(1..=7).contains(&level) {
            return None;
        }
        Call::new(Self::number_for(level, denom))
    }

    /// Call number of a bid: 3 + 5*(level-1) + denomination index
    pub fn number_for(level: u8, denom: Denom) -> u8 {
        3 + 5 * (level - 1) + denom as u8
    }

    /// Is this a bid (rather than pass, double or redouble)?
    pub fn is_bid(&self) -> bool {
        self.number > CALL_REDOUBLE
    }

    /// Level of a bid number (3..37)
    pub fn level_of(number: u8) -> Option<u8> {
        if (3..38).contains(&number) {
            Some((number - 3) / 5 + 1)
        } else {
            None
        }
    }

    /// Denomination of a bid number (3..37)
    pub fn denom_of(number: u8) -> Option<Denom> {
        if (3..38).contains(&number) {
            Denom::from_index((number - 3) % 5)
        } else {
            None
        }
    }

    /// Attach alert state to this call
    pub fn with_alert(mut self, text: &str) -> Self {
        self.alerted = true;
        self.alert = Some(text.to_string());
        self
    }
}

/// The bidding state machine for one board.
///
/// Calls are appended in rotation from the dealer; each append is checked
/// against bidding legality and either accepted or rejected with a
/// `RuleViolation`. The auction is terminal after four consecutive passes
/// (passed out) or three consecutive passes following at least one bid.
#[derive(Debug, Clone, Default)]
pub struct Auction {
    dealer: Option<Seat>,
    vul: Option<Vulnerability>,
    calls: Vec<Call>,
    /// Highest bid so far and its position in the sequence
    active_bid: Option<(u8, usize)>,
    consecutive_passes: u8,
    multiplier: Multiplier,
}

impl Auction {
    pub fn new() -> Self {
        Auction::default()
    }

    /// Set the dealer; identical repeats are no-ops
    pub fn set_dealer(&mut self, dealer: Seat) -> Result<()> {
        match self.dealer {
            Some(d) if d == dealer => Ok(()),
            Some(_) => Err(DealError::AlreadySet("dealer")),
            None => {
                self.dealer = Some(dealer);
                Ok(())
            }
        }
    }

    /// Set the vulnerability; identical repeats are no-ops
    pub fn set_vul(&mut self, vul: Vulnerability) -> Result<()> {
        match self.vul {
            Some(v) if v == vul => Ok(()),
            Some(_) => Err(DealError::AlreadySet("vulnerability")),
            None => {
                self.vul = Some(vul);
                Ok(())
            }
        }
    }

    pub fn dealer(&self) -> Option<Seat> {
        self.dealer
    }

    pub fn vul(&self) -> Option<Vulnerability> {
        self.vul
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Terminal: four passes with no bid, or three passes after a bid
    pub fn is_over(&self) -> bool {
        self.consecutive_passes >= 4
            || (self.active_bid.is_some() && self.consecutive_passes >= 3)
    }

    /// Four passes with no bid ever made
    pub fn is_passed_out(&self) -> bool {
        self.active_bid.is_none() && self.consecutive_passes >= 4
    }

    /// The seat that acts at sequence position `index`
    pub fn seat_at(&self, index: usize) -> Result<Seat> {
        let dealer = self.dealer.ok_or(DealError::RuleViolation("dealer not set"))?;
        Ok(dealer.advance(index))
    }

    /// Seat to act next, while the auction is open
    pub fn next_seat(&self) -> Result<Seat> {
        self.seat_at(self.calls.len())
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Append a call, enforcing bidding legality
    pub fn add_call(&mut self, call: Call) -> Result<()> {
        if self.is_over() {
            return Err(DealError::RuleViolation("call after auction is over"));
        }
        match call.number {
            CALL_PASS => {
                self.consecutive_passes += 1;
            }
            CALL_DOUBLE => {
                if self.active_bid.is_none() || self.multiplier != Multiplier::Undoubled {
                    return Err(DealError::RuleViolation("double not available"));
                }
                self.multiplier = Multiplier::Doubled;
                self.consecutive_passes = 0;
            }
            CALL_REDOUBLE => {
                if self.multiplier != Multiplier::Doubled {
                    return Err(DealError::RuleViolation("redouble not available"));
                }
                self.multiplier = Multiplier::Redoubled;
                self.consecutive_passes = 0;
            }
            n if n < 38 => {
                if let Some((active, _)) = self.active_bid {
                    if n <= active {
                        return Err(DealError::RuleViolation("bid not above the active bid"));
                    }
                }
                self.active_bid = Some((n, self.calls.len()));
                self.multiplier = Multiplier::Undoubled;
                self.consecutive_passes = 0;
            }
            n => {
                return Err(DealError::Range(format!("call number {}", n)));
            }
        }
        self.calls.push(call);
        Ok(())
    }

    /// Append passes until the auction is over ("all pass" shorthand)
    pub fn add_passes(&mut self) -> Result<()> {
        while !self.is_over() {
            self.add_call(Call {
                number: CALL_PASS,
                alerted: false,
                note: None,
                alert: None,
            })?;
        }
        Ok(())
    }

    /// Back-patch the alert text for a numbered placeholder
    pub fn add_alert(&mut self, note: u8, text: &str) -> Result<()> {
        let mut found = false;
        for call in &mut self.calls {
            if call.note == Some(note) {
                call.alerted = true;
                call.alert = Some(text.to_string());
                found = true;
            }
        }
        if found {
            Ok(())
        } else {
            Err(DealError::Range(format!("unknown alert note {}", note)))
        }
    }

    /// Remove the last call, restoring the prior bidding state exactly
    pub fn undo_last_call(&mut self) -> Result<()> {
        if self.calls.is_empty() {
            return Err(DealError::RuleViolation("nothing to undo"));
        }
        if self.is_over() {
            return Err(DealError::RuleViolation("undo after auction is over"));
        }
        self.calls.pop();
        self.recompute();
        Ok(())
    }

    /// Rebuild derived state by replaying the call sequence
    fn recompute(&mut self) {
        self.active_bid = None;
        self.consecutive_passes = 0;
        self.multiplier = Multiplier::Undoubled;
        for (i, call) in self.calls.iter().enumerate() {
            match call.number {
                CALL_PASS => self.consecutive_passes += 1,
                CALL_DOUBLE => {
                    self.multiplier = Multiplier::Doubled;
                    self.consecutive_passes = 0;
                }
                CALL_REDOUBLE => {
                    self.multiplier = Multiplier::Redoubled;
                    self.consecutive_passes = 0;
                }
                n => {
                    self.active_bid = Some((n, i));
                    self.multiplier = Multiplier::Undoubled;
                    self.consecutive_passes = 0;
                }
            }
        }
    }

    /// The finished contract skeleton, or None while the auction is open.
    ///
    /// The declarer is the seat on the declaring side that *first* named
    /// the winning denomination, per standard convention.
    pub fn contract(&self) -> Result<Option<Contract>> {
        if !self.is_over() {
            return Ok(None);
        }
        if self.is_passed_out() {
            let vul = self
                .vul
                .ok_or(DealError::RuleViolation("vulnerability not set"))?;
            return Ok(Some(Contract::passed_out(vul)));
        }
        let (number, position) = self
            .active_bid
            .ok_or(DealError::RuleViolation("no active bid"))?;
        let level = Call::level_of(number)
            .ok_or_else(|| DealError::Range(format!("bid number {}", number)))?;
        let denom = Call::denom_of(number)
            .ok_or_else(|| DealError::Range(format!("bid number {}", number)))?;
        let side = self.seat_at(position)?.side();

        let mut declarer = self.seat_at(position)?;
        for (i, call) in self.calls.iter().enumerate() {
            if !call.is_bid() {
                continue;
            }
            let seat = self.seat_at(i)?;
            if seat.side() == side && Call::denom_of(call.number) == Some(denom) {
                declarer = seat;
                break;
            }
        }

        trace!(?declarer, level, ?denom, "auction settled");
        let vul = self
            .vul
            .ok_or(DealError::RuleViolation("vulnerability not set"))?;
        let mut contract = Contract::new();
        contract.set_contract(declarer, level, denom, self.multiplier)?;
        contract.set_vul(vul)?;
        Ok(Some(contract))
    }
}
