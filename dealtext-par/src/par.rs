//! Par-score search over a complete double-dummy table.
//!
//! One side earns primacy, the entitlement to a plus score, by holding the
//! strictly higher makeable contract number. Its candidate contracts run
//! from its best-scoring number up to its highest; for each candidate the
//! other side's cheapest doubled sacrifice is priced, and the par outcome
//! is the best the primacy side can secure against that economics. Ties
//! break toward the lower contract number, which realizes bidding only as
//! high as the sacrifice forces.

use tracing::debug;

use dealtext_core::{
    made_score, undertrick_score, Call, Contract, DealError, Denom, Multiplier, Result, Seat,
    Side, Vulnerability,
};

use crate::tableau::Tableau;

/// One par result: the score from North-South's perspective and the
/// equally valid contract(s) realizing it (two in the rare
/// ambiguous-defender sacrifice case).
#[derive(Debug, Clone, PartialEq)]
pub struct Par {
    pub score: i32,
    pub contracts: Vec<Contract>,
}

/// One side's reading of the tableau
struct SideView {
    side: Side,
    vulnerable: bool,
    /// Best trick count per denomination over the side's two seats
    tricks: [u8; 5],
    /// Highest makeable contract number
    highest: Option<u8>,
    /// Best-scoring makeable contract number and its undoubled score
    dearest: Option<(u8, i32)>,
}

impl SideView {
    fn build(tableau: &Tableau, side: Side, vul: Vulnerability) -> SideView {
        let vulnerable = vul.is_vulnerable(side);
        let mut tricks = [0u8; 5];
        for denom in Denom::ALL {
            let mut best = 0;
            for seat in side.seats() {
                best = best.max(tableau.entry(denom, seat).unwrap_or(0));
            }
            tricks[denom as usize] = best;
        }

        let mut highest: Option<u8> = None;
        let mut dearest: Option<(u8, i32)> = None;
        for denom in Denom::ALL {
            let taken = tricks[denom as usize];
            if taken < 7 {
                continue;
            }
            let top = Call::number_for(taken - 6, denom);
            highest = Some(highest.map_or(top, |h| h.max(top)));
            for level in 1..=taken - 6 {
                let score =
                    made_score(level, denom, Multiplier::Undoubled, vulnerable, taken - 6 - level);
                let number = Call::number_for(level, denom);
                let better = match dearest {
                    None => true,
                    Some((n, s)) => score > s || (score == s && number < n),
                };
                if better {
                    dearest = Some((number, score));
                }
            }
        }
        SideView {
            side,
            vulnerable,
            tricks,
            highest,
            dearest,
        }
    }

    fn makes(&self, number: u8) -> bool {
        match (Call::level_of(number), Call::denom_of(number)) {
            (Some(level), Some(denom)) => self.tricks[denom as usize] >= level + 6,
            _ => false,
        }
    }
}

/// Also used for the sacrifice declarer: the first seat in rotation from
/// the dealer on `side` holding the side's best trick count in `denom`
fn declarer_for(
    tableau: &Tableau,
    side: Side,
    denom: Denom,
    best: u8,
    dealer: Seat,
) -> Seat {
    for k in 0..4 {
        let seat = dealer.advance(k);
        if seat.side() == side && tableau.entry(denom, seat).unwrap_or(0) == best {
            return seat;
        }
    }
    // side always holds its own max somewhere
    side.seats()[0]
}

/// The cheapest doubled sacrifice against a candidate contract number
struct Sacrifice {
    denom: Denom,
    level: u8,
    down: u8,
    penalty: i32,
}

fn best_sacrifice(view: &SideView, over: u8) -> Option<Sacrifice> {
    let mut best: Option<Sacrifice> = None;
    for denom in Denom::ALL {
        // minimal level outbidding the candidate
        let mut level = Call::level_of(over).unwrap_or(7);
        if Call::number_for(level, denom) <= over {
            level += 1;
        }
        if level > 7 {
            continue;
        }
        let taken = view.tricks[denom as usize];
        let needed = level + 6;
        if taken >= needed {
            // not a sacrifice; the candidate range already excludes
            // anything this side simply makes
            continue;
        }
        let down = needed - taken;
        let penalty = undertrick_score(down, Multiplier::Doubled, view.vulnerable);
        let number = Call::number_for(level, denom);
        let better = match &best {
            None => true,
            Some(b) => {
                penalty < b.penalty
                    || (penalty == b.penalty && number < Call::number_for(b.level, b.denom))
            }
        };
        if better {
            best = Some(Sacrifice {
                denom,
                level,
                down,
                penalty,
            });
        }
    }
    best
}

/// Compute the par contract(s) and score for a dealer and vulnerability.
/// The tableau must be complete.
pub fn par(tableau: &Tableau, dealer: Seat, vul: Vulnerability) -> Result<Par> {
    if !tableau.is_complete() {
        return Err(DealError::RuleViolation("tableau is incomplete"));
    }
    let ns = SideView::build(tableau, Side::NorthSouth, vul);
    let ew = SideView::build(tableau, Side::EastWest, vul);

    let primacy = match (ns.highest, ew.highest) {
        (None, None) => {
            return Ok(Par {
                score: 0,
                contracts: vec![Contract::passed_out(vul)],
            })
        }
        (Some(_), None) => &ns,
        (None, Some(_)) => &ew,
        (Some(a), Some(b)) if a > b => &ns,
        (Some(a), Some(b)) if b > a => &ew,
        (Some(a), Some(_)) => {
            // exact tie: the side that can name the contract first in
            // rotation from the dealer gets primacy
            first_namer(tableau, dealer, a)
                .map(|side| if side == Side::NorthSouth { &ns } else { &ew })
                .unwrap_or(&ns)
        }
    };
    let defense = if primacy.side == Side::NorthSouth { &ew } else { &ns };
    debug!(side = ?primacy.side, highest = primacy.highest, "primacy");

    let (dearest, _) = primacy
        .dearest
        .ok_or(DealError::RuleViolation("primacy side makes nothing"))?;
    let highest = primacy
        .highest
        .ok_or(DealError::RuleViolation("primacy side makes nothing"))?;
    // contracts the defense simply makes are outbid, not sacrificed
    // against; on an exact tie of highest numbers the rotation winner
    // still gets to name the shared top contract
    let floor = defense.highest.unwrap_or(0).min(highest - 1);

    // best outcome for the primacy side over its candidate contracts
    struct Outcome {
        number: u8,
        value: i32,
        sacrifice: Option<Sacrifice>,
    }
    let mut best: Option<Outcome> = None;
    for number in dearest..=highest {
        if number <= floor || !primacy.makes(number) {
            continue;
        }
        let level = Call::level_of(number)
            .ok_or_else(|| DealError::Range(format!("contract number {}", number)))?;
        let denom = Call::denom_of(number)
            .ok_or_else(|| DealError::Range(format!("contract number {}", number)))?;
        let taken = primacy.tricks[denom as usize];
        let own = made_score(
            level,
            denom,
            Multiplier::Undoubled,
            primacy.vulnerable,
            taken - 6 - level,
        );
        let (value, sacrifice) = match best_sacrifice(defense, number) {
            Some(sac) if sac.penalty < own => {
                let penalty = sac.penalty;
                debug!(number, penalty, "sacrifice beats bidding on");
                (penalty, Some(sac))
            }
            _ => (own, None),
        };
        let better = match &best {
            None => true,
            Some(b) => value > b.value || (value == b.value && number < b.number),
        };
        if better {
            best = Some(Outcome {
                number,
                value,
                sacrifice,
            });
        }
    }
    let outcome = best.ok_or(DealError::RuleViolation("no par candidate"))?;

    let level = Call::level_of(outcome.number)
        .ok_or_else(|| DealError::Range(format!("contract number {}", outcome.number)))?;
    let denom = Call::denom_of(outcome.number)
        .ok_or_else(|| DealError::Range(format!("contract number {}", outcome.number)))?;

    let mut contracts = Vec::new();
    let score;
    match outcome.sacrifice {
        None => {
            let taken = primacy.tricks[denom as usize];
            let declarer = declarer_for(tableau, primacy.side, denom, taken, dealer);
            let mut contract = Contract::new();
            contract.set_contract(declarer, level, denom, Multiplier::Undoubled)?;
            contract.set_vul(vul)?;
            contract.set_tricks_relative((taken - 6 - level) as i8)?;
            score = outcome.value;
            contracts.push(contract);
        }
        Some(sac) => {
            let taken = defense.tricks[sac.denom as usize];
            let seats = defense.side.seats();
            // a sacrifice in the primacy side's own denomination can be
            // saved by either defender when both hold the same tricks
            let both = sac.denom == denom
                && tableau.entry(sac.denom, seats[0]) == tableau.entry(sac.denom, seats[1]);
            let declarers: Vec<Seat> = if both {
                let mut s = seats.to_vec();
                s.sort_by_key(|seat| *seat as u8);
                s
            } else {
                vec![declarer_for(tableau, defense.side, sac.denom, taken, dealer)]
            };
            for declarer in declarers {
                let mut contract = Contract::new();
                contract.set_contract(declarer, sac.level, sac.denom, Multiplier::Doubled)?;
                contract.set_vul(vul)?;
                contract.set_tricks_relative(-(sac.down as i8))?;
                contracts.push(contract);
            }
            score = outcome.value;
        }
    }

    let score_ns = if primacy.side == Side::NorthSouth {
        score
    } else {
        -score
    };
    Ok(Par {
        score: score_ns,
        contracts,
    })
}

/// On an exact tie of highest contract numbers, the side of the first seat
/// in rotation from the dealer able to declare that contract
fn first_namer(tableau: &Tableau, dealer: Seat, number: u8) -> Option<Side> {
    let level = Call::level_of(number)?;
    let denom = Call::denom_of(number)?;
    for k in 0..4 {
        let seat = dealer.advance(k);
        if tableau.entry(denom, seat).unwrap_or(0) >= level + 6 {
            return Some(seat.side());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a complete tableau from per-seat trick counts in N-E-S-W
    /// order, one row per denomination C-D-H-S-NT
    fn tableau(rows: [[u8; 4]; 5]) -> Tableau {
        let mut t = Tableau::new();
        for denom in Denom::ALL {
            for seat in Seat::ALL {
                t.set_entry(denom, seat, rows[denom as usize][seat as usize])
                    .unwrap();
            }
        }
        t
    }

    #[test]
    fn test_incomplete_tableau_rejected() {
        let t = Tableau::new();
        assert!(matches!(
            par(&t, Seat::North, Vulnerability::None),
            Err(DealError::RuleViolation(_))
        ));
    }

    #[test]
    fn test_passed_out_when_nobody_makes() {
        let t = tableau([[6, 6, 6, 6]; 5]);
        let p = par(&t, Seat::West, Vulnerability::Both).unwrap();
        assert_eq!(p.score, 0);
        assert_eq!(p.contracts.len(), 1);
        assert!(p.contracts[0].is_passed_out());
    }

    #[test]
    fn test_making_game_when_sacrifice_is_too_dear() {
        // North-South make exactly 4S; every East-West sacrifice goes
        // down at least five doubled
        let t = tableau([
            [6, 5, 6, 5],
            [6, 5, 6, 5],
            [6, 5, 6, 5],
            [10, 3, 10, 3],
            [6, 5, 6, 5],
        ]);
        let p = par(&t, Seat::North, Vulnerability::None).unwrap();
        assert_eq!(p.score, 420);
        assert_eq!(p.contracts.len(), 1);
        let c = &p.contracts[0];
        assert_eq!(c.declarer(), Seat::North);
        assert_eq!(c.level(), 4);
        assert_eq!(c.denom(), Denom::Spades);
        assert_eq!(c.multiplier(), Multiplier::Undoubled);
        assert_eq!(c.tricks_relative(), Some(0));

        let vul = par(&t, Seat::North, Vulnerability::NorthSouth).unwrap();
        assert_eq!(vul.score, 620);
    }

    #[test]
    fn test_profitable_sacrifice_collected() {
        // North-South make 4S vulnerable (620); East-West hold nine club
        // tricks, so 5CX down two costs only 300
        let t = tableau([
            [6, 9, 6, 8],
            [5, 5, 5, 5],
            [5, 5, 5, 5],
            [10, 3, 10, 3],
            [5, 5, 5, 5],
        ]);
        let p = par(&t, Seat::North, Vulnerability::NorthSouth).unwrap();
        assert_eq!(p.score, 300);
        assert_eq!(p.contracts.len(), 1);
        let c = &p.contracts[0];
        assert_eq!(c.declarer(), Seat::East);
        assert_eq!(c.level(), 5);
        assert_eq!(c.denom(), Denom::Clubs);
        assert_eq!(c.multiplier(), Multiplier::Doubled);
        assert_eq!(c.tricks_relative(), Some(-2));
    }

    #[test]
    fn test_ambiguous_defender_reported_twice() {
        // the sacrifice is in the primacy side's own suit and both
        // defenders hold eight spade tricks: 5SX down three, either seat
        let t = tableau([
            [5, 5, 5, 5],
            [5, 5, 5, 5],
            [5, 5, 5, 5],
            [10, 8, 10, 8],
            [5, 5, 5, 5],
        ]);
        let p = par(&t, Seat::North, Vulnerability::NorthSouth).unwrap();
        assert_eq!(p.score, 500);
        assert_eq!(p.contracts.len(), 2);
        assert_eq!(p.contracts[0].declarer(), Seat::East);
        assert_eq!(p.contracts[1].declarer(), Seat::West);
        for c in &p.contracts {
            assert_eq!(c.level(), 5);
            assert_eq!(c.denom(), Denom::Spades);
            assert_eq!(c.multiplier(), Multiplier::Doubled);
            assert_eq!(c.tricks_relative(), Some(-3));
        }
    }

    #[test]
    fn test_tie_broken_by_rotation_from_dealer() {
        // both sides make exactly 1NT; the dealer's side names it first
        let mut rows = [[5, 5, 5, 5]; 5];
        rows[Denom::NoTrump as usize] = [7, 7, 5, 5];
        let t = tableau(rows);

        let p = par(&t, Seat::North, Vulnerability::None).unwrap();
        assert_eq!(p.score, 90);
        assert_eq!(p.contracts[0].declarer(), Seat::North);

        let q = par(&t, Seat::East, Vulnerability::None).unwrap();
        assert_eq!(q.score, -90);
        assert_eq!(q.contracts[0].declarer(), Seat::East);
    }

    #[test]
    fn test_bids_only_as_high_as_the_sacrifice_forces() {
        // North-South take ten heart tricks but game is not on the cards
        // for the defense to outbid cheaply; with no East-West make at
        // all, the par is simply the best-scoring game
        let t = tableau([
            [5, 4, 5, 4],
            [5, 4, 5, 4],
            [10, 2, 10, 2],
            [5, 4, 5, 4],
            [6, 4, 6, 4],
        ]);
        let p = par(&t, Seat::South, Vulnerability::EastWest).unwrap();
        assert_eq!(p.score, 420);
        let c = &p.contracts[0];
        assert_eq!(c.level(), 4);
        assert_eq!(c.denom(), Denom::Hearts);
        assert_eq!(c.declarer(), Seat::South);
    }
}
