use crate::score::{made_score, undertrick_score};
use crate::{DealError, Denom, Multiplier, Result, Seat, Side, Vulnerability};

/// The final contract of a board, with its result once known.
///
/// Contract and vulnerability are immutable once set: re-setting an
/// identical value is a no-op, a conflicting value is rejected. The trick
/// result is settable exactly once under the same rule. A passed-out board
/// is represented as level 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    declarer: Seat,
    level: u8,
    denom: Denom,
    multiplier: Multiplier,
    vul: Option<Vulnerability>,
    tricks_rel: Option<i8>,
    contract_set: bool,
}

impl Contract {
    /// Create an empty contract, to be filled in as the record is read
    pub fn new() -> Self {
        Contract {
            declarer: Seat::North,
            level: 0,
            denom: Denom::Clubs,
            multiplier: Multiplier::Undoubled,
            vul: None,
            tricks_rel: None,
            contract_set: false,
        }
    }

    /// A passed-out board: level 0, result 0, score 0
    pub fn passed_out(vul: Vulnerability) -> Self {
        let mut c = Contract::new();
        c.contract_set = true;
        c.vul = Some(vul);
        c.tricks_rel = Some(0);
        c
    }

    /// Mark the board as passed out without fixing the vulnerability
    pub fn set_passed_out(&mut self) -> Result<()> {
        if self.contract_set {
            if self.level == 0 {
                return Ok(());
            }
            return Err(DealError::AlreadySet("contract"));
        }
        self.contract_set = true;
        self.tricks_rel = Some(0);
        Ok(())
    }

    /// Fix the contract. Identical repeat calls are no-ops; a conflicting
    /// call is an AlreadySet error.
    pub fn set_contract(
        &mut self,
        declarer: Seat,
        level: u8,
        denom: Denom,
        multiplier: Multiplier,
    ) -> Result<()> {
        if !(1..=7).contains(&level) {
            return Err(DealError::Range(format!("contract level {}", level)));
        }
        if self.contract_set {
            if self.declarer == declarer
                && self.level == level
                && self.denom == denom
                && self.multiplier == multiplier
            {
                return Ok(());
            }
            return Err(DealError::AlreadySet("contract"));
        }
        self.declarer = declarer;
        self.level = level;
        self.denom = denom;
        self.multiplier = multiplier;
        self.contract_set = true;
        Ok(())
    }

    /// Fix the vulnerability, with the same set-once rule
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

    /// Fix the result as tricks relative to the contract (-13..=+6)
    pub fn set_tricks_relative(&mut self, rel: i8) -> Result<()> {
        if !(-13..=6).contains(&rel) {
            return Err(DealError::Range(format!("relative tricks {}", rel)));
        }
        match self.tricks_rel {
            Some(t) if t == rel => Ok(()),
            Some(_) => Err(DealError::AlreadySet("tricks")),
            None => {
                self.tricks_rel = Some(rel);
                Ok(())
            }
        }
    }

    /// Fix the result as the declarer's absolute trick count (0..=13)
    pub fn set_tricks(&mut self, tricks: u8) -> Result<()> {
        if !self.contract_set {
            return Err(DealError::RuleViolation("tricks before contract"));
        }
        if tricks > 13 {
            return Err(DealError::Range(format!("tricks {}", tricks)));
        }
        self.set_tricks_relative(tricks as i8 - (6 + self.level) as i8)
    }

    pub fn is_set(&self) -> bool {
        self.contract_set
    }

    pub fn is_passed_out(&self) -> bool {
        self.contract_set && self.level == 0
    }

    pub fn declarer(&self) -> Seat {
        self.declarer
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn denom(&self) -> Denom {
        self.denom
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    pub fn vul(&self) -> Option<Vulnerability> {
        self.vul
    }

    pub fn tricks_relative(&self) -> Option<i8> {
        self.tricks_rel
    }

    /// Declarer's absolute trick count, once the result is in
    pub fn tricks(&self) -> Option<u8> {
        self.tricks_rel
            .map(|rel| ((6 + self.level) as i8 + rel) as u8)
    }

    /// Is the declaring side vulnerable?
    pub fn declarer_vulnerable(&self) -> Result<bool> {
        let vul = self
            .vul
            .ok_or(DealError::RuleViolation("vulnerability not set"))?;
        Ok(vul.is_vulnerable(self.declarer.side()))
    }

    /// Duplicate score from the declaring side's perspective. Requires the
    /// contract, vulnerability and result to all be in place.
    pub fn score(&self) -> Result<i32> {
        if !self.contract_set {
            return Err(DealError::RuleViolation("contract not set"));
        }
        let rel = self
            .tricks_rel
            .ok_or(DealError::RuleViolation("tricks not set"))?;
        if self.level == 0 {
            // passed out; still insist vulnerability is known
            self.declarer_vulnerable()?;
            return Ok(0);
        }
        let vulnerable = self.declarer_vulnerable()?;
        if rel >= 0 {
            Ok(made_score(
                self.level,
                self.denom,
                self.multiplier,
                vulnerable,
                rel as u8,
            ))
        } else {
            Ok(-undertrick_score(
                (-rel) as u8,
                self.multiplier,
                vulnerable,
            ))
        }
    }

    /// Score from North-South's perspective
    pub fn score_ns(&self) -> Result<i32> {
        let score = self.score()?;
        Ok(match self.declarer.side() {
            Side::NorthSouth => score,
            Side::EastWest => -score,
        })
    }
}

impl Default for Contract {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn made_4h_east() -> Contract {
        let mut c = Contract::new();
        c.set_contract(Seat::East, 4, Denom::Hearts, Multiplier::Undoubled)
            .unwrap();
        c.set_vul(Vulnerability::None).unwrap();
        c
    }

    #[test]
    fn test_score_4h_east() {
        let mut c = made_4h_east();
        c.set_tricks(10).unwrap();
        assert_eq!(c.score().unwrap(), 420);
        assert_eq!(c.score_ns().unwrap(), -420);
    }

    #[test]
    fn test_score_requires_all_fields() {
        let mut c = Contract::new();
        assert!(c.score().is_err());
        c.set_contract(Seat::South, 3, Denom::NoTrump, Multiplier::Undoubled)
            .unwrap();
        assert!(c.score().is_err());
        c.set_vul(Vulnerability::Both).unwrap();
        assert!(c.score().is_err());
        c.set_tricks(10).unwrap();
        assert_eq!(c.score().unwrap(), 630);
    }

    #[test]
    fn test_set_once_semantics() {
        let mut c = made_4h_east();
        // identical values are silent no-ops
        c.set_contract(Seat::East, 4, Denom::Hearts, Multiplier::Undoubled)
            .unwrap();
        c.set_vul(Vulnerability::None).unwrap();
        // conflicting values are rejected
        assert_eq!(
            c.set_contract(Seat::West, 4, Denom::Hearts, Multiplier::Undoubled),
            Err(DealError::AlreadySet("contract"))
        );
        assert_eq!(c.set_vul(Vulnerability::Both), Err(DealError::AlreadySet("vulnerability")));
        c.set_tricks(9).unwrap();
        c.set_tricks(9).unwrap();
        assert_eq!(c.set_tricks(10), Err(DealError::AlreadySet("tricks")));
    }

    #[test]
    fn test_going_down() {
        let mut c = Contract::new();
        c.set_contract(Seat::West, 5, Denom::Diamonds, Multiplier::Doubled)
            .unwrap();
        c.set_vul(Vulnerability::EastWest).unwrap();
        c.set_tricks(9).unwrap();
        assert_eq!(c.tricks_relative(), Some(-2));
        assert_eq!(c.score().unwrap(), -500);
        assert_eq!(c.score_ns().unwrap(), 500);
    }

    #[test]
    fn test_passed_out() {
        let c = Contract::passed_out(Vulnerability::NorthSouth);
        assert!(c.is_passed_out());
        assert_eq!(c.score().unwrap(), 0);
        assert_eq!(c.tricks(), Some(6));
    }
}
