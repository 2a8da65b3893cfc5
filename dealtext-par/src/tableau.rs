use dealtext_core::{DealError, Denom, Result, Seat};

/// A double-dummy tricks table: for every denomination and declaring seat,
/// the number of tricks that seat can take against best defense.
///
/// The table is populated once from an external double-dummy source, one
/// entry at a time, and becomes queryable when all twenty entries are in.
#[derive(Debug, Clone, Default)]
pub struct Tableau {
    tricks: [[Option<u8>; 4]; 5],
    filled: u8,
}

impl Tableau {
    pub fn new() -> Self {
        Tableau::default()
    }

    /// Record one entry; identical repeats are no-ops
    pub fn set_entry(&mut self, denom: Denom, seat: Seat, tricks: u8) -> Result<()> {
        if tricks > 13 {
            return Err(DealError::Range(format!("tricks {}", tricks)));
        }
        let slot = &mut self.tricks[denom as usize][seat as usize];
        match *slot {
            Some(existing) if existing == tricks => Ok(()),
            Some(_) => Err(DealError::AlreadySet("tableau entry")),
            None => {
                *slot = Some(tricks);
                self.filled += 1;
                Ok(())
            }
        }
    }

    pub fn entry(&self, denom: Denom, seat: Seat) -> Option<u8> {
        self.tricks[denom as usize][seat as usize]
    }

    /// All twenty entries present
    pub fn is_complete(&self) -> bool {
        self.filled == 20
    }
}
