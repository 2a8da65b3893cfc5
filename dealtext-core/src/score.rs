//! Duplicate bridge score tables.
//!
//! The made-contract base scores are built once into a static table keyed by
//! level, denomination class and multiplier; undertrick penalties are fixed
//! const tables. Everything here is read-only after first use, so callers
//! scoring many boards in parallel share the tables freely.

use once_cell::sync::Lazy;

use crate::{Denom, Multiplier};

/// Doubled undertrick penalties, not vulnerable, indexed by tricks down
const DOUBLED_DOWN_NV: [i32; 14] = [
    0, 100, 300, 500, 800, 1100, 1400, 1700, 2000, 2300, 2600, 2900, 3200, 3500,
];

/// Doubled undertrick penalties, vulnerable, indexed by tricks down
const DOUBLED_DOWN_V: [i32; 14] = [
    0, 200, 500, 800, 1100, 1400, 1700, 2000, 2300, 2600, 2900, 3200, 3500, 3800,
];

/// IMP scale: lower bound of each band, in tens of points; the sentinel
/// keeps the table at a fixed 26 entries with 24 the top band
const IMP_SCALE: [i32; 26] = [
    0, 2, 5, 9, 13, 17, 22, 27, 32, 37, 43, 50, 60, 75, 90, 110, 130, 150, 175, 200, 225, 250,
    300, 350, 400, i32::MAX,
];

/// Denomination scoring classes: minors, majors, notrump
fn denom_class(denom: Denom) -> usize {
    match denom {
        Denom::Clubs | Denom::Diamonds => 0,
        Denom::Hearts | Denom::Spades => 1,
        Denom::NoTrump => 2,
    }
}

/// Per-trick contract points for a denomination (first trick for NT is 40)
fn trick_points(denom: Denom) -> i32 {
    match denom_class(denom) {
        0 => 20,
        _ => 30,
    }
}

/// Base score for a made contract (no overtricks), indexed
/// [level-1][class][vul][multiplier]. Built once; includes the partial/game
/// bonus, slam bonuses and the doubled/redoubled insult.
static MADE_BASE: Lazy<[[[[i32; 3]; 2]; 3]; 7]> = Lazy::new(|| {
    let mut table = [[[[0i32; 3]; 2]; 3]; 7];
    for level in 1..=7i32 {
        for class in 0..3usize {
            let trick_score = match class {
                0 => 20 * level,
                1 => 30 * level,
                _ => 40 + 30 * (level - 1),
            };
            for (vi, vul) in [false, true].into_iter().enumerate() {
                for (mi, mult) in [
                    Multiplier::Undoubled,
                    Multiplier::Doubled,
                    Multiplier::Redoubled,
                ]
                .into_iter()
                .enumerate()
                {
                    let contract_points = trick_score * mult.factor();
                    let mut score = contract_points;
                    score += if contract_points >= 100 {
                        if vul {
                            500
                        } else {
                            300
                        }
                    } else {
                        50
                    };
                    if level == 6 {
                        score += if vul { 750 } else { 500 };
                    } else if level == 7 {
                        score += if vul { 1500 } else { 1000 };
                    }
                    score += match mult {
                        Multiplier::Undoubled => 0,
                        Multiplier::Doubled => 50,
                        Multiplier::Redoubled => 100,
                    };
                    table[(level - 1) as usize][class][vi][mi] = score;
                }
            }
        }
    }
    table
});

/// Score for a made contract, overtricks included, from the declaring
/// side's perspective (always positive).
pub fn made_score(
    level: u8,
    denom: Denom,
    mult: Multiplier,
    vulnerable: bool,
    overtricks: u8,
) -> i32 {
    let base = MADE_BASE[(level - 1) as usize][denom_class(denom)][vulnerable as usize]
        [mult as usize];
    let per_overtrick = match mult {
        Multiplier::Undoubled => trick_points(denom),
        Multiplier::Doubled => {
            if vulnerable {
                200
            } else {
                100
            }
        }
        Multiplier::Redoubled => {
            if vulnerable {
                400
            } else {
                200
            }
        }
    };
    base + per_overtrick * overtricks as i32
}

/// Penalty for a failed contract, as a positive number owed to the
/// defending side.
pub fn undertrick_score(down: u8, mult: Multiplier, vulnerable: bool) -> i32 {
    let down = down as usize;
    match mult {
        Multiplier::Undoubled => {
            if vulnerable {
                100 * down as i32
            } else {
                50 * down as i32
            }
        }
        Multiplier::Doubled => {
            if vulnerable {
                DOUBLED_DOWN_V[down]
            } else {
                DOUBLED_DOWN_NV[down]
            }
        }
        Multiplier::Redoubled => {
            if vulnerable {
                DOUBLED_DOWN_V[down] * 2
            } else {
                DOUBLED_DOWN_NV[down] * 2
            }
        }
    }
}

/// Convert a raw score difference to IMPs, sign reattached
pub fn imps(diff: i32) -> i32 {
    let tens = diff.abs() / 10;
    let mut imp = 0;
    for (i, &bound) in IMP_SCALE.iter().enumerate() {
        if tens >= bound {
            imp = i as i32;
        }
    }
    if diff < 0 {
        -imp
    } else {
        imp
    }
}
