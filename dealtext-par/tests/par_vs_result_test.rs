//! Comparing an actual board result against the theoretical par, the way a
//! scoring pipeline consumes these pieces together.

use dealtext_core::{imps, Contract, Denom, Multiplier, Seat, Vulnerability};
use dealtext_par::{par, Tableau};

fn spade_game_tableau() -> Tableau {
    let mut t = Tableau::new();
    for denom in Denom::ALL {
        for seat in Seat::ALL {
            let tricks = match (denom, seat) {
                (Denom::Spades, Seat::North) | (Denom::Spades, Seat::South) => 10,
                (Denom::Spades, _) => 3,
                (_, Seat::North) | (_, Seat::South) => 6,
                _ => 5,
            };
            t.set_entry(denom, seat, tricks).unwrap();
        }
    }
    t
}

#[test]
fn actual_result_measured_against_par_in_imps() {
    let tableau = spade_game_tableau();
    let p = par(&tableau, Seat::North, Vulnerability::None).unwrap();
    assert_eq!(p.score, 420);

    // at the table North stopped in a partial and made an overtrick
    let mut actual = Contract::new();
    actual
        .set_contract(Seat::North, 3, Denom::Spades, Multiplier::Undoubled)
        .unwrap();
    actual.set_vul(Vulnerability::None).unwrap();
    actual.set_tricks(10).unwrap();
    let table_score = actual.score_ns().unwrap();
    assert_eq!(table_score, 170);

    // missing the game costs six IMPs against par
    assert_eq!(imps(table_score - p.score), -6);
}

#[test]
fn par_contract_scores_its_own_par_value() {
    let tableau = spade_game_tableau();
    let p = par(&tableau, Seat::North, Vulnerability::NorthSouth).unwrap();
    assert_eq!(p.score, 620);
    for contract in &p.contracts {
        assert_eq!(contract.score_ns().unwrap(), p.score);
    }
}
