//! Canonical contract-string codec.
//!
//! The parse table is the full cross-product of level, denomination
//! spelling, multiplier spelling, declarer and result tag, assembled once;
//! every later parse is a single map lookup.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use dealtext_core::{Contract, DealError, Denom, Multiplier, Result, Seat};

#[derive(Debug, Clone, Copy)]
struct ContractKey {
    level: u8,
    denom: Denom,
    multiplier: Multiplier,
    declarer: Seat,
    tricks_rel: i8,
}

fn result_tag(rel: i8) -> String {
    match rel {
        0 => "=".to_string(),
        r if r > 0 => format!("+{}", r),
        r => r.to_string(),
    }
}

static CONTRACT_MAP: Lazy<FxHashMap<String, ContractKey>> = Lazy::new(|| {
    let denoms = [
        ("C", Denom::Clubs),
        ("D", Denom::Diamonds),
        ("H", Denom::Hearts),
        ("S", Denom::Spades),
        ("N", Denom::NoTrump),
        ("NT", Denom::NoTrump),
    ];
    let multipliers = [
        ("", Multiplier::Undoubled),
        ("X", Multiplier::Doubled),
        ("x", Multiplier::Doubled),
        ("XX", Multiplier::Redoubled),
        ("xx", Multiplier::Redoubled),
    ];
    let mut map = FxHashMap::default();
    for level in 1..=7u8 {
        for (denom_str, denom) in denoms {
            for (mult_str, multiplier) in multipliers {
                for declarer in Seat::ALL {
                    for rel in -13..=6i8 {
                        let key = format!(
                            "{}{}{}{}{}",
                            level,
                            denom_str,
                            mult_str.to_ascii_uppercase(),
                            declarer.to_char(),
                            result_tag(rel)
                        );
                        map.insert(
                            key,
                            ContractKey {
                                level,
                                denom,
                                multiplier,
                                declarer,
                                tricks_rel: rel,
                            },
                        );
                    }
                }
            }
        }
    }
    map
});

/// Parse a canonical contract token such as "4HE+1" or "3NTXS-2".
/// "P" stands for a passed-out board.
pub fn parse_contract(token: &str) -> Result<Contract> {
    let upper = token.trim().to_ascii_uppercase();
    if upper == "P" || upper == "PASS" {
        let mut contract = Contract::new();
        contract.set_passed_out()?;
        return Ok(contract);
    }
    let key = CONTRACT_MAP
        .get(&upper)
        .ok_or_else(|| DealError::Syntax(format!("contract '{}'", token)))?;
    let mut contract = Contract::new();
    contract.set_contract(key.declarer, key.level, key.denom, key.multiplier)?;
    contract.set_tricks_relative(key.tricks_rel)?;
    Ok(contract)
}

/// Serialize a contract to its canonical token
pub fn format_contract(contract: &Contract) -> Result<String> {
    if !contract.is_set() {
        return Err(DealError::RuleViolation("contract not set"));
    }
    if contract.is_passed_out() {
        return Ok("P".to_string());
    }
    let rel = contract
        .tricks_relative()
        .ok_or(DealError::RuleViolation("tricks not set"))?;
    let mult = match contract.multiplier() {
        Multiplier::Undoubled => "",
        Multiplier::Doubled => "X",
        Multiplier::Redoubled => "XX",
    };
    Ok(format!(
        "{}{}{}{}{}",
        contract.level(),
        contract.denom().to_char(),
        mult,
        contract.declarer().to_char(),
        result_tag(rel)
    ))
}
