//! Cross-dialect round trips: the same board encoded in every dialect and
//! decoded back must reproduce the call and card sequences exactly.

use dealtext_core::{Auction, Call, Card, Denom, Play, Rank, Seat, Suit, Vulnerability};
use dealtext_format::{
    decode_auction, decode_play, encode_auction, encode_play, format_contract, parse_contract,
    parse_deal_tag, Dialect,
};

const DEAL: &str =
    "[Deal \"N:KQ4.QJ982..AKQ43 J653.A73.985.J97 9.K54.KQT732.652 AT872.T6.AJ64.T8\"]";

fn competitive_auction() -> Auction {
    let mut a = Auction::new();
    a.set_dealer(Seat::South).unwrap();
    a.set_vul(Vulnerability::EastWest).unwrap();
    a.add_call(Call::bid(1, Denom::Spades).unwrap()).unwrap();
    a.add_call(Call::bid(2, Denom::Hearts).unwrap()).unwrap();
    a.add_call(Call::bid(2, Denom::Spades).unwrap()).unwrap();
    a.add_call(Call::bid(3, Denom::Hearts).unwrap()).unwrap();
    a.add_call(Call::bid(3, Denom::Spades).unwrap()).unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();
    a.add_call(Call::bid(4, Denom::Hearts).unwrap()).unwrap();
    a.add_call(Call::bid(4, Denom::Spades).unwrap()).unwrap();
    a.add_call(Call::new(1).unwrap()).unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();
    a
}

#[test]
fn auction_roundtrip_every_dialect() {
    let a = competitive_auction();
    for dialect in Dialect::ALL {
        let text = encode_auction(dialect, &a).unwrap();
        let mut b = Auction::new();
        b.set_dealer(Seat::South).unwrap();
        b.set_vul(Vulnerability::EastWest).unwrap();
        decode_auction(dialect, &text, &mut b).unwrap();
        assert_eq!(b.calls(), a.calls(), "{:?}\n{}", dialect, text);
        assert!(b.is_over());
        let ca = a.contract().unwrap().unwrap();
        let cb = b.contract().unwrap().unwrap();
        assert_eq!(ca, cb, "{:?}", dialect);
    }
}

#[test]
fn transcoding_preserves_the_contract() {
    let a = competitive_auction();
    let lin = encode_auction(Dialect::Lin, &a).unwrap();

    let mut b = Auction::new();
    b.set_dealer(Seat::South).unwrap();
    b.set_vul(Vulnerability::EastWest).unwrap();
    decode_auction(Dialect::Lin, &lin, &mut b).unwrap();
    let pbn = encode_auction(Dialect::Pbn, &b).unwrap();

    let mut c = Auction::new();
    c.set_vul(Vulnerability::EastWest).unwrap();
    decode_auction(Dialect::Pbn, &pbn, &mut c).unwrap();
    let contract = c.contract().unwrap().unwrap();
    assert_eq!(contract.declarer(), Seat::South);
    assert_eq!(contract.level(), 4);
    assert_eq!(contract.denom(), Denom::Spades);
}

#[test]
fn alerts_survive_the_dialects_that_carry_them() {
    let mut a = Auction::new();
    a.set_dealer(Seat::North).unwrap();
    a.set_vul(Vulnerability::None).unwrap();
    a.add_call(Call::bid(1, Denom::Clubs).unwrap().with_alert("16+ any shape"))
        .unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();
    a.add_call(Call::bid(1, Denom::Diamonds).unwrap().with_alert("0-7"))
        .unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();
    a.add_call(Call::bid(1, Denom::NoTrump).unwrap()).unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();
    a.add_call(Call::new(0).unwrap()).unwrap();

    for dialect in [Dialect::Lin, Dialect::LinRp, Dialect::LinVg, Dialect::Pbn, Dialect::Rbn, Dialect::Rbx] {
        let text = encode_auction(dialect, &a).unwrap();
        let mut b = Auction::new();
        b.set_dealer(Seat::North).unwrap();
        b.set_vul(Vulnerability::None).unwrap();
        decode_auction(dialect, &text, &mut b).unwrap();
        assert_eq!(
            b.calls()[0].alert.as_deref(),
            Some("16+ any shape"),
            "{:?}",
            dialect
        );
        assert_eq!(b.calls()[2].alert.as_deref(), Some("0-7"), "{:?}", dialect);
    }
}

fn played_board() -> (Play, Seat) {
    let (_, deal) = parse_deal_tag(DEAL).unwrap();
    // 3NT by South: West leads the club ten
    let mut play = Play::new(deal, Denom::NoTrump, Seat::South).unwrap();
    for card in [
        Card::new(Suit::Clubs, Rank::Ten),
        Card::new(Suit::Clubs, Rank::Ace),
        Card::new(Suit::Clubs, Rank::Seven),
        Card::new(Suit::Clubs, Rank::Two),
    ] {
        play.play(card).unwrap();
    }
    for card in [
        Card::new(Suit::Clubs, Rank::King),
        Card::new(Suit::Clubs, Rank::Nine),
        Card::new(Suit::Clubs, Rank::Five),
        Card::new(Suit::Clubs, Rank::Eight),
    ] {
        play.play(card).unwrap();
    }
    (play, Seat::South)
}

#[test]
fn play_roundtrip_every_dialect() {
    let (play, declarer) = played_board();
    for dialect in Dialect::ALL {
        let text = encode_play(dialect, &play).unwrap();
        let (_, deal) = parse_deal_tag(DEAL).unwrap();
        let mut replay = Play::new(deal, Denom::NoTrump, declarer).unwrap();
        decode_play(dialect, &text, &mut replay).unwrap();
        assert_eq!(replay.sequence(), play.sequence(), "{:?}\n{}", dialect, text);
        assert_eq!(replay.tricks(), play.tricks(), "{:?}", dialect);
    }
}

#[test]
fn contract_token_roundtrip() {
    for token in ["4HE+1", "3NTS=", "7CXW-13", "1Dxxn+6", "P"] {
        let contract = parse_contract(token).unwrap();
        let out = format_contract(&contract).unwrap();
        let again = parse_contract(&out).unwrap();
        assert_eq!(contract, again, "{}", token);
    }
}
