//! Output-object serialization shape tests.

#![cfg(feature = "serde")]

use pgn_annotator::pgn::parse_game;
use serde_json::json;

#[test]
fn special_tags_serialize_as_type_action_pairs() {
    let out = parse_game(
        "[FEN \"r1bqk2r/pp1pppbp/2n1n1p1/2p1P3/4Q1P1/2N2N2/PPPP1P1P/R1B1KB1R b KQkq - 6 9\"]\n\n9... O-O",
    )
    .unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["plys"][0]["special"], json!(["castle", [63, 61]]));

    let out = parse_game("1. e4").unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["plys"][0]["special"], json!(["move", null]));

    let out = parse_game("[FEN \"8/P6k/8/8/8/8/8/K7 w - - 0 1\"]\n\n1. a8=Q").unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["plys"][0]["special"], json!(["promotion", "Q"]));

    let out = parse_game(
        "[FEN \"rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3\"]\n\n3... dxe3",
    )
    .unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["plys"][0]["special"], json!(["en passant", 28]));
}

#[test]
fn annotated_game_serializes_every_section() {
    let out = parse_game("[Event \"Shape\"]\n\n1. e4 e5 (1... c5) 2. Nf3 *").unwrap();
    let value = serde_json::to_value(&out).unwrap();

    assert_eq!(value["metadata"]["event"], "Shape");
    assert_eq!(value["boards"].as_array().unwrap().len(), 4);
    assert_eq!(value["tokens"], json!(["e4", "e5", "Nf3"]));
    assert_eq!(value["plys"][0]["from"], 12);
    assert_eq!(value["plys"][0]["to"], 28);

    let variations = value["variations"].as_array().unwrap();
    assert_eq!(variations[0][0], 1);
    assert_eq!(variations[0][1][0]["tokens"], json!(["c5"]));
    assert!(variations[0][1][0]["metadata"].is_object());
}
