//! 詰将棋問題集での1手詰め・3手詰め

mod common;

use common::{PROBLEMS, position, reference_legal_moves};
use tsumi_core::{MoveCategory, generate_moves, is_mate_in_one_ply, is_mate_in_three_plies};

#[test]
fn test_mate_in_one_ply_problems() {
    let expected = [
        Some("5c6d+"),
        Some("5d6b+"),
        Some("3c2b"),
        Some("5c6c"),
        Some("2a4c+"),
        None,
        None,
        None,
        None,
        None,
        None,
    ];
    for ((no, sfen), answer) in PROBLEMS.iter().zip(expected) {
        let mut pos = position(sfen);
        let mate = is_mate_in_one_ply(&mut pos);
        assert_eq!(mate.map(|m| m.to_usi()).as_deref(), answer, "problem {no}");
        assert_eq!(pos.to_sfen(), position(sfen).to_sfen(), "problem {no} not restored");
    }
}

/// 1手詰めの答えは総当たりで求めた詰ます手の集合と一致する
#[test]
fn test_mate_in_one_ply_matches_brute_force() {
    for (no, sfen) in PROBLEMS {
        let mut pos = position(sfen);
        let mut mating = Vec::new();
        for m in reference_legal_moves(&pos) {
            let mut next = pos.clone();
            let gives_check = next.gives_check(m);
            next.do_move(m, gives_check);
            if gives_check && reference_legal_moves(&next).is_empty() {
                mating.push(m.to_usi());
            }
        }
        let mate = is_mate_in_one_ply(&mut pos).map(|m| m.to_usi());
        match mate {
            Some(usi) => assert!(mating.contains(&usi), "problem {no}: {usi} not in {mating:?}"),
            None => assert!(mating.is_empty(), "problem {no}: missed {mating:?}"),
        }
    }
}

/// 3手詰めの初手として正しい手の集合
const MATE3_FIRST_MOVES: [&[&str]; 9] = [
    &["5c6d+", "G*6d", "R*6d"],
    &["5d6b+", "N*6c", "S*6b", "G*6b", "B*6b", "R*7a", "R*8a", "R*9a"],
    &[
        "1a2b", "3c2b", "N*2e", "S*2b", "S*2d", "G*1b", "G*2d", "B*2d", "B*3a", "B*3e", "B*4f",
        "B*5g", "B*6h", "B*7i", "R*1b",
    ],
    &["5c6c"],
    &[
        "2a4c+", "4i4c+", "P*5c", "L*5c", "L*5d", "L*5e", "L*5f", "L*5g", "L*5h", "L*5i", "N*6d",
        "S*4c", "S*5c", "S*6a", "S*6c", "G*4c", "G*5c", "G*6c", "B*3d", "B*6a", "B*6c", "B*7d",
        "B*8e", "B*9f", "R*5d", "R*5e", "R*5f", "R*5g", "R*5h", "R*5i",
    ],
    &["1a2b", "N*2e", "S*2b", "S*2d", "G*1b", "G*2d", "B*2d", "B*3a", "B*3e", "R*1b"],
    &["5d6c+", "5d6c", "5d4c+", "7e6c+", "4i4c+", "G*4c", "G*6c"],
    &[],
    &["5d4c+", "4f4c+", "G*4c"],
];

#[test]
fn test_mate_in_three_plies_problems() {
    for (no, sfen) in PROBLEMS {
        let mut pos = position(sfen);
        let result = is_mate_in_three_plies(&mut pos);
        assert_eq!(pos.to_sfen(), position(sfen).to_sfen(), "problem {no} not restored");

        let answers: &[&str] = MATE3_FIRST_MOVES.get(no - 1).copied().unwrap_or(&[]);
        if answers.is_empty() {
            assert!(!result.is_mate, "problem {no}: {}", result.mate_move);
            assert!(result.mate_move.is_none());
            continue;
        }
        assert!(result.is_mate, "problem {no}");
        let first = result.mate_move.to_usi();
        assert!(answers.contains(&first.as_str()), "problem {no}: {first}");
    }
}

#[test]
fn test_three_ply_line_is_checkmate() {
    for (no, sfen) in PROBLEMS {
        let mut pos = position(sfen);
        let result = is_mate_in_three_plies(&mut pos);
        if !result.is_mate {
            continue;
        }

        pos.do_move(result.mate_move, true);
        match result.continuation {
            // 初手で詰み
            None => {}
            Some(line) => {
                // 応手は王手回避手、3手目は王手
                let evasions = generate_moves(&pos, MoveCategory::Evasions);
                assert!(evasions.iter().any(|&m| m == line.defense), "problem {no}");
                let gives_check = pos.gives_check(line.defense);
                pos.do_move(line.defense, gives_check);
                assert!(pos.gives_check(line.mate), "problem {no}");
                pos.do_move(line.mate, true);
            }
        }
        assert!(pos.in_check(), "problem {no}");
        assert!(generate_moves(&pos, MoveCategory::All).is_empty(), "problem {no}");
    }
}

#[test]
fn test_problem_4_is_mate_in_one() {
    let mut pos = position(PROBLEMS[3].1);
    let result = is_mate_in_three_plies(&mut pos);
    assert!(result.is_mate);
    assert_eq!(result.mate_move.to_usi(), "5c6c");
    assert_eq!(result.continuation, None);
}
