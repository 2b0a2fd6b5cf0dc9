//! ランダムな対局で指し手生成の性質を確かめる

mod common;

use common::{SFEN_FESTIVAL, position, reference_legal_moves, sorted_u32};
use proptest::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use tsumi_core::{
    Move, MoveCategory, MoveList, Position, SFEN_HIRATE, generate_checks, generate_moves,
};

fn arb_start() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![SFEN_HIRATE, SFEN_FESTIVAL])
}

fn is_capture(pos: &Position, m: Move) -> bool {
    !m.is_drop() && pos.piece_on(m.to()).is_some()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 16, .. ProptestConfig::default() })]

    #[test]
    fn prop_generated_moves_are_legal_and_unique(start in arb_start(), seed in any::<u64>()) {
        let mut pos = position(start);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        for _ in 0..48 {
            let all = generate_moves(&pos, MoveCategory::All);
            let sorted = sorted_u32(&all);
            let mut dedup = sorted.clone();
            dedup.dedup();
            prop_assert_eq!(sorted.len(), dedup.len(), "duplicate in {}", pos.to_sfen());
            let reference = sorted_u32(&reference_legal_moves(&pos));
            prop_assert_eq!(&sorted, &reference, "{}", pos.to_sfen());

            if all.is_empty() {
                break;
            }
            let m = all[(rng.next_u64() % all.len() as u64) as usize];
            let gives_check = pos.gives_check(m);
            pos.do_move(m, gives_check);
            prop_assert_eq!(pos.in_check(), gives_check);
        }
    }

    #[test]
    fn prop_categories_partition_all_moves(start in arb_start(), seed in any::<u64>()) {
        let mut pos = position(start);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        for _ in 0..32 {
            let all = generate_moves(&pos, MoveCategory::All);
            let in_check = pos.in_check();

            let evasions = generate_moves(&pos, MoveCategory::Evasions);
            let non_evasions = generate_moves(&pos, MoveCategory::NonEvasions);
            let (expected, empty) =
                if in_check { (&evasions, &non_evasions) } else { (&non_evasions, &evasions) };
            prop_assert_eq!(expected.as_slice(), all.as_slice());
            prop_assert!(empty.is_empty());

            let captures: Vec<Move> =
                all.iter().copied().filter(|&m| is_capture(&pos, m)).collect();
            prop_assert_eq!(
                sorted_u32(&generate_moves(&pos, MoveCategory::Captures)),
                sorted_u32(&captures)
            );
            let drops: Vec<Move> = all.iter().copied().filter(|m| m.is_drop()).collect();
            prop_assert_eq!(
                sorted_u32(&generate_moves(&pos, MoveCategory::Drops)),
                sorted_u32(&drops)
            );

            if !in_check {
                let checks: Vec<Move> =
                    all.iter().copied().filter(|&m| pos.gives_check(m)).collect();
                let mut generated = MoveList::new();
                generate_checks(&pos, &mut generated);
                prop_assert_eq!(sorted_u32(&generated), sorted_u32(&checks));
            }

            if all.is_empty() {
                break;
            }
            let m = all[(rng.next_u64() % all.len() as u64) as usize];
            let gives_check = pos.gives_check(m);
            pos.do_move(m, gives_check);
        }
    }

    #[test]
    fn prop_undo_restores_position(start in arb_start(), seed in any::<u64>()) {
        let mut pos = position(start);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut history = Vec::new();
        let mut sfens = vec![pos.to_sfen()];

        for _ in 0..40 {
            let all = generate_moves(&pos, MoveCategory::All);
            if all.is_empty() {
                break;
            }
            let m = all[(rng.next_u64() % all.len() as u64) as usize];

            // u32 と USI の往復
            prop_assert_eq!(Move::from_u32(m.to_u32()), m);
            prop_assert_eq!(pos.move_from_usi(&m.to_usi()), Ok(m));

            let gives_check = pos.gives_check(m);
            pos.do_move(m, gives_check);
            history.push(m);

            let sfen = pos.to_sfen();
            prop_assert_eq!(Position::from_sfen(&sfen).map(|p| p.to_sfen()), Ok(sfen.clone()));
            sfens.push(sfen);
        }

        while let Some(m) = history.pop() {
            sfens.pop();
            pos.undo_move(m);
            prop_assert_eq!(Some(&pos.to_sfen()), sfens.last());
            prop_assert_eq!(pos.in_check(), position(&pos.to_sfen()).in_check());
        }
    }
}
