use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tsumi_core::{Position, is_mate_in_one_ply, is_mate_in_three_plies};

const PROBLEMS: [(&str, &str); 3] = [
    ("mate1", "4+R4/4n4/4S4/4k4/4p4/4NL3/9/9/8K b RBGSNLPb3g2sn2l16p 1"),
    ("mate3", "4g4/2Spk4/9/4B4/2N6/9/9/9/5L2K b RBGSNLPr2g2s2n2l16p 1"),
    ("nomate", "4g4/1bSpk1S2/9/9/2N6/5L3/9/9/8K b 2rb3g2s3n3l17p 1"),
];

fn bench_mate_in_one_ply(c: &mut Criterion) {
    for (name, sfen) in PROBLEMS {
        let mut pos = Position::from_sfen(sfen).expect("Valid SFEN");
        c.bench_function(&format!("mate1_{name}"), |b| {
            b.iter(|| is_mate_in_one_ply(black_box(&mut pos)));
        });
    }
}

fn bench_mate_in_three_plies(c: &mut Criterion) {
    for (name, sfen) in PROBLEMS {
        let mut pos = Position::from_sfen(sfen).expect("Valid SFEN");
        c.bench_function(&format!("mate3_{name}"), |b| {
            b.iter(|| is_mate_in_three_plies(black_box(&mut pos)).is_mate);
        });
    }
}

criterion_group!(benches, bench_mate_in_one_ply, bench_mate_in_three_plies);
criterion_main!(benches);
