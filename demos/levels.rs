//! Survey of all 20 difficulty levels.
//!
//! Run with: `cargo run --example levels`
//!
//! Generates one seeded test per level and prints its operation mix,
//! question-kind split, and a couple of sample questions, so the default
//! parameter progression can be eyeballed at a glance.

use std::collections::BTreeMap;

use math_drill_gen::{generate_test, LevelTable, QuestionKind, TestRequest};

fn main() {
    let table = LevelTable::default();

    println!("level | ops (add/sub/mul/div) | fractions | sample");
    println!("------+-----------------------+-----------+--------------------------------");

    for level in 1..=20u8 {
        let test = generate_test(
            TestRequest { level, rng_seed: Some(u64::from(level) * 7919) },
            &table,
        )
        .expect("all levels in range");

        let mut by_op: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut fractions = 0usize;
        for q in &test.questions {
            *by_op.entry(q.features.operation.tag()).or_default() += 1;
            if q.kind == QuestionKind::Rational {
                fractions += 1;
            }
        }

        let counts = ["add", "sub", "mul", "div"]
            .map(|op| by_op.get(op).copied().unwrap_or(0));
        println!(
            "  {:>3} | {:>4} {:>4} {:>4} {:>4}  | {:>6}/25 | {}",
            level, counts[0], counts[1], counts[2], counts[3], fractions,
            test.questions[0].text
        );
    }
}
