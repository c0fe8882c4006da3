//! End-to-end demo: generate a test, grade it, and run the leveling engine.
//!
//! Run with: `cargo run --example demo`
//!
//! This example shows how `math_drill_gen` works end to end:
//!
//! 1. **Seeded generation**: the same seed reproduces the exact same test,
//!    so the printed output is deterministic.
//! 2. **Grading**: a simulated student answers most questions correctly;
//!    each submission is graded and frozen into an `AnsweredQuestion`.
//! 3. **Leveling**: the completed attempt runs through the state machine
//!    and the promotion outcome is printed.
//!
//! ## Key concepts demonstrated
//!
//! - `TestRequest::new(level)`: minimal constructor (entropy seed);
//!   `rng_seed: Some(u64)` makes the output fully deterministic.
//! - Dedup: no two questions in a strict test share a canonical key, and
//!   `a+b` / `b+a` count as the same question.
//! - The fallback policy on the test reports whether uniqueness held.

use math_drill_gen::{
    generate_test, Answer, AnsweredQuestion, LevelTable, StudentProgress, SubmittedAnswer,
    TestAttempt, TestRequest,
};

/// The canonical answer as a submission; flip it to simulate a miss.
fn submission(answer: Answer, correct: bool) -> SubmittedAnswer {
    match answer {
        Answer::Integer(n) => SubmittedAnswer::Integer(if correct { n } else { n + 1 }),
        Answer::Rational(r) => SubmittedAnswer::Fraction {
            num: if correct { r.num } else { r.num + 1 },
            den: r.den,
        },
    }
}

fn main() {
    env_logger::init();

    let table = LevelTable::default();
    let mut progress = StudentProgress { current_level: 12, ..Default::default() };

    let test = generate_test(
        TestRequest { level: progress.current_level, rng_seed: Some(42) },
        &table,
    )
    .expect("level 12 is in range");

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "  Test {}  Level {}  Assembly: {}",
        test.test_id, test.level, test.policy_used
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // The simulated student misses question 7 and question 19.
    let mut answered = Vec::new();
    for (i, q) in test.questions.iter().enumerate() {
        let correct = i != 6 && i != 18;
        let submitted = submission(q.answer, correct);
        let record = AnsweredQuestion::record(q, submitted, 8);
        let mark = if record.is_correct { "+" } else { "x" };
        println!(
            "  [{mark}] {:28}  = {:10}  ({}, {})",
            q.text,
            q.answer.to_string(),
            q.features.operand_size,
            if q.features.requires_carry_or_borrow { "carry/borrow" } else { "plain" },
        );
        answered.push(record);
    }

    let attempt = TestAttempt::from_answers(test.level, 65, answered);
    println!();
    println!(
        "  Result: {}/{} correct, {}s remaining, total score {}",
        attempt.correct_count,
        test.questions.len(),
        attempt.time_remaining,
        attempt.total_score
    );

    let transition = progress.apply_attempt(attempt);
    println!(
        "  Leveling: {} -> level {}, streak {}",
        transition.change, progress.current_level, progress.consecutive_fast_track
    );
}
