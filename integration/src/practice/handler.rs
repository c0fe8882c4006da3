use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use log::info;
use math_drill_gen::{
    generate_test, AnsweredQuestion, LevelTable, PracticeTest, StudentProgress, SubmittedAnswer,
    TestAttempt, TestRequest, Transition,
};
use serde::Deserialize;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Profile store (repository pattern)
// ---------------------------------------------------------------------------

/// Persistence seam the handlers depend on. The engine itself never touches
/// storage; a real deployment would back this with a document store.
pub trait ProfileStore: Send + Sync {
    fn get_profile(&self, student_id: &str) -> StudentProgress;
    /// Read-modify-write under at-most-one-writer-per-student semantics:
    /// concurrent submissions for the same student must not lose an update.
    fn update_profile(
        &self,
        student_id: &str,
        apply: &mut dyn FnMut(&mut StudentProgress),
    );
    fn level_table(&self) -> LevelTable;
}

/// In-memory store. One mutex over the whole map serializes all writers,
/// which trivially satisfies the per-student requirement at demo scale.
pub struct MemoryStore {
    profiles: Mutex<HashMap<String, StudentProgress>>,
    table: LevelTable,
}

impl MemoryStore {
    pub fn new(table: LevelTable) -> Self {
        MemoryStore { profiles: Mutex::new(HashMap::new()), table }
    }
}

impl ProfileStore for MemoryStore {
    fn get_profile(&self, student_id: &str) -> StudentProgress {
        self.profiles
            .lock()
            .unwrap()
            .get(student_id)
            .cloned()
            .unwrap_or_default()
    }

    fn update_profile(
        &self,
        student_id: &str,
        apply: &mut dyn FnMut(&mut StudentProgress),
    ) {
        let mut map = self.profiles.lock().unwrap();
        let profile = map.entry(student_id.to_string()).or_default();
        apply(profile);
    }

    fn level_table(&self) -> LevelTable {
        self.table.clone()
    }
}

// ---------------------------------------------------------------------------
// Shared state: store + in-flight test cache keyed by test_id
// ---------------------------------------------------------------------------

pub type TestCache = Arc<Mutex<HashMap<String, PracticeTest>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub tests: TestCache,
}

pub fn new_state(store: Arc<dyn ProfileStore>) -> AppState {
    AppState { store, tests: Arc::new(Mutex::new(HashMap::new())) }
}

// ---------------------------------------------------------------------------
// Query / body types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct TestQuery {
    pub student_id: String,
}

#[derive(Deserialize)]
pub struct GradedAnswer {
    pub answer: SubmittedAnswer,
    #[serde(default)]
    pub time_taken_seconds: u32,
}

#[derive(Deserialize)]
pub struct AttemptRequest {
    pub student_id: String,
    pub test_id: String,
    pub time_remaining: u32,
    pub answers: Vec<GradedAnswer>,
}

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

// ---------------------------------------------------------------------------
// GET /api/practice/test?student_id=...
// ---------------------------------------------------------------------------

pub async fn get_test(
    State(state): State<AppState>,
    Query(params): Query<TestQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let profile = state.store.get_profile(&params.student_id);
    let table = state.store.level_table();

    let test = generate_test(TestRequest::new(profile.current_level), &table)
        .map_err(|e| bad_request(e.to_string()))?;

    // Answers stay server-side; the client only sees text and kind.
    let public_questions: Vec<Value> = test
        .questions
        .iter()
        .map(|q| json!({ "text": q.text, "kind": q.kind }))
        .collect();

    let response = json!({
        "test_id": test.test_id,
        "level": test.level,
        "policy_used": test.policy_used,
        "questions": public_questions,
    });

    // Cache the full test for the attempt endpoint.
    {
        let mut map = state.tests.lock().unwrap();
        // Evict oldest entries if cache grows too large (simple cap at 1000).
        if map.len() >= 1000 {
            if let Some(first_key) = map.keys().next().cloned() {
                map.remove(&first_key);
            }
        }
        map.insert(test.test_id.clone(), test);
    }

    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// POST /api/practice/attempt
//   body: { student_id, test_id, time_remaining, answers: [...] }
// ---------------------------------------------------------------------------

pub async fn submit_attempt(
    State(state): State<AppState>,
    Json(body): Json<AttemptRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let test = {
        let mut map = state.tests.lock().unwrap();
        map.remove(&body.test_id).ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Test not found or already submitted" })),
            )
        })?
    };

    if body.answers.len() != test.questions.len() {
        return Err(bad_request(format!(
            "expected {} answers, got {}",
            test.questions.len(),
            body.answers.len()
        )));
    }

    let answered: Vec<AnsweredQuestion> = test
        .questions
        .iter()
        .zip(body.answers.iter())
        .map(|(q, a)| AnsweredQuestion::record(q, a.answer, a.time_taken_seconds))
        .collect();
    let attempt = TestAttempt::from_answers(test.level, body.time_remaining, answered);

    let mut outcome: Option<Transition> = None;
    state.store.update_profile(&body.student_id, &mut |profile| {
        outcome = Some(profile.apply_attempt(attempt.clone()));
    });
    let transition = outcome.expect("update closure always runs");

    info!(
        "student {}: level {} attempt, {}/{} correct -> level {} ({})",
        body.student_id,
        attempt.level,
        attempt.correct_count,
        test.questions.len(),
        transition.level,
        transition.change
    );

    Ok(Json(json!({
        "correct_count": attempt.correct_count,
        "total_score": attempt.total_score,
        "new_level": transition.level,
        "streak": transition.streak,
        "change": transition.change,
    })))
}
