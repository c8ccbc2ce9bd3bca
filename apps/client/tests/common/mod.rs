//! In-memory mock of the LangLeague backend for integration tests.
//!
//! Serves the endpoints the client uses on an ephemeral port. Failures can be
//! injected per test: a number of failing GETs, failing writes, and the reply
//! of the AI proxy.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use langleague_client::{ApiClient, ClientConfig, ContentRepository};
use langleague_core::{
    Enrollment, Exercise, ExerciseOption, Grammar, Note, Progress, Unit, Vocabulary,
};

pub const TOKEN: &str = "test-token";

/// Everything the mock knows and everything it has seen.
#[derive(Default)]
pub struct MockState {
    next_id: i64,
    pub units: HashMap<i64, Vec<Unit>>,
    pub vocabularies: Vec<Vocabulary>,
    pub grammars: Vec<Grammar>,
    pub exercises: Vec<Exercise>,
    pub options: Vec<ExerciseOption>,
    pub notes: Vec<Note>,

    /// Number of upcoming GETs answered with 503.
    pub failing_gets: u32,
    /// Answer every write with 500.
    pub fail_writes: bool,
    /// `METHOD /path` requests always answered with 500.
    pub failing_requests: Vec<String>,
    /// Status and body of the next AI replies.
    pub ai_reply: (u16, Value),

    /// `METHOD /path` of every request, in order.
    pub requests: Vec<String>,
    pub authorization: Vec<Option<String>>,
    pub ai_requests: Vec<Value>,
    pub unit_reorders: Vec<(i64, Vec<i64>)>,
    pub completed_units: Vec<i64>,
}

impl MockState {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    /// Requests matching `METHOD /path` exactly.
    pub fn count(&self, request: &str) -> usize {
        self.requests.iter().filter(|r| r.as_str() == request).count()
    }

    pub fn writes(&self) -> usize {
        self.requests.iter().filter(|r| !r.starts_with("GET ")).count()
    }
}

/// Handle on a running mock backend.
#[derive(Clone)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
    pub base_url: String,
}

impl MockBackend {
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Client pointed at this backend, with two GET retries.
    pub fn client(&self) -> ApiClient {
        let config = ClientConfig::new(&self.base_url)
            .with_token(TOKEN)
            .with_get_retries(2);
        ApiClient::new(&config).unwrap()
    }

    pub fn repository(&self) -> Arc<ContentRepository> {
        Arc::new(ContentRepository::new(self.client()))
    }

    pub fn set_ai_text(&self, text: &str) {
        self.state().ai_reply = (200, json!({ "text": text }));
    }

    pub fn set_ai_error(&self, status: u16, message: &str) {
        self.state().ai_reply = (status, json!({ "error": message }));
    }
}

type Shared = Arc<Mutex<MockState>>;

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
    state.lock().unwrap()
}

/// Start a mock backend with the given state.
pub async fn spawn(state: MockState) -> MockBackend {
    let state = Arc::new(Mutex::new(state));

    let app = Router::new()
        .route("/api/books/my-books", get(my_books))
        .route("/api/books/:id/units", get(book_units))
        .route("/api/books/:id/units/reorder", put(reorder_units))
        .route("/api/units/:id", get(get_unit))
        .route("/api/units/:id/vocabularies", get(unit_vocabularies))
        .route("/api/units/:id/grammars", get(unit_grammars))
        .route("/api/units/:id/exercises", get(unit_exercises))
        .route("/api/vocabularies", post(create_vocabulary))
        .route(
            "/api/vocabularies/bulk",
            post(bulk_create_vocabularies).put(bulk_update_vocabularies),
        )
        .route(
            "/api/vocabularies/:id",
            put(update_vocabulary).delete(delete_vocabulary),
        )
        .route("/api/grammars", post(create_grammar))
        .route("/api/grammars/:id", put(update_grammar).delete(delete_grammar))
        .route(
            "/api/grammars/bulk",
            post(bulk_create_grammars).put(bulk_update_grammars),
        )
        .route("/api/exercises", post(create_exercise))
        .route("/api/exercises/:id", put(update_exercise).delete(delete_exercise))
        .route(
            "/api/exercises/bulk",
            post(bulk_create_exercises).put(bulk_update_exercises),
        )
        .route("/api/exercises/:id/options", get(exercise_options))
        .route("/api/exercise-options", post(create_option))
        .route("/api/progresses/complete-unit/:id", post(complete_unit))
        .route("/api/progresses/my-progresses", get(my_progresses))
        .route("/api/enrollments/enroll/:id", post(enroll))
        .route("/api/notes", get(unit_notes).post(create_note))
        .route("/api/notes/:id", put(update_note).delete(delete_note))
        .route("/api/ai/generate", post(generate))
        .layer(middleware::from_fn_with_state(state.clone(), track))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        state,
        base_url: format!("http://{}", addr),
    }
}

/// Record the request and apply injected failures.
async fn track(State(state): State<Shared>, req: Request, next: Next) -> Response {
    {
        let mut s = lock(&state);
        s.requests.push(format!("{} {}", req.method(), req.uri().path()));
        let auth = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        s.authorization.push(auth);

        let request = format!("{} {}", req.method(), req.uri().path());
        if s.failing_requests.contains(&request) {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "request failed" })),
            )
                .into_response();
        }

        if req.method() == Method::GET && s.failing_gets > 0 {
            s.failing_gets -= 1;
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "temporarily down" })),
            )
                .into_response();
        }
        if req.method() != Method::GET && s.fail_writes {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "write failed" })),
            )
                .into_response();
        }
    }
    next.run(req).await
}

async fn my_books() -> Json<Value> {
    Json(json!([{ "id": 1, "title": "English A1", "isPublic": true }]))
}

async fn book_units(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Vec<Unit>> {
    Json(lock(&state).units.get(&id).cloned().unwrap_or_default())
}

async fn reorder_units(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> StatusCode {
    let ids: Vec<i64> = body["unitIds"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();
    let mut s = lock(&state);
    if let Some(units) = s.units.get_mut(&id) {
        for unit in units.iter_mut() {
            if let Some(pos) = ids.iter().position(|i| Some(*i) == unit.id) {
                unit.order_index = pos as i32 + 1;
            }
        }
    }
    s.unit_reorders.push((id, ids));
    StatusCode::OK
}

async fn get_unit(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let s = lock(&state);
    match s.units.values().flatten().find(|u| u.id == Some(id)) {
        Some(unit) => Json(unit.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Unit not found" }))).into_response(),
    }
}

async fn unit_vocabularies(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Vec<Vocabulary>> {
    let s = lock(&state);
    Json(s.vocabularies.iter().filter(|v| v.unit_id == Some(id)).cloned().collect())
}

async fn unit_grammars(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Vec<Grammar>> {
    let s = lock(&state);
    Json(s.grammars.iter().filter(|g| g.unit_id == Some(id)).cloned().collect())
}

async fn unit_exercises(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Vec<Exercise>> {
    let s = lock(&state);
    Json(
        s.exercises
            .iter()
            .filter(|e| e.unit_id == Some(id))
            .map(|e| Exercise {
                options: Vec::new(),
                ..e.clone()
            })
            .collect(),
    )
}

async fn create_vocabulary(
    State(state): State<Shared>,
    Json(mut vocabulary): Json<Vocabulary>,
) -> (StatusCode, Json<Vocabulary>) {
    let mut s = lock(&state);
    vocabulary.id = Some(s.id());
    s.vocabularies.push(vocabulary.clone());
    (StatusCode::CREATED, Json(vocabulary))
}

async fn update_vocabulary(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(vocabulary): Json<Vocabulary>,
) -> Json<Vocabulary> {
    let mut s = lock(&state);
    if let Some(stored) = s.vocabularies.iter_mut().find(|v| v.id == Some(id)) {
        *stored = vocabulary.clone();
    }
    Json(vocabulary)
}

async fn delete_vocabulary(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    lock(&state).vocabularies.retain(|v| v.id != Some(id));
    StatusCode::NO_CONTENT
}

async fn bulk_create_vocabularies(
    State(state): State<Shared>,
    Json(items): Json<Vec<Vocabulary>>,
) -> (StatusCode, Json<Vec<Vocabulary>>) {
    let mut s = lock(&state);
    let mut created = Vec::new();
    for mut item in items {
        item.id = Some(s.id());
        s.vocabularies.push(item.clone());
        created.push(item);
    }
    (StatusCode::CREATED, Json(created))
}

async fn bulk_update_vocabularies(
    State(state): State<Shared>,
    Json(items): Json<Vec<Vocabulary>>,
) -> Json<Vec<Vocabulary>> {
    let mut s = lock(&state);
    for item in &items {
        if let Some(stored) = s.vocabularies.iter_mut().find(|v| v.id == item.id) {
            *stored = item.clone();
        }
    }
    Json(items)
}

async fn create_grammar(
    State(state): State<Shared>,
    Json(mut grammar): Json<Grammar>,
) -> (StatusCode, Json<Grammar>) {
    let mut s = lock(&state);
    grammar.id = Some(s.id());
    s.grammars.push(grammar.clone());
    (StatusCode::CREATED, Json(grammar))
}

async fn update_grammar(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(grammar): Json<Grammar>,
) -> Json<Grammar> {
    let mut s = lock(&state);
    if let Some(stored) = s.grammars.iter_mut().find(|g| g.id == Some(id)) {
        *stored = grammar.clone();
    }
    Json(grammar)
}

async fn delete_grammar(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    lock(&state).grammars.retain(|g| g.id != Some(id));
    StatusCode::NO_CONTENT
}

async fn bulk_create_grammars(
    State(state): State<Shared>,
    Json(items): Json<Vec<Grammar>>,
) -> (StatusCode, Json<Vec<Grammar>>) {
    let mut s = lock(&state);
    let mut created = Vec::new();
    for mut item in items {
        item.id = Some(s.id());
        s.grammars.push(item.clone());
        created.push(item);
    }
    (StatusCode::CREATED, Json(created))
}

async fn bulk_update_grammars(
    State(state): State<Shared>,
    Json(items): Json<Vec<Grammar>>,
) -> Json<Vec<Grammar>> {
    let mut s = lock(&state);
    for item in &items {
        if let Some(stored) = s.grammars.iter_mut().find(|g| g.id == item.id) {
            *stored = item.clone();
        }
    }
    Json(items)
}

async fn create_exercise(
    State(state): State<Shared>,
    Json(mut exercise): Json<Exercise>,
) -> (StatusCode, Json<Exercise>) {
    let mut s = lock(&state);
    exercise.id = Some(s.id());
    exercise.options.clear();
    s.exercises.push(exercise.clone());
    (StatusCode::CREATED, Json(exercise))
}

async fn update_exercise(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(exercise): Json<Exercise>,
) -> Json<Exercise> {
    let mut s = lock(&state);
    if let Some(stored) = s.exercises.iter_mut().find(|e| e.id == Some(id)) {
        stored.exercise_text = exercise.exercise_text.clone();
        stored.correct_answer_raw = exercise.correct_answer_raw.clone();
        stored.order_index = exercise.order_index;
    }
    Json(exercise)
}

async fn delete_exercise(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    lock(&state).exercises.retain(|e| e.id != Some(id));
    StatusCode::NO_CONTENT
}

async fn bulk_create_exercises(
    State(state): State<Shared>,
    Json(items): Json<Vec<Exercise>>,
) -> (StatusCode, Json<Vec<Exercise>>) {
    let mut s = lock(&state);
    let mut created = Vec::new();
    for mut item in items {
        item.id = Some(s.id());
        item.options.clear();
        s.exercises.push(item.clone());
        created.push(item);
    }
    (StatusCode::CREATED, Json(created))
}

async fn bulk_update_exercises(
    State(state): State<Shared>,
    Json(items): Json<Vec<Exercise>>,
) -> Json<Vec<Exercise>> {
    let mut s = lock(&state);
    for item in &items {
        if let Some(stored) = s.exercises.iter_mut().find(|e| e.id == item.id) {
            stored.order_index = item.order_index;
        }
    }
    Json(items)
}

async fn exercise_options(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Vec<ExerciseOption>> {
    let s = lock(&state);
    let embedded = s
        .exercises
        .iter()
        .find(|e| e.id == Some(id))
        .map(|e| e.options.clone())
        .unwrap_or_default();
    let created = s.options.iter().filter(|o| o.exercise_id == Some(id)).cloned();
    Json(embedded.into_iter().chain(created).collect())
}

async fn create_option(
    State(state): State<Shared>,
    Json(mut option): Json<ExerciseOption>,
) -> (StatusCode, Json<ExerciseOption>) {
    let mut s = lock(&state);
    option.id = Some(s.id());
    s.options.push(option.clone());
    (StatusCode::CREATED, Json(option))
}

async fn complete_unit(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Progress> {
    let mut s = lock(&state);
    s.completed_units.push(id);
    let progress_id = s.id();
    Json(Progress {
        id: Some(progress_id),
        is_completed: true,
        unit_id: Some(id),
        ..Default::default()
    })
}

async fn my_progresses(State(state): State<Shared>) -> Json<Vec<Progress>> {
    let s = lock(&state);
    Json(
        s.completed_units
            .iter()
            .map(|id| Progress {
                is_completed: true,
                unit_id: Some(*id),
                ..Default::default()
            })
            .collect(),
    )
}

async fn enroll(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Enrollment> {
    let enrollment_id = lock(&state).id();
    Json(Enrollment {
        id: Some(enrollment_id),
        book_id: Some(id),
        status: Some("ACTIVE".to_string()),
        ..Default::default()
    })
}

async fn unit_notes(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Note>> {
    let unit_id = params.get("unitId.equals").and_then(|v| v.parse::<i64>().ok());
    let s = lock(&state);
    let mut notes: Vec<Note> = s
        .notes
        .iter()
        .filter(|n| unit_id.is_none() || n.unit_id == unit_id)
        .cloned()
        .collect();
    notes.reverse();
    Json(notes)
}

async fn create_note(State(state): State<Shared>, Json(mut note): Json<Note>) -> (StatusCode, Json<Note>) {
    let mut s = lock(&state);
    note.id = Some(s.id());
    note.user_profile_id = Some(1);
    s.notes.push(note.clone());
    (StatusCode::CREATED, Json(note))
}

async fn update_note(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(note): Json<Note>,
) -> Json<Note> {
    let mut s = lock(&state);
    if let Some(stored) = s.notes.iter_mut().find(|n| n.id == Some(id)) {
        *stored = note.clone();
    }
    Json(note)
}

async fn delete_note(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    lock(&state).notes.retain(|n| n.id != Some(id));
    StatusCode::NO_CONTENT
}

async fn generate(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = lock(&state);
    s.ai_requests.push(body);
    let (status, reply) = s.ai_reply.clone();
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(reply)).into_response()
}

// === Fixtures ===

pub fn unit(id: i64, book_id: i64, order_index: i32) -> Unit {
    Unit {
        id: Some(id),
        title: format!("Unit {}", id),
        order_index,
        book_id: Some(book_id),
        ..Default::default()
    }
}

pub fn vocabulary(id: i64, unit_id: i64, word: &str, order_index: i32) -> Vocabulary {
    Vocabulary {
        id: Some(id),
        word: word.to_string(),
        meaning: format!("meaning of {}", word),
        order_index,
        unit_id: Some(unit_id),
        ..Default::default()
    }
}

pub fn single_choice(id: i64, unit_id: i64, order_index: i32, correct: usize) -> Exercise {
    Exercise {
        id: Some(id),
        exercise_text: format!("Question {}", id),
        exercise_type: langleague_core::ExerciseType::SingleChoice,
        order_index,
        unit_id: Some(unit_id),
        options: (0..3)
            .map(|i| ExerciseOption {
                id: Some(id * 10 + i as i64),
                option_text: format!("choice {}", i + 1),
                is_correct: i == correct,
                order_index: i as i32 + 1,
                exercise_id: Some(id),
            })
            .collect(),
        ..Default::default()
    }
}

pub fn fill_in(id: i64, unit_id: i64, order_index: i32, answer: &str) -> Exercise {
    Exercise {
        id: Some(id),
        exercise_text: format!("Fill in {}", id),
        exercise_type: langleague_core::ExerciseType::FillInBlank,
        correct_answer_raw: Some(answer.to_string()),
        order_index,
        unit_id: Some(unit_id),
        ..Default::default()
    }
}

/// Book 1 with five units in order 1..=5.
pub fn five_units() -> MockState {
    let mut state = MockState::default();
    state
        .units
        .insert(1, (1..=5).map(|i| unit(i, 1, i as i32)).collect());
    state
}
