mod common;

use common::{spawn, vocabulary, MockState};
use langleague_client::{ClientError, ImportAssistant};
use langleague_core::{ContentType, ImportError, ImportStep, LanguagePair, VocabularyDraft};
use pretty_assertions::assert_eq;

const VOCABULARY_REPLY: &str = r#"```json
[
  {"word": "apple", "definition": "quả táo", "example": "I eat an apple.", "phonetic": "/ˈæp.əl/"},
  {"word": "river", "definition": "dòng sông", "example": "The river is wide."}
]
```"#;

const EXERCISE_REPLY: &str = r#"[
  {"exerciseText": "She ___ to school.", "options": [
    {"optionText": "go", "isCorrect": false},
    {"optionText": "goes", "isCorrect": true}
  ]},
  {"exerciseText": "Pick the fruits", "options": [
    {"optionText": "apple", "isCorrect": true},
    {"optionText": "pear", "isCorrect": true},
    {"optionText": "chair", "isCorrect": false}
  ]}
]"#;

fn unit_with_vocabulary() -> MockState {
    let mut state = MockState::default();
    state.vocabularies = vec![
        vocabulary(11, 7, "hello", 1),
        vocabulary(12, 7, "goodbye", 3),
    ];
    state
}

#[tokio::test]
async fn test_vocabulary_import_appends_to_unit() {
    let mock = spawn(unit_with_vocabulary()).await;
    mock.set_ai_text(VOCABULARY_REPLY);
    let repository = mock.repository();

    let mut assistant = ImportAssistant::new(
        repository.api().clone(),
        ContentType::Vocabulary,
        LanguagePair::default(),
    );
    let count = assistant
        .generate_from("An apple fell into the river.")
        .await
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(assistant.step(), ImportStep::Review);

    let prompt = mock.state().ai_requests[0]["prompt"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("An apple fell into the river."));
    assert!(prompt.contains("Vietnamese"));

    repository.unit_content(7).await.unwrap();
    let summary = assistant.save_into(&repository, 7).await.unwrap();
    assert_eq!(summary.created, 2);
    assert_eq!(assistant.step(), ImportStep::Input);
    assert!(!repository.is_cached(7).await);

    let content = repository.unit_content(7).await.unwrap();
    let rows: Vec<(&str, i32)> = content
        .vocabularies
        .iter()
        .map(|v| (v.word.as_str(), v.order_index))
        .collect();
    assert_eq!(
        rows,
        vec![("hello", 1), ("goodbye", 3), ("apple", 4), ("river", 5)]
    );
    assert_eq!(content.vocabularies[2].meaning, "quả táo");
    assert_eq!(content.vocabularies[3].phonetic, None);
}

#[tokio::test]
async fn test_exercise_import_creates_options() {
    let mock = spawn(MockState::default()).await;
    mock.set_ai_text(EXERCISE_REPLY);
    let repository = mock.repository();

    let mut assistant = ImportAssistant::new(
        repository.api().clone(),
        ContentType::Exercise,
        LanguagePair::default(),
    );
    assistant.generate_from("Simple present").await.unwrap();

    // Drop the wrong option of the first question during review.
    assistant.wizard_mut().remove_option(0, 0).unwrap();

    let summary = assistant.save_into(&repository, 9).await.unwrap();
    assert_eq!(summary.created, 2);
    assert_eq!(summary.options_created, 4);
    assert_eq!(mock.state().count("POST /api/exercise-options"), 4);

    let content = repository.unit_content(9).await.unwrap();
    assert_eq!(content.exercises.len(), 2);
    let first = &content.exercises[0];
    assert_eq!(first.order_index, 1);
    assert_eq!(first.options.len(), 1);
    assert!(first.options[0].is_correct);
    let second = &content.exercises[1];
    assert_eq!(second.exercise_type, langleague_core::ExerciseType::MultiChoice);
    assert_eq!(second.correct_option_ids().len(), 2);
}

#[tokio::test]
async fn test_unparseable_reply_returns_to_input() {
    let mock = spawn(MockState::default()).await;
    mock.set_ai_text("Sorry, I cannot help with that.");

    let mut assistant = ImportAssistant::new(mock.client(), ContentType::Grammar, LanguagePair::default());
    let err = assistant.generate_from("Past tense").await.unwrap_err();

    assert!(matches!(err, ClientError::Import(ImportError::Parse(_))));
    assert_eq!(assistant.step(), ImportStep::Input);
    assert_eq!(assistant.wizard().input_text(), "Past tense");
    assert!(assistant
        .last_error()
        .unwrap()
        .starts_with("Failed to parse AI response"));
}

#[tokio::test]
async fn test_empty_array_reply() {
    let mock = spawn(MockState::default()).await;
    mock.set_ai_text("```json\n[]\n```");

    let mut assistant = ImportAssistant::new(mock.client(), ContentType::Vocabulary, LanguagePair::default());
    let err = assistant.generate_from("nothing here").await.unwrap_err();

    assert!(matches!(err, ClientError::Import(ImportError::EmptyArray)));
    assert!(assistant
        .last_error()
        .unwrap()
        .starts_with("No items were generated"));
}

#[tokio::test]
async fn test_rate_limited_request() {
    let mock = spawn(MockState::default()).await;
    mock.set_ai_error(429, "Rate limit exceeded");

    let mut assistant = ImportAssistant::new(mock.client(), ContentType::Vocabulary, LanguagePair::default());
    let err = assistant.generate_from("some text").await.unwrap_err();

    assert!(matches!(err, ClientError::Backend { status: 429, .. }));
    assert_eq!(assistant.step(), ImportStep::Input);
    assert!(assistant.last_error().unwrap().starts_with("Rate limit exceeded"));
    assert_eq!(mock.state().count("POST /api/ai/generate"), 1);
}

#[tokio::test]
async fn test_blank_input_never_calls_backend() {
    let mock = spawn(MockState::default()).await;

    let mut assistant = ImportAssistant::new(mock.client(), ContentType::Vocabulary, LanguagePair::default());
    let err = assistant.generate_from("   ").await.unwrap_err();

    assert!(matches!(err, ClientError::Import(ImportError::EmptyInput)));
    assert!(mock.state().requests.is_empty());
}

#[tokio::test]
async fn test_single_vocabulary_entry() {
    let mock = spawn(MockState::default()).await;
    mock.set_ai_text(
        r#"```json
{"word": "ocean", "definition": "đại dương", "example": "The ocean is deep.", "phonetic": "/ˈoʊ.ʃən/"}
```"#,
    );

    let assistant = ImportAssistant::new(mock.client(), ContentType::Vocabulary, LanguagePair::default());
    let draft: VocabularyDraft = assistant.generate_single("ocean").await.unwrap();

    assert_eq!(draft.word, "ocean");
    assert_eq!(draft.definition, "đại dương");
    assert_eq!(draft.phonetic.as_deref(), Some("/ˈoʊ.ʃən/"));
    assert_eq!(assistant.step(), ImportStep::Input);

    let prompt = mock.state().ai_requests[0]["prompt"].as_str().unwrap().to_string();
    assert!(prompt.contains(r#"Describe the word "ocean""#));
}
