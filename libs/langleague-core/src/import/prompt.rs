//! Prompt construction for the AI import.

use super::{ContentType, LanguagePair};

const ARRAY_ONLY: &str = "Output: a valid JSON array ONLY. No Markdown code fences, no \
commentary before or after it. Return nothing but the JSON array.";

const OBJECT_ONLY: &str = "Output: a valid JSON object ONLY. No Markdown code fences, no \
commentary before or after it. Return nothing but the JSON object.";

/// Build the instruction prompt that extracts `content_type` items from `source_text`.
pub fn build_prompt(content_type: ContentType, source_text: &str, languages: &LanguagePair) -> String {
    let target = &languages.target;
    let native = &languages.native;

    match content_type {
        ContentType::Vocabulary => format!(
            r#"Role: dictionary editor. Extract the vocabulary found in the text below.

Rules:
- "word": the word or phrase, in {target}.
- "definition": its meaning, in {native} (translate when needed).
- "example": one sentence in {target} that uses the word.

{ARRAY_ONLY}

Format:
[
  {{ "word": "...", "definition": "...", "example": "..." }}
]

TEXT TO ANALYZE:
{source_text}"#
        ),
        ContentType::Grammar => format!(
            r##"Role: grammar content editor. The text below was copied or OCR-scanned from a grammar book and may be messy, contain recognition errors and lack structure.

Language context:
- Explanation language: {native}
- Language being learned: {target}

Tasks:
1. Fix OCR errors and typos.
2. Split the text into grammar points and keep every piece of information.
3. Format each explanation as clean Markdown: headings for sections, bold for rules and key terms, lists for usage rules, `backticks` for patterns, > blockquotes for notes.

Rules:
- "title": a short, clear title for the grammar point.
- "description": the Markdown explanation, written in {native}.
- "example": example sentences in {target}, one per line.

{ARRAY_ONLY}

Format:
[
  {{ "title": "...", "description": "# ...\n\n## Structure\n- **...**: ...", "example": "...\n..." }}
]

RAW TEXT:
{source_text}"##
        ),
        ContentType::Exercise => format!(
            r#"Role: quiz author. Write multiple choice questions that test the content of the text below.

Language context:
- Source text language: {native}
- Output language: {target}

Rules:
- "exerciseText": the question, in {target}.
- "options": at least 2 answer choices, each with "optionText" (in {target}) and "isCorrect" (boolean).
- Exactly ONE option per question has "isCorrect": true.

{ARRAY_ONLY}

Format:
[
  {{
    "exerciseText": "...",
    "options": [
      {{ "optionText": "...", "isCorrect": false }},
      {{ "optionText": "...", "isCorrect": true }}
    ]
  }}
]

TEXT TO ANALYZE:
{source_text}"#
        ),
    }
}

/// Build a prompt that generates one item about `subject` (a word, grammar title or topic).
pub fn build_single_prompt(content_type: ContentType, subject: &str, languages: &LanguagePair) -> String {
    let target = &languages.target;
    let native = &languages.native;

    match content_type {
        ContentType::Vocabulary => format!(
            r#"Role: dictionary editor. Describe the word "{subject}".

Rules:
- "word": "{subject}".
- "definition": its meaning in {native}.
- "example": one sentence in {target} that uses it.
- "phonetic": IPA transcription.

{OBJECT_ONLY}

Format:
{{ "word": "{subject}", "definition": "...", "example": "...", "phonetic": "..." }}"#
        ),
        ContentType::Grammar => format!(
            r#"Role: grammar teacher. Explain the grammar point "{subject}".

Rules:
- "title": "{subject}".
- "description": how it is used, in {native}, formatted as Markdown.
- "example": example sentences in {target}, one per line.

{OBJECT_ONLY}

Format:
{{ "title": "{subject}", "description": "...", "example": "..." }}"#
        ),
        ContentType::Exercise => format!(
            r#"Role: quiz author. Write one multiple choice question about "{subject}".

Rules:
- "exerciseText": the question in {target}.
- "options": at least 2 choices with "optionText" and "isCorrect"; exactly ONE is correct.

{OBJECT_ONLY}

Format:
{{ "exerciseText": "...", "options": [{{ "optionText": "...", "isCorrect": true }}, {{ "optionText": "...", "isCorrect": false }}] }}"#
        ),
    }
}
