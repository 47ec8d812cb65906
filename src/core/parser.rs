//! Quiz admonition parser.
//!
//! Turns `!!! quiz "Title"` blocks into [`Quiz`] values:
//!
//! ```text
//! !!! quiz "Section 3.1 Quiz: Loops"
//!
//!     Test your understanding of key concepts from this section.
//!
//!     1. What is 2+2?
//!         - 3
//!         - 4 { data-correct }
//!         - 5
//! ```
//!
//! The first numbered item fixes the question column. Bullets indented past
//! that column are options of the question above them. Anything else indented
//! past the question column continues the prompt (or the option it follows).
//! Parsing never stops at the first problem: every error in a block is
//! collected so an author can fix them in one pass, and a block with any
//! error yields no quiz.

use crate::core::markdown::{self, Fence, IndentedText};
use crate::core::output;
use crate::core::quiz::{AnswerOption, CORRECT_MARKER, MIN_OPTIONS, Question, Quiz, SelectMode};
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;
use thiserror::Error;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:!!!|\?\?\?\+?)\s+quiz(?:\s+[\w-]+)*(?:\s+"(?P<title>[^"]*)")?\s*$"#).unwrap()
});

static CORRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[ \t]*data-correct[ \t]*\}").unwrap());

const CONTEXT_CHARS: usize = 60;

/// A single authoring problem inside a quiz block.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizError {
    #[error("line {line}: malformed structure: {reason} (near `{context}`)")]
    MalformedStructure {
        line: usize,
        reason: String,
        context: String,
    },
    #[error("line {line}: question `{}` has {found} option(s), at least {min} required", output::compact_line(.prompt, CONTEXT_CHARS))]
    EmptyOptions {
        line: usize,
        prompt: String,
        found: usize,
        min: usize,
    },
    #[error("line {line}: question `{}` has no option marked {}", output::compact_line(.prompt, CONTEXT_CHARS), CORRECT_MARKER)]
    NoCorrectAnswer { line: usize, prompt: String },
    #[error("line {line}: quiz `{title}` contains no questions")]
    NoQuestions { line: usize, title: String },
}

impl QuizError {
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedStructure { line, .. }
            | Self::EmptyOptions { line, .. }
            | Self::NoCorrectAnswer { line, .. }
            | Self::NoQuestions { line, .. } => *line,
        }
    }

    fn malformed(line: usize, reason: &str, raw: &str) -> Self {
        Self::MalformedStructure {
            line,
            reason: reason.to_string(),
            context: output::compact_line(raw, CONTEXT_CHARS),
        }
    }
}

/// All errors found while parsing one quiz block.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}", render_errors(.errors))]
pub struct ParseFailure {
    pub errors: Vec<QuizError>,
}

fn render_errors(errors: &[QuizError]) -> String {
    let messages = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>();
    format!(
        "{} quiz error(s): {}",
        errors.len(),
        output::preview_messages(&messages, 3, 160)
    )
}

/// Result of scanning a whole Markdown page for quiz blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    /// Quizzes that parsed cleanly, in page order.
    pub quizzes: Vec<Quiz>,
    /// Errors from blocks that did not, with page line numbers.
    pub errors: Vec<QuizError>,
    /// Number of quiz markers found.
    pub blocks: usize,
}

impl ParsedDocument {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a single quiz block. The first non-blank line must be the marker;
/// line numbers in errors are relative to `block`.
pub fn parse_quiz(block: &str) -> Result<Quiz, ParseFailure> {
    let lines: Vec<&str> = block.lines().collect();
    let Some(start) = lines.iter().position(|l| !markdown::is_blank(l)) else {
        return Err(ParseFailure {
            errors: vec![QuizError::malformed(1, "expected a `!!! quiz` marker", "")],
        });
    };

    let (marker_indent, content) = markdown::split_indent(lines[start]);
    if !MARKER_RE.is_match(content) {
        return Err(ParseFailure {
            errors: vec![QuizError::malformed(
                start + 1,
                "expected a `!!! quiz` marker",
                lines[start],
            )],
        });
    }

    let end = block_end(&lines, start, marker_indent);
    let mut result = parse_block(&lines[start..end], start);
    if let Some(extra) = (end..lines.len()).find(|&i| !markdown::is_blank(lines[i])) {
        let err = QuizError::malformed(extra + 1, "text outside the quiz block", lines[extra]);
        match &mut result {
            Ok(_) => result = Err(ParseFailure { errors: vec![err] }),
            Err(failure) => failure.errors.push(err),
        }
    }
    result
}

/// Find and parse every quiz block in a Markdown page. Marker lines inside
/// fenced code are ignored.
pub fn parse_document(text: &str) -> ParsedDocument {
    let lines: Vec<&str> = text.lines().collect();
    let mut doc = ParsedDocument::default();
    let mut fences = markdown::FenceTracker::default();
    let mut i = 0;

    while i < lines.len() {
        let (indent, content) = markdown::split_indent(lines[i]);
        if fences.observe(content) {
            i += 1;
            continue;
        }
        if MARKER_RE.is_match(content) {
            let end = block_end(&lines, i, indent);
            doc.blocks += 1;
            match parse_block(&lines[i..end], i) {
                Ok(quiz) => doc.quizzes.push(quiz),
                Err(failure) => doc.errors.extend(failure.errors),
            }
            i = end;
            continue;
        }
        i += 1;
    }

    doc
}

/// Whether `content` (a line without its indentation) opens a quiz block.
pub fn is_quiz_marker(content: &str) -> bool {
    MARKER_RE.is_match(content)
}

/// Title of a quiz marker line, empty when it has none.
pub fn marker_title(content: &str) -> Option<String> {
    let caps = MARKER_RE.captures(content)?;
    Some(caps.name("title").map_or(String::new(), |m| m.as_str().trim().to_string()))
}

/// Exclusive end index of the block opened at `start`: the first non-blank
/// line at or left of the marker's indentation, with trailing blanks dropped.
pub(crate) fn block_end(lines: &[&str], start: usize, marker_indent: usize) -> usize {
    let mut end = start + 1;
    while end < lines.len() {
        let (indent, content) = markdown::split_indent(lines[end]);
        if !content.is_empty() && indent <= marker_indent {
            break;
        }
        end += 1;
    }
    while end > start + 1 && markdown::is_blank(lines[end - 1]) {
        end -= 1;
    }
    end
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Description,
    Prompt,
    Option,
}

struct PendingOption {
    line: usize,
    column: usize,
    head: String,
    rest: IndentedText,
}

struct PendingQuestion {
    line: usize,
    column: usize,
    head: String,
    rest: IndentedText,
    options: Vec<PendingOption>,
}

struct BlockParser {
    /// 0-based source index of the marker line.
    base: usize,
    question_column: Option<usize>,
    description: IndentedText,
    current: Option<PendingQuestion>,
    questions: Vec<Question>,
    errors: Vec<QuizError>,
    fence: Option<(Fence, Target, usize)>,
}

fn parse_block(lines: &[&str], base: usize) -> Result<Quiz, ParseFailure> {
    let (_, marker) = markdown::split_indent(lines[0]);
    let title = marker_title(marker).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(lines.join("\n").as_bytes());
    let fingerprint = format!("{:x}", hasher.finalize());

    let mut parser = BlockParser {
        base,
        question_column: None,
        description: IndentedText::default(),
        current: None,
        questions: Vec::new(),
        errors: Vec::new(),
        fence: None,
    };
    for (offset, raw) in lines.iter().enumerate().skip(1) {
        parser.feed(offset, raw);
    }
    parser.finish(title, fingerprint)
}

impl BlockParser {
    fn line_no(&self, offset: usize) -> usize {
        self.base + offset + 1
    }

    fn feed(&mut self, offset: usize, raw: &str) {
        let line = self.line_no(offset);
        let (indent, content) = markdown::split_indent(raw);

        if let Some((fence, target, _)) = self.fence {
            if fence.closes(content) {
                self.fence = None;
            }
            self.push_text(target, indent, content);
            return;
        }

        if content.is_empty() {
            let target = self.current_target();
            self.push_text(target, indent, content);
            return;
        }

        if let Some(fence) = Fence::open(content) {
            if let Some(target) = self.continuation_target(indent) {
                self.fence = Some((fence, target, line));
                self.push_text(target, indent, content);
            } else {
                self.errors.push(QuizError::malformed(
                    line,
                    "code block after options is not nested under an option",
                    raw,
                ));
            }
            return;
        }

        if let Some((_, text)) = markdown::ordered_item(content) {
            self.on_numbered(line, indent, content, text, raw);
            return;
        }

        if let Some(text) = markdown::bullet_item(content) {
            self.on_bullet(line, indent, content, text, raw);
            return;
        }

        match self.continuation_target(indent) {
            Some(target) => self.push_text(target, indent, content),
            None => {
                let reason = self.stray_text_reason();
                self.errors.push(QuizError::malformed(line, reason, raw));
            }
        }
    }

    fn on_numbered(&mut self, line: usize, indent: usize, content: &str, text: &str, raw: &str) {
        let Some(column) = self.question_column else {
            self.question_column = Some(indent);
            self.start_question(line, indent, text);
            return;
        };

        if indent == column {
            self.start_question(line, indent, text);
        } else if indent < column {
            self.errors.push(QuizError::malformed(
                line,
                "numbered item left of the question column",
                raw,
            ));
        } else {
            match self.continuation_target(indent) {
                Some(target) => self.push_text(target, indent, content),
                None => self.errors.push(QuizError::malformed(
                    line,
                    "numbered item nested under a question after its options",
                    raw,
                )),
            }
        }
    }

    fn on_bullet(&mut self, line: usize, indent: usize, content: &str, text: &str, raw: &str) {
        let Some(question) = self.current.as_mut() else {
            self.errors
                .push(QuizError::malformed(line, "option outside any question", raw));
            return;
        };

        if indent <= question.column {
            self.errors.push(QuizError::malformed(
                line,
                "option is not nested under its question",
                raw,
            ));
            return;
        }

        // deeper bullets after an option belong to that option's text
        if let Some(last) = question.options.last_mut()
            && indent > last.column
        {
            last.rest.push(indent, content);
            return;
        }

        question.options.push(PendingOption {
            line,
            column: indent,
            head: text.to_string(),
            rest: IndentedText::default(),
        });
    }

    fn start_question(&mut self, line: usize, column: usize, text: &str) {
        self.close_question();
        self.current = Some(PendingQuestion {
            line,
            column,
            head: text.to_string(),
            rest: IndentedText::default(),
            options: Vec::new(),
        });
    }

    /// Where a blank line goes: the innermost open piece of text.
    fn current_target(&self) -> Target {
        match &self.current {
            None => Target::Description,
            Some(q) if q.options.is_empty() => Target::Prompt,
            Some(_) => Target::Option,
        }
    }

    /// Where a non-list line indented to `indent` belongs, if anywhere.
    fn continuation_target(&self, indent: usize) -> Option<Target> {
        match &self.current {
            None => Some(Target::Description),
            Some(q) => match q.options.last() {
                None if indent > q.column => Some(Target::Prompt),
                None => None,
                Some(opt) if indent > opt.column => Some(Target::Option),
                Some(_) => None,
            },
        }
    }

    fn stray_text_reason(&self) -> &'static str {
        match &self.current {
            Some(q) if !q.options.is_empty() => "unexpected text after the options of a question",
            _ => "text at the question column interrupts the question",
        }
    }

    fn push_text(&mut self, target: Target, indent: usize, content: &str) {
        let text = match (target, self.current.as_mut()) {
            (Target::Description, _) | (_, None) => &mut self.description,
            (Target::Prompt, Some(q)) => &mut q.rest,
            (Target::Option, Some(q)) => match q.options.last_mut() {
                Some(opt) => &mut opt.rest,
                None => &mut q.rest,
            },
        };
        if content.is_empty() {
            text.push_blank();
        } else {
            text.push(indent, content);
        }
    }

    fn close_question(&mut self) {
        let Some(pending) = self.current.take() else {
            return;
        };

        let prompt = join_text(&pending.head, &pending.rest);
        let mut options = Vec::with_capacity(pending.options.len());
        for opt in &pending.options {
            let raw = join_text(&opt.head, &opt.rest);
            let is_correct = CORRECT_RE.is_match(&raw);
            let text = strip_correct_marker(&raw);
            if text.is_empty() {
                self.errors.push(QuizError::malformed(
                    opt.line,
                    "option has no text",
                    &format!("- {}", opt.head),
                ));
            }
            options.push(AnswerOption { text, is_correct });
        }
        let correct = options.iter().filter(|o| o.is_correct).count();

        if options.len() < MIN_OPTIONS {
            self.errors.push(QuizError::EmptyOptions {
                line: pending.line,
                prompt: prompt.clone(),
                found: options.len(),
                min: MIN_OPTIONS,
            });
        }
        if !options.is_empty() && correct == 0 {
            self.errors.push(QuizError::NoCorrectAnswer {
                line: pending.line,
                prompt: prompt.clone(),
            });
        }

        self.questions.push(Question {
            prompt,
            options,
            line: pending.line,
            mode: SelectMode::from_correct_count(correct),
        });
    }

    fn finish(mut self, title: String, fingerprint: String) -> Result<Quiz, ParseFailure> {
        if let Some((_, _, line)) = self.fence.take() {
            self.errors
                .push(QuizError::malformed(line, "unterminated code fence", "```"));
        }
        self.close_question();

        let line = self.base + 1;
        if self.questions.is_empty() {
            self.errors.push(QuizError::NoQuestions {
                line,
                title: title.clone(),
            });
        }

        if !self.errors.is_empty() {
            self.errors.sort_by_key(QuizError::line);
            return Err(ParseFailure {
                errors: self.errors,
            });
        }

        Ok(Quiz {
            title,
            description: self.description.render().trim().to_string(),
            questions: self.questions,
            line,
            fingerprint,
        })
    }
}

/// Remove `{ data-correct }` markers line by line. Line breaks and the
/// indentation of continuation lines are kept.
fn strip_correct_marker(raw: &str) -> String {
    if !CORRECT_RE.is_match(raw) {
        return raw.to_string();
    }
    raw.lines()
        .map(|line| {
            if !CORRECT_RE.is_match(line) {
                return line.to_string();
            }
            CORRECT_RE
                .split(line)
                .enumerate()
                .map(|(i, piece)| if i == 0 { piece.trim_end() } else { piece.trim() })
                .filter(|piece| !piece.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn join_text(head: &str, rest: &IndentedText) -> String {
    if rest.is_empty() {
        return head.trim().to_string();
    }
    format!("{}\n{}", head, rest.render()).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(q: &Question) -> Vec<&str> {
        q.options.iter().map(|o| o.text.as_str()).collect()
    }

    #[test]
    fn test_single_question() {
        let src = "!!! quiz \"Arithmetic\"\n\n    1. What is 2+2?\n        - 3\n        - 4 { data-correct }\n        - 5\n";
        let quiz = parse_quiz(src).unwrap();
        assert_eq!(quiz.title, "Arithmetic");
        assert_eq!(quiz.questions.len(), 1);
        let q = &quiz.questions[0];
        assert_eq!(q.prompt, "What is 2+2?");
        assert_eq!(texts(q), vec!["3", "4", "5"]);
        assert_eq!(q.correct_indices(), vec![1]);
        assert_eq!(q.mode, SelectMode::Single);
        assert_eq!(q.line, 3);
        assert_eq!(quiz.line, 1);
    }

    #[test]
    fn test_leading_marker_and_compact_token() {
        let src = "!!! quiz \"T\"\n    1. True or false?\n        - { data-correct } True\n        - {data-correct}False\n";
        let quiz = parse_quiz(src).unwrap();
        let q = &quiz.questions[0];
        assert_eq!(texts(q), vec!["True", "False"]);
        assert_eq!(q.mode, SelectMode::Multi);
    }

    #[test]
    fn test_description_is_collected() {
        let src = "!!! quiz \"Loops\"\n\n    Test your understanding of key concepts.\n\n    1. Q?\n        - a { data-correct }\n        - b\n";
        let quiz = parse_quiz(src).unwrap();
        assert_eq!(quiz.description, "Test your understanding of key concepts.");
    }

    #[test]
    fn test_prompt_with_code_block() {
        let src = "!!! quiz \"Code\"\n\n    1. What does this print?\n\n        ```python\n        - 1\n        2. two\n        ```\n\n        - `1` { data-correct }\n        - `2`\n";
        let quiz = parse_quiz(src).unwrap();
        let q = &quiz.questions[0];
        assert_eq!(
            q.prompt,
            "What does this print?\n\n```python\n- 1\n2. two\n```"
        );
        assert_eq!(texts(q), vec!["`1`", "`2`"]);
    }

    #[test]
    fn test_option_continuation_lines() {
        let src = "!!! quiz \"T\"\n    1. Pick one\n        - a long option\n          that wraps { data-correct }\n        - short\n";
        let quiz = parse_quiz(src).unwrap();
        let q = &quiz.questions[0];
        assert_eq!(q.options[0].text, "a long option\nthat wraps");
        assert!(q.options[0].is_correct);
    }

    #[test]
    fn test_marked_option_followed_by_code_block() {
        let src = "!!! quiz \"T\"\n    1. Which prints 1?\n        - Option A { data-correct }\n\n            ```python\n            print(1)\n            ```\n\n        - Option B\n";
        let quiz = parse_quiz(src).unwrap();
        let q = &quiz.questions[0];
        assert_eq!(q.options[0].text, "Option A\n\n```python\nprint(1)\n```");
        assert!(q.options[0].is_correct);
        assert_eq!(q.options[1].text, "Option B");
    }

    #[test]
    fn test_marked_first_line_of_wrapped_option() {
        let src = "!!! quiz \"T\"\n    1. Pick one\n        - first line { data-correct }\n          second line\n        - other\n";
        let quiz = parse_quiz(src).unwrap();
        let q = &quiz.questions[0];
        assert_eq!(q.options[0].text, "first line\nsecond line");
        assert!(q.options[0].is_correct);
    }

    #[test]
    fn test_marker_mid_option_with_continuation() {
        let src = "!!! quiz \"T\"\n    1. Pick one\n        - keep { data-correct } this\n          and this line\n        - other\n";
        let quiz = parse_quiz(src).unwrap();
        let q = &quiz.questions[0];
        assert_eq!(q.options[0].text, "keep this\nand this line");
        assert!(q.options[0].is_correct);
    }

    #[test]
    fn test_empty_option_is_malformed() {
        let src = "!!! quiz \"T\"\n    1. Pick one\n        -\n        - { data-correct }\n        - real { data-correct }\n";
        let err = parse_quiz(src).unwrap_err();
        let lines: Vec<usize> = err
            .errors
            .iter()
            .filter(|e| matches!(e, QuizError::MalformedStructure { reason, .. } if reason == "option has no text"))
            .map(QuizError::line)
            .collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn test_formatting_preserved() {
        let src = "!!! quiz \"T\"\n    1. Which uses **emphasis**?\n        - *this* one { data-correct }\n        - `code`   \n";
        let quiz = parse_quiz(src).unwrap();
        let q = &quiz.questions[0];
        assert_eq!(q.prompt, "Which uses **emphasis**?");
        assert_eq!(texts(q), vec!["*this* one", "`code`"]);
    }

    #[test]
    fn test_no_correct_answer_names_prompt() {
        let src = "!!! quiz \"T\"\n    1. Which is prime?\n        - 4\n        - 6\n";
        let err = parse_quiz(src).unwrap_err();
        assert_eq!(
            err.errors,
            vec![QuizError::NoCorrectAnswer {
                line: 2,
                prompt: "Which is prime?".to_string(),
            }]
        );
    }

    #[test]
    fn test_too_few_options() {
        let src = "!!! quiz \"T\"\n    1. Lonely\n        - only { data-correct }\n    2. Empty\n";
        let err = parse_quiz(src).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert!(matches!(
            &err.errors[0],
            QuizError::EmptyOptions { line: 2, found: 1, min: 2, .. }
        ));
        assert!(matches!(
            &err.errors[1],
            QuizError::EmptyOptions { line: 4, found: 0, .. }
        ));
    }

    #[test]
    fn test_option_outside_question() {
        let src = "!!! quiz \"T\"\n    - stray\n    1. Q\n        - a { data-correct }\n        - b\n";
        let err = parse_quiz(src).unwrap_err();
        match &err.errors[0] {
            QuizError::MalformedStructure { line, reason, context } => {
                assert_eq!(*line, 2);
                assert_eq!(reason, "option outside any question");
                assert_eq!(context, "- stray");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_option_at_question_column() {
        let src = "!!! quiz \"T\"\n    1. Q\n    - a { data-correct }\n    - b\n";
        let err = parse_quiz(src).unwrap_err();
        assert!(err.errors.iter().any(|e| matches!(
            e,
            QuizError::MalformedStructure { line: 3, .. }
        )));
    }

    #[test]
    fn test_text_after_options_is_rejected() {
        let src = "!!! quiz \"T\"\n    1. Q\n        - a { data-correct }\n        - b\n    Answer: a\n";
        let err = parse_quiz(src).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].line(), 5);
    }

    #[test]
    fn test_unterminated_fence() {
        let src = "!!! quiz \"T\"\n    1. Q\n        ```\n        code\n";
        let err = parse_quiz(src).unwrap_err();
        assert!(err.errors.iter().any(|e| matches!(
            e,
            QuizError::MalformedStructure { line: 3, reason, .. } if reason == "unterminated code fence"
        )));
    }

    #[test]
    fn test_no_questions() {
        let err = parse_quiz("!!! quiz \"Quiz\"\n\n    Content needed.\n").unwrap_err();
        assert_eq!(
            err.errors,
            vec![QuizError::NoQuestions {
                line: 1,
                title: "Quiz".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_marker() {
        let err = parse_quiz("1. Q\n    - a\n").unwrap_err();
        assert!(matches!(
            &err.errors[0],
            QuizError::MalformedStructure { line: 1, .. }
        ));
    }

    #[test]
    fn test_text_outside_block() {
        let src = "!!! quiz \"T\"\n    1. Q\n        - a { data-correct }\n        - b\n\nTrailing paragraph\n";
        let err = parse_quiz(src).unwrap_err();
        assert_eq!(err.errors[0].line(), 6);
    }

    #[test]
    fn test_marker_variants() {
        assert!(is_quiz_marker("!!! quiz \"Title\""));
        assert!(is_quiz_marker("!!! quiz"));
        assert!(is_quiz_marker("??? quiz \"Collapsed\""));
        assert!(is_quiz_marker("???+ quiz inline \"Open\""));
        assert!(!is_quiz_marker("!!! note \"Not a quiz\""));
        assert!(!is_quiz_marker("!!! quizzes"));
        assert_eq!(marker_title("!!! quiz"), Some(String::new()));
        assert_eq!(marker_title("??? quiz \" Spaced \""), Some("Spaced".to_string()));
    }

    #[test]
    fn test_document_with_two_blocks_and_fenced_marker() {
        let page = "# 1.1 Intro - Quiz\n\n```markdown\n!!! quiz \"Example only\"\n```\n\n!!! quiz \"First\"\n    1. A?\n        - x { data-correct }\n        - y\n\nSome prose.\n\n!!! quiz \"Second\"\n    1. B?\n        - x\n        - y\n";
        let doc = parse_document(page);
        assert_eq!(doc.blocks, 2);
        assert_eq!(doc.quizzes.len(), 1);
        assert_eq!(doc.quizzes[0].title, "First");
        assert_eq!(doc.quizzes[0].line, 7);
        assert_eq!(doc.errors.len(), 1);
        assert_eq!(doc.errors[0].line(), 15);
    }

    #[test]
    fn test_indented_block_in_tab() {
        let page = "=== \"Quiz\"\n\n    !!! quiz \"Nested\"\n        1. Q\n            - a { data-correct }\n            - b\n";
        let doc = parse_document(page);
        assert!(doc.is_ok());
        assert_eq!(doc.quizzes[0].questions[0].options.len(), 2);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let src = "!!! quiz \"T\"\n    1. Q\n        - a { data-correct }\n        - b\n";
        let a = parse_quiz(src).unwrap();
        let b = parse_quiz(src).unwrap();
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_eq!(a.fingerprint.len(), 64);
        let c = parse_quiz(&src.replace("b\n", "c\n")).unwrap();
        assert_ne!(a.fingerprint, c.fingerprint);
    }
}
