//! Grammar match failures

use chumsky::error::SimpleReason;
use std::fmt;

use super::common::ParserError;
use super::Phase;

/// The input deviates from a committed `async`/`await` shape.
///
/// Positions refer to the text the failing phase was given: the original
/// source for [`Phase::AsyncFunctions`], the phase-one output for
/// [`Phase::AwaitCalls`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    pub phase: Phase,
    /// Byte offset of the failure.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub column: usize,
    pub message: String,
    pub expected: Vec<String>,
    pub found: Option<char>,
}

impl GrammarError {
    /// Build from chumsky's error list, keeping the one that got furthest.
    pub(crate) fn from_parser_errors(
        phase: Phase,
        source: &str,
        offsets: &CharOffsets,
        errors: Vec<ParserError>,
    ) -> Self {
        let Some(error) = errors.into_iter().max_by_key(|e| e.span().start) else {
            return Self::at(phase, source, 0, "no match".to_string());
        };

        let offset = offsets.byte(error.span().start);
        let found = error.found().copied();
        let mut expected: Vec<String> = error
            .expected()
            .map(|e| match e {
                Some(c) => format!("{c:?}"),
                None => "end of input".to_string(),
            })
            .collect();
        expected.sort();

        let message = match error.reason() {
            SimpleReason::Custom(msg) => msg.clone(),
            SimpleReason::Unclosed { delimiter, .. } => {
                format!("unclosed delimiter {delimiter:?}")
            }
            SimpleReason::Unexpected => match (error.label(), found) {
                (Some(label), Some(c)) => format!("unexpected {c:?} while parsing {label}"),
                (Some(label), None) => format!("unexpected end of input while parsing {label}"),
                (None, Some(c)) => format!("unexpected {c:?}"),
                (None, None) => "unexpected end of input".to_string(),
            },
        };

        let mut err = Self::at(phase, source, offset, message);
        err.expected = expected;
        err.found = found;
        err
    }

    fn at(phase: Phase, source: &str, offset: usize, message: String) -> Self {
        let (line, column) = line_column(source, offset);
        Self {
            phase,
            offset,
            line,
            column,
            message,
            expected: Vec::new(),
            found: None,
        }
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} grammar failed at {}:{}: {}",
            self.phase, self.line, self.column, self.message
        )?;
        if !self.expected.is_empty() {
            write!(f, " (expected one of {})", self.expected.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for GrammarError {}

/// Maps chumsky's character offsets back to byte offsets.
pub(crate) struct CharOffsets(Vec<usize>);

impl CharOffsets {
    pub(crate) fn new(source: &str) -> Self {
        let mut offsets: Vec<usize> = source.char_indices().map(|(i, _)| i).collect();
        offsets.push(source.len());
        Self(offsets)
    }

    pub(crate) fn byte(&self, char_index: usize) -> usize {
        let last = self.0.len() - 1;
        self.0[char_index.min(last)]
    }
}

fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
