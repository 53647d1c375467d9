//! The fixed rewrite table.
//!
//! Compound rules rewrite `table-field` / `table~field` references and keep the
//! separator and field name exactly as written. Standalone rules rewrite a bare
//! table or element name that is not used as a field prefix.

use crate::tag::ProvenanceTag;
use lazy_static::lazy_static;
use regex::Regex;

/// Characters that join a table or structure name to a field name
pub const SEPARATORS: [char; 2] = ['-', '~'];

/// Letter, digit or underscore.
///
/// Digits include every numeric character (`²`, `Ⅻ`); combining marks and
/// connector punctuation other than `_` are not word characters.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// First character of a field name: an ASCII letter or underscore, plus the
// non-ASCII letters whose case mapping lands on an ASCII letter.
fn is_field_start(c: char) -> bool {
    c == '_'
        || c.is_ascii_alphabetic()
        || matches!(c, '\u{130}' | '\u{131}' | '\u{17F}' | '\u{212A}')
}

// No word character immediately before `at`
fn word_boundary_before(text: &str, at: usize) -> bool {
    text[..at].chars().next_back().map_or(true, |c| !is_word_char(c))
}

// Length of `-field` / `~field` at the start of `rest`, if present
fn field_reference_len(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices();

    let (_, separator) = chars.next()?;
    if !SEPARATORS.contains(&separator) {
        return None;
    }
    let (_, first) = chars.next()?;
    if !is_field_start(first) {
        return None;
    }

    let len = chars
        .find(|&(_, c)| !is_word_char(c))
        .map_or(rest.len(), |(i, _)| i);
    Some(len)
}

// Identifier ends here: no word character and no separator follows
fn standalone_end(rest: &str) -> bool {
    rest.chars()
        .next()
        .map_or(true, |c| !is_word_char(c) && !SEPARATORS.contains(&c))
}

/// Shape of reference a rule rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleForm {
    /// Identifier, separator and field name (`vbuk-gbstk`)
    Compound,
    /// Bare identifier not followed by a separator (`TYPE vbuk`)
    Standalone,
}

/// One entry of the rewrite table
#[derive(Debug, Clone)]
pub struct Rule {
    /// Position in the table, starting at 1
    pub number: usize,
    /// Deprecated identifier, matched case-insensitively
    pub identifier: &'static str,
    /// Identifier written in its place, in the exact case emitted
    pub successor: &'static str,
    /// Reference shape this rule matches
    pub form: RuleForm,
    pattern: Regex,
}

lazy_static! {
    /// All rules in application order.
    ///
    /// Compound forms come first so a field reference is rewritten as a unit
    /// before the standalone pass for the same identifier runs.
    pub static ref RULES: Vec<Rule> = vec![
        Rule::new(1, "vbuk", "vbak", RuleForm::Compound),
        Rule::new(2, "vbup", "vbap", RuleForm::Compound),
        Rule::new(3, "vbtyp", "vbtypl", RuleForm::Compound),
        Rule::new(4, "vbuk", "VBAK", RuleForm::Standalone),
        Rule::new(5, "vbup", "VBAP", RuleForm::Standalone),
        Rule::new(6, "vbtyp", "VBTYPL", RuleForm::Standalone),
    ];
}

impl Rule {
    fn new(
        number: usize,
        identifier: &'static str,
        successor: &'static str,
        form: RuleForm,
    ) -> Self {
        // Only the identifier itself goes through the regex; boundaries and
        // the field suffix are checked with `is_word_char` around each hit.
        let pattern = Regex::new(&format!("(?i){}", identifier))
            .expect("rewrite rule pattern must compile");

        Self {
            number,
            identifier,
            successor,
            form,
            pattern,
        }
    }

    /// Rewrite every match in `text`, appending `tag` after each rewrite.
    ///
    /// Returns the rewritten text and the number of substitutions made.
    pub fn apply(&self, text: &str, tag: &ProvenanceTag) -> (String, usize) {
        let mut rewritten = String::with_capacity(text.len());
        let mut last = 0;
        let mut substitutions = 0;

        for found in self.pattern.find_iter(text) {
            // Hits inside an already rewritten field name belong to that match
            if found.start() < last || !word_boundary_before(text, found.start()) {
                continue;
            }

            let rest = &text[found.end()..];
            let end = match self.form {
                RuleForm::Compound => match field_reference_len(rest) {
                    Some(len) => found.end() + len,
                    None => continue,
                },
                RuleForm::Standalone if standalone_end(rest) => found.end(),
                RuleForm::Standalone => continue,
            };

            rewritten.push_str(&text[last..found.start()]);
            rewritten.push_str(self.successor);
            // Separator and field name are kept as written
            rewritten.push_str(&text[found.end()..end]);
            rewritten.push(' ');
            rewritten.push_str(tag.as_str());
            last = end;
            substitutions += 1;
        }
        rewritten.push_str(&text[last..]);

        (rewritten, substitutions)
    }
}
