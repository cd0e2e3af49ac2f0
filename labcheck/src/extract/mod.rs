// Labcheck: Validating Network-Wide Device Configurations
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Field-Extraction Grammar Engine
//!
//! A [`Grammar`] is an ordered alternation of line [`Pattern`]s. Every pattern starts with a
//! literal keyword, anchored at the beginning of the line, followed by a sequence of typed
//! [`Token`]s. Matching a line tries the patterns in order and commits to the first pattern
//! that matches completely. A pattern whose keyword matches but whose tokens do not simply
//! lets the next alternative try the same line. Input after the last token of a pattern is
//! ignored.
//!
//! Scanning a configuration text yields one set of named [`Captures`] per matching line. The
//! [`Extractor`] folds these captures into one [`DeviceRecord`] per device, according to a
//! [`Schema`]: repeated fields collect all captured values in line order, scalar fields keep
//! the last captured value.

use lazy_static::lazy_static;
use log::*;
use regex::Regex;

use std::fs;
use std::path::PathBuf;

use crate::CheckError;

mod record;
pub use record::{DeviceRecord, ExtractTable, Field, FieldValue, Schema};

lazy_static! {
    static ref INT_RE: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref SIGNED_INT_RE: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
}

/// A single typed token of a line pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal word that must be present, capturing nothing
    Keyword(&'static str),
    /// Capture a single whitespace-delimited word under the given field name
    Word(&'static str),
    /// Capture a word consisting only of decimal digits
    Int(&'static str),
    /// Capture a word of decimal digits with an optional leading `+` or `-`
    SignedInt(&'static str),
    /// Capture the entire rest of the line (trimmed), which must be non-empty
    Remainder(&'static str),
    /// Literal word whose presence captures a fixed value
    Flag {
        /// Word that must be present
        keyword: &'static str,
        /// Field name under which to store the value
        field: &'static str,
        /// Fixed value stored when the word is present
        value: &'static str,
    },
}

/// A single line pattern, anchored at the start of the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    keyword: &'static str,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Create a new pattern starting with the given keyword
    pub fn new(keyword: &'static str, tokens: Vec<Token>) -> Self {
        Self { keyword, tokens }
    }

    /// Match the pattern against a single line, returning the captures on success. The
    /// keyword must start the line without leading whitespace.
    fn matches(&self, line: &str) -> Option<Captures> {
        if line.starts_with(char::is_whitespace) {
            return None;
        }
        let mut rem = strip_token(line, self.keyword)?;
        let mut captures = Captures::default();
        for token in &self.tokens {
            rem = match token {
                Token::Keyword(keyword) => strip_token(rem, keyword)?,
                Token::Word(field) => {
                    let (word, rest) = next_token(rem)?;
                    captures.push(field, word);
                    rest
                }
                Token::Int(field) => {
                    let (word, rest) = next_token(rem)?;
                    if !INT_RE.is_match(word) {
                        return None;
                    }
                    captures.push(field, word);
                    rest
                }
                Token::SignedInt(field) => {
                    let (word, rest) = next_token(rem)?;
                    if !SIGNED_INT_RE.is_match(word) {
                        return None;
                    }
                    captures.push(field, word);
                    rest
                }
                Token::Remainder(field) => {
                    let rest = rem.trim();
                    if rest.is_empty() {
                        return None;
                    }
                    captures.push(field, rest);
                    ""
                }
                Token::Flag {
                    keyword,
                    field,
                    value,
                } => {
                    let rest = strip_token(rem, keyword)?;
                    captures.push(field, value);
                    rest
                }
            };
        }
        Some(captures)
    }
}

/// Split off the next whitespace-delimited word, skipping leading whitespace
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(pos) => Some((&s[..pos], &s[pos..])),
        None => Some((s, "")),
    }
}

/// Consume the next word if it equals the given token
fn strip_token<'a>(s: &'a str, token: &str) -> Option<&'a str> {
    let (word, rest) = next_token(s)?;
    if word == token {
        Some(rest)
    } else {
        None
    }
}

/// Named captures extracted from a single matching line, in capture order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures(Vec<(&'static str, String)>);

impl Captures {
    fn push(&mut self, field: &'static str, value: &str) {
        self.0.push((field, value.to_string()));
    }

    /// Value captured under the given field name
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over all `(field, value)` pairs in capture order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

/// Ordered alternation of line patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar(Vec<Pattern>);

impl Grammar {
    /// Create a grammar from patterns in priority order
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self(patterns)
    }

    /// Match a single line, committing to the first pattern that matches completely
    pub fn match_line(&self, line: &str) -> Option<Captures> {
        self.0.iter().find_map(|p| p.matches(line))
    }

    /// Lazily scan a configuration text, yielding the captures of every matching line in
    /// line order.
    pub fn captures<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Captures> + 'a {
        text.lines().filter_map(move |line| self.match_line(line))
    }
}

/// # Field Extractor
///
/// Bundles a [`Schema`] with the [`Grammar`] that fills it.
#[derive(Debug, Clone)]
pub struct Extractor {
    schema: Schema,
    grammar: Grammar,
}

impl Extractor {
    /// Create a new extractor
    pub fn new(schema: Schema, grammar: Grammar) -> Self {
        Self { schema, grammar }
    }

    /// The schema of the extracted records
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Extract a single device record from a configuration text. The record contains every
    /// schema field, at its default value if no line captured it.
    pub fn record(&self, device: impl Into<String>, text: &str) -> DeviceRecord {
        let mut record = self.schema.empty_record(device);
        for captures in self.grammar.captures(text) {
            record.merge(&captures);
        }
        record
    }

    /// Extract one record per configuration file. The device name is the file stem of the
    /// respective file.
    pub fn table(&self, files: &[PathBuf]) -> Result<ExtractTable, CheckError> {
        let mut table = ExtractTable::new(self.schema.clone());
        for path in files {
            debug!("Scanning {}", path.display());
            let text = fs::read_to_string(path).map_err(|source| CheckError::Read {
                path: path.clone(),
                source,
            })?;
            let device = match path.file_stem() {
                Some(stem) => stem.to_string_lossy().into_owned(),
                None => path.to_string_lossy().into_owned(),
            };
            table.push(self.record(device, &text));
        }
        Ok(table)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn clock_grammar() -> Grammar {
        Grammar::new(vec![
            Pattern::new(
                "clock",
                vec![
                    Token::Keyword("timezone"),
                    Token::Word("Zone"),
                    Token::SignedInt("HRS"),
                    Token::Int("MIN"),
                ],
            ),
            Pattern::new(
                "clock",
                vec![
                    Token::Keyword("summer-time"),
                    Token::Word("Summer"),
                    Token::Flag {
                        keyword: "recurring",
                        field: "Recurring",
                        value: "enabled",
                    },
                ],
            ),
        ])
    }

    #[test]
    fn timezone_line() {
        let captures = clock_grammar().match_line("clock timezone AST -4 0").unwrap();
        assert_eq!(captures.get("Zone"), Some("AST"));
        assert_eq!(captures.get("HRS"), Some("-4"));
        assert_eq!(captures.get("MIN"), Some("0"));
    }

    #[test]
    fn summer_time_line() {
        let captures = clock_grammar()
            .match_line("clock summer-time ADT recurring")
            .unwrap();
        assert_eq!(captures.get("Summer"), Some("ADT"));
        assert_eq!(captures.get("Recurring"), Some("enabled"));
    }

    #[test]
    fn keyword_anchored_at_line_start() {
        let g = clock_grammar();
        assert!(g.match_line(" clock timezone AST -4 0").is_none());
        assert!(g.match_line("\tclock timezone AST -4 0").is_none());
        assert!(g.match_line("no clock timezone AST -4 0").is_none());
        assert!(g.match_line("clockx timezone AST -4 0").is_none());
    }

    #[test]
    fn number_tokens() {
        let g = clock_grammar();
        // the hour offset may carry a sign, the minute offset may not
        assert!(g.match_line("clock timezone AST +4 0").is_some());
        assert!(g.match_line("clock timezone AST 4 30").is_some());
        assert!(g.match_line("clock timezone AST x 0").is_none());
        assert!(g.match_line("clock timezone AST 4- 0").is_none());
        assert!(g.match_line("clock timezone AST -4 -30").is_none());
        assert!(g.match_line("clock timezone AST -4").is_none());
    }

    #[test]
    fn trailing_input_ignored() {
        let captures = clock_grammar()
            .match_line("clock timezone AST -4 0 extra words")
            .unwrap();
        assert_eq!(captures.get("MIN"), Some("0"));
    }

    #[test]
    fn first_full_match_wins() {
        let g = Grammar::new(vec![
            Pattern::new(
                "snmp-server",
                vec![
                    Token::Keyword("community"),
                    Token::Word("Read"),
                    Token::Keyword("RO"),
                ],
            ),
            Pattern::new(
                "snmp-server",
                vec![
                    Token::Keyword("community"),
                    Token::Word("Write"),
                    Token::Keyword("RW"),
                ],
            ),
        ]);
        // the first alternative fails at the RO keyword and the second one takes over
        let captures = g.match_line("snmp-server community dcwrite RW").unwrap();
        assert_eq!(captures.get("Write"), Some("dcwrite"));
        assert_eq!(captures.get("Read"), None);
        let captures = g.match_line("snmp-server community dcread RO").unwrap();
        assert_eq!(captures.get("Read"), Some("dcread"));
    }

    #[test]
    fn remainder_must_be_non_empty() {
        let g = Grammar::new(vec![Pattern::new(
            "logging",
            vec![Token::Keyword("host"), Token::Remainder("Host")],
        )]);
        assert!(g.match_line("logging host").is_none());
        assert!(g.match_line("logging host   ").is_none());
        let captures = g.match_line("logging host 10.1.155.100  ").unwrap();
        assert_eq!(captures.get("Host"), Some("10.1.155.100"));
    }

    #[test]
    fn remainder_keeps_inner_whitespace() {
        let g = Grammar::new(vec![Pattern::new(
            "snmp-server",
            vec![Token::Keyword("location"), Token::Remainder("Location")],
        )]);
        let captures = g.match_line("snmp-server location INWK Lab Rack 1").unwrap();
        assert_eq!(captures.get("Location"), Some("INWK Lab Rack 1"));
    }

    #[test]
    fn scan_yields_captures_in_line_order() {
        let text = "hostname r11\n\
                    clock timezone AST -4 0\n\
                    interface GigabitEthernet1\n\
                    clock summer-time ADT recurring\n";
        let captures: Vec<Captures> = clock_grammar().captures(text).collect();
        assert_eq!(captures.len(), 2);
        assert_eq!(captures[0].get("Zone"), Some("AST"));
        assert_eq!(captures[1].get("Summer"), Some("ADT"));
    }

    #[test]
    fn extra_whitespace_between_tokens() {
        let captures = clock_grammar()
            .match_line("clock   timezone\tAST  -4   0")
            .unwrap();
        assert_eq!(captures.get("Zone"), Some("AST"));
        assert_eq!(captures.get("HRS"), Some("-4"));
    }
}
