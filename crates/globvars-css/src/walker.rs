//! Locating rewritable text in a stylesheet.
//!
//! The walker is built on `cssparser` (the tokenizer used by Firefox), so
//! comments, strings and escapes are handled the way browsers handle them. It
//! does not interpret values; it only records where they are:
//!
//! - the value of every declaration, in style rules, at-rule blocks and nested rules
//! - the prelude of every at-rule (`@media (...)`, `@supports (...)`, `@import ...`)
//!
//! Comments inside those spans are reported separately so they can be left
//! alone. Selectors and everything between rules are never touched.

use std::ops::Range;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use tracing::debug;

/// What kind of text a span holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Value of a `name: value` declaration.
    Declaration,
    /// Prelude of an at-rule, between the at-keyword and `{` or `;`.
    AtRulePrelude,
}

/// A rewritable piece of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpan {
    /// Byte range in the stylesheet.
    pub range: Range<usize>,
    /// 1-based line of the first non-whitespace character.
    pub line: u32,
    /// 1-based column of the first non-whitespace character.
    pub column: u32,
    pub kind: SpanKind,
    /// Byte ranges of comments inside the span, in source order.
    pub comments: Vec<Range<usize>>,
}

impl ValueSpan {
    /// Byte ranges of the span with its comments cut out.
    pub fn code_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::with_capacity(self.comments.len() + 1);
        let mut start = self.range.start;
        for comment in &self.comments {
            if comment.start > start {
                ranges.push(start..comment.start);
            }
            start = comment.end;
        }
        if self.range.end > start {
            ranges.push(start..self.range.end);
        }
        ranges
    }
}

/// Collects the spans of all declaration values and at-rule preludes, in source order.
pub fn collect_spans(css: &str) -> Vec<ValueSpan> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut collector = SpanCollector { spans: Vec::new() };

    let rules = cssparser::StyleSheetParser::new(&mut parser, &mut collector);
    for result in rules {
        if let Err((error, slice)) = result {
            debug!(?error, rule = slice, "skipping unparsable rule");
        }
    }

    let mut spans = collector.spans;
    spans.sort_by_key(|span| span.range.start);
    spans
}

struct SpanCollector {
    spans: Vec<ValueSpan>,
}

impl SpanCollector {
    /// Consumes the rest of `input` and records it as one span.
    fn record<'i>(&mut self, input: &mut Parser<'i, '_>, kind: SpanKind) {
        input.skip_whitespace();
        let start = input.position();
        let location = input.current_source_location();
        let mut comments = Vec::new();
        scan_comments(input, &mut comments);
        let end = input.position();

        if end.byte_index() > start.byte_index() {
            self.spans.push(ValueSpan {
                range: start.byte_index()..end.byte_index(),
                line: location.line + 1,
                column: location.column,
                kind,
                comments,
            });
        }
    }

    fn walk_block<'i>(&mut self, input: &mut Parser<'i, '_>) {
        let body = RuleBodyParser::new(input, self);
        for result in body {
            if let Err((error, slice)) = result {
                debug!(?error, item = slice, "skipping unparsable block item");
            }
        }
    }
}

/// Consumes `input`, descending into blocks and functions, and collects the
/// byte range of every comment.
fn scan_comments<'i>(input: &mut Parser<'i, '_>, comments: &mut Vec<Range<usize>>) {
    loop {
        let before = input.position();
        let (is_comment, is_block) = match input.next_including_whitespace_and_comments() {
            Ok(token) => (
                matches!(token, Token::Comment(_)),
                matches!(
                    token,
                    Token::Function(_)
                        | Token::ParenthesisBlock
                        | Token::SquareBracketBlock
                        | Token::CurlyBracketBlock
                ),
            ),
            Err(_) => break,
        };

        if is_comment {
            comments.push(before.byte_index()..input.position().byte_index());
        } else if is_block {
            let nested: Result<(), ParseError<'i, ()>> = input.parse_nested_block(|block| {
                scan_comments(block, comments);
                Ok(())
            });
            if let Err(error) = nested {
                debug!(?error, "unterminated block in value");
            }
        }
    }
}

impl<'i> QualifiedRuleParser<'i> for SpanCollector {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        // Selectors are copied through untouched.
        while input.next().is_ok() {}
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        self.walk_block(input);
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for SpanCollector {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        self.record(input, SpanKind::AtRulePrelude);
        Ok(())
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        self.walk_block(input);
        Ok(())
    }
}

impl<'i> DeclarationParser<'i> for SpanCollector {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        // `a:hover { ... }` inside a block looks like a declaration until the
        // `{`; reject it so the body parser retries it as a nested rule.
        // Custom properties may legitimately hold blocks.
        if !name.starts_with("--") {
            let state = input.state();
            while let Ok(token) = input.next() {
                if matches!(token, Token::CurlyBracketBlock) {
                    return Err(input.new_custom_error::<(), ()>(()));
                }
            }
            input.reset(&state);
        }

        self.record(input, SpanKind::Declaration);
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for SpanCollector {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}
