//! Single-pass template parser.
//!
//! The parser is a small automaton (`Literal`, `InPlaceholder`, `InOpenTag`,
//! `InCloseTag`) with an explicit stack of open tags. Case bodies of
//! `plural`/`select` arguments re-enter the automaton recursively and must
//! close every tag they open before their closing brace.

use std::mem;
use std::str::CharIndices;

use super::{Argument, CaseLabel, CaseTable, Node, Placeholder, PluralSpec, Tag, TokenTree};
use crate::error::{CaseTableError, ParseError};
use crate::format::FormatKind;
use crate::plural::{PluralCategory, PluralKind};
use crate::value::Number;

/// Parses `template` into a [`TokenTree`].
///
/// # Errors
///
/// Returns a [`ParseError`] for unbalanced or unterminated tags, malformed
/// placeholders, and invalid case tables. No partial tree is produced.
///
/// # Examples
///
/// ```rust
/// use transmark::syntax::{Node, parse};
///
/// let tree = parse("Read <0>the docs</0>").expect("well-formed template");
/// assert_eq!(tree.literal_text(), "Read the docs");
/// assert!(matches!(tree.nodes().get(1), Some(Node::Tag(_))));
/// ```
pub fn parse(template: &str) -> Result<TokenTree, ParseError> {
    let mut parser = Parser::new(template);
    let nodes = parser.template(Scope::Root)?;
    Ok(TokenTree::new(nodes))
}

#[derive(Debug, Clone, Copy)]
enum Scope {
    Root,
    CaseBody { in_plural: bool },
}

impl Scope {
    const fn in_plural(self) -> bool {
        matches!(self, Self::CaseBody { in_plural: true })
    }
}

#[derive(Debug)]
enum State {
    Literal,
    InPlaceholder,
    InOpenTag(TagMarker),
    InCloseTag(TagMarker),
}

#[derive(Debug)]
struct TagMarker {
    key: String,
    offset: usize,
    end: usize,
    self_closing: bool,
}

#[derive(Debug)]
struct OpenTag {
    key: String,
    offset: usize,
    siblings: Vec<Node>,
}

struct Parser<'a> {
    chars: CharIndices<'a>,
    len: usize,
}

impl<'a> Parser<'a> {
    fn new(template: &'a str) -> Self {
        Self {
            chars: template.char_indices(),
            len: template.len(),
        }
    }

    fn offset(&self) -> usize {
        self.chars.clone().next().map_or(self.len, |(offset, _)| offset)
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next().map(|(_, ch)| ch)
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next().map(|(_, ch)| ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn advance_to(&mut self, end: usize) {
        while self.offset() < end && self.bump().is_some() {}
    }

    fn template(&mut self, scope: Scope) -> Result<Vec<Node>, ParseError> {
        let mut frame = Frame::default();
        let mut state = State::Literal;

        loop {
            state = match state {
                State::Literal => match self.literal_step(scope, &mut frame)? {
                    Some(next) => next,
                    None => break,
                },
                State::InPlaceholder => {
                    frame.flush();
                    let placeholder = self.placeholder(scope.in_plural())?;
                    frame.nodes.push(Node::Placeholder(placeholder));
                    State::Literal
                }
                State::InOpenTag(marker) => {
                    self.advance_to(marker.end);
                    frame.open(marker);
                    State::Literal
                }
                State::InCloseTag(marker) => {
                    let end = marker.end;
                    frame.close(marker)?;
                    self.advance_to(end);
                    State::Literal
                }
            };
        }

        frame.finish()
    }

    /// Consumes literal input up to the next state change. `None` marks the
    /// end of the current template.
    fn literal_step(
        &mut self,
        scope: Scope,
        frame: &mut Frame,
    ) -> Result<Option<State>, ParseError> {
        let next = match self.peek() {
            None => None,
            Some('{') => Some(State::InPlaceholder),
            Some('}') if matches!(scope, Scope::CaseBody { .. }) => None,
            Some('}') => {
                return Err(ParseError::UnexpectedBrace {
                    offset: self.offset(),
                });
            }
            Some('<') => Some(match self.tag_marker() {
                Some((marker, true)) => State::InCloseTag(marker),
                Some((marker, false)) => State::InOpenTag(marker),
                None => {
                    frame.literal.push('<');
                    self.bump();
                    State::Literal
                }
            }),
            Some('#') if scope.in_plural() => {
                frame.flush();
                frame.nodes.push(Node::Pound);
                self.bump();
                Some(State::Literal)
            }
            Some('\'') => {
                self.quoted(&mut frame.literal, scope.in_plural());
                Some(State::Literal)
            }
            Some(ch) => {
                frame.literal.push(ch);
                self.bump();
                Some(State::Literal)
            }
        };
        Ok(next)
    }

    /// Recognises `<key>`, `<key/>`, and `</key>` without consuming input.
    /// The flag is true for closing markers.
    fn tag_marker(&self) -> Option<(TagMarker, bool)> {
        let mut ahead = self.chars.clone();
        let (offset, _) = ahead.next()?;
        let closing = ahead.clone().next().is_some_and(|(_, ch)| ch == '/');
        if closing {
            ahead.next();
        }

        let mut key = String::new();
        while let Some((_, ch)) = ahead.clone().next() {
            if !is_key_char(ch) {
                break;
            }
            key.push(ch);
            ahead.next();
        }
        if key.is_empty() {
            return None;
        }
        while ahead.clone().next().is_some_and(|(_, ch)| ch == ' ') {
            ahead.next();
        }

        let self_closing = !closing && ahead.clone().next().is_some_and(|(_, ch)| ch == '/');
        if self_closing {
            ahead.next();
        }
        let (end, ch) = ahead.next()?;
        if ch != '>' {
            return None;
        }
        Some((
            TagMarker {
                key,
                offset,
                end: end + ch.len_utf8(),
                self_closing,
            },
            closing,
        ))
    }

    /// Handles an apostrophe in literal text.
    ///
    /// `''` is a literal apostrophe; an apostrophe before a syntax character
    /// opens a quoted run that ends at the next lone apostrophe. Any other
    /// apostrophe is kept verbatim.
    fn quoted(&mut self, literal: &mut String, in_plural: bool) {
        self.bump();
        match self.peek() {
            Some('\'') => {
                literal.push('\'');
                self.bump();
            }
            Some('{' | '}' | '<') => self.quoted_run(literal),
            Some('#') if in_plural => self.quoted_run(literal),
            _ => literal.push('\''),
        }
    }

    fn quoted_run(&mut self, literal: &mut String) {
        while let Some(ch) = self.bump() {
            if ch != '\'' {
                literal.push(ch);
                continue;
            }
            if self.peek() == Some('\'') {
                literal.push('\'');
                self.bump();
            } else {
                break;
            }
        }
    }

    fn placeholder(&mut self, in_plural: bool) -> Result<Placeholder, ParseError> {
        let start = self.offset();
        self.bump();
        self.skip_whitespace();
        let key = self.word();

        self.skip_whitespace();
        match self.peek() {
            None => return Err(ParseError::UnterminatedPlaceholder { offset: start }),
            Some('}') if key.is_empty() => {
                return Err(ParseError::EmptyPlaceholder { offset: start });
            }
            Some('}') => {
                self.bump();
                return Ok(Placeholder {
                    key,
                    argument: Argument::Simple,
                });
            }
            Some(',') if key.is_empty() => {
                return Err(ParseError::EmptyPlaceholder { offset: start });
            }
            Some(',') => {
                self.bump();
            }
            Some(_) => {
                return Err(ParseError::InvalidArgument {
                    key,
                    offset: self.offset(),
                    reason: String::from("expected ',' or '}' after the placeholder key"),
                });
            }
        }

        self.skip_whitespace();
        let type_offset = self.offset();
        let keyword = self.word();
        self.skip_whitespace();
        let argument = match keyword.as_str() {
            "" => {
                return Err(self.unterminated_or(start, key, type_offset, "missing argument type"));
            }
            "plural" | "selectordinal" => {
                let kind = if keyword == "plural" {
                    PluralKind::Cardinal
                } else {
                    PluralKind::Ordinal
                };
                self.expect_comma(start, &key)?;
                let (offset, cases) = self.cases(start, &key, Some(kind), in_plural)?;
                Argument::Plural(Box::new(PluralSpec {
                    kind,
                    offset,
                    cases,
                }))
            }
            "select" => {
                self.expect_comma(start, &key)?;
                let (_, cases) = self.cases(start, &key, None, in_plural)?;
                Argument::Select(Box::new(cases))
            }
            other => {
                let kind = FormatKind::from_keyword(other);
                let style = self.style(start, &key)?;
                Argument::Format { kind, style }
            }
        };
        Ok(Placeholder { key, argument })
    }

    fn unterminated_or(
        &self,
        start: usize,
        key: String,
        offset: usize,
        reason: &str,
    ) -> ParseError {
        if self.peek().is_none() {
            ParseError::UnterminatedPlaceholder { offset: start }
        } else {
            ParseError::InvalidArgument {
                key,
                offset,
                reason: reason.to_owned(),
            }
        }
    }

    fn expect_comma(&mut self, start: usize, key: &str) -> Result<(), ParseError> {
        match self.peek() {
            Some(',') => {
                self.bump();
                Ok(())
            }
            None => Err(ParseError::UnterminatedPlaceholder { offset: start }),
            Some(_) => Err(ParseError::InvalidArgument {
                key: key.to_owned(),
                offset: self.offset(),
                reason: String::from("expected ',' before the case table"),
            }),
        }
    }

    /// Reads an optional `, style` tail and the closing brace.
    fn style(&mut self, start: usize, key: &str) -> Result<Option<String>, ParseError> {
        match self.peek() {
            Some('}') => {
                self.bump();
                return Ok(None);
            }
            Some(',') => {
                self.bump();
            }
            None => return Err(ParseError::UnterminatedPlaceholder { offset: start }),
            Some(_) => {
                return Err(ParseError::InvalidArgument {
                    key: key.to_owned(),
                    offset: self.offset(),
                    reason: String::from("expected ',' or '}' after the argument type"),
                });
            }
        }

        let style_offset = self.offset();
        let mut style = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedPlaceholder { offset: start }),
                Some('}') => break,
                Some('{') => {
                    return Err(ParseError::InvalidArgument {
                        key: key.to_owned(),
                        offset: style_offset,
                        reason: String::from("format styles cannot contain '{'"),
                    });
                }
                Some(ch) => style.push(ch),
            }
        }
        let trimmed = style.trim();
        if trimmed.is_empty() {
            return Err(ParseError::InvalidArgument {
                key: key.to_owned(),
                offset: style_offset,
                reason: String::from("empty format style"),
            });
        }
        Ok(Some(trimmed.to_owned()))
    }

    fn cases(
        &mut self,
        start: usize,
        key: &str,
        plural: Option<PluralKind>,
        in_plural: bool,
    ) -> Result<(i64, CaseTable), ParseError> {
        let mut offset = 0;
        let mut entries: Vec<(CaseLabel, TokenTree)> = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::UnterminatedPlaceholder { offset: start }),
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(_) => {}
            }

            let label_offset = self.offset();
            let label = self.label();
            if plural.is_some() && entries.is_empty() && label.starts_with("offset:") {
                offset = self.plural_offset(&label, label_offset)?;
                continue;
            }
            let case_label = parse_label(&label, plural.is_some()).ok_or_else(|| {
                ParseError::InvalidCaseLabel {
                    label: label.clone(),
                    offset: label_offset,
                }
            })?;

            self.skip_whitespace();
            match self.peek() {
                Some('{') => {
                    self.bump();
                }
                None => return Err(ParseError::UnterminatedPlaceholder { offset: start }),
                Some(_) => {
                    return Err(ParseError::InvalidArgument {
                        key: key.to_owned(),
                        offset: self.offset(),
                        reason: format!("expected '{{' after case label '{label}'"),
                    });
                }
            }
            let body_offset = self.offset();
            let body = self.template(Scope::CaseBody {
                in_plural: in_plural || plural.is_some(),
            })?;
            if self.bump() != Some('}') {
                return Err(ParseError::UnterminatedPlaceholder {
                    offset: body_offset,
                });
            }
            entries.push((case_label, TokenTree::new(body)));
        }

        let table = CaseTable::new(entries).map_err(|err| match err {
            CaseTableError::MissingOther => ParseError::MissingOtherCase {
                key: key.to_owned(),
                offset: start,
            },
            CaseTableError::Duplicate(label) => ParseError::DuplicateCase {
                label,
                offset: start,
            },
        })?;
        Ok((offset, table))
    }

    fn plural_offset(&mut self, label: &str, label_offset: usize) -> Result<i64, ParseError> {
        let inline = label.trim_start_matches("offset:");
        let text = if inline.is_empty() {
            self.skip_whitespace();
            self.label()
        } else {
            inline.to_owned()
        };
        text.parse::<i64>().map_err(|_| ParseError::InvalidOffset {
            text,
            offset: label_offset,
        })
    }

    /// Reads a placeholder key or type keyword.
    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || matches!(ch, ',' | '{' | '}') {
                break;
            }
            word.push(ch);
            self.bump();
        }
        word
    }

    /// Reads a case label.
    fn label(&mut self) -> String {
        let mut label = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || matches!(ch, '{' | '}') {
                break;
            }
            label.push(ch);
            self.bump();
        }
        label
    }
}

/// Nodes collected for one template level, plus its open tags.
#[derive(Debug, Default)]
struct Frame {
    nodes: Vec<Node>,
    stack: Vec<OpenTag>,
    literal: String,
}

impl Frame {
    fn flush(&mut self) {
        if self.literal.is_empty() {
            return;
        }
        let text = mem::take(&mut self.literal);
        match self.nodes.last_mut() {
            Some(Node::Text(previous)) => previous.push_str(&text),
            _ => self.nodes.push(Node::Text(text)),
        }
    }

    fn open(&mut self, marker: TagMarker) {
        self.flush();
        if marker.self_closing {
            self.nodes.push(Node::Tag(Tag {
                key: marker.key,
                children: TokenTree::default(),
                self_closing: true,
            }));
            return;
        }
        self.stack.push(OpenTag {
            key: marker.key,
            offset: marker.offset,
            siblings: mem::take(&mut self.nodes),
        });
    }

    fn close(&mut self, marker: TagMarker) -> Result<(), ParseError> {
        self.flush();
        let Some(open) = self.stack.pop() else {
            return Err(ParseError::UnexpectedClosingTag {
                key: marker.key,
                offset: marker.offset,
            });
        };
        if open.key != marker.key {
            return Err(ParseError::UnbalancedTag {
                expected: open.key,
                found: marker.key,
                offset: marker.offset,
            });
        }
        let children = mem::replace(&mut self.nodes, open.siblings);
        self.nodes.push(Node::Tag(Tag {
            key: open.key,
            children: TokenTree::new(children),
            self_closing: false,
        }));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        self.flush();
        if let Some(open) = self.stack.pop() {
            return Err(ParseError::UnterminatedTag {
                key: open.key,
                offset: open.offset,
            });
        }
        Ok(self.nodes)
    }
}

fn is_key_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-')
}

fn parse_label(label: &str, plural: bool) -> Option<CaseLabel> {
    if label.is_empty() {
        return None;
    }
    if !plural {
        return Some(CaseLabel::Keyword(label.to_owned()));
    }
    if let Some(exact) = label.strip_prefix('=') {
        return Number::parse(exact).map(CaseLabel::Exact);
    }
    PluralCategory::from_keyword(label).map(|_| CaseLabel::Keyword(label.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_track_multibyte_input() {
        let mut parser = Parser::new("čx");
        assert_eq!(parser.peek(), Some('č'));
        parser.bump();
        assert_eq!(parser.offset(), 2);
        parser.bump();
        assert_eq!(parser.offset(), 3);
    }

    #[test]
    fn tag_marker_requires_closing_angle() {
        let parser = Parser::new("<0 text");
        assert!(parser.tag_marker().is_none());
        let closing = Parser::new("</link>");
        let (marker, is_closing) = closing.tag_marker().expect("closing marker");
        assert!(is_closing);
        assert_eq!(marker.key, "link");
        assert_eq!(marker.end, 7);
    }

    #[test]
    fn self_closing_marker_allows_space() {
        let parser = Parser::new("<br />");
        let (marker, is_closing) = parser.tag_marker().expect("self-closing marker");
        assert!(!is_closing);
        assert!(marker.self_closing);
    }
}
