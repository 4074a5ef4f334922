//! Recursive-descent parser for the supported pattern grammar
//!
//! The grammar is LL(1) at every choice point, so a single forward pass over
//! a byte-offset cursor suffices; no production ever backtracks. The parser
//! is strict about brace, bracket and paren balance and deliberately
//! permissive about everything else: degenerate quantifiers such as `a**`
//! and `{5,2}` are accepted as written.

use crate::error::SyntaxError;

use super::ast::{ClassItem, GroupKind, Node};

/// Parse a pattern string into a tree.
///
/// Examples:
/// - `"ab"` → `Sequence([Literal('a'), Literal('b')])`
/// - `"a|b"` → `Choice([Literal('a'), Literal('b')])`
/// - `"(a"` → `Err(SyntaxError { message: "unterminated group", offset: 2 })`
pub fn parse(pattern: &str) -> Result<Node, SyntaxError> {
    let mut parser = Parser::new(pattern);
    let node = parser.alternation()?;
    if let Some(c) = parser.peek() {
        // Only a stray `)` can stop the top-level alternation early.
        return Err(SyntaxError::new(
            format!("unexpected character `{c}`"),
            parser.offset,
        ));
    }
    Ok(node)
}

/// Cursor over the pattern text.
struct Parser<'a> {
    pattern: &'a str,
    offset: usize,
}

impl<'a> Parser<'a> {
    fn new(pattern: &'a str) -> Self {
        Self { pattern, offset: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.pattern[self.offset..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.pattern[self.offset..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// `Alternation := Sequence ('|' Sequence)*`
    fn alternation(&mut self) -> Result<Node, SyntaxError> {
        let mut alternatives = vec![self.sequence()?];
        while self.eat('|') {
            alternatives.push(self.sequence()?);
        }
        Ok(Node::choice(alternatives))
    }

    /// `Sequence := Item*`, ending at `|`, `)` or end of input.
    fn sequence(&mut self) -> Result<Node, SyntaxError> {
        let mut items = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            items.push(self.item()?);
        }
        Ok(Node::sequence(items))
    }

    /// `Item := Atom Quantifier*`
    ///
    /// Quantifiers stack greedily, so `a**` becomes a doubled `ZeroOrMore`.
    fn item(&mut self) -> Result<Node, SyntaxError> {
        let mut node = self.atom()?;
        loop {
            match self.peek() {
                Some('?') => {
                    self.bump();
                    node = Node::Optional(Box::new(node));
                }
                Some('*') => {
                    self.bump();
                    node = Node::ZeroOrMore(Box::new(node));
                }
                Some('+') => {
                    self.bump();
                    node = Node::OneOrMore(Box::new(node));
                }
                Some('{') => match self.brace_quantifier() {
                    Some(quantifier) => {
                        node = Node::Repeat {
                            item: Box::new(node),
                            quantifier,
                        };
                    }
                    // Not a quantifier; the brace parses as a literal atom.
                    None => break,
                },
                _ => break,
            }
        }
        Ok(node)
    }

    /// `Atom := Group | CharClass | '.' | '^' | '$' | Escape | Literal`
    ///
    /// Quantifier characters with nothing to bind to fall through to the
    /// literal case, so patterns like `*a` parse rather than fail.
    fn atom(&mut self) -> Result<Node, SyntaxError> {
        match self.peek() {
            Some('(') => self.group(),
            Some('[') => self.char_class(),
            Some('\\') => Ok(Node::Escape(self.escape()?)),
            Some('.') => {
                self.bump();
                Ok(Node::AnyChar)
            }
            Some('^') => {
                self.bump();
                Ok(Node::AnchorStart)
            }
            Some('$') => {
                self.bump();
                Ok(Node::AnchorEnd)
            }
            Some(c) => {
                self.bump();
                Ok(Node::Literal(c))
            }
            None => Err(SyntaxError::new("unexpected end of pattern", self.offset)),
        }
    }

    /// `Group := '(' GroupPrefix? Alternation ')'`
    fn group(&mut self) -> Result<Node, SyntaxError> {
        self.bump();
        let kind = self.group_prefix();
        let content = self.alternation()?;
        if !self.eat(')') {
            return Err(SyntaxError::new("unterminated group", self.offset));
        }
        Ok(Node::Group {
            content: Box::new(content),
            kind,
        })
    }

    /// Recognize `?:`, `?=`, `?!`, `?<=` or `?<!` after an opening paren.
    ///
    /// Anything else, including an unrecognized `?`-prefix, leaves the
    /// cursor untouched and the group capturing; the prefix characters then
    /// parse as ordinary atoms inside the group.
    fn group_prefix(&mut self) -> GroupKind {
        if self.peek() != Some('?') {
            return GroupKind::Capturing;
        }
        match self.peek_at(1) {
            Some(':') => {
                self.offset += 2;
                GroupKind::NonCapturing
            }
            Some('=') => {
                self.offset += 2;
                GroupKind::Lookahead
            }
            Some('!') => {
                self.offset += 2;
                GroupKind::NegativeLookahead
            }
            Some('<') => match self.peek_at(2) {
                Some('=') => {
                    self.offset += 3;
                    GroupKind::Lookbehind
                }
                Some('!') => {
                    self.offset += 3;
                    GroupKind::NegativeLookbehind
                }
                _ => GroupKind::Capturing,
            },
            _ => GroupKind::Capturing,
        }
    }

    /// `CharClass := '[' '^'? ClassItem+ ']'`
    ///
    /// A `]` in first position is an ordinary member, so `[]]` is the class
    /// containing `]` and a class is never empty. Ranges are recognized
    /// greedily with three characters of lookahead: `a-z` is a range unless
    /// the character after the dash is the closing bracket.
    fn char_class(&mut self) -> Result<Node, SyntaxError> {
        self.bump();
        let negated = self.eat('^');
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(SyntaxError::new(
                        "unterminated character class",
                        self.offset,
                    ));
                }
                Some(']') if !items.is_empty() => {
                    self.bump();
                    break;
                }
                Some('\\') => items.push(ClassItem::Escape(self.escape()?)),
                Some(lo) => {
                    let item = match (self.peek_at(1), self.peek_at(2)) {
                        (Some('-'), Some(hi)) if hi != ']' => {
                            self.bump();
                            self.bump();
                            self.bump();
                            ClassItem::Range(lo, hi)
                        }
                        _ => {
                            self.bump();
                            ClassItem::Literal(lo)
                        }
                    };
                    items.push(item);
                }
            }
        }
        Ok(Node::CharClass { items, negated })
    }

    /// `Escape := '\' any-character`, returned as its two-character source
    /// text. The escaped character is not validated against a known class;
    /// unrecognized escapes are still represented and drawn verbatim.
    fn escape(&mut self) -> Result<String, SyntaxError> {
        self.bump();
        match self.bump() {
            Some(c) => Ok(format!("\\{c}")),
            None => Err(SyntaxError::new(
                "dangling escape at end of pattern",
                self.offset,
            )),
        }
    }

    /// Try to consume `{digits}` or `{digits,digits?}` and return the brace
    /// text verbatim. Returns `None` with the cursor untouched when the
    /// braces do not form a quantifier, e.g. `{x}` or an unclosed `{2`.
    ///
    /// The digits are never interpreted, so `{5,2}` is accepted as written.
    fn brace_quantifier(&mut self) -> Option<String> {
        let rest = self.pattern[self.offset..].as_bytes();
        let mut i = 1;
        let digits_start = i;
        while i < rest.len() && rest[i].is_ascii_digit() {
            i += 1;
        }
        if i == digits_start {
            return None;
        }
        if i < rest.len() && rest[i] == b',' {
            i += 1;
            while i < rest.len() && rest[i].is_ascii_digit() {
                i += 1;
            }
        }
        if i < rest.len() && rest[i] == b'}' {
            i += 1;
        } else {
            return None;
        }
        let text = self.pattern[self.offset..self.offset + i].to_string();
        self.offset += i;
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_sequence() {
        assert_eq!(
            parse("ab").unwrap(),
            Node::Sequence(vec![Node::Literal('a'), Node::Literal('b')])
        );
    }

    #[test]
    fn test_parse_empty_pattern() {
        assert_eq!(parse("").unwrap(), Node::Empty);
    }

    #[test]
    fn test_parse_alternation() {
        assert_eq!(
            parse("a|b").unwrap(),
            Node::Choice(vec![Node::Literal('a'), Node::Literal('b')])
        );
    }

    #[test]
    fn test_parse_trailing_empty_alternative() {
        assert_eq!(
            parse("a|").unwrap(),
            Node::Choice(vec![Node::Literal('a'), Node::Empty])
        );
    }

    #[test]
    fn test_parse_anchors_and_dot() {
        assert_eq!(
            parse("^.$").unwrap(),
            Node::Sequence(vec![Node::AnchorStart, Node::AnyChar, Node::AnchorEnd])
        );
    }

    #[test]
    fn test_parse_escape_keeps_source_text() {
        assert_eq!(
            parse("\\d\\q").unwrap(),
            Node::Sequence(vec![
                Node::Escape("\\d".to_string()),
                Node::Escape("\\q".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_quantifiers() {
        assert_eq!(
            parse("a?").unwrap(),
            Node::Optional(Box::new(Node::Literal('a')))
        );
        assert_eq!(
            parse("a*").unwrap(),
            Node::ZeroOrMore(Box::new(Node::Literal('a')))
        );
        assert_eq!(
            parse("a+").unwrap(),
            Node::OneOrMore(Box::new(Node::Literal('a')))
        );
    }

    #[test]
    fn test_parse_doubled_quantifier_stacks() {
        assert_eq!(
            parse("a**").unwrap(),
            Node::ZeroOrMore(Box::new(Node::ZeroOrMore(Box::new(Node::Literal('a')))))
        );
    }

    #[test]
    fn test_parse_brace_quantifier_verbatim() {
        assert_eq!(
            parse("a{2,5}").unwrap(),
            Node::Repeat {
                item: Box::new(Node::Literal('a')),
                quantifier: "{2,5}".to_string(),
            }
        );
        // Reversed bounds are not our problem; the text is kept as written.
        assert_eq!(
            parse("a{5,2}").unwrap(),
            Node::Repeat {
                item: Box::new(Node::Literal('a')),
                quantifier: "{5,2}".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_brace_without_digits_is_literal() {
        assert_eq!(
            parse("a{x}").unwrap(),
            Node::Sequence(vec![
                Node::Literal('a'),
                Node::Literal('{'),
                Node::Literal('x'),
                Node::Literal('}'),
            ])
        );
    }

    #[test]
    fn test_parse_unclosed_brace_is_literal() {
        assert_eq!(
            parse("a{2").unwrap(),
            Node::Sequence(vec![
                Node::Literal('a'),
                Node::Literal('{'),
                Node::Literal('2'),
            ])
        );
    }

    #[test]
    fn test_parse_leading_quantifier_char_is_literal() {
        assert_eq!(
            parse("*a").unwrap(),
            Node::Sequence(vec![Node::Literal('*'), Node::Literal('a')])
        );
    }

    #[test]
    fn test_parse_char_class_range() {
        assert_eq!(
            parse("[a-z]").unwrap(),
            Node::CharClass {
                items: vec![ClassItem::Range('a', 'z')],
                negated: false,
            }
        );
    }

    #[test]
    fn test_parse_char_class_negated_mixed() {
        assert_eq!(
            parse("[^a-z0\\d]").unwrap(),
            Node::CharClass {
                items: vec![
                    ClassItem::Range('a', 'z'),
                    ClassItem::Literal('0'),
                    ClassItem::Escape("\\d".to_string()),
                ],
                negated: true,
            }
        );
    }

    #[test]
    fn test_parse_char_class_trailing_dash_is_literal() {
        assert_eq!(
            parse("[a-]").unwrap(),
            Node::CharClass {
                items: vec![ClassItem::Literal('a'), ClassItem::Literal('-')],
                negated: false,
            }
        );
    }

    #[test]
    fn test_parse_char_class_leading_bracket_is_member() {
        assert_eq!(
            parse("[]]").unwrap(),
            Node::CharClass {
                items: vec![ClassItem::Literal(']')],
                negated: false,
            }
        );
    }

    #[test]
    fn test_parse_group_kinds() {
        let cases = [
            ("(x)", GroupKind::Capturing),
            ("(?:x)", GroupKind::NonCapturing),
            ("(?=x)", GroupKind::Lookahead),
            ("(?!x)", GroupKind::NegativeLookahead),
            ("(?<=x)", GroupKind::Lookbehind),
            ("(?<!x)", GroupKind::NegativeLookbehind),
        ];
        for (pattern, kind) in cases {
            assert_eq!(
                parse(pattern).unwrap(),
                Node::Group {
                    content: Box::new(Node::Literal('x')),
                    kind,
                },
                "pattern {pattern}"
            );
        }
    }

    #[test]
    fn test_parse_unrecognized_prefix_degrades_to_capturing() {
        // Named groups are outside the grammar; the prefix characters
        // parse as ordinary atoms inside a capturing group.
        let node = parse("(?<n>x)").unwrap();
        match node {
            Node::Group { kind, .. } => assert_eq!(kind, GroupKind::Capturing),
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_nested_group_alternation() {
        assert_eq!(
            parse("(?:|ged|gy)").unwrap(),
            Node::Group {
                content: Box::new(Node::Choice(vec![
                    Node::Empty,
                    Node::Sequence(vec![
                        Node::Literal('g'),
                        Node::Literal('e'),
                        Node::Literal('d'),
                    ]),
                    Node::Sequence(vec![Node::Literal('g'), Node::Literal('y')]),
                ])),
                kind: GroupKind::NonCapturing,
            }
        );
    }

    #[test]
    fn test_error_unterminated_group() {
        assert_eq!(
            parse("(a").unwrap_err(),
            SyntaxError::new("unterminated group", 2)
        );
        assert_eq!(
            parse("((a)").unwrap_err(),
            SyntaxError::new("unterminated group", 4)
        );
    }

    #[test]
    fn test_error_unterminated_char_class() {
        assert_eq!(
            parse("[ab").unwrap_err(),
            SyntaxError::new("unterminated character class", 3)
        );
        assert_eq!(
            parse("[]").unwrap_err(),
            SyntaxError::new("unterminated character class", 2)
        );
    }

    #[test]
    fn test_error_dangling_escape() {
        assert_eq!(
            parse("ab\\").unwrap_err(),
            SyntaxError::new("dangling escape at end of pattern", 3)
        );
    }

    #[test]
    fn test_error_stray_close_paren() {
        let err = parse("a)").unwrap_err();
        assert_eq!(err.offset, 1);
        assert!(err.message.contains("unexpected character"));
    }
}
