mod code;
mod declarations;
mod matcher;
mod types;

#[cfg(test)]
mod tests;

use log::debug;

use self::matcher::Matcher;
use crate::ast::{CompilationUnit, NodeId};
use crate::messages::MessageMaker;
use crate::source::{Source, Span};
use crate::token::{lex, Token};
use crate::Db;

#[salsa::tracked(returns(ref))]
pub fn parse(db: &dyn Db, source: Source) -> CompilationUnit {
    debug!("parsing {}", source.name(db));

    let tokens = lex(db, source);
    let mut parser = Parser {
        db,

        tokens: tokens.as_slice(),
        previous: None,
        last_span: tokens.first().map(|(_, span)| *span),
        next_id: 0,
    };

    parser.parse_compilation_unit()
}

pub struct Parser<'a> {
    db: &'a dyn Db,

    tokens: &'a [(Token, Span)],
    previous: Option<&'a Token>,
    last_span: Option<Span>,
    next_id: u32,
}

impl<'a> Parser<'a> {
    fn closest_span(&self) -> Span {
        self.tokens
            .first()
            .map(|(_, span)| *span)
            .or(self.last_span)
            .unwrap_or_default()
    }

    #[must_use]
    fn this_one(&self) -> Option<&'a (Token, Span)> {
        self.tokens.first()
    }

    /// Look `n` tokens ahead of the current one.
    #[must_use]
    fn peek(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(n).map(|(token, _)| token)
    }

    #[must_use]
    fn next(&mut self) -> Option<&'a (Token, Span)> {
        let ((token, _), rest) = self.tokens.split_first()?;
        self.previous = Some(token);
        self.tokens = rest;

        let first = self.tokens.first();
        self.last_span = first.map(|(_, span)| *span).or(self.last_span);

        first
    }

    fn is_done(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    fn matches(&self, m: impl Matcher) -> Option<Span> {
        if let Some((token, span)) = self.this_one() {
            m.matches(token).then_some(*span)
        } else {
            None
        }
    }

    #[must_use]
    fn consume(&mut self, m: impl Matcher) -> Option<Span> {
        if let Some(span) = self.matches(m) {
            let _ = self.next();
            Some(span)
        } else {
            None
        }
    }

    /// Parse an identifier, reporting an error and producing an empty name if
    /// there is none.
    fn identifier(&mut self, after: &str) -> (String, Span) {
        match self.this_one() {
            Some((Token::Identifier(name), span)) => {
                let _ = self.next();
                (name.clone(), *span)
            }

            Some((_, span)) => {
                self.at(*span).parse_expected_identifier(after);
                (String::new(), *span)
            }

            None => {
                let span = self.closest_span();
                self.at(span).parse_expected_identifier(after);
                (String::new(), span)
            }
        }
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn at(&self, span: Span) -> MessageMaker<'a> {
        MessageMaker::at(self.db, span)
    }
}
