use log::trace;

use super::Parser;
use crate::ast::{Allocation, Block, Lambda, Nested, NestedNode, TypeKind};
use crate::source::Span;
use crate::token::Token;

/// Where a stretch of code ends.
#[derive(Clone, Copy, Debug)]
enum Until<'t> {
    /// At the given closing token, which is consumed. The span is that of the
    /// opening token.
    Close(&'t Token, Span),

    /// At a `;` on the same nesting level, which is consumed. A `}` also ends
    /// the code, but is left alone.
    Semicolon,

    /// Before anything which cannot continue an expression on the same
    /// nesting level.
    ExpressionEnd,
}

impl Parser<'_> {
    /// ```abnf
    /// block = "{" code "}"
    /// ```
    pub(super) fn parse_block(&mut self) -> Block {
        match self.consume(Token::OpenBrace) {
            Some(opener) => self.scan(Until::Close(&Token::CloseBrace, opener)),
            None => {
                let span = self.closest_span();
                self.at(span).parse_expected_body();
                Block::default()
            }
        }
    }

    /// Parse the arguments of a call after the opening parenthesis.
    pub(super) fn parse_arguments(&mut self, opener: Span) -> Block {
        self.scan(Until::Close(&Token::CloseParen, opener))
    }

    /// Parse the rest of a field declaration, up to and including its `;`.
    pub(super) fn parse_field_rest(&mut self) -> Block {
        self.scan(Until::Semicolon)
    }

    fn scan(&mut self, until: Until) -> Block {
        let mut items = Vec::new();
        self.scan_into(&mut items, until);
        Block(items)
    }

    fn scan_into(&mut self, items: &mut Vec<Nested>, until: Until) {
        loop {
            let Some((token, span)) = self.this_one() else {
                match until {
                    Until::Close(Token::CloseBrace, opener) => self.at(opener).parse_missing_brace(),
                    Until::Close(_, opener) => self.at(opener).parse_missing_paren(),
                    Until::Semicolon | Until::ExpressionEnd => {}
                }

                return;
            };

            match token {
                Token::CloseParen | Token::CloseBracket | Token::CloseBrace => match until {
                    Until::Close(closer, _) if closer == token => {
                        let _ = self.next();
                        return;
                    }

                    Until::Close(Token::CloseBrace, _) => {
                        // A stray closer inside a block.
                        let _ = self.next();
                    }

                    Until::Close(_, opener) => {
                        self.at(opener).parse_missing_paren();
                        return;
                    }

                    Until::Semicolon if *token != Token::CloseBrace => {
                        let _ = self.next();
                    }

                    Until::Semicolon | Until::ExpressionEnd => return,
                },

                Token::Semicolon => match until {
                    Until::Semicolon => {
                        let _ = self.next();
                        return;
                    }

                    Until::ExpressionEnd => return,

                    Until::Close(..) => {
                        let _ = self.next();
                    }
                },

                Token::Comma if matches!(until, Until::ExpressionEnd) => return,

                Token::OpenParen if self.at_parenthesized_lambda() => {
                    items.push(self.lambda(*span));
                }

                Token::OpenParen => {
                    let _ = self.next();
                    self.scan_into(items, Until::Close(&Token::CloseParen, *span));
                }

                Token::OpenBracket => {
                    let _ = self.next();
                    self.scan_into(items, Until::Close(&Token::CloseBracket, *span));
                }

                Token::OpenBrace => {
                    let _ = self.next();
                    self.scan_into(items, Until::Close(&Token::CloseBrace, *span));
                }

                Token::Identifier(_) if self.peek(1) == Some(&Token::Arrow) => {
                    items.push(self.lambda(*span));
                }

                Token::Case | Token::Default => self.switch_label(),

                Token::New if self.previous != Some(&Token::ColonColon) => {
                    let allocation = self.allocation();
                    let span = *span + self.last_span.unwrap_or(*span);
                    items.extend(allocation.map(|allocation| Nested {
                        node: NestedNode::Allocation(allocation),
                        span,
                    }));
                }

                Token::Class | Token::Interface | Token::Enum
                    if self.previous != Some(&Token::Dot) =>
                {
                    self.local_type(items);
                }

                Token::Identifier(_) if self.at_record() => self.local_type(items),

                _ => {
                    let _ = self.next();
                }
            }
        }
    }

    fn local_type(&mut self, items: &mut Vec<Nested>) {
        if let Some(declaration) = self.type_declaration() {
            let span = declaration.span;
            items.push(Nested {
                node: NestedNode::LocalType(declaration),
                span,
            });
        }
    }

    /// Check whether the current `(` opens the parameter list of a lambda,
    /// that is, whether its matching `)` is followed by `->`.
    fn at_parenthesized_lambda(&self) -> bool {
        let mut depth = 0usize;

        for (offset, (token, _)) in self.tokens.iter().enumerate() {
            match token {
                Token::OpenParen => depth += 1,
                Token::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        return self.peek(offset + 1) == Some(&Token::Arrow);
                    }
                }

                Token::OpenBrace | Token::CloseBrace | Token::Semicolon | Token::Arrow => {
                    return false
                }

                _ => {}
            }
        }

        false
    }

    /// ```abnf
    /// lambda = (NAME / "(" ... ")") "->" (block / expression)
    /// ```
    fn lambda(&mut self, start: Span) -> Nested {
        let id = self.fresh_id();

        while self.consume(Token::Arrow).is_none() && !self.is_done() {
            let _ = self.next();
        }

        trace!("lambda {id:?}");

        let body = if self.matches(Token::OpenBrace).is_some() {
            self.parse_block()
        } else {
            self.scan(Until::ExpressionEnd)
        };

        let span = start + self.last_span.unwrap_or(start);
        Nested {
            node: NestedNode::Lambda(Lambda { id, body }),
            span,
        }
    }

    /// ```abnf
    /// allocation = "new" [type-args] type (array-rest / "(" code ")" [class-body])
    /// ```
    fn allocation(&mut self) -> Option<Allocation> {
        let _ = self.next();

        if self.matches(Token::Less).is_some() {
            self.skip_angles();
        }

        let ty = self.parse_type()?;

        // Array creations are left for the caller to scan.
        let opener = self.consume(Token::OpenParen)?;

        let id = self.fresh_id();
        let arguments = self.parse_arguments(opener);
        let body = self
            .matches(Token::OpenBrace)
            .is_some()
            .then(|| self.class_body(TypeKind::Class, "", None));

        if body.is_some() {
            trace!("anonymous {ty} {id:?}");
        }

        Some(Allocation {
            id,
            ty,
            arguments,
            body,
        })
    }

    /// Skip a `case` or `default` label up to and including its `:` or `->`.
    fn switch_label(&mut self) {
        let _ = self.next();

        loop {
            match self.this_one() {
                Some((Token::Colon | Token::Arrow, _)) => {
                    let _ = self.next();
                    break;
                }

                Some((Token::OpenParen, _)) => self.skip_balanced(),

                Some((Token::OpenBrace | Token::CloseBrace | Token::Semicolon, _)) | None => break,

                Some(_) => {
                    let _ = self.next();
                }
            }
        }
    }
}
