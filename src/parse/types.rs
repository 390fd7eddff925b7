use super::Parser;
use crate::ast::Parameter;
use crate::token::Token;

impl Parser<'_> {
    /// Parse a type, producing its text without annotations and type
    /// arguments. Reports an error and produces `None` if there is no type.
    ///
    /// ```abnf
    /// type = *annotation NAME [type-args] *("." NAME [type-args]) *("[" "]")
    /// ```
    pub(super) fn parse_type(&mut self) -> Option<String> {
        while self.matches(Token::At).is_some() {
            self.skip_annotation();
        }

        let Some((Token::Identifier(first), _)) = self.this_one() else {
            let span = self.closest_span();
            self.at(span).parse_expected_type();
            return None;
        };

        let _ = self.next();
        let mut text = first.clone();

        loop {
            if self.matches(Token::Less).is_some() {
                self.skip_angles();
            }

            match (self.this_one(), self.peek(1)) {
                (Some((Token::Dot, _)), Some(Token::Identifier(part))) => {
                    let _ = self.next();
                    let _ = self.next();
                    text.push('.');
                    text.push_str(part);
                }

                _ => break,
            }
        }

        text.push_str(&self.dimensions());
        Some(text)
    }

    /// Parse any number of empty `[]` pairs.
    fn dimensions(&mut self) -> String {
        let mut dims = String::new();

        while self.matches(Token::OpenBracket).is_some() && self.peek(1) == Some(&Token::CloseBracket)
        {
            let _ = self.next();
            let _ = self.next();
            dims.push_str("[]");
        }

        dims
    }

    /// ```abnf
    /// parameters = "(" [parameter *("," parameter)] ")"
    /// parameter  = *modifier type ["..."] NAME *("[" "]")
    /// ```
    pub(super) fn parameters(&mut self) -> Vec<Parameter> {
        let mut parameters = Vec::new();

        let Some(opener) = self.consume(Token::OpenParen) else {
            return parameters;
        };

        if self.consume(Token::CloseParen).is_some() {
            return parameters;
        }

        loop {
            let _ = self.modifiers();

            if let Some(mut ty) = self.parse_type() {
                if self.consume(Token::Ellipsis).is_some() {
                    ty.push_str("...");
                }

                let (name, _) = self.identifier("a parameter type");
                ty.push_str(&self.dimensions());

                parameters.push(Parameter { ty, name });
            }

            if self.consume(Token::Comma).is_some() {
                continue;
            }

            if self.consume(Token::CloseParen).is_some() {
                break;
            }

            self.at(opener).parse_missing_paren();
            self.recover_parameters();
            break;
        }

        parameters
    }

    /// Skip ahead to the end of a broken parameter list, stopping before
    /// anything that could start a body.
    fn recover_parameters(&mut self) {
        loop {
            match self.this_one() {
                Some((Token::CloseParen, _)) => {
                    let _ = self.next();
                    break;
                }

                Some((Token::OpenBrace | Token::CloseBrace | Token::Semicolon, _)) | None => break,

                Some((Token::OpenParen, _)) => self.skip_balanced(),

                Some(_) => {
                    let _ = self.next();
                }
            }
        }
    }

    /// Skip a `<...>` list, including nested lists.
    pub(super) fn skip_angles(&mut self) {
        let Some(opener) = self.consume(Token::Less) else {
            return;
        };

        let mut depth = 1;
        while depth > 0 {
            match self.this_one() {
                Some((Token::Less, _)) => depth += 1,
                Some((Token::Greater, _)) => depth -= 1,
                Some((Token::At, _)) => {
                    self.skip_annotation();
                    continue;
                }

                Some((
                    Token::Semicolon
                    | Token::OpenBrace
                    | Token::CloseBrace
                    | Token::OpenParen
                    | Token::CloseParen,
                    _,
                ))
                | None => {
                    self.at(opener).parse_missing_angle();
                    return;
                }

                Some(_) => {}
            }

            let _ = self.next();
        }
    }

    /// ```abnf
    /// annotation = "@" NAME *("." NAME) ["(" ... ")"]
    /// ```
    pub(super) fn skip_annotation(&mut self) {
        if self.consume(Token::At).is_none() {
            return;
        }

        let _ = self.identifier("`@`");
        while self.consume(Token::Dot).is_some() {
            let _ = self.identifier("`.`");
        }

        if self.matches(Token::OpenParen).is_some() {
            self.skip_balanced();
        }
    }

    /// Skip a parenthesized, bracketed or braced group, respecting nesting.
    pub(super) fn skip_balanced(&mut self) {
        let mut closers = Vec::new();
        let mut openers = Vec::new();

        loop {
            let Some((token, span)) = self.this_one() else {
                if let Some((closer, opener)) = closers.last().zip(openers.last()) {
                    match closer {
                        Token::CloseBrace => self.at(*opener).parse_missing_brace(),
                        _ => self.at(*opener).parse_missing_paren(),
                    }
                }

                return;
            };

            match token {
                Token::OpenParen => closers.push(Token::CloseParen),
                Token::OpenBracket => closers.push(Token::CloseBracket),
                Token::OpenBrace => closers.push(Token::CloseBrace),

                Token::CloseParen | Token::CloseBracket | Token::CloseBrace => {
                    if closers.last() == Some(token) {
                        closers.pop();
                        openers.pop();
                    }

                    let _ = self.next();
                    if closers.is_empty() {
                        return;
                    }

                    continue;
                }

                _ => {
                    let _ = self.next();
                    if closers.is_empty() {
                        return;
                    }

                    continue;
                }
            }

            openers.push(*span);
            let _ = self.next();
        }
    }
}
