use log::trace;

use super::Parser;
use crate::ast::{
    Block, CompilationUnit, EnumConstant, Member, MemberNode, OperationDeclaration, Parameter,
    TypeDeclaration, TypeKind,
};
use crate::source::Span;
use crate::token::Token;

/// Modifiers which affect naming.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct Modifiers {
    pub is_static: bool,
}

impl Parser<'_> {
    pub const TYPE_DECLARATION_START: &'static [Token] =
        &[Token::Class, Token::Interface, Token::Enum];

    /// ```abnf
    /// compilation-unit = [package-decl] *import-decl *(type-decl / ";")
    /// package-decl     = *annotation "package" qualified-name ";"
    /// import-decl      = "import" ["static"] qualified-name ["." "*"] ";"
    /// ```
    pub fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let mut package = Vec::new();

        let _ = self.modifiers();
        if self.consume(Token::Package).is_some() {
            package = self.qualified_identifier("`package`");
            let _ = self.consume(Token::Semicolon);
        }

        while self.consume(Token::Import).is_some() {
            while !self.is_done() && self.consume(Token::Semicolon).is_none() {
                let _ = self.next();
            }
        }

        let mut types = Vec::new();
        while !self.is_done() {
            if self.consume(Token::Semicolon).is_some() {
                continue;
            }

            let _ = self.modifiers();
            if self.at_type_declaration() {
                types.extend(self.type_declaration());
            } else if let Some((_, span)) = self.this_one() {
                let _ = self.next();
                self.at(*span).parse_expected_declaration();
            }
        }

        CompilationUnit { package, types }
    }

    pub(super) fn at_type_declaration(&self) -> bool {
        self.matches(Self::TYPE_DECLARATION_START).is_some()
            || (self.matches(Token::At).is_some() && self.peek(1) == Some(&Token::Interface))
            || self.at_record()
    }

    /// `record` is only a keyword when it starts a record declaration.
    pub(super) fn at_record(&self) -> bool {
        matches!(self.this_one(), Some((Token::Identifier(word), _)) if word == "record")
            && matches!(self.peek(1), Some(Token::Identifier(_)))
            && matches!(self.peek(2), Some(Token::OpenParen | Token::Less))
    }

    /// ```abnf
    /// type-decl    = type-keyword NAME [type-params] [record-header] *header-part class-body
    /// type-keyword = "class" / "interface" / "enum" / "@" "interface" / "record"
    /// ```
    pub(super) fn type_declaration(&mut self) -> Option<TypeDeclaration> {
        let (kind, opener) = match self.this_one() {
            Some((Token::Class, span)) => (TypeKind::Class, *span),
            Some((Token::Interface, span)) => (TypeKind::Interface, *span),
            Some((Token::Enum, span)) => (TypeKind::Enum, *span),
            Some((Token::At, span)) if self.peek(1) == Some(&Token::Interface) => {
                let _ = self.next();
                (TypeKind::Annotation, *span)
            }

            Some((Token::Identifier(_), span)) if self.at_record() => (TypeKind::Record, *span),

            _ => return None,
        };

        let _ = self.next();
        let id = self.fresh_id();
        let (written, at) = self.identifier("a type keyword");
        let name = self.declared_name(written.clone(), at);

        trace!("declaring {kind:?} {name}");

        let components = (kind == TypeKind::Record).then(|| {
            if self.matches(Token::Less).is_some() {
                self.skip_angles();
            }

            self.parameters()
        });

        self.skip_type_header();
        let members = self.class_body(kind, &written, components.as_deref());
        let span = opener + self.last_span.unwrap_or(opener);

        Some(TypeDeclaration {
            id,
            kind,
            name,
            members,
            span,
        })
    }

    /// Skip type parameters and `extends`, `implements` and `permits`
    /// clauses.
    fn skip_type_header(&mut self) {
        loop {
            match self.this_one() {
                Some((Token::OpenBrace, _)) => break,
                Some((Token::Less, _)) => self.skip_angles(),
                Some((Token::OpenParen, _)) => self.skip_balanced(),
                Some((Token::Semicolon | Token::CloseBrace, span)) => {
                    self.at(*span).parse_expected_body();
                    break;
                }

                Some(_) => {
                    let _ = self.next();
                }

                None => break,
            }
        }
    }

    /// ```abnf
    /// class-body = "{" [enum-constants] *(member / ";") "}"
    /// ```
    pub(super) fn class_body(
        &mut self,
        kind: TypeKind,
        class_name: &str,
        components: Option<&[Parameter]>,
    ) -> Vec<Member> {
        let mut members = Vec::new();

        let Some(opener) = self.consume(Token::OpenBrace) else {
            let span = self.closest_span();
            self.at(span).parse_expected_body();
            return members;
        };

        if kind == TypeKind::Enum {
            self.enum_constants(&mut members);
        }

        loop {
            match self.this_one() {
                Some((Token::CloseBrace, _)) => {
                    let _ = self.next();
                    break;
                }

                Some((Token::Semicolon, _)) => {
                    let _ = self.next();
                }

                Some(_) => members.extend(self.member(class_name, components)),

                None => {
                    self.at(opener).parse_missing_brace();
                    break;
                }
            }
        }

        members
    }

    /// ```abnf
    /// enum-constants = [enum-constant *("," enum-constant) [","]] [";"]
    /// enum-constant  = *annotation NAME ["(" code ")"] [class-body]
    /// ```
    fn enum_constants(&mut self, members: &mut Vec<Member>) {
        loop {
            let _ = self.modifiers();

            let Some((Token::Identifier(name), start)) = self.this_one() else {
                let _ = self.consume(Token::Semicolon);
                break;
            };

            let _ = self.next();
            let id = self.fresh_id();

            let arguments = match self.consume(Token::OpenParen) {
                Some(opener) => self.parse_arguments(opener),
                None => Block::default(),
            };

            let body = self
                .matches(Token::OpenBrace)
                .is_some()
                .then(|| self.class_body(TypeKind::Class, "", None));

            let span = *start + self.last_span.unwrap_or(*start);
            let node = MemberNode::EnumConstant(EnumConstant {
                id,
                name: name.clone(),
                arguments,
                body,
            });

            members.push(Member { node, span });

            if self.consume(Token::Comma).is_none() {
                let _ = self.consume(Token::Semicolon);
                break;
            }
        }
    }

    /// ```abnf
    /// member  = *modifier (block / type-decl / [type-params] (constructor / method / field))
    /// ```
    fn member(&mut self, class_name: &str, components: Option<&[Parameter]>) -> Option<Member> {
        let opener = self.closest_span();
        let modifiers = self.modifiers();

        let node = if self.matches(Token::OpenBrace).is_some() {
            MemberNode::Initializer {
                is_static: modifiers.is_static,
                body: self.parse_block(),
            }
        } else if self.at_type_declaration() {
            MemberNode::Type(self.type_declaration()?)
        } else if self.is_done() {
            return None;
        } else {
            self.operation_or_field(modifiers, class_name, components)?
        };

        let span = opener + self.last_span.unwrap_or(opener);
        Some(Member { node, span })
    }

    /// A compact record constructor has no parameter list of its own and
    /// takes the record components.
    fn operation_or_field(
        &mut self,
        modifiers: Modifiers,
        class_name: &str,
        components: Option<&[Parameter]>,
    ) -> Option<MemberNode> {
        if self.matches(Token::Less).is_some() {
            self.skip_angles();
        }

        let named_after_class = matches!(
            self.this_one(),
            Some((Token::Identifier(name), _)) if !class_name.is_empty() && name == class_name
        );

        let parameters = match (self.peek(1), components) {
            (Some(Token::OpenParen), _) if named_after_class => {
                let _ = self.next();
                Some(self.parameters())
            }

            (Some(Token::OpenBrace), Some(components)) if named_after_class => {
                let _ = self.next();
                Some(components.to_vec())
            }

            _ => None,
        };

        if let Some(parameters) = parameters {
            let id = self.fresh_id();
            let body = self.operation_body();

            return Some(MemberNode::Constructor(OperationDeclaration {
                id,
                name: class_name.replace('$', "_"),
                parameters,
                body,
            }));
        }

        let Some(_return_type) = self.parse_type() else {
            // Make sure the member loop always makes progress.
            let _ = self.next();
            return None;
        };

        let (name, at) = self.identifier("a type");

        if self.matches(Token::OpenParen).is_some() {
            let name = self.declared_name(name, at);
            let id = self.fresh_id();
            let parameters = self.parameters();

            while self.consume(Token::OpenBracket).is_some() {
                let _ = self.consume(Token::CloseBracket);
            }

            let body = self.operation_body();

            Some(MemberNode::Method(OperationDeclaration {
                id,
                name,
                parameters,
                body,
            }))
        } else {
            let initializer = self.parse_field_rest();
            Some(MemberNode::Field {
                is_static: modifiers.is_static,
                initializer,
            })
        }
    }

    /// ```abnf
    /// operation-body = ["throws" types] (block / ";" / "default" code ";")
    /// ```
    fn operation_body(&mut self) -> Option<Block> {
        if self.consume(Token::Throws).is_some() {
            while self
                .matches(&[Token::OpenBrace, Token::Semicolon][..])
                .is_none()
                && !self.is_done()
            {
                let _ = self.next();
            }
        }

        match self.this_one() {
            Some((Token::OpenBrace, _)) => Some(self.parse_block()),

            Some((Token::Semicolon, _)) => {
                let _ = self.next();
                None
            }

            // Annotation element defaults are constants and never declare
            // anything.
            Some((Token::Default, _)) => {
                let _ = self.next();
                let _ = self.parse_field_rest();
                None
            }

            Some((_, span)) => {
                self.at(*span).parse_expected_operation_body();
                None
            }

            None => None,
        }
    }

    /// ```abnf
    /// modifier = "public" / "protected" / "private" / "static" / "abstract"
    ///          / "final" / "native" / "synchronized" / "transient"
    ///          / "volatile" / "strictfp" / "default" / "sealed"
    ///          / "non-sealed" / annotation
    /// ```
    pub(super) fn modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();

        loop {
            match self.this_one() {
                Some((token, _)) if token.is_modifier() => {
                    modifiers.is_static |= *token == Token::Static;
                    let _ = self.next();
                }

                Some((Token::At, _)) if self.peek(1) != Some(&Token::Interface) => {
                    self.skip_annotation();
                }

                Some((Token::Identifier(name), _)) if name == "sealed" && self.modifier_follows(1) => {
                    let _ = self.next();
                }

                Some((Token::Identifier(name), _))
                    if name == "non"
                        && self.peek(1) == Some(&Token::Operator)
                        && self.peek(2).and_then(Token::identifier).map(String::as_str)
                            == Some("sealed") =>
                {
                    let _ = self.next();
                    let _ = self.next();
                    let _ = self.next();
                }

                _ => break,
            }
        }

        modifiers
    }

    fn modifier_follows(&self, n: usize) -> bool {
        match self.peek(n) {
            Some(token) => {
                token.is_modifier()
                    || Self::TYPE_DECLARATION_START.contains(token)
                    || *token == Token::At
            }

            None => false,
        }
    }

    /// `$` is reserved for separating class segments, so a declared name
    /// containing one is reported and has every `$` replaced by `_`.
    fn declared_name(&self, name: String, at: Span) -> String {
        if name.contains('$') {
            self.at(at).parse_dollar_in_name(&name);
            name.replace('$', "_")
        } else {
            name
        }
    }

    fn qualified_identifier(&mut self, after: &str) -> Vec<String> {
        let (first, _) = self.identifier(after);
        let mut parts = vec![first];

        while self.consume(Token::Dot).is_some() {
            let (part, _) = self.identifier("`.`");
            parts.push(part);
        }

        parts
    }
}
