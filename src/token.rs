use logos::{Lexer, Logos};

use crate::source::{Source, Span};
use crate::Db;

#[salsa::tracked(returns(ref))]
pub fn lex(db: &dyn Db, source: Source) -> Vec<(Token, Span)> {
    let text = source.text(db);
    Lexer::new(text.as_ref())
        .spanned()
        .map(|(token, range)| (token, Span::new(range.start, range.end)))
        .collect()
}

#[derive(Logos, Clone, Debug, Eq, PartialEq, salsa::Update)]
pub enum Token {
    #[token("abstract")]
    Abstract,
    #[token("case")]
    Case,
    #[token("class")]
    Class,
    #[token("default")]
    Default,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("final")]
    Final,
    #[token("implements")]
    Implements,
    #[token("import")]
    Import,
    #[token("interface")]
    Interface,
    #[token("native")]
    Native,
    #[token("new")]
    New,
    #[token("package")]
    Package,
    #[token("permits")]
    Permits,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("static")]
    Static,
    #[token("strictfp")]
    Strictfp,
    #[token("synchronized")]
    Synchronized,
    #[token("throws")]
    Throws,
    #[token("transient")]
    Transient,
    #[token("volatile")]
    Volatile,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    #[token("->")]
    Arrow,
    #[token("@")]
    At,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("=")]
    Equal,
    #[token("?")]
    Question,
    #[token(";")]
    Semicolon,

    #[regex(r"[+\-*/%&|^!~]")]
    Operator,

    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9][0-9a-zA-Z_]*)?")]
    Number,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#""""("?"?([^"\\]|\\.))*""""#)]
    String,
    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[regex(r"//[^\n]*", logos::skip)]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip)]
    #[regex(r"[ \r\n\t\f]+", logos::skip)]
    #[error]
    Invalid,
}

impl Token {
    pub fn identifier(&self) -> Option<&String> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Modifiers that may precede a type or member declaration.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::Abstract
                | Self::Default
                | Self::Final
                | Self::Native
                | Self::Private
                | Self::Protected
                | Self::Public
                | Self::Static
                | Self::Strictfp
                | Self::Synchronized
                | Self::Transient
                | Self::Volatile
        )
    }
}
