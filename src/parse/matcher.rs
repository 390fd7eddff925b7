use crate::token::Token;

pub trait Matcher {
    fn matches(&self, token: &Token) -> bool;
}

impl Matcher for Token {
    fn matches(&self, token: &Token) -> bool {
        match (self, token) {
            (Self::Identifier(_), Self::Identifier(_)) => true,

            _ => self == token,
        }
    }
}

impl Matcher for &'_ [Token] {
    fn matches(&self, token: &Token) -> bool {
        self.iter().any(|this| this.matches(token))
    }
}
