use std::ops::{Add, AddAssign};

#[salsa::input]
pub struct Source {
    #[returns(ref)]
    pub text: String,

    #[returns(ref)]
    pub name: String,
}

/// A byte range within a single source.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, salsa::Update)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The one-based line number the span starts on.
    pub fn line(&self, text: &str) -> usize {
        let start = self.start.min(text.len());
        text.as_bytes()[..start]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1
    }
}

impl Add for Span {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            start: self.start.min(rhs.start),
            end: self.end.max(rhs.end),
        }
    }
}

impl AddAssign for Span {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}
