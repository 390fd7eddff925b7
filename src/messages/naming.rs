use crate::names::QualifiedName;
use crate::source::Span;

use super::{Label, Message, MessageMaker};

const DUPLICATE_DECLARATIONS: &str = "EN00";

impl MessageMaker<'_> {
    pub fn naming_duplicate_declarations(&self, name: &QualifiedName, other: Span) {
        let labels = vec![
            Label::primary(self.span).with_message("duplicate declaration here"),
            Label::note(other).with_message("first declared here"),
        ];

        self.add(
            Message::warning()
                .with_code(DUPLICATE_DECLARATIONS)
                .with_message(format!("`{name}` is declared more than once"))
                .with_labels(labels),
        );
    }
}
