use super::{Label, Message, MessageMaker};

const EXPECTED_DECLARATION: &str = "EP00";
const EXPECTED_IDENTIFIER: &str = "EP01";
const EXPECTED_TYPE: &str = "EP02";
const EXPECTED_BODY: &str = "EP03";
const DOLLAR_IN_NAME: &str = "EP04";
const MISSING_BRACE: &str = "EP20";
const MISSING_PAREN: &str = "EP21";
const MISSING_ANGLE: &str = "EP22";

impl MessageMaker<'_> {
    pub fn parse_expected_declaration(&self) {
        let labels = vec![Label::primary(self.span)];

        self.add(
            Message::error()
                .with_code(EXPECTED_DECLARATION)
                .with_message("expected a declaration")
                .with_labels(labels),
        );
    }

    pub fn parse_expected_identifier(&self, after: &str) {
        let labels =
            vec![Label::primary(self.span).with_message(format!("expected a name after {after}"))];

        self.add(
            Message::error()
                .with_code(EXPECTED_IDENTIFIER)
                .with_message("expected an identifier")
                .with_labels(labels),
        );
    }

    pub fn parse_expected_type(&self) {
        let labels = vec![Label::primary(self.span)];

        self.add(
            Message::error()
                .with_code(EXPECTED_TYPE)
                .with_message("expected a type")
                .with_labels(labels),
        );
    }

    pub fn parse_expected_body(&self) {
        let labels = vec![Label::primary(self.span)];

        self.add(
            Message::error()
                .with_code(EXPECTED_BODY)
                .with_message("expected a class body")
                .with_labels(labels),
        );
    }

    pub fn parse_expected_operation_body(&self) {
        let labels = vec![Label::primary(self.span).with_message("expected `{` or `;`")];

        self.add(
            Message::error()
                .with_code(EXPECTED_BODY)
                .with_message("expected a method body")
                .with_labels(labels),
        );
    }

    pub fn parse_dollar_in_name(&self, name: &str) {
        let labels = vec![Label::primary(self.span)
            .with_message("`$` separates nested classes in qualified names")];

        self.add(
            Message::error()
                .with_code(DOLLAR_IN_NAME)
                .with_message(format!("the declared name `{name}` contains a `$`"))
                .with_labels(labels),
        );
    }

    pub fn parse_missing_brace(&self) {
        let labels = vec![Label::primary(self.span).with_message("this brace is never closed")];

        self.add(
            Message::error()
                .with_code(MISSING_BRACE)
                .with_message("unclosed opening brace")
                .with_labels(labels),
        );
    }

    pub fn parse_missing_paren(&self) {
        let labels = vec![Label::primary(self.span)];

        self.add(
            Message::error()
                .with_code(MISSING_PAREN)
                .with_message("unclosed opening parenthesis")
                .with_labels(labels),
        );
    }

    pub fn parse_missing_angle(&self) {
        let labels = vec![Label::primary(self.span)];

        self.add(
            Message::error()
                .with_code(MISSING_ANGLE)
                .with_message("unclosed type argument list")
                .with_labels(labels),
        );
    }
}
