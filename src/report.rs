use codespan_reporting::diagnostic::{Diagnostic, Label as CodespanLabel};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use codespan_reporting::term::{self, Config, DisplayStyle};

use qualname::messages::{LabelKind, Message, MessageLevel};

/// Renders diagnostics to standard error.
pub struct ConsoleReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: Config,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: Config {
                display_style: DisplayStyle::Rich,
                ..Default::default()
            },
        }
    }

    pub fn add(&mut self, name: String, text: String) -> usize {
        self.files.add(name, text)
    }

    pub fn report(
        &mut self,
        file: usize,
        messages: impl IntoIterator<Item = Message>,
    ) -> anyhow::Result<usize> {
        let mut errors = 0;

        for message in messages {
            if message.level == MessageLevel::Error {
                errors += 1;
            }

            let diagnostic = to_diagnostic(file, message);
            term::emit(&mut self.writer, &self.config, &self.files, &diagnostic)?;
        }

        Ok(errors)
    }
}

fn to_diagnostic(file: usize, message: Message) -> Diagnostic<usize> {
    let diagnostic = match message.level {
        MessageLevel::Error => Diagnostic::error(),
        MessageLevel::Warning => Diagnostic::warning(),
    };

    let labels = message.labels.into_iter().map(|label| {
        let range = label.at.start..label.at.end;
        let result = match label.kind {
            LabelKind::Primary => CodespanLabel::primary(file, range),
            LabelKind::Note => CodespanLabel::secondary(file, range),
        };

        match label.message {
            Some(text) => result.with_message(text),
            None => result,
        }
    });

    let diagnostic = diagnostic.with_labels(labels.collect());
    let diagnostic = match message.code {
        Some(code) => diagnostic.with_code(code),
        None => diagnostic,
    };

    match message.message {
        Some(text) => diagnostic.with_message(text),
        None => diagnostic,
    }
}
