//! Parsing the canonical string form back into a [`QualifiedName`].
//!
//! ```abnf
//! qname       = [package "." *(package ".")] class-chain ["#" operation]
//! class-chain = class-seg *("$" class-seg)
//! class-seg   = digits ident / digits / ident
//! operation   = ident "(" [param *(", " param)] ")"
//! operation  =/ "lambda$" [ident] "$" digits
//! ```
//!
//! Anything the grammar does not describe, as well as anything that would not
//! render back to the exact same string (such as leading zeroes), is rejected.

use super::{ClassSegment, LambdaHost, Operation, QualifiedName};

const LAMBDA_PREFIX: &str = "lambda$";
const PARAMETER_SEPARATOR: &str = ", ";

pub(super) fn parse(text: &str) -> Option<QualifiedName> {
    let (prefix, operation) = match text.split_once('#') {
        Some((prefix, operation)) => (prefix, Some(parse_operation(operation)?)),
        None => (text, None),
    };

    let mut parts: Vec<&str> = prefix.split('.').collect();
    let chain = parts.pop()?;

    let packages = parts
        .into_iter()
        .map(|part| is_package(part).then(|| part.to_string()))
        .collect::<Option<Vec<_>>>()?;

    let classes = chain
        .split('$')
        .map(parse_class_segment)
        .collect::<Option<Vec<_>>>()?;

    QualifiedName::new(packages, classes, operation)
}

fn parse_class_segment(segment: &str) -> Option<ClassSegment> {
    let digits = segment.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return is_identifier(segment).then(|| ClassSegment::Named(segment.to_string()));
    }

    let (index, name) = segment.split_at(digits);
    let index = parse_number(index).filter(|index| *index > 0)?;

    if name.is_empty() {
        Some(ClassSegment::Anonymous(index))
    } else if is_identifier(name) {
        Some(ClassSegment::Local(index, name.to_string()))
    } else {
        None
    }
}

fn parse_operation(operation: &str) -> Option<Operation> {
    if let Some(lambda) = operation.strip_prefix(LAMBDA_PREFIX) {
        let (host, index) = lambda.split_once('$')?;
        if !host.is_empty() && !is_identifier(host) {
            return None;
        }

        let index = parse_number(index)?;
        let host = LambdaHost::from_tag(host);

        return Some(Operation::Lambda { host, index });
    }

    let (name, parameters) = operation.split_once('(')?;
    let parameters = parameters.strip_suffix(')')?;

    if !is_identifier(name) {
        return None;
    }

    let parameters = if parameters.is_empty() {
        Vec::new()
    } else {
        parameters
            .split(PARAMETER_SEPARATOR)
            .map(|param| is_parameter(param).then(|| param.to_string()))
            .collect::<Option<Vec<_>>>()?
    };

    Some(Operation::Method {
        name: name.to_string(),
        parameters,
    })
}

/// A decimal number without superfluous leading zeroes.
fn parse_number(digits: &str) -> Option<u32> {
    let well_formed = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));

    if well_formed {
        digits.parse().ok()
    } else {
        None
    }
}

fn is_identifier(text: &str) -> bool {
    let mut bytes = text.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }

        _ => false,
    }
}

fn is_package(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_lowercase()) && is_identifier(text)
}

/// Parameters are free-form type strings, but must not contain the list
/// delimiters and must not be padded with whitespace (otherwise `a , b` and
/// `a,  b` would sneak through the separator check).
fn is_parameter(text: &str) -> bool {
    !text.is_empty()
        && !text.contains([',', ')'])
        && text.trim() == text
}
