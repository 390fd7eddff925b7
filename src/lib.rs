use messages::Message;

pub mod ast;
pub mod messages;
pub mod names;
pub mod naming;
pub mod parse;
pub mod source;
pub mod token;
pub mod visualize;

pub use names::{ClassSegment, LambdaHost, Operation, QualifiedName};

#[salsa::db]
pub trait Db: salsa::Database {}

#[salsa::db]
#[derive(Clone, Default)]
pub struct Database {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for Database {}

#[salsa::db]
impl Db for Database {}

#[salsa::accumulator]
#[derive(Clone, Debug)]
pub struct Messages(pub Message);
