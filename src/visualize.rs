//! Graphviz output of how declarations nest within each other.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::naming::{NameTable, NamedDeclaration};
use crate::names::QualifiedName;

pub struct NestingVisualizer<'a> {
    table: &'a NameTable,
    declarations: Vec<&'a NamedDeclaration>,
}

impl<'a> NestingVisualizer<'a> {
    pub fn new(table: &'a NameTable) -> Self {
        Self {
            table,
            declarations: table.iter().collect(),
        }
    }

    /// The index of the first declaration with each name.
    fn indices(&self) -> HashMap<&'a QualifiedName, usize> {
        let mut indices = HashMap::with_capacity(self.table.len());
        for (index, declaration) in self.declarations.iter().enumerate() {
            indices.entry(&declaration.name).or_insert(index);
        }

        indices
    }
}

impl<'a> dot::Labeller<'a, usize, (usize, usize)> for NestingVisualizer<'a> {
    fn graph_id(&'a self) -> dot::Id<'a> {
        dot::Id::new("nesting").expect("valid graph id")
    }

    fn node_id(&'a self, n: &usize) -> dot::Id<'a> {
        dot::Id::new(format!("d{n}")).expect("valid node id")
    }

    fn node_label(&'a self, n: &usize) -> dot::LabelText<'a> {
        let declaration = self.declarations[*n];
        dot::LabelText::label(format!("{} {}", declaration.kind, declaration.name))
    }
}

impl<'a> dot::GraphWalk<'a, usize, (usize, usize)> for NestingVisualizer<'a> {
    fn nodes(&'a self) -> dot::Nodes<'a, usize> {
        Cow::Owned((0..self.declarations.len()).collect())
    }

    fn edges(&'a self) -> dot::Edges<'a, (usize, usize)> {
        let indices = self.indices();
        let edges = self
            .declarations
            .iter()
            .enumerate()
            .filter_map(|(index, declaration)| {
                let parent = declaration.name.enclosing_type()?;
                // Enclosing types point towards what they declare
                indices.get(&parent).map(|parent| (*parent, index))
            })
            .collect();

        Cow::Owned(edges)
    }

    fn source(&'a self, edge: &(usize, usize)) -> usize {
        edge.0
    }

    fn target(&'a self, edge: &(usize, usize)) -> usize {
        edge.1
    }
}

#[cfg(test)]
mod tests {
    use super::NestingVisualizer;
    use crate::naming::declared_names;
    use crate::source::Source;
    use crate::Database;

    #[test]
    fn renders_nesting() {
        let db = Database::default();
        let text = "package p; class Foo { class Bar {} void run() { Runnable r = () -> {}; } }";
        let source = Source::new(&db, text.to_string(), "Foo.java".to_string());

        let table = declared_names(&db, source);
        let visualizer = NestingVisualizer::new(table);

        let mut out = Vec::new();
        dot::render(&visualizer, &mut out).expect("rendering into memory");
        let out = String::from_utf8(out).expect("utf-8 output");

        assert!(out.starts_with("digraph nesting {"));
        assert!(out.contains("class p.Foo$Bar"));
        assert!(out.contains("lambda p.Foo#lambda$run$0"));

        assert!(out.contains("d0 -> d1"));
        assert!(out.contains("d0 -> d2"));
        assert!(out.contains("d0 -> d3"));
    }
}
