//! Assigning qualified names to declarations.
//!
//! The [`NameBuilder`] is driven by a preorder, source order traversal of a
//! compilation unit. It keeps one set of counters for every class it has
//! entered, so that anonymous classes, local classes and lambdas are numbered
//! within the nearest enclosing class, whatever kind of class that is.

mod traverse;


pub use traverse::{declared_names, DeclarationKind, NameTable, NamedDeclaration};

use std::collections::HashMap;

use log::trace;

use crate::ast::TypeKind;
use crate::names::{ClassSegment, LambdaHost, Operation, QualifiedName};

/// The kind of class declaration being entered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeShape<'a> {
    /// A top-level or member type.
    Named { name: &'a str, kind: TypeKind },

    /// A type declared inside a block.
    Local { name: &'a str, kind: TypeKind },

    /// The body of a class instance creation or an enum constant.
    Anonymous,
}

/// A member as it appears in the source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Member<'a> {
    StaticInitializer,
    InstanceInitializer,
    Constructor,
    Method(&'a str),
    Field { is_static: bool },

    /// The arguments of an enum constant. Enum constants are static fields.
    EnumConstant,
}

/// The member code currently being traversed belongs to, as far as lambda
/// naming is concerned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EnclosingMember {
    TypeBody,
    StaticInitializer,
    InstanceInitializer,
    Constructor,
    Method(String),
    StaticField,
    InstanceField,

    /// A field of the local class with this simple name.
    LocalClassField(String),
    AnonymousClassField,
}

impl EnclosingMember {
    /// The host tag of lambdas declared within this member.
    pub fn host(&self) -> LambdaHost {
        match self {
            Self::StaticInitializer | Self::StaticField => LambdaHost::Static,

            Self::TypeBody | Self::InstanceInitializer | Self::Constructor | Self::InstanceField => {
                LambdaHost::New
            }

            Self::Method(name) | Self::LocalClassField(name) => LambdaHost::Member(name.clone()),
            Self::AnonymousClassField => LambdaHost::Member(String::new()),
        }
    }
}

#[derive(Clone, Debug)]
struct Counters {
    next_anonymous: u32,
    next_lambda: u32,
    local_name_counts: HashMap<String, u32>,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            next_anonymous: 1,
            next_lambda: 0,
            local_name_counts: HashMap::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Shape {
    Named(TypeKind),
    Local(TypeKind),
    Anonymous,
}

#[derive(Clone, Debug)]
struct Scope {
    name: QualifiedName,
    shape: Shape,
    member: EnclosingMember,
}

/// Builds qualified names during a traversal of one compilation unit.
#[derive(Debug, Default)]
pub struct NameBuilder {
    packages: Vec<String>,
    counters: HashMap<QualifiedName, Counters>,
    scopes: Vec<Scope>,
}

impl NameBuilder {
    pub fn new(packages: Vec<String>) -> Self {
        Self {
            packages,
            counters: HashMap::new(),
            scopes: Vec::new(),
        }
    }

    /// Start naming a new compilation unit in the given package.
    pub fn begin_unit(&mut self, packages: Vec<String>) {
        self.packages = packages;
        self.reset_global_counters();
    }

    /// Forget every counter and scope.
    pub fn reset_global_counters(&mut self) {
        self.counters.clear();
        self.scopes.clear();
    }

    /// How many classes are currently entered.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The name of the innermost entered class.
    pub fn current_type(&self) -> Option<&QualifiedName> {
        self.scopes.last().map(|scope| &scope.name)
    }

    /// Enter a class declaration, producing its name.
    ///
    /// # Panics
    ///
    /// Panics if a local or anonymous class is entered outside any class.
    pub fn enter_type(&mut self, shape: TypeShape) -> QualifiedName {
        let (name, shape) = match shape {
            TypeShape::Named { name, kind } => {
                let qualified = match self.scopes.last() {
                    Some(scope) => scope.name.nested(ClassSegment::Named(name.to_string())),
                    None => QualifiedName::top_level(self.packages.clone(), name),
                };

                (qualified, Shape::Named(kind))
            }

            TypeShape::Local { name, kind } => {
                let counters = self.nearest_counters("local class");
                let count = counters
                    .local_name_counts
                    .entry(name.to_string())
                    .or_insert(1);

                let segment = ClassSegment::Local(*count, name.to_string());
                *count += 1;

                (self.nest(segment), Shape::Local(kind))
            }

            TypeShape::Anonymous => {
                let counters = self.nearest_counters("anonymous class");
                let segment = ClassSegment::Anonymous(counters.next_anonymous);
                counters.next_anonymous += 1;

                (self.nest(segment), Shape::Anonymous)
            }
        };

        trace!("entering {name}");

        self.counters.insert(name.clone(), Counters::default());
        self.scopes.push(Scope {
            name: name.clone(),
            shape,
            member: EnclosingMember::TypeBody,
        });

        name
    }

    /// # Panics
    ///
    /// Panics if no class is entered.
    pub fn exit_type(&mut self) {
        let scope = self
            .scopes
            .pop()
            .expect("exiting a type requires having entered one");

        trace!("exiting {}", scope.name);
    }

    /// Enter a member of the innermost class.
    ///
    /// # Panics
    ///
    /// Panics if no class is entered.
    pub fn enter_member(&mut self, member: Member) {
        let scope = self
            .scopes
            .last_mut()
            .expect("members are always within a type");

        let interface = matches!(scope.shape, Shape::Named(kind) | Shape::Local(kind) if kind.is_interface());

        scope.member = match member {
            Member::StaticInitializer => EnclosingMember::StaticInitializer,
            Member::InstanceInitializer => EnclosingMember::InstanceInitializer,
            Member::Constructor => EnclosingMember::Constructor,
            Member::Method(name) => EnclosingMember::Method(name.to_string()),
            Member::EnumConstant => EnclosingMember::StaticField,

            Member::Field { .. } if interface => EnclosingMember::StaticField,
            Member::Field { .. } if scope.shape == Shape::Anonymous => {
                EnclosingMember::AnonymousClassField
            }

            Member::Field { .. } if matches!(scope.shape, Shape::Local(_)) => {
                EnclosingMember::LocalClassField(scope.name.declared_simple_name())
            }

            Member::Field { is_static: true } => EnclosingMember::StaticField,
            Member::Field { is_static: false } => EnclosingMember::InstanceField,
        };
    }

    /// # Panics
    ///
    /// Panics if no class is entered.
    pub fn exit_member(&mut self) {
        let scope = self
            .scopes
            .last_mut()
            .expect("members are always within a type");

        scope.member = EnclosingMember::TypeBody;
    }

    /// The member lambdas would currently be declared in.
    pub fn enclosing_member(&self) -> Option<&EnclosingMember> {
        self.scopes.last().map(|scope| &scope.member)
    }

    /// The name of a method of the innermost class.
    pub fn method(&self, name: &str, parameters: Vec<String>) -> QualifiedName {
        let operation = Operation::Method {
            name: name.to_string(),
            parameters,
        };

        self.innermost("method").name.with_operation(operation)
    }

    /// The name of a constructor of the innermost class, which shares the
    /// simple name of that class.
    pub fn constructor(&self, parameters: Vec<String>) -> QualifiedName {
        let scope = self.innermost("constructor");
        let operation = Operation::Method {
            name: scope.name.declared_simple_name(),
            parameters,
        };

        scope.name.with_operation(operation)
    }

    /// The name of the next lambda in the innermost class.
    pub fn lambda(&mut self) -> QualifiedName {
        let scope = self.innermost("lambda");
        let host = scope.member.host();
        let name = scope.name.clone();

        let counters = self.nearest_counters("lambda");
        let index = counters.next_lambda;
        counters.next_lambda += 1;

        name.with_operation(Operation::Lambda { host, index })
    }

    fn innermost(&self, what: &str) -> &Scope {
        self.scopes
            .last()
            .unwrap_or_else(|| panic!("a {what} must be declared within a type"))
    }

    fn nearest_counters(&mut self, what: &str) -> &mut Counters {
        let scope = self
            .scopes
            .last()
            .unwrap_or_else(|| panic!("a {what} must be declared within a type"));

        self.counters
            .get_mut(&scope.name)
            .expect("every entered type has counters")
    }

    fn nest(&self, segment: ClassSegment) -> QualifiedName {
        let scope = self
            .scopes
            .last()
            .expect("local and anonymous classes are always within a type");

        scope.name.nested(segment)
    }
}
