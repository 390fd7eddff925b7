use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use log::{debug, trace};

use super::{Member as MemberContext, NameBuilder, TypeShape};
use crate::ast::{
    Allocation, Block, Declared, EnumConstant, Member, MemberNode, NestedNode, NodeId,
    OperationDeclaration, TypeDeclaration, TypeKind,
};
use crate::messages::MessageMaker;
use crate::names::QualifiedName;
use crate::parse::parse;
use crate::source::{Source, Span};
use crate::Db;

/// Name every declaration in the source.
#[salsa::tracked(returns(ref))]
pub fn declared_names(db: &dyn Db, source: Source) -> NameTable {
    let unit = parse(db, source);
    debug!("naming declarations in {}", source.name(db));

    let mut namer = Namer {
        db,
        builder: NameBuilder::new(unit.package.clone()),
        names: Vec::new(),
        seen: HashMap::new(),
    };

    for declaration in unit.types.iter() {
        namer.type_declaration(declaration, false);
    }

    assert_eq!(0, namer.builder.depth());

    let names = namer
        .names
        .into_iter()
        .sorted_by_key(|declaration| declaration.id)
        .collect();

    NameTable { names }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub enum DeclarationKind {
    /// A top-level, member or local type.
    Type(TypeKind),
    AnonymousClass,
    Method,
    Constructor,
    Lambda,
}

impl Display for DeclarationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Type(TypeKind::Class) => "class",
            Self::Type(TypeKind::Interface) => "interface",
            Self::Type(TypeKind::Enum) => "enum",
            Self::Type(TypeKind::Annotation) => "annotation",
            Self::Type(TypeKind::Record) => "record",
            Self::AnonymousClass => "anonymous class",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Lambda => "lambda",
        };

        f.write_str(kind)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct NamedDeclaration {
    pub id: NodeId,
    pub kind: DeclarationKind,
    pub span: Span,
    pub name: QualifiedName,
}

/// The qualified names of the declarations of one compilation unit, ordered
/// by their position in the source.
#[derive(Clone, Debug, Default, Eq, PartialEq, salsa::Update)]
pub struct NameTable {
    names: Vec<NamedDeclaration>,
}

impl NameTable {
    /// The qualified name of a type, method, constructor or lambda, or of the
    /// anonymous class body of an enum constant.
    pub fn qualified_name_of(&self, node: &impl Declared) -> Option<&QualifiedName> {
        self.get(node.id()).map(|declaration| &declaration.name)
    }

    /// The qualified name of the anonymous class declared by a class instance
    /// creation, if it has a body.
    pub fn qualified_name_of_anonymous(&self, allocation: &Allocation) -> Option<&QualifiedName> {
        allocation.body.as_ref()?;
        self.get(allocation.id).map(|declaration| &declaration.name)
    }

    pub fn get(&self, id: NodeId) -> Option<&NamedDeclaration> {
        let index = self
            .names
            .binary_search_by_key(&id, |declaration| declaration.id)
            .ok()?;

        self.names.get(index)
    }

    /// Every declaration with the given name.
    pub fn find<'a>(
        &'a self,
        name: &'a QualifiedName,
    ) -> impl Iterator<Item = &'a NamedDeclaration> + 'a {
        self.names
            .iter()
            .filter(move |declaration| &declaration.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedDeclaration> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

struct Namer<'a> {
    db: &'a dyn Db,
    builder: NameBuilder,

    names: Vec<NamedDeclaration>,
    seen: HashMap<QualifiedName, Span>,
}

impl<'a> Namer<'a> {
    fn type_declaration(&mut self, declaration: &TypeDeclaration, local: bool) {
        let shape = if local {
            TypeShape::Local {
                name: &declaration.name,
                kind: declaration.kind,
            }
        } else {
            TypeShape::Named {
                name: &declaration.name,
                kind: declaration.kind,
            }
        };

        self.in_type(shape, |this, name| {
            this.declare(
                declaration.id,
                DeclarationKind::Type(declaration.kind),
                declaration.span,
                name,
            );

            this.members(&declaration.members);
        });
    }

    fn members(&mut self, members: &[Member]) {
        for member in members {
            match &member.node {
                MemberNode::Type(declaration) => self.type_declaration(declaration, false),

                MemberNode::Field {
                    is_static,
                    initializer,
                } => {
                    let context = MemberContext::Field {
                        is_static: *is_static,
                    };

                    self.in_member(context, |this| this.block(initializer));
                }

                MemberNode::Method(operation) => {
                    let name = self.builder.method(&operation.name, parameters(operation));
                    self.declare(operation.id, DeclarationKind::Method, member.span, name);

                    let context = MemberContext::Method(&operation.name);
                    self.in_member(context, |this| this.operation_body(operation));
                }

                MemberNode::Constructor(operation) => {
                    let name = self.builder.constructor(parameters(operation));
                    self.declare(operation.id, DeclarationKind::Constructor, member.span, name);

                    self.in_member(MemberContext::Constructor, |this| {
                        this.operation_body(operation)
                    });
                }

                MemberNode::Initializer { is_static, body } => {
                    let context = if *is_static {
                        MemberContext::StaticInitializer
                    } else {
                        MemberContext::InstanceInitializer
                    };

                    self.in_member(context, |this| this.block(body));
                }

                MemberNode::EnumConstant(constant) => {
                    self.in_member(MemberContext::EnumConstant, |this| {
                        this.enum_constant(constant, member.span)
                    });
                }
            }
        }
    }

    fn operation_body(&mut self, operation: &OperationDeclaration) {
        if let Some(body) = &operation.body {
            self.block(body);
        }
    }

    fn enum_constant(&mut self, constant: &EnumConstant, span: Span) {
        self.block(&constant.arguments);

        if let Some(body) = &constant.body {
            self.in_type(TypeShape::Anonymous, |this, name| {
                this.declare(constant.id, DeclarationKind::AnonymousClass, span, name);
                this.members(body);
            });
        }
    }

    fn block(&mut self, block: &Block) {
        for nested in block.0.iter() {
            match &nested.node {
                NestedNode::LocalType(declaration) => self.type_declaration(declaration, true),

                NestedNode::Allocation(allocation) => {
                    self.block(&allocation.arguments);

                    if let Some(body) = &allocation.body {
                        self.in_type(TypeShape::Anonymous, |this, name| {
                            this.declare(
                                allocation.id,
                                DeclarationKind::AnonymousClass,
                                nested.span,
                                name,
                            );

                            this.members(body);
                        });
                    }
                }

                NestedNode::Lambda(lambda) => {
                    let name = self.builder.lambda();
                    self.declare(lambda.id, DeclarationKind::Lambda, nested.span, name);
                    self.block(&lambda.body);
                }
            }
        }
    }

    fn in_type<F>(&mut self, shape: TypeShape, f: F)
    where
        F: FnOnce(&mut Namer<'a>, QualifiedName),
    {
        let before = self.builder.depth();
        let name = self.builder.enter_type(shape);

        f(self, name);

        self.builder.exit_type();
        assert_eq!(before, self.builder.depth());
    }

    fn in_member<F>(&mut self, member: MemberContext, f: F)
    where
        F: FnOnce(&mut Namer<'a>),
    {
        self.builder.enter_member(member);
        f(self);
        self.builder.exit_member();
    }

    fn declare(&mut self, id: NodeId, kind: DeclarationKind, span: Span, name: QualifiedName) {
        trace!("{kind:?} {name}");

        if let Some(other) = self.seen.get(&name) {
            self.at(span).naming_duplicate_declarations(&name, *other);
        } else {
            self.seen.insert(name.clone(), span);
        }

        self.names.push(NamedDeclaration {
            id,
            kind,
            span,
            name,
        });
    }

    fn at(&self, span: Span) -> MessageMaker<'a> {
        MessageMaker::at(self.db, span)
    }
}

fn parameters(operation: &OperationDeclaration) -> Vec<String> {
    operation
        .parameters
        .iter()
        .map(|parameter| parameter.ty.clone())
        .collect()
}
