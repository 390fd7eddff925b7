//! The declaration tree.
//!
//! Only the structure that matters for naming is kept: type declarations and
//! their members, and within code, the local types, class instance creations
//! and lambdas in the order they appear.

use crate::source::Span;

/// Identifies a naming-relevant node within its compilation unit. Ids are
/// handed out in source order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, salsa::Update)]
pub struct NodeId(pub u32);

/// Nodes which declare something with a qualified name.
pub trait Declared {
    fn id(&self) -> NodeId;
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct CompilationUnit {
    pub package: Vec<String>,
    pub types: Vec<TypeDeclaration>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct TypeDeclaration {
    pub id: NodeId,
    pub kind: TypeKind,
    pub name: String,
    pub members: Vec<Member>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct Member {
    pub node: MemberNode,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub enum MemberNode {
    Type(TypeDeclaration),

    /// One field declaration, possibly declaring several variables. The
    /// initializer holds the code of all of them.
    Field {
        is_static: bool,
        initializer: Block,
    },

    Method(OperationDeclaration),
    Constructor(OperationDeclaration),

    Initializer {
        is_static: bool,
        body: Block,
    },

    EnumConstant(EnumConstant),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct OperationDeclaration {
    pub id: NodeId,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Option<Block>,
}

/// A formal parameter. The type is kept as written, minus annotations,
/// modifiers and type arguments.
#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
}

/// An enum constant. If it has a body, that body is an anonymous class.
#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct EnumConstant {
    pub id: NodeId,
    pub name: String,
    pub arguments: Block,
    pub body: Option<Vec<Member>>,
}

/// The naming-relevant parts of some code, in source order.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, salsa::Update)]
pub struct Block(pub Vec<Nested>);

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct Nested {
    pub node: NestedNode,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub enum NestedNode {
    LocalType(TypeDeclaration),
    Allocation(Allocation),
    Lambda(Lambda),
}

/// A class instance creation `new T(args)`, which declares an anonymous class
/// if it has a body.
#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct Allocation {
    pub id: NodeId,
    pub ty: String,
    pub arguments: Block,
    pub body: Option<Vec<Member>>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct Lambda {
    pub id: NodeId,
    pub body: Block,
}

impl Declared for TypeDeclaration {
    fn id(&self) -> NodeId {
        self.id
    }
}

impl Declared for OperationDeclaration {
    fn id(&self) -> NodeId {
        self.id
    }
}

impl Declared for Lambda {
    fn id(&self) -> NodeId {
        self.id
    }
}

/// The anonymous class of the constant body, if any.
impl Declared for EnumConstant {
    fn id(&self) -> NodeId {
        self.id
    }
}

impl TypeKind {
    /// Interfaces and annotation types, whose fields are implicitly static.
    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }
}
