//! Qualified names of declarations.
//!
//! A qualified name is made of a package path, a chain of class segments
//! (outermost first) and an optional operation:
//!
//! ```text
//! foo.bar.Outer$Inner$1Local$2#run(int, String)
//! └─────┘ └────────────────┘ └──────────────────┘
//! packages    class chain          operation
//! ```

mod parse;


use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub struct QualifiedName {
    packages: Vec<String>,
    classes: Vec<ClassSegment>,
    operation: Option<Operation>,
}

/// One segment of the class chain.
#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub enum ClassSegment {
    /// A top-level or member type, e.g. `Foo`.
    Named(String),

    /// A type declared inside a block, e.g. `1Local`. The index tells apart
    /// local types with the same simple name in the same enclosing class.
    Local(u32, String),

    /// An anonymous class, e.g. `1`.
    Anonymous(u32),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub enum Operation {
    /// A method or a constructor. Constructors are named after their class.
    Method {
        name: String,
        parameters: Vec<String>,
    },

    /// A lambda expression, `lambda$host$index`.
    Lambda { host: LambdaHost, index: u32 },
}

/// The member a lambda lexically belongs to.
#[derive(Clone, Debug, Eq, Hash, PartialEq, salsa::Update)]
pub enum LambdaHost {
    Static,
    New,
    Member(String),
}

impl QualifiedName {
    /// Create a qualified name from its parts. Returns `None` if the class
    /// chain is empty or starts with a local or anonymous class, since neither
    /// can be declared at the top level.
    pub fn new(
        packages: Vec<String>,
        classes: Vec<ClassSegment>,
        operation: Option<Operation>,
    ) -> Option<Self> {
        match classes.first() {
            Some(ClassSegment::Named(_)) => Some(Self {
                packages,
                classes,
                operation,
            }),

            Some(_) | None => None,
        }
    }

    /// Parse the canonical string form of a qualified name, returning `None`
    /// if it is malformed.
    pub fn parse(text: &str) -> Option<Self> {
        parse::parse(text)
    }

    /// The name of a top-level type.
    pub fn top_level(packages: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            packages,
            classes: vec![ClassSegment::Named(name.into())],
            operation: None,
        }
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn classes(&self) -> &[ClassSegment] {
        &self.classes
    }

    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }

    /// The rendered form of the innermost class segment, e.g. `Inner`,
    /// `1Local` or `1`.
    pub fn class_simple_name(&self) -> String {
        self.innermost().to_string()
    }

    /// The innermost class name as written in its declaration, e.g. `Local`
    /// for `Foo$1Local`. Empty for anonymous classes.
    pub fn declared_simple_name(&self) -> String {
        match self.innermost() {
            ClassSegment::Named(name) | ClassSegment::Local(_, name) => name.clone(),
            ClassSegment::Anonymous(_) => String::new(),
        }
    }

    pub fn is_unnamed_package(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn is_local_class(&self) -> bool {
        matches!(self.innermost(), ClassSegment::Local(..))
    }

    pub fn is_anonymous_class(&self) -> bool {
        matches!(self.innermost(), ClassSegment::Anonymous(_))
    }

    /// True for member types, including local and anonymous classes.
    pub fn is_nested_class(&self) -> bool {
        self.classes.len() > 1
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self.operation, Some(Operation::Lambda { .. }))
    }

    pub fn is_operation(&self) -> bool {
        self.operation.is_some()
    }

    /// The canonical string form. Same as the [`Display`] implementation.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// The name of the type this name refers to or is declared in.
    pub fn type_name(&self) -> Self {
        Self {
            packages: self.packages.clone(),
            classes: self.classes.clone(),
            operation: None,
        }
    }

    /// The name of the declaration that directly encloses this one: the
    /// declaring type of an operation, or the outer class of a nested class.
    /// Top-level types have no enclosing declaration.
    pub fn enclosing_type(&self) -> Option<Self> {
        if self.operation.is_some() {
            Some(self.type_name())
        } else if self.classes.len() > 1 {
            Some(Self {
                packages: self.packages.clone(),
                classes: self.classes[..self.classes.len() - 1].to_vec(),
                operation: None,
            })
        } else {
            None
        }
    }

    /// The name of a class declared within the type named by `self`.
    pub fn nested(&self, segment: ClassSegment) -> Self {
        let mut classes = self.classes.clone();
        classes.push(segment);

        Self {
            packages: self.packages.clone(),
            classes,
            operation: None,
        }
    }

    /// The name of an operation declared within the type named by `self`.
    pub fn with_operation(&self, operation: Operation) -> Self {
        Self {
            packages: self.packages.clone(),
            classes: self.classes.clone(),
            operation: Some(operation),
        }
    }

    fn innermost(&self) -> &ClassSegment {
        self.classes
            .last()
            .expect("qualified names always have at least one class segment")
    }
}

impl Operation {
    pub fn is_lambda(&self) -> bool {
        matches!(self, Self::Lambda { .. })
    }
}

impl LambdaHost {
    /// Interpret a host tag, so that `"static"` and `"new"` compare equal to
    /// the corresponding variants.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "static" => Self::Static,
            "new" => Self::New,
            member => Self::Member(member.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Static => "static",
            Self::New => "new",
            Self::Member(name) => name,
        }
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for package in self.packages.iter() {
            write!(f, "{package}.")?;
        }

        write!(f, "{}", self.classes.iter().join("$"))?;

        if let Some(operation) = &self.operation {
            write!(f, "#{operation}")?;
        }

        Ok(())
    }
}

impl Display for ClassSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Local(index, name) => write!(f, "{index}{name}"),
            Self::Anonymous(index) => write!(f, "{index}"),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method { name, parameters } => {
                write!(f, "{name}({})", parameters.iter().join(", "))
            }

            Self::Lambda { host, index } => write!(f, "lambda${}${index}", host.tag()),
        }
    }
}

impl Display for LambdaHost {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
