//! AST node definitions for Java SE 8.
//!
//! Nodes are grouped by grammatical category: each category is an enum of
//! per-variant structs. Recursive positions are boxed at the enum level, so
//! the structs themselves hold their children directly.
//!
//! Every node carries the position of its first significant token, wrapped
//! in [`NodePosition`] so that derived equality stays structural: two nodes
//! compare equal iff they describe the same program text, wherever it was
//! written. Declarations that accept Javadoc carry the attached comment
//! text in `documentation`.

use indexmap::IndexSet;
use javelin_lex::TokenKind;
use javelin_util::NodePosition;

/// An ordered, deduplicated set of declaration modifiers.
pub type ModifierSet = IndexSet<Modifier>;

/// A declaration modifier keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    /// The `default` method modifier on interfaces.
    Default,
}

impl Modifier {
    /// Maps a keyword lexeme to its modifier.
    pub fn from_keyword(text: &str) -> Option<Modifier> {
        Some(match text {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "static" => Modifier::Static,
            "final" => Modifier::Final,
            "abstract" => Modifier::Abstract,
            "native" => Modifier::Native,
            "synchronized" => Modifier::Synchronized,
            "transient" => Modifier::Transient,
            "volatile" => Modifier::Volatile,
            "strictfp" => Modifier::Strictfp,
            "default" => Modifier::Default,
            _ => return None,
        })
    }

    /// The source spelling of this modifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Native => "native",
            Modifier::Synchronized => "synchronized",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
        }
    }
}

// =============================================================================
// COMPILATION UNIT
// =============================================================================

/// The root of a parsed source file: package, imports, type declarations.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CompilationUnit {
    pub package: Option<PackageDeclaration>,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDeclaration>,
    pub position: NodePosition,
}

/// A `package` declaration, possibly annotated (package-info sources).
#[derive(Clone, Debug, PartialEq)]
pub struct PackageDeclaration {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub documentation: Option<String>,
    pub position: NodePosition,
}

/// A single `import` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Import {
    /// Dotted path, without any trailing `.*`.
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub position: NodePosition,
}

// =============================================================================
// TYPE DECLARATIONS
// =============================================================================

/// A top-level or nested type declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDeclaration {
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Annotation(AnnotationDeclaration),
}

impl TypeDeclaration {
    /// The declared simple name.
    pub fn name(&self) -> &str {
        match self {
            TypeDeclaration::Class(d) => &d.name,
            TypeDeclaration::Interface(d) => &d.name,
            TypeDeclaration::Enum(d) => &d.name,
            TypeDeclaration::Annotation(d) => &d.name,
        }
    }

    /// The declaration's modifiers.
    pub fn modifiers(&self) -> &ModifierSet {
        match self {
            TypeDeclaration::Class(d) => &d.modifiers,
            TypeDeclaration::Interface(d) => &d.modifiers,
            TypeDeclaration::Enum(d) => &d.modifiers,
            TypeDeclaration::Annotation(d) => &d.modifiers,
        }
    }

    /// Position of the first significant token.
    pub fn position(&self) -> NodePosition {
        match self {
            TypeDeclaration::Class(d) => d.position,
            TypeDeclaration::Interface(d) => d.position,
            TypeDeclaration::Enum(d) => d.position,
            TypeDeclaration::Annotation(d) => d.position,
        }
    }
}

/// `class Name<T> extends Base implements I1, I2 { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDeclaration {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Option<ReferenceType>,
    pub implements: Vec<ReferenceType>,
    pub body: Vec<MemberDeclaration>,
    pub position: NodePosition,
}

/// `interface Name<T> extends I1, I2 { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceDeclaration {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Vec<ReferenceType>,
    pub body: Vec<MemberDeclaration>,
    pub position: NodePosition,
}

/// `enum Name implements I { A, B; members }`
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDeclaration {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub name: String,
    pub implements: Vec<ReferenceType>,
    pub constants: Vec<EnumConstantDeclaration>,
    pub body: Vec<MemberDeclaration>,
    pub position: NodePosition,
}

/// `@interface Name { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationDeclaration {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub name: String,
    pub body: Vec<MemberDeclaration>,
    pub position: NodePosition,
}

/// One enum constant, with optional constructor arguments and body.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumConstantDeclaration {
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub name: String,
    pub arguments: Vec<Expression>,
    pub body: Option<Vec<MemberDeclaration>>,
    pub position: NodePosition,
}

// =============================================================================
// MEMBERS
// =============================================================================

/// A member of a class, interface, enum, or annotation body.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberDeclaration {
    Field(FieldDeclaration),
    Method(MethodDeclaration),
    Constructor(ConstructorDeclaration),
    AnnotationMethod(AnnotationMethod),
    Type(TypeDeclaration),
    Initializer(InitializerBlock),
}

/// One or more fields sharing a type: `int x = 1, y[];`
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDeclaration {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub field_type: Type,
    pub declarators: Vec<VariableDeclarator>,
    pub position: NodePosition,
}

/// A single declared variable with optional C-style dimensions and
/// initializer.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclarator {
    pub name: String,
    /// Array dimensions written after the name.
    pub extra_dimensions: usize,
    pub initializer: Option<Expression>,
    pub position: NodePosition,
}

/// A method declaration; `return_type` is `None` for `void`.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDeclaration {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub return_type: Option<Type>,
    pub name: String,
    pub parameters: Vec<FormalParameter>,
    /// Array dimensions written after the parameter list.
    pub extra_dimensions: usize,
    pub throws: Vec<ReferenceType>,
    /// `None` for abstract and native methods.
    pub body: Option<Block>,
    pub position: NodePosition,
}

/// A constructor declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstructorDeclaration {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub name: String,
    pub parameters: Vec<FormalParameter>,
    pub throws: Vec<ReferenceType>,
    pub body: Block,
    pub position: NodePosition,
}

/// An annotation type element: `String value() default "x";`
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationMethod {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub return_type: Type,
    pub name: String,
    pub extra_dimensions: usize,
    pub default: Option<ElementValue>,
    pub position: NodePosition,
}

/// A static or instance initializer block.
#[derive(Clone, Debug, PartialEq)]
pub struct InitializerBlock {
    pub is_static: bool,
    pub block: Block,
    pub position: NodePosition,
}

/// A formal method/lambda/catch-style parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct FormalParameter {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub param_type: Type,
    pub name: String,
    pub varargs: bool,
    pub extra_dimensions: usize,
    pub position: NodePosition,
}

/// An untyped lambda parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct InferredFormalParameter {
    pub name: String,
    pub position: NodePosition,
}

/// A local variable declaration, also used as ForEach loop variable.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalVariableDeclaration {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub declared_type: Type,
    pub declarators: Vec<VariableDeclarator>,
    pub position: NodePosition,
}

// =============================================================================
// TYPES
// =============================================================================

/// A type use: primitive or reference, with array dimensions.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Basic(BasicType),
    Reference(ReferenceType),
}

impl Type {
    /// Position of the first token of the type.
    pub fn position(&self) -> NodePosition {
        match self {
            Type::Basic(t) => t.position,
            Type::Reference(t) => t.position,
        }
    }

    /// Array dimensions on the outermost type.
    pub fn dimensions(&self) -> usize {
        match self {
            Type::Basic(t) => t.dimensions,
            Type::Reference(t) => t.dimensions,
        }
    }

    /// Adds array dimensions to the outermost type.
    pub fn with_extra_dimensions(mut self, extra: usize) -> Type {
        match &mut self {
            Type::Basic(t) => t.dimensions += extra,
            Type::Reference(t) => t.dimensions += extra,
        }
        self
    }
}

/// The eight primitive type keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Char,
}

impl PrimitiveKind {
    /// Maps a keyword lexeme to its primitive kind.
    pub fn from_keyword(text: &str) -> Option<PrimitiveKind> {
        Some(match text {
            "byte" => PrimitiveKind::Byte,
            "short" => PrimitiveKind::Short,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            "boolean" => PrimitiveKind::Boolean,
            "char" => PrimitiveKind::Char,
            _ => return None,
        })
    }

    /// The source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Char => "char",
        }
    }
}

/// A primitive type use, e.g. `int[][]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicType {
    pub annotations: Vec<Annotation>,
    pub name: PrimitiveKind,
    pub dimensions: usize,
    pub position: NodePosition,
}

/// A class or interface type use.
///
/// Plain qualified names collapse into a dotted `name`; a parameterized
/// segment followed by further segments chains through `sub_type`, so
/// `Outer<T>.Inner<U>` is `Outer<T>` with `sub_type` `Inner<U>`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceType {
    pub annotations: Vec<Annotation>,
    pub name: String,
    /// `None`: no argument list. `Some(empty)`: the diamond `<>`.
    pub type_arguments: Option<Vec<TypeArgument>>,
    pub sub_type: Option<Box<ReferenceType>>,
    pub dimensions: usize,
    pub position: NodePosition,
}

/// One argument inside `<...>` at a type use site.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeArgument {
    Concrete(Type),
    Wildcard(WildcardType),
}

/// `?`, `? extends T`, or `? super T`.
#[derive(Clone, Debug, PartialEq)]
pub struct WildcardType {
    pub bound: Option<(WildcardBoundKind, Box<Type>)>,
    pub position: NodePosition,
}

/// The direction of a wildcard bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WildcardBoundKind {
    Extends,
    Super,
}

/// A definition-site type parameter: `T extends A & B`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeParameter {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub extends: Vec<ReferenceType>,
    pub position: NodePosition,
}

// =============================================================================
// ANNOTATIONS
// =============================================================================

/// An annotation use: `@Name`, `@Name(value)`, or `@Name(a = 1, b = 2)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub element: Option<AnnotationElement>,
    pub position: NodePosition,
}

/// The parenthesized part of an annotation.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationElement {
    /// `@Name(a = 1, b = 2)`; also `@Name()` with an empty list.
    Pairs(Vec<ElementValuePair>),
    /// `@Name(value)`.
    Value(Box<ElementValue>),
}

/// A named element value inside an annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementValuePair {
    pub name: String,
    pub value: ElementValue,
    pub position: NodePosition,
}

/// An annotation element value.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementValue {
    /// A conditional expression.
    Expression(Expression),
    /// A nested annotation.
    Annotation(Box<Annotation>),
    /// `{ v1, v2, ... }`
    Array(ElementArrayValue),
}

/// An array of element values.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementArrayValue {
    pub values: Vec<ElementValue>,
    pub position: NodePosition,
}

// =============================================================================
// STATEMENTS
// =============================================================================

/// A `{ ... }` block.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub position: NodePosition,
}

/// Any Java statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Block(Block),
    If(Box<IfStatement>),
    While(Box<WhileStatement>),
    DoWhile(Box<DoWhileStatement>),
    For(Box<ForStatement>),
    ForEach(Box<ForEachStatement>),
    Switch(SwitchStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Return(ReturnStatement),
    Throw(ThrowStatement),
    Try(Box<TryStatement>),
    Synchronized(Box<SynchronizedStatement>),
    LocalVariable(LocalVariableDeclaration),
    Expression(ExpressionStatement),
    Assert(AssertStatement),
    Labeled(Box<LabeledStatement>),
    Empty(EmptyStatement),
    /// A class or interface declared inside a block.
    LocalType(Box<TypeDeclaration>),
}

/// `if (cond) then else otherwise`
#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Statement,
    pub else_branch: Option<Statement>,
    pub position: NodePosition,
}

/// `while (cond) body`
#[derive(Clone, Debug, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Statement,
    pub position: NodePosition,
}

/// `do body while (cond);`
#[derive(Clone, Debug, PartialEq)]
pub struct DoWhileStatement {
    pub body: Statement,
    pub condition: Expression,
    pub position: NodePosition,
}

/// The classic three-part `for`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub condition: Option<Expression>,
    pub update: Vec<Expression>,
    pub body: Statement,
    pub position: NodePosition,
}

/// The initializer slot of a classic `for`.
#[derive(Clone, Debug, PartialEq)]
pub enum ForInit {
    Declaration(LocalVariableDeclaration),
    Expressions(Vec<Expression>),
}

/// `for (T x : iterable) body`
#[derive(Clone, Debug, PartialEq)]
pub struct ForEachStatement {
    pub variable: LocalVariableDeclaration,
    pub iterable: Expression,
    pub body: Statement,
    pub position: NodePosition,
}

/// `switch (expr) { cases }`
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchStatement {
    pub expression: Expression,
    pub cases: Vec<SwitchCase>,
    pub position: NodePosition,
}

/// A group of consecutive labels and the statements that follow them.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    pub labels: Vec<SwitchLabel>,
    pub statements: Vec<Statement>,
    pub position: NodePosition,
}

/// One `case expr:` or `default:` label.
#[derive(Clone, Debug, PartialEq)]
pub enum SwitchLabel {
    Constant(Expression),
    Default,
}

/// `break label;`
#[derive(Clone, Debug, PartialEq)]
pub struct BreakStatement {
    pub label: Option<String>,
    pub position: NodePosition,
}

/// `continue label;`
#[derive(Clone, Debug, PartialEq)]
pub struct ContinueStatement {
    pub label: Option<String>,
    pub position: NodePosition,
}

/// `return expr;`
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub position: NodePosition,
}

/// `throw expr;`
#[derive(Clone, Debug, PartialEq)]
pub struct ThrowStatement {
    pub value: Expression,
    pub position: NodePosition,
}

/// `try (resources) { } catch ... finally { }`
#[derive(Clone, Debug, PartialEq)]
pub struct TryStatement {
    pub resources: Vec<TryResource>,
    pub block: Block,
    pub catches: Vec<CatchClause>,
    pub finally_block: Option<Block>,
    pub position: NodePosition,
}

/// One resource in a try-with-resources header.
#[derive(Clone, Debug, PartialEq)]
pub struct TryResource {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub resource_type: Type,
    pub name: String,
    pub value: Expression,
    pub position: NodePosition,
}

/// `catch (A | B e) { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub parameter: CatchParameter,
    pub block: Block,
    pub position: NodePosition,
}

/// The multi-catch parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchParameter {
    pub modifiers: ModifierSet,
    pub annotations: Vec<Annotation>,
    pub types: Vec<ReferenceType>,
    pub name: String,
    pub position: NodePosition,
}

/// `synchronized (lock) { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct SynchronizedStatement {
    pub lock: Expression,
    pub block: Block,
    pub position: NodePosition,
}

/// An expression used as a statement.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub position: NodePosition,
}

/// `assert cond : message;`
#[derive(Clone, Debug, PartialEq)]
pub struct AssertStatement {
    pub condition: Expression,
    pub message: Option<Expression>,
    pub position: NodePosition,
}

/// `label: statement`
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledStatement {
    pub label: String,
    pub statement: Statement,
    pub position: NodePosition,
}

/// A lone `;`.
#[derive(Clone, Debug, PartialEq)]
pub struct EmptyStatement {
    pub position: NodePosition,
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// Any Java expression. Variants box their payloads to keep the enum small
/// and to break recursion.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Name(Name),
    This(This),
    /// `super` as a method-reference qualifier (`super::m`).
    SuperRef(SuperRef),
    MemberReference(Box<MemberReference>),
    SuperMemberReference(SuperMemberReference),
    MethodInvocation(Box<MethodInvocation>),
    SuperMethodInvocation(Box<SuperMethodInvocation>),
    ExplicitConstructorInvocation(Box<ExplicitConstructorInvocation>),
    ArraySelector(Box<ArraySelector>),
    Cast(Box<Cast>),
    InstanceOf(Box<InstanceOf>),
    Unary(Box<UnaryOperation>),
    Increment(Box<Increment>),
    Decrement(Box<Decrement>),
    Binary(Box<BinaryOperation>),
    Ternary(Box<TernaryExpression>),
    Assignment(Box<Assignment>),
    InstanceCreation(Box<InstanceCreation>),
    InnerClassCreation(Box<InnerClassCreation>),
    ArrayCreation(Box<ArrayCreation>),
    ArrayInitializer(ArrayInitializer),
    MethodReference(Box<MethodReference>),
    Lambda(Box<LambdaExpression>),
    ClassReference(Box<ClassReference>),
    VoidClassReference(VoidClassReference),
}

impl Expression {
    /// Position of the first token of the expression.
    pub fn position(&self) -> NodePosition {
        match self {
            Expression::Literal(e) => e.position,
            Expression::Name(e) => e.position,
            Expression::This(e) => e.position,
            Expression::SuperRef(e) => e.position,
            Expression::MemberReference(e) => e.position,
            Expression::SuperMemberReference(e) => e.position,
            Expression::MethodInvocation(e) => e.position,
            Expression::SuperMethodInvocation(e) => e.position,
            Expression::ExplicitConstructorInvocation(e) => e.position,
            Expression::ArraySelector(e) => e.position,
            Expression::Cast(e) => e.position,
            Expression::InstanceOf(e) => e.position,
            Expression::Unary(e) => e.position,
            Expression::Increment(e) => e.position,
            Expression::Decrement(e) => e.position,
            Expression::Binary(e) => e.position,
            Expression::Ternary(e) => e.position,
            Expression::Assignment(e) => e.position,
            Expression::InstanceCreation(e) => e.position,
            Expression::InnerClassCreation(e) => e.position,
            Expression::ArrayCreation(e) => e.position,
            Expression::ArrayInitializer(e) => e.position,
            Expression::MethodReference(e) => e.position,
            Expression::Lambda(e) => e.position,
            Expression::ClassReference(e) => e.position,
            Expression::VoidClassReference(e) => e.position,
        }
    }
}

/// A literal, with its lexical kind and verbatim text.
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub kind: TokenKind,
    pub value: String,
    pub position: NodePosition,
}

/// A simple identifier in expression position.
#[derive(Clone, Debug, PartialEq)]
pub struct Name {
    pub identifier: String,
    pub position: NodePosition,
}

/// `this` or `Outer.this`.
#[derive(Clone, Debug, PartialEq)]
pub struct This {
    pub qualifier: Option<String>,
    pub position: NodePosition,
}

/// `super` used as a method-reference qualifier.
#[derive(Clone, Debug, PartialEq)]
pub struct SuperRef {
    pub position: NodePosition,
}

/// Field access: `target.member`.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberReference {
    pub target: Expression,
    pub member: String,
    pub position: NodePosition,
}

/// `super.member` or `Outer.super.member`.
#[derive(Clone, Debug, PartialEq)]
pub struct SuperMemberReference {
    pub qualifier: Option<String>,
    pub member: String,
    pub position: NodePosition,
}

/// A method call, possibly with an explicit receiver and type arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodInvocation {
    pub target: Option<Expression>,
    pub type_arguments: Option<Vec<TypeArgument>>,
    pub member: String,
    pub arguments: Vec<Expression>,
    pub position: NodePosition,
}

/// `super.m(args)` or `Outer.super.m(args)`.
#[derive(Clone, Debug, PartialEq)]
pub struct SuperMethodInvocation {
    pub qualifier: Option<String>,
    pub type_arguments: Option<Vec<TypeArgument>>,
    pub member: String,
    pub arguments: Vec<Expression>,
    pub position: NodePosition,
}

/// `this(args)` or `super(args)` inside a constructor.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplicitConstructorInvocation {
    pub kind: ConstructorCallKind,
    pub type_arguments: Option<Vec<TypeArgument>>,
    pub arguments: Vec<Expression>,
    pub position: NodePosition,
}

/// Which constructor an explicit invocation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstructorCallKind {
    This,
    Super,
}

/// Array access: `target[index]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArraySelector {
    pub target: Expression,
    pub index: Expression,
    pub position: NodePosition,
}

/// `(Type) operand`, with optional intersection bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Cast {
    pub target_type: Type,
    /// Additional bounds of an intersection cast `(A & B) x`.
    pub additional_bounds: Vec<ReferenceType>,
    pub operand: Expression,
    pub position: NodePosition,
}

/// `operand instanceof Type`.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceOf {
    pub operand: Expression,
    pub check_type: Type,
    pub position: NodePosition,
}

/// A prefix unary operation: `+ - ! ~`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Expression,
    pub position: NodePosition,
}

/// The prefix unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    BitNot,
}

impl UnaryOperator {
    /// The source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
            UnaryOperator::BitNot => "~",
        }
    }
}

/// `++x` or `x++`.
#[derive(Clone, Debug, PartialEq)]
pub struct Increment {
    pub operand: Expression,
    pub postfix: bool,
    pub position: NodePosition,
}

/// `--x` or `x--`.
#[derive(Clone, Debug, PartialEq)]
pub struct Decrement {
    pub operand: Expression,
    pub postfix: bool,
    pub position: NodePosition,
}

/// A binary operation.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryOperation {
    pub operator: BinaryOperator,
    pub left: Expression,
    pub right: Expression,
    pub position: NodePosition,
}

/// The binary operators, `instanceof` excluded (see [`InstanceOf`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOperator {
    /// Maps an operator lexeme to its binary operator.
    pub fn from_token(text: &str) -> Option<BinaryOperator> {
        Some(match text {
            "||" => BinaryOperator::Or,
            "&&" => BinaryOperator::And,
            "|" => BinaryOperator::BitOr,
            "^" => BinaryOperator::BitXor,
            "&" => BinaryOperator::BitAnd,
            "==" => BinaryOperator::Equal,
            "!=" => BinaryOperator::NotEqual,
            "<" => BinaryOperator::Less,
            ">" => BinaryOperator::Greater,
            "<=" => BinaryOperator::LessEqual,
            ">=" => BinaryOperator::GreaterEqual,
            "<<" => BinaryOperator::ShiftLeft,
            ">>" => BinaryOperator::ShiftRight,
            ">>>" => BinaryOperator::UnsignedShiftRight,
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Subtract,
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "%" => BinaryOperator::Remainder,
            _ => return None,
        })
    }

    /// The source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::UnsignedShiftRight => ">>>",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
        }
    }
}

/// `cond ? a : b`.
#[derive(Clone, Debug, PartialEq)]
pub struct TernaryExpression {
    pub condition: Expression,
    pub if_true: Expression,
    pub if_false: Expression,
    pub position: NodePosition,
}

/// An assignment, simple or compound.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub target: Expression,
    pub operator: AssignmentOperator,
    pub value: Expression,
    pub position: NodePosition,
}

/// The assignment operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
}

impl AssignmentOperator {
    /// Maps an operator lexeme to its assignment operator.
    pub fn from_token(text: &str) -> Option<AssignmentOperator> {
        Some(match text {
            "=" => AssignmentOperator::Assign,
            "+=" => AssignmentOperator::Add,
            "-=" => AssignmentOperator::Subtract,
            "*=" => AssignmentOperator::Multiply,
            "/=" => AssignmentOperator::Divide,
            "%=" => AssignmentOperator::Remainder,
            "&=" => AssignmentOperator::And,
            "|=" => AssignmentOperator::Or,
            "^=" => AssignmentOperator::Xor,
            "<<=" => AssignmentOperator::ShiftLeft,
            ">>=" => AssignmentOperator::ShiftRight,
            ">>>=" => AssignmentOperator::UnsignedShiftRight,
            _ => return None,
        })
    }

    /// The source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::Add => "+=",
            AssignmentOperator::Subtract => "-=",
            AssignmentOperator::Multiply => "*=",
            AssignmentOperator::Divide => "/=",
            AssignmentOperator::Remainder => "%=",
            AssignmentOperator::And => "&=",
            AssignmentOperator::Or => "|=",
            AssignmentOperator::Xor => "^=",
            AssignmentOperator::ShiftLeft => "<<=",
            AssignmentOperator::ShiftRight => ">>=",
            AssignmentOperator::UnsignedShiftRight => ">>>=",
        }
    }
}

/// `new Type<Args>(args)`, with optional anonymous class body.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceCreation {
    /// Explicit constructor type arguments: `new <T> Foo(...)`.
    pub type_arguments: Option<Vec<TypeArgument>>,
    pub created_type: ReferenceType,
    pub arguments: Vec<Expression>,
    pub body: Option<Vec<MemberDeclaration>>,
    pub position: NodePosition,
}

/// `outer.new Inner(args)`.
#[derive(Clone, Debug, PartialEq)]
pub struct InnerClassCreation {
    pub target: Expression,
    pub created_type: ReferenceType,
    pub arguments: Vec<Expression>,
    pub body: Option<Vec<MemberDeclaration>>,
    pub position: NodePosition,
}

/// `new T[dims]` or `new T[]{...}`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayCreation {
    pub element_type: Type,
    /// One entry per `[...]`; `None` for an unsized dimension.
    pub dimensions: Vec<Option<Expression>>,
    pub initializer: Option<ArrayInitializer>,
    pub position: NodePosition,
}

/// `{ a, b, { c } }`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayInitializer {
    pub values: Vec<Expression>,
    pub position: NodePosition,
}

/// A method reference: `X::m`, `X::new`, `X::<T>m`.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodReference {
    pub qualifier: MethodRefQualifier,
    pub type_arguments: Option<Vec<TypeArgument>>,
    /// The referenced name; `"new"` for constructor references.
    pub member: String,
    pub position: NodePosition,
}

/// What a method reference hangs off: an expression or a type.
#[derive(Clone, Debug, PartialEq)]
pub enum MethodRefQualifier {
    Expression(Expression),
    Type(Type),
}

/// A lambda expression.
#[derive(Clone, Debug, PartialEq)]
pub struct LambdaExpression {
    pub parameters: Vec<LambdaParameter>,
    pub body: LambdaBody,
    pub position: NodePosition,
}

/// One lambda parameter, typed or inferred.
#[derive(Clone, Debug, PartialEq)]
pub enum LambdaParameter {
    Inferred(InferredFormalParameter),
    Formal(FormalParameter),
}

/// The body of a lambda.
#[derive(Clone, Debug, PartialEq)]
pub enum LambdaBody {
    Expression(Expression),
    Block(Block),
}

/// `Type.class`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassReference {
    pub target_type: Type,
    pub position: NodePosition,
}

/// `void.class`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoidClassReference {
    pub position: NodePosition,
}

#[cfg(test)]
mod tests {
    use super::*;
    use javelin_util::Position;

    #[test]
    fn test_modifier_round_trip() {
        for text in [
            "public",
            "protected",
            "private",
            "static",
            "final",
            "abstract",
            "native",
            "synchronized",
            "transient",
            "volatile",
            "strictfp",
            "default",
        ] {
            let modifier = Modifier::from_keyword(text).unwrap();
            assert_eq!(modifier.as_str(), text);
        }
        assert!(Modifier::from_keyword("class").is_none());
    }

    #[test]
    fn test_modifier_set_deduplicates() {
        let mut set = ModifierSet::new();
        set.insert(Modifier::Public);
        set.insert(Modifier::Static);
        set.insert(Modifier::Public);
        assert_eq!(set.len(), 2);
        let order: Vec<_> = set.iter().copied().collect();
        assert_eq!(order, vec![Modifier::Public, Modifier::Static]);
    }

    #[test]
    fn test_primitive_round_trip() {
        for text in ["byte", "short", "int", "long", "float", "double", "boolean", "char"] {
            assert_eq!(PrimitiveKind::from_keyword(text).unwrap().as_str(), text);
        }
        assert!(PrimitiveKind::from_keyword("void").is_none());
    }

    #[test]
    fn test_operator_round_trip() {
        for text in [
            "||", "&&", "|", "^", "&", "==", "!=", "<", ">", "<=", ">=", "<<", ">>", ">>>",
            "+", "-", "*", "/", "%",
        ] {
            assert_eq!(BinaryOperator::from_token(text).unwrap().as_str(), text);
        }
        assert!(BinaryOperator::from_token("=").is_none());
        for text in [
            "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", ">>>=",
        ] {
            assert_eq!(AssignmentOperator::from_token(text).unwrap().as_str(), text);
        }
        assert!(AssignmentOperator::from_token("==").is_none());
    }

    #[test]
    fn test_structural_equality_ignores_positions() {
        let a = Name {
            identifier: "x".to_string(),
            position: Position::new(1, 1).into(),
        };
        let b = Name {
            identifier: "x".to_string(),
            position: Position::new(40, 2).into(),
        };
        assert_eq!(a, b);

        let c = Name {
            identifier: "y".to_string(),
            position: Position::new(1, 1).into(),
        };
        assert_ne!(a, c);
    }

    #[test]
    fn test_type_with_extra_dimensions() {
        let ty = Type::Basic(BasicType {
            annotations: Vec::new(),
            name: PrimitiveKind::Int,
            dimensions: 1,
            position: NodePosition::default(),
        });
        let ty = ty.with_extra_dimensions(2);
        assert_eq!(ty.dimensions(), 3);
    }
}
