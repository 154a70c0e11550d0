//! Uniform AST traversal.
//!
//! Every node variant is viewable as a [`NodeRef`], a cheap typed handle
//! with a matching [`NodeKind`]. Each node exposes its node-valued
//! attributes through [`NodeRef::children`], which yields
//! `(attribute-name, child-or-child-list)` pairs in declaration order.
//! On top of that sit the two guaranteed operations: [`walk`] (pre-order,
//! with ancestor paths) and [`filter`] / [`filter_kind`] (search by node
//! kind, self included).

use rustc_hash::FxHashSet;

use javelin_util::Position;

use crate::ast::*;

/// Declares the node universe: one `NodeRef` and one `NodeKind` variant
/// per node struct, plus the kind and position projections.
macro_rules! define_nodes {
    ($($variant:ident => $ty:ty,)+) => {
        /// A typed reference to any AST node.
        #[derive(Clone, Copy, Debug)]
        pub enum NodeRef<'a> {
            $($variant(&'a $ty),)+
        }

        /// The runtime variant of a node.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($variant,)+
        }

        impl<'a> NodeRef<'a> {
            /// The runtime variant of this node.
            pub fn kind(self) -> NodeKind {
                match self {
                    $(NodeRef::$variant(_) => NodeKind::$variant,)+
                }
            }

            /// Position of the node's first significant token.
            pub fn position(self) -> Position {
                match self {
                    $(NodeRef::$variant(node) => node.position.get(),)+
                }
            }
        }
    };
}

define_nodes! {
    CompilationUnit => CompilationUnit,
    PackageDeclaration => PackageDeclaration,
    Import => Import,
    ClassDeclaration => ClassDeclaration,
    InterfaceDeclaration => InterfaceDeclaration,
    EnumDeclaration => EnumDeclaration,
    AnnotationDeclaration => AnnotationDeclaration,
    EnumConstantDeclaration => EnumConstantDeclaration,
    FieldDeclaration => FieldDeclaration,
    VariableDeclarator => VariableDeclarator,
    MethodDeclaration => MethodDeclaration,
    ConstructorDeclaration => ConstructorDeclaration,
    AnnotationMethod => AnnotationMethod,
    InitializerBlock => InitializerBlock,
    FormalParameter => FormalParameter,
    InferredFormalParameter => InferredFormalParameter,
    LocalVariableDeclaration => LocalVariableDeclaration,
    BasicType => BasicType,
    ReferenceType => ReferenceType,
    WildcardType => WildcardType,
    TypeParameter => TypeParameter,
    Annotation => Annotation,
    ElementValuePair => ElementValuePair,
    ElementArrayValue => ElementArrayValue,
    Block => Block,
    IfStatement => IfStatement,
    WhileStatement => WhileStatement,
    DoWhileStatement => DoWhileStatement,
    ForStatement => ForStatement,
    ForEachStatement => ForEachStatement,
    SwitchStatement => SwitchStatement,
    SwitchCase => SwitchCase,
    BreakStatement => BreakStatement,
    ContinueStatement => ContinueStatement,
    ReturnStatement => ReturnStatement,
    ThrowStatement => ThrowStatement,
    TryStatement => TryStatement,
    TryResource => TryResource,
    CatchClause => CatchClause,
    CatchParameter => CatchParameter,
    SynchronizedStatement => SynchronizedStatement,
    ExpressionStatement => ExpressionStatement,
    AssertStatement => AssertStatement,
    LabeledStatement => LabeledStatement,
    EmptyStatement => EmptyStatement,
    Literal => Literal,
    Name => Name,
    This => This,
    SuperRef => SuperRef,
    MemberReference => MemberReference,
    SuperMemberReference => SuperMemberReference,
    MethodInvocation => MethodInvocation,
    SuperMethodInvocation => SuperMethodInvocation,
    ExplicitConstructorInvocation => ExplicitConstructorInvocation,
    ArraySelector => ArraySelector,
    Cast => Cast,
    InstanceOf => InstanceOf,
    UnaryOperation => UnaryOperation,
    Increment => Increment,
    Decrement => Decrement,
    BinaryOperation => BinaryOperation,
    TernaryExpression => TernaryExpression,
    Assignment => Assignment,
    InstanceCreation => InstanceCreation,
    InnerClassCreation => InnerClassCreation,
    ArrayCreation => ArrayCreation,
    ArrayInitializer => ArrayInitializer,
    MethodReference => MethodReference,
    LambdaExpression => LambdaExpression,
    ClassReference => ClassReference,
    VoidClassReference => VoidClassReference,
}

/// A node-valued attribute: a single child or an ordered child list.
#[derive(Clone, Debug)]
pub enum Child<'a> {
    Node(NodeRef<'a>),
    Nodes(Vec<NodeRef<'a>>),
}

// =============================================================================
// ENUM-TO-NODE PROJECTIONS
// =============================================================================

/// Views an expression as a node reference.
pub fn expression_ref(expr: &Expression) -> NodeRef<'_> {
    match expr {
        Expression::Literal(e) => NodeRef::Literal(e),
        Expression::Name(e) => NodeRef::Name(e),
        Expression::This(e) => NodeRef::This(e),
        Expression::SuperRef(e) => NodeRef::SuperRef(e),
        Expression::MemberReference(e) => NodeRef::MemberReference(e),
        Expression::SuperMemberReference(e) => NodeRef::SuperMemberReference(e),
        Expression::MethodInvocation(e) => NodeRef::MethodInvocation(e),
        Expression::SuperMethodInvocation(e) => NodeRef::SuperMethodInvocation(e),
        Expression::ExplicitConstructorInvocation(e) => {
            NodeRef::ExplicitConstructorInvocation(e)
        }
        Expression::ArraySelector(e) => NodeRef::ArraySelector(e),
        Expression::Cast(e) => NodeRef::Cast(e),
        Expression::InstanceOf(e) => NodeRef::InstanceOf(e),
        Expression::Unary(e) => NodeRef::UnaryOperation(e),
        Expression::Increment(e) => NodeRef::Increment(e),
        Expression::Decrement(e) => NodeRef::Decrement(e),
        Expression::Binary(e) => NodeRef::BinaryOperation(e),
        Expression::Ternary(e) => NodeRef::TernaryExpression(e),
        Expression::Assignment(e) => NodeRef::Assignment(e),
        Expression::InstanceCreation(e) => NodeRef::InstanceCreation(e),
        Expression::InnerClassCreation(e) => NodeRef::InnerClassCreation(e),
        Expression::ArrayCreation(e) => NodeRef::ArrayCreation(e),
        Expression::ArrayInitializer(e) => NodeRef::ArrayInitializer(e),
        Expression::MethodReference(e) => NodeRef::MethodReference(e),
        Expression::Lambda(e) => NodeRef::LambdaExpression(e),
        Expression::ClassReference(e) => NodeRef::ClassReference(e),
        Expression::VoidClassReference(e) => NodeRef::VoidClassReference(e),
    }
}

/// Views a statement as a node reference.
pub fn statement_ref(stmt: &Statement) -> NodeRef<'_> {
    match stmt {
        Statement::Block(s) => NodeRef::Block(s),
        Statement::If(s) => NodeRef::IfStatement(s),
        Statement::While(s) => NodeRef::WhileStatement(s),
        Statement::DoWhile(s) => NodeRef::DoWhileStatement(s),
        Statement::For(s) => NodeRef::ForStatement(s),
        Statement::ForEach(s) => NodeRef::ForEachStatement(s),
        Statement::Switch(s) => NodeRef::SwitchStatement(s),
        Statement::Break(s) => NodeRef::BreakStatement(s),
        Statement::Continue(s) => NodeRef::ContinueStatement(s),
        Statement::Return(s) => NodeRef::ReturnStatement(s),
        Statement::Throw(s) => NodeRef::ThrowStatement(s),
        Statement::Try(s) => NodeRef::TryStatement(s),
        Statement::Synchronized(s) => NodeRef::SynchronizedStatement(s),
        Statement::LocalVariable(s) => NodeRef::LocalVariableDeclaration(s),
        Statement::Expression(s) => NodeRef::ExpressionStatement(s),
        Statement::Assert(s) => NodeRef::AssertStatement(s),
        Statement::Labeled(s) => NodeRef::LabeledStatement(s),
        Statement::Empty(s) => NodeRef::EmptyStatement(s),
        Statement::LocalType(s) => type_declaration_ref(s),
    }
}

/// Views a type use as a node reference.
pub fn type_ref(ty: &Type) -> NodeRef<'_> {
    match ty {
        Type::Basic(t) => NodeRef::BasicType(t),
        Type::Reference(t) => NodeRef::ReferenceType(t),
    }
}

/// Views a type declaration as a node reference.
pub fn type_declaration_ref(decl: &TypeDeclaration) -> NodeRef<'_> {
    match decl {
        TypeDeclaration::Class(d) => NodeRef::ClassDeclaration(d),
        TypeDeclaration::Interface(d) => NodeRef::InterfaceDeclaration(d),
        TypeDeclaration::Enum(d) => NodeRef::EnumDeclaration(d),
        TypeDeclaration::Annotation(d) => NodeRef::AnnotationDeclaration(d),
    }
}

/// Views a member declaration as a node reference.
pub fn member_ref(member: &MemberDeclaration) -> NodeRef<'_> {
    match member {
        MemberDeclaration::Field(m) => NodeRef::FieldDeclaration(m),
        MemberDeclaration::Method(m) => NodeRef::MethodDeclaration(m),
        MemberDeclaration::Constructor(m) => NodeRef::ConstructorDeclaration(m),
        MemberDeclaration::AnnotationMethod(m) => NodeRef::AnnotationMethod(m),
        MemberDeclaration::Type(m) => type_declaration_ref(m),
        MemberDeclaration::Initializer(m) => NodeRef::InitializerBlock(m),
    }
}

fn element_value_ref(value: &ElementValue) -> NodeRef<'_> {
    match value {
        ElementValue::Expression(e) => expression_ref(e),
        ElementValue::Annotation(a) => NodeRef::Annotation(a),
        ElementValue::Array(a) => NodeRef::ElementArrayValue(a),
    }
}

fn type_argument_refs(args: &[TypeArgument]) -> Vec<NodeRef<'_>> {
    args.iter()
        .map(|arg| match arg {
            TypeArgument::Concrete(ty) => type_ref(ty),
            TypeArgument::Wildcard(w) => NodeRef::WildcardType(w),
        })
        .collect()
}

fn annotation_refs(annotations: &[Annotation]) -> Vec<NodeRef<'_>> {
    annotations.iter().map(NodeRef::Annotation).collect()
}

fn expression_refs(exprs: &[Expression]) -> Vec<NodeRef<'_>> {
    exprs.iter().map(expression_ref).collect()
}

fn statement_refs(stmts: &[Statement]) -> Vec<NodeRef<'_>> {
    stmts.iter().map(statement_ref).collect()
}

fn member_refs(members: &[MemberDeclaration]) -> Vec<NodeRef<'_>> {
    members.iter().map(member_ref).collect()
}

fn reference_type_refs(types: &[ReferenceType]) -> Vec<NodeRef<'_>> {
    types.iter().map(NodeRef::ReferenceType).collect()
}

// =============================================================================
// CHILD ITERATION
// =============================================================================

impl<'a> NodeRef<'a> {
    /// The node-valued attributes of this node, in declaration order.
    ///
    /// Attributes that are `None` or plain data (names, modifier sets,
    /// literal text) are not yielded.
    pub fn children(self) -> Vec<(&'static str, Child<'a>)> {
        let mut out: Vec<(&'static str, Child<'a>)> = Vec::new();

        fn one<'a>(
            out: &mut Vec<(&'static str, Child<'a>)>,
            name: &'static str,
            node: NodeRef<'a>,
        ) {
            out.push((name, Child::Node(node)));
        }

        fn many<'a>(
            out: &mut Vec<(&'static str, Child<'a>)>,
            name: &'static str,
            nodes: Vec<NodeRef<'a>>,
        ) {
            if !nodes.is_empty() {
                out.push((name, Child::Nodes(nodes)));
            }
        }

        match self {
            NodeRef::CompilationUnit(n) => {
                if let Some(package) = &n.package {
                    one(&mut out, "package", NodeRef::PackageDeclaration(package));
                }
                many(&mut out, "imports", n.imports.iter().map(NodeRef::Import).collect());
                many(
                    &mut out,
                    "types",
                    n.types.iter().map(type_declaration_ref).collect(),
                );
            }
            NodeRef::PackageDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
            }
            NodeRef::Import(_) => {}
            NodeRef::ClassDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                many(
                    &mut out,
                    "type_parameters",
                    n.type_parameters.iter().map(NodeRef::TypeParameter).collect(),
                );
                if let Some(extends) = &n.extends {
                    one(&mut out, "extends", NodeRef::ReferenceType(extends));
                }
                many(&mut out, "implements", reference_type_refs(&n.implements));
                many(&mut out, "body", member_refs(&n.body));
            }
            NodeRef::InterfaceDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                many(
                    &mut out,
                    "type_parameters",
                    n.type_parameters.iter().map(NodeRef::TypeParameter).collect(),
                );
                many(&mut out, "extends", reference_type_refs(&n.extends));
                many(&mut out, "body", member_refs(&n.body));
            }
            NodeRef::EnumDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                many(&mut out, "implements", reference_type_refs(&n.implements));
                many(
                    &mut out,
                    "constants",
                    n.constants
                        .iter()
                        .map(NodeRef::EnumConstantDeclaration)
                        .collect(),
                );
                many(&mut out, "body", member_refs(&n.body));
            }
            NodeRef::AnnotationDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                many(&mut out, "body", member_refs(&n.body));
            }
            NodeRef::EnumConstantDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                many(&mut out, "arguments", expression_refs(&n.arguments));
                if let Some(body) = &n.body {
                    many(&mut out, "body", member_refs(body));
                }
            }
            NodeRef::FieldDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                one(&mut out, "field_type", type_ref(&n.field_type));
                many(
                    &mut out,
                    "declarators",
                    n.declarators.iter().map(NodeRef::VariableDeclarator).collect(),
                );
            }
            NodeRef::VariableDeclarator(n) => {
                if let Some(init) = &n.initializer {
                    one(&mut out, "initializer", expression_ref(init));
                }
            }
            NodeRef::MethodDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                many(
                    &mut out,
                    "type_parameters",
                    n.type_parameters.iter().map(NodeRef::TypeParameter).collect(),
                );
                if let Some(return_type) = &n.return_type {
                    one(&mut out, "return_type", type_ref(return_type));
                }
                many(
                    &mut out,
                    "parameters",
                    n.parameters.iter().map(NodeRef::FormalParameter).collect(),
                );
                many(&mut out, "throws", reference_type_refs(&n.throws));
                if let Some(body) = &n.body {
                    one(&mut out, "body", NodeRef::Block(body));
                }
            }
            NodeRef::ConstructorDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                many(
                    &mut out,
                    "type_parameters",
                    n.type_parameters.iter().map(NodeRef::TypeParameter).collect(),
                );
                many(
                    &mut out,
                    "parameters",
                    n.parameters.iter().map(NodeRef::FormalParameter).collect(),
                );
                many(&mut out, "throws", reference_type_refs(&n.throws));
                one(&mut out, "body", NodeRef::Block(&n.body));
            }
            NodeRef::AnnotationMethod(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                one(&mut out, "return_type", type_ref(&n.return_type));
                if let Some(default) = &n.default {
                    one(&mut out, "default", element_value_ref(default));
                }
            }
            NodeRef::InitializerBlock(n) => {
                one(&mut out, "block", NodeRef::Block(&n.block));
            }
            NodeRef::FormalParameter(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                one(&mut out, "param_type", type_ref(&n.param_type));
            }
            NodeRef::InferredFormalParameter(_) => {}
            NodeRef::LocalVariableDeclaration(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                one(&mut out, "declared_type", type_ref(&n.declared_type));
                many(
                    &mut out,
                    "declarators",
                    n.declarators.iter().map(NodeRef::VariableDeclarator).collect(),
                );
            }
            NodeRef::BasicType(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
            }
            NodeRef::ReferenceType(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                if let Some(args) = &n.type_arguments {
                    many(&mut out, "type_arguments", type_argument_refs(args));
                }
                if let Some(sub_type) = &n.sub_type {
                    one(&mut out, "sub_type", NodeRef::ReferenceType(sub_type));
                }
            }
            NodeRef::WildcardType(n) => {
                if let Some((_, bound)) = &n.bound {
                    one(&mut out, "bound", type_ref(bound));
                }
            }
            NodeRef::TypeParameter(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                many(&mut out, "extends", reference_type_refs(&n.extends));
            }
            NodeRef::Annotation(n) => match &n.element {
                Some(AnnotationElement::Pairs(pairs)) => {
                    many(
                        &mut out,
                        "element",
                        pairs.iter().map(NodeRef::ElementValuePair).collect(),
                    );
                }
                Some(AnnotationElement::Value(value)) => {
                    one(&mut out, "element", element_value_ref(value));
                }
                None => {}
            },
            NodeRef::ElementValuePair(n) => {
                one(&mut out, "value", element_value_ref(&n.value));
            }
            NodeRef::ElementArrayValue(n) => {
                many(
                    &mut out,
                    "values",
                    n.values.iter().map(element_value_ref).collect(),
                );
            }
            NodeRef::Block(n) => {
                many(&mut out, "statements", statement_refs(&n.statements));
            }
            NodeRef::IfStatement(n) => {
                one(&mut out, "condition", expression_ref(&n.condition));
                one(&mut out, "then_branch", statement_ref(&n.then_branch));
                if let Some(else_branch) = &n.else_branch {
                    one(&mut out, "else_branch", statement_ref(else_branch));
                }
            }
            NodeRef::WhileStatement(n) => {
                one(&mut out, "condition", expression_ref(&n.condition));
                one(&mut out, "body", statement_ref(&n.body));
            }
            NodeRef::DoWhileStatement(n) => {
                one(&mut out, "body", statement_ref(&n.body));
                one(&mut out, "condition", expression_ref(&n.condition));
            }
            NodeRef::ForStatement(n) => {
                match &n.init {
                    Some(ForInit::Declaration(decl)) => {
                        one(&mut out, "init", NodeRef::LocalVariableDeclaration(decl));
                    }
                    Some(ForInit::Expressions(exprs)) => {
                        many(&mut out, "init", expression_refs(exprs));
                    }
                    None => {}
                }
                if let Some(condition) = &n.condition {
                    one(&mut out, "condition", expression_ref(condition));
                }
                many(&mut out, "update", expression_refs(&n.update));
                one(&mut out, "body", statement_ref(&n.body));
            }
            NodeRef::ForEachStatement(n) => {
                one(
                    &mut out,
                    "variable",
                    NodeRef::LocalVariableDeclaration(&n.variable),
                );
                one(&mut out, "iterable", expression_ref(&n.iterable));
                one(&mut out, "body", statement_ref(&n.body));
            }
            NodeRef::SwitchStatement(n) => {
                one(&mut out, "expression", expression_ref(&n.expression));
                many(
                    &mut out,
                    "cases",
                    n.cases.iter().map(NodeRef::SwitchCase).collect(),
                );
            }
            NodeRef::SwitchCase(n) => {
                many(
                    &mut out,
                    "labels",
                    n.labels
                        .iter()
                        .filter_map(|label| match label {
                            SwitchLabel::Constant(expr) => Some(expression_ref(expr)),
                            SwitchLabel::Default => None,
                        })
                        .collect(),
                );
                many(&mut out, "statements", statement_refs(&n.statements));
            }
            NodeRef::BreakStatement(_) | NodeRef::ContinueStatement(_) => {}
            NodeRef::ReturnStatement(n) => {
                if let Some(value) = &n.value {
                    one(&mut out, "value", expression_ref(value));
                }
            }
            NodeRef::ThrowStatement(n) => {
                one(&mut out, "value", expression_ref(&n.value));
            }
            NodeRef::TryStatement(n) => {
                many(
                    &mut out,
                    "resources",
                    n.resources.iter().map(NodeRef::TryResource).collect(),
                );
                one(&mut out, "block", NodeRef::Block(&n.block));
                many(
                    &mut out,
                    "catches",
                    n.catches.iter().map(NodeRef::CatchClause).collect(),
                );
                if let Some(finally_block) = &n.finally_block {
                    one(&mut out, "finally_block", NodeRef::Block(finally_block));
                }
            }
            NodeRef::TryResource(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                one(&mut out, "resource_type", type_ref(&n.resource_type));
                one(&mut out, "value", expression_ref(&n.value));
            }
            NodeRef::CatchClause(n) => {
                one(&mut out, "parameter", NodeRef::CatchParameter(&n.parameter));
                one(&mut out, "block", NodeRef::Block(&n.block));
            }
            NodeRef::CatchParameter(n) => {
                many(&mut out, "annotations", annotation_refs(&n.annotations));
                many(&mut out, "types", reference_type_refs(&n.types));
            }
            NodeRef::SynchronizedStatement(n) => {
                one(&mut out, "lock", expression_ref(&n.lock));
                one(&mut out, "block", NodeRef::Block(&n.block));
            }
            NodeRef::ExpressionStatement(n) => {
                one(&mut out, "expression", expression_ref(&n.expression));
            }
            NodeRef::AssertStatement(n) => {
                one(&mut out, "condition", expression_ref(&n.condition));
                if let Some(message) = &n.message {
                    one(&mut out, "message", expression_ref(message));
                }
            }
            NodeRef::LabeledStatement(n) => {
                one(&mut out, "statement", statement_ref(&n.statement));
            }
            NodeRef::EmptyStatement(_) => {}
            NodeRef::Literal(_)
            | NodeRef::Name(_)
            | NodeRef::This(_)
            | NodeRef::SuperRef(_)
            | NodeRef::SuperMemberReference(_)
            | NodeRef::VoidClassReference(_) => {}
            NodeRef::MemberReference(n) => {
                one(&mut out, "target", expression_ref(&n.target));
            }
            NodeRef::MethodInvocation(n) => {
                if let Some(target) = &n.target {
                    one(&mut out, "target", expression_ref(target));
                }
                if let Some(args) = &n.type_arguments {
                    many(&mut out, "type_arguments", type_argument_refs(args));
                }
                many(&mut out, "arguments", expression_refs(&n.arguments));
            }
            NodeRef::SuperMethodInvocation(n) => {
                if let Some(args) = &n.type_arguments {
                    many(&mut out, "type_arguments", type_argument_refs(args));
                }
                many(&mut out, "arguments", expression_refs(&n.arguments));
            }
            NodeRef::ExplicitConstructorInvocation(n) => {
                if let Some(args) = &n.type_arguments {
                    many(&mut out, "type_arguments", type_argument_refs(args));
                }
                many(&mut out, "arguments", expression_refs(&n.arguments));
            }
            NodeRef::ArraySelector(n) => {
                one(&mut out, "target", expression_ref(&n.target));
                one(&mut out, "index", expression_ref(&n.index));
            }
            NodeRef::Cast(n) => {
                one(&mut out, "target_type", type_ref(&n.target_type));
                many(
                    &mut out,
                    "additional_bounds",
                    reference_type_refs(&n.additional_bounds),
                );
                one(&mut out, "operand", expression_ref(&n.operand));
            }
            NodeRef::InstanceOf(n) => {
                one(&mut out, "operand", expression_ref(&n.operand));
                one(&mut out, "check_type", type_ref(&n.check_type));
            }
            NodeRef::UnaryOperation(n) => {
                one(&mut out, "operand", expression_ref(&n.operand));
            }
            NodeRef::Increment(n) => {
                one(&mut out, "operand", expression_ref(&n.operand));
            }
            NodeRef::Decrement(n) => {
                one(&mut out, "operand", expression_ref(&n.operand));
            }
            NodeRef::BinaryOperation(n) => {
                one(&mut out, "left", expression_ref(&n.left));
                one(&mut out, "right", expression_ref(&n.right));
            }
            NodeRef::TernaryExpression(n) => {
                one(&mut out, "condition", expression_ref(&n.condition));
                one(&mut out, "if_true", expression_ref(&n.if_true));
                one(&mut out, "if_false", expression_ref(&n.if_false));
            }
            NodeRef::Assignment(n) => {
                one(&mut out, "target", expression_ref(&n.target));
                one(&mut out, "value", expression_ref(&n.value));
            }
            NodeRef::InstanceCreation(n) => {
                if let Some(args) = &n.type_arguments {
                    many(&mut out, "type_arguments", type_argument_refs(args));
                }
                one(&mut out, "created_type", NodeRef::ReferenceType(&n.created_type));
                many(&mut out, "arguments", expression_refs(&n.arguments));
                if let Some(body) = &n.body {
                    many(&mut out, "body", member_refs(body));
                }
            }
            NodeRef::InnerClassCreation(n) => {
                one(&mut out, "target", expression_ref(&n.target));
                one(&mut out, "created_type", NodeRef::ReferenceType(&n.created_type));
                many(&mut out, "arguments", expression_refs(&n.arguments));
                if let Some(body) = &n.body {
                    many(&mut out, "body", member_refs(body));
                }
            }
            NodeRef::ArrayCreation(n) => {
                one(&mut out, "element_type", type_ref(&n.element_type));
                many(
                    &mut out,
                    "dimensions",
                    n.dimensions
                        .iter()
                        .filter_map(|dim| dim.as_ref().map(expression_ref))
                        .collect(),
                );
                if let Some(init) = &n.initializer {
                    one(&mut out, "initializer", NodeRef::ArrayInitializer(init));
                }
            }
            NodeRef::ArrayInitializer(n) => {
                many(&mut out, "values", expression_refs(&n.values));
            }
            NodeRef::MethodReference(n) => {
                match &n.qualifier {
                    MethodRefQualifier::Expression(expr) => {
                        one(&mut out, "qualifier", expression_ref(expr));
                    }
                    MethodRefQualifier::Type(ty) => {
                        one(&mut out, "qualifier", type_ref(ty));
                    }
                }
                if let Some(args) = &n.type_arguments {
                    many(&mut out, "type_arguments", type_argument_refs(args));
                }
            }
            NodeRef::LambdaExpression(n) => {
                many(
                    &mut out,
                    "parameters",
                    n.parameters
                        .iter()
                        .map(|param| match param {
                            LambdaParameter::Inferred(p) => {
                                NodeRef::InferredFormalParameter(p)
                            }
                            LambdaParameter::Formal(p) => NodeRef::FormalParameter(p),
                        })
                        .collect(),
                );
                match &n.body {
                    LambdaBody::Expression(expr) => {
                        one(&mut out, "body", expression_ref(expr));
                    }
                    LambdaBody::Block(block) => {
                        one(&mut out, "body", NodeRef::Block(block));
                    }
                }
            }
            NodeRef::ClassReference(n) => {
                one(&mut out, "target_type", type_ref(&n.target_type));
            }
        }

        out
    }
}

impl<'a> From<&'a CompilationUnit> for NodeRef<'a> {
    fn from(unit: &'a CompilationUnit) -> Self {
        NodeRef::CompilationUnit(unit)
    }
}

// =============================================================================
// WALK AND FILTER
// =============================================================================

/// Pre-order traversal yielding `(path, node)`, where `path` is the list
/// of ancestors from the root down to (excluding) the node itself.
pub fn walk(root: NodeRef<'_>) -> Walk<'_> {
    Walk {
        stack: vec![(root, 0)],
        path: Vec::new(),
    }
}

/// Iterator state for [`walk`].
pub struct Walk<'a> {
    stack: Vec<(NodeRef<'a>, usize)>,
    path: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (Vec<NodeRef<'a>>, NodeRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.path.truncate(depth);
        let path = self.path.clone();

        let mut children = Vec::new();
        for (_, child) in node.children() {
            match child {
                Child::Node(n) => children.push(n),
                Child::Nodes(ns) => children.extend(ns),
            }
        }
        for child in children.into_iter().rev() {
            self.stack.push((child, depth + 1));
        }

        self.path.push(node);
        Some((path, node))
    }
}

/// All descendants of `root` (self included) whose kind is in `kinds`,
/// in pre-order.
pub fn filter<'a>(
    root: NodeRef<'a>,
    kinds: FxHashSet<NodeKind>,
) -> impl Iterator<Item = NodeRef<'a>> {
    walk(root)
        .map(|(_, node)| node)
        .filter(move |node| kinds.contains(&node.kind()))
}

/// All descendants of `root` (self included) of a single kind, in
/// pre-order.
pub fn filter_kind(root: NodeRef<'_>, kind: NodeKind) -> impl Iterator<Item = NodeRef<'_>> {
    walk(root)
        .map(|(_, node)| node)
        .filter(move |node| node.kind() == kind)
}
