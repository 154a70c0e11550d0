//! Expression parsing.
//!
//! Binary operators use precedence climbing over a fixed table; selectors
//! (`.`, `[]`, `(args)`, `::`, postfix `++`/`--`) wrap the target in a
//! loop after the primary. The locally ambiguous constructs are settled
//! here:
//!
//! - **Cast vs. parentheses**: after `(`, speculatively parse a type and
//!   `)`; commit only if the next token can begin the cast operand. A
//!   primitive cast accepts any unary start (`(int) -x`), a reference
//!   cast only tokens that cannot continue a binary expression, which is
//!   what makes `(a) + b` an addition and `(Integer) + x` a cast.
//! - **Lambda vs. parentheses**: scan ahead to the matching `)` and check
//!   for `->` before committing to a lambda.
//! - **Type arguments vs. `<`**: an identifier followed by `<` is only a
//!   type if the speculative argument list closes and `::` follows
//!   (`List<String>::new`); otherwise `<` is the less-than operator.
//! - **Generic invocation**: after `.`, a `<` always introduces explicit
//!   type arguments for the following call.

use javelin_lex::TokenKind;
use javelin_util::{NodePosition, ParserError};

use crate::ast::*;
use crate::Parser;

/// Precedence of the relational operators, where `instanceof` also sits.
const RELATIONAL: u8 = 7;

impl Parser {
    /// Parses a full expression, assignments included.
    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        let position = self.node_position();
        let target = self.parse_ternary_expression()?;
        if self.peek().kind == TokenKind::Operator {
            if let Some(operator) = AssignmentOperator::from_token(&self.peek().value) {
                self.next_token();
                let value = self.parse_expression()?; // right-associative
                return Ok(Expression::Assignment(Box::new(Assignment {
                    target,
                    operator,
                    value,
                    position,
                })));
            }
        }
        Ok(target)
    }

    /// Parses a conditional expression (no assignment), the grammar used
    /// by annotation element values and `case` labels.
    pub(crate) fn parse_ternary_expression(&mut self) -> Result<Expression, ParserError> {
        let position = self.node_position();
        let condition = self.parse_binary_expression(0)?;
        if self.accept_operator("?") {
            let if_true = self.parse_expression()?;
            self.expect_operator(":")?;
            let if_false = self.parse_ternary_expression()?;
            return Ok(Expression::Ternary(Box::new(TernaryExpression {
                condition,
                if_true,
                if_false,
                position,
            })));
        }
        Ok(condition)
    }

    // =========================================================================
    // BINARY OPERATORS
    // =========================================================================

    /// Precedence climbing; all binary operators are left-associative.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> Result<Expression, ParserError> {
        let position = self.node_position();
        let mut left = self.parse_unary_expression()?;
        loop {
            if self.check_keyword("instanceof") && RELATIONAL >= min_precedence {
                self.next_token();
                let check_type = self.parse_type()?;
                left = Expression::InstanceOf(Box::new(InstanceOf {
                    operand: left,
                    check_type,
                    position,
                }));
                continue;
            }

            let Some(precedence) = self.binary_precedence() else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            let operator =
                BinaryOperator::from_token(&self.peek().value).expect("precedence table entry");
            self.next_token();
            let right = self.parse_binary_expression(precedence + 1)?;
            left = Expression::Binary(Box::new(BinaryOperation {
                operator,
                left,
                right,
                position,
            }));
        }
        Ok(left)
    }

    /// The precedence of the operator under the cursor, if it is binary.
    fn binary_precedence(&self) -> Option<u8> {
        if self.peek().kind != TokenKind::Operator {
            return None;
        }
        Some(match self.peek().value.as_str() {
            "||" => 1,
            "&&" => 2,
            "|" => 3,
            "^" => 4,
            "&" => 5,
            "==" | "!=" => 6,
            "<" | ">" | "<=" | ">=" => RELATIONAL,
            "<<" | ">>" | ">>>" => 8,
            "+" | "-" => 9,
            "*" | "/" | "%" => 10,
            _ => return None,
        })
    }

    // =========================================================================
    // UNARY AND CAST
    // =========================================================================

    fn parse_unary_expression(&mut self) -> Result<Expression, ParserError> {
        let position = self.node_position();

        if self.accept_operator("++") {
            let operand = self.parse_unary_expression()?;
            return Ok(Expression::Increment(Box::new(Increment {
                operand,
                postfix: false,
                position,
            })));
        }
        if self.accept_operator("--") {
            let operand = self.parse_unary_expression()?;
            return Ok(Expression::Decrement(Box::new(Decrement {
                operand,
                postfix: false,
                position,
            })));
        }

        if self.peek().kind == TokenKind::Operator {
            let operator = match self.peek().value.as_str() {
                "+" => Some(UnaryOperator::Plus),
                "-" => Some(UnaryOperator::Minus),
                "!" => Some(UnaryOperator::Not),
                "~" => Some(UnaryOperator::BitNot),
                _ => None,
            };
            if let Some(operator) = operator {
                self.next_token();
                let operand = self.parse_unary_expression()?;
                return Ok(Expression::Unary(Box::new(UnaryOperation {
                    operator,
                    operand,
                    position,
                })));
            }
        }

        if self.check_separator("(") {
            if let Some(cast) = self.try_parse_cast() {
                return Ok(cast);
            }
        }

        self.parse_postfix_expression()
    }

    /// Speculative cast: `(` type `)` followed by a plausible operand.
    fn try_parse_cast(&mut self) -> Option<Expression> {
        self.try_parse(|p| {
            let position = p.node_position();
            p.expect_separator("(")?;
            let target_type = p.parse_type()?;
            let mut additional_bounds = Vec::new();
            while p.accept_operator("&") {
                additional_bounds.push(p.parse_reference_type()?);
            }
            p.expect_separator(")")?;

            let primitive = matches!(&target_type, Type::Basic(b) if b.dimensions == 0)
                && additional_bounds.is_empty();
            if !p.cast_operand_follows(primitive) {
                return p.error("cast operand");
            }

            let operand = p.parse_unary_expression()?;
            Ok(Expression::Cast(Box::new(Cast {
                target_type,
                additional_bounds,
                operand,
                position,
            })))
        })
    }

    /// Can the current token begin the operand of a cast?
    fn cast_operand_follows(&self, primitive: bool) -> bool {
        let token = self.peek();
        match token.kind {
            TokenKind::Identifier => true,
            kind if kind.is_literal() => true,
            TokenKind::Separator => token.value == "(",
            TokenKind::Keyword => {
                matches!(token.value.as_str(), "new" | "this" | "super" | "void")
                    || PrimitiveKind::from_keyword(&token.value).is_some()
            }
            TokenKind::Operator => {
                if primitive {
                    matches!(token.value.as_str(), "+" | "-" | "++" | "--" | "!" | "~")
                } else {
                    matches!(token.value.as_str(), "!" | "~")
                }
            }
            _ => false,
        }
    }

    // =========================================================================
    // POSTFIX SELECTORS
    // =========================================================================

    fn parse_postfix_expression(&mut self) -> Result<Expression, ParserError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.check_separator(".") {
                expr = self.parse_dot_selector(expr)?;
                continue;
            }
            if self.check_separator("[") {
                if self.look(1).is_separator("]") {
                    // `Name[].class` or `Name[]::new`
                    expr = self.parse_array_type_suffix(expr)?;
                    continue;
                }
                let position = expr.position();
                self.next_token();
                let index = self.parse_expression()?;
                self.expect_separator("]")?;
                expr = Expression::ArraySelector(Box::new(ArraySelector {
                    target: expr,
                    index,
                    position,
                }));
                continue;
            }
            if self.check_separator("::") {
                expr = self.parse_method_reference_from(MethodRefQualifier::Expression(expr))?;
                continue;
            }
            if self.check_operator("++") {
                let position = expr.position();
                self.next_token();
                expr = Expression::Increment(Box::new(Increment {
                    operand: expr,
                    postfix: true,
                    position,
                }));
                continue;
            }
            if self.check_operator("--") {
                let position = expr.position();
                self.next_token();
                expr = Expression::Decrement(Box::new(Decrement {
                    operand: expr,
                    postfix: true,
                    position,
                }));
                continue;
            }
            return Ok(expr);
        }
    }

    /// One `.`-selector: member access, method call, generic invocation,
    /// qualified `this`/`super`, inner creation, or a class literal.
    fn parse_dot_selector(&mut self, target: Expression) -> Result<Expression, ParserError> {
        let position = target.position();
        self.next_token(); // `.`

        if self.check_operator("<") {
            self.next_token();
            let type_arguments = Some(self.parse_type_arguments()?);
            let member = self.expect_identifier()?;
            let arguments = self.parse_arguments()?;
            return Ok(Expression::MethodInvocation(Box::new(MethodInvocation {
                target: Some(target),
                type_arguments,
                member,
                arguments,
                position,
            })));
        }

        if self.accept_keyword("this") {
            let qualifier = Some(self.expression_to_qualified_name(&target)?);
            return Ok(Expression::This(This {
                qualifier,
                position,
            }));
        }

        if self.accept_keyword("super") {
            let qualifier = Some(self.expression_to_qualified_name(&target)?);
            self.expect_separator(".")?;
            return self.parse_super_member(qualifier, position);
        }

        if self.accept_keyword("new") {
            let created_type = self.parse_reference_type()?;
            let arguments = self.parse_arguments()?;
            let body = if self.check_separator("{") {
                Some(self.parse_class_body()?)
            } else {
                None
            };
            return Ok(Expression::InnerClassCreation(Box::new(
                InnerClassCreation {
                    target,
                    created_type,
                    arguments,
                    body,
                    position,
                },
            )));
        }

        if self.accept_keyword("class") {
            let name = self.expression_to_qualified_name(&target)?;
            let target_type = Type::Reference(ReferenceType {
                annotations: Vec::new(),
                name,
                type_arguments: None,
                sub_type: None,
                dimensions: 0,
                position,
            });
            return Ok(Expression::ClassReference(Box::new(ClassReference {
                target_type,
                position,
            })));
        }

        let member = self.expect_identifier()?;
        if self.check_separator("(") {
            let arguments = self.parse_arguments()?;
            return Ok(Expression::MethodInvocation(Box::new(MethodInvocation {
                target: Some(target),
                type_arguments: None,
                member,
                arguments,
                position,
            })));
        }
        Ok(Expression::MemberReference(Box::new(MemberReference {
            target,
            member,
            position,
        })))
    }

    /// `super.f`, `super.m(args)`, `super.<T>m(args)` with an optional
    /// outer qualifier already parsed.
    fn parse_super_member(
        &mut self,
        qualifier: Option<String>,
        position: NodePosition,
    ) -> Result<Expression, ParserError> {
        let type_arguments = if self.check_operator("<") {
            self.next_token();
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        let member = self.expect_identifier()?;
        if self.check_separator("(") {
            let arguments = self.parse_arguments()?;
            return Ok(Expression::SuperMethodInvocation(Box::new(
                SuperMethodInvocation {
                    qualifier,
                    type_arguments,
                    member,
                    arguments,
                    position,
                },
            )));
        }
        if type_arguments.is_some() {
            return self.error("`(`");
        }
        Ok(Expression::SuperMemberReference(SuperMemberReference {
            qualifier,
            member,
            position,
        }))
    }

    /// `Name[].class` / `Name[]::new`: the expression chain so far names a
    /// type; fold it back into one.
    fn parse_array_type_suffix(&mut self, target: Expression) -> Result<Expression, ParserError> {
        let position = target.position();
        let name = self.expression_to_qualified_name(&target)?;
        let dimensions = self.parse_array_dimensions();
        let target_type = Type::Reference(ReferenceType {
            annotations: Vec::new(),
            name,
            type_arguments: None,
            sub_type: None,
            dimensions,
            position,
        });
        if self.check_separator("::") {
            return self.parse_method_reference_from(MethodRefQualifier::Type(target_type));
        }
        self.expect_separator(".")?;
        self.expect_keyword("class")?;
        Ok(Expression::ClassReference(Box::new(ClassReference {
            target_type,
            position,
        })))
    }

    /// The remainder of a method reference after its qualifier.
    fn parse_method_reference_from(
        &mut self,
        qualifier: MethodRefQualifier,
    ) -> Result<Expression, ParserError> {
        let position = match &qualifier {
            MethodRefQualifier::Expression(e) => e.position(),
            MethodRefQualifier::Type(t) => t.position(),
        };
        self.expect_separator("::")?;
        let type_arguments = if self.check_operator("<") {
            self.next_token();
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        let member = if self.accept_keyword("new") {
            "new".to_string()
        } else {
            self.expect_identifier()?
        };
        Ok(Expression::MethodReference(Box::new(MethodReference {
            qualifier,
            type_arguments,
            member,
            position,
        })))
    }

    /// Folds a `Name`/`MemberReference` chain back into a dotted name, for
    /// positions where the grammar retroactively needs a type or
    /// qualifier (`a.b.C.class`, `Outer.this`).
    fn expression_to_qualified_name(&self, expr: &Expression) -> Result<String, ParserError> {
        match expr {
            Expression::Name(n) => Ok(n.identifier.clone()),
            Expression::MemberReference(m) => Ok(format!(
                "{}.{}",
                self.expression_to_qualified_name(&m.target)?,
                m.member
            )),
            _ => self.error("qualified name"),
        }
    }

    // =========================================================================
    // PRIMARY EXPRESSIONS
    // =========================================================================

    fn parse_primary(&mut self) -> Result<Expression, ParserError> {
        let position = self.node_position();

        if self.peek().kind.is_literal() {
            let token = self.next_token();
            return Ok(Expression::Literal(Literal {
                kind: token.kind,
                value: token.value,
                position,
            }));
        }

        if self.check_separator("(") {
            if self.lambda_ahead() {
                return self.parse_lambda_parenthesized();
            }
            self.next_token();
            let expr = self.parse_expression()?;
            self.expect_separator(")")?;
            return Ok(expr);
        }

        if self.check_identifier() {
            if self.look(1).is_operator("->") {
                return self.parse_lambda_single();
            }
            let name = self.next_token().value;
            if self.check_operator("<") {
                if let Some(reference) =
                    self.try_parse_generic_type_method_reference(name.clone(), position)
                {
                    return Ok(reference);
                }
            }
            // Unqualified invocation: `foo(args)`.
            if self.check_separator("(") {
                let arguments = self.parse_arguments()?;
                return Ok(Expression::MethodInvocation(Box::new(MethodInvocation {
                    target: None,
                    type_arguments: None,
                    member: name,
                    arguments,
                    position,
                })));
            }
            return Ok(Expression::Name(Name {
                identifier: name,
                position,
            }));
        }

        if self.peek().kind == TokenKind::Keyword {
            match self.peek().value.as_str() {
                "this" => {
                    self.next_token();
                    if self.check_separator("(") {
                        let arguments = self.parse_arguments()?;
                        return Ok(Expression::ExplicitConstructorInvocation(Box::new(
                            ExplicitConstructorInvocation {
                                kind: ConstructorCallKind::This,
                                type_arguments: None,
                                arguments,
                                position,
                            },
                        )));
                    }
                    return Ok(Expression::This(This {
                        qualifier: None,
                        position,
                    }));
                }
                "super" => {
                    self.next_token();
                    if self.check_separator("(") {
                        let arguments = self.parse_arguments()?;
                        return Ok(Expression::ExplicitConstructorInvocation(Box::new(
                            ExplicitConstructorInvocation {
                                kind: ConstructorCallKind::Super,
                                type_arguments: None,
                                arguments,
                                position,
                            },
                        )));
                    }
                    if self.accept_separator(".") {
                        return self.parse_super_member(None, position);
                    }
                    if self.check_separator("::") {
                        // consumed by the postfix selector loop
                        return Ok(Expression::SuperRef(SuperRef { position }));
                    }
                    return self.error("`(`, `.`, or `::`");
                }
                "new" => {
                    self.next_token();
                    return self.parse_creator(position);
                }
                "void" => {
                    self.next_token();
                    self.expect_separator(".")?;
                    self.expect_keyword("class")?;
                    return Ok(Expression::VoidClassReference(VoidClassReference {
                        position,
                    }));
                }
                _ => {
                    if let Some(primitive) = self.primitive_at_cursor() {
                        self.next_token();
                        return self.parse_primitive_class_or_constructor_ref(
                            primitive, position,
                        );
                    }
                }
            }
        }

        self.error("expression")
    }

    /// `int.class`, `int[].class`, `int[]::new`.
    fn parse_primitive_class_or_constructor_ref(
        &mut self,
        primitive: PrimitiveKind,
        position: NodePosition,
    ) -> Result<Expression, ParserError> {
        let dimensions = self.parse_array_dimensions();
        let target_type = Type::Basic(BasicType {
            annotations: Vec::new(),
            name: primitive,
            dimensions,
            position,
        });
        if self.check_separator("::") {
            return self.parse_method_reference_from(MethodRefQualifier::Type(target_type));
        }
        self.expect_separator(".")?;
        self.expect_keyword("class")?;
        Ok(Expression::ClassReference(Box::new(ClassReference {
            target_type,
            position,
        })))
    }

    /// An identifier followed by `<` names a type only if a well-formed
    /// type-argument list closes and `::` follows.
    fn try_parse_generic_type_method_reference(
        &mut self,
        name: String,
        position: NodePosition,
    ) -> Option<Expression> {
        self.try_parse(move |p| {
            p.expect_operator("<")?;
            let args = p.parse_type_arguments()?;
            if !p.check_separator("::") {
                return p.error("`::`");
            }
            let qualifier = MethodRefQualifier::Type(Type::Reference(ReferenceType {
                annotations: Vec::new(),
                name,
                type_arguments: Some(args),
                sub_type: None,
                dimensions: 0,
                position,
            }));
            p.parse_method_reference_from(qualifier)
        })
    }

    // =========================================================================
    // CREATORS
    // =========================================================================

    /// Everything after the `new` keyword.
    fn parse_creator(&mut self, position: NodePosition) -> Result<Expression, ParserError> {
        let type_arguments = if self.check_operator("<") {
            self.next_token();
            Some(self.parse_type_arguments()?)
        } else {
            None
        };

        let created = self.parse_type_base()?;
        match created {
            Type::Basic(_) => self.parse_array_creation_rest(created, position),
            Type::Reference(reference) => {
                if self.check_separator("(") {
                    let arguments = self.parse_arguments()?;
                    let body = if self.check_separator("{") {
                        Some(self.parse_class_body()?)
                    } else {
                        None
                    };
                    return Ok(Expression::InstanceCreation(Box::new(InstanceCreation {
                        type_arguments,
                        created_type: reference,
                        arguments,
                        body,
                        position,
                    })));
                }
                if self.check_separator("[") {
                    return self.parse_array_creation_rest(Type::Reference(reference), position);
                }
                self.error("`(` or `[`")
            }
        }
    }

    /// Array creator dimensions and optional initializer.
    fn parse_array_creation_rest(
        &mut self,
        element_type: Type,
        position: NodePosition,
    ) -> Result<Expression, ParserError> {
        let mut dimensions = Vec::new();
        while self.accept_separator("[") {
            if self.accept_separator("]") {
                dimensions.push(None);
            } else {
                dimensions.push(Some(self.parse_expression()?));
                self.expect_separator("]")?;
            }
        }
        if dimensions.is_empty() {
            return self.error("`[`");
        }
        let initializer = if self.check_separator("{") {
            Some(self.parse_array_initializer()?)
        } else {
            None
        };
        Ok(Expression::ArrayCreation(Box::new(ArrayCreation {
            element_type,
            dimensions,
            initializer,
            position,
        })))
    }

    /// `{ v, v, ... }` with optional trailing comma; values may nest.
    pub(crate) fn parse_array_initializer(&mut self) -> Result<ArrayInitializer, ParserError> {
        let position = self.node_position();
        self.expect_separator("{")?;
        let mut values = Vec::new();
        while !self.check_separator("}") {
            values.push(self.parse_variable_initializer()?);
            if !self.accept_separator(",") {
                break;
            }
        }
        self.expect_separator("}")?;
        Ok(ArrayInitializer { values, position })
    }

    /// A declarator initializer: an expression or an array initializer.
    pub(crate) fn parse_variable_initializer(&mut self) -> Result<Expression, ParserError> {
        if self.check_separator("{") {
            return Ok(Expression::ArrayInitializer(self.parse_array_initializer()?));
        }
        self.parse_expression()
    }

    /// A parenthesized argument list.
    pub(crate) fn parse_arguments(&mut self) -> Result<Vec<Expression>, ParserError> {
        self.expect_separator("(")?;
        let mut arguments = Vec::new();
        if !self.check_separator(")") {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.accept_separator(",") {
                    break;
                }
            }
        }
        self.expect_separator(")")?;
        Ok(arguments)
    }

    // =========================================================================
    // LAMBDAS
    // =========================================================================

    /// Balanced-paren scan: does `->` follow the `)` matching the `(`
    /// under the cursor?
    fn lambda_ahead(&self) -> bool {
        let mut depth = 0usize;
        let mut k = 0usize;
        loop {
            let token = self.look(k);
            if token.is_end() {
                return false;
            }
            if token.is_separator("(") {
                depth += 1;
            } else if token.is_separator(")") {
                depth -= 1;
                if depth == 0 {
                    return self.look(k + 1).is_operator("->");
                }
            }
            k += 1;
        }
    }

    /// `x -> body`.
    fn parse_lambda_single(&mut self) -> Result<Expression, ParserError> {
        let position = self.node_position();
        let name = self.expect_identifier()?;
        let parameter = LambdaParameter::Inferred(InferredFormalParameter {
            name,
            position,
        });
        self.expect_operator("->")?;
        let body = self.parse_lambda_body()?;
        Ok(Expression::Lambda(Box::new(LambdaExpression {
            parameters: vec![parameter],
            body,
            position,
        })))
    }

    /// `() -> body`, `(a, b) -> body`, `(T a, U b) -> body`.
    fn parse_lambda_parenthesized(&mut self) -> Result<Expression, ParserError> {
        let position = self.node_position();
        self.expect_separator("(")?;
        let mut parameters = Vec::new();
        if !self.check_separator(")") {
            let inferred = self.check_identifier()
                && (self.look(1).is_separator(",") || self.look(1).is_separator(")"));
            if inferred {
                loop {
                    let parameter_position = self.node_position();
                    let name = self.expect_identifier()?;
                    parameters.push(LambdaParameter::Inferred(InferredFormalParameter {
                        name,
                        position: parameter_position,
                    }));
                    if !self.accept_separator(",") {
                        break;
                    }
                }
            } else {
                loop {
                    parameters.push(LambdaParameter::Formal(self.parse_formal_parameter()?));
                    if !self.accept_separator(",") {
                        break;
                    }
                }
            }
        }
        self.expect_separator(")")?;
        self.expect_operator("->")?;
        let body = self.parse_lambda_body()?;
        Ok(Expression::Lambda(Box::new(LambdaExpression {
            parameters,
            body,
            position,
        })))
    }

    fn parse_lambda_body(&mut self) -> Result<LambdaBody, ParserError> {
        if self.check_separator("{") {
            return Ok(LambdaBody::Block(self.parse_block()?));
        }
        Ok(LambdaBody::Expression(self.parse_expression()?))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parse_expression;

    fn expr(source: &str) -> Expression {
        parse_expression(source).unwrap()
    }

    fn binary(source: &str) -> BinaryOperation {
        match expr(source) {
            Expression::Binary(b) => *b,
            other => panic!("expected binary operation, got {other:?}"),
        }
    }

    // =========================================================================
    // PRECEDENCE AND ASSOCIATIVITY
    // =========================================================================

    #[test]
    fn test_precedence_mul_over_add() {
        let b = binary("a + b * c");
        assert_eq!(b.operator, BinaryOperator::Add);
        match b.right {
            Expression::Binary(r) => assert_eq!(r.operator, BinaryOperator::Multiply),
            other => panic!("expected multiplication, got {other:?}"),
        }
    }

    #[test]
    fn test_left_associativity() {
        let b = binary("a - b - c");
        assert_eq!(b.operator, BinaryOperator::Subtract);
        match b.left {
            Expression::Binary(l) => assert_eq!(l.operator, BinaryOperator::Subtract),
            other => panic!("expected subtraction, got {other:?}"),
        }
    }

    #[test]
    fn test_shift_vs_relational() {
        // `a << b < c` parses as `(a << b) < c`.
        let b = binary("a << b < c");
        assert_eq!(b.operator, BinaryOperator::Less);
        match b.left {
            Expression::Binary(l) => assert_eq!(l.operator, BinaryOperator::ShiftLeft),
            other => panic!("expected shift, got {other:?}"),
        }
    }

    #[test]
    fn test_logical_hierarchy() {
        let b = binary("a && b == c || d");
        assert_eq!(b.operator, BinaryOperator::Or);
        let b = binary("a | b ^ c & d");
        assert_eq!(b.operator, BinaryOperator::BitOr);
    }

    #[test]
    fn test_unsigned_shift() {
        let b = binary("x >>> 2");
        assert_eq!(b.operator, BinaryOperator::UnsignedShiftRight);
    }

    #[test]
    fn test_assignment_right_associative() {
        match expr("a = b = c") {
            Expression::Assignment(a) => {
                assert!(matches!(a.value, Expression::Assignment(_)));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_compound_assignment() {
        match expr("x >>>= 1") {
            Expression::Assignment(a) => {
                assert_eq!(a.operator, AssignmentOperator::UnsignedShiftRight);
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_ternary() {
        match expr("a ? b : c ? d : e") {
            Expression::Ternary(t) => {
                // Right-associative third operand.
                assert!(matches!(t.if_false, Expression::Ternary(_)));
            }
            other => panic!("expected ternary, got {other:?}"),
        }
    }

    #[test]
    fn test_instanceof() {
        match expr("x instanceof String && y") {
            Expression::Binary(b) => {
                assert_eq!(b.operator, BinaryOperator::And);
                assert!(matches!(b.left, Expression::InstanceOf(_)));
            }
            other => panic!("expected binary, got {other:?}"),
        }
    }

    // =========================================================================
    // UNARY, CAST, PARENTHESES
    // =========================================================================

    #[test]
    fn test_prefix_chain() {
        match expr("-!~x") {
            Expression::Unary(u) => assert_eq!(u.operator, UnaryOperator::Minus),
            other => panic!("expected unary, got {other:?}"),
        }
    }

    #[test]
    fn test_increment_decrement() {
        assert!(matches!(
            expr("++i"),
            Expression::Increment(ref i) if !i.postfix
        ));
        assert!(matches!(
            expr("i++"),
            Expression::Increment(ref i) if i.postfix
        ));
        assert!(matches!(
            expr("--i"),
            Expression::Decrement(ref d) if !d.postfix
        ));
        assert!(matches!(
            expr("i--"),
            Expression::Decrement(ref d) if d.postfix
        ));
    }

    #[test]
    fn test_parenthesized_expression_not_cast() {
        // `(x)` alone is just `x`.
        assert!(matches!(expr("(x)"), Expression::Name(_)));
        // `(a) + b` is addition, not a cast of `+b`.
        let b = binary("(a) + b");
        assert_eq!(b.operator, BinaryOperator::Add);
    }

    #[test]
    fn test_reference_cast() {
        match expr("(String) o") {
            Expression::Cast(c) => {
                assert!(matches!(c.target_type, Type::Reference(_)));
                assert!(matches!(c.operand, Expression::Name(_)));
            }
            other => panic!("expected cast, got {other:?}"),
        }
    }

    #[test]
    fn test_primitive_cast_of_signed_operand() {
        // A primitive cast may take `+`/`-` operands.
        match expr("(int) -x") {
            Expression::Cast(c) => {
                assert!(matches!(c.operand, Expression::Unary(_)));
            }
            other => panic!("expected cast, got {other:?}"),
        }
    }

    #[test]
    fn test_generic_cast() {
        match expr("(List<String>) xs") {
            Expression::Cast(c) => match c.target_type {
                Type::Reference(r) => assert_eq!(r.name, "List"),
                other => panic!("expected reference type, got {other:?}"),
            },
            other => panic!("expected cast, got {other:?}"),
        }
    }

    #[test]
    fn test_intersection_cast() {
        match expr("(Runnable & Serializable) task") {
            Expression::Cast(c) => {
                assert_eq!(c.additional_bounds.len(), 1);
                assert_eq!(c.additional_bounds[0].name, "Serializable");
            }
            other => panic!("expected cast, got {other:?}"),
        }
    }

    #[test]
    fn test_array_cast() {
        match expr("(int[]) data") {
            Expression::Cast(c) => assert_eq!(c.target_type.dimensions(), 1),
            other => panic!("expected cast, got {other:?}"),
        }
    }

    #[test]
    fn test_postfix_after_parens_is_not_cast() {
        // `(x)++` increments the parenthesized value.
        assert!(matches!(
            expr("(x)++"),
            Expression::Increment(ref i) if i.postfix
        ));
    }

    // =========================================================================
    // SELECTORS
    // =========================================================================

    #[test]
    fn test_member_chain() {
        match expr("a.b.c") {
            Expression::MemberReference(m) => {
                assert_eq!(m.member, "c");
                assert!(matches!(m.target, Expression::MemberReference(_)));
            }
            other => panic!("expected member reference, got {other:?}"),
        }
    }

    #[test]
    fn test_method_invocation() {
        match expr("foo(a, b)") {
            Expression::MethodInvocation(m) => {
                assert!(m.target.is_none());
                assert_eq!(m.member, "foo");
                assert_eq!(m.arguments.len(), 2);
            }
            other => panic!("expected invocation, got {other:?}"),
        }
        match expr("obj.call().chain()") {
            Expression::MethodInvocation(m) => {
                assert_eq!(m.member, "chain");
                assert!(matches!(m.target, Some(Expression::MethodInvocation(_))));
            }
            other => panic!("expected invocation, got {other:?}"),
        }
    }

    #[test]
    fn test_generic_method_invocation() {
        match expr("obj.<String>method(x)") {
            Expression::MethodInvocation(m) => {
                assert_eq!(m.member, "method");
                assert_eq!(m.type_arguments.as_ref().unwrap().len(), 1);
            }
            other => panic!("expected invocation, got {other:?}"),
        }
    }

    #[test]
    fn test_array_access() {
        match expr("grid[i][j]") {
            Expression::ArraySelector(outer) => {
                assert!(matches!(outer.target, Expression::ArraySelector(_)));
            }
            other => panic!("expected array selector, got {other:?}"),
        }
    }

    #[test]
    fn test_this_and_super() {
        assert!(matches!(expr("this"), Expression::This(This { qualifier: None, .. })));
        match expr("Outer.this") {
            Expression::This(t) => assert_eq!(t.qualifier.as_deref(), Some("Outer")),
            other => panic!("expected this, got {other:?}"),
        }
        match expr("super.size()") {
            Expression::SuperMethodInvocation(s) => {
                assert!(s.qualifier.is_none());
                assert_eq!(s.member, "size");
            }
            other => panic!("expected super invocation, got {other:?}"),
        }
        match expr("Outer.super.size()") {
            Expression::SuperMethodInvocation(s) => {
                assert_eq!(s.qualifier.as_deref(), Some("Outer"));
            }
            other => panic!("expected super invocation, got {other:?}"),
        }
        match expr("super.field") {
            Expression::SuperMemberReference(s) => assert_eq!(s.member, "field"),
            other => panic!("expected super member, got {other:?}"),
        }
    }

    #[test]
    fn test_class_literals() {
        match expr("String.class") {
            Expression::ClassReference(c) => match c.target_type {
                Type::Reference(r) => assert_eq!(r.name, "String"),
                other => panic!("expected reference type, got {other:?}"),
            },
            other => panic!("expected class reference, got {other:?}"),
        }
        match expr("java.util.List.class") {
            Expression::ClassReference(c) => match c.target_type {
                Type::Reference(r) => assert_eq!(r.name, "java.util.List"),
                other => panic!("expected reference type, got {other:?}"),
            },
            other => panic!("expected class reference, got {other:?}"),
        }
        match expr("int.class") {
            Expression::ClassReference(c) => assert_eq!(c.target_type.dimensions(), 0),
            other => panic!("expected class reference, got {other:?}"),
        }
        match expr("int[].class") {
            Expression::ClassReference(c) => assert_eq!(c.target_type.dimensions(), 1),
            other => panic!("expected class reference, got {other:?}"),
        }
        match expr("String[].class") {
            Expression::ClassReference(c) => assert_eq!(c.target_type.dimensions(), 1),
            other => panic!("expected class reference, got {other:?}"),
        }
        assert!(matches!(expr("void.class"), Expression::VoidClassReference(_)));
    }

    // =========================================================================
    // METHOD REFERENCES
    // =========================================================================

    #[test]
    fn test_method_references() {
        match expr("String::valueOf") {
            Expression::MethodReference(m) => {
                assert_eq!(m.member, "valueOf");
                assert!(matches!(m.qualifier, MethodRefQualifier::Expression(_)));
            }
            other => panic!("expected method reference, got {other:?}"),
        }
        match expr("ArrayList::new") {
            Expression::MethodReference(m) => assert_eq!(m.member, "new"),
            other => panic!("expected method reference, got {other:?}"),
        }
        match expr("list.stream()::iterator") {
            Expression::MethodReference(m) => {
                assert!(matches!(
                    m.qualifier,
                    MethodRefQualifier::Expression(Expression::MethodInvocation(_))
                ));
            }
            other => panic!("expected method reference, got {other:?}"),
        }
        match expr("X::<T>m") {
            Expression::MethodReference(m) => {
                assert_eq!(m.type_arguments.as_ref().unwrap().len(), 1);
            }
            other => panic!("expected method reference, got {other:?}"),
        }
        assert!(matches!(expr("super::toString"), Expression::MethodReference(_)));
    }

    #[test]
    fn test_generic_type_method_reference() {
        match expr("ArrayList<String>::new") {
            Expression::MethodReference(m) => {
                assert_eq!(m.member, "new");
                match &m.qualifier {
                    MethodRefQualifier::Type(Type::Reference(r)) => {
                        assert_eq!(r.name, "ArrayList");
                        assert!(r.type_arguments.is_some());
                    }
                    other => panic!("expected type qualifier, got {other:?}"),
                }
            }
            other => panic!("expected method reference, got {other:?}"),
        }
    }

    #[test]
    fn test_array_constructor_reference() {
        match expr("int[]::new") {
            Expression::MethodReference(m) => {
                assert!(matches!(
                    m.qualifier,
                    MethodRefQualifier::Type(Type::Basic(_))
                ));
            }
            other => panic!("expected method reference, got {other:?}"),
        }
        assert!(matches!(expr("String[]::new"), Expression::MethodReference(_)));
    }

    #[test]
    fn test_less_than_still_works() {
        // The `<` after an identifier falls back to comparison.
        let b = binary("a < b");
        assert_eq!(b.operator, BinaryOperator::Less);
        let b = binary("a < b()");
        assert_eq!(b.operator, BinaryOperator::Less);
    }

    // =========================================================================
    // CREATORS
    // =========================================================================

    #[test]
    fn test_instance_creation() {
        match expr("new ArrayList<String>(16)") {
            Expression::InstanceCreation(c) => {
                assert_eq!(c.created_type.name, "ArrayList");
                assert_eq!(c.arguments.len(), 1);
                assert!(c.body.is_none());
            }
            other => panic!("expected instance creation, got {other:?}"),
        }
    }

    #[test]
    fn test_diamond_creation() {
        match expr("new HashMap<>()") {
            Expression::InstanceCreation(c) => {
                assert_eq!(c.created_type.type_arguments, Some(Vec::new()));
            }
            other => panic!("expected instance creation, got {other:?}"),
        }
    }

    #[test]
    fn test_anonymous_class() {
        match expr("new Runnable() { public void run() { } }") {
            Expression::InstanceCreation(c) => {
                let body = c.body.unwrap();
                assert_eq!(body.len(), 1);
                assert!(matches!(body[0], MemberDeclaration::Method(_)));
            }
            other => panic!("expected instance creation, got {other:?}"),
        }
    }

    #[test]
    fn test_constructor_type_arguments() {
        match expr("new <String> Holder(x)") {
            Expression::InstanceCreation(c) => {
                assert_eq!(c.type_arguments.as_ref().unwrap().len(), 1);
            }
            other => panic!("expected instance creation, got {other:?}"),
        }
    }

    #[test]
    fn test_inner_class_creation() {
        match expr("outer.new Inner(1)") {
            Expression::InnerClassCreation(c) => {
                assert_eq!(c.created_type.name, "Inner");
                assert!(matches!(c.target, Expression::Name(_)));
            }
            other => panic!("expected inner creation, got {other:?}"),
        }
    }

    #[test]
    fn test_array_creation() {
        match expr("new int[3][]") {
            Expression::ArrayCreation(a) => {
                assert_eq!(a.dimensions.len(), 2);
                assert!(a.dimensions[0].is_some());
                assert!(a.dimensions[1].is_none());
                assert!(a.initializer.is_none());
            }
            other => panic!("expected array creation, got {other:?}"),
        }
        match expr("new int[]{1, 2, 3}") {
            Expression::ArrayCreation(a) => {
                assert_eq!(a.initializer.as_ref().unwrap().values.len(), 3);
            }
            other => panic!("expected array creation, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_array_initializer() {
        match expr("new int[][]{{1}, {2, 3}}") {
            Expression::ArrayCreation(a) => {
                let init = a.initializer.unwrap();
                assert_eq!(init.values.len(), 2);
                assert!(matches!(init.values[0], Expression::ArrayInitializer(_)));
            }
            other => panic!("expected array creation, got {other:?}"),
        }
    }

    // =========================================================================
    // LAMBDAS
    // =========================================================================

    #[test]
    fn test_lambda_shapes() {
        match expr("() -> 1") {
            Expression::Lambda(l) => {
                assert!(l.parameters.is_empty());
                assert!(matches!(l.body, LambdaBody::Expression(_)));
            }
            other => panic!("expected lambda, got {other:?}"),
        }
        match expr("x -> x + 1") {
            Expression::Lambda(l) => assert_eq!(l.parameters.len(), 1),
            other => panic!("expected lambda, got {other:?}"),
        }
        match expr("(x, y) -> x * y") {
            Expression::Lambda(l) => {
                assert_eq!(l.parameters.len(), 2);
                assert!(matches!(l.parameters[0], LambdaParameter::Inferred(_)));
            }
            other => panic!("expected lambda, got {other:?}"),
        }
        match expr("(int a, String b) -> b") {
            Expression::Lambda(l) => {
                assert!(matches!(l.parameters[0], LambdaParameter::Formal(_)));
            }
            other => panic!("expected lambda, got {other:?}"),
        }
        match expr("(x) -> x") {
            Expression::Lambda(l) => assert_eq!(l.parameters.len(), 1),
            other => panic!("expected lambda, got {other:?}"),
        }
    }

    #[test]
    fn test_lambda_block_body() {
        match expr("(a, b) -> { return a + b; }") {
            Expression::Lambda(l) => assert!(matches!(l.body, LambdaBody::Block(_))),
            other => panic!("expected lambda, got {other:?}"),
        }
    }

    #[test]
    fn test_lambda_in_argument_position() {
        match expr("map(x -> x * 2)") {
            Expression::MethodInvocation(m) => {
                assert!(matches!(m.arguments[0], Expression::Lambda(_)));
            }
            other => panic!("expected invocation, got {other:?}"),
        }
    }

    #[test]
    fn test_cast_of_lambda() {
        match expr("(Runnable) () -> go()") {
            Expression::Cast(c) => assert!(matches!(c.operand, Expression::Lambda(_))),
            other => panic!("expected cast, got {other:?}"),
        }
    }

    // =========================================================================
    // LITERALS AND ERRORS
    // =========================================================================

    #[test]
    fn test_literal_text_preserved() {
        match expr("0xCAFE_BABE") {
            Expression::Literal(l) => {
                assert_eq!(l.value, "0xCAFE_BABE");
                assert_eq!(l.kind, javelin_lex::TokenKind::HexInteger);
            }
            other => panic!("expected literal, got {other:?}"),
        }
        match expr("\"hi\\n\"") {
            Expression::Literal(l) => assert_eq!(l.value, "\"hi\\n\""),
            other => panic!("expected literal, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_constructor_invocations() {
        match expr("this(1, 2)") {
            Expression::ExplicitConstructorInvocation(c) => {
                assert_eq!(c.kind, ConstructorCallKind::This);
                assert_eq!(c.arguments.len(), 2);
            }
            other => panic!("expected constructor invocation, got {other:?}"),
        }
        match expr("super(x)") {
            Expression::ExplicitConstructorInvocation(c) => {
                assert_eq!(c.kind, ConstructorCallKind::Super);
            }
            other => panic!("expected constructor invocation, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_expressions() {
        assert!(parse_expression("a +").is_err());
        assert!(parse_expression("(a").is_err());
        assert!(parse_expression("a ? b").is_err());
        assert!(parse_expression("new").is_err());
        assert!(parse_expression("x.").is_err());
    }
}
