//! Statement parsing.
//!
//! The one interesting decision here is statement-initial disambiguation:
//! a statement starting with an identifier or primitive keyword is either
//! a local variable declaration (`List<String> xs = ...;`) or an
//! expression statement (`xs.add(x);`). The parser settles it with a
//! non-consuming speculative type parse: if a type followed by an
//! identifier fits, it is a declaration; otherwise the statement parses
//! as an expression. Everything after the decision is committed, so
//! errors inside initializers surface as real errors.

use javelin_lex::TokenKind;
use javelin_util::ParserError;

use crate::ast::*;
use crate::Parser;

impl Parser {
    /// Parses a `{ ... }` statement block.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParserError> {
        let position = self.node_position();
        self.expect_separator("{")?;
        let mut statements = Vec::new();
        while !self.accept_separator("}") {
            if self.peek().is_end() {
                return self.error("`}`");
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Block {
            statements,
            position,
        })
    }

    /// Parses a single statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();

        if self.check_separator("{") {
            return Ok(Statement::Block(self.parse_block()?));
        }
        if self.accept_separator(";") {
            return Ok(Statement::Empty(EmptyStatement { position }));
        }

        if self.peek().kind == TokenKind::Keyword {
            match self.peek().value.as_str() {
                "if" => return self.parse_if_statement(),
                "while" => return self.parse_while_statement(),
                "do" => return self.parse_do_while_statement(),
                "for" => return self.parse_for_statement(),
                "switch" => return self.parse_switch_statement(),
                "try" => return self.parse_try_statement(),
                "return" => return self.parse_return_statement(),
                "throw" => return self.parse_throw_statement(),
                "break" => return self.parse_break_statement(),
                "continue" => return self.parse_continue_statement(),
                "synchronized" => return self.parse_synchronized_statement(),
                "assert" => return self.parse_assert_statement(),
                "class" | "interface" | "enum" => {
                    return Ok(Statement::LocalType(Box::new(
                        self.parse_type_declaration()?,
                    )));
                }
                _ => {}
            }
        }

        // Modifier- or annotation-prefixed local declarations.
        if self.at_local_declaration_prefix() {
            let documentation = self.pending_documentation();
            let (modifiers, annotations) = self.parse_modifiers_and_annotations()?;
            if self.at_type_declaration_keyword() {
                let declaration = self.parse_type_declaration_rest(
                    modifiers,
                    annotations,
                    documentation,
                    position,
                )?;
                return Ok(Statement::LocalType(Box::new(declaration)));
            }
            let declaration = self.parse_local_variable_rest(modifiers, annotations, position)?;
            self.expect_separator(";")?;
            return Ok(Statement::LocalVariable(declaration));
        }

        // Labeled statement (`::` is a single separator, so this lookahead
        // cannot confuse a method reference).
        if self.check_identifier() && self.look(1).is_operator(":") {
            let label = self.expect_identifier()?;
            self.next_token(); // `:`
            let statement = self.parse_statement()?;
            return Ok(Statement::Labeled(Box::new(LabeledStatement {
                label,
                statement,
                position,
            })));
        }

        if self.looks_like_local_variable() {
            let declaration = self.parse_local_variable_declaration()?;
            self.expect_separator(";")?;
            return Ok(Statement::LocalVariable(declaration));
        }

        let expression = self.parse_expression()?;
        self.expect_separator(";")?;
        Ok(Statement::Expression(ExpressionStatement {
            expression,
            position,
        }))
    }

    /// True on a modifier keyword or annotation opening a local
    /// declaration. Keywords that open statements (`synchronized`) were
    /// dispatched before this point.
    fn at_local_declaration_prefix(&self) -> bool {
        if self.peek().kind == TokenKind::Annotation {
            return true;
        }
        self.peek().kind == TokenKind::Keyword
            && Modifier::from_keyword(&self.peek().value).is_some()
    }

    /// Non-consuming check: does a type followed by an identifier start
    /// here?
    fn looks_like_local_variable(&mut self) -> bool {
        if self.primitive_at_cursor().is_none() && !self.check_identifier() {
            return false;
        }
        let marker = self.tokens.mark();
        let fits = self.parse_type().is_ok() && self.check_identifier();
        self.tokens.reset(marker);
        fits
    }

    /// Parses a local variable declaration, prefix included.
    pub(crate) fn parse_local_variable_declaration(
        &mut self,
    ) -> Result<LocalVariableDeclaration, ParserError> {
        let position = self.node_position();
        let (modifiers, annotations) = self.parse_modifiers_and_annotations()?;
        self.parse_local_variable_rest(modifiers, annotations, position)
    }

    fn parse_local_variable_rest(
        &mut self,
        modifiers: ModifierSet,
        annotations: Vec<Annotation>,
        position: javelin_util::NodePosition,
    ) -> Result<LocalVariableDeclaration, ParserError> {
        let declared_type = self.parse_type()?;
        let name_position = self.node_position();
        let name = self.expect_identifier()?;
        let declarators = self.parse_variable_declarators_from(name, name_position)?;
        Ok(LocalVariableDeclaration {
            modifiers,
            annotations,
            declared_type,
            declarators,
            position,
        })
    }

    // =========================================================================
    // CONTROL FLOW
    // =========================================================================

    fn parse_if_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("if")?;
        self.expect_separator("(")?;
        let condition = self.parse_expression()?;
        self.expect_separator(")")?;
        let then_branch = self.parse_statement()?;
        let else_branch = if self.accept_keyword("else") {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(Statement::If(Box::new(IfStatement {
            condition,
            then_branch,
            else_branch,
            position,
        })))
    }

    fn parse_while_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("while")?;
        self.expect_separator("(")?;
        let condition = self.parse_expression()?;
        self.expect_separator(")")?;
        let body = self.parse_statement()?;
        Ok(Statement::While(Box::new(WhileStatement {
            condition,
            body,
            position,
        })))
    }

    fn parse_do_while_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("do")?;
        let body = self.parse_statement()?;
        self.expect_keyword("while")?;
        self.expect_separator("(")?;
        let condition = self.parse_expression()?;
        self.expect_separator(")")?;
        self.expect_separator(";")?;
        Ok(Statement::DoWhile(Box::new(DoWhileStatement {
            body,
            condition,
            position,
        })))
    }

    fn parse_for_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("for")?;
        self.expect_separator("(")?;

        if self.accept_separator(";") {
            return self.parse_classic_for_rest(None, position);
        }

        if self.looks_like_for_declaration() {
            let declaration = self.parse_local_variable_declaration()?;
            if self.accept_operator(":") {
                let iterable = self.parse_expression()?;
                self.expect_separator(")")?;
                let body = self.parse_statement()?;
                return Ok(Statement::ForEach(Box::new(ForEachStatement {
                    variable: declaration,
                    iterable,
                    body,
                    position,
                })));
            }
            self.expect_separator(";")?;
            return self.parse_classic_for_rest(Some(ForInit::Declaration(declaration)), position);
        }

        let mut init = vec![self.parse_expression()?];
        while self.accept_separator(",") {
            init.push(self.parse_expression()?);
        }
        self.expect_separator(";")?;
        self.parse_classic_for_rest(Some(ForInit::Expressions(init)), position)
    }

    fn looks_like_for_declaration(&mut self) -> bool {
        self.at_local_declaration_prefix() || self.looks_like_local_variable()
    }

    fn parse_classic_for_rest(
        &mut self,
        init: Option<ForInit>,
        position: javelin_util::NodePosition,
    ) -> Result<Statement, ParserError> {
        let condition = if self.check_separator(";") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_separator(";")?;
        let mut update = Vec::new();
        if !self.check_separator(")") {
            update.push(self.parse_expression()?);
            while self.accept_separator(",") {
                update.push(self.parse_expression()?);
            }
        }
        self.expect_separator(")")?;
        let body = self.parse_statement()?;
        Ok(Statement::For(Box::new(ForStatement {
            init,
            condition,
            update,
            body,
            position,
        })))
    }

    fn parse_switch_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("switch")?;
        self.expect_separator("(")?;
        let expression = self.parse_expression()?;
        self.expect_separator(")")?;
        self.expect_separator("{")?;
        let mut cases = Vec::new();
        while !self.accept_separator("}") {
            if self.peek().is_end() {
                return self.error("`}`");
            }
            cases.push(self.parse_switch_case()?);
        }
        Ok(Statement::Switch(SwitchStatement {
            expression,
            cases,
            position,
        }))
    }

    /// One case group: consecutive labels, then their statements.
    fn parse_switch_case(&mut self) -> Result<SwitchCase, ParserError> {
        let position = self.node_position();
        let mut labels = Vec::new();
        loop {
            if self.accept_keyword("case") {
                labels.push(SwitchLabel::Constant(self.parse_ternary_expression()?));
                self.expect_operator(":")?;
            } else if self.accept_keyword("default") {
                labels.push(SwitchLabel::Default);
                self.expect_operator(":")?;
            } else {
                break;
            }
        }
        if labels.is_empty() {
            return self.error("`case` or `default`");
        }
        let mut statements = Vec::new();
        while !self.check_separator("}")
            && !self.check_keyword("case")
            && !self.check_keyword("default")
        {
            if self.peek().is_end() {
                return self.error("`}`");
            }
            statements.push(self.parse_statement()?);
        }
        Ok(SwitchCase {
            labels,
            statements,
            position,
        })
    }

    // =========================================================================
    // EXCEPTIONS
    // =========================================================================

    fn parse_try_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("try")?;

        let mut resources = Vec::new();
        if self.accept_separator("(") {
            loop {
                resources.push(self.parse_try_resource()?);
                if !self.accept_separator(";") {
                    break;
                }
                if self.check_separator(")") {
                    break; // trailing semicolon
                }
            }
            self.expect_separator(")")?;
        }

        let block = self.parse_block()?;
        let mut catches = Vec::new();
        while self.check_keyword("catch") {
            catches.push(self.parse_catch_clause()?);
        }
        let finally_block = if self.accept_keyword("finally") {
            Some(self.parse_block()?)
        } else {
            None
        };

        if resources.is_empty() && catches.is_empty() && finally_block.is_none() {
            return self.error("`catch` or `finally`");
        }

        Ok(Statement::Try(Box::new(TryStatement {
            resources,
            block,
            catches,
            finally_block,
            position,
        })))
    }

    fn parse_try_resource(&mut self) -> Result<TryResource, ParserError> {
        let position = self.node_position();
        let (modifiers, annotations) = self.parse_modifiers_and_annotations()?;
        let resource_type = self.parse_type()?;
        let name = self.expect_identifier()?;
        self.expect_operator("=")?;
        let value = self.parse_expression()?;
        Ok(TryResource {
            modifiers,
            annotations,
            resource_type,
            name,
            value,
            position,
        })
    }

    fn parse_catch_clause(&mut self) -> Result<CatchClause, ParserError> {
        let position = self.node_position();
        self.expect_keyword("catch")?;
        self.expect_separator("(")?;
        let parameter_position = self.node_position();
        let (modifiers, annotations) = self.parse_modifiers_and_annotations()?;
        let mut types = vec![self.parse_reference_type()?];
        while self.accept_operator("|") {
            types.push(self.parse_reference_type()?);
        }
        let name = self.expect_identifier()?;
        self.expect_separator(")")?;
        let block = self.parse_block()?;
        Ok(CatchClause {
            parameter: CatchParameter {
                modifiers,
                annotations,
                types,
                name,
                position: parameter_position,
            },
            block,
            position,
        })
    }

    // =========================================================================
    // SIMPLE STATEMENTS
    // =========================================================================

    fn parse_return_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("return")?;
        let value = if self.check_separator(";") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_separator(";")?;
        Ok(Statement::Return(ReturnStatement { value, position }))
    }

    fn parse_throw_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("throw")?;
        let value = self.parse_expression()?;
        self.expect_separator(";")?;
        Ok(Statement::Throw(ThrowStatement { value, position }))
    }

    fn parse_break_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("break")?;
        let label = if self.check_identifier() {
            Some(self.next_token().value)
        } else {
            None
        };
        self.expect_separator(";")?;
        Ok(Statement::Break(BreakStatement { label, position }))
    }

    fn parse_continue_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("continue")?;
        let label = if self.check_identifier() {
            Some(self.next_token().value)
        } else {
            None
        };
        self.expect_separator(";")?;
        Ok(Statement::Continue(ContinueStatement { label, position }))
    }

    fn parse_synchronized_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("synchronized")?;
        self.expect_separator("(")?;
        let lock = self.parse_expression()?;
        self.expect_separator(")")?;
        let block = self.parse_block()?;
        Ok(Statement::Synchronized(Box::new(SynchronizedStatement {
            lock,
            block,
            position,
        })))
    }

    fn parse_assert_statement(&mut self) -> Result<Statement, ParserError> {
        let position = self.node_position();
        self.expect_keyword("assert")?;
        let condition = self.parse_expression()?;
        let message = if self.accept_operator(":") {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_separator(";")?;
        Ok(Statement::Assert(AssertStatement {
            condition,
            message,
            position,
        }))
    }
}
