//! Declaration parsing: compilation units, type declarations, members,
//! formal parameters, and annotations.
//!
//! Modifiers and annotations interleave freely before a declaration; the
//! shared prefix parser accumulates them and the declaration constructors
//! pick them apart. Javadoc is read off the token that opens a declaration,
//! so a doc comment always lands on the declaration that directly follows
//! it.

use javelin_lex::TokenKind;
use javelin_util::{NodePosition, ParserError};

use crate::ast::*;
use crate::Parser;

impl Parser {
    /// Parses a whole compilation unit: package, imports, types.
    pub fn parse_compilation_unit(&mut self) -> Result<CompilationUnit, ParserError> {
        let position = self.node_position();
        let package = self.parse_optional_package()?;

        let mut imports = Vec::new();
        while self.check_keyword("import") {
            imports.push(self.parse_import()?);
        }

        let mut types = Vec::new();
        while !self.peek().is_end() {
            if self.accept_separator(";") {
                continue;
            }
            types.push(self.parse_type_declaration()?);
        }

        Ok(CompilationUnit {
            package,
            imports,
            types,
            position,
        })
    }

    /// Parses `package a.b.c;` if present. Leading annotations may belong
    /// to the package or to the first type, so the prefix is speculative;
    /// everything after the `package` keyword commits.
    fn parse_optional_package(&mut self) -> Result<Option<PackageDeclaration>, ParserError> {
        let marker = self.tokens.mark();
        let position = self.node_position();
        let documentation = self.pending_documentation();
        match self.try_annotations_before_package() {
            Some(annotations) => {
                self.expect_keyword("package")?;
                let name = self.parse_qualified_name()?;
                self.expect_separator(";")?;
                Ok(Some(PackageDeclaration {
                    annotations,
                    name,
                    documentation,
                    position,
                }))
            }
            None => {
                self.tokens.reset(marker);
                Ok(None)
            }
        }
    }

    /// Scans the annotation prefix and reports whether `package` follows.
    fn try_annotations_before_package(&mut self) -> Option<Vec<Annotation>> {
        let annotations = self.try_parse(|p| p.parse_annotations())?;
        if self.check_keyword("package") {
            Some(annotations)
        } else {
            None
        }
    }

    /// Parses one `import` declaration.
    fn parse_import(&mut self) -> Result<Import, ParserError> {
        let position = self.node_position();
        self.expect_keyword("import")?;
        let is_static = self.accept_keyword("static");
        let mut path = self.expect_identifier()?;
        let mut is_wildcard = false;
        while self.accept_separator(".") {
            if self.accept_operator("*") {
                is_wildcard = true;
                break;
            }
            path.push('.');
            path.push_str(&self.expect_identifier()?);
        }
        self.expect_separator(";")?;
        Ok(Import {
            path,
            is_static,
            is_wildcard,
            position,
        })
    }

    // =========================================================================
    // DECLARATION PREFIX
    // =========================================================================

    /// Parses the interleaved modifier/annotation prefix of a declaration.
    pub(crate) fn parse_modifiers_and_annotations(
        &mut self,
    ) -> Result<(ModifierSet, Vec<Annotation>), ParserError> {
        let mut modifiers = ModifierSet::default();
        let mut annotations = Vec::new();
        loop {
            if self.peek().kind == TokenKind::Keyword {
                if let Some(modifier) = Modifier::from_keyword(&self.peek().value) {
                    self.next_token();
                    modifiers.insert(modifier);
                    continue;
                }
            }
            if self.peek().kind == TokenKind::Annotation
                && !self.look(1).is_keyword("interface")
            {
                annotations.push(self.parse_annotation()?);
                continue;
            }
            return Ok((modifiers, annotations));
        }
    }

    /// Parses zero or more annotations (never an `@interface` opener).
    pub(crate) fn parse_annotations(&mut self) -> Result<Vec<Annotation>, ParserError> {
        let mut annotations = Vec::new();
        while self.peek().kind == TokenKind::Annotation
            && !self.look(1).is_keyword("interface")
        {
            annotations.push(self.parse_annotation()?);
        }
        Ok(annotations)
    }

    /// Parses one annotation use.
    pub(crate) fn parse_annotation(&mut self) -> Result<Annotation, ParserError> {
        let position = self.node_position();
        if self.peek().kind != TokenKind::Annotation {
            return self.error("`@`");
        }
        self.next_token();
        let name = self.parse_qualified_name()?;

        let element = if self.accept_separator("(") {
            if self.accept_separator(")") {
                Some(AnnotationElement::Pairs(Vec::new()))
            } else if self.check_identifier() && self.look(1).is_operator("=") {
                let mut pairs = vec![self.parse_element_value_pair()?];
                while self.accept_separator(",") {
                    pairs.push(self.parse_element_value_pair()?);
                }
                self.expect_separator(")")?;
                Some(AnnotationElement::Pairs(pairs))
            } else {
                let value = self.parse_element_value()?;
                self.expect_separator(")")?;
                Some(AnnotationElement::Value(Box::new(value)))
            }
        } else {
            None
        };

        Ok(Annotation {
            name,
            element,
            position,
        })
    }

    fn parse_element_value_pair(&mut self) -> Result<ElementValuePair, ParserError> {
        let position = self.node_position();
        let name = self.expect_identifier()?;
        self.expect_operator("=")?;
        let value = self.parse_element_value()?;
        Ok(ElementValuePair {
            name,
            value,
            position,
        })
    }

    /// An element value: nested annotation, array, or conditional
    /// expression (assignments are not element values).
    pub(crate) fn parse_element_value(&mut self) -> Result<ElementValue, ParserError> {
        if self.peek().kind == TokenKind::Annotation {
            return Ok(ElementValue::Annotation(Box::new(self.parse_annotation()?)));
        }
        if self.check_separator("{") {
            let position = self.node_position();
            self.next_token();
            let mut values = Vec::new();
            while !self.check_separator("}") {
                values.push(self.parse_element_value()?);
                if !self.accept_separator(",") {
                    break;
                }
            }
            self.expect_separator("}")?;
            return Ok(ElementValue::Array(ElementArrayValue { values, position }));
        }
        Ok(ElementValue::Expression(self.parse_ternary_expression()?))
    }

    // =========================================================================
    // TYPE DECLARATIONS
    // =========================================================================

    /// Parses a class, interface, enum, or annotation declaration,
    /// prefix included.
    pub(crate) fn parse_type_declaration(&mut self) -> Result<TypeDeclaration, ParserError> {
        let position = self.node_position();
        let documentation = self.pending_documentation();
        let (modifiers, annotations) = self.parse_modifiers_and_annotations()?;
        self.parse_type_declaration_rest(modifiers, annotations, documentation, position)
    }

    /// Dispatches on the declaration keyword after the prefix.
    pub(crate) fn parse_type_declaration_rest(
        &mut self,
        modifiers: ModifierSet,
        annotations: Vec<Annotation>,
        documentation: Option<String>,
        position: NodePosition,
    ) -> Result<TypeDeclaration, ParserError> {
        if self.check_keyword("class") {
            return Ok(TypeDeclaration::Class(self.parse_class_declaration(
                modifiers,
                annotations,
                documentation,
                position,
            )?));
        }
        if self.check_keyword("interface") {
            return Ok(TypeDeclaration::Interface(self.parse_interface_declaration(
                modifiers,
                annotations,
                documentation,
                position,
            )?));
        }
        if self.check_keyword("enum") {
            return Ok(TypeDeclaration::Enum(self.parse_enum_declaration(
                modifiers,
                annotations,
                documentation,
                position,
            )?));
        }
        if self.peek().kind == TokenKind::Annotation && self.look(1).is_keyword("interface") {
            return Ok(TypeDeclaration::Annotation(
                self.parse_annotation_declaration(
                    modifiers,
                    annotations,
                    documentation,
                    position,
                )?,
            ));
        }
        self.error("type declaration")
    }

    fn parse_class_declaration(
        &mut self,
        modifiers: ModifierSet,
        annotations: Vec<Annotation>,
        documentation: Option<String>,
        position: NodePosition,
    ) -> Result<ClassDeclaration, ParserError> {
        self.expect_keyword("class")?;
        let name = self.expect_identifier()?;
        let type_parameters = if self.check_operator("<") {
            self.parse_type_parameters()?
        } else {
            Vec::new()
        };
        let extends = if self.accept_keyword("extends") {
            Some(self.parse_reference_type()?)
        } else {
            None
        };
        let implements = if self.accept_keyword("implements") {
            self.parse_reference_type_list()?
        } else {
            Vec::new()
        };
        let body = self.parse_class_body()?;
        Ok(ClassDeclaration {
            modifiers,
            annotations,
            documentation,
            name,
            type_parameters,
            extends,
            implements,
            body,
            position,
        })
    }

    fn parse_interface_declaration(
        &mut self,
        modifiers: ModifierSet,
        annotations: Vec<Annotation>,
        documentation: Option<String>,
        position: NodePosition,
    ) -> Result<InterfaceDeclaration, ParserError> {
        self.expect_keyword("interface")?;
        let name = self.expect_identifier()?;
        let type_parameters = if self.check_operator("<") {
            self.parse_type_parameters()?
        } else {
            Vec::new()
        };
        let extends = if self.accept_keyword("extends") {
            self.parse_reference_type_list()?
        } else {
            Vec::new()
        };
        let body = self.parse_class_body()?;
        Ok(InterfaceDeclaration {
            modifiers,
            annotations,
            documentation,
            name,
            type_parameters,
            extends,
            body,
            position,
        })
    }

    fn parse_enum_declaration(
        &mut self,
        modifiers: ModifierSet,
        annotations: Vec<Annotation>,
        documentation: Option<String>,
        position: NodePosition,
    ) -> Result<EnumDeclaration, ParserError> {
        self.expect_keyword("enum")?;
        let name = self.expect_identifier()?;
        let implements = if self.accept_keyword("implements") {
            self.parse_reference_type_list()?
        } else {
            Vec::new()
        };
        self.expect_separator("{")?;

        let mut constants = Vec::new();
        while !self.check_separator("}") && !self.check_separator(";") {
            constants.push(self.parse_enum_constant()?);
            if !self.accept_separator(",") {
                break;
            }
        }

        let mut body = Vec::new();
        if self.accept_separator(";") {
            while !self.check_separator("}") {
                if self.peek().is_end() {
                    return self.error("`}`");
                }
                if self.accept_separator(";") {
                    continue;
                }
                body.push(self.parse_member_declaration()?);
            }
        }
        self.expect_separator("}")?;

        Ok(EnumDeclaration {
            modifiers,
            annotations,
            documentation,
            name,
            implements,
            constants,
            body,
            position,
        })
    }

    fn parse_enum_constant(&mut self) -> Result<EnumConstantDeclaration, ParserError> {
        let position = self.node_position();
        let documentation = self.pending_documentation();
        let annotations = self.parse_annotations()?;
        let name = self.expect_identifier()?;
        let arguments = if self.check_separator("(") {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let body = if self.check_separator("{") {
            Some(self.parse_class_body()?)
        } else {
            None
        };
        Ok(EnumConstantDeclaration {
            annotations,
            documentation,
            name,
            arguments,
            body,
            position,
        })
    }

    fn parse_annotation_declaration(
        &mut self,
        modifiers: ModifierSet,
        annotations: Vec<Annotation>,
        documentation: Option<String>,
        position: NodePosition,
    ) -> Result<AnnotationDeclaration, ParserError> {
        self.next_token(); // `@`
        self.expect_keyword("interface")?;
        let name = self.expect_identifier()?;
        self.expect_separator("{")?;
        let mut body = Vec::new();
        while !self.accept_separator("}") {
            if self.peek().is_end() {
                return self.error("`}`");
            }
            if self.accept_separator(";") {
                continue;
            }
            body.push(self.parse_annotation_member()?);
        }
        Ok(AnnotationDeclaration {
            modifiers,
            annotations,
            documentation,
            name,
            body,
            position,
        })
    }

    /// A member of an `@interface` body: an element method, a constant
    /// field, or a nested type.
    fn parse_annotation_member(&mut self) -> Result<MemberDeclaration, ParserError> {
        let position = self.node_position();
        let documentation = self.pending_documentation();
        let (modifiers, annotations) = self.parse_modifiers_and_annotations()?;

        if self.at_type_declaration_keyword() {
            return Ok(MemberDeclaration::Type(self.parse_type_declaration_rest(
                modifiers,
                annotations,
                documentation,
                position,
            )?));
        }

        let return_type = self.parse_type()?;
        let name_position = self.node_position();
        let name = self.expect_identifier()?;

        if self.accept_separator("(") {
            self.expect_separator(")")?;
            let extra_dimensions = self.parse_array_dimensions();
            let default = if self.accept_keyword("default") {
                Some(self.parse_element_value()?)
            } else {
                None
            };
            self.expect_separator(";")?;
            return Ok(MemberDeclaration::AnnotationMethod(AnnotationMethod {
                modifiers,
                annotations,
                documentation,
                return_type,
                name,
                extra_dimensions,
                default,
                position,
            }));
        }

        let declarators = self.parse_variable_declarators_from(name, name_position)?;
        self.expect_separator(";")?;
        Ok(MemberDeclaration::Field(FieldDeclaration {
            modifiers,
            annotations,
            documentation,
            field_type: return_type,
            declarators,
            position,
        }))
    }

    // =========================================================================
    // CLASS BODY MEMBERS
    // =========================================================================

    /// Parses a `{ ... }` body of members; stray semicolons are skipped.
    pub(crate) fn parse_class_body(&mut self) -> Result<Vec<MemberDeclaration>, ParserError> {
        self.expect_separator("{")?;
        let mut members = Vec::new();
        while !self.accept_separator("}") {
            if self.peek().is_end() {
                return self.error("`}`");
            }
            if self.accept_separator(";") {
                continue;
            }
            members.push(self.parse_member_declaration()?);
        }
        Ok(members)
    }

    /// True when the cursor sits on `class`/`interface`/`enum`/`@interface`.
    pub(crate) fn at_type_declaration_keyword(&self) -> bool {
        self.check_keyword("class")
            || self.check_keyword("interface")
            || self.check_keyword("enum")
            || (self.peek().kind == TokenKind::Annotation
                && self.look(1).is_keyword("interface"))
    }

    /// Parses one class-body member: field, method, constructor, nested
    /// type, or initializer block.
    pub fn parse_member_declaration(&mut self) -> Result<MemberDeclaration, ParserError> {
        let position = self.node_position();
        let documentation = self.pending_documentation();
        let (modifiers, annotations) = self.parse_modifiers_and_annotations()?;

        if self.at_type_declaration_keyword() {
            return Ok(MemberDeclaration::Type(self.parse_type_declaration_rest(
                modifiers,
                annotations,
                documentation,
                position,
            )?));
        }

        if self.check_separator("{") {
            let is_static = modifiers.contains(&Modifier::Static);
            let block = self.parse_block()?;
            return Ok(MemberDeclaration::Initializer(InitializerBlock {
                is_static,
                block,
                position,
            }));
        }

        let type_parameters = if self.check_operator("<") {
            self.parse_type_parameters()?
        } else {
            Vec::new()
        };

        // `Name(` opens a constructor.
        if self.check_identifier() && self.look(1).is_separator("(") {
            let name = self.expect_identifier()?;
            let parameters = self.parse_formal_parameters()?;
            let throws = self.parse_throws()?;
            let body = self.parse_block()?;
            return Ok(MemberDeclaration::Constructor(ConstructorDeclaration {
                modifiers,
                annotations,
                documentation,
                type_parameters,
                name,
                parameters,
                throws,
                body,
                position,
            }));
        }

        if self.accept_keyword("void") {
            let name = self.expect_identifier()?;
            return self.parse_method_rest(
                modifiers,
                annotations,
                documentation,
                type_parameters,
                None,
                name,
                position,
            );
        }

        let member_type = self.parse_type()?;
        let name_position = self.node_position();
        let name = self.expect_identifier()?;

        if self.check_separator("(") {
            return self.parse_method_rest(
                modifiers,
                annotations,
                documentation,
                type_parameters,
                Some(member_type),
                name,
                position,
            );
        }

        if !type_parameters.is_empty() {
            // Only methods take type parameters.
            return self.error("`(`");
        }

        let declarators = self.parse_variable_declarators_from(name, name_position)?;
        self.expect_separator(";")?;
        Ok(MemberDeclaration::Field(FieldDeclaration {
            modifiers,
            annotations,
            documentation,
            field_type: member_type,
            declarators,
            position,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_method_rest(
        &mut self,
        modifiers: ModifierSet,
        annotations: Vec<Annotation>,
        documentation: Option<String>,
        type_parameters: Vec<TypeParameter>,
        return_type: Option<Type>,
        name: String,
        position: NodePosition,
    ) -> Result<MemberDeclaration, ParserError> {
        let parameters = self.parse_formal_parameters()?;
        let extra_dimensions = self.parse_array_dimensions();
        let throws = self.parse_throws()?;
        let body = if self.check_separator("{") {
            Some(self.parse_block()?)
        } else {
            self.expect_separator(";")?;
            None
        };
        Ok(MemberDeclaration::Method(MethodDeclaration {
            modifiers,
            annotations,
            documentation,
            type_parameters,
            return_type,
            name,
            parameters,
            extra_dimensions,
            throws,
            body,
            position,
        }))
    }

    fn parse_throws(&mut self) -> Result<Vec<ReferenceType>, ParserError> {
        if self.accept_keyword("throws") {
            self.parse_reference_type_list()
        } else {
            Ok(Vec::new())
        }
    }

    /// A comma-separated list of reference types.
    pub(crate) fn parse_reference_type_list(&mut self) -> Result<Vec<ReferenceType>, ParserError> {
        let mut list = vec![self.parse_reference_type()?];
        while self.accept_separator(",") {
            list.push(self.parse_reference_type()?);
        }
        Ok(list)
    }

    // =========================================================================
    // PARAMETERS AND DECLARATORS
    // =========================================================================

    /// Parses a parenthesized formal parameter list.
    pub(crate) fn parse_formal_parameters(&mut self) -> Result<Vec<FormalParameter>, ParserError> {
        self.expect_separator("(")?;
        let mut parameters = Vec::new();
        if !self.check_separator(")") {
            loop {
                parameters.push(self.parse_formal_parameter()?);
                if !self.accept_separator(",") {
                    break;
                }
            }
        }
        self.expect_separator(")")?;
        Ok(parameters)
    }

    /// One formal parameter, varargs and C-style dimensions included.
    pub(crate) fn parse_formal_parameter(&mut self) -> Result<FormalParameter, ParserError> {
        let position = self.node_position();
        let (modifiers, annotations) = self.parse_modifiers_and_annotations()?;
        let param_type = self.parse_type()?;
        let varargs = self.accept_separator("...");
        let name = self.expect_identifier()?;
        let extra_dimensions = self.parse_array_dimensions();
        Ok(FormalParameter {
            modifiers,
            annotations,
            param_type,
            name,
            varargs,
            extra_dimensions,
            position,
        })
    }

    /// Parses the declarator list of a field or local variable, the first
    /// name already consumed.
    pub(crate) fn parse_variable_declarators_from(
        &mut self,
        name: String,
        position: NodePosition,
    ) -> Result<Vec<VariableDeclarator>, ParserError> {
        let mut declarators = vec![self.parse_variable_declarator_rest(name, position)?];
        while self.accept_separator(",") {
            let position = self.node_position();
            let name = self.expect_identifier()?;
            declarators.push(self.parse_variable_declarator_rest(name, position)?);
        }
        Ok(declarators)
    }

    fn parse_variable_declarator_rest(
        &mut self,
        name: String,
        position: NodePosition,
    ) -> Result<VariableDeclarator, ParserError> {
        let extra_dimensions = self.parse_array_dimensions();
        let initializer = if self.accept_operator("=") {
            Some(self.parse_variable_initializer()?)
        } else {
            None
        };
        Ok(VariableDeclarator {
            name,
            extra_dimensions,
            initializer,
            position,
        })
    }
}
