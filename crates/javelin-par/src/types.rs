//! Type parsing: primitive and reference types, type arguments, wildcards,
//! and definition-site type parameters.
//!
//! Closing a type-argument or type-parameter list goes through
//! `expect_close_gt`, which splits a composite `>>`/`>>>` token in place,
//! so `List<Map<K, V>>` needs no lookahead gymnastics. Whole-type parses in
//! ambiguous positions are run speculatively by the callers; everything
//! here reports plain errors and leaves recovery to `try_parse`.

use javelin_util::ParserError;

use crate::ast::*;
use crate::Parser;

impl Parser {
    /// Parses a type use, trailing array dimensions included.
    pub fn parse_type(&mut self) -> Result<Type, ParserError> {
        let ty = self.parse_type_base()?;
        let dims = self.parse_array_dimensions();
        Ok(ty.with_extra_dimensions(dims))
    }

    /// Parses a type use without consuming trailing `[]` pairs. Array
    /// creators read their own dimension list, which may carry lengths.
    pub(crate) fn parse_type_base(&mut self) -> Result<Type, ParserError> {
        let position = self.node_position();
        let annotations = self.parse_annotations()?;
        if let Some(primitive) = self.primitive_at_cursor() {
            self.next_token();
            return Ok(Type::Basic(BasicType {
                annotations,
                name: primitive,
                dimensions: 0,
                position,
            }));
        }
        if !self.check_identifier() {
            return self.error("type");
        }
        let reference = self.parse_reference_type_named(annotations, position)?;
        Ok(Type::Reference(reference))
    }

    /// Parses a reference type (identifier required), dimensions included.
    pub(crate) fn parse_reference_type(&mut self) -> Result<ReferenceType, ParserError> {
        let position = self.node_position();
        let annotations = self.parse_annotations()?;
        let mut reference = self.parse_reference_type_named(annotations, position)?;
        reference.dimensions += self.parse_array_dimensions();
        Ok(reference)
    }

    /// The primitive kind under the cursor, if any.
    pub(crate) fn primitive_at_cursor(&self) -> Option<PrimitiveKind> {
        let token = self.peek();
        if token.kind == javelin_lex::TokenKind::Keyword {
            PrimitiveKind::from_keyword(&token.value)
        } else {
            None
        }
    }

    /// Parses a possibly qualified, possibly parameterized class type.
    ///
    /// Plain name segments collapse into one dotted name; once a segment
    /// carries type arguments, any following segments chain as `sub_type`
    /// (`Outer<T>.Inner<U>`).
    fn parse_reference_type_named(
        &mut self,
        annotations: Vec<Annotation>,
        position: javelin_util::NodePosition,
    ) -> Result<ReferenceType, ParserError> {
        let mut name = self.expect_identifier()?;
        let mut type_arguments = None;

        loop {
            if type_arguments.is_none() && self.check_operator("<") {
                self.next_token();
                type_arguments = Some(self.parse_type_arguments()?);
            }
            if self.check_separator(".") && self.look(1).is_identifier() {
                if type_arguments.is_some() {
                    self.next_token(); // `.`
                    let sub_position = self.node_position();
                    let sub = self.parse_reference_type_named(Vec::new(), sub_position)?;
                    return Ok(ReferenceType {
                        annotations,
                        name,
                        type_arguments,
                        sub_type: Some(Box::new(sub)),
                        dimensions: 0,
                        position,
                    });
                }
                self.next_token(); // `.`
                name.push('.');
                name.push_str(&self.next_token().value);
                continue;
            }
            break;
        }

        Ok(ReferenceType {
            annotations,
            name,
            type_arguments,
            sub_type: None,
            dimensions: 0,
            position,
        })
    }

    /// Parses the contents of a type-argument list after its `<`; an
    /// immediate `>` is the diamond and yields an empty list.
    pub(crate) fn parse_type_arguments(&mut self) -> Result<Vec<TypeArgument>, ParserError> {
        if self.accept_operator(">") {
            return Ok(Vec::new());
        }
        let mut args = vec![self.parse_type_argument()?];
        while self.accept_separator(",") {
            args.push(self.parse_type_argument()?);
        }
        self.expect_close_gt()?;
        Ok(args)
    }

    /// One type argument: a concrete type or a wildcard.
    fn parse_type_argument(&mut self) -> Result<TypeArgument, ParserError> {
        if self.check_operator("?") {
            let position = self.node_position();
            self.next_token();
            let bound = if self.accept_keyword("extends") {
                Some((WildcardBoundKind::Extends, Box::new(self.parse_type()?)))
            } else if self.accept_keyword("super") {
                Some((WildcardBoundKind::Super, Box::new(self.parse_type()?)))
            } else {
                None
            };
            return Ok(TypeArgument::Wildcard(WildcardType { bound, position }));
        }
        Ok(TypeArgument::Concrete(self.parse_type()?))
    }

    /// Consumes `[]` pairs; a `[` not directly followed by `]` belongs to
    /// an array access or creator and is left alone.
    pub(crate) fn parse_array_dimensions(&mut self) -> usize {
        let mut dims = 0;
        while self.check_separator("[") && self.look(1).is_separator("]") {
            self.next_token();
            self.next_token();
            dims += 1;
        }
        dims
    }

    /// Parses a `<T, U extends A & B>` type-parameter list, `<` included.
    pub(crate) fn parse_type_parameters(&mut self) -> Result<Vec<TypeParameter>, ParserError> {
        self.expect_operator("<")?;
        let mut params = vec![self.parse_type_parameter()?];
        while self.accept_separator(",") {
            params.push(self.parse_type_parameter()?);
        }
        self.expect_close_gt()?;
        Ok(params)
    }

    fn parse_type_parameter(&mut self) -> Result<TypeParameter, ParserError> {
        let position = self.node_position();
        let annotations = self.parse_annotations()?;
        let name = self.expect_identifier()?;
        let mut extends = Vec::new();
        if self.accept_keyword("extends") {
            extends.push(self.parse_reference_type()?);
            while self.accept_operator("&") {
                extends.push(self.parse_reference_type()?);
            }
        }
        Ok(TypeParameter {
            annotations,
            name,
            extends,
            position,
        })
    }
}
