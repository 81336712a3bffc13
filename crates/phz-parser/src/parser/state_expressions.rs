//! Parser state - expression parsing methods
//!
//! Binary operators use precedence climbing; the left operand of every
//! binary, postfix and assignment phrase is wrapped retroactively through a
//! checkpoint taken before it was parsed.

use super::phrase::PhraseKind;
use super::state::ParserState;
use phz_scanner::TokenKind;

/// Prefix keywords binding looser than any binary operator.
const LOW_PRECEDENCE_PREFIX: &[&str] = &[
    "yield",
    "print",
    "throw",
    "include",
    "include_once",
    "require",
    "require_once",
];

impl ParserState<'_> {
    /// Full expression, including `and`/`or`/`xor`.
    pub(crate) fn parse_expression(&mut self) {
        if !self.enter_recursion() {
            self.error_recovery_skip_token("Expression expected.");
            return;
        }
        let mark = self.checkpoint();
        self.parse_assignment_expression();
        while self.is_any_keyword(&["and", "or", "xor"]) {
            self.next_token();
            self.parse_assignment_expression();
            self.finish(PhraseKind::LogicalExpression, mark);
        }
        self.exit_recursion();
    }

    pub(crate) fn at_expression_end(&self) -> bool {
        matches!(
            self.token(),
            None | Some(
                TokenKind::Semicolon
                    | TokenKind::CloseParen
                    | TokenKind::CloseBracket
                    | TokenKind::CloseBrace
                    | TokenKind::Comma
                    | TokenKind::CloseTag
                    | TokenKind::FatArrow
                    | TokenKind::Colon
            )
        )
    }

    fn parse_assignment_expression(&mut self) {
        let mark = self.checkpoint();

        if self.is_any_keyword(LOW_PRECEDENCE_PREFIX) {
            let is_yield = self.is_keyword("yield");
            self.next_token();
            if is_yield {
                self.eat_keyword("from");
            }
            if !(is_yield && self.at_expression_end()) {
                self.parse_assignment_expression();
            }
            self.finish(PhraseKind::UnaryOpExpression, mark);
            return;
        }

        self.parse_ternary_expression();
        match self.token() {
            Some(TokenKind::Equals) => {
                self.next_token();
                // `$a = &$b`
                self.eat(TokenKind::Ampersand);
                self.parse_assignment_expression();
                self.finish(PhraseKind::SimpleAssignmentExpression, mark);
            }
            Some(TokenKind::CompoundAssignment) => {
                self.next_token();
                self.parse_assignment_expression();
                self.finish(PhraseKind::CompoundAssignmentExpression, mark);
            }
            _ => {}
        }
    }

    fn parse_ternary_expression(&mut self) {
        let mark = self.checkpoint();
        self.parse_binary_expression(0);
        while self.is_token(TokenKind::Question) {
            self.next_token();
            // `a ?: b` has no middle operand
            if !self.is_token(TokenKind::Colon) {
                self.parse_assignment_expression();
            }
            self.parse_expected(TokenKind::Colon, ":");
            self.parse_assignment_expression();
            self.finish(PhraseKind::TernaryExpression, mark);
        }
    }

    /// Binding power, phrase kind and right-associativity of the current
    /// binary operator.
    fn binary_operator(&self) -> Option<(u8, PhraseKind, bool)> {
        use PhraseKind as P;
        use TokenKind as T;
        Some(match self.token()? {
            T::QuestionQuestion => (1, P::CoalesceExpression, true),
            T::BarBar => (2, P::LogicalExpression, false),
            T::AmpersandAmpersand => (3, P::LogicalExpression, false),
            T::Bar => (4, P::BitwiseExpression, false),
            T::Caret => (5, P::BitwiseExpression, false),
            T::Ampersand => (6, P::BitwiseExpression, false),
            T::EqualsEquals
            | T::ExclamationEquals
            | T::EqualsEqualsEquals
            | T::ExclamationEqualsEquals
            | T::Spaceship => (7, P::EqualityExpression, false),
            T::LessThan | T::GreaterThan | T::LessThanEquals | T::GreaterThanEquals => {
                (8, P::RelationalExpression, false)
            }
            T::Dot => (9, P::AdditiveExpression, false),
            T::LessThanLessThan | T::GreaterThanGreaterThan => (10, P::ShiftExpression, false),
            T::Plus | T::Minus => (11, P::AdditiveExpression, false),
            T::Asterisk | T::Slash | T::Percent => (12, P::MultiplicativeExpression, false),
            T::Name if self.is_keyword("instanceof") => (13, P::InstanceOfExpression, false),
            _ => return None,
        })
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) {
        let mark = self.checkpoint();
        self.parse_unary_expression();
        while let Some((precedence, kind, right_assoc)) = self.binary_operator() {
            if precedence < min_precedence {
                break;
            }
            self.next_token();
            let next_min = if right_assoc {
                precedence
            } else {
                precedence + 1
            };
            self.parse_binary_expression(next_min);
            self.finish(kind, mark);
        }
    }

    fn parse_unary_expression(&mut self) {
        if !self.enter_recursion() {
            self.error_recovery_skip_token("Expression expected.");
            return;
        }
        let mark = self.checkpoint();
        match self.token() {
            Some(
                TokenKind::Exclamation
                | TokenKind::Tilde
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::At
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::Ampersand,
            ) => {
                self.next_token();
                self.parse_unary_expression();
                self.finish(PhraseKind::UnaryOpExpression, mark);
            }
            Some(TokenKind::CastOperator) => {
                self.next_token();
                self.parse_unary_expression();
                self.finish(PhraseKind::CastExpression, mark);
            }
            Some(TokenKind::Name) if self.is_keyword("clone") => {
                self.next_token();
                self.parse_unary_expression();
                self.finish(PhraseKind::UnaryOpExpression, mark);
            }
            Some(TokenKind::Name) if self.is_any_keyword(LOW_PRECEDENCE_PREFIX) => {
                self.parse_assignment_expression();
            }
            _ => {
                self.parse_postfix_expression();
                if self.eat(TokenKind::AsteriskAsterisk) {
                    self.parse_unary_expression();
                    self.finish(PhraseKind::ExponentiationExpression, mark);
                }
            }
        }
        self.exit_recursion();
    }

    fn parse_postfix_expression(&mut self) {
        let mark = self.checkpoint();
        self.parse_primary_expression();
        loop {
            match self.token() {
                Some(TokenKind::OpenBracket) => {
                    self.next_token();
                    if !self.is_token(TokenKind::CloseBracket) {
                        self.parse_expression();
                    }
                    self.parse_expected(TokenKind::CloseBracket, "]");
                    self.finish(PhraseKind::SubscriptExpression, mark);
                }
                Some(TokenKind::Arrow | TokenKind::NullsafeArrow) => {
                    self.next_token();
                    self.parse_member_name();
                    if self.is_token(TokenKind::OpenParen) {
                        self.parse_argument_list_in_parens();
                        self.finish(PhraseKind::MethodCallExpression, mark);
                    } else {
                        self.finish(PhraseKind::PropertyAccessExpression, mark);
                    }
                }
                Some(TokenKind::ColonColon) => {
                    self.next_token();
                    let member = self.checkpoint();
                    let is_variable = matches!(
                        self.token(),
                        Some(TokenKind::VariableName | TokenKind::Dollar)
                    );
                    if is_variable {
                        self.parse_simple_variable();
                    } else if self.is_token(TokenKind::OpenBrace) {
                        self.next_token();
                        self.parse_expression();
                        self.parse_expected(TokenKind::CloseBrace, "}");
                    } else {
                        self.parse_expected(TokenKind::Name, "identifier");
                    }
                    self.finish(PhraseKind::ScopedMemberName, member);
                    let kind = if self.is_token(TokenKind::OpenParen) {
                        self.parse_argument_list_in_parens();
                        PhraseKind::ScopedCallExpression
                    } else if is_variable {
                        PhraseKind::ScopedPropertyAccessExpression
                    } else {
                        PhraseKind::ClassConstantAccessExpression
                    };
                    self.finish(kind, mark);
                }
                Some(TokenKind::OpenParen) => {
                    self.parse_argument_list_in_parens();
                    self.finish(PhraseKind::FunctionCallExpression, mark);
                }
                Some(TokenKind::PlusPlus | TokenKind::MinusMinus) => {
                    self.next_token();
                    self.finish(PhraseKind::PostfixIncrementExpression, mark);
                }
                _ => break,
            }
        }
    }

    fn parse_member_name(&mut self) {
        let mark = self.checkpoint();
        match self.token() {
            Some(TokenKind::Name) => self.next_token(),
            Some(TokenKind::VariableName | TokenKind::Dollar) => self.parse_simple_variable(),
            Some(TokenKind::OpenBrace) => {
                self.next_token();
                self.parse_expression();
                self.parse_expected(TokenKind::CloseBrace, "}");
            }
            _ => self.parse_error_at_current_token("Identifier expected."),
        }
        self.finish(PhraseKind::MemberName, mark);
    }

    /// `$name`, `$$name` and `${expr}`.
    fn parse_simple_variable(&mut self) {
        let mark = self.checkpoint();
        if self.eat(TokenKind::Dollar) {
            if self.eat(TokenKind::OpenBrace) {
                self.parse_expression();
                self.parse_expected(TokenKind::CloseBrace, "}");
            } else if matches!(
                self.token(),
                Some(TokenKind::VariableName | TokenKind::Dollar)
            ) {
                self.parse_simple_variable();
            } else {
                self.parse_error_at_current_token("Variable expected.");
            }
        } else {
            self.parse_expected(TokenKind::VariableName, "$variable");
        }
        self.finish(PhraseKind::SimpleVariable, mark);
    }

    pub(crate) fn parse_argument_list_in_parens(&mut self) {
        self.parse_expected(TokenKind::OpenParen, "(");
        let list = self.checkpoint();
        while !self.is_eof() && !self.is_token(TokenKind::CloseParen) {
            // First-class callable syntax: `strlen(...)`
            if self.is_token(TokenKind::Ellipsis) && self.nth_is(1, TokenKind::CloseParen) {
                self.next_token();
                break;
            }
            let before = self.cursor();
            self.parse_argument();
            if self.cursor() == before || !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.finish(PhraseKind::ArgumentExpressionList, list);
        self.parse_expected(TokenKind::CloseParen, ")");
    }

    fn parse_argument(&mut self) {
        let mark = self.checkpoint();
        if self.eat(TokenKind::Ellipsis) {
            self.parse_expression();
            self.finish(PhraseKind::VariadicUnpacking, mark);
        } else if self.is_token(TokenKind::Name) && self.nth_is(1, TokenKind::Colon) {
            self.next_token();
            self.next_token();
            self.parse_expression();
            self.finish(PhraseKind::NamedArgument, mark);
        } else {
            self.parse_expression();
        }
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) {
        match self.token() {
            Some(TokenKind::VariableName | TokenKind::Dollar) => self.parse_simple_variable(),
            Some(
                TokenKind::IntegerLiteral
                | TokenKind::FloatingLiteral
                | TokenKind::StringLiteral
                | TokenKind::Heredoc,
            ) => self.next_token(),
            Some(TokenKind::OpenBracket) => self.parse_array_creation_expression(),
            Some(TokenKind::OpenParen) => {
                let mark = self.checkpoint();
                self.next_token();
                self.parse_expression();
                self.parse_expected(TokenKind::CloseParen, ")");
                self.finish(PhraseKind::ParenthesizedExpression, mark);
            }
            Some(TokenKind::Backtick) => {
                let mark = self.checkpoint();
                self.next_token();
                while !self.is_eof() && !self.is_token(TokenKind::Backtick) {
                    self.next_token();
                }
                self.parse_expected(TokenKind::Backtick, "`");
                self.finish(PhraseKind::ShellCommandExpression, mark);
            }
            Some(TokenKind::Name) => self.parse_name_expression(),
            _ => {
                // Leave the token for the enclosing list to recover from.
                self.parse_error_at_current_token("Expression expected.");
                let mark = self.checkpoint();
                self.finish(PhraseKind::Error, mark);
            }
        }
    }

    fn parse_name_expression(&mut self) {
        let opens_paren = self.nth_is(1, TokenKind::OpenParen);
        if (self.is_keyword("array") || self.is_keyword("list")) && opens_paren {
            self.parse_array_creation_expression();
        } else if self.is_keyword("function")
            || (self.is_keyword("static") && self.nth_is_keyword(1, "function"))
        {
            self.parse_anonymous_function();
        } else if (self.is_keyword("fn")
            && (opens_paren || self.nth_is(1, TokenKind::Ampersand)))
            || (self.is_keyword("static") && self.nth_is_keyword(1, "fn"))
        {
            self.parse_arrow_function();
        } else if self.is_keyword("new") {
            self.parse_object_creation_expression();
        } else if self.is_keyword("match") && opens_paren {
            self.parse_match_expression();
        } else {
            let mark = self.checkpoint();
            self.parse_qualified_name();
            if !self.is_token(TokenKind::OpenParen) && !self.is_token(TokenKind::ColonColon) {
                self.finish(PhraseKind::ConstantAccessExpression, mark);
            }
        }
    }

    /// `[...]`, `array(...)` and `list(...)`.
    fn parse_array_creation_expression(&mut self) {
        let mark = self.checkpoint();
        let (close, close_text) = if self.eat(TokenKind::OpenBracket) {
            (TokenKind::CloseBracket, "]")
        } else {
            self.next_token();
            self.parse_expected(TokenKind::OpenParen, "(");
            (TokenKind::CloseParen, ")")
        };

        let list = self.checkpoint();
        while !self.is_eof() && !self.is_token(close) {
            // Skipped slot in destructuring: `[, $b] = ...`
            if self.eat(TokenKind::Comma) {
                continue;
            }
            let before = self.cursor();
            self.parse_array_element();
            if self.cursor() == before || !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.finish(PhraseKind::ArrayInitialiserList, list);
        self.parse_expected(close, close_text);
        self.finish(PhraseKind::ArrayCreationExpression, mark);
    }

    /// `key => value`, `value`, `&value` or `...spread`.
    fn parse_array_element(&mut self) {
        let mark = self.checkpoint();
        if self.is_token(TokenKind::Ellipsis) || self.is_token(TokenKind::Ampersand) {
            let value = self.checkpoint();
            self.next_token();
            self.parse_expression();
            self.finish(PhraseKind::ArrayValue, value);
        } else {
            let first = self.checkpoint();
            self.parse_expression();
            if self.is_token(TokenKind::FatArrow) {
                self.finish(PhraseKind::ArrayKey, first);
                self.next_token();
                let value = self.checkpoint();
                self.eat(TokenKind::Ampersand);
                self.parse_expression();
                self.finish(PhraseKind::ArrayValue, value);
            } else {
                self.finish(PhraseKind::ArrayValue, first);
            }
        }
        self.finish(PhraseKind::ArrayElement, mark);
    }

    fn parse_anonymous_function(&mut self) {
        let mark = self.checkpoint();
        self.eat_keyword("static");
        let header = self.checkpoint();
        self.next_token();
        self.eat(TokenKind::Ampersand);
        self.parse_parameter_list_in_parens();
        if self.is_keyword("use") {
            let clause = self.checkpoint();
            self.next_token();
            self.parse_expected(TokenKind::OpenParen, "(");
            while !self.is_eof() && !self.is_token(TokenKind::CloseParen) {
                let variable = self.checkpoint();
                self.eat(TokenKind::Ampersand);
                if !self.parse_expected(TokenKind::VariableName, "$variable") {
                    break;
                }
                self.finish(PhraseKind::AnonymousFunctionUseVariable, variable);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.parse_expected(TokenKind::CloseParen, ")");
            self.finish(PhraseKind::AnonymousFunctionUseClause, clause);
        }
        self.parse_return_type();
        self.finish(PhraseKind::AnonymousFunctionHeader, header);
        self.parse_function_body();
        self.finish(PhraseKind::AnonymousFunctionCreationExpression, mark);
    }

    fn parse_arrow_function(&mut self) {
        let mark = self.checkpoint();
        self.eat_keyword("static");
        let header = self.checkpoint();
        self.next_token();
        self.eat(TokenKind::Ampersand);
        self.parse_parameter_list_in_parens();
        self.parse_return_type();
        self.finish(PhraseKind::ArrowFunctionHeader, header);
        self.parse_expected(TokenKind::FatArrow, "=>");
        let body = self.checkpoint();
        self.parse_assignment_expression();
        self.finish(PhraseKind::ArrowFunctionBody, body);
        self.finish(PhraseKind::ArrowFunction, mark);
    }

    fn parse_object_creation_expression(&mut self) {
        let mark = self.checkpoint();
        self.next_token();

        if self.is_keyword("class") {
            let class = self.checkpoint();
            self.next_token();
            if self.is_token(TokenKind::OpenParen) {
                self.parse_argument_list_in_parens();
            }
            self.parse_class_heritage();
            self.parse_class_body();
            self.finish(PhraseKind::AnonymousClassDeclaration, class);
            self.finish(PhraseKind::ObjectCreationExpression, mark);
            return;
        }

        let designator = self.checkpoint();
        match self.token() {
            Some(TokenKind::Name) => self.parse_qualified_name(),
            Some(TokenKind::VariableName | TokenKind::Dollar) => self.parse_simple_variable(),
            Some(TokenKind::OpenParen) => {
                self.next_token();
                self.parse_expression();
                self.parse_expected(TokenKind::CloseParen, ")");
            }
            _ => self.parse_error_at_current_token("Class name expected."),
        }
        self.finish(PhraseKind::ClassTypeDesignator, designator);
        if self.is_token(TokenKind::OpenParen) {
            self.parse_argument_list_in_parens();
        }
        self.finish(PhraseKind::ObjectCreationExpression, mark);
    }

    fn parse_match_expression(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_expected(TokenKind::OpenParen, "(");
        self.parse_expression();
        self.parse_expected(TokenKind::CloseParen, ")");
        if self.parse_expected(TokenKind::OpenBrace, "{") {
            while !self.is_eof() && !self.is_token(TokenKind::CloseBrace) {
                let arm = self.checkpoint();
                let before = self.cursor();
                if !self.eat_keyword("default") {
                    loop {
                        self.parse_expression();
                        if !self.eat(TokenKind::Comma) || self.is_token(TokenKind::FatArrow) {
                            break;
                        }
                    }
                }
                self.parse_expected(TokenKind::FatArrow, "=>");
                self.parse_expression();
                self.finish(PhraseKind::MatchArm, arm);
                if self.cursor() == before || !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.parse_expected(TokenKind::CloseBrace, "}");
        }
        self.finish(PhraseKind::MatchExpression, mark);
    }
}
