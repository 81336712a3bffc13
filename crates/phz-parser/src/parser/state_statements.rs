//! Parser state - statement and declaration parsing methods
use super::phrase::PhraseKind;
use super::state::ParserState;
use phz_scanner::TokenKind;

impl ParserState<'_> {
    // =========================================================================
    // Statement lists
    // =========================================================================

    /// Parse statements until `at_end` holds (or input ends).
    ///
    /// The list checkpoint does not flush trivia, so a doc comment in front
    /// of the first statement stays inside the list, next to its statement.
    pub(crate) fn parse_statement_list(&mut self, at_end: impl Fn(&Self) -> bool) {
        let mark = self.list_checkpoint();
        while !self.is_eof() && !at_end(self) {
            let before = self.cursor();
            self.parse_statement();
            if self.cursor() == before {
                self.error_recovery_skip_token("Statement expected.");
            }
        }
        self.finish(PhraseKind::StatementList, mark);
    }

    pub(crate) fn parse_statement(&mut self) {
        if !self.enter_recursion() {
            self.error_recovery_skip_token("Statement expected.");
            return;
        }
        match self.token() {
            None => {}
            Some(TokenKind::InlineHtml | TokenKind::OpenTag | TokenKind::CloseTag) => {
                self.parse_inline_text();
            }
            Some(TokenKind::OpenTagWithEcho) => self.parse_echo_statement(),
            Some(TokenKind::OpenBrace) => self.parse_compound_statement(),
            Some(TokenKind::Semicolon) => {
                let mark = self.checkpoint();
                self.next_token();
                self.finish(PhraseKind::NullStatement, mark);
            }
            Some(TokenKind::Name) => self.parse_keyword_statement(),
            Some(_) => self.parse_expression_statement(),
        }
        self.exit_recursion();
    }

    fn parse_keyword_statement(&mut self) {
        let Some(token) = self.current() else {
            return;
        };
        let keyword = token.text(self.source).to_ascii_lowercase();
        match keyword.as_str() {
            "function"
                if self.nth_is(1, TokenKind::Name)
                    || (self.nth_is(1, TokenKind::Ampersand) && self.nth_is(2, TokenKind::Name)) =>
            {
                self.parse_function_declaration()
            }
            "abstract" | "final" | "readonly"
                if (1..=3).any(|n| self.nth_is_keyword(n, "class")) =>
            {
                self.parse_class_like_declaration(PhraseKind::ClassDeclaration)
            }
            "class" if self.nth_is(1, TokenKind::Name) => {
                self.parse_class_like_declaration(PhraseKind::ClassDeclaration)
            }
            "interface" if self.nth_is(1, TokenKind::Name) => {
                self.parse_class_like_declaration(PhraseKind::InterfaceDeclaration)
            }
            "trait" if self.nth_is(1, TokenKind::Name) => {
                self.parse_class_like_declaration(PhraseKind::TraitDeclaration)
            }
            "enum"
                if self.nth_is(1, TokenKind::Name)
                    && (self.nth_is(2, TokenKind::OpenBrace)
                        || self.nth_is(2, TokenKind::Colon)
                        || self.nth_is_keyword(2, "implements")) =>
            {
                self.parse_class_like_declaration(PhraseKind::EnumDeclaration)
            }
            "namespace"
                if self.nth_is(1, TokenKind::Name) || self.nth_is(1, TokenKind::OpenBrace) =>
            {
                self.parse_namespace_definition()
            }
            "use" => self.parse_namespace_use_declaration(),
            "const" => self.parse_const_declaration(),
            "if" => self.parse_if_statement(),
            "while" => self.parse_while_statement(),
            "do" => self.parse_do_statement(),
            "for" => self.parse_for_statement(),
            "foreach" => self.parse_foreach_statement(),
            "switch" => self.parse_switch_statement(),
            "break" => self.parse_jump_statement(PhraseKind::BreakStatement),
            "continue" => self.parse_jump_statement(PhraseKind::ContinueStatement),
            "return" => self.parse_jump_statement(PhraseKind::ReturnStatement),
            "echo" => self.parse_echo_statement(),
            "global" => self.parse_global_declaration(),
            "static" if self.nth_is(1, TokenKind::VariableName) => {
                self.parse_function_static_declaration()
            }
            "try" => self.parse_try_statement(),
            "throw" => self.parse_throw_statement(),
            "declare" if self.nth_is(1, TokenKind::OpenParen) => self.parse_declare_statement(),
            "goto" if self.nth_is(1, TokenKind::Name) => {
                let mark = self.checkpoint();
                self.next_token();
                self.next_token();
                self.parse_semicolon();
                self.finish(PhraseKind::GotoStatement, mark);
            }
            "default" | "case" | "else" => self.parse_expression_statement(),
            _ if self.nth_is(1, TokenKind::Colon) => {
                let mark = self.checkpoint();
                self.next_token();
                self.next_token();
                self.finish(PhraseKind::NamedLabelStatement, mark);
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_inline_text(&mut self) {
        let mark = self.checkpoint();
        while matches!(
            self.token(),
            Some(TokenKind::InlineHtml | TokenKind::OpenTag | TokenKind::CloseTag)
        ) {
            self.next_token();
        }
        self.finish(PhraseKind::InlineText, mark);
    }

    pub(crate) fn parse_compound_statement(&mut self) {
        let mark = self.checkpoint();
        if self.parse_expected(TokenKind::OpenBrace, "{") {
            self.parse_statement_list(|p| p.is_token(TokenKind::CloseBrace));
            self.parse_expected(TokenKind::CloseBrace, "}");
        }
        self.finish(PhraseKind::CompoundStatement, mark);
    }

    fn parse_expression_statement(&mut self) {
        // Closers cannot start a statement; the list loop recovers.
        if self.at_expression_end() {
            return;
        }
        let mark = self.checkpoint();
        self.parse_expression();
        self.parse_semicolon();
        self.finish(PhraseKind::ExpressionStatement, mark);
    }

    /// `return`, `break` and `continue` with an optional operand.
    fn parse_jump_statement(&mut self, kind: PhraseKind) {
        let mark = self.checkpoint();
        self.next_token();
        if !self.at_expression_end() {
            self.parse_expression();
        }
        self.parse_semicolon();
        self.finish(kind, mark);
    }

    fn parse_echo_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_expression_list_until(TokenKind::Semicolon);
        self.parse_semicolon();
        self.finish(PhraseKind::EchoStatement, mark);
    }

    fn parse_throw_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_expression();
        self.parse_semicolon();
        self.finish(PhraseKind::ThrowStatement, mark);
    }

    /// Comma-separated expressions, stopping before `end`.
    pub(crate) fn parse_expression_list_until(&mut self, end: TokenKind) {
        while !self.is_eof() && !self.is_token(end) && !self.is_token(TokenKind::CloseTag) {
            self.parse_expression();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    fn parse_parenthesized_condition(&mut self) {
        self.parse_expected(TokenKind::OpenParen, "(");
        self.parse_expression();
        self.parse_expected(TokenKind::CloseParen, ")");
    }

    /// Statement body, or `: statements endkeyword;` alternative syntax.
    fn parse_loop_body(&mut self, end_keyword: &'static str) {
        if self.eat(TokenKind::Colon) {
            self.parse_statement_list(|p| p.is_keyword(end_keyword));
            if !self.eat_keyword(end_keyword) {
                self.parse_error_at_current_token(&format!("'{end_keyword}' expected."));
            }
            self.parse_semicolon();
        } else {
            self.parse_statement();
        }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_parenthesized_condition();

        if self.eat(TokenKind::Colon) {
            const ENDS: &[&str] = &["elseif", "else", "endif"];
            self.parse_statement_list(|p| p.is_any_keyword(ENDS));
            loop {
                if self.is_keyword("elseif") {
                    let clause = self.checkpoint();
                    self.next_token();
                    self.parse_parenthesized_condition();
                    self.parse_expected(TokenKind::Colon, ":");
                    self.parse_statement_list(|p| p.is_any_keyword(ENDS));
                    self.finish(PhraseKind::ElseIfClause, clause);
                } else if self.is_keyword("else") {
                    let clause = self.checkpoint();
                    self.next_token();
                    self.parse_expected(TokenKind::Colon, ":");
                    self.parse_statement_list(|p| p.is_keyword("endif"));
                    self.finish(PhraseKind::ElseClause, clause);
                } else {
                    break;
                }
            }
            if !self.eat_keyword("endif") {
                self.parse_error_at_current_token("'endif' expected.");
            }
            self.parse_semicolon();
        } else {
            self.parse_statement();
            while self.is_keyword("elseif") {
                let clause = self.checkpoint();
                self.next_token();
                self.parse_parenthesized_condition();
                self.parse_statement();
                self.finish(PhraseKind::ElseIfClause, clause);
            }
            if self.is_keyword("else") {
                let clause = self.checkpoint();
                self.next_token();
                self.parse_statement();
                self.finish(PhraseKind::ElseClause, clause);
            }
        }
        self.finish(PhraseKind::IfStatement, mark);
    }

    fn parse_while_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_parenthesized_condition();
        self.parse_loop_body("endwhile");
        self.finish(PhraseKind::WhileStatement, mark);
    }

    fn parse_do_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_statement();
        if !self.eat_keyword("while") {
            self.parse_error_at_current_token("'while' expected.");
        }
        self.parse_parenthesized_condition();
        self.parse_semicolon();
        self.finish(PhraseKind::DoStatement, mark);
    }

    fn parse_for_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_expected(TokenKind::OpenParen, "(");
        self.parse_expression_list_until(TokenKind::Semicolon);
        self.parse_expected(TokenKind::Semicolon, ";");
        self.parse_expression_list_until(TokenKind::Semicolon);
        self.parse_expected(TokenKind::Semicolon, ";");
        self.parse_expression_list_until(TokenKind::CloseParen);
        self.parse_expected(TokenKind::CloseParen, ")");
        self.parse_loop_body("endfor");
        self.finish(PhraseKind::ForStatement, mark);
    }

    /// `foreach (collection as [key =>] [&]value) body`
    fn parse_foreach_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_expected(TokenKind::OpenParen, "(");

        let collection = self.checkpoint();
        self.parse_expression();
        self.finish(PhraseKind::ForeachCollection, collection);

        if !self.eat_keyword("as") {
            self.parse_error_at_current_token("'as' expected.");
        }

        let first = self.checkpoint();
        self.eat(TokenKind::Ampersand);
        self.parse_expression();
        if self.is_token(TokenKind::FatArrow) {
            self.finish(PhraseKind::ForeachKey, first);
            self.next_token();
            let value = self.checkpoint();
            self.eat(TokenKind::Ampersand);
            self.parse_expression();
            self.finish(PhraseKind::ForeachValue, value);
        } else {
            self.finish(PhraseKind::ForeachValue, first);
        }

        self.parse_expected(TokenKind::CloseParen, ")");
        self.parse_loop_body("endforeach");
        self.finish(PhraseKind::ForeachStatement, mark);
    }

    fn parse_switch_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_parenthesized_condition();

        let alternative = self.eat(TokenKind::Colon);
        if !alternative {
            self.parse_expected(TokenKind::OpenBrace, "{");
        }
        let at_end = move |p: &Self| {
            if alternative {
                p.is_keyword("endswitch")
            } else {
                p.is_token(TokenKind::CloseBrace)
            }
        };

        while !self.is_eof() && !at_end(self) {
            if self.is_keyword("case") || self.is_keyword("default") {
                let case = self.checkpoint();
                let is_case = self.is_keyword("case");
                self.next_token();
                if is_case {
                    self.parse_expression();
                }
                if !self.eat(TokenKind::Colon) && !self.eat(TokenKind::Semicolon) {
                    self.parse_error_at_current_token("':' expected.");
                }
                self.parse_statement_list(|p| {
                    p.is_keyword("case") || p.is_keyword("default") || at_end(p)
                });
                self.finish(PhraseKind::CaseStatement, case);
            } else {
                self.error_recovery_skip_token("'case' expected.");
            }
        }

        if alternative {
            if !self.eat_keyword("endswitch") {
                self.parse_error_at_current_token("'endswitch' expected.");
            }
            self.parse_semicolon();
        } else {
            self.parse_expected(TokenKind::CloseBrace, "}");
        }
        self.finish(PhraseKind::SwitchStatement, mark);
    }

    fn parse_try_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_compound_statement();

        while self.is_keyword("catch") {
            let clause = self.checkpoint();
            self.next_token();
            self.parse_expected(TokenKind::OpenParen, "(");
            self.parse_type_declaration();
            self.eat(TokenKind::VariableName);
            self.parse_expected(TokenKind::CloseParen, ")");
            self.parse_compound_statement();
            self.finish(PhraseKind::CatchClause, clause);
        }
        if self.is_keyword("finally") {
            let clause = self.checkpoint();
            self.next_token();
            self.parse_compound_statement();
            self.finish(PhraseKind::FinallyClause, clause);
        }
        self.finish(PhraseKind::TryStatement, mark);
    }

    fn parse_declare_statement(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_expected(TokenKind::OpenParen, "(");
        self.parse_expression_list_until(TokenKind::CloseParen);
        self.parse_expected(TokenKind::CloseParen, ")");
        if self.is_token(TokenKind::Colon) {
            self.parse_loop_body("enddeclare");
        } else if !self.eat(TokenKind::Semicolon) {
            self.parse_statement();
        }
        self.finish(PhraseKind::DeclareStatement, mark);
    }

    // =========================================================================
    // Variable declarations
    // =========================================================================

    fn parse_global_declaration(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_expression_list_until(TokenKind::Semicolon);
        self.parse_semicolon();
        self.finish(PhraseKind::GlobalDeclaration, mark);
    }

    fn parse_function_static_declaration(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        loop {
            let element = self.checkpoint();
            if !self.parse_expected(TokenKind::VariableName, "$variable") {
                break;
            }
            if self.eat(TokenKind::Equals) {
                self.parse_expression();
            }
            self.finish(PhraseKind::StaticVariableDeclaration, element);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.parse_semicolon();
        self.finish(PhraseKind::FunctionStaticDeclaration, mark);
    }

    // =========================================================================
    // Namespaces and constants
    // =========================================================================

    fn parse_namespace_definition(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        if self.is_token(TokenKind::Name) {
            self.parse_qualified_name();
        }
        if self.is_token(TokenKind::OpenBrace) {
            self.parse_compound_statement();
        } else {
            self.parse_semicolon();
        }
        self.finish(PhraseKind::NamespaceDefinition, mark);
    }

    /// Import lists are kept as flat token runs: no resolution step reads them.
    fn parse_namespace_use_declaration(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        let mut depth = 0u32;
        while let Some(kind) = self.token() {
            match kind {
                TokenKind::Semicolon | TokenKind::CloseTag if depth == 0 => break,
                TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseBrace if depth == 0 => break,
                TokenKind::CloseBrace => depth -= 1,
                _ => {}
            }
            self.next_token();
        }
        self.parse_semicolon();
        self.finish(PhraseKind::NamespaceUseDeclaration, mark);
    }

    fn parse_const_declaration(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.parse_const_elements(PhraseKind::ConstElement);
        self.parse_semicolon();
        self.finish(PhraseKind::ConstDeclaration, mark);
    }

    /// `NAME = expr, NAME = expr`
    pub(crate) fn parse_const_elements(&mut self, element_kind: PhraseKind) {
        loop {
            let element = self.checkpoint();
            if !self.parse_expected(TokenKind::Name, "identifier") {
                break;
            }
            self.parse_expected(TokenKind::Equals, "=");
            self.parse_expression();
            self.finish(element_kind, element);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn parse_function_declaration(&mut self) {
        let mark = self.checkpoint();
        let header = self.checkpoint();
        self.next_token();
        self.eat(TokenKind::Ampersand);
        self.parse_expected(TokenKind::Name, "identifier");
        self.parse_parameter_list_in_parens();
        self.parse_return_type();
        self.finish(PhraseKind::FunctionDeclarationHeader, header);
        self.parse_function_body();
        self.finish(PhraseKind::FunctionDeclaration, mark);
    }

    /// `{ statements }` of a named or anonymous function.
    pub(crate) fn parse_function_body(&mut self) {
        let mark = self.checkpoint();
        if self.parse_expected(TokenKind::OpenBrace, "{") {
            self.parse_statement_list(|p| p.is_token(TokenKind::CloseBrace));
            self.parse_expected(TokenKind::CloseBrace, "}");
        }
        self.finish(PhraseKind::FunctionDeclarationBody, mark);
    }

    pub(crate) fn parse_parameter_list_in_parens(&mut self) {
        self.parse_expected(TokenKind::OpenParen, "(");
        let list = self.checkpoint();
        while !self.is_eof() && !self.is_token(TokenKind::CloseParen) {
            let before = self.cursor();
            self.parse_parameter();
            if self.cursor() == before || !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.finish(PhraseKind::ParameterDeclarationList, list);
        self.parse_expected(TokenKind::CloseParen, ")");
    }

    /// `[modifiers] [Type] [&] [...] $name [= default]`
    fn parse_parameter(&mut self) {
        let mark = self.checkpoint();
        while self.is_any_keyword(&["public", "protected", "private", "readonly"]) {
            self.next_token();
        }
        if !matches!(
            self.token(),
            Some(TokenKind::VariableName | TokenKind::Ampersand | TokenKind::Ellipsis)
        ) {
            self.parse_type_declaration();
        }
        self.eat(TokenKind::Ampersand);
        self.eat(TokenKind::Ellipsis);
        if !self.eat(TokenKind::VariableName) {
            self.parse_error_at_current_token("Variable expected.");
        }
        if self.eat(TokenKind::Equals) {
            self.parse_expression();
        }
        self.finish(PhraseKind::ParameterDeclaration, mark);
    }

    pub(crate) fn parse_return_type(&mut self) {
        if self.is_token(TokenKind::Colon) {
            let mark = self.checkpoint();
            self.next_token();
            self.parse_type_declaration();
            self.finish(PhraseKind::ReturnType, mark);
        }
    }

    /// Native type hints: `?T`, `A|B`, `A&B`, `(A&B)|null`.
    /// Produces nothing when no type is present.
    pub(crate) fn parse_type_declaration(&mut self) {
        let mark = self.checkpoint();
        let before = self.cursor();
        loop {
            self.eat(TokenKind::Question);
            if self.eat(TokenKind::OpenParen) {
                self.parse_type_declaration();
                self.parse_expected(TokenKind::CloseParen, ")");
            } else if self.is_token(TokenKind::Name) {
                self.parse_qualified_name();
            } else {
                break;
            }
            let intersection = self.is_token(TokenKind::Ampersand)
                && !matches!(
                    self.nth_kind(1),
                    Some(TokenKind::VariableName | TokenKind::Ellipsis | TokenKind::Ampersand)
                );
            if self.is_token(TokenKind::Bar) || intersection {
                self.next_token();
            } else {
                break;
            }
        }
        if self.cursor() != before {
            self.finish(PhraseKind::TypeDeclaration, mark);
        }
    }

    pub(crate) fn parse_qualified_name(&mut self) {
        let mark = self.checkpoint();
        self.next_token();
        self.finish(PhraseKind::QualifiedName, mark);
    }
}
