//! Parser state - class-like declarations and their members
use super::phrase::PhraseKind;
use super::state::ParserState;
use phz_scanner::TokenKind;

const MEMBER_MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "abstract",
    "final",
    "var",
    "readonly",
];

impl ParserState<'_> {
    /// `class`, `interface`, `trait` and `enum` declarations.
    pub(crate) fn parse_class_like_declaration(&mut self, kind: PhraseKind) {
        let mark = self.checkpoint();
        let header = self.checkpoint();
        while self.is_any_keyword(&["abstract", "final", "readonly"]) {
            self.next_token();
        }
        // class / interface / trait / enum
        self.next_token();
        self.parse_expected(TokenKind::Name, "identifier");
        if kind == PhraseKind::EnumDeclaration && self.eat(TokenKind::Colon) {
            self.parse_type_declaration();
        }
        self.parse_class_heritage();
        self.finish(PhraseKind::ClassDeclarationHeader, header);
        self.parse_class_body();
        self.finish(kind, mark);
    }

    /// `extends A, B` and `implements C, D`.
    pub(crate) fn parse_class_heritage(&mut self) {
        for (keyword, clause) in [
            ("extends", PhraseKind::ClassBaseClause),
            ("implements", PhraseKind::ClassInterfaceClause),
        ] {
            if !self.is_keyword(keyword) {
                continue;
            }
            let mark = self.checkpoint();
            self.next_token();
            while self.is_token(TokenKind::Name) {
                self.parse_qualified_name();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.finish(clause, mark);
        }
    }

    pub(crate) fn parse_class_body(&mut self) {
        let mark = self.checkpoint();
        if self.parse_expected(TokenKind::OpenBrace, "{") {
            let list = self.list_checkpoint();
            while !self.is_eof() && !self.is_token(TokenKind::CloseBrace) {
                let before = self.cursor();
                self.parse_class_member();
                if self.cursor() == before {
                    self.error_recovery_skip_token("Member declaration expected.");
                }
            }
            self.finish(PhraseKind::ClassMemberDeclarationList, list);
            self.parse_expected(TokenKind::CloseBrace, "}");
        }
        self.finish(PhraseKind::ClassDeclarationBody, mark);
    }

    fn parse_class_member(&mut self) {
        let mark = self.checkpoint();

        if self.is_keyword("use") {
            self.next_token();
            while self.is_token(TokenKind::Name) {
                self.parse_qualified_name();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            if self.is_token(TokenKind::OpenBrace) {
                self.skip_balanced_braces();
            } else {
                self.parse_semicolon();
            }
            self.finish(PhraseKind::TraitUseClause, mark);
            return;
        }

        if self.is_keyword("case") {
            self.next_token();
            self.parse_expected(TokenKind::Name, "identifier");
            if self.eat(TokenKind::Equals) {
                self.parse_expression();
            }
            self.parse_semicolon();
            self.finish(PhraseKind::EnumCaseDeclaration, mark);
            return;
        }

        let modifiers = self.checkpoint();
        let mut has_modifiers = false;
        while self.is_any_keyword(MEMBER_MODIFIERS) {
            self.next_token();
            has_modifiers = true;
        }
        if has_modifiers {
            self.finish(PhraseKind::MemberModifierList, modifiers);
        }

        if self.is_keyword("function") {
            self.parse_method_declaration_rest();
            self.finish(PhraseKind::MethodDeclaration, mark);
        } else if self.is_keyword("const") {
            self.next_token();
            // Typed constant: `const string NAME = ...`
            if self.nth_is(1, TokenKind::Name) || self.is_token(TokenKind::Question) {
                self.parse_type_declaration();
            }
            self.parse_const_elements(PhraseKind::ClassConstElement);
            self.parse_semicolon();
            self.finish(PhraseKind::ClassConstDeclaration, mark);
        } else if has_modifiers
            || matches!(
                self.token(),
                Some(TokenKind::VariableName | TokenKind::Question)
            )
        {
            self.parse_property_declaration_rest();
            self.finish(PhraseKind::PropertyDeclaration, mark);
        }
    }

    fn parse_method_declaration_rest(&mut self) {
        let header = self.checkpoint();
        self.next_token();
        self.eat(TokenKind::Ampersand);
        // Any identifier, keywords included, names a method.
        self.parse_expected(TokenKind::Name, "identifier");
        self.parse_parameter_list_in_parens();
        self.parse_return_type();
        self.finish(PhraseKind::MethodDeclarationHeader, header);

        let body = self.checkpoint();
        if self.is_token(TokenKind::OpenBrace) {
            self.parse_compound_statement();
        } else {
            self.parse_semicolon();
        }
        self.finish(PhraseKind::MethodDeclarationBody, body);
    }

    fn parse_property_declaration_rest(&mut self) {
        if !self.is_token(TokenKind::VariableName) {
            self.parse_type_declaration();
        }
        loop {
            let element = self.checkpoint();
            if !self.parse_expected(TokenKind::VariableName, "$variable") {
                break;
            }
            if self.eat(TokenKind::Equals) {
                self.parse_expression();
            }
            // Property hooks
            if self.is_token(TokenKind::OpenBrace) {
                self.skip_balanced_braces();
            }
            self.finish(PhraseKind::PropertyElement, element);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if !self.is_token(TokenKind::CloseBrace) {
            self.parse_semicolon();
        }
    }

    /// Consume `{ ... }` as plain tokens.
    fn skip_balanced_braces(&mut self) {
        let mut depth = 0u32;
        while let Some(kind) = self.token() {
            match kind {
                TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                _ => {}
            }
            self.next_token();
        }
    }
}
