use crate::scanner_impl::scan;
use crate::token::TokenKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source)
        .tokens
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| *k != TokenKind::Whitespace)
        .collect()
}

fn texts(source: &str) -> Vec<&str> {
    scan(source)
        .tokens
        .into_iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .map(|t| t.text(source))
        .collect()
}

#[test]
fn test_inline_html_then_php() {
    let source = "<html><?php echo 1; ?>tail";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::InlineHtml,
            TokenKind::OpenTag,
            TokenKind::Name,
            TokenKind::IntegerLiteral,
            TokenKind::Semicolon,
            TokenKind::CloseTag,
            TokenKind::InlineHtml,
        ]
    );
}

#[test]
fn test_tokens_cover_whole_source() {
    let source = "<?php\n$x = ['a' => 1, \"b\" => 2.5];\n// done\n";
    let result = scan(source);
    let mut expected_pos = 0;
    for token in &result.tokens {
        assert_eq!(token.pos, expected_pos);
        expected_pos = token.end;
    }
    assert_eq!(expected_pos as usize, source.len());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_variables_and_names() {
    let source = "<?php $foo = \\App\\Util::make($bar, $$baz);";
    assert_eq!(
        texts(source),
        vec![
            "<?php", "$foo", "=", "\\App\\Util", "::", "make", "(", "$bar", ",", "$", "$baz",
            ")", ";",
        ]
    );
}

#[test]
fn test_array_subscript_with_string_key() {
    let source = "<?php echo $x['a'];";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::OpenTag,
            TokenKind::Name,
            TokenKind::VariableName,
            TokenKind::OpenBracket,
            TokenKind::StringLiteral,
            TokenKind::CloseBracket,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_numbers() {
    let source = "<?php 42 0x1F 0b101 0o17 1_000 3.14 .5 1e10 2.5E-3";
    let result = kinds(source);
    assert_eq!(
        &result[1..],
        &[
            TokenKind::IntegerLiteral,
            TokenKind::IntegerLiteral,
            TokenKind::IntegerLiteral,
            TokenKind::IntegerLiteral,
            TokenKind::IntegerLiteral,
            TokenKind::FloatingLiteral,
            TokenKind::FloatingLiteral,
            TokenKind::FloatingLiteral,
            TokenKind::FloatingLiteral,
        ]
    );
}

#[test]
fn test_integer_followed_by_concat() {
    let source = "<?php 1.'x'";
    assert_eq!(texts(source), vec!["<?php", "1", ".", "'x'"]);
}

#[test]
fn test_string_escapes() {
    let source = r#"<?php 'it\'s' "say \"hi\"""#;
    assert_eq!(texts(source), vec!["<?php", r"'it\'s'", r#""say \"hi\"""#]);
}

#[test]
fn test_unterminated_string_recovers_at_line_end() {
    let source = "<?php $a = 'oops;\n$b = 1;";
    let result = scan(source);
    assert_eq!(result.diagnostics.len(), 1);
    let string = result
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::StringLiteral)
        .expect("string token");
    assert_eq!(string.text(source), "'oops;");
    assert!(
        result
            .tokens
            .iter()
            .any(|t| t.kind == TokenKind::VariableName && t.text(source) == "$b")
    );
}

#[test]
fn test_doc_comment_vs_block_comment() {
    let source = "<?php /** @return int */ /* plain */ /**/ // line\n# hash\n";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::OpenTag,
            TokenKind::DocumentComment,
            TokenKind::Comment,
            TokenKind::Comment,
            TokenKind::Comment,
            TokenKind::Comment,
        ]
    );
}

#[test]
fn test_line_comment_stops_before_close_tag() {
    let source = "<?php // note ?>html";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::OpenTag,
            TokenKind::Comment,
            TokenKind::CloseTag,
            TokenKind::InlineHtml,
        ]
    );
}

#[test]
fn test_attribute_is_trivia() {
    let source = "<?php #[Attr(['x' => 1])] function f() {}";
    let result = kinds(source);
    assert_eq!(result[1], TokenKind::Comment);
    assert_eq!(result[2], TokenKind::Name);
}

#[test]
fn test_cast_operator() {
    let source = "<?php (int) $x; (string)$y; ($z)";
    let result = kinds(source);
    assert_eq!(result[1], TokenKind::CastOperator);
    assert_eq!(result[4], TokenKind::CastOperator);
    assert_eq!(result[7], TokenKind::OpenParen);
}

#[test]
fn test_longest_match_operators() {
    let source = "<?php === !== <=> ?? ??= ?-> -> => ... ** **= .= << >>";
    assert_eq!(
        &kinds(source)[1..],
        &[
            TokenKind::EqualsEqualsEquals,
            TokenKind::ExclamationEqualsEquals,
            TokenKind::Spaceship,
            TokenKind::QuestionQuestion,
            TokenKind::CompoundAssignment,
            TokenKind::NullsafeArrow,
            TokenKind::Arrow,
            TokenKind::FatArrow,
            TokenKind::Ellipsis,
            TokenKind::AsteriskAsterisk,
            TokenKind::CompoundAssignment,
            TokenKind::CompoundAssignment,
            TokenKind::LessThanLessThan,
            TokenKind::GreaterThanGreaterThan,
        ]
    );
}

#[test]
fn test_heredoc() {
    let source = "<?php $s = <<<EOT\nline $a\n  EOT;\n$t = 1;";
    let result = scan(source);
    let heredoc = result
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::Heredoc)
        .expect("heredoc token");
    assert_eq!(heredoc.text(source), "<<<EOT\nline $a\n  EOT");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_unicode_bytes_do_not_split_tokens() {
    let source = "<?php $café = 'é'; ¤";
    let result = scan(source);
    for token in &result.tokens {
        assert!(source.is_char_boundary(token.pos as usize));
        assert!(source.is_char_boundary(token.end as usize));
    }
}
