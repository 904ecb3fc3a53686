//! Declaration-level parser for Go source.
//!
//! Converts a token stream into a [`SourceFile`]: the package clause plus every
//! top-level `func` declaration parsed through its signature.
//!
//! ## Notes
//! - Imports and `type`/`const`/`var` declarations are skipped, balanced to their
//!   terminating semicolon. Function bodies are skipped brace-balanced.
//! - Field lists use the same resolution as `go/parser`: a comma-separated run of
//!   items is read as types first, and reinterpreted as names if a type follows.
//! - Function type parameters (`func F[T any]`) are rejected; generics are out of
//!   scope for the generator.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use ctxstrip_syntax::{lexer, parser};
//!
//! let source = "package demo\n\nfunc Ping() error { return nil }\n";
//! let tokens = lexer::lex(source).unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.decls.len(), 1);
//! ```

use crate::ast::{FuncDecl, Ident, Param, Receiver, SourceFile, Span, TypeExpr};
use crate::diagnostics::CompileError;
use crate::lexer::{Keyword, Punct, Token, TokenKind};

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at
///   declaration boundaries, so one file reports all its problems in one run.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`SourceFile`].
    ///
    /// ## Errors
    /// Returns a list of [`CompileError`]s if parsing fails. The parser attempts
    /// to recover and continue after an error to report multiple issues in one pass.
    pub fn parse(mut self) -> Result<SourceFile, Vec<CompileError>> {
        self.skip_semis();

        let package = match self.package_clause() {
            Ok(name) => name,
            Err(e) => {
                return Err(vec![e]);
            }
        };

        let mut decls = Vec::new();
        loop {
            self.skip_semis();
            if self.is_at_end() {
                break;
            }
            match self.top_level_decl() {
                Ok(Some(decl)) => decls.push(decl),
                Ok(None) => {}
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(SourceFile { package, decls })
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            &self.tokens[self.pos + 1]
        } else {
            &self.tokens[self.tokens.len() - 1]
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn check_keyword(&self, id: Keyword) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: Punct) -> bool {
        self.peek().kind.is_punct(id)
    }

    fn match_keyword(&mut self, id: Keyword) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: Punct) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: Keyword, msg: &str) -> Result<&Token, CompileError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(CompileError::new(
                format!("{}, found {:?}", msg, self.peek().kind),
                self.peek().span,
            ))
        }
    }

    fn expect_punct(&mut self, id: Punct, msg: &str) -> Result<&Token, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(CompileError::new(
                format!("{}, found {:?}", msg, self.peek().kind),
                self.peek().span,
            ))
        }
    }

    fn identifier(&mut self) -> Result<Ident, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(CompileError::new(
                format!("expected identifier, found {:?}", other),
                self.peek().span,
            )),
        }
    }

    fn skip_semis(&mut self) {
        while self.match_punct(Punct::Semi) {}
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Skip to the next declaration boundary after an error.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.check_keyword(Keyword::Func)
                || self.check_keyword(Keyword::Import)
                || self.check_keyword(Keyword::Type)
                || self.check_keyword(Keyword::Const)
                || self.check_keyword(Keyword::Var)
            {
                return;
            }
            if self.match_punct(Punct::Semi) {
                return;
            }
            self.advance();
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn package_clause(&mut self) -> Result<Ident, CompileError> {
        self.expect_keyword(Keyword::Package, "expected 'package' clause")?;
        let name = self.identifier()?;
        self.skip_semis();
        Ok(name)
    }

    /// Parse or skip one top-level declaration. Returns `Some` for `func` decls.
    fn top_level_decl(&mut self) -> Result<Option<FuncDecl>, CompileError> {
        if self.check_keyword(Keyword::Func) {
            return self.func_decl().map(Some);
        }
        if self.match_keyword(Keyword::Import) {
            self.skip_paren_or_line()?;
            return Ok(None);
        }
        if self.match_keyword(Keyword::Type)
            || self.match_keyword(Keyword::Const)
            || self.match_keyword(Keyword::Var)
        {
            self.skip_paren_or_line()?;
            return Ok(None);
        }
        Err(CompileError::new(
            format!("expected declaration, found {:?}", self.peek().kind),
            self.current_span(),
        ))
    }

    /// Skip a `( ... )` group, or everything up to the terminating semicolon.
    ///
    /// Used for imports and type/const/var declarations, whose contents the
    /// generator never inspects.
    fn skip_paren_or_line(&mut self) -> Result<(), CompileError> {
        if self.match_punct(Punct::LParen) {
            self.skip_balanced(Punct::LParen, Punct::RParen, 1)?;
            return Ok(());
        }
        // Up to the semicolon, balanced: composite literal braces and index
        // brackets may appear in initializer expressions.
        let mut depth = 0usize;
        while !self.is_at_end() {
            match &self.peek().kind {
                TokenKind::Punct(Punct::LParen)
                | TokenKind::Punct(Punct::LBracket)
                | TokenKind::Punct(Punct::LBrace) => depth += 1,
                TokenKind::Punct(Punct::RParen)
                | TokenKind::Punct(Punct::RBracket)
                | TokenKind::Punct(Punct::RBrace) => depth = depth.saturating_sub(1),
                TokenKind::Punct(Punct::Semi) if depth == 0 => {
                    self.advance();
                    return Ok(());
                }
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// Skip tokens until `open`/`close` nesting returns to zero.
    /// `depth` is the nesting already consumed by the caller.
    fn skip_balanced(&mut self, open: Punct, close: Punct, mut depth: usize) -> Result<(), CompileError> {
        let start = self.current_span();
        while depth > 0 {
            if self.is_at_end() {
                return Err(CompileError::new(
                    format!("unterminated {:?} group", open),
                    start,
                ));
            }
            let tok = self.advance();
            if tok.kind.is_punct(open) {
                depth += 1;
            } else if tok.kind.is_punct(close) {
                depth -= 1;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn func_decl(&mut self) -> Result<FuncDecl, CompileError> {
        let start = self.current_span().start;
        self.expect_keyword(Keyword::Func, "expected 'func'")?;

        let recv = if self.check_punct(Punct::LParen) {
            Some(self.receiver()?)
        } else {
            None
        };

        let name = self.identifier()?;

        if self.check_punct(Punct::LBracket) {
            return Err(CompileError::new(
                format!("function '{}' declares type parameters", name),
                self.current_span(),
            )
            .with_note("generic functions are not supported"));
        }

        self.expect_punct(Punct::LParen, "expected '(' after function name")?;
        let params = self.field_list(Punct::RParen)?;
        self.expect_punct(Punct::RParen, "expected ')' after parameters")?;

        let results = self.results()?;

        // Body, if present: opaque, brace-balanced.
        if self.match_punct(Punct::LBrace) {
            self.skip_balanced(Punct::LBrace, Punct::RBrace, 1)?;
        }

        let end = self.tokens[self.pos.saturating_sub(1)].span.end;
        Ok(FuncDecl {
            name,
            recv,
            params,
            results,
            span: Span::new(start, end),
        })
    }

    /// Parse a method receiver: `(c *Client)`, `(*Client)`, `(Client)`.
    fn receiver(&mut self) -> Result<Receiver, CompileError> {
        self.expect_punct(Punct::LParen, "expected '(' before receiver")?;

        // `(name Type)` iff an identifier is followed by more than the closing paren.
        let name = match (&self.peek().kind, &self.peek_next().kind) {
            (TokenKind::Ident(n), next) if !next.is_punct(Punct::RParen) && !next.is_punct(Punct::Dot) => {
                let n = n.clone();
                self.advance();
                Some(n)
            }
            _ => None,
        };

        let ty = self.type_expr()?;
        self.expect_punct(Punct::RParen, "expected ')' after receiver")?;
        Ok(Receiver { name, ty })
    }

    /// Parse the result list: absent, a single bare type, or a parenthesized field list.
    fn results(&mut self) -> Result<Vec<Param>, CompileError> {
        if self.match_punct(Punct::LParen) {
            let results = self.field_list(Punct::RParen)?;
            self.expect_punct(Punct::RParen, "expected ')' after results")?;
            return Ok(results);
        }
        if self.at_type_start() {
            let ty = self.type_expr()?;
            return Ok(vec![Param { names: vec![], ty }]);
        }
        Ok(Vec::new())
    }

    /// Whether the current token can begin a type expression.
    fn at_type_start(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
            || self.check_punct(Punct::Star)
            || self.check_punct(Punct::LBracket)
            || self.check_punct(Punct::Arrow)
            || self.check_punct(Punct::Ellipsis)
            || self.check_keyword(Keyword::Map)
            || self.check_keyword(Keyword::Chan)
            || self.check_keyword(Keyword::Func)
            || self.check_keyword(Keyword::Struct)
            || self.check_keyword(Keyword::Interface)
    }

    // ========================================================================
    // Field lists (parameters and results)
    // ========================================================================

    /// Parse a comma-separated field list up to (not consuming) `term`.
    ///
    /// Go's grammar makes `(a, b int)` and `(int, string)` look identical until
    /// the end of a group, so items are read as types first and reinterpreted as
    /// names when a type follows them.
    fn field_list(&mut self, term: Punct) -> Result<Vec<Param>, CompileError> {
        let mut params = Vec::new();
        if self.check_punct(term) {
            return Ok(params);
        }

        let mut pending: Vec<(TypeExpr, Span)> = Vec::new();
        loop {
            let item_span = self.current_span();
            let item = self.type_expr()?;

            if self.match_punct(Punct::Comma) {
                if self.check_punct(term) {
                    // Trailing comma: everything pending is an unnamed type.
                    pending.push((item, item_span));
                    break;
                }
                pending.push((item, item_span));
                continue;
            }

            if self.check_punct(term) {
                pending.push((item, item_span));
                break;
            }

            // A type follows: the pending items and this one are names.
            pending.push((item, item_span));
            let names = pending
                .drain(..)
                .map(|(t, sp)| match t {
                    TypeExpr::Name(n) => Ok(n),
                    other => Err(CompileError::new(
                        format!("expected parameter name, found {}", other.shape_name()),
                        sp,
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let ty = self.type_expr()?;
            params.push(Param { names, ty });

            if !self.match_punct(Punct::Comma) {
                break;
            }
            if self.check_punct(term) {
                break;
            }
        }

        // Leftover items are unnamed types, one field each.
        for (ty, _) in pending.drain(..) {
            params.push(Param { names: vec![], ty });
        }

        Ok(params)
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn type_expr(&mut self) -> Result<TypeExpr, CompileError> {
        // Variadic marker: only valid as a final parameter type, but the parser
        // is liberal and lets the generator decide.
        if self.match_punct(Punct::Ellipsis) {
            let elem = self.type_expr()?;
            return Ok(TypeExpr::Ellipsis(Box::new(elem)));
        }

        if self.match_punct(Punct::Star) {
            let elem = self.type_expr()?;
            return Ok(TypeExpr::Pointer(Box::new(elem)));
        }

        if self.match_punct(Punct::LBracket) {
            if self.match_punct(Punct::RBracket) {
                let elem = self.type_expr()?;
                return Ok(TypeExpr::Slice(Box::new(elem)));
            }
            // Array: skip the length expression, balanced.
            self.skip_balanced(Punct::LBracket, Punct::RBracket, 1)?;
            let elem = self.type_expr()?;
            return Ok(TypeExpr::Array(Box::new(elem)));
        }

        if self.match_keyword(Keyword::Map) {
            self.expect_punct(Punct::LBracket, "expected '[' after 'map'")?;
            let key = self.type_expr()?;
            self.expect_punct(Punct::RBracket, "expected ']' after map key type")?;
            let value = self.type_expr()?;
            return Ok(TypeExpr::Map(Box::new(key), Box::new(value)));
        }

        if self.match_punct(Punct::Arrow) {
            // `<-chan T`
            self.expect_keyword(Keyword::Chan, "expected 'chan' after '<-'")?;
            let elem = self.type_expr()?;
            return Ok(TypeExpr::Chan(Box::new(elem)));
        }

        if self.match_keyword(Keyword::Chan) {
            // `chan T` or `chan<- T`
            self.match_punct(Punct::Arrow);
            let elem = self.type_expr()?;
            return Ok(TypeExpr::Chan(Box::new(elem)));
        }

        if self.match_keyword(Keyword::Struct) {
            self.expect_punct(Punct::LBrace, "expected '{' after 'struct'")?;
            self.skip_balanced(Punct::LBrace, Punct::RBrace, 1)?;
            return Ok(TypeExpr::Struct);
        }

        if self.match_keyword(Keyword::Interface) {
            self.expect_punct(Punct::LBrace, "expected '{' after 'interface'")?;
            self.skip_balanced(Punct::LBrace, Punct::RBrace, 1)?;
            return Ok(TypeExpr::Interface);
        }

        if self.match_keyword(Keyword::Func) {
            self.expect_punct(Punct::LParen, "expected '(' in function type")?;
            self.skip_balanced(Punct::LParen, Punct::RParen, 1)?;
            if self.match_punct(Punct::LParen) {
                self.skip_balanced(Punct::LParen, Punct::RParen, 1)?;
            } else if self.at_type_start() {
                self.type_expr()?;
            }
            return Ok(TypeExpr::Func);
        }

        let name = self.identifier()?;

        if self.match_punct(Punct::Dot) {
            let sel = self.identifier()?;
            if self.match_punct(Punct::LBracket) {
                self.skip_balanced(Punct::LBracket, Punct::RBracket, 1)?;
                return Ok(TypeExpr::Generic(format!("{}.{}", name, sel)));
            }
            return Ok(TypeExpr::Qualified { pkg: name, name: sel });
        }

        if self.match_punct(Punct::LBracket) {
            self.skip_balanced(Punct::LBracket, Punct::RBracket, 1)?;
            return Ok(TypeExpr::Generic(name));
        }

        Ok(TypeExpr::Name(name))
    }
}

/// Convenience function to parse a token stream.
///
/// This is a shorthand for `Parser::new(tokens).parse()`.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<SourceFile, Vec<CompileError>> {
    Parser::new(tokens).parse()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_src(source: &str) -> SourceFile {
        let tokens = lex(source).unwrap();
        parse(&tokens).unwrap_or_else(|errs| panic!("parse failed: {:?}", errs))
    }

    #[test]
    fn test_package_clause() {
        let file = parse_src("package client\n");
        assert_eq!(file.package, "client");
        assert!(file.decls.is_empty());
    }

    #[test]
    fn test_missing_package_clause() {
        let tokens = lex("func Ping() {}\n").unwrap();
        let errs = parse(&tokens).unwrap_err();
        assert!(errs[0].message.contains("expected 'package'"));
    }

    #[test]
    fn test_free_function() {
        let file = parse_src("package p\n\nfunc PingWithContext(ctx context.Context) error {\n\treturn nil\n}\n");
        assert_eq!(file.decls.len(), 1);
        let decl = &file.decls[0];
        assert_eq!(decl.name, "PingWithContext");
        assert!(decl.recv.is_none());
        assert_eq!(decl.params.len(), 1);
        assert_eq!(decl.params[0].names, vec!["ctx".to_string()]);
        assert_eq!(
            decl.params[0].ty,
            TypeExpr::Qualified {
                pkg: "context".to_string(),
                name: "Context".to_string()
            }
        );
        assert_eq!(decl.results.len(), 1);
        assert_eq!(decl.results[0].ty, TypeExpr::Name("error".to_string()));
    }

    #[test]
    fn test_method_with_pointer_receiver() {
        let file = parse_src(
            "package p\n\nfunc (c *Client) FetchWithContext(ctx context.Context, id string) (*Item, error) {\n\treturn nil, nil\n}\n",
        );
        let decl = &file.decls[0];
        let recv = decl.recv.as_ref().unwrap();
        assert_eq!(recv.name.as_deref(), Some("c"));
        assert_eq!(
            recv.ty,
            TypeExpr::Pointer(Box::new(TypeExpr::Name("Client".to_string())))
        );
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.results.len(), 2);
        assert_eq!(
            decl.results[0].ty,
            TypeExpr::Pointer(Box::new(TypeExpr::Name("Item".to_string())))
        );
    }

    #[test]
    fn test_anonymous_receiver() {
        let file = parse_src("package p\n\nfunc (*Client) Reset() {}\n");
        let recv = file.decls[0].recv.as_ref().unwrap();
        assert!(recv.name.is_none());
        assert_eq!(
            recv.ty,
            TypeExpr::Pointer(Box::new(TypeExpr::Name("Client".to_string())))
        );
    }

    #[test]
    fn test_grouped_parameters() {
        let file = parse_src("package p\n\nfunc Add(a, b int, label string) int { return 0 }\n");
        let decl = &file.decls[0];
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.params[0].names, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(decl.params[0].ty, TypeExpr::Name("int".to_string()));
        assert_eq!(decl.params[1].names, vec!["label".to_string()]);
    }

    #[test]
    fn test_unnamed_parameters() {
        let file = parse_src("package p\n\nfunc Handler(int, string) {}\n");
        let decl = &file.decls[0];
        assert_eq!(decl.params.len(), 2);
        assert!(decl.params[0].names.is_empty());
        assert_eq!(decl.params[0].ty, TypeExpr::Name("int".to_string()));
        assert!(decl.params[1].names.is_empty());
        assert_eq!(decl.params[1].ty, TypeExpr::Name("string".to_string()));
    }

    #[test]
    fn test_named_results() {
        let file = parse_src("package p\n\nfunc Stat() (n int, err error) { return }\n");
        let decl = &file.decls[0];
        assert_eq!(decl.results.len(), 2);
        assert_eq!(decl.results[0].names, vec!["n".to_string()]);
        assert_eq!(decl.results[1].names, vec!["err".to_string()]);
    }

    #[test]
    fn test_slice_map_and_variadic_types() {
        let file = parse_src(
            "package p\n\nfunc Mix(ids []string, tags map[string]int, rest ...byte) {}\n",
        );
        let decl = &file.decls[0];
        assert_eq!(
            decl.params[0].ty,
            TypeExpr::Slice(Box::new(TypeExpr::Name("string".to_string())))
        );
        assert_eq!(
            decl.params[1].ty,
            TypeExpr::Map(
                Box::new(TypeExpr::Name("string".to_string())),
                Box::new(TypeExpr::Name("int".to_string()))
            )
        );
        assert_eq!(
            decl.params[2].ty,
            TypeExpr::Ellipsis(Box::new(TypeExpr::Name("byte".to_string())))
        );
    }

    #[test]
    fn test_liberal_types_parse() {
        let file = parse_src(
            "package p\n\nfunc weird(ch chan int, out chan<- int, in <-chan int, cb func(int) error, s struct{ x int }, i interface{}, arr [4]byte) {}\n",
        );
        let decl = &file.decls[0];
        assert_eq!(decl.params.len(), 7);
        assert_eq!(decl.params[0].ty, TypeExpr::Chan(Box::new(TypeExpr::Name("int".to_string()))));
        assert_eq!(decl.params[3].ty, TypeExpr::Func);
        assert_eq!(decl.params[4].ty, TypeExpr::Struct);
        assert_eq!(decl.params[5].ty, TypeExpr::Interface);
        assert_eq!(decl.params[6].ty, TypeExpr::Array(Box::new(TypeExpr::Name("byte".to_string()))));
    }

    #[test]
    fn test_skips_imports_and_other_decls() {
        let file = parse_src(
            "package p\n\nimport (\n\t\"context\"\n\t\"fmt\"\n)\n\nconst answer = 42\n\nvar table = map[string]int{\"a\": 1}\n\ntype Client struct {\n\tname string\n}\n\nfunc Ping() {}\n",
        );
        assert_eq!(file.decls.len(), 1);
        assert_eq!(file.decls[0].name, "Ping");
    }

    #[test]
    fn test_body_with_braces_in_strings() {
        let file = parse_src(
            "package p\n\nfunc First() string {\n\treturn \"}}}\"\n}\n\nfunc Second() {}\n",
        );
        assert_eq!(file.decls.len(), 2);
        assert_eq!(file.decls[1].name, "Second");
    }

    #[test]
    fn test_nested_braces_in_body() {
        let file = parse_src(
            "package p\n\nfunc Outer() {\n\tif true {\n\t\tm := map[string]int{\"k\": 1}\n\t\t_ = m\n\t}\n}\n\nfunc After() {}\n",
        );
        assert_eq!(file.decls.len(), 2);
    }

    #[test]
    fn test_generic_function_rejected() {
        let tokens = lex("package p\n\nfunc Identity[T any](v T) T { return v }\n").unwrap();
        let errs = parse(&tokens).unwrap_err();
        assert!(errs[0].message.contains("type parameters"));
    }

    #[test]
    fn test_error_recovery_reports_and_continues() {
        // The stray token is an error; the following func should still parse
        // (and then be discarded because the file failed overall).
        let tokens = lex("package p\n\n+\n\nfunc Ping() {}\n").unwrap();
        let errs = parse(&tokens).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("expected declaration"));
    }

    #[test]
    fn test_multiline_parameter_list() {
        let file = parse_src(
            "package p\n\nfunc Long(\n\tctx context.Context,\n\tid string,\n) error {\n\treturn nil\n}\n",
        );
        let decl = &file.decls[0];
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.params[1].names, vec!["id".to_string()]);
    }
}
