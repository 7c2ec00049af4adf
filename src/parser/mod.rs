//=============================================
// mini_script/parser.rs
//=============================================
// Goal: mini-script recursive descent parser implementation
// Objective: Transform token streams into AST nodes consumed by the interpreter
//=============================================

//=============================================
//            Section 1: Imports
//=============================================

use crate::ast::{Expr, Program, Stmt};
use crate::tokenizer::{Token, TokenKind};

//=============================================
//            Section 2: Parse Errors
//=============================================

/// Parser error types
#[derive(Debug, Clone)]
pub enum ParseError {
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        line: usize,
    },
    UnexpectedEndOfInput {
        expected: String,
        line: usize,
    },
    InvalidSyntax {
        message: String,
        line: usize,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. } => *line,
            ParseError::UnexpectedEndOfInput { line, .. } => *line,
            ParseError::InvalidSyntax { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected,
                found,
                line,
            } => {
                write!(
                    f,
                    "SyntaxError at line {}: Expected {} but found {}",
                    line, expected, found
                )
            }
            ParseError::UnexpectedEndOfInput { expected, line } => {
                write!(
                    f,
                    "SyntaxError at line {}: Unexpected end of input, expected {}",
                    line, expected
                )
            }
            ParseError::InvalidSyntax { message, line } => {
                write!(f, "SyntaxError at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for ParseError {}

//=============================================
//            Section 3: Parser State
//=============================================

/// Recursive descent parser for mini-script
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    expr_depth: usize,
}

const MAX_EXPRESSION_DEPTH: usize = 256;

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            expr_depth: 0,
        }
    }

    //=============================================
    //            Section 4: Statement Parsing
    //=============================================

    /// Parse a complete program: the list of top-level statements.
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek().kind {
            TokenKind::Var => self.parse_var_declaration(),
            TokenKind::Function => self.parse_function_declaration(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Print => self.parse_print_statement(),
            TokenKind::Assert => self.parse_assert_statement(),
            TokenKind::Import => self.parse_import_statement(),
            TokenKind::LeftBrace => {
                self.advance();
                Ok(Stmt::Block {
                    statements: self.parse_block_body()?,
                })
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_var_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'var'
        let name = self.consume_identifier("variable name")?;
        let initializer = if self.check(TokenKind::Equal) {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "';' after variable declaration")?;
        Ok(Stmt::Var { name, initializer })
    }

    fn parse_function_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'function'
        let name = self.consume_identifier("function name")?;
        self.consume(TokenKind::LeftParen, "'(' after function name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.consume_identifier("parameter name")?);
                if !self.check(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.consume(TokenKind::RightParen, "')' after parameters")?;
        self.consume(TokenKind::LeftBrace, "'{' before function body")?;
        let body = self.parse_block_body()?;
        Ok(Stmt::Function { name, params, body })
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'if'
        self.consume(TokenKind::LeftParen, "'(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "')' after condition")?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.check(TokenKind::Else) {
            self.advance();
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'while'
        self.consume(TokenKind::LeftParen, "'(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "')' after condition")?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::While { condition, body })
    }

    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'for'
        self.consume(TokenKind::LeftParen, "'(' after 'for'")?;

        let initializer = if self.check(TokenKind::Semicolon) {
            self.advance();
            None
        } else if self.check(TokenKind::Var) {
            Some(Box::new(self.parse_var_declaration()?))
        } else {
            Some(Box::new(self.parse_expression_statement()?))
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::Semicolon, "';' after loop condition")?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::RightParen, "')' after for clauses")?;

        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::For {
            initializer,
            condition,
            increment,
            body,
        })
    }

    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.advance().clone();
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::Semicolon, "';' after return value")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'print'
        let mut expressions = vec![self.parse_expression()?];
        while self.check(TokenKind::Comma) {
            self.advance();
            expressions.push(self.parse_expression()?);
        }
        self.consume(TokenKind::Semicolon, "';' after print statement")?;
        Ok(Stmt::Print { expressions })
    }

    fn parse_assert_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.advance().clone();
        self.consume(TokenKind::LeftParen, "'(' after 'assert'")?;
        let condition = self.parse_expression()?;
        let message = if self.check(TokenKind::Comma) {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.consume(TokenKind::RightParen, "')' after assert arguments")?;
        self.consume(TokenKind::Semicolon, "';' after assert statement")?;
        Ok(Stmt::Assert {
            keyword,
            condition,
            message,
        })
    }

    fn parse_import_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // consume 'import'
        if !self.check(TokenKind::String) {
            return Err(ParseError::UnexpectedToken {
                expected: "module path string".to_string(),
                found: self.peek().kind,
                line: self.peek().line,
            });
        }
        let path = self.advance().clone();
        self.consume(TokenKind::Semicolon, "';' after import path")?;
        Ok(Stmt::Import { path })
    }

    // Body of a brace-delimited block; the '{' is already consumed.
    fn parse_block_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        self.consume(TokenKind::RightBrace, "'}' after block")?;
        Ok(statements)
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expression = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "';' after expression")?;
        Ok(Stmt::Expression { expression })
    }

    //=============================================
    //            Section 5: Expression Parsing
    //=============================================

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.enter_expression()?;
        let result = self.parse_assignment();
        self.exit_expression();
        result
    }

    fn enter_expression(&mut self) -> Result<(), ParseError> {
        self.expr_depth += 1;
        if self.expr_depth > MAX_EXPRESSION_DEPTH {
            return Err(ParseError::InvalidSyntax {
                message: "Expression nesting too deep".to_string(),
                line: self.peek().line,
            });
        }
        Ok(())
    }

    fn exit_expression(&mut self) {
        self.expr_depth -= 1;
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_logical_or()?;

        if self.check(TokenKind::Equal) {
            let equals_line = self.peek().line;
            self.advance();
            let value = Box::new(self.parse_assignment()?);

            return match expr {
                Expr::Variable { name } => Ok(Expr::Assign { name, value }),
                Expr::Get {
                    object,
                    index,
                    bracket,
                } => Ok(Expr::Set {
                    object,
                    index,
                    value,
                    bracket,
                }),
                _ => Err(ParseError::InvalidSyntax {
                    message: "Invalid assignment target".to_string(),
                    line: equals_line,
                }),
            };
        }

        Ok(expr)
    }

    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_logical_and()?;
        while self.check(TokenKind::OrOr) {
            let operator = self.advance().clone();
            let right = self.parse_logical_and()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_equality()?;
        while self.check(TokenKind::AndAnd) {
            let operator = self.advance().clone();
            let right = self.parse_equality()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_comparison()?;
        while self.check(TokenKind::EqualEqual) || self.check(TokenKind::BangEqual) {
            let operator = self.advance().clone();
            let right = self.parse_comparison()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_additive()?;
        while self.check(TokenKind::Greater)
            || self.check(TokenKind::GreaterEqual)
            || self.check(TokenKind::Less)
            || self.check(TokenKind::LessEqual)
        {
            let operator = self.advance().clone();
            let right = self.parse_additive()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_multiplicative()?;
        while self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            let operator = self.advance().clone();
            let right = self.parse_multiplicative()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_unary()?;
        while self.check(TokenKind::Star) || self.check(TokenKind::Slash) {
            let operator = self.advance().clone();
            let right = self.parse_unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Bang) || self.check(TokenKind::Minus) {
            let operator = self.advance().clone();
            self.enter_expression()?;
            let right = self.parse_unary();
            self.exit_expression();
            return Ok(Expr::Unary {
                operator,
                right: Box::new(right?),
            });
        }
        self.parse_call()
    }

    fn parse_call(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check(TokenKind::LeftParen) {
                let paren = self.advance().clone();
                let mut arguments = Vec::new();
                if !self.check(TokenKind::RightParen) {
                    loop {
                        arguments.push(self.parse_expression()?);
                        if !self.check(TokenKind::Comma) {
                            break;
                        }
                        self.advance();
                    }
                }
                self.consume(TokenKind::RightParen, "')' after arguments")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    paren,
                    arguments,
                };
            } else if self.check(TokenKind::LeftBracket) {
                let bracket = self.advance().clone();
                let index = self.parse_expression()?;
                self.consume(TokenKind::RightBracket, "']' after index")?;
                expr = Expr::Get {
                    object: Box::new(expr),
                    index: Box::new(index),
                    bracket,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number | TokenKind::String | TokenKind::True | TokenKind::False
            | TokenKind::Nil => {
                self.advance();
                let value = token.literal.ok_or(ParseError::InvalidSyntax {
                    message: "Literal token missing its value".to_string(),
                    line: token.line,
                })?;
                Ok(Expr::Literal {
                    value,
                    line: token.line,
                })
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Variable { name: token })
            }
            TokenKind::LeftParen => {
                self.advance();
                let expression = self.parse_expression()?;
                self.consume(TokenKind::RightParen, "')' after expression")?;
                Ok(Expr::Grouping {
                    expression: Box::new(expression),
                })
            }
            TokenKind::LeftBracket => {
                let line = token.line;
                self.advance();
                let mut elements = Vec::new();
                if !self.check(TokenKind::RightBracket) {
                    loop {
                        elements.push(self.parse_expression()?);
                        if !self.check(TokenKind::Comma) {
                            break;
                        }
                        self.advance();
                    }
                }
                self.consume(TokenKind::RightBracket, "']' after list elements")?;
                Ok(Expr::ListLiteral { elements, line })
            }
            TokenKind::Eof => Err(ParseError::UnexpectedEndOfInput {
                expected: "expression".to_string(),
                line: token.line,
            }),
            _ => Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                found: token.kind,
                line: token.line,
            }),
        }
    }

    //=============================================
    //            Section 6: Token Navigation
    //=============================================

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.current)
            .unwrap_or_else(|| &self.tokens[self.tokens.len() - 1])
    }

    // Utility: advance to next token and return previous
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        &self.tokens[self.current - 1]
    }

    // Utility: check if current token matches kind
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    // Utility: consume token of expected kind, or error
    fn consume(&mut self, kind: TokenKind, expected: &str) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else if self.is_at_end() {
            Err(ParseError::UnexpectedEndOfInput {
                expected: expected.to_string(),
                line: self.peek().line,
            })
        } else {
            Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.peek().kind,
                line: self.peek().line,
            })
        }
    }

    // Utility: consume identifier and return its token
    fn consume_identifier(&mut self, expected: &str) -> Result<Token, ParseError> {
        if self.check(TokenKind::Identifier) {
            Ok(self.advance().clone())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.peek().kind,
                line: self.peek().line,
            })
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }
}

//=============================================
//            Section 7: Tests
//=============================================
