use std::collections::HashMap;
use std::fmt;

/// All possible token types in mini-script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Semicolon,
    Plus,
    Minus,
    Star,
    Slash,

    // One- or two-character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    AndAnd,
    OrOr,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    Var,
    Function,
    If,
    Else,
    While,
    For,
    Return,
    True,
    False,
    Nil,
    Print,
    Assert,
    Import,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Literal payload attached to String/Number and keyword-literal tokens
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// A lexical token with its source line
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<LiteralValue>,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, literal: Option<LiteralValue>, line: usize) -> Self {
        Self {
            kind,
            lexeme,
            literal,
            line,
        }
    }
}

/// Error raised while scanning source text
#[derive(Debug, Clone, PartialEq)]
pub struct ScanError {
    pub message: String,
    pub line: usize,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SyntaxError at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScanError {}

/// Tokenizer for mini-script source text
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    line: usize,
    keywords: HashMap<&'static str, TokenKind>,
    tokens: Vec<Token>,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("var", TokenKind::Var);
        keywords.insert("function", TokenKind::Function);
        keywords.insert("if", TokenKind::If);
        keywords.insert("else", TokenKind::Else);
        keywords.insert("while", TokenKind::While);
        keywords.insert("for", TokenKind::For);
        keywords.insert("return", TokenKind::Return);
        keywords.insert("true", TokenKind::True);
        keywords.insert("false", TokenKind::False);
        keywords.insert("nil", TokenKind::Nil);
        keywords.insert("print", TokenKind::Print);
        keywords.insert("assert", TokenKind::Assert);
        keywords.insert("import", TokenKind::Import);

        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            keywords,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, ScanError> {
        while !self.is_at_end() {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            if self.current_char() == '/' && self.peek_char() == Some('/') {
                self.skip_line_comment();
                continue;
            }

            if self.current_char() == '/' && self.peek_char() == Some('*') {
                self.skip_block_comment()?;
                continue;
            }

            if self.current_char() == '"' {
                self.handle_string()?;
                continue;
            }

            if self.current_char().is_ascii_digit() {
                self.handle_number()?;
                continue;
            }

            if self.current_char().is_alphabetic() || self.current_char() == '_' {
                self.handle_identifier();
                continue;
            }

            self.handle_operator_or_delimiter()?;
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, String::new(), None, self.line));
        Ok(std::mem::take(&mut self.tokens))
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_char(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.input[self.position]
        }
    }

    fn peek_char(&self) -> Option<char> {
        if self.position + 1 >= self.input.len() {
            None
        } else {
            Some(self.input[self.position + 1])
        }
    }

    fn advance(&mut self) -> char {
        let ch = self.current_char();
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        ch
    }

    fn emit_token(&mut self, kind: TokenKind, lexeme: &str, literal: Option<LiteralValue>) {
        self.tokens
            .push(Token::new(kind, lexeme.to_string(), literal, self.line));
    }

    fn error(&self, message: impl Into<String>) -> ScanError {
        ScanError {
            message: message.into(),
            line: self.line,
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.current_char() != '\n' {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), ScanError> {
        self.advance(); // consume '/'
        self.advance(); // consume '*'
        while !self.is_at_end() {
            if self.current_char() == '*' && self.peek_char() == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }
        Err(self.error("Unterminated block comment"))
    }

    fn handle_string(&mut self) -> Result<(), ScanError> {
        let start_line = self.line;
        self.advance(); // consume opening quote

        let mut string_value = String::new();
        while !self.is_at_end() && self.current_char() != '"' {
            if self.current_char() == '\\' {
                self.advance();
                if self.is_at_end() {
                    break;
                }
                match self.current_char() {
                    'n' => string_value.push('\n'),
                    't' => string_value.push('\t'),
                    '\\' => string_value.push('\\'),
                    '"' => string_value.push('"'),
                    other => {
                        string_value.push('\\');
                        string_value.push(other);
                    }
                }
                self.advance();
            } else {
                string_value.push(self.advance());
            }
        }

        if self.is_at_end() {
            return Err(ScanError {
                message: "Unterminated string literal".to_string(),
                line: start_line,
            });
        }
        self.advance(); // consume closing quote

        let lexeme = format!("\"{}\"", string_value);
        self.tokens.push(Token::new(
            TokenKind::String,
            lexeme,
            Some(LiteralValue::String(string_value)),
            start_line,
        ));
        Ok(())
    }

    fn handle_number(&mut self) -> Result<(), ScanError> {
        let mut text = String::new();
        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            text.push(self.advance());
        }
        if self.current_char() == '.'
            && self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false)
        {
            text.push(self.advance());
            while !self.is_at_end() && self.current_char().is_ascii_digit() {
                text.push(self.advance());
            }
        }

        let value: f64 = text
            .parse()
            .map_err(|_| self.error(format!("Invalid number literal '{}'", text)))?;
        self.emit_token(TokenKind::Number, &text, Some(LiteralValue::Number(value)));
        Ok(())
    }

    fn handle_identifier(&mut self) {
        let mut text = String::new();
        while !self.is_at_end()
            && (self.current_char().is_alphanumeric() || self.current_char() == '_')
        {
            text.push(self.advance());
        }

        match self.keywords.get(text.as_str()).copied() {
            Some(kind) => {
                let literal = match kind {
                    TokenKind::True => Some(LiteralValue::Boolean(true)),
                    TokenKind::False => Some(LiteralValue::Boolean(false)),
                    TokenKind::Nil => Some(LiteralValue::Nil),
                    _ => None,
                };
                self.emit_token(kind, &text, literal);
            }
            None => self.emit_token(TokenKind::Identifier, &text, None),
        }
    }

    fn handle_operator_or_delimiter(&mut self) -> Result<(), ScanError> {
        let ch = self.advance();
        match ch {
            '(' => self.emit_token(TokenKind::LeftParen, "(", None),
            ')' => self.emit_token(TokenKind::RightParen, ")", None),
            '{' => self.emit_token(TokenKind::LeftBrace, "{", None),
            '}' => self.emit_token(TokenKind::RightBrace, "}", None),
            '[' => self.emit_token(TokenKind::LeftBracket, "[", None),
            ']' => self.emit_token(TokenKind::RightBracket, "]", None),
            ',' => self.emit_token(TokenKind::Comma, ",", None),
            ';' => self.emit_token(TokenKind::Semicolon, ";", None),
            '+' => self.emit_token(TokenKind::Plus, "+", None),
            '-' => self.emit_token(TokenKind::Minus, "-", None),
            '*' => self.emit_token(TokenKind::Star, "*", None),
            '/' => self.emit_token(TokenKind::Slash, "/", None),
            '!' => {
                if self.current_char() == '=' {
                    self.advance();
                    self.emit_token(TokenKind::BangEqual, "!=", None);
                } else {
                    self.emit_token(TokenKind::Bang, "!", None);
                }
            }
            '=' => {
                if self.current_char() == '=' {
                    self.advance();
                    self.emit_token(TokenKind::EqualEqual, "==", None);
                } else {
                    self.emit_token(TokenKind::Equal, "=", None);
                }
            }
            '>' => {
                if self.current_char() == '=' {
                    self.advance();
                    self.emit_token(TokenKind::GreaterEqual, ">=", None);
                } else {
                    self.emit_token(TokenKind::Greater, ">", None);
                }
            }
            '<' => {
                if self.current_char() == '=' {
                    self.advance();
                    self.emit_token(TokenKind::LessEqual, "<=", None);
                } else {
                    self.emit_token(TokenKind::Less, "<", None);
                }
            }
            '&' => {
                if self.current_char() == '&' {
                    self.advance();
                    self.emit_token(TokenKind::AndAnd, "&&", None);
                } else {
                    return Err(self.error("Unexpected character '&' (did you mean '&&'?)"));
                }
            }
            '|' => {
                if self.current_char() == '|' {
                    self.advance();
                    self.emit_token(TokenKind::OrOr, "||", None);
                } else {
                    return Err(self.error("Unexpected character '|' (did you mean '||'?)"));
                }
            }
            other => {
                return Err(self.error(format!("Unexpected character '{}'", other)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut tokenizer = Tokenizer::new(source);
        tokenizer
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_operators_and_delimiters() {
        assert_eq!(
            kinds("( ) { } [ ] , ; + - * / ! != = == > >= < <= && ||"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("var x = nil; function foo"),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Nil,
                TokenKind::Semicolon,
                TokenKind::Function,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_literal() {
        let mut tokenizer = Tokenizer::new("3.25");
        let tokens = tokenizer.tokenize().unwrap();
        assert_eq!(tokens[0].literal, Some(LiteralValue::Number(3.25)));
    }

    #[test]
    fn test_string_escapes() {
        let mut tokenizer = Tokenizer::new("\"a\\nb\"");
        let tokens = tokenizer.tokenize().unwrap();
        assert_eq!(
            tokens[0].literal,
            Some(LiteralValue::String("a\nb".to_string()))
        );
    }

    #[test]
    fn test_line_tracking() {
        let mut tokenizer = Tokenizer::new("var a;\nvar b;");
        let tokens = tokenizer.tokenize().unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[3].line, 2);
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("// line\n/* block\nspans lines */ var"),
            vec![TokenKind::Var, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let mut tokenizer = Tokenizer::new("\"oops");
        let err = tokenizer.tokenize().unwrap_err();
        assert!(err.message.contains("Unterminated"));
    }

    #[test]
    fn test_unexpected_character() {
        let mut tokenizer = Tokenizer::new("var x = 1 @ 2;");
        assert!(tokenizer.tokenize().is_err());
    }
}
