//! Sandboxed arithmetic formula evaluation.
//!
//! Calculated fields declare formulas like `weight / (height * height)`.
//! The evaluator tokenizes and parses a minimal grammar: numbers, variable
//! names, `+ - * /`, unary minus, and parentheses. Variables resolve
//! through a caller-supplied lookup, so a formula can never reach anything
//! beyond the document's own numeric values.

/// Failure to evaluate a calculated-field formula
#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| FormulaError::Parse(format!("bad number '{literal}'")))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => {
                return Err(FormulaError::Parse(format!("unexpected character '{other}'")));
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    lookup: &'a dyn Fn(&str) -> Option<f64>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(FormulaError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // factor := '-' factor | number | ident | '(' expr ')'
    fn factor(&mut self) -> Result<f64, FormulaError> {
        match self.advance() {
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::Ident(name)) => {
                let name = name.clone();
                (self.lookup)(&name).ok_or(FormulaError::UnknownVariable(name))
            }
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(FormulaError::Parse("missing closing parenthesis".into())),
                }
            }
            other => Err(FormulaError::Parse(format!("unexpected token {other:?}"))),
        }
    }
}

/// Evaluate a formula, resolving variable names through `lookup`
pub fn evaluate(formula: &str, lookup: &dyn Fn(&str) -> Option<f64>) -> Result<f64, FormulaError> {
    let tokens = tokenize(formula)?;
    if tokens.is_empty() {
        return Err(FormulaError::Parse("empty formula".into()));
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        lookup,
    };
    let value = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(FormulaError::Parse("trailing tokens".into()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars(_: &str) -> Option<f64> {
        None
    }

    #[test]
    fn evaluates_arithmetic_with_precedence() {
        assert_eq!(evaluate("2 + 3 * 4", &no_vars).unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4", &no_vars).unwrap(), 20.0);
        assert_eq!(evaluate("10 / 4", &no_vars).unwrap(), 2.5);
        assert_eq!(evaluate("-3 + 5", &no_vars).unwrap(), 2.0);
    }

    #[test]
    fn resolves_variables_through_lookup() {
        let lookup = |name: &str| match name {
            "weight" => Some(180.0),
            "height" => Some(70.0),
            _ => None,
        };
        let bmi = evaluate("703.0 * weight / (height * height)", &lookup).unwrap();
        assert!((bmi - 25.82).abs() < 0.01);
    }

    #[test]
    fn unknown_variable_is_an_error() {
        assert!(matches!(
            evaluate("a + 1", &no_vars),
            Err(FormulaError::UnknownVariable(_))
        ));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(matches!(
            evaluate("1 / 0", &no_vars),
            Err(FormulaError::DivisionByZero)
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(evaluate("2 +", &no_vars).is_err());
        assert!(evaluate("import os", &no_vars).is_err());
        assert!(evaluate("", &no_vars).is_err());
    }
}
