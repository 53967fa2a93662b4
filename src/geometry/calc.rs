//! Evaluator for the subset of CSS length expressions windows are created with.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '-' factor | number unit? | 'calc'? '(' expr ')'
//! unit   := 'px' | '%' | 'vw' | 'vh' | 'vmin' | 'vmax'
//! ```
//!
//! Percentages resolve against the axis basis, viewport units against the
//! viewport. Unitless numbers are plain scalars so `(... ) / 2` works.

use super::{invalid_length, Size};
use crate::error::Result;

pub(super) fn evaluate(expr: &str, basis: f64, viewport: Size) -> Result<f64> {
    let mut parser = Parser {
        source: expr,
        chars: expr.char_indices().peekable(),
        basis,
        viewport,
    };
    let value = parser.expr()?;
    parser.skip_ws();
    if parser.chars.peek().is_some() || !value.is_finite() {
        return Err(invalid_length(expr));
    }
    Ok(value)
}

struct Parser<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    basis: f64,
    viewport: Size,
}

impl<'a> Parser<'a> {
    fn expr(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('+') => {
                    self.chars.next();
                    value += self.term()?;
                }
                Some('-') => {
                    self.chars.next();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64> {
        let mut value = self.factor()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('*') => {
                    self.chars.next();
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.chars.next();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(self.error());
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64> {
        self.skip_ws();
        match self.peek() {
            Some('-') => {
                self.chars.next();
                Ok(-self.factor()?)
            }
            Some('(') => self.group(),
            Some('c') => {
                self.keyword("calc")?;
                self.skip_ws();
                self.group()
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            _ => Err(self.error()),
        }
    }

    fn group(&mut self) -> Result<f64> {
        if self.peek() != Some('(') {
            return Err(self.error());
        }
        self.chars.next();
        let value = self.expr()?;
        self.skip_ws();
        if self.peek() != Some(')') {
            return Err(self.error());
        }
        self.chars.next();
        Ok(value)
    }

    fn number(&mut self) -> Result<f64> {
        let start = self.offset();
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.chars.next();
        }
        let end = self.offset();
        let value: f64 = self.source[start..end].parse().map_err(|_| self.error())?;

        if self.peek() == Some('%') {
            self.chars.next();
            return Ok(value * self.basis / 100.0);
        }

        let start = self.offset();
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.chars.next();
        }
        let end = self.offset();
        let viewport = self.viewport;
        match &self.source[start..end] {
            "" | "px" => Ok(value),
            "vw" => Ok(value * viewport.width / 100.0),
            "vh" => Ok(value * viewport.height / 100.0),
            "vmin" => Ok(value * viewport.width.min(viewport.height) / 100.0),
            "vmax" => Ok(value * viewport.width.max(viewport.height) / 100.0),
            _ => Err(self.error()),
        }
    }

    fn keyword(&mut self, word: &str) -> Result<()> {
        for expected in word.chars() {
            match self.chars.next() {
                Some((_, c)) if c == expected => {}
                _ => return Err(self.error()),
            }
        }
        Ok(())
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.source.len())
    }

    fn error(&self) -> crate::error::JendelaError {
        invalid_length(self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 720.0,
    };

    fn evaluate(expr: &str, basis: f64) -> Result<f64> {
        super::evaluate(expr, basis, VIEWPORT)
    }

    #[test]
    fn test_plain_units() {
        assert_eq!(evaluate("120px", 1000.0).unwrap(), 120.0);
        assert_eq!(evaluate("25%", 800.0).unwrap(), 200.0);
        assert_eq!(evaluate(" 42 ", 0.0).unwrap(), 42.0);
    }

    #[test]
    fn test_calc_expressions() {
        assert_eq!(evaluate("calc(50% - 100px)", 1000.0).unwrap(), 400.0);
        assert_eq!(evaluate("calc(100% - 2 * 10px)", 500.0).unwrap(), 480.0);
        assert_eq!(evaluate("calc(50% - (calc(50% - 10px)) / 2)", 400.0).unwrap(), 105.0);
        assert_eq!(evaluate("-10px", 0.0).unwrap(), -10.0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(evaluate("", 100.0).is_err());
        assert!(evaluate("auto", 100.0).is_err());
        assert!(evaluate("calc(50% - 10px", 100.0).is_err());
        assert!(evaluate("10em", 100.0).is_err());
        assert!(evaluate("10px / 0", 100.0).is_err());
        assert!(evaluate("10pxx", 100.0).is_err());
    }

    #[test]
    fn test_viewport_units() {
        assert_eq!(evaluate("50vw", 0.0).unwrap(), 640.0);
        assert_eq!(evaluate("10vh", 0.0).unwrap(), 72.0);
        assert_eq!(evaluate("calc(50% - (50vw) / 2)", 720.0).unwrap(), 40.0);
        assert_eq!(evaluate("100vmin", 0.0).unwrap(), 720.0);
        assert_eq!(evaluate("100vmax", 0.0).unwrap(), 1280.0);
    }
}
