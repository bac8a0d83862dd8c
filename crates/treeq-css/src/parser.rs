//! Selector parser
//!
//! Hand-written recursive descent over the supported subset. Anything
//! outside it is an error rather than a silent non-match.

use crate::selectors::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList,
    SimpleSelector,
};
use crate::CssError;

/// Parse a comma-separated selector list
pub fn parse_selector_list(input: &str) -> Result<SelectorList, CssError> {
    if input.trim().is_empty() {
        return Err(CssError::Empty);
    }
    Parser { input, pos: 0 }.parse_list()
}

struct Parser<'a> {
    input: &'a str,
    /// Byte offset into `input`
    pos: usize,
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace; returns whether any was skipped
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn unexpected(&self) -> CssError {
        CssError::Unexpected {
            selector: self.input.to_string(),
            offset: self.pos,
            found: match self.peek() {
                Some(c) => format!("`{c}`"),
                None => "end of input".to_string(),
            },
        }
    }

    fn unsupported(&self, feature: &str) -> CssError {
        CssError::Unsupported {
            selector: self.input.to_string(),
            feature: feature.to_string(),
        }
    }

    fn parse_list(&mut self) -> Result<SelectorList, CssError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.bump();
                }
                Some(_) => return Err(self.unexpected()),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, CssError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some('+') | Some('~') => return Err(self.unsupported("sibling combinator")),
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector { compounds, combinators })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, CssError> {
        let mut components = Vec::new();

        match self.peek() {
            Some('*') => {
                self.bump();
                components.push(SimpleSelector::Universal);
            }
            Some(c) if is_ident_start(c) => {
                let tag = self.ident()?;
                components.push(SimpleSelector::Type(tag.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            let component = match self.peek() {
                Some('#') => {
                    self.bump();
                    SimpleSelector::Id(self.ident()?)
                }
                Some('.') => {
                    self.bump();
                    SimpleSelector::Class(self.ident()?)
                }
                Some('[') => {
                    self.bump();
                    SimpleSelector::Attribute(self.attribute()?)
                }
                Some(':') => {
                    self.bump();
                    SimpleSelector::PseudoClass(self.pseudo_class()?)
                }
                _ => break,
            };
            components.push(component);
        }

        if components.is_empty() {
            return Err(self.unexpected());
        }
        Ok(CompoundSelector { components })
    }

    fn ident(&mut self) -> Result<String, CssError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_ident_start(c) => {}
            _ => return Err(self.unexpected()),
        }
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }

        let ident = &self.input[start..self.pos];
        // `-` alone or `-` followed by a digit is not an identifier
        let mut chars = ident.chars();
        if chars.next() == Some('-') && chars.next().is_none_or(|c| c.is_ascii_digit()) {
            self.pos = start;
            return Err(self.unexpected());
        }
        Ok(ident.to_string())
    }

    fn string(&mut self) -> Result<String, CssError> {
        let Some(quote) = self.bump() else {
            return Err(self.unexpected());
        };
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.peek() {
                    // Escaped newline continues the string
                    Some('\n') => {
                        self.bump();
                    }
                    Some(_) => value.push(self.escape()),
                    None => return Err(self.unexpected()),
                },
                Some('\n') | None => return Err(self.unexpected()),
                Some(c) => value.push(c),
            }
        }
    }

    /// Escape sequence body, after `\`. Up to six hex digits name a code
    /// point and swallow one trailing whitespace; anything else is literal.
    fn escape(&mut self) -> char {
        let start = self.pos;
        while self.pos - start < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.bump();
        }
        if self.pos == start {
            return self.bump().unwrap_or(char::REPLACEMENT_CHARACTER);
        }

        let code = u32::from_str_radix(&self.input[start..self.pos], 16).unwrap_or(0);
        if self.peek().is_some_and(is_whitespace) {
            self.bump();
        }
        match code {
            0 => char::REPLACEMENT_CHARACTER,
            code => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
        }
    }

    /// Attribute selector body, after `[`
    fn attribute(&mut self) -> Result<AttributeSelector, CssError> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.bump();
                self.skip_whitespace();
                let value = match self.peek() {
                    Some('"') | Some('\'') => self.string()?,
                    Some(c) if is_ident_start(c) => self.ident()?,
                    _ => return Err(self.unexpected()),
                };
                self.skip_whitespace();
                Some(value)
            }
            Some('~' | '|' | '^' | '$' | '*') => {
                return Err(self.unsupported("attribute operator"));
            }
            _ => return Err(self.unexpected()),
        };

        match self.bump() {
            Some(']') => Ok(AttributeSelector { name, value }),
            _ => Err(self.unexpected()),
        }
    }

    /// Pseudo-class name, after `:`
    fn pseudo_class(&mut self) -> Result<PseudoClass, CssError> {
        if self.peek() == Some(':') {
            return Err(self.unsupported("pseudo-element"));
        }
        let name = self.ident()?;
        if self.peek() == Some('(') {
            return Err(self.unsupported(&format!(":{name}()")));
        }
        PseudoClass::parse(&name).ok_or_else(|| self.unsupported(&format!(":{name}")))
    }
}
