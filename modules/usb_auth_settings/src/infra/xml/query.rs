//! Location path subset used by the resolver
//!
//! Supported: absolute paths of child steps, each an element name with an
//! optional `[@attr='literal']` predicate. Literals may be single or double
//! quoted and may contain `/` and `]`.

use super::tree::Element;
use crate::contract::QueryError;

/// `[@attribute='value']`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub attribute: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub predicate: Option<Predicate>,
}

impl Step {
    fn matches(&self, element: &Element) -> bool {
        if element.name != self.name {
            return false;
        }
        match &self.predicate {
            Some(p) => element.attribute(&p.attribute) == Some(p.value.as_str()),
            None => true,
        }
    }
}

/// A parsed location path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub steps: Vec<Step>,
}

struct Parser<'s> {
    expression: &'s str,
    pos: usize,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

impl<'s> Parser<'s> {
    fn rest(&self) -> &'s str {
        &self.expression[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn error(&self, reason: impl Into<String>) -> QueryError {
        QueryError::Malformed {
            expression: self.expression.to_owned(),
            reason: format!("{} (at offset {})", reason.into(), self.pos),
        }
    }

    fn require(&mut self, c: char) -> Result<(), QueryError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected {c:?}")))
        }
    }

    fn name(&mut self, what: &str) -> Result<String, QueryError> {
        let rest = self.rest();
        let len = rest.find(|c| !is_name_char(c)).unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error(format!("expected {what}")));
        }
        self.pos += len;
        Ok(rest[..len].to_owned())
    }

    fn literal(&mut self) -> Result<String, QueryError> {
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected a quoted literal")),
        };
        self.pos += quote.len_utf8();
        let rest = self.rest();
        let end = rest
            .find(quote)
            .ok_or_else(|| self.error("unterminated literal"))?;
        self.pos += end + quote.len_utf8();
        Ok(rest[..end].to_owned())
    }

    fn predicate(&mut self) -> Result<Predicate, QueryError> {
        self.skip_whitespace();
        self.require('@')?;
        let attribute = self.name("an attribute name")?;
        self.skip_whitespace();
        self.require('=')?;
        self.skip_whitespace();
        let value = self.literal()?;
        self.skip_whitespace();
        self.require(']')?;
        Ok(Predicate { attribute, value })
    }

    fn step(&mut self) -> Result<Step, QueryError> {
        let name = self.name("an element name")?;
        let predicate = if self.eat('[') {
            Some(self.predicate()?)
        } else {
            None
        };
        Ok(Step { name, predicate })
    }
}

impl PathExpr {
    pub fn parse(expression: &str) -> Result<Self, QueryError> {
        let mut parser = Parser { expression, pos: 0 };
        if !parser.eat('/') {
            return Err(parser.error("only absolute paths are supported"));
        }
        let mut steps = Vec::new();
        loop {
            steps.push(parser.step()?);
            if parser.rest().is_empty() {
                break;
            }
            parser.require('/')?;
        }
        Ok(Self { steps })
    }

    /// Every element under `root` the path selects, in document order
    pub fn select<'e>(&self, root: &'e Element) -> Vec<&'e Element> {
        let Some((first, rest)) = self.steps.split_first() else {
            return Vec::new();
        };
        if !first.matches(root) {
            return Vec::new();
        }
        let mut current = vec![root];
        for step in rest {
            current = current
                .into_iter()
                .flat_map(|element| element.children.iter().filter(move |c| step.matches(c)))
                .collect();
        }
        current
    }
}
