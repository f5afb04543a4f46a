//! Dotted paths into nested tables.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::constants::EXPRESSION_SEPARATOR;

/// A path such as `a.b.c`, split on `.`.
///
/// There is no escaping, so a key containing `.` cannot be addressed. The
/// empty string parses to a single empty token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    tokens: Vec<String>,
}

impl Expression {
    pub fn parse(s: &str) -> Self {
        Self {
            tokens: s.split(EXPRESSION_SEPARATOR).map(str::to_string).collect(),
        }
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `i`, or `""` past the end.
    pub fn get_at(&self, i: usize) -> &str {
        self.tokens.get(i).map_or("", String::as_str)
    }

    pub fn path(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(EXPRESSION_SEPARATOR))
    }
}

impl FromStr for Expression {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let exp = Expression::parse("a.b.c");
        assert_eq!(exp.len(), 3);
        assert_eq!(exp.get_at(1), "b");
        assert_eq!(exp.get_at(3), "");
        assert_eq!(exp.to_string(), "a.b.c");
    }

    #[test]
    fn test_edge_tokens() {
        assert_eq!(Expression::parse("").path(), [""]);
        assert_eq!(Expression::parse("a..b").path(), ["a", "", "b"]);
        assert!(Expression::from_tokens(Vec::<String>::new()).is_empty());
        let exp: Expression = "x.y".parse().unwrap();
        assert_eq!(exp, Expression::from_tokens(["x", "y"]));
    }
}
