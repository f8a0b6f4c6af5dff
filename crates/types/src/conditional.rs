//! Internet-Explorer conditional comment triggers.

use serde::{Deserialize, Serialize};

/// The conditional attached to a queued tag.
///
/// Booleans never wrap the tag. A non-empty expression wraps it in a
/// conditional comment; expressions starting with `!` (optionally followed by
/// whitespace) use the "reveal" form that stays visible to non-IE browsers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Conditional {
    Flag(bool),
    Expr(String),
}

impl Default for Conditional {
    fn default() -> Self {
        Conditional::Flag(false)
    }
}

impl Conditional {
    /// Returns the expression to wrap with, if any.
    pub fn expression(&self) -> Option<&str> {
        match self {
            Conditional::Expr(expr) if !expr.is_empty() => Some(expr),
            _ => None,
        }
    }

    pub fn wraps(&self) -> bool {
        self.expression().is_some()
    }

    /// True for negated conditions such as `!IE` or `! IE`.
    pub fn is_reveal(&self) -> bool {
        self.expression().is_some_and(|expr| expr.starts_with('!'))
    }

    /// Wraps rendered markup in the conditional comment this value describes.
    pub fn wrap(&self, tag: &str) -> String {
        match self.expression() {
            None => tag.to_string(),
            Some(expr) if self.is_reveal() => {
                format!("<!--[if {expr}]><!-->{tag}<!--<![endif]-->")
            }
            Some(expr) => format!("<!--[if {expr}]>{tag}<![endif]-->"),
        }
    }
}

impl From<bool> for Conditional {
    fn from(flag: bool) -> Self {
        Conditional::Flag(flag)
    }
}

impl From<&str> for Conditional {
    fn from(expr: &str) -> Self {
        Conditional::Expr(expr.to_string())
    }
}

impl From<String> for Conditional {
    fn from(expr: String) -> Self {
        Conditional::Expr(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booleans_never_wrap() {
        assert_eq!(Conditional::from(true).wrap("<x>"), "<x>");
        assert_eq!(Conditional::from(false).wrap("<x>"), "<x>");
        assert!(!Conditional::default().wraps());
    }

    #[test]
    fn test_empty_expression_does_not_wrap() {
        assert_eq!(Conditional::from("").wrap("<x>"), "<x>");
    }

    #[test]
    fn test_hidden_form() {
        assert_eq!(
            Conditional::from("ie6").wrap("<x>"),
            "<!--[if ie6]><x><![endif]-->"
        );
        assert_eq!(
            Conditional::from("lt IE 7").wrap("<x>"),
            "<!--[if lt IE 7]><x><![endif]-->"
        );
    }

    #[test]
    fn test_reveal_form_with_and_without_space() {
        assert_eq!(
            Conditional::from("!IE").wrap("<x>"),
            "<!--[if !IE]><!--><x><!--<![endif]-->"
        );
        assert_eq!(
            Conditional::from("! IE").wrap("<x>"),
            "<!--[if ! IE]><!--><x><!--<![endif]-->"
        );
    }

    #[test]
    fn test_deserializes_from_bool_or_string() {
        let flag: Conditional = serde_json::from_str("true").unwrap();
        assert_eq!(flag, Conditional::Flag(true));
        let expr: Conditional = serde_json::from_str("\"ie6\"").unwrap();
        assert_eq!(expr, Conditional::Expr("ie6".to_string()));
    }
}
