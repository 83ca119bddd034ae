use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(pub String);

impl Ident {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Self {
        Ident(s.to_string())
    }
}

/// A point (or vector) in layout space.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// The vector rotated by 90 degrees counter-clockwise: (-y, x).
    pub fn perp(self) -> Point {
        Point { x: -self.y, y: self.x }
    }

    /// Point at parameter `t` on the segment from `self` to `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, k: f64) -> Point {
        Point { x: self.x * k, y: self.y * k }
    }
}

// ============================================================================
// Argument-map vocabulary
// ============================================================================

/// What a node stands for in the argument map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Claim,
    /// A piece of evidence.
    Source,
}

/// Logic type of a connection. A connection without one simply supports its target.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicType {
    And,
    Or,
    Not,
    Nand,
}

/// Logic token registry: (token_str, logic type)
pub const LOGIC_REGISTRY: &[(&str, LogicType)] = &[
    ("AND", LogicType::And),
    ("OR", LogicType::Or),
    ("NOT", LogicType::Not),
    ("NAND", LogicType::Nand),
];

impl LogicType {
    pub fn from_token(token: &str) -> Option<LogicType> {
        LOGIC_REGISTRY
            .iter()
            .find(|(tok, _)| tok.eq_ignore_ascii_case(token))
            .map(|(_, logic)| *logic)
    }

    pub fn token(self) -> &'static str {
        LOGIC_REGISTRY
            .iter()
            .find(|(_, logic)| *logic == self)
            .map(|(tok, _)| *tok)
            .unwrap_or("AND")
    }

    /// NOT and NAND connections argue against their target.
    pub fn is_negating(self) -> bool {
        matches!(self, LogicType::Not | LogicType::Nand)
    }
}

/// Label the renderer shows on a connection.
pub fn relation_label(logic: Option<LogicType>) -> &'static str {
    match logic {
        None | Some(LogicType::And) | Some(LogicType::Or) => "supports",
        Some(LogicType::Not) | Some(LogicType::Nand) => "contradicts",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perp_rotates_counter_clockwise() {
        let p = Point::new(3.0, 4.0).perp();
        assert_eq!(p, Point::new(-4.0, 3.0));
        assert_eq!(p.dot(Point::new(3.0, 4.0)), 0.0);
    }

    #[test]
    fn test_length_does_not_overflow() {
        assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
        let len = Point::new(1e200, 1e200).length();
        assert!(len.is_finite());
        assert!((len / 1e200 - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_lerp_midpoint() {
        let m = Point::new(0.0, 0.0).lerp(Point::new(10.0, -20.0), 0.5);
        assert_eq!(m, Point::new(5.0, -10.0));
    }

    #[test]
    fn test_logic_tokens() {
        assert_eq!(LogicType::from_token("nand"), Some(LogicType::Nand));
        assert_eq!(LogicType::from_token("XOR"), None);
        assert_eq!(LogicType::Or.token(), "OR");
    }

    #[test]
    fn test_relation_label() {
        assert_eq!(relation_label(None), "supports");
        assert_eq!(relation_label(Some(LogicType::Or)), "supports");
        assert_eq!(relation_label(Some(LogicType::Not)), "contradicts");
        assert!(LogicType::Nand.is_negating());
        assert!(!LogicType::And.is_negating());
    }

    #[test]
    fn test_logic_serde_uppercase() {
        let logic: LogicType = serde_json::from_str("\"NOT\"").unwrap();
        assert_eq!(logic, LogicType::Not);
        let kind: NodeKind = serde_json::from_str("\"source\"").unwrap();
        assert_eq!(kind, NodeKind::Source);
    }
}
