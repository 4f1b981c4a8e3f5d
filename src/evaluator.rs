//! Evaluates the tiny arithmetic expressions found on math challenges.
//!
//! Accepted input is exactly `<digits><op><digits>`, optionally followed by
//! `=` or `?` as drawn on the challenge. Operands are `i64`: anything outside
//! that range, or a result that overflows it, yields no result. There is no
//! fractional arithmetic.

/// A binary operator, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
}

impl Operator {
    /// Detection order: the first operator present in the text wins.
    pub const PRIORITY: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
        }
    }

    fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Operator::Add => a.checked_add(b),
            Operator::Sub => a.checked_sub(b),
            Operator::Mul => a.checked_mul(b),
        }
    }
}

/// Which detected operators are actually evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatorSet {
    /// Only `+`. A detected `-` or `*` is reported as no result.
    #[default]
    Add,
    /// `+`, `-` and `*`.
    All,
}

impl OperatorSet {
    pub fn allows(self, op: Operator) -> bool {
        match self {
            OperatorSet::Add => op == Operator::Add,
            OperatorSet::All => true,
        }
    }
}

/// True if the text contains any operator symbol, enabled or not.
pub fn has_operator(text: &str) -> bool {
    Operator::PRIORITY
        .iter()
        .any(|op| text.contains(op.symbol()))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    operators: OperatorSet,
}

impl Evaluator {
    pub fn new(operators: OperatorSet) -> Self {
        Self { operators }
    }

    /// Evaluate `text`, returning the integer result as a decimal string.
    /// `None` means "no result"; partial evaluation never happens.
    pub fn evaluate(&self, text: &str) -> Option<String> {
        let expr = normalize(text);
        if expr.is_empty() {
            return None;
        }

        let op = Operator::PRIORITY
            .into_iter()
            .find(|op| expr.contains(op.symbol()))?;
        if !self.operators.allows(op) {
            return None;
        }

        let mut parts = expr.split(op.symbol());
        let (lhs, rhs) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lhs), Some(rhs), None) => (lhs, rhs),
            _ => return None,
        };

        let a = parse_operand(lhs)?;
        let b = parse_operand(rhs)?;
        op.apply(a, b).map(|n| n.to_string())
    }
}

fn normalize(text: &str) -> String {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.trim_end_matches(['=', '?']).to_string()
}

/// Operands are bare digit runs. A sign on an operand means the engine read
/// a second operator.
fn parse_operand(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> Evaluator {
        Evaluator::default()
    }

    fn full() -> Evaluator {
        Evaluator::new(OperatorSet::All)
    }

    #[test]
    fn adds_two_operands() {
        assert_eq!(baseline().evaluate("7+5").as_deref(), Some("12"));
    }

    #[test]
    fn ignores_whitespace() {
        assert_eq!(baseline().evaluate(" 12 +\t30\n").as_deref(), Some("42"));
    }

    #[test]
    fn strips_trailing_equals() {
        assert_eq!(baseline().evaluate("3+4=").as_deref(), Some("7"));
        assert_eq!(baseline().evaluate("3+4=?").as_deref(), Some("7"));
    }

    #[test]
    fn rejects_three_operands() {
        assert_eq!(baseline().evaluate("1+2+3"), None);
        assert_eq!(full().evaluate("9-2-1"), None);
    }

    #[test]
    fn rejects_non_numeric_operands() {
        assert_eq!(baseline().evaluate("a+5"), None);
        assert_eq!(baseline().evaluate("7+"), None);
        assert_eq!(baseline().evaluate("+5"), None);
        assert_eq!(baseline().evaluate("7x+5"), None);
    }

    #[test]
    fn rejects_doubled_operator() {
        assert_eq!(baseline().evaluate("7++5"), None);
    }

    #[test]
    fn signed_operands_are_rejected() {
        assert_eq!(baseline().evaluate("7+-5"), None);
        assert_eq!(baseline().evaluate("-7+5"), None);
        assert_eq!(full().evaluate("7+-5"), None);
        assert_eq!(full().evaluate("3*-2"), None);
        assert_eq!(full().evaluate("-3-2"), None);
    }

    #[test]
    fn rejects_input_without_operator() {
        assert_eq!(baseline().evaluate("1234"), None);
        assert_eq!(baseline().evaluate(""), None);
        assert_eq!(baseline().evaluate("   "), None);
    }

    #[test]
    fn baseline_does_not_evaluate_sub_or_mul() {
        assert_eq!(baseline().evaluate("7*5"), None);
        assert_eq!(baseline().evaluate("9-4"), None);
    }

    #[test]
    fn full_set_evaluates_sub_and_mul() {
        assert_eq!(full().evaluate("7*5").as_deref(), Some("35"));
        assert_eq!(full().evaluate("9-4").as_deref(), Some("5"));
        assert_eq!(full().evaluate("4-9").as_deref(), Some("-5"));
    }

    #[test]
    fn plus_takes_priority_over_other_operators() {
        // `+` is detected first, so `3*2` is not a valid operand.
        assert_eq!(full().evaluate("3*2+1"), None);
    }

    #[test]
    fn overflow_is_no_result() {
        let max = i64::MAX.to_string();
        assert_eq!(baseline().evaluate(&format!("{max}+1")), None);
        assert_eq!(full().evaluate(&format!("{max}*2")), None);
    }

    #[test]
    fn operand_out_of_range_is_no_result() {
        assert_eq!(baseline().evaluate("99999999999999999999+1"), None);
    }

    #[test]
    fn has_operator_detects_any_symbol() {
        assert!(has_operator("7+5"));
        assert!(has_operator("7-5"));
        assert!(has_operator("7*5"));
        assert!(!has_operator("7x5"));
        assert!(!has_operator("ABC123"));
    }
}
