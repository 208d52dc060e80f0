/// Row evaluator
///
/// Walks a condition tree against a single row. Evaluation is pure: it never
/// mutates the row and never fails for a tree produced by the parser.
use super::ast::*;
use super::number::parse_float_prefix;
use crate::row::Row;
use std::cmp::Ordering;

/// Evaluates `condition` against `row`. A missing condition matches every row.
pub fn evaluate(row: &Row, condition: Option<&QueryCondition>) -> bool {
    match condition {
        Some(condition) => Evaluator::new(row).evaluate(condition),
        None => true,
    }
}

impl QueryCondition {
    /// Returns true if `row` satisfies this condition.
    pub fn matches(&self, row: &Row) -> bool {
        Evaluator::new(row).evaluate(self)
    }
}

/// Evaluates conditions against one row
pub struct Evaluator<'a> {
    row: &'a Row,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator bound to `row`
    pub fn new(row: &'a Row) -> Self {
        Self { row }
    }

    /// Evaluate a condition tree
    pub fn evaluate(&self, condition: &QueryCondition) -> bool {
        match condition {
            QueryCondition::Comparison {
                operator,
                field,
                value,
            } => self.evaluate_comparison(*operator, field, value),
            QueryCondition::Logical {
                operator,
                left,
                right,
            } => match operator {
                LogicalOperator::And => self.evaluate(left) && self.evaluate(right),
                LogicalOperator::Or => self.evaluate(left) || self.evaluate(right),
            },
            QueryCondition::StringMatch {
                operator,
                field,
                value,
            } => self.evaluate_string_match(*operator, field, value),
            QueryCondition::EmptyCheck { operator, field } => {
                let empty = self.is_empty_cell(field);
                match operator {
                    EmptyCheckOperator::IsEmpty => empty,
                    EmptyCheckOperator::IsNotEmpty => !empty,
                }
            }
        }
    }

    fn evaluate_comparison(&self, operator: ComparisonOperator, field: &str, value: &str) -> bool {
        // Missing data fails every comparison, including `!=`.
        let Some(cell) = self.row.get(field) else {
            return false;
        };

        let ordering = match (parse_float_prefix(cell), parse_float_prefix(value)) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => Some(cell.cmp(value)),
        };

        apply_ordering(operator, ordering)
    }

    fn evaluate_string_match(&self, operator: StringMatchOperator, field: &str, value: &str) -> bool {
        let cell = self.row.get(field).unwrap_or("");
        match operator {
            StringMatchOperator::Contains => cell.contains(value),
            StringMatchOperator::StartsWith => cell.starts_with(value),
            StringMatchOperator::EndsWith => cell.ends_with(value),
        }
    }

    fn is_empty_cell(&self, field: &str) -> bool {
        self.row.get(field).map_or(true, |cell| cell.trim().is_empty())
    }
}

/// Maps an ordering onto a comparison operator. `None` (unordered) only
/// satisfies `!=`.
fn apply_ordering(operator: ComparisonOperator, ordering: Option<Ordering>) -> bool {
    match (operator, ordering) {
        (ComparisonOperator::Ne, None) => true,
        (_, None) => false,
        (ComparisonOperator::Eq, Some(o)) => o == Ordering::Equal,
        (ComparisonOperator::Ne, Some(o)) => o != Ordering::Equal,
        (ComparisonOperator::Gt, Some(o)) => o == Ordering::Greater,
        (ComparisonOperator::Lt, Some(o)) => o == Ordering::Less,
        (ComparisonOperator::Ge, Some(o)) => o != Ordering::Less,
        (ComparisonOperator::Le, Some(o)) => o != Ordering::Greater,
    }
}
