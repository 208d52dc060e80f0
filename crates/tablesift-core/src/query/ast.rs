/// Condition tree produced by the filter-expression parser
///
/// A tree is built fresh for each query string and holds no external resources.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed filter expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryCondition {
    /// `field <op> value`
    Comparison {
        operator: ComparisonOperator,
        field: String,
        value: String,
    },
    /// `left and right`, `left or right`
    Logical {
        operator: LogicalOperator,
        left: Box<QueryCondition>,
        right: Box<QueryCondition>,
    },
    /// `field.contains('value')` and friends
    StringMatch {
        operator: StringMatchOperator,
        field: String,
        value: String,
    },
    /// `field.isEmpty()` / `field.isNotEmpty()`
    EmptyCheck {
        operator: EmptyCheckOperator,
        field: String,
    },
}

impl QueryCondition {
    /// Builds a comparison node.
    pub fn comparison<F: Into<String>, V: Into<String>>(
        operator: ComparisonOperator,
        field: F,
        value: V,
    ) -> Self {
        QueryCondition::Comparison {
            operator,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds a logical node over two children.
    pub fn logical(operator: LogicalOperator, left: QueryCondition, right: QueryCondition) -> Self {
        QueryCondition::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds a string-match node.
    pub fn string_match<F: Into<String>, V: Into<String>>(
        operator: StringMatchOperator,
        field: F,
        value: V,
    ) -> Self {
        QueryCondition::StringMatch {
            operator,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds an empty-check node.
    pub fn empty_check<F: Into<String>>(operator: EmptyCheckOperator, field: F) -> Self {
        QueryCondition::EmptyCheck {
            operator,
            field: field.into(),
        }
    }

    /// Number of `and`/`or` nodes on the deepest path.
    pub fn depth(&self) -> usize {
        match self {
            QueryCondition::Logical { left, right, .. } => 1 + left.depth().max(right.depth()),
            _ => 0,
        }
    }
}

/// Comparison operators, listed in the order the parser tries them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Eq, // ==
    Ne, // !=
    Ge, // >=
    Le, // <=
    Gt, // >
    Lt, // <
}

impl ComparisonOperator {
    /// Fixed scan order used when locating an operator in an expression.
    pub const SCAN_ORDER: [ComparisonOperator; 6] = [
        ComparisonOperator::Eq,
        ComparisonOperator::Ne,
        ComparisonOperator::Ge,
        ComparisonOperator::Le,
        ComparisonOperator::Gt,
        ComparisonOperator::Lt,
    ];

    /// Source text of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Ge => ">=",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    /// Keyword as written in queries (matched case-insensitively).
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
        }
    }
}

/// Case-sensitive substring predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringMatchOperator {
    Contains,
    StartsWith,
    EndsWith,
}

impl StringMatchOperator {
    /// All methods, in the order the parser tries them.
    pub const ALL: [StringMatchOperator; 3] = [
        StringMatchOperator::Contains,
        StringMatchOperator::StartsWith,
        StringMatchOperator::EndsWith,
    ];

    /// Method name as written in queries.
    pub fn method(self) -> &'static str {
        match self {
            StringMatchOperator::Contains => "contains",
            StringMatchOperator::StartsWith => "startsWith",
            StringMatchOperator::EndsWith => "endsWith",
        }
    }
}

/// Emptiness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyCheckOperator {
    IsEmpty,
    IsNotEmpty,
}

impl EmptyCheckOperator {
    /// All methods, in the order the parser tries them.
    pub const ALL: [EmptyCheckOperator; 2] =
        [EmptyCheckOperator::IsEmpty, EmptyCheckOperator::IsNotEmpty];

    /// Method name as written in queries.
    pub fn method(self) -> &'static str {
        match self {
            EmptyCheckOperator::IsEmpty => "isEmpty",
            EmptyCheckOperator::IsNotEmpty => "isNotEmpty",
        }
    }
}

// Display implementations for debugging and error messages

impl fmt::Display for QueryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryCondition::Comparison {
                operator,
                field,
                value,
            } => write!(f, "{} {} '{}'", field, operator, value),
            QueryCondition::Logical {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            QueryCondition::StringMatch {
                operator,
                field,
                value,
            } => write!(f, "{}.{}('{}')", field, operator, value),
            QueryCondition::EmptyCheck { operator, field } => {
                write!(f, "{}.{}()", field, operator)
            }
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl fmt::Display for StringMatchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method())
    }
}

impl fmt::Display for EmptyCheckOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method())
    }
}
