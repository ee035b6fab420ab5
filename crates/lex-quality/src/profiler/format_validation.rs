//! Strict re-validation of column values against their inferred type.

use crate::config::AnalysisConfig;
use crate::types::{DataType, Value};
use crate::utils::{is_date, is_email, is_number, is_url};

/// Values that failed validation for the column's type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormatIssues {
    /// Total number of failing values.
    pub count: usize,
    /// The first failing values, bounded by `max_format_issue_samples`.
    pub samples: Vec<Value>,
}

/// Re-checks every value of a typed column.
#[derive(Debug, Clone, Copy)]
pub struct FormatValidator {
    max_samples: usize,
}

impl Default for FormatValidator {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl FormatValidator {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            max_samples: config.max_format_issue_samples,
        }
    }

    /// Validate the non-missing values of a column against `data_type`.
    ///
    /// Only `Email`, `Url`, `Date` and `Number` columns carry a format rule;
    /// every other type yields no issues.
    pub fn validate(&self, values: &[&Value], data_type: DataType) -> FormatIssues {
        let Some(rule) = rule_for(data_type) else {
            return FormatIssues::default();
        };

        let mut issues = FormatIssues::default();
        for value in values {
            if !rule(value.stringify().trim()) {
                issues.count += 1;
                if issues.samples.len() < self.max_samples {
                    issues.samples.push((*value).clone());
                }
            }
        }
        issues
    }
}

fn rule_for(data_type: DataType) -> Option<fn(&str) -> bool> {
    match data_type {
        DataType::Email => Some(is_email),
        DataType::Url => Some(is_url),
        DataType::Date => Some(is_date),
        DataType::Number => Some(is_number),
        DataType::Boolean | DataType::Text | DataType::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(raw: &[Value], data_type: DataType) -> FormatIssues {
        let refs: Vec<&Value> = raw.iter().collect();
        FormatValidator::default().validate(&refs, data_type)
    }

    #[test]
    fn test_email_issues() {
        let raw = vec![
            Value::from("a@b.com"),
            Value::from("bad"),
            Value::from(" c@d.org "),
        ];
        let issues = validate(&raw, DataType::Email);
        assert_eq!(issues.count, 1);
        assert_eq!(issues.samples, vec![Value::from("bad")]);
    }

    #[test]
    fn test_number_issues() {
        let raw = vec![
            Value::from(1.0),
            Value::from("2"),
            Value::from("3x"),
            Value::from(true),
        ];
        let issues = validate(&raw, DataType::Number);
        assert_eq!(issues.count, 2);
    }

    #[test]
    fn test_date_and_url_issues() {
        let dates = vec![Value::from("2024-01-15"), Value::from("2024-13-01")];
        assert_eq!(validate(&dates, DataType::Date).count, 1);

        let urls = vec![Value::from("https://a.io"), Value::from("a.io")];
        assert_eq!(validate(&urls, DataType::Url).count, 1);
    }

    #[test]
    fn test_untyped_columns_have_no_issues() {
        let raw = vec![Value::from("anything"), Value::from(3.0)];
        assert_eq!(validate(&raw, DataType::Text), FormatIssues::default());
        assert_eq!(validate(&raw, DataType::Boolean), FormatIssues::default());
        assert_eq!(validate(&raw, DataType::Unknown), FormatIssues::default());
    }

    #[test]
    fn test_full_count_with_bounded_samples() {
        let raw: Vec<Value> = (0..25).map(|i| Value::from(format!("bad-{i}"))).collect();
        let issues = validate(&raw, DataType::Email);
        assert_eq!(issues.count, 25);
        assert_eq!(issues.samples.len(), 10);
        assert_eq!(issues.samples[0], Value::from("bad-0"));
    }
}
