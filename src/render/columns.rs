//! Column resolution: turning selectors into concrete column indices.

use crate::model::Row;

use super::{ColumnSelector, ConversionOptions};

/// Columns chosen for output, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedColumns {
    /// Source column index for each output column
    pub indices: Vec<usize>,

    /// Display name for each output column, when a header is available
    pub names: Option<Vec<String>>,
}

impl ResolvedColumns {
    /// Number of output columns.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if no columns were resolved.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Resolves `columns_to_include` selectors against a table.
pub struct ColumnResolver<'a> {
    options: &'a ConversionOptions,
}

impl<'a> ColumnResolver<'a> {
    /// Create a resolver for the given options.
    pub fn new(options: &'a ConversionOptions) -> Self {
        Self { options }
    }

    /// Resolve the configured selectors against `rows`.
    ///
    /// Selectors that match nothing are dropped. If nothing matches at all,
    /// every column is returned as if no selectors had been given.
    pub fn resolve(&self, rows: &[Row]) -> ResolvedColumns {
        if self.options.columns_to_include.is_empty() {
            return self.all_columns(rows);
        }

        let header: Option<Vec<String>> = if self.options.include_headers {
            header_values(rows)
        } else {
            None
        };

        let mut indices = Vec::new();
        let mut names = Vec::new();

        for selector in &self.options.columns_to_include {
            match selector {
                ColumnSelector::ByIndex(idx) => {
                    let name = header
                        .as_ref()
                        .and_then(|h| h.get(*idx))
                        .cloned()
                        .unwrap_or_else(|| format!("col{}", idx));
                    indices.push(*idx);
                    names.push(name);
                }
                ColumnSelector::ByName(name) => {
                    let position = header
                        .as_ref()
                        .and_then(|h| h.iter().position(|value| value == name));
                    match position {
                        Some(idx) => {
                            indices.push(idx);
                            names.push(name.clone());
                        }
                        None => log::debug!("Column selector '{}' matched nothing", name),
                    }
                }
            }
        }

        if indices.is_empty() {
            log::warn!(
                "No column selector matched ({} given); rendering all columns",
                self.options.columns_to_include.len()
            );
            return self.all_columns(rows);
        }

        log::debug!("Resolved columns {:?}", indices);
        ResolvedColumns {
            indices,
            names: Some(names),
        }
    }

    fn all_columns(&self, rows: &[Row]) -> ResolvedColumns {
        let names = if self.options.include_headers {
            header_values(rows)
        } else {
            None
        };
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        ResolvedColumns {
            indices: (0..width).collect(),
            names,
        }
    }
}

fn header_values(rows: &[Row]) -> Option<Vec<String>> {
    rows.first()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Table;

    fn sample() -> Table {
        Table::from_rows(vec![
            vec!["Name", "Age", "City"],
            vec!["Alice", "30", "Paris"],
            vec!["Bob", "25", "Oslo", "extra"],
        ])
    }

    #[test]
    fn test_no_selectors_selects_everything() {
        let options = ConversionOptions::new();
        let resolved = ColumnResolver::new(&options).resolve(&sample().rows);

        assert_eq!(resolved.indices, vec![0, 1, 2, 3]);
        assert_eq!(
            resolved.names,
            Some(vec!["Name".into(), "Age".into(), "City".into()])
        );
    }

    #[test]
    fn test_no_headers_means_no_names() {
        let options = ConversionOptions::new().with_headers(false);
        let resolved = ColumnResolver::new(&options).resolve(&sample().rows);
        assert_eq!(resolved.names, None);
    }

    #[test]
    fn test_mixed_selectors_keep_order_and_duplicates() {
        let options = ConversionOptions::new().with_columns(vec![
            ColumnSelector::from("City"),
            ColumnSelector::from(0),
            ColumnSelector::from("City"),
            ColumnSelector::from(7),
        ]);
        let resolved = ColumnResolver::new(&options).resolve(&sample().rows);

        assert_eq!(resolved.indices, vec![2, 0, 2, 7]);
        assert_eq!(
            resolved.names,
            Some(vec![
                "City".into(),
                "Name".into(),
                "City".into(),
                "col7".into()
            ])
        );
    }

    #[test]
    fn test_names_dropped_without_header() {
        let options = ConversionOptions::new()
            .with_headers(false)
            .with_columns(vec![ColumnSelector::from("Age"), ColumnSelector::from(1)]);
        let resolved = ColumnResolver::new(&options).resolve(&sample().rows);

        assert_eq!(resolved.indices, vec![1]);
        assert_eq!(resolved.names, Some(vec!["col1".into()]));
    }

    #[test]
    fn test_unmatched_selectors_fall_back() {
        let options = ConversionOptions::new()
            .with_columns(vec![ColumnSelector::from("Nmae"), ColumnSelector::from("Zip")]);
        let resolved = ColumnResolver::new(&options).resolve(&sample().rows);
        let all = ColumnResolver::new(&ConversionOptions::new()).resolve(&sample().rows);

        assert_eq!(resolved, all);
    }

    #[test]
    fn test_numeric_header_matched_by_name() {
        let table = Table::from_rows(vec![vec!["2023", "2024"], vec!["1", "2"]]);
        let options =
            ConversionOptions::new().with_columns(vec![ColumnSelector::ByName("2024".into())]);
        let resolved = ColumnResolver::new(&options).resolve(&table.rows);

        assert_eq!(resolved.indices, vec![1]);
    }

    #[test]
    fn test_empty_table() {
        let options = ConversionOptions::new();
        let resolved = ColumnResolver::new(&options).resolve(&Table::new().rows);
        assert!(resolved.is_empty());
        assert_eq!(resolved.names, None);
    }
}
