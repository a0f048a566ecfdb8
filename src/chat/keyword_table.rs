//! Ordered keyword → answer table used for offline chat replies.
//!
//! The table is scanned linearly in definition order and the first keyword
//! found as a substring of the lower-cased utterance wins. There is no
//! scoring and no longest-match preference.
//!
//! Tables are either the built-in [`KeywordTable::builtin`] set or loaded
//! from a YAML file at startup:
//!
//! ```yaml
//! keywords:
//!   - keyword: excel
//!     answer: Start with SUM, AVERAGE and VLOOKUP.
//!   - keyword: sql
//!     answer: Practice SELECT, JOIN and GROUP BY.
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utilities::errors::ConfigError;

/// Reply used when no keyword matches and no remote answer is available.
pub const DEFAULT_RESPONSE: &str = "I'm not sure about that one yet. Try asking me about Excel, \
     SQL, Python, Power BI, data cleaning or dashboards!";

/// One keyword and its canned answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
struct KeywordFile {
    keywords: Vec<KeywordEntry>,
}

/// Immutable, ordered keyword table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
}

impl KeywordTable {
    /// Build a table from `(keyword, answer)` pairs in definition order.
    ///
    /// Keywords are trimmed and lower-cased. Blank keywords or answers are
    /// rejected. A repeated keyword can never match, so only its first
    /// definition is kept.
    pub fn new<I, K, A>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: Into<String>,
    {
        let mut entries: Vec<KeywordEntry> = Vec::new();
        for (index, (keyword, answer)) in pairs.into_iter().enumerate() {
            let keyword = keyword.into().trim().to_lowercase();
            let answer = answer.into();

            if keyword.is_empty() {
                return Err(ConfigError::InvalidKeywordTable {
                    message: format!("entry {} has an empty keyword", index),
                });
            }
            if answer.trim().is_empty() {
                return Err(ConfigError::InvalidKeywordTable {
                    message: format!("keyword '{}' has an empty answer", keyword),
                });
            }
            if entries.iter().any(|e| e.keyword == keyword) {
                log::warn!("Dropping duplicate keyword '{}' (entry {})", keyword, index);
                continue;
            }

            entries.push(KeywordEntry { keyword, answer });
        }
        Ok(Self { entries })
    }

    /// Parse a YAML document with a top-level `keywords:` list.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: KeywordFile = serde_yaml::from_str(yaml)?;
        Self::new(file.keywords.into_iter().map(|e| (e.keyword, e.answer)))
    }

    /// Load a YAML keyword file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_yaml(&content)?;
        log::debug!(
            "Loaded {} keyword entries from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// The table shipped with the site: common data-analytics topics.
    pub fn builtin() -> Self {
        let entries = BUILTIN_ENTRIES
            .iter()
            .map(|(keyword, answer)| KeywordEntry {
                keyword: (*keyword).to_string(),
                answer: (*answer).to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Answer of the first entry whose keyword occurs in `normalized`.
    ///
    /// `normalized` must already be lower-cased.
    pub fn first_match(&self, normalized: &str) -> Option<&KeywordEntry> {
        self.entries
            .iter()
            .find(|entry| normalized.contains(entry.keyword.as_str()))
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Order matters: more specific phrases sit above the broad tool names they
// contain.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    (
        "pivot",
        "Pivot tables summarize large data sets in seconds. Select your data, \
         choose Insert > PivotTable, then drag fields into Rows, Columns and Values.",
    ),
    (
        "vlookup",
        "VLOOKUP finds a value in the first column of a range and returns a value \
         from another column: =VLOOKUP(lookup_value, table, col_index, FALSE). \
         XLOOKUP is the modern replacement.",
    ),
    (
        "excel",
        "Excel is the best place to start. Learn SUM, AVERAGE, IF and VLOOKUP, \
         then move on to pivot tables and charts.",
    ),
    (
        "join",
        "A JOIN combines rows from two tables on a related column, for example \
         customers JOIN orders ON customers.id = orders.customer_id.",
    ),
    (
        "sql",
        "SQL lets you query databases. Practice SELECT, WHERE, GROUP BY and JOIN \
         on a sample sales database.",
    ),
    (
        "pandas",
        "pandas is Python's workhorse for tabular data. Try pd.read_csv(), \
         df.describe() and df.groupby().",
    ),
    (
        "python",
        "Python is great for automating analysis. Start with pandas for data \
         wrangling and seaborn or matplotlib for charts.",
    ),
    (
        "power bi",
        "Power BI turns your data into interactive dashboards. Import a data set, \
         build a model, then add visuals and slicers.",
    ),
    (
        "dashboard",
        "A good dashboard answers a few key questions at a glance. Keep it simple, \
         put the most important KPI top-left and use consistent colors.",
    ),
    (
        "chart",
        "Pick the chart for the question: bars to compare, lines for trends, pies \
         for composition and scatter plots for relationships.",
    ),
    (
        "clean",
        "Data cleaning comes first: remove duplicates, handle missing values, fix \
         data types and standardize text.",
    ),
    (
        "statistic",
        "Begin with descriptive statistics: mean, median, mode, standard deviation \
         and percentiles.",
    ),
    (
        "career",
        "Build a portfolio of two or three real projects, share them on GitHub or \
         LinkedIn and practice explaining your insights.",
    ),
    (
        "hello",
        "Hi there! I can help you learn data analytics. Ask me about Excel, SQL, \
         Python or Power BI.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> KeywordTable {
        KeywordTable::new([("excel", "Use SUM."), ("sql", "Use GROUP BY.")]).unwrap()
    }

    #[test]
    fn test_first_match_respects_definition_order() {
        let table = sample_table();
        let hit = table.first_match("can you help with excel and sql?").unwrap();
        assert_eq!(hit.answer, "Use SUM.");

        let hit = table.first_match("sql before excel").unwrap();
        assert_eq!(hit.answer, "Use SUM.");
    }

    #[test]
    fn test_first_match_substring() {
        let table = sample_table();
        assert_eq!(
            table.first_match("mysql tips").map(|e| e.answer.as_str()),
            Some("Use GROUP BY.")
        );
        assert!(table.first_match("tell me about rockets").is_none());
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let table = KeywordTable::new([("  Power BI ", "Dashboards.")]).unwrap();
        assert_eq!(table.entries()[0].keyword, "power bi");
        assert!(table.first_match("is power bi free?").is_some());
    }

    #[test]
    fn test_rejects_blank_entries() {
        assert!(matches!(
            KeywordTable::new([("", "answer")]),
            Err(ConfigError::InvalidKeywordTable { .. })
        ));
        assert!(matches!(
            KeywordTable::new([("excel", "  ")]),
            Err(ConfigError::InvalidKeywordTable { .. })
        ));
    }

    #[test]
    fn test_duplicate_keyword_keeps_first() {
        let table = KeywordTable::new([("excel", "first"), ("EXCEL", "second")]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.first_match("excel").unwrap().answer, "first");
    }

    #[test]
    fn test_from_yaml_keeps_order() {
        let yaml = r#"
keywords:
  - keyword: sql
    answer: Use GROUP BY.
  - keyword: excel
    answer: Use SUM.
"#;
        let table = KeywordTable::from_yaml(yaml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].keyword, "sql");
        assert_eq!(
            table.first_match("excel and sql").unwrap().answer,
            "Use GROUP BY."
        );
    }

    #[test]
    fn test_from_yaml_rejects_wrong_shape() {
        assert!(matches!(
            KeywordTable::from_yaml("excel: Use SUM."),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.yaml");
        std::fs::write(
            &path,
            "keywords:\n  - keyword: Tableau\n    answer: Try Tableau Public.\n",
        )
        .unwrap();

        let table = KeywordTable::load(&path).unwrap();
        assert_eq!(
            table.first_match("what is tableau?").unwrap().answer,
            "Try Tableau Public."
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = KeywordTable::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_builtin_is_valid() {
        let builtin = KeywordTable::builtin();
        let rebuilt = KeywordTable::new(
            builtin
                .entries()
                .iter()
                .map(|e| (e.keyword.clone(), e.answer.clone())),
        )
        .unwrap();
        assert_eq!(builtin, rebuilt);
        assert!(builtin
            .entries()
            .iter()
            .all(|e| e.keyword == e.keyword.to_lowercase()));
        assert!(!DEFAULT_RESPONSE.is_empty());
    }

    #[test]
    fn test_builtin_prefers_specific_phrases() {
        let table = KeywordTable::builtin();
        let hit = table.first_match("how do i make a pivot table in excel?").unwrap();
        assert_eq!(hit.keyword, "pivot");
    }
}
