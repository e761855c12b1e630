//! Delimited-text parsers (CSV, TXT, TSV).

use tracing::debug;

use crate::error::{DatascanError, Result};
use super::cell::Cell;
use super::source::{Dataset, SourceFormat};

/// Delimiters tried when auto-detecting, highest priority first.
const DELIMITERS: &[char] = &['|', ',', ';', '\t'];

/// Turns raw file text into a [`Dataset`].
pub trait FormatParser {
    /// Parse `text` read from `file_name`.
    fn parse(&self, text: &str, file_name: &str) -> Result<Dataset>;
}

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect from the header line).
    pub delimiter: Option<char>,
    /// Whether fields may be wrapped in double quotes.
    pub quoted: bool,
    /// Format tag stamped on the resulting dataset.
    pub format: SourceFormat,
}

impl ParserConfig {
    /// Comma-separated with quote handling.
    pub fn csv() -> Self {
        Self {
            delimiter: Some(','),
            quoted: true,
            format: SourceFormat::Csv,
        }
    }

    /// Plain split on a delimiter detected from the first line.
    pub fn txt() -> Self {
        Self {
            delimiter: None,
            quoted: false,
            format: SourceFormat::Txt,
        }
    }

    /// Plain split on tabs.
    pub fn tsv() -> Self {
        Self {
            delimiter: Some('\t'),
            quoted: false,
            format: SourceFormat::Tsv,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::csv()
    }
}

/// Parses line-oriented delimited text.
pub struct DelimitedParser {
    config: ParserConfig,
}

impl DelimitedParser {
    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn csv() -> Self {
        Self::with_config(ParserConfig::csv())
    }

    pub fn txt() -> Self {
        Self::with_config(ParserConfig::txt())
    }

    pub fn tsv() -> Self {
        Self::with_config(ParserConfig::tsv())
    }

    fn split_line(&self, line: &str, delimiter: char) -> Vec<String> {
        if self.config.quoted {
            split_quoted(line, delimiter)
        } else {
            line.split(delimiter).map(|f| f.trim().to_string()).collect()
        }
    }
}

impl FormatParser for DelimitedParser {
    fn parse(&self, text: &str, file_name: &str) -> Result<Dataset> {
        let mut lines = text.split('\n').filter(|l| !l.trim().is_empty());

        let header_line = lines
            .next()
            .ok_or_else(|| DatascanError::EmptyFile("File is empty".to_string()))?;

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(header_line),
        };

        let headers = self.split_line(header_line, delimiter);
        let expected_cols = headers.len();

        let mut rows = Vec::new();
        for line in lines {
            let mut fields = self.split_line(line, delimiter);

            // Pad or truncate to the header width
            fields.resize(expected_cols, String::new());

            rows.push(fields.iter().map(|f| Cell::coerce(f)).collect());
        }

        debug!(
            file = file_name,
            format = %self.config.format,
            delimiter = ?delimiter,
            columns = expected_cols,
            rows = rows.len(),
            "parsed delimited text"
        );

        Ok(Dataset::new(headers, rows, file_name, self.config.format))
    }
}

/// Pick the delimiter for a header line by fixed priority, defaulting to tab.
pub fn detect_delimiter(header_line: &str) -> char {
    DELIMITERS
        .iter()
        .copied()
        .find(|d| header_line.contains(*d))
        .unwrap_or('\t')
}

/// Split one line on `delimiter`, honoring double-quoted fields.
///
/// Inside quotes a doubled `""` is a literal quote and the delimiter is plain
/// text. Every field is trimmed after unquoting.
pub fn split_quoted(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if ch == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }

    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_quoted_delimiter_inside_quotes() {
        assert_eq!(split_quoted(r#"a,"b,c",d"#, ','), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_split_quoted_escaped_quote() {
        assert_eq!(
            split_quoted(r#""He said ""hi""""#, ','),
            vec![r#"He said "hi""#]
        );
    }

    #[test]
    fn test_split_quoted_trims_and_keeps_empty_fields() {
        assert_eq!(split_quoted(" a , ,c\r", ','), vec!["a", "", "c"]);
        assert_eq!(split_quoted("", ','), vec![""]);
    }

    #[test]
    fn test_detect_delimiter_priority() {
        assert_eq!(detect_delimiter("a|b,c"), '|');
        assert_eq!(detect_delimiter("a,b;c"), ',');
        assert_eq!(detect_delimiter("a;b\tc"), ';');
        assert_eq!(detect_delimiter("a\tb"), '\t');
        assert_eq!(detect_delimiter("single"), '\t');
    }

    #[test]
    fn test_parse_csv() {
        let parser = DelimitedParser::csv();
        let data = "name,age,city\nAlice,30,NYC\n\n  \nBob,25,LA";
        let table = parser.parse(data, "people.csv").unwrap();

        assert_eq!(table.headers(), &["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some(&Cell::Text("Alice".to_string())));
        assert_eq!(table.get(1, 1), Some(&Cell::Number(25.0)));
        assert_eq!(table.source_format(), SourceFormat::Csv);
    }

    #[test]
    fn test_parse_csv_pads_and_truncates() {
        let parser = DelimitedParser::csv();
        let data = "a,b,c,d\n1,2\n1,2,3,4,5,6";
        let table = parser.parse(data, "t.csv").unwrap();

        assert_eq!(
            table.rows()[0],
            vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Null, Cell::Null]
        );
        assert_eq!(table.rows()[1].len(), 4);
        assert_eq!(table.rows()[1][3], Cell::Number(4.0));
    }

    #[test]
    fn test_parse_blank_file_is_empty_error() {
        let parser = DelimitedParser::csv();
        let err = parser.parse("\n   \n\r\n", "blank.csv").unwrap_err();
        assert!(matches!(err, DatascanError::EmptyFile(_)));
    }

    #[test]
    fn test_parse_txt_detects_pipe() {
        let parser = DelimitedParser::txt();
        let table = parser.parse("id|name\n1|\"x\"\n", "t.txt").unwrap();

        assert_eq!(table.headers(), &["id", "name"]);
        // No quote handling for TXT.
        assert_eq!(table.get(0, 1), Some(&Cell::Text("\"x\"".to_string())));
        assert_eq!(table.source_format(), SourceFormat::Txt);
    }

    #[test]
    fn test_parse_tsv_ignores_commas() {
        let parser = DelimitedParser::tsv();
        let table = parser.parse("a,b\tc\n1,2\t3", "t.tsv").unwrap();

        assert_eq!(table.headers(), &["a,b", "c"]);
        assert_eq!(table.get(0, 0), Some(&Cell::Text("1,2".to_string())));
        assert_eq!(table.get(0, 1), Some(&Cell::Number(3.0)));
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let table = DelimitedParser::csv().parse("a,b\n", "t.csv").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }
}
