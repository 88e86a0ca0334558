use std::collections::HashMap;

/// One table row: lowercased header cell → raw data cell.
pub type Record = HashMap<String, String>;

/// An ordered run of records parsed from a pipe-delimited table.
pub type Table = Vec<Record>;

/// Split a pipe-delimited row into trimmed cells. Only the empty cells
/// produced by the leading and trailing `|` separators are discarded;
/// interior empty cells keep their column position.
pub fn cells(line: &str) -> Vec<&str> {
    let cells: Vec<&str> = line.split('|').map(str::trim).collect();
    let start = cells.iter().take_while(|c| c.is_empty()).count();
    let end = cells.len() - cells.iter().rev().take_while(|c| c.is_empty()).count();
    if start >= end {
        return Vec::new();
    }
    cells[start..end].to_vec()
}

/// A separator row divides the header from the body: its first non-empty
/// cell starts with `-`.
pub fn is_separator_row(line: &str) -> bool {
    cells(line)
        .iter()
        .find(|c| !c.is_empty())
        .is_some_and(|c| c.starts_with('-'))
}

/// Parse a contiguous pipe run. The first line is the header, the second is
/// the separator (discarded without further validation), the rest are data
/// rows zipped positionally against the header. Short rows omit trailing
/// keys; extra cells are dropped.
pub fn parse_table(lines: &[&str]) -> Table {
    let headers: Vec<String> = lines
        .first()
        .map(|l| cells(l).iter().map(|c| c.to_lowercase()).collect())
        .unwrap_or_default();

    lines
        .iter()
        .skip(2)
        .map(|row| {
            headers
                .iter()
                .zip(cells(row))
                .map(|(h, c)| (h.clone(), c.to_string()))
                .collect()
        })
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_round_trip() {
        let table = parse_table(&["| Name | Value |", "| - | - |", "| x | 1 |"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0]["name"], "x");
        assert_eq!(table[0]["value"], "1");
    }

    #[test]
    fn headers_are_lowercased() {
        let table = parse_table(&["| Field | TYPE |", "| - | - |", "| id | snowflake |"]);
        assert_eq!(table[0]["field"], "id");
        assert_eq!(table[0]["type"], "snowflake");
    }

    #[test]
    fn short_rows_omit_trailing_keys() {
        let table = parse_table(&["| a | b | c |", "| - | - | - |", "| 1 | 2 |"]);
        assert_eq!(table[0].len(), 2);
        assert!(!table[0].contains_key("c"));
    }

    #[test]
    fn extra_cells_are_dropped() {
        let table = parse_table(&["| a |", "| - |", "| 1 | 2 | 3 |"]);
        assert_eq!(table[0].len(), 1);
        assert_eq!(table[0]["a"], "1");
    }

    #[test]
    fn interior_empty_cells_keep_alignment() {
        let table = parse_table(&["| a | b | c |", "| - | - | - |", "| 1 |  | 3 |"]);
        assert_eq!(table[0]["a"], "1");
        assert_eq!(table[0]["b"], "");
        assert_eq!(table[0]["c"], "3");
    }

    #[test]
    fn interior_empty_header_cell_keeps_its_column() {
        let table = parse_table(&["| a |  | c |", "| - | - | - |", "| 1 | 2 | 3 |"]);
        assert_eq!(table[0]["a"], "1");
        assert_eq!(table[0][""], "2");
        assert_eq!(table[0]["c"], "3");
    }

    #[test]
    fn separator_detection() {
        assert!(is_separator_row("| - | - |"));
        assert!(is_separator_row("| ----- | --- |"));
        assert!(is_separator_row("|  | - |"));
        assert!(!is_separator_row("| a | b |"));
        assert!(!is_separator_row("||"));
    }

    #[test]
    fn header_and_separator_only() {
        let table = parse_table(&["| a | b |", "| - | - |"]);
        assert!(table.is_empty());
    }
}
