//! Result row rendering

use crate::database::Row;

/// Render a row on one line, or one value per line if that line would
/// be wider than `width`.
pub fn render_row(row: &Row, width: usize) -> String {
    let line = row.to_string();
    if row.cells().len() < 2 || line.chars().count() <= width {
        return line;
    }

    let mut out = String::with_capacity(line.len() + row.cells().len());
    out.push('(');
    for (i, cell) in row.cells().iter().enumerate() {
        if i > 0 {
            out.push_str(",\n ");
        }
        out.push_str(&cell.to_string());
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Cell;

    #[test]
    fn test_fits_on_one_line() {
        let row = Row(vec![Cell::Integer(1), Cell::Text("a".into())]);
        assert_eq!(render_row(&row, 80), "(1, 'a')");
    }

    #[test]
    fn test_wraps_when_too_wide() {
        let row = Row(vec![
            Cell::Text("CREATE TABLE users (id INTEGER)".into()),
            Cell::Integer(42),
        ]);
        assert_eq!(
            render_row(&row, 20),
            "('CREATE TABLE users (id INTEGER)',\n 42)"
        );
    }

    #[test]
    fn test_single_cell_never_wraps() {
        let row = Row(vec![Cell::Text("a long value that does not fit".into())]);
        assert_eq!(render_row(&row, 5), "('a long value that does not fit',)");
    }
}
