//! Plain-text table layout for the validation report.

/// Separator between columns.
const GUTTER: &str = "  ";

/// Left-aligned rows of text.
///
/// Column widths are measured in bytes while cells are padded by character
/// count. Cells containing multi-byte glyphs therefore receive extra
/// padding, which the report format depends on.
#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();

        for (i, cell) in row.iter().enumerate() {
            if i == self.widths.len() {
                self.widths.push(0);
            }
            self.widths[i] = self.widths[i].max(cell.len());
        }

        self.rows.push(row);
    }

    /// Render every row followed by a newline. The last cell of a row is
    /// never padded.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    out.push_str(GUTTER);
                }
                out.push_str(cell);

                if i + 1 < row.len() {
                    let padding = self.widths[i].saturating_sub(cell.chars().count());
                    out.extend(std::iter::repeat(' ').take(padding));
                }
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligns_columns() {
        let mut table = Table::new();
        table.add_row(["a", "bb", "c"]);
        table.add_row(["aaa", "b", "c"]);

        assert_eq!(table.render(), "a    bb  c\naaa  b   c\n");
    }

    #[test]
    fn test_last_column_unpadded() {
        let mut table = Table::new();
        table.add_row(["x", "long last cell"]);
        table.add_row(["y", "z"]);

        assert_eq!(table.render(), "x  long last cell\ny  z\n");
    }

    #[test]
    fn test_multibyte_cells_get_byte_width() {
        let mut table = Table::new();
        table.add_row([" ❯ NAME", "next"]);

        // "❯" is three bytes wide, so two spaces of padding precede the gutter.
        assert_eq!(table.render(), " ❯ NAME    next\n");
    }

    #[test]
    fn test_empty() {
        assert_eq!(Table::new().render(), "");
    }
}
