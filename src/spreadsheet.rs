use crate::error::{BatchError, Result};
use std::fmt;
use std::path::Path;

/// Inclusive rectangle of 1-based cell positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub top: i64,
    pub left: i64,
    pub bottom: i64,
    pub right: i64,
}

impl Rect {
    /// The rectangle spanned by two (row, col) corners, in either order.
    pub fn spanning(a: (i64, i64), b: (i64, i64)) -> Self {
        Self {
            top: a.0.min(b.0),
            left: a.1.min(b.1),
            bottom: a.0.max(b.0),
            right: a.1.max(b.1),
        }
    }

    pub fn rows(&self) -> i64 {
        self.bottom.saturating_sub(self.top).saturating_add(1)
    }

    pub fn cols(&self) -> i64 {
        self.right.saturating_sub(self.left).saturating_add(1)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top < 1 || self.left < 1 {
            return write!(
                f,
                "R{}C{}:R{}C{}",
                self.top, self.left, self.bottom, self.right
            );
        }
        write!(
            f,
            "{}{}:{}{}",
            col_to_letter(self.left as usize),
            self.top,
            col_to_letter(self.right as usize),
            self.bottom
        )
    }
}

/// An xlsx workbook whose active sheet is the write target.
pub struct Workbook {
    book: umya_spreadsheet::Spreadsheet,
}

impl Workbook {
    /// Load a workbook from disk.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(BatchError::MissingFile(path.to_path_buf()));
        }
        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|source| {
            BatchError::Workbook {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self::from_book(book))
    }

    fn from_book(book: umya_spreadsheet::Spreadsheet) -> Self {
        Self { book }
    }

    /// Highest used (row, column) of the active sheet, never below (1, 1).
    pub fn bounds(&self) -> (i64, i64) {
        let (col, row) = self.book.get_active_sheet().get_highest_column_and_row();
        (i64::from(row.max(1)), i64::from(col.max(1)))
    }

    /// Overwrite every non-empty cell of `rect` with `content`.
    ///
    /// Cells that are absent or hold an empty string are left alone. Returns
    /// the number of cells written.
    pub fn write_range(&mut self, rect: Rect, content: &str) -> Result<usize> {
        if rect.top < 1 || rect.left < 1 {
            return Err(BatchError::CellOutOfRange {
                row: rect.top,
                col: rect.left,
            });
        }

        // Nothing past the used area can hold a value.
        let (max_row, max_col) = self.bounds();
        let bottom = rect.bottom.min(max_row);
        let right = rect.right.min(max_col);

        let sheet = self.book.get_active_sheet_mut();
        let mut written = 0;
        for row in rect.top..=bottom {
            for col in rect.left..=right {
                let coord = (col as u32, row as u32);
                let occupied = match sheet.get_cell(coord) {
                    Some(cell) => !cell.get_value().is_empty() || !cell.get_formula().is_empty(),
                    None => false,
                };
                if occupied {
                    // Always text: "007" must not turn into the number 7.
                    sheet.get_cell_mut(coord).set_value_string(content);
                    written += 1;
                }
            }
        }
        Ok(written)
    }

    #[cfg(test)]
    /// Current display value of a cell, `None` when the cell was never set.
    pub fn value(&self, row: u32, col: u32) -> Option<String> {
        self.book
            .get_active_sheet()
            .get_cell((col, row))
            .map(|cell| cell.get_value().into_owned())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, path).map_err(|source| {
            BatchError::Workbook {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

/// Convert a one–based column index to its letter label (e.g., 1 → "A", 27 → "AA").
pub fn col_to_letter(mut col: usize) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        col -= 1;
        letters.push((b'A' + (col % 26) as u8) as char);
        col /= 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x4 sheet, D3 set so the used area covers A1:D3.
    fn sample() -> Workbook {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_active_sheet_mut();
        sheet.get_cell_mut("A1").set_value("a1");
        sheet.get_cell_mut("B1").set_value("");
        sheet.get_cell_mut("C1").set_value_number(0);
        sheet.get_cell_mut("A2").set_value("a2");
        sheet.get_cell_mut("C2").set_value("c2");
        sheet.get_cell_mut("D3").set_value("d3");
        Workbook::from_book(book)
    }

    #[test]
    fn spanning_is_order_independent() {
        let a = Rect::spanning((2, 5), (1, 3));
        let b = Rect::spanning((1, 3), (2, 5));
        assert_eq!(a, b);
        assert_eq!(
            a,
            Rect {
                top: 1,
                left: 3,
                bottom: 2,
                right: 5
            }
        );
        assert_eq!((a.rows(), a.cols()), (2, 3));
    }

    #[test]
    fn extreme_spans_saturate() {
        let rect = Rect::spanning((i64::MIN, i64::MIN), (i64::MAX, 4));
        assert_eq!(rect.rows(), i64::MAX);
        assert_eq!(rect.cols(), i64::MAX);
    }

    #[test]
    fn rect_display_uses_column_letters() {
        assert_eq!(Rect::spanning((2, 5), (40, 5)).to_string(), "E2:E40");
        assert_eq!(Rect::spanning((1, 27), (3, 1)).to_string(), "A1:AA3");
        assert_eq!(Rect::spanning((-1, 1), (3, 2)).to_string(), "R-1C1:R3C2");
    }

    #[test]
    fn col_to_letter_labels() {
        assert_eq!(col_to_letter(1), "A");
        assert_eq!(col_to_letter(26), "Z");
        assert_eq!(col_to_letter(27), "AA");
        assert_eq!(col_to_letter(703), "AAA");
    }

    #[test]
    fn bounds_follow_used_area() {
        assert_eq!(sample().bounds(), (3, 4));
    }

    #[test]
    fn empty_sheet_bounds_are_one_by_one() {
        let wb = Workbook::from_book(umya_spreadsheet::new_file());
        assert_eq!(wb.bounds(), (1, 1));
    }

    #[test]
    fn content_is_written_as_text() {
        let mut wb = sample();
        let rect = Rect::spanning((1, 1), (1, 3));
        assert_eq!(wb.write_range(rect, "007").unwrap(), 2);
        let sheet = wb.book.get_active_sheet();
        for coord in [(1u32, 1u32), (3, 1)] {
            let cell = sheet.get_cell(coord).unwrap();
            assert_eq!(cell.get_value(), "007");
            assert_eq!(cell.get_data_type(), "s");
        }

        wb.write_range(rect, "TRUE").unwrap();
        let cell = wb.book.get_active_sheet().get_cell((1u32, 1u32)).unwrap();
        assert_eq!(cell.get_value(), "TRUE");
        assert_eq!(cell.get_data_type(), "s");
    }

    #[test]
    fn only_occupied_cells_are_overwritten() {
        let mut wb = sample();
        let written = wb.write_range(Rect::spanning((1, 1), (3, 4)), "X").unwrap();
        assert_eq!(written, 5);
        assert_eq!(wb.value(1, 1).as_deref(), Some("X"));
        assert_eq!(wb.value(1, 2).as_deref(), Some(""));
        assert_eq!(wb.value(1, 3).as_deref(), Some("X"));
        assert_eq!(wb.value(2, 1).as_deref(), Some("X"));
        assert_eq!(wb.value(2, 2), None);
        assert_eq!(wb.value(2, 3).as_deref(), Some("X"));
        assert_eq!(wb.value(3, 4).as_deref(), Some("X"));
    }

    #[test]
    fn cells_outside_rect_are_untouched() {
        let mut wb = sample();
        let written = wb.write_range(Rect::spanning((2, 3), (1, 3)), "X").unwrap();
        assert_eq!(written, 2);
        assert_eq!(wb.value(1, 1).as_deref(), Some("a1"));
        assert_eq!(wb.value(2, 1).as_deref(), Some("a2"));
        assert_eq!(wb.value(3, 4).as_deref(), Some("d3"));
    }

    #[test]
    fn rect_past_used_area_is_clipped() {
        let mut wb = sample();
        let written = wb
            .write_range(Rect::spanning((3, 4), (1_000_000, 16_384)), "X")
            .unwrap();
        assert_eq!(written, 1);
        assert_eq!(wb.bounds(), (3, 4));
    }

    #[test]
    fn non_positive_rows_are_rejected() {
        let mut wb = sample();
        let err = wb.write_range(Rect::spanning((-1, 1), (2, 2)), "X").unwrap_err();
        assert!(matches!(err, BatchError::CellOutOfRange { row: -1, col: 1 }));
        assert_eq!(wb.value(1, 1).as_deref(), Some("a1"));
    }
}
