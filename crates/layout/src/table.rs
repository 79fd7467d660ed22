//! Plain-text table layout.
//!
//! Cells are placed into a sparse grid row by row, each at the first free
//! column at or after the cursor, occupying `colspan x rowspan` slots. Row
//! offsets (in output lines) are fixed during placement from cell heights;
//! column offsets are then computed column by column from cell widths, so a
//! spanning cell only widens the last column it covers.

use crate::inline::char_len;

/// A finished table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub colspan: usize,
    pub rowspan: usize,
    pub text: String,
}

impl TableCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            colspan: 1,
            rowspan: 1,
            text: text.into(),
        }
    }

    pub fn spanning(text: impl Into<String>, colspan: usize, rowspan: usize) -> Self {
        Self {
            colspan: colspan.max(1),
            rowspan: rowspan.max(1),
            text: text.into(),
        }
    }
}

// Start offsets of consecutive tracks. An unset offset defaults to one past
// the previous one.
#[derive(Default)]
struct Offsets(Vec<Option<usize>>);

impl Offsets {
    fn get(&mut self, index: usize) -> usize {
        if self.0.len() <= index {
            self.0.resize(index + 1, None);
        }
        self.0[0].get_or_insert(0);
        for i in 1..=index {
            if self.0[i].is_none() {
                let prev = self.0[i - 1].unwrap_or(0);
                self.0[i] = Some(prev + 1);
            }
        }
        self.0[index].unwrap_or(0)
    }

    // Track `base + span` starts at least `size` after track `base`.
    fn update(&mut self, base: usize, span: usize, size: usize) {
        let current = self.get(base + span);
        let start = self.get(base);
        self.0[base + span] = Some(current.max(start + size));
    }
}

fn slot(grid: &mut Vec<Vec<Option<usize>>>, row: usize, col: usize) -> &mut Option<usize> {
    if grid.len() <= row {
        grid.resize_with(row + 1, Vec::new);
    }
    let cells = &mut grid[row];
    if cells.len() <= col {
        cells.resize(col + 1, None);
    }
    &mut cells[col]
}

fn pad_to(line: &mut String, width: usize) {
    let len = char_len(line);
    if len < width {
        line.extend(std::iter::repeat_n(' ', width - len));
    }
}

/// Render rows of cells with `col_spacing` spaces between columns and
/// `row_spacing` empty lines between rows.
pub fn table_to_string(rows: &[Vec<TableCell>], row_spacing: usize, col_spacing: usize) -> String {
    let row_count = rows.len();
    let mut grid: Vec<Vec<Option<usize>>> = Vec::new();
    let mut placed: Vec<(&TableCell, Vec<&str>)> = Vec::new();
    let mut row_offsets = Offsets::default();
    let mut col_count = 0;

    for (y, row) in rows.iter().enumerate() {
        let mut x = 0;
        for cell in row {
            while grid.get(y).and_then(|r| r.get(x)).is_some_and(Option::is_some) {
                x += 1;
            }
            let id = placed.len();
            for r in 0..cell.rowspan {
                for c in 0..cell.colspan {
                    *slot(&mut grid, y + r, x + c) = Some(id);
                }
            }
            x += cell.colspan;
            let lines: Vec<&str> = cell.text.split('\n').collect();
            row_offsets.update(y, cell.rowspan, lines.len() + row_spacing);
            placed.push((cell, lines));
        }
        col_count = col_count.max(grid.get(y).map_or(0, Vec::len));
    }

    // Column-major view of the grid, limited to the declared rows.
    let columns: Vec<Vec<Option<usize>>> = (0..col_count)
        .map(|x| {
            (0..row_count)
                .map(|y| grid.get(y).and_then(|r| r.get(x)).copied().flatten())
                .collect()
        })
        .collect();

    let mut output: Vec<String> = Vec::new();
    let mut col_offsets = Offsets::default();
    let mut rendered = vec![false; placed.len()];
    for (x, column) in columns.iter().enumerate() {
        let mut y = 0;
        while y < column.len() {
            let Some(id) = column[y] else {
                y += 1;
                continue;
            };
            let (cell, lines) = &placed[id];
            if !rendered[id] {
                let start = col_offsets.get(x);
                let top = row_offsets.get(y);
                let mut width = 0;
                for (j, text) in lines.iter().enumerate() {
                    if output.len() <= top + j {
                        output.resize_with(top + j + 1, String::new);
                    }
                    let line = &mut output[top + j];
                    pad_to(line, start);
                    line.push_str(text);
                    width = width.max(char_len(text));
                }
                col_offsets.update(x, cell.colspan, width + col_spacing);
                rendered[id] = true;
            }
            y += cell.rowspan;
        }
    }
    output.join("\n")
}
