//! Rendering of automaton transition tables: three gutter columns (initial-state
//! arrow, accepting tag, state id) followed by one column per alphabet symbol,
//! every column padded to its widest entry.

/// One state's row. The marker holds the initial-state arrow, the tag holds
/// `*<pattern>` for accepting states; both are empty otherwise.
pub struct StateRow {
    pub marker: String,
    pub tag: String,
    pub id: String,
    pub cells: Vec<String>,
}

pub struct TransitionTable {
    symbols: Vec<String>,
    rows: Vec<StateRow>,
}

impl TransitionTable {
    /// A table with one column per symbol (callers put ε first for NFAs)
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            rows: vec![],
        }
    }

    pub fn push_state(&mut self, row: StateRow) {
        self.rows.push(row);
    }

    /// Lays the table out with the symbol header over the transition cells and
    /// the gutter columns left blank in the header row.
    pub fn render(&self) -> String {
        let char_len = |s: &str| s.chars().count();
        let marker_width = self.rows.iter().map(|r| char_len(&r.marker)).max().unwrap_or(0);
        let tag_width = self.rows.iter().map(|r| char_len(&r.tag)).max().unwrap_or(0);
        let id_width = self.rows.iter().map(|r| char_len(&r.id)).max().unwrap_or(0);
        let cell_widths: Vec<usize> = self
            .symbols
            .iter()
            .enumerate()
            .map(|(col, symbol)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.cells.get(col))
                    .map(|cell| char_len(cell))
                    .chain([char_len(symbol)])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 1);

        let mut header = format!("{:marker_width$} {:tag_width$} {:id_width$}", "", "", "");
        for (symbol, &width) in self.symbols.iter().zip(&cell_widths) {
            header.push(' ');
            header.push_str(&format!("{symbol:width$}"));
        }
        lines.push(header.trim_end().to_string());

        for row in &self.rows {
            let mut line = format!(
                "{:marker_width$} {:tag_width$} {:id_width$}",
                row.marker, row.tag, row.id
            );
            for (cell, &width) in row.cells.iter().zip(&cell_widths) {
                line.push(' ');
                line.push_str(&format!("{cell:width$}"));
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }
}
