use leaderboard::view::TableView;
use leaderboard::{Column, ProjectedRow, SortDir};

/// A plain-text table with aligned columns.
///
/// With controls enabled, the state of the dropdown and of the checkboxes is
/// printed above the table.
#[derive(Debug, Default)]
pub struct TextView {
    controls: bool,
    models: Vec<String>,
    columns: Vec<(Column, bool)>,
    sort: Option<(Column, SortDir)>,
    rows: Vec<ProjectedRow>,
    status: String,
}

impl TextView {
    pub fn new(controls: bool) -> TextView {
        TextView {
            controls,
            ..TextView::default()
        }
    }

    fn header_label(&self, column: Column) -> String {
        match self.sort {
            Some((key, SortDir::Desc)) if key == column => format!("{} v", column.label()),
            Some((key, SortDir::Asc)) if key == column => format!("{} ^", column.label()),
            _ => column.label().to_string(),
        }
    }

    pub fn output(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        if self.controls && !self.columns.is_empty() {
            let mut models = vec!["all".to_string()];
            models.extend(self.models.iter().cloned());
            lines.push(format!("Models: {}", models.join(", ")));
            let checkboxes: Vec<String> = self
                .columns
                .iter()
                .map(|(c, visible)| format!("[{}] {}", if *visible { "x" } else { " " }, c.label()))
                .collect();
            lines.push(format!("Columns: {}", checkboxes.join(" ")));
            lines.push(String::new());
        }

        let visible: Vec<Column> = self
            .columns
            .iter()
            .filter(|(_, v)| *v)
            .map(|(c, _)| *c)
            .collect();
        if !visible.is_empty() {
            let header: Vec<String> = visible.iter().map(|c| self.header_label(*c)).collect();
            let body: Vec<Vec<String>> = self
                .rows
                .iter()
                .map(|r| {
                    visible
                        .iter()
                        .map(|c| r.cell(*c).unwrap_or("").to_string())
                        .collect()
                })
                .collect();
            let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
            for cells in body.iter() {
                for (w, cell) in widths.iter_mut().zip(cells.iter()) {
                    *w = (*w).max(cell.chars().count());
                }
            }
            lines.push(format_line(&header, &widths));
            for cells in body.iter() {
                lines.push(format_line(cells, &widths));
            }
            lines.push(String::new());
        }

        lines.push(self.status.clone());
        let mut res = lines.join("\n");
        res.push('\n');
        res
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect();
    padded.join("  ").trim_end().to_string()
}

impl TableView for TextView {
    fn set_model_options(&mut self, models: &[String]) {
        self.models = models.to_vec();
    }

    fn set_columns(&mut self, columns: &[(Column, bool)]) {
        self.columns = columns.to_vec();
    }

    fn set_sort_indicator(&mut self, key: Column, dir: SortDir) {
        self.sort = Some((key, dir));
    }

    fn set_rows(&mut self, rows: &[ProjectedRow]) {
        self.rows = rows.to_vec();
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}
