use leaderboard::view::TableView;
use leaderboard::{Column, ProjectedRow};

/// A Markdown table in the layout of a `leaderboard.md` page.
#[derive(Debug, Default)]
pub struct MarkdownView {
    columns: Vec<Column>,
    rows: Vec<ProjectedRow>,
    status: String,
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

impl MarkdownView {
    pub fn output(&self) -> String {
        let mut res = String::new();
        if !self.columns.is_empty() {
            let labels: Vec<&str> = self.columns.iter().map(|c| c.label()).collect();
            res.push_str(&format!("| {} |\n", labels.join(" | ")));
            let rules: Vec<String> = labels.iter().map(|l| "-".repeat(l.len() + 2)).collect();
            res.push_str(&format!("|{}|\n", rules.join("|")));
            for r in self.rows.iter() {
                let cells: Vec<String> = self
                    .columns
                    .iter()
                    .map(|c| escape_cell(r.cell(*c).unwrap_or("")))
                    .collect();
                res.push_str(&format!("| {} |\n", cells.join(" | ")));
            }
            res.push('\n');
        }
        res.push_str(&format!("_{}_\n", self.status));
        res
    }
}

impl TableView for MarkdownView {
    fn set_model_options(&mut self, _models: &[String]) {}

    fn set_columns(&mut self, columns: &[(Column, bool)]) {
        self.columns = columns
            .iter()
            .filter(|(_, visible)| *visible)
            .map(|(c, _)| *c)
            .collect();
    }

    fn set_rows(&mut self, rows: &[ProjectedRow]) {
        self.rows = rows.to_vec();
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}
