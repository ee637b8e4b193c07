use leaderboard::view::TableView;
use leaderboard::{Column, ProjectedRow, SortDir};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

use crate::lbv::*;

/// A JSON document with the visible part of the table.
#[derive(Debug, Default)]
pub struct JsonView {
    models: Vec<String>,
    columns: Vec<Column>,
    sort: Option<(Column, SortDir)>,
    rows: Vec<ProjectedRow>,
    status: String,
}

fn row_to_json(row: &ProjectedRow) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (c, v) in row.cells.iter() {
        let value = match (c, v.parse::<u64>()) {
            (Column::Rank, Ok(rank)) => json!(rank),
            _ => json!(v),
        };
        m.insert(c.key().to_string(), value);
    }
    JSValue::Object(m)
}

impl JsonView {
    pub fn to_json(&self) -> JSValue {
        let columns: Vec<&str> = self.columns.iter().map(|c| c.key()).collect();
        let rows: Vec<JSValue> = self.rows.iter().map(row_to_json).collect();
        let sort = match self.sort {
            Some((key, dir)) => json!({"key": key.key(), "dir": dir.key()}),
            None => JSValue::Null,
        };
        json!({
            "models": self.models,
            "columns": columns,
            "sort": sort,
            "rows": rows,
            "status": self.status,
        })
    }

    pub fn output(&self) -> LbvResult<String> {
        let mut res = serde_json::to_string_pretty(&self.to_json()).context(SerializingSnafu {})?;
        res.push('\n');
        Ok(res)
    }
}

impl TableView for JsonView {
    fn set_model_options(&mut self, models: &[String]) {
        self.models = models.to_vec();
    }

    fn set_columns(&mut self, columns: &[(Column, bool)]) {
        self.columns = columns
            .iter()
            .filter(|(_, visible)| *visible)
            .map(|(c, _)| *c)
            .collect();
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
