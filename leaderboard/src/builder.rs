use log::{debug, info};

pub use crate::config::*;
use crate::parser::parse_csv;

/// Turns parsed records into leaderboard rows.
///
/// Records without a team are dropped. The order of the input is kept.
pub fn normalize_records(records: &[RawRecord]) -> Vec<LeaderboardRow> {
    let mut builder = Builder::new();
    for r in records {
        builder.add_record(r);
    }
    builder.build()
}

/// A builder for assembling the row set of a leaderboard.
///
/// ```
/// use leaderboard::builder::Builder;
///
/// let mut builder = Builder::new();
/// builder.add_csv("team,score\nAlice,10\n,3\nBob,\n");
/// builder.add_row("Carol", "", "7.5", "2024-05-01", "");
///
/// let rows = builder.build();
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[1].team, "Bob");
/// assert_eq!(rows[1].score, "");
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    _rows: Vec<LeaderboardRow>,
    _dropped: usize,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Adds all the records of a CSV document.
    pub fn add_csv(&mut self, text: &str) {
        for r in parse_csv(text).iter() {
            self.add_record(r);
        }
    }

    /// Adds one parsed record. Returns false if the record had no team and was dropped.
    pub fn add_record(&mut self, record: &RawRecord) -> bool {
        let get = |k: &str| record.get(k).cloned().unwrap_or_default();
        let team = get("team");
        if team.trim().is_empty() {
            debug!("add_record: dropping record without team: {:?}", record);
            self._dropped += 1;
            return false;
        }
        self._rows.push(LeaderboardRow {
            timestamp_utc: get("timestamp_utc"),
            team,
            model: get("model"),
            score: get("score"),
            notes: get("notes"),
        });
        true
    }

    /// Adds a row given field by field, with the same rule on the team.
    pub fn add_row(
        &mut self,
        team: &str,
        model: &str,
        score: &str,
        timestamp_utc: &str,
        notes: &str,
    ) -> bool {
        let record: RawRecord = [
            ("team", team),
            ("model", model),
            ("score", score),
            ("timestamp_utc", timestamp_utc),
            ("notes", notes),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        self.add_record(&record)
    }

    pub fn num_dropped(&self) -> usize {
        self._dropped
    }

    pub fn build(self) -> Vec<LeaderboardRow> {
        info!(
            "Loaded {:?} leaderboard rows ({:?} without team dropped)",
            self._rows.len(),
            self._dropped
        );
        self._rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_rows_without_team() {
        let records = parse_csv("team,score\nAlice,10\n,4\n   ,5\nBob,3\n");
        let rows = normalize_records(&records);
        let teams: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, vec!["Alice", "Bob"]);
    }

    #[test]
    fn drops_records_without_team_column() {
        let rows = normalize_records(&parse_csv("name,score\nAlice,10\n"));
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_optional_fields_are_empty() {
        let rows = normalize_records(&parse_csv("team,score\nAlice,10\nBob,\n"));
        assert_eq!(rows[0].model, "");
        assert_eq!(rows[0].notes, "");
        assert_eq!(rows[0].timestamp_utc, "");
        assert_eq!(rows[1].score, "");
    }

    #[test]
    fn fields_are_copied_verbatim() {
        let rows = normalize_records(&parse_csv(
            "timestamp_utc,team,model,score,notes\n2024-01-01T10:00:00Z,Alice,gcn,0.9100,n/a\n",
        ));
        assert_eq!(
            rows[0],
            LeaderboardRow {
                timestamp_utc: "2024-01-01T10:00:00Z".to_string(),
                team: "Alice".to_string(),
                model: "gcn".to_string(),
                score: "0.9100".to_string(),
                notes: "n/a".to_string(),
            }
        );
    }

    #[test]
    fn counts_dropped_rows() {
        let mut builder = Builder::new();
        builder.add_csv("team,score\nAlice,1\n,2\n,3\n");
        assert!(!builder.add_row("", "m", "1", "", ""));
        assert_eq!(builder.num_dropped(), 3);
        assert_eq!(builder.build().len(), 1);
    }
}
