//! A minimal CSV reader.
//!
//! This is not an RFC 4180 parser. The dialect is the one produced by the
//! leaderboard scripts:
//! - the first line is the header, split on every comma
//! - a double quote toggles a "quoted" state and is never copied into the value
//! - a comma only separates fields outside of the quoted state
//!
//! Quotes cannot be escaped. A single stray quote changes the splitting of the
//! rest of its line: everything after it ends up in the same field. Lines that do
//! not have enough values get empty strings for the missing columns, and extra
//! values are ignored. The parser never fails.

use log::debug;

use crate::config::RawRecord;

/// Parses the full content of a file into records keyed by header names.
///
/// A byte order mark at the start of the text is ignored.
pub fn parse_csv(text: &str) -> Vec<RawRecord> {
    let mut lines = text.trim_start_matches('\u{feff}').trim().lines();
    let header: Vec<&str> = match lines.next() {
        Some(h) => h.split(',').collect(),
        None => return Vec::new(),
    };
    debug!("parse_csv: header: {:?}", header);

    let mut res: Vec<RawRecord> = Vec::new();
    for (idx, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cols = split_line(line);
        debug!(
            "parse_csv: lineno: {:?} num_cols: {:?} expected: {:?}",
            idx + 2,
            cols.len(),
            header.len()
        );
        let record: RawRecord = header
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let value = cols.get(i).map(|s| s.trim()).unwrap_or("");
                (h.to_string(), value.to_string())
            })
            .collect();
        res.push(record);
    }
    res
}

fn split_line(line: &str) -> Vec<String> {
    let mut cols: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cols.push(std::mem::take(&mut cur)),
            _ => cur.push(ch),
        }
    }
    cols.push(cur);
    cols
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(r: &'a RawRecord, k: &str) -> &'a str {
        r.get(k).map(|s| s.as_str()).unwrap_or("<missing>")
    }

    #[test]
    fn simple_rows_match_plain_split() {
        let text = "timestamp_utc,team,model,score,notes\n\
                    2024-01-01,Alice,gcn,0.91,first\n\
                    2024-01-02,Bob,gat,0.88,second\n";
        let res = parse_csv(text);
        assert_eq!(res.len(), 2);
        let header: Vec<&str> = text.lines().next().unwrap().split(',').collect();
        for (line, record) in text.lines().skip(1).zip(res.iter()) {
            for (h, v) in header.iter().zip(line.split(',')) {
                assert_eq!(get(record, h), v);
            }
        }
    }

    #[test]
    fn crlf_and_blank_lines() {
        let res = parse_csv("team,score\r\nAlice,10\r\n\r\n   \r\nBob,5\r\n");
        assert_eq!(res.len(), 2);
        assert_eq!(get(&res[0], "score"), "10");
        assert_eq!(get(&res[1], "team"), "Bob");
    }

    #[test]
    fn quoted_commas_are_kept() {
        let res = parse_csv("team,notes\nAlice,\"tuned lr, dropout\"\n");
        assert_eq!(get(&res[0], "notes"), "tuned lr, dropout");
    }

    #[test]
    fn quotes_are_dropped_from_values() {
        let res = parse_csv("team,notes\nAl\"ic\"e,x\n");
        assert_eq!(get(&res[0], "team"), "Alice");
    }

    #[test]
    fn stray_quote_swallows_the_rest_of_the_line() {
        let res = parse_csv("team,model,score\n\"Alice,gcn,10\n");
        assert_eq!(get(&res[0], "team"), "Alice,gcn,10");
        assert_eq!(get(&res[0], "model"), "");
        assert_eq!(get(&res[0], "score"), "");
    }

    #[test]
    fn short_rows_default_to_empty() {
        let res = parse_csv("team,score\nAlice,10\nBob,\nCarol\n");
        assert_eq!(res.len(), 3);
        assert_eq!(get(&res[1], "score"), "");
        assert_eq!(get(&res[2], "score"), "");
    }

    #[test]
    fn values_are_trimmed() {
        let res = parse_csv("team,score\n  Alice , 10  \n");
        assert_eq!(get(&res[0], "team"), "Alice");
        assert_eq!(get(&res[0], "score"), "10");
    }

    #[test]
    fn extra_values_are_ignored() {
        let res = parse_csv("team\nAlice,10,x\n");
        assert_eq!(res[0].len(), 1);
        assert_eq!(get(&res[0], "team"), "Alice");
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let res = parse_csv("\u{feff}team,score\nAlice,10\nBob,5\n");
        assert_eq!(res.len(), 2);
        assert_eq!(get(&res[0], "team"), "Alice");
        assert!(res[0].keys().all(|k| !k.starts_with('\u{feff}')));

        let res = parse_csv("\u{feff}timestamp_utc,team\n2024-05-01,Alice\n");
        assert_eq!(get(&res[0], "timestamp_utc"), "2024-05-01");
    }

    #[test]
    fn empty_inputs() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("   \n\n").is_empty());
        assert!(parse_csv("team,score\n").is_empty());
    }
}
