/*!

This is the long-form manual for `leaderboard` and `lbview`.

## Input format

The leaderboard is a CSV file, by default `leaderboard.csv`. The first line is
the header. It should contain the following columns, in any order:

* `timestamp_utc` the date of the submission, for example `2024-05-01T10:30:00Z`
* `team` the name of the team. Lines without a team are ignored.
* `model` the kind of model submitted (optional)
* `score` the score of the submission, higher is better
* `notes` free text (optional)

Other columns are accepted and ignored.

### Quoting

The dialect is deliberately small. A double quote switches between "inside
quotes" and "outside quotes" and is removed from the value. Commas inside quotes
do not separate fields:

```text
timestamp_utc,team,model,score,notes
2024-05-01,Alice,gcn,0.8123,"lr 0.01, 200 epochs"
```

Quotes cannot be escaped. An unmatched quote makes the rest of the line a single
field. Missing values at the end of a line are read as empty.

### Scores and dates

Scores are read as numbers only for sorting and ranking, and are displayed as
written. A score that is not a number (including an empty score) counts as the
lowest possible score.

Dates accept RFC 3339 (`2024-05-01T10:30:00+02:00`), date-times without offset
(`2024-05-01 10:30:00`, read as UTC) and plain dates (`2024-05-01`). A date that
cannot be read is treated as infinitely old: it is hidden by the `last30` and
`last180` windows, and shown with `all`.

## Ranks

Ranks are computed on the rows currently shown. Rows with the same score share
the rank of the first of them, and the next score resumes at its position:
scores `90, 90, 80` get the ranks `1, 1, 3`.

Ranks are always computed from the scores of neighbouring rows, even when the
table is sorted by another column. In that case they do not increase
monotonically.

## Controls

| Control | `lbview` flag | Interactive command |
|---------|---------------|---------------------|
| Search box | `--search <text>` | `search <text>` |
| Model dropdown | `--model <name>` / `--model all` | `model <name>` |
| Date dropdown | `--date all\|last30\|last180` | `date <window>` |
| Sortable headers | `--sort <column> --dir asc\|desc` | `sort <column>` |
| Column checkboxes | `--hide <column>` | `hide <column>` / `show <column>` |

The search is case-insensitive and looks at the team, the model and the notes.
Clicking (`sort`) on the current sort column flips the direction; selecting a
new column sorts it descending for `score` and ascending otherwise.

Column keys: `rank`, `team`, `model`, `score`, `timestamp_utc`, `notes`.

## Output formats

* `text` an aligned table followed by the status line
* `markdown` a Markdown table, suitable for a `leaderboard.md` page
* `json` a JSON document with the visible columns, the rows and the status

A JSON preset can be given with `--config`:

```json
{
  "input": "leaderboard.csv",
  "date": "last30",
  "sortKey": "score",
  "sortDir": "desc",
  "hiddenColumns": ["notes"],
  "format": "markdown"
}
```

*/
