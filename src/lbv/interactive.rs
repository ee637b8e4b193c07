// Line-oriented controls: each line read is one event.

use std::io::{BufRead, Write};

use leaderboard::view::{ControlEvent, Session};

use crate::lbv::*;

pub const HELP: &str = "\
Commands:
  search <text>      filter on team, model and notes (empty to clear)
  model <name|all>   filter on a model
  date <window>      all, last30 or last180
  sort <column>      sort by a column (again to flip the direction)
  hide <column>      hide a column
  show <column>      show a column
  models             list the models
  help               show this message
  quit               exit
Columns: rank, team, model, score, timestamp_utc, notes
";

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Command {
    Event(ControlEvent),
    Models,
    Help,
    Quit,
}

fn column_arg(arg: &str) -> LbvResult<Column> {
    Column::from_key(arg.trim()).context(InvalidOptionSnafu {})
}

/// Reads one line of input.
pub fn parse_command(line: &str) -> LbvResult<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (cmd, arg) = match line.trim_start().split_once(' ') {
        Some((c, a)) => (c, a),
        None => (line.trim(), ""),
    };
    let event = match (cmd, arg.trim()) {
        ("search", _) => ControlEvent::Search(arg.to_string()),
        ("model", m) if !m.is_empty() => ControlEvent::ModelSelected(ModelFilter::from_key(m)),
        ("date", d) if !d.is_empty() => {
            ControlEvent::DateSelected(DateWindow::from_key(d).context(InvalidOptionSnafu {})?)
        }
        ("sort", c) if !c.is_empty() => ControlEvent::HeaderClicked(column_arg(c)?),
        ("hide", c) if !c.is_empty() => ControlEvent::ColumnToggled {
            column: column_arg(c)?,
            visible: false,
        },
        ("show", c) if !c.is_empty() => ControlEvent::ColumnToggled {
            column: column_arg(c)?,
            visible: true,
        },
        ("models", "") => return Ok(Command::Models),
        ("help", "") => return Ok(Command::Help),
        ("quit", "") | ("exit", "") => return Ok(Command::Quit),
        _ => return UnknownCommandSnafu { line }.fail(),
    };
    Ok(Command::Event(event))
}

/// Handles commands until the input ends or `quit` is read. The table is
/// printed again after every event.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    view: &mut OutputView,
    input: R,
    mut out: W,
) -> LbvResult<()> {
    for line_r in input.lines() {
        let line = line_r.context(ReadingStdinSnafu {})?;
        if line.trim().is_empty() {
            continue;
        }
        let content = match parse_command(&line) {
            Ok(Command::Event(event)) => {
                session.handle(&event, view);
                view.output()?
            }
            Ok(Command::Models) => {
                let mut models = vec!["all".to_string()];
                models.extend(session.model_options().iter().cloned());
                format!("{}\n", models.join("\n"))
            }
            Ok(Command::Help) => HELP.to_string(),
            Ok(Command::Quit) => break,
            Err(e) => {
                warn!("run_interactive: {}", e);
                format!("{}\n{}", e, HELP)
            }
        };
        out.write_all(content.as_bytes())
            .context(WritingOutputSnafu { path: "stdout" })?;
        out.flush().context(WritingOutputSnafu { path: "stdout" })?;
    }
    Ok(())
}
