use log::{debug, info, warn};

use leaderboard::view::{Session, TableView, ViewState, STATUS_LOAD_FAILED};
use leaderboard::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;

use text_diff::print_diff;

use crate::args::Args;
use crate::lbv::config_reader::*;
use crate::lbv::render_json::JsonView;
use crate::lbv::render_markdown::MarkdownView;
use crate::lbv::render_text::TextView;

pub mod config_reader;
pub mod interactive;
pub mod io_csv;
pub mod render_json;
pub mod render_markdown;
pub mod render_text;

#[derive(Debug, Snafu)]
pub enum LbvError {
    #[snafu(display("Error opening file {path}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the standard input"))]
    ReadingStdin { source: std::io::Error },
    #[snafu(display("Error opening the preset file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the preset file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    InvalidOption { source: LeaderboardErrors },
    #[snafu(display("Unknown output format {format:?} (expected text, markdown or json)"))]
    UnknownFormat { format: String },
    #[snafu(display("The leaderboard cannot be read from the standard input in interactive mode"))]
    StdinInteractive {},
    #[snafu(display("Unknown command {line:?}"))]
    UnknownCommand { line: String },
    #[snafu(display("Error writing the output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening the reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the output and the reference {path}"))]
    ReferenceMismatch { path: String },
    #[snafu(display("Error serializing the output"))]
    Serializing { source: serde_json::Error },
}

pub type LbvResult<T> = Result<T, LbvError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn from_key(key: &str) -> LbvResult<OutputFormat> {
        match key {
            "text" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            x => UnknownFormatSnafu { format: x }.fail(),
        }
    }
}

/// The display surface selected on the command line.
pub enum OutputView {
    Text(TextView),
    Markdown(MarkdownView),
    Json(JsonView),
}

impl OutputView {
    pub fn new(format: OutputFormat, controls: bool) -> OutputView {
        match format {
            OutputFormat::Text => OutputView::Text(TextView::new(controls)),
            OutputFormat::Markdown => OutputView::Markdown(MarkdownView::default()),
            OutputFormat::Json => OutputView::Json(JsonView::default()),
        }
    }

    pub fn output(&self) -> LbvResult<String> {
        match self {
            OutputView::Text(v) => Ok(v.output()),
            OutputView::Markdown(v) => Ok(v.output()),
            OutputView::Json(v) => v.output(),
        }
    }

    fn inner(&mut self) -> &mut dyn TableView {
        match self {
            OutputView::Text(v) => v,
            OutputView::Markdown(v) => v,
            OutputView::Json(v) => v,
        }
    }
}

impl TableView for OutputView {
    fn set_model_options(&mut self, models: &[String]) {
        self.inner().set_model_options(models)
    }

    fn set_columns(&mut self, columns: &[(Column, bool)]) {
        self.inner().set_columns(columns)
    }

    fn set_sort_indicator(&mut self, key: Column, dir: SortDir) {
        self.inner().set_sort_indicator(key, dir)
    }

    fn set_rows(&mut self, rows: &[ProjectedRow]) {
        self.inner().set_rows(rows)
    }

    fn set_status(&mut self, status: &str) {
        self.inner().set_status(status)
    }
}

/// The settings of a run, after merging the preset and the command line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub input: String,
    pub state: ViewState,
    pub format: OutputFormat,
    pub out: Option<String>,
    pub reference: Option<String>,
}

/// Merges the command line into the preset. Flags given on the command line win.
pub fn resolve_settings(args: &Args, preset: &ViewPreset) -> LbvResult<Settings> {
    let pick = |a: &Option<String>, p: &Option<String>| a.clone().or_else(|| p.clone());

    let mut query = Query::default();
    if let Some(text) = pick(&args.search, &preset.search) {
        query.text = text;
    }
    if let Some(m) = pick(&args.model, &preset.model) {
        query.model = ModelFilter::from_key(&m);
    }
    if let Some(d) = pick(&args.date, &preset.date) {
        query.date = DateWindow::from_key(&d).context(InvalidOptionSnafu)?;
    }
    if let Some(k) = pick(&args.sort, &preset.sort_key) {
        query.sort_key = Column::from_key(&k).context(InvalidOptionSnafu)?;
    }
    query.sort_dir = match pick(&args.dir, &preset.sort_dir) {
        Some(d) => SortDir::from_key(&d).context(InvalidOptionSnafu)?,
        None => query.sort_key.default_dir(),
    };

    let hidden_keys: Vec<String> = if !args.hide.is_empty() {
        args.hide.clone()
    } else {
        preset.hidden_columns.clone().unwrap_or_default()
    };
    let mut state = ViewState {
        query,
        ..ViewState::default()
    };
    for k in hidden_keys.iter() {
        state
            .hidden_cols
            .insert(Column::from_key(k).context(InvalidOptionSnafu)?);
    }

    let format = match pick(&args.format, &preset.format) {
        Some(f) => OutputFormat::from_key(&f)?,
        None => OutputFormat::Text,
    };

    let input =
        pick(&args.input, &preset.input).unwrap_or_else(|| io_csv::DEFAULT_INPUT.to_string());
    // The commands are read from the standard input.
    ensure!(!(args.interactive && input == "-"), StdinInteractiveSnafu);

    Ok(Settings {
        input,
        state,
        format,
        out: args.out.clone(),
        reference: args.reference.clone(),
    })
}

fn write_output(out: &Option<String>, content: &str) -> LbvResult<()> {
    match out.as_deref() {
        None | Some("") | Some("stdout") => {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(content.as_bytes())
                .context(WritingOutputSnafu { path: "stdout" })
        }
        Some(path) => fs::write(path, content).context(WritingOutputSnafu { path }),
    }
}

/// Compares the output with the content of a reference file.
pub fn check_reference(reference_path: &str, output: &str) -> LbvResult<()> {
    let expected = fs::read_to_string(reference_path).context(OpeningReferenceSnafu {
        path: reference_path,
    })?;
    if expected != output {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(expected.as_str(), output, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("Output matches the reference {}", reference_path);
    Ok(())
}

pub fn run(args: &Args) -> LbvResult<()> {
    let preset = match &args.config {
        Some(p) => read_preset(p)?,
        None => ViewPreset::default(),
    };
    let settings = resolve_settings(args, &preset)?;
    info!("settings: {:?}", settings);

    let mut view = OutputView::new(settings.format, args.interactive);

    let rows = match io_csv::load_rows(&settings.input) {
        Ok(rows) => rows,
        Err(e) => {
            view.set_status(STATUS_LOAD_FAILED);
            write_output(&settings.out, &view.output()?)?;
            return Err(e);
        }
    };

    let mut session = Session::new(rows);
    if args.list_models {
        let mut content = String::from("all\n");
        for m in session.model_options() {
            content.push_str(m);
            content.push('\n');
        }
        return write_output(&settings.out, &content);
    }

    session.set_state(settings.state.clone());
    session.mount(&mut view);
    let output = view.output()?;
    debug!("output: {:?}", output);
    write_output(&settings.out, &output)?;

    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &output)?;
    }

    if args.interactive {
        let stdin = std::io::stdin();
        interactive::run_interactive(&mut session, &mut view, stdin.lock(), std::io::stdout())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn args() -> Args {
        Args::default()
    }

    #[test]
    fn default_settings() {
        let s = resolve_settings(&args(), &ViewPreset::default()).unwrap();
        assert_eq!(s.input, "leaderboard.csv");
        assert_eq!(s.state, ViewState::default());
        assert_eq!(s.format, OutputFormat::Text);
    }

    #[test]
    fn flags_override_preset() {
        let preset = ViewPreset {
            input: Some("other.csv".to_string()),
            search: Some("alice".to_string()),
            date: Some("last180".to_string()),
            sort_key: Some("team".to_string()),
            hidden_columns: Some(vec!["notes".to_string()]),
            format: Some("json".to_string()),
            ..ViewPreset::default()
        };
        let a = Args {
            search: Some("bob".to_string()),
            hide: vec!["model".to_string(), "rank".to_string()],
            ..args()
        };
        let s = resolve_settings(&a, &preset).unwrap();
        assert_eq!(s.input, "other.csv");
        assert_eq!(s.state.query.text, "bob");
        assert_eq!(s.state.query.date, DateWindow::Last180);
        assert_eq!(s.state.query.sort_key, Column::Team);
        assert_eq!(s.state.query.sort_dir, SortDir::Asc);
        assert!(!s.state.is_visible(Column::Model));
        assert!(!s.state.is_visible(Column::Rank));
        assert!(s.state.is_visible(Column::Notes));
        assert_eq!(s.format, OutputFormat::Json);
    }

    #[test]
    fn model_all_is_the_sentinel() {
        let a = Args {
            model: Some("all".to_string()),
            ..args()
        };
        let s = resolve_settings(&a, &ViewPreset::default()).unwrap();
        assert_eq!(s.state.query.model, ModelFilter::All);
        let a = Args {
            model: Some("gcn".to_string()),
            ..args()
        };
        let s = resolve_settings(&a, &ViewPreset::default()).unwrap();
        assert_eq!(s.state.query.model, ModelFilter::Only("gcn".to_string()));
    }

    #[test]
    fn invalid_options() {
        let bad = [
            Args {
                date: Some("last7".to_string()),
                ..args()
            },
            Args {
                sort: Some("elo".to_string()),
                ..args()
            },
            Args {
                dir: Some("up".to_string()),
                ..args()
            },
            Args {
                hide: vec!["avatar".to_string()],
                ..args()
            },
        ];
        for a in bad.iter() {
            let res = resolve_settings(a, &ViewPreset::default());
            assert!(matches!(res, Err(LbvError::InvalidOption { .. })), "{:?}", a);
        }
        let a = Args {
            format: Some("html".to_string()),
            ..args()
        };
        assert!(matches!(
            resolve_settings(&a, &ViewPreset::default()),
            Err(LbvError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn stdin_input_is_rejected_in_interactive_mode() {
        let a = Args {
            input: Some("-".to_string()),
            interactive: true,
            ..args()
        };
        assert!(matches!(
            resolve_settings(&a, &ViewPreset::default()),
            Err(LbvError::StdinInteractive { .. })
        ));
        let preset = ViewPreset {
            input: Some("-".to_string()),
            ..ViewPreset::default()
        };
        let a = Args {
            interactive: true,
            ..args()
        };
        assert!(resolve_settings(&a, &preset).is_err());
        assert!(resolve_settings(&args(), &preset).is_ok());
    }

    #[test]
    fn reference_check() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "1 result(s)").unwrap();
        let path = f.path().display().to_string();
        assert!(check_reference(&path, "1 result(s)\n").is_ok());
        assert!(matches!(
            check_reference(&path, "2 result(s)\n"),
            Err(LbvError::ReferenceMismatch { .. })
        ));
        assert!(matches!(
            check_reference("/nonexistent/reference.txt", ""),
            Err(LbvError::OpeningReference { .. })
        ));
    }

    #[test]
    fn run_writes_the_output_file() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(
            input,
            "timestamp_utc,team,model,score,notes\n2024-01-01,Alice,gcn,90,x\n2024-01-02,Bob,gat,95,y\n"
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        let a = Args {
            input: Some(input.path().display().to_string()),
            format: Some("markdown".to_string()),
            hide: vec!["timestamp_utc".to_string()],
            out: Some(out.display().to_string()),
            ..args()
        };
        run(&a).unwrap();
        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(
            content,
            "| Rank | Team | Model | Score | Notes |\n\
             |------|------|-------|-------|-------|\n\
             | 1 | Bob | gat | 95 | y |\n\
             | 2 | Alice | gcn | 90 | x |\n\
             \n\
             _2 result(s)_\n"
        );
    }

    #[test]
    fn run_reports_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        let a = Args {
            input: Some(dir.path().join("missing.csv").display().to_string()),
            out: Some(out.display().to_string()),
            ..args()
        };
        let res = run(&a);
        assert!(matches!(res, Err(LbvError::OpeningInput { .. })));
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "Failed to load leaderboard.\n"
        );
    }

    #[test]
    fn run_lists_models() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "team,model\nA,gcn\nB,\nC,gat\nD,gcn\n").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("models.txt");
        let a = Args {
            input: Some(input.path().display().to_string()),
            out: Some(out.display().to_string()),
            list_models: true,
            ..args()
        };
        run(&a).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "all\ngat\ngcn\n");
    }
}
