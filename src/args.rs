use clap::Parser;

/// This is a viewer for CSV leaderboards: it filters, sorts and ranks the entries.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path or '-', default leaderboard.csv) The CSV file with the leaderboard. Use '-' to read
    /// from the standard input.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, optional) A JSON file with a preset of the view (filters, sort, hidden columns, format).
    /// The other flags override the values of the preset.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (text) Only show the entries whose team, model or notes contain this text (case-insensitive).
    #[clap(short, long, value_parser)]
    pub search: Option<String>,

    /// (model name or 'all') Only show the entries of this model.
    #[clap(short, long, value_parser)]
    pub model: Option<String>,

    /// (all, last30 or last180) Only show the entries submitted in this window.
    #[clap(short, long, value_parser)]
    pub date: Option<String>,

    /// (column key, default score) The column to sort by: rank, team, model, score, timestamp_utc or notes.
    #[clap(long, value_parser)]
    pub sort: Option<String>,

    /// (asc or desc) The sort direction. Defaults to desc for the score and asc for the other columns.
    #[clap(long, value_parser)]
    pub dir: Option<String>,

    /// (column key, repeatable) A column to hide.
    #[clap(long, value_parser)]
    pub hide: Vec<String>,

    /// (text, markdown or json; default text) The output format.
    #[clap(long, value_parser)]
    pub format: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the output. Defaults to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A file with the expected output. If provided, lbview checks that the output matches
    /// it and prints the differences otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// Prints the options of the model filter and exits.
    #[clap(long, takes_value = false)]
    pub list_models: bool,

    /// Reads commands from the standard input after the first render (type 'help' for the list).
    /// Cannot be combined with `--input -`.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
