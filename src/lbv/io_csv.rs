// Reading the leaderboard source.

use std::io::Read;

use leaderboard::builder::Builder;

use crate::lbv::*;

pub const DEFAULT_INPUT: &str = "leaderboard.csv";

/// Reads the whole source. `-` is the standard input.
///
/// The file is read again on every call, nothing is cached. Bytes that are not
/// valid UTF-8 are replaced with U+FFFD instead of failing the load.
pub fn read_source(path: &str) -> LbvResult<String> {
    let bytes = if path == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context(ReadingStdinSnafu {})?;
        bytes
    } else {
        fs::read(path).context(OpeningInputSnafu { path })?
    };
    Ok(decode_lossy(path, bytes))
}

fn decode_lossy(path: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            warn!(
                "read_source: {:?} is not valid UTF-8 (first error at byte {:?}), invalid bytes were replaced",
                path,
                e.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

pub fn load_rows(path: &str) -> LbvResult<Vec<LeaderboardRow>> {
    info!("Attempting to read leaderboard {:?}", path);
    let contents = read_source(path)?;
    debug!("load_rows: {:?} bytes", contents.len());
    let mut builder = Builder::new();
    builder.add_csv(&contents);
    if builder.num_dropped() > 0 {
        warn!(
            "load_rows: {:?} lines without team were ignored",
            builder.num_dropped()
        );
    }
    Ok(builder.build())
}
