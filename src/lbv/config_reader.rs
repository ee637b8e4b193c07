use crate::lbv::*;

use serde::{Deserialize, Serialize};

/// A saved state of the view. All the entries are optional.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewPreset {
    pub input: Option<String>,
    pub search: Option<String>,
    pub model: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "sortKey")]
    pub sort_key: Option<String>,
    #[serde(rename = "sortDir")]
    pub sort_dir: Option<String>,
    #[serde(rename = "hiddenColumns")]
    pub hidden_columns: Option<Vec<String>>,
    pub format: Option<String>,
}

pub fn read_preset(path: &str) -> LbvResult<ViewPreset> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    debug!("read_preset: content: {:?}", contents);
    let preset: ViewPreset =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    Ok(preset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn reads_partial_preset() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"date": "last30", "sortKey": "team", "hiddenColumns": ["notes", "model"]}}"#
        )
        .unwrap();
        let preset = read_preset(&f.path().display().to_string()).unwrap();
        assert_eq!(preset.date.as_deref(), Some("last30"));
        assert_eq!(preset.sort_key.as_deref(), Some("team"));
        assert_eq!(preset.sort_dir, None);
        assert_eq!(
            preset.hidden_columns,
            Some(vec!["notes".to_string(), "model".to_string()])
        );
        assert_eq!(preset.input, None);
    }

    #[test]
    fn empty_object_is_default() {
        let preset: ViewPreset = serde_json::from_str("{}").unwrap();
        assert_eq!(preset, ViewPreset::default());
    }

    #[test]
    fn preset_errors() {
        assert!(matches!(
            read_preset("/nonexistent/preset.json"),
            Err(LbvError::OpeningConfig { .. })
        ));
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{\"date\": 30}}").unwrap();
        assert!(matches!(
            read_preset(&f.path().display().to_string()),
            Err(LbvError::ParsingConfig { .. })
        ));
    }
}
