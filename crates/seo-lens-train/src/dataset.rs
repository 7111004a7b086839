//! Labelled training data read from CSV.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("dataset has no rows")]
    Empty,
}

/// One labelled page. Extra CSV columns are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Sample {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub meta: String,
    #[serde(default)]
    pub content: String,
    pub seo_score: f64,
}

impl Sample {
    /// Text the vectorizer is fitted on.
    pub fn text(&self) -> String {
        format!("{} {} {}", self.title, self.meta, self.content)
    }
}

pub fn load(path: &Path) -> Result<Vec<Sample>, DatasetError> {
    let reader = csv::Reader::from_path(path).map_err(|source| DatasetError::Open {
        path: path.display().to_string(),
        source,
    })?;
    collect(reader)
}

pub fn from_reader<R: Read>(input: R) -> Result<Vec<Sample>, DatasetError> {
    collect(csv::Reader::from_reader(input))
}

fn collect<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Sample>, DatasetError> {
    let mut samples = Vec::new();
    for (i, record) in reader.deserialize().enumerate() {
        // Row 1 is the header.
        let sample: Sample = record.map_err(|source| DatasetError::Row { row: i + 2, source })?;
        samples.push(sample);
    }
    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_with_quotes_and_extra_columns() {
        let csv = "url,title,meta,content,seo_score\n\
                   https://a.example,Shop,\"Buy, sell\",Lots of text,81.5\n\
                   https://b.example,Blog,,Posts,40\n";
        let samples = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].meta, "Buy, sell");
        assert_eq!(samples[0].seo_score, 81.5);
        assert_eq!(samples[1].text(), "Blog  Posts");
    }

    #[test]
    fn test_bad_score_reports_row() {
        let csv = "title,meta,content,seo_score\nA,B,C,10\nD,E,F,high\n";
        let err = from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Row { row: 3, .. }));
    }

    #[test]
    fn test_empty_dataset() {
        let err = from_reader("title,meta,content,seo_score\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }
}
