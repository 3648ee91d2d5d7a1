//! CSV input and output for batch training and prediction.
//!
//! Training rows are `category, feature, feature, ...`; test rows are
//! `id, feature, feature, ...`. Both files start with a header row, and empty
//! feature cells are skipped.

use crate::bayes::NaiveBayesClassifier;
use csv::StringRecord;
use std::{io, path::Path};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("csv record {record} is missing its {column} column")]
    MissingColumn { record: usize, column: &'static str },
}

/// One labeled training example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub category: String,
    pub features: Vec<String>,
}

/// One unlabeled row to predict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: String,
    pub features: Vec<String>,
}

/// One prediction; `category` is `None` when the model knows no categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub id: String,
    pub category: Option<String>,
    pub score: f64,
}

fn features(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .skip(1)
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .map(str::to_string)
        .collect()
}

fn first_column(
    record: &StringRecord,
    index: usize,
    column: &'static str,
) -> Result<String, DatasetError> {
    record
        .get(0)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(DatasetError::MissingColumn {
            record: index + 1,
            column,
        })
}

fn csv_reader<R: io::Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().flexible(true).from_reader(rdr)
}

pub fn read_examples<R: io::Read>(rdr: R) -> Result<Vec<Example>, DatasetError> {
    let mut reader = csv_reader(rdr);

    let mut examples = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        examples.push(Example {
            category: first_column(&record, index, "category")?,
            features: features(&record),
        });
    }

    Ok(examples)
}

pub fn read_queries<R: io::Read>(rdr: R) -> Result<Vec<Query>, DatasetError> {
    let mut reader = csv_reader(rdr);

    let mut queries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        queries.push(Query {
            id: first_column(&record, index, "id")?,
            features: features(&record),
        });
    }

    Ok(queries)
}

/// Trains `classifier` with every row of the CSV file at `path`.
///
/// Returns the number of examples trained.
pub fn train_from_path<P: AsRef<Path>>(
    classifier: &mut NaiveBayesClassifier<String, String>,
    path: P,
) -> Result<usize, DatasetError> {
    let file = std::fs::File::open(path.as_ref())?;
    let examples = read_examples(file)?;

    for example in &examples {
        classifier.train(example.category.clone(), &example.features);
    }

    info!(
        path = %path.as_ref().display(),
        examples = examples.len(),
        categories = classifier.store().category_len(),
        "trained from csv"
    );
    Ok(examples.len())
}

pub fn predict(
    classifier: &NaiveBayesClassifier<String, String>,
    queries: &[Query],
) -> Vec<Prediction> {
    queries
        .iter()
        .map(|query| {
            let result = classifier.classify(&query.features);
            debug!(id = %query.id, category = ?result.as_ref().map(|c| &c.category), "predicted");
            Prediction {
                id: query.id.clone(),
                score: result.as_ref().map_or(0.0, |c| c.probability),
                category: result.map(|c| c.category),
            }
        })
        .collect()
}

pub fn write_predictions<W: io::Write>(
    wtr: W,
    predictions: &[Prediction],
) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_writer(wtr);

    writer.write_record(["ID", "Category"])?;
    for prediction in predictions {
        writer.write_record([
            prediction.id.as_str(),
            prediction.category.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

/// Predicts every row of the CSV at `inpath` and writes `ID,Category` rows to
/// `outpath`.
pub fn predict_path<P: AsRef<Path>, Q: AsRef<Path>>(
    classifier: &NaiveBayesClassifier<String, String>,
    inpath: P,
    outpath: Q,
) -> Result<Vec<Prediction>, DatasetError> {
    let queries = read_queries(std::fs::File::open(inpath.as_ref())?)?;
    let predictions = predict(classifier, &queries);
    write_predictions(std::fs::File::create(outpath.as_ref())?, &predictions)?;

    info!(
        input = %inpath.as_ref().display(),
        output = %outpath.as_ref().display(),
        rows = predictions.len(),
        "wrote predictions"
    );
    Ok(predictions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAIN: &str = "\
Category,F1,F2,F3,F4
positive,I,love,sunny,days
negative, I ,hate,rain,
";

    #[test]
    fn reads_examples_skipping_empty_cells() {
        let examples = read_examples(TRAIN.as_bytes()).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].category, "positive");
        assert_eq!(examples[1].features, vec!["I", "hate", "rain"]);
    }

    #[test]
    fn missing_category_is_reported() {
        let err = read_examples("Category,F1\n,rain\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn {
                record: 1,
                column: "category"
            }
        ));
    }

    #[test]
    fn predictions_are_written_with_header() {
        let mut classifier = NaiveBayesClassifier::new();
        for example in read_examples(TRAIN.as_bytes()).unwrap() {
            classifier.train(example.category, &example.features);
        }

        let queries = read_queries("ID,F1,F2\n1,sunny,day\n2,rain,\n".as_bytes()).unwrap();
        let predictions = predict(&classifier, &queries);

        let mut out = Vec::new();
        write_predictions(&mut out, &predictions).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID,Category\n1,positive\n2,negative\n"
        );
    }

    #[test]
    fn untrained_model_writes_empty_category() {
        let classifier = NaiveBayesClassifier::new();
        let queries = read_queries("ID,F1\n7,rain\n".as_bytes()).unwrap();
        let predictions = predict(&classifier, &queries);

        assert_eq!(predictions[0].category, None);

        let mut out = Vec::new();
        write_predictions(&mut out, &predictions).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ID,Category\n7,\n");
    }
}
