use anyhow::{Context, Result};
use csv::StringRecord;
use std::{fmt, path::Path};

/// Stance of a response towards the quote it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stance {
    Agree,
    Disagree,
}

impl Stance {
    /// Both stances, in tie-break order.
    pub const ALL: [Stance; 2] = [Stance::Agree, Stance::Disagree];

    pub fn label(self) -> &'static str {
        match self {
            Stance::Agree => "AGREE",
            Stance::Disagree => "DISAGREE",
        }
    }

    /// Maps an agreement rating onto a stance.
    ///
    /// Ratings in [1, 5] agree, ratings in [-5, -1) disagree and everything
    /// else (the neutral band or out of range) has no stance.
    pub fn from_rating(rating: f64) -> Option<Stance> {
        if (1.0..=5.0).contains(&rating) {
            Some(Stance::Agree)
        } else if (-5.0..-1.0).contains(&rating) {
            Some(Stance::Disagree)
        } else {
            None
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One quote/response pair with its agreement rating.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub rating: f64,
    pub quote: String,
    pub response: String,
}

impl Record {
    /// Parses a row laid out as `id, rating, quote, response`.
    pub fn from_csv(record: &StringRecord) -> Result<Self> {
        let line = record.position().map_or(0, |position| position.line());

        let rating = record
            .get(1)
            .with_context(|| format!("csv record on line {} missing rating entry.", line))?;
        let rating = rating
            .trim()
            .parse::<f64>()
            .with_context(|| format!("invalid rating {:?} on line {}.", rating, line))?;
        let quote = record
            .get(2)
            .with_context(|| format!("csv record on line {} missing quote entry.", line))?;
        let response = record
            .get(3)
            .with_context(|| format!("csv record on line {} missing response entry.", line))?;

        Ok(Record {
            rating,
            quote: quote.to_string(),
            response: response.to_string(),
        })
    }

    /// Ratings in [-1, 1) carry too little signal to train or test on.
    pub fn is_neutral(&self) -> bool {
        self.rating >= -1.0 && self.rating < 1.0
    }

    pub fn stance(&self) -> Option<Stance> {
        Stance::from_rating(self.rating)
    }
}

/// Reads every record of a CSV file, skipping its header row.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(Record::from_csv(&record)?);
    }

    Ok(records)
}

/// Writes one `ID,Predicted,Actual` row per classified record.
pub fn write_predictions<P: AsRef<Path>>(
    path: P,
    predictions: &[(Option<Stance>, Option<Stance>)],
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record(["ID", "Predicted", "Actual"])?;
    for (i, (predicted, actual)) in predictions.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            predicted.map_or("", Stance::label).to_string(),
            actual.map_or("", Stance::label).to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_map_onto_stances() {
        assert_eq!(Stance::from_rating(1.0), Some(Stance::Agree));
        assert_eq!(Stance::from_rating(5.0), Some(Stance::Agree));
        assert_eq!(Stance::from_rating(-1.5), Some(Stance::Disagree));
        assert_eq!(Stance::from_rating(-5.0), Some(Stance::Disagree));
        assert_eq!(Stance::from_rating(-1.0), None);
        assert_eq!(Stance::from_rating(0.5), None);
        assert_eq!(Stance::from_rating(5.5), None);
        assert_eq!(Stance::from_rating(-6.0), None);
    }

    #[test]
    fn neutral_band_is_half_open() {
        let record = |rating| Record {
            rating,
            quote: String::new(),
            response: String::new(),
        };

        assert!(record(-1.0).is_neutral());
        assert!(record(0.99).is_neutral());
        assert!(!record(1.0).is_neutral());
        assert!(!record(-1.01).is_neutral());
    }

    #[test]
    fn parses_a_row() {
        let row = StringRecord::from(vec!["7", " 2.5 ", "the quote", "the response"]);
        let record = Record::from_csv(&row).unwrap();

        assert_eq!(record.rating, 2.5);
        assert_eq!(record.quote, "the quote");
        assert_eq!(record.response, "the response");
        assert_eq!(record.stance(), Some(Stance::Agree));
    }

    #[test]
    fn rejects_bad_rows() {
        let short = StringRecord::from(vec!["1", "2.0", "quote"]);
        assert!(Record::from_csv(&short).is_err());

        let garbled = StringRecord::from(vec!["1", "lots", "quote", "response"]);
        assert!(Record::from_csv(&garbled).is_err());
    }
}
