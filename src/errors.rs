//! Errors raised while loading the cars list.

use failure::Fail;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Fail)]
pub enum CarsListError {
    #[fail(display = "unable to open cars list {:?}", path)]
    Open {
        path: PathBuf,
        #[cause]
        cause: io::Error,
    },

    #[fail(display = "error reading cars list: {}", _0)]
    Read(#[cause] csv::Error),

    #[fail(display = "unsupported cars list structure: {}", _0)]
    IncorrectStructure(String),

    #[fail(display = "cars list is empty")]
    EmptyData,

    /// `row` is the line number for delimited text and the table row for HTML.
    #[fail(display = "incorrect car number {:?} at row {}", number, row)]
    IncorrectValue { row: u64, number: String },

    /// Only numbers with a numeric root can be recognized.
    #[fail(display = "unsupported custom car number {:?}", _0)]
    UnsupportedNumber(String),
}

impl From<csv::Error> for CarsListError {
    fn from(e: csv::Error) -> Self {
        CarsListError::Read(e)
    }
}
