//! Reading the cars list from delimited text.
//!
//! Each row holds model, color, number, owner and phone. An optional header
//! row is recognized by a number column with fewer than three digits.

use crate::errors::CarsListError;
use crate::types::CarInfo;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::io::Read;

const COLUMNS: usize = 5;
const MODEL_COLUMN: usize = 0;
const COLOR_COLUMN: usize = 1;
const NUMBER_COLUMN: usize = 2;
const OWNER_COLUMN: usize = 3;
const PHONE_COLUMN: usize = 4;

pub struct CarsListReader<R> {
    reader: csv::Reader<R>,
    record: StringRecord,
    first_row: bool,
    skipped: usize,
    yielded: bool,
    finished: bool,
}

impl<R: Read> CarsListReader<R> {
    pub fn new(input: R, delimiter: u8) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(delimiter)
            .from_reader(input);
        CarsListReader {
            reader,
            record: StringRecord::new(),
            first_row: true,
            skipped: 0,
            yielded: false,
            finished: false,
        }
    }

    /// Rows dropped so far because they didn't have five columns.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn line(&self) -> u64 {
        self.record.position().map_or(0, |p| p.line())
    }
}

impl<R: Read> Iterator for CarsListReader<R> {
    type Item = Result<CarInfo, CarsListError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => {}
                Ok(false) => {
                    self.finished = true;
                    // Nothing but malformed rows: this isn't a cars list.
                    if !self.yielded && self.skipped > 0 {
                        return Some(Err(CarsListError::IncorrectStructure(format!(
                            "{} rows without {} columns",
                            self.skipped, COLUMNS
                        ))));
                    }
                    return None;
                }
                Err(e) => return Some(Err(e.into())),
            }

            if self.record.iter().all(str::is_empty) {
                continue;
            }
            if self.record.len() != COLUMNS {
                warn!(
                    "Skipping cars list line {} with {} columns",
                    self.line(),
                    self.record.len()
                );
                self.skipped += 1;
                continue;
            }

            let number = &self.record[NUMBER_COLUMN];
            if self.first_row {
                self.first_row = false;
                if number.chars().filter(char::is_ascii_digit).count() < 3 {
                    debug!("Skipping cars list header at line {}", self.line());
                    continue;
                }
            }

            let car = CarInfo::new(
                &self.record[MODEL_COLUMN],
                &self.record[COLOR_COLUMN],
                number,
                &self.record[OWNER_COLUMN],
                &self.record[PHONE_COLUMN],
            );
            self.yielded = true;
            return Some(car.ok_or_else(|| CarsListError::IncorrectValue {
                row: self.line(),
                number: number.to_string(),
            }));
        }
    }
}
