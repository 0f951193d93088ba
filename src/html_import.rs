//! Reading the cars list from an HTML table export.
//!
//! Rows hold owner, phone, model, color and number cells. Header rows (first
//! cell is a `th`) and rows with fewer than five cells are skipped.

use crate::errors::CarsListError;
use crate::types::CarInfo;
use log::debug;
use scraper::{ElementRef, Html};

const COLUMNS: usize = 5;
const OWNER_COLUMN: usize = 0;
const PHONE_COLUMN: usize = 1;
const MODEL_COLUMN: usize = 2;
const COLOR_COLUMN: usize = 3;
const NUMBER_COLUMN: usize = 4;

/// Rows of the first table in a document, each already turned into a record
/// or the error explaining why it couldn't be.
pub struct CarsTable {
    rows: Vec<Result<CarInfo, CarsListError>>,
}

impl CarsTable {
    pub fn parse(html: &str) -> Result<CarsTable, CarsListError> {
        let document = Html::parse_document(html);
        let table = descendant_elements(document.root_element())
            .find(|e| e.value().name() == "table")
            .ok_or_else(|| CarsListError::IncorrectStructure("no table found".to_string()))?;

        let rows: Vec<_> = descendant_elements(table)
            .filter(|e| e.value().name() == "tr")
            .enumerate()
            .filter_map(|(i, tr)| {
                let cells: Vec<ElementRef> = tr
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|c| matches!(c.value().name(), "td" | "th"))
                    .collect();
                if cells.len() < COLUMNS || cells[0].value().name() == "th" {
                    debug!("Skipping table row {}", i + 1);
                    return None;
                }
                let cells: Vec<String> = cells.into_iter().map(cell_text).collect();
                Some(car_info(i as u64 + 1, &cells))
            })
            .collect();

        if rows.is_empty() {
            return Err(CarsListError::EmptyData);
        }
        Ok(CarsTable { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for CarsTable {
    type Item = Result<CarInfo, CarsListError>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

fn car_info(row: u64, cells: &[String]) -> Result<CarInfo, CarsListError> {
    CarInfo::new(
        &cells[MODEL_COLUMN],
        &cells[COLOR_COLUMN],
        &cells[NUMBER_COLUMN],
        &cells[OWNER_COLUMN],
        &cells[PHONE_COLUMN],
    )
    .ok_or_else(|| CarsListError::IncorrectValue {
        row,
        number: cells[NUMBER_COLUMN].clone(),
    })
}

fn descendant_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.descendants().filter_map(ElementRef::wrap)
}

// Collapses whitespace runs the way a browser renders cell text.
fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
