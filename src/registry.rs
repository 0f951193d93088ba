use crate::errors::CarsListError;
use crate::html_import::CarsTable;
use crate::import::CarsListReader;
use crate::types::CarInfo;
use log::info;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Lookup side of the registry, as seen by the recognizer.
pub trait CarsRegistry {
    /// All records whose root equals `root`, in insertion order.
    fn load_by_number_root(&self, root: &str) -> Vec<CarInfo>;

    fn size(&self) -> usize;
}

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    cars: Vec<CarInfo>,
    by_root: HashMap<String, Vec<usize>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `path` and imports every record. Files ending in `.html` or
    /// `.htm` are read as an HTML table, anything else as delimited text.
    pub fn load<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self, CarsListError> {
        let path = path.as_ref();
        let is_html = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));
        let open_error = |cause| CarsListError::Open {
            path: path.to_path_buf(),
            cause,
        };

        let mut registry = MemoryRegistry::new();
        let count = if is_html {
            let html = fs::read_to_string(path).map_err(open_error)?;
            registry.import(CarsTable::parse(&html)?)?
        } else {
            let file = File::open(path).map_err(open_error)?;
            registry.import(CarsListReader::new(BufReader::new(file), delimiter))?
        };
        info!("Loaded {} cars from {:?}", count, path);
        Ok(registry)
    }

    /// Inserts every record, or none of them if any record is bad or has a
    /// custom number. Returns the number of records added.
    pub fn import<I>(&mut self, cars: I) -> Result<usize, CarsListError>
    where
        I: IntoIterator<Item = Result<CarInfo, CarsListError>>,
    {
        let cars = cars.into_iter().collect::<Result<Vec<CarInfo>, _>>()?;
        if cars.is_empty() {
            return Err(CarsListError::EmptyData);
        }
        if let Some(custom) = cars.iter().find(|car| car.is_custom_number) {
            return Err(CarsListError::UnsupportedNumber(custom.number.clone()));
        }
        let count = cars.len();
        for car in cars {
            self.insert(car);
        }
        Ok(count)
    }

    /// Stores `car` under a fresh id, which is returned.
    pub fn insert(&mut self, mut car: CarInfo) -> u32 {
        let id = self.cars.len() as u32 + 1;
        car.id = id;
        self.by_root
            .entry(car.number_root.clone())
            .or_insert_with(Vec::new)
            .push(self.cars.len());
        self.cars.push(car);
        id
    }

    pub fn clear(&mut self) {
        self.cars.clear();
        self.by_root.clear();
    }
}

impl CarsRegistry for MemoryRegistry {
    fn load_by_number_root(&self, root: &str) -> Vec<CarInfo> {
        self.by_root
            .get(root)
            .map(|indices| indices.iter().map(|&i| self.cars[i].clone()).collect())
            .unwrap_or_default()
    }

    fn size(&self) -> usize {
        self.cars.len()
    }
}
