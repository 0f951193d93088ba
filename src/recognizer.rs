//! Turns batches of recognized text into registry hits.

use crate::matching::pick_best;
use crate::number::PlateNumber;
use crate::registry::CarsRegistry;
use crate::types::CarDetails;
use log::{debug, info};
use std::time::{Duration, Instant};

/// A number must be seen more often than this before it's reported missing.
const NOT_FOUND_MIN_RECOGNITIONS: u32 = 7;
/// ...and for longer than this.
const NOT_FOUND_MIN_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    Found(CarDetails),
    /// The same number kept showing up but isn't in the registry.
    NotFound(PlateNumber),
    Nothing,
}

struct PendingNumber {
    number: PlateNumber,
    recognitions: u32,
    first_seen: Instant,
}

pub struct Recognizer<R> {
    registry: R,
    translate_cyrillic: bool,
    pending: Option<PendingNumber>,
}

impl<R: CarsRegistry> Recognizer<R> {
    pub fn new(registry: R, translate_cyrillic: bool) -> Self {
        Recognizer {
            registry,
            translate_cyrillic,
            pending: None,
        }
    }

    /// Handles the text blocks of one detection event. The first block that
    /// resolves to a registry record wins.
    pub fn process_detections<S: AsRef<str>>(&mut self, texts: &[S], now: Instant) -> Recognition {
        let mut result = Recognition::Nothing;
        for text in texts {
            let number = match PlateNumber::parse(text.as_ref(), self.translate_cyrillic) {
                Some(number) if !number.is_custom => number,
                _ => continue,
            };

            let candidates = self.registry.load_by_number_root(&number.root);
            if let Some(car) = pick_best(&number, &candidates) {
                info!("Recognized {} as car {}", number, car.id);
                self.pending = None;
                return Recognition::Found(CarDetails::from(car));
            }

            if let Some(missing) = self.track_not_found(number, now) {
                result = Recognition::NotFound(missing);
            }
        }
        result
    }

    fn track_not_found(&mut self, number: PlateNumber, now: Instant) -> Option<PlateNumber> {
        let same_root = self
            .pending
            .as_ref()
            .map_or(false, |pending| pending.number.root == number.root);
        if !same_root {
            debug!("Tracking unknown number {}", number);
            self.pending = Some(PendingNumber {
                number,
                recognitions: 1,
                first_seen: now,
            });
            return None;
        }

        let pending = self.pending.as_mut()?;
        pending.recognitions += 1;
        if pending.recognitions > NOT_FOUND_MIN_RECOGNITIONS
            && now.duration_since(pending.first_seen) > NOT_FOUND_MIN_DURATION
        {
            info!("Number {} is not in the registry", number);
            self.pending = None;
            return Some(number);
        }
        None
    }
}
