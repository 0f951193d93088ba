//! Car plate recognition against a local registry.
//!
//! [`number`] turns a line of OCR output into a [`number::PlateNumber`],
//! [`matching`] picks the registry record that best fits it, and
//! [`recognizer`] ties both to a [`registry::CarsRegistry`].

pub mod errors;
pub mod html_import;
pub mod import;
pub mod matching;
pub mod number;
pub mod recognizer;
pub mod registry;
pub mod types;
