use crate::number::PlateNumber;
use serde_json::{json, Value};

/// A registry entry. `number` keeps the text as it was imported; the
/// `number_*` fields hold its parsed parts.
#[derive(Debug, Clone, PartialEq)]
pub struct CarInfo {
    pub id: u32,
    pub model_name: String,
    pub color: String,
    pub number: String,
    pub owner: String,
    pub phone: String,
    pub number_prefix: Option<String>,
    pub number_root: String,
    pub number_suffix: Option<String>,
    pub is_custom_number: bool,
}

impl CarInfo {
    /// Builds an unsaved record (`id` 0). Registry data may be typed in
    /// Cyrillic, so the number is parsed with transliteration on.
    pub fn new(
        model_name: &str,
        color: &str,
        number: &str,
        owner: &str,
        phone: &str,
    ) -> Option<CarInfo> {
        let parsed = PlateNumber::parse(number, true)?;
        Some(CarInfo {
            id: 0,
            model_name: model_name.to_string(),
            color: color.to_string(),
            number: number.to_string(),
            owner: owner.to_string(),
            phone: phone.to_string(),
            number_prefix: parsed.prefix,
            number_root: parsed.root,
            number_suffix: parsed.suffix,
            is_custom_number: parsed.is_custom,
        })
    }
}

/// What gets shown to whoever pointed the camera at the car.
#[derive(Debug, Clone, PartialEq)]
pub struct CarDetails {
    pub id: u32,
    pub model_name: String,
    pub color: String,
    pub number: String,
    pub owner: String,
    pub phone: String,
}

impl CarDetails {
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "model_name": self.model_name,
            "color": self.color,
            "number": self.number,
            "owner": self.owner,
            "phone": self.phone,
        })
    }
}

impl From<&CarInfo> for CarDetails {
    fn from(car: &CarInfo) -> Self {
        CarDetails {
            id: car.id,
            model_name: car.model_name.clone(),
            color: car.color.clone(),
            number: car.number.clone(),
            owner: car.owner.clone(),
            phone: car.phone.clone(),
        }
    }
}
