use log::warn;
use std::env;
use std::path::PathBuf;

const DEFAULT_CARS_LIST: &str = "/data/carlist.html";
const DEFAULT_PORT: u16 = 8402;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cars_list: PathBuf,
    pub delimiter: u8,
    pub port: u16,
    pub translate_cyrillic: bool,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let delimiter = match lookup("CARS_LIST_DELIMITER") {
            Some(d) if d.len() == 1 && d.is_ascii() => d.as_bytes()[0],
            Some(d) => {
                warn!("Ignoring CARS_LIST_DELIMITER {:?}, expected one ASCII character", d);
                b','
            }
            None => b',',
        };
        let port = match lookup("PORT") {
            Some(p) => p.parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid PORT {:?}", p);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let translate_cyrillic = match lookup("TRANSLATE_CYRILLIC") {
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    warn!("Ignoring invalid TRANSLATE_CYRILLIC {:?}", v);
                    false
                }
            },
            None => false,
        };
        Config {
            cars_list: lookup("CARS_LIST")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CARS_LIST)),
            delimiter,
            port,
            translate_cyrillic,
        }
    }
}
