use std::fmt;

/// Shortest root accepted for any plate.
pub const MIN_ROOT_LEN: usize = 3;

/// Texts split into more components than this are not plates.
pub const MAX_COMPONENTS: usize = 4;

/// Placeholder for characters that have no digit or Latin equivalent.
pub const WILDCARD: char = '*';

const NUMERIC_ROOT_LEN: std::ops::RangeInclusive<usize> = 3..=5;

// Cyrillic letters the recognizer commonly confuses with Latin ones.
const CYRILLIC_TO_LATIN: [(char, char); 13] = [
    ('А', 'A'),
    ('В', 'B'),
    ('Е', 'E'),
    ('І', 'I'),
    ('К', 'K'),
    ('М', 'M'),
    ('Н', 'H'),
    ('О', 'O'),
    ('Р', 'P'),
    ('С', 'C'),
    ('Т', 'T'),
    ('У', 'Y'),
    ('Х', 'X'),
];

/// A car number split into the parts used for registry lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateNumber {
    pub prefix: Option<String>,
    pub root: String,
    pub suffix: Option<String>,
    pub is_custom: bool,
}

impl PlateNumber {
    /// Parses one line of recognized text. Set `translate_cyrillic` when the
    /// text may contain Cyrillic letters that stand for Latin ones.
    ///
    /// Returns `None` for anything that can't be a plate, which is the usual
    /// outcome for OCR noise.
    pub fn parse(text: &str, translate_cyrillic: bool) -> Option<PlateNumber> {
        let components: Vec<&str> = text
            .split(is_delimiter)
            .filter(|c| !c.is_empty())
            .collect();

        match components.len() {
            1 => {
                let root = components[0];
                if char_len(root) < MIN_ROOT_LEN {
                    return None;
                }
                if is_numeric(root) {
                    Some(PlateNumber {
                        prefix: None,
                        root: root.to_string(),
                        suffix: None,
                        is_custom: false,
                    })
                } else {
                    Some(PlateNumber {
                        prefix: None,
                        root: normalize(root, translate_cyrillic),
                        suffix: None,
                        is_custom: true,
                    })
                }
            }
            2..=MAX_COMPONENTS => {
                let numeric_root = components
                    .iter()
                    .position(|c| NUMERIC_ROOT_LEN.contains(&char_len(c)) && is_numeric(c));

                let (root_index, root, is_custom) = match numeric_root {
                    Some(index) => (index, components[index].to_string(), false),
                    None => {
                        let index = index_of_longest(&components);
                        if char_len(components[index]) < MIN_ROOT_LEN {
                            return None;
                        }
                        (index, normalize(components[index], translate_cyrillic), true)
                    }
                };

                let prefix = root_index
                    .checked_sub(1)
                    .map(|i| normalize(components[i], translate_cyrillic));
                let suffix = components
                    .get(root_index + 1)
                    .map(|c| normalize(c, translate_cyrillic));

                Some(PlateNumber {
                    prefix,
                    root,
                    suffix,
                    is_custom,
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, "{} ", prefix)?;
        }
        write!(f, "{}", self.root)?;
        if let Some(ref suffix) = self.suffix {
            write!(f, " {}", suffix)?;
        }
        Ok(())
    }
}

/// Maps every character to a digit, an uppercase Latin letter, a space or
/// [`WILDCARD`].
pub fn normalize(text: &str, translate_cyrillic: bool) -> String {
    text.chars()
        .map(|chr| {
            let chr = to_upper(chr);
            match chr {
                '0'..='9' | 'A'..='Z' => chr,
                ' ' | '\t' | '-' => ' ',
                _ if translate_cyrillic => CYRILLIC_TO_LATIN
                    .iter()
                    .find(|(cyrillic, _)| *cyrillic == chr)
                    .map_or(WILDCARD, |(_, latin)| *latin),
                _ => WILDCARD,
            }
        })
        .collect()
}

fn is_delimiter(chr: char) -> bool {
    chr == ' ' || chr == '\t' || chr == '-'
}

fn is_numeric(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// Keeps one output char per input char, unlike `char::to_uppercase`.
fn to_upper(chr: char) -> char {
    let mut upper = chr.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) => c,
        _ => chr,
    }
}

// First occurrence wins on ties, which `Iterator::max_by_key` doesn't give.
fn index_of_longest(components: &[&str]) -> usize {
    let mut best = 0;
    let mut best_len = 0;
    for (i, c) in components.iter().enumerate() {
        let len = char_len(c);
        if i == 0 || len > best_len {
            best = i;
            best_len = len;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<PlateNumber> {
        PlateNumber::parse(text, true)
    }

    #[test]
    fn test_standard_ukrainian() {
        let number = parse("АИ 1234 се").unwrap();
        assert_eq!(number.root, "1234");
        assert_eq!(number.prefix.as_deref(), Some("A*"));
        assert_eq!(number.suffix.as_deref(), Some("CE"));
        assert!(!number.is_custom);
    }

    #[test]
    fn test_unknown_european() {
        let number = parse("123 JsTH").unwrap();
        assert_eq!(number.root, "123");
        assert_eq!(number.prefix, None);
        assert_eq!(number.suffix.as_deref(), Some("JSTH"));
        assert!(!number.is_custom);
    }

    #[test]
    fn test_custom() {
        let number = parse("ВОВАН").unwrap();
        assert_eq!(number.root, "BOBAH");
        assert_eq!(number.prefix, None);
        assert_eq!(number.suffix, None);
        assert!(number.is_custom);
    }

    #[test]
    fn test_custom_with_index() {
        let number = parse("11 КОЛЯН").unwrap();
        assert_eq!(number.root, "KO**H");
        assert_eq!(number.prefix.as_deref(), Some("11"));
        assert_eq!(number.suffix, None);
        assert!(number.is_custom);
    }

    #[test]
    fn test_incorrect_strings() {
        assert_eq!(parse("12"), None);
        assert_eq!(parse("ad"), None);
        assert_eq!(parse("ad 12"), None);
        assert_eq!(parse("ad 123 fdrg 234 r"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn test_numeric_single_token() {
        for token in &["123", "0000", "987654321"] {
            let number = parse(token).unwrap();
            assert_eq!(number.root, *token);
            assert!(!number.is_custom);
        }
    }

    #[test]
    fn test_short_single_token() {
        for token in &["1", "ab", "Ж1", "**"] {
            assert_eq!(parse(token), None);
        }
    }

    #[test]
    fn test_hyphen_and_tab_delimiters() {
        let number = parse("AA-1234\tBB").unwrap();
        assert_eq!(number.prefix.as_deref(), Some("AA"));
        assert_eq!(number.root, "1234");
        assert_eq!(number.suffix.as_deref(), Some("BB"));
    }

    #[test]
    fn test_consecutive_delimiters_are_collapsed() {
        let number = parse("  AA  1234 -BB ").unwrap();
        assert_eq!(number.prefix.as_deref(), Some("AA"));
        assert_eq!(number.root, "1234");
        assert_eq!(number.suffix.as_deref(), Some("BB"));
    }

    #[test]
    fn test_four_components() {
        let number = parse("AA 1234 BB CC").unwrap();
        assert_eq!(number.prefix.as_deref(), Some("AA"));
        assert_eq!(number.root, "1234");
        assert_eq!(number.suffix.as_deref(), Some("BB"));
        assert!(!number.is_custom);
    }

    #[test]
    fn test_five_digit_root() {
        let number = parse("AA 12345").unwrap();
        assert_eq!(number.prefix.as_deref(), Some("AA"));
        assert_eq!(number.root, "12345");
        assert_eq!(number.suffix, None);
        assert!(!number.is_custom);
    }

    #[test]
    fn test_numeric_root_is_first_fit() {
        // "123456" is too long to be a numeric root, "777" is the first fit.
        let number = parse("123456 777 AB").unwrap();
        assert_eq!(number.prefix.as_deref(), Some("123456"));
        assert_eq!(number.root, "777");
        assert_eq!(number.suffix.as_deref(), Some("AB"));
        assert!(!number.is_custom);
    }

    #[test]
    fn test_custom_root_prefers_first_longest() {
        let number = parse("ab cde fgh").unwrap();
        assert_eq!(number.prefix.as_deref(), Some("AB"));
        assert_eq!(number.root, "CDE");
        assert_eq!(number.suffix.as_deref(), Some("FGH"));
        assert!(number.is_custom);
    }

    #[test]
    fn test_without_translation() {
        let number = PlateNumber::parse("АИ 1234 се", false).unwrap();
        assert_eq!(number.prefix.as_deref(), Some("**"));
        assert_eq!(number.suffix.as_deref(), Some("**"));

        let number = PlateNumber::parse("ВОВАН", false).unwrap();
        assert_eq!(number.root, "*****");
        assert!(number.is_custom);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("ab-c\td e", false), "AB C D E");
        assert_eq!(normalize("вова#1", true), "BOBA*1");
        assert_eq!(normalize("ß", true), "*");
        assert_eq!(normalize("ІХ", true), "IX");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for text in &["AB 12*", "АИ 1234 се", "x-y\tz", "КОЛЯН"] {
            for &translate in &[true, false] {
                let once = normalize(text, translate);
                assert_eq!(normalize(&once, translate), once);
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(parse("АИ 1234 се").unwrap().to_string(), "A* 1234 CE");
        assert_eq!(parse("1234").unwrap().to_string(), "1234");
        assert_eq!(parse("11 КОЛЯН").unwrap().to_string(), "11 KO**H");
    }
}
