//! Choosing between registry records that share a root.

use crate::number::{PlateNumber, WILDCARD};
use crate::types::CarInfo;

const EXACT_SCORE: u32 = 2;
const WILDCARD_SCORE: u32 = 1;

/// Scores how well `recognized` agrees with a stored prefix and suffix.
///
/// Prefixes are compared from their first character, suffixes from their
/// last. Each position scores [`EXACT_SCORE`] for equal characters and
/// [`WILDCARD_SCORE`] when either side is [`WILDCARD`]; the first real
/// mismatch ends that fragment.
pub fn match_score(
    recognized: &PlateNumber,
    candidate_prefix: Option<&str>,
    candidate_suffix: Option<&str>,
) -> u32 {
    let mut score = 0;
    if let (Some(ours), Some(theirs)) = (recognized.prefix.as_deref(), candidate_prefix) {
        score += fragment_score(ours.chars(), theirs.chars());
    }
    if let (Some(ours), Some(theirs)) = (recognized.suffix.as_deref(), candidate_suffix) {
        score += fragment_score(ours.chars().rev(), theirs.chars().rev());
    }
    score
}

/// Picks the candidate that best fits `recognized`.
///
/// A single candidate is returned without scoring: the root lookup that
/// produced it is trusted on its own. Ties go to the earliest candidate.
pub fn pick_best<'a>(recognized: &PlateNumber, candidates: &'a [CarInfo]) -> Option<&'a CarInfo> {
    match candidates {
        [] => None,
        [only] => Some(only),
        _ => {
            let mut best: Option<(&CarInfo, u32)> = None;
            for car in candidates {
                let score = match_score(
                    recognized,
                    car.number_prefix.as_deref(),
                    car.number_suffix.as_deref(),
                );
                match best {
                    Some((_, best_score)) if best_score >= score => {}
                    _ => best = Some((car, score)),
                }
            }
            best.map(|(car, _)| car)
        }
    }
}

fn fragment_score<A, B>(ours: A, theirs: B) -> u32
where
    A: Iterator<Item = char>,
    B: Iterator<Item = char>,
{
    let mut score = 0;
    for (a, b) in ours.zip(theirs) {
        if a == b {
            score += EXACT_SCORE;
        } else if a == WILDCARD || b == WILDCARD {
            score += WILDCARD_SCORE;
        } else {
            break;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(text: &str) -> PlateNumber {
        PlateNumber::parse(text, true).unwrap()
    }

    fn car(id: u32, number: &str) -> CarInfo {
        let mut car = CarInfo::new("model", "color", number, "owner", "phone").unwrap();
        car.id = id;
        car
    }

    #[test]
    fn test_parts_matching() {
        assert_eq!(match_score(&number("АИ 1234 се"), Some("A#"), Some("CE")), 7);
        assert_eq!(match_score(&number("AB 1234 CE"), Some("AB"), Some("CE")), 8);
        assert_eq!(match_score(&number("A$ 1234"), Some("AA"), Some("CE")), 3);
        assert_eq!(match_score(&number("1234"), Some("AA"), Some("CE")), 0);
    }

    #[test]
    fn test_mismatch_stops_fragment() {
        // Prefix: A, then B vs A stops. Suffix from the end: E, then X vs C stops.
        assert_eq!(match_score(&number("AB 1234 XE"), Some("AA"), Some("CE")), 4);
        assert_eq!(match_score(&number("XA 1234 EX"), Some("AA"), Some("CE")), 0);
    }

    #[test]
    fn test_suffix_is_anchored_at_end() {
        assert_eq!(match_score(&number("1234 XCE"), None, Some("CE")), 4);
        assert_eq!(match_score(&number("1234 CEX"), None, Some("CE")), 0);
    }

    #[test]
    fn test_prefix_is_anchored_at_start() {
        assert_eq!(match_score(&number("KAX 1234"), Some("KA"), None), 4);
        assert_eq!(match_score(&number("XKA 1234"), Some("KA"), None), 0);
    }

    #[test]
    fn test_missing_fragments_score_nothing() {
        let recognized = number("AB 1234 CE");
        assert_eq!(match_score(&recognized, None, None), 0);
        assert_eq!(match_score(&recognized, None, Some("CE")), 4);
        assert_eq!(match_score(&number("1234 CE"), Some("AB"), Some("CE")), 4);
    }

    #[test]
    fn test_score_is_symmetric() {
        let pairs = [
            ("АИ 1234 се", "A# 1234 CE"),
            ("AB 1234 XE", "AA 1234 CE"),
            ("A$ 1234 K", "AA 1234 *K"),
            ("KA 1234", "K 1234 E"),
        ];
        for (a, b) in pairs.iter() {
            let a = number(a);
            let b = number(b);
            assert_eq!(
                match_score(&a, b.prefix.as_deref(), b.suffix.as_deref()),
                match_score(&b, a.prefix.as_deref(), a.suffix.as_deref()),
            );
        }
    }

    #[test]
    fn test_pick_best_empty() {
        assert_eq!(pick_best(&number("AA 1234 BB"), &[]), None);
    }

    #[test]
    fn test_pick_best_single_candidate_is_not_scored() {
        // The only candidate is returned even though nothing around the
        // root agrees with it.
        let candidates = [car(1, "XX 1234 YY")];
        let recognized = number("AA 1234 BB");
        assert_eq!(match_score(&recognized, Some("XX"), Some("YY")), 0);
        assert_eq!(pick_best(&recognized, &candidates).map(|c| c.id), Some(1));
    }

    #[test]
    fn test_pick_best_highest_score() {
        let candidates = [car(1, "XX 1234 YY"), car(2, "AA 1234 BB"), car(3, "AA 1234 YY")];
        let recognized = number("AA 1234 BB");
        assert_eq!(pick_best(&recognized, &candidates).map(|c| c.id), Some(2));
    }

    #[test]
    fn test_pick_best_ties_go_to_first() {
        let candidates = [car(1, "XX 1234"), car(2, "AA 1234"), car(3, "AA 1234")];
        let recognized = number("AA 1234");
        assert_eq!(pick_best(&recognized, &candidates).map(|c| c.id), Some(2));

        let candidates = [car(4, "XX 1234"), car(5, "YY 1234")];
        assert_eq!(pick_best(&recognized, &candidates).map(|c| c.id), Some(4));
    }
}
