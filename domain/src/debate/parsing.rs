//! Reasoner response parsing.
//!
//! Pure text handling for judgments returned by language-model reasoners.
//! No I/O, just pattern matching.
//!
//! | Function | Use Case |
//! |----------|----------|
//! | [`parse_yes_no`] | Equivalence and correctness judgments |
//! | [`extract_json_object`] | Locating the structured update verdict |

/// Parse a YES/NO judgment.
///
/// The first word decides when it is a recognised keyword. Otherwise the
/// whole response is scanned for standalone keywords; if only one polarity
/// appears it wins. Ambiguous or empty responses return `None` so callers
/// can pick their own conservative default.
///
/// # Examples
///
/// ```
/// use agora_domain::debate::parsing::parse_yes_no;
///
/// assert_eq!(parse_yes_no("Yes, both give 18."), Some(true));
/// assert_eq!(parse_yes_no("NO"), Some(false));
/// assert_eq!(parse_yes_no("They match, so the answer is yes"), Some(true));
/// assert_eq!(parse_yes_no("Hard to say"), None);
/// ```
pub fn parse_yes_no(response: &str) -> Option<bool> {
    let words: Vec<String> = response
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_ascii_alphabetic())
                .to_ascii_uppercase()
        })
        .filter(|w| !w.is_empty())
        .collect();

    if let Some(first) = words.first()
        && let Some(answer) = keyword(first)
    {
        return Some(answer);
    }

    let saw_yes = words.iter().any(|w| keyword(w) == Some(true));
    let saw_no = words.iter().any(|w| keyword(w) == Some(false));

    match (saw_yes, saw_no) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

fn keyword(word: &str) -> Option<bool> {
    match word {
        "YES" | "TRUE" | "EQUIVALENT" | "CORRECT" => Some(true),
        "NO" | "FALSE" | "NOT" | "INCORRECT" => Some(false),
        _ => None,
    }
}

/// Locate the JSON object in a response.
///
/// Handles bare objects, objects wrapped in a markdown code fence, and
/// objects surrounded by prose. Returns the slice from the first `{` to the
/// last `}`.
pub fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response[start..].rfind('}')?;
    Some(&response[start..start + end + 1])
}
