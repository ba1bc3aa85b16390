//! Regex scans for named things in queries and passages.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Name,
    Date,
    Amount,
    Email,
    Phone,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] =
        [EntityKind::Name, EntityKind::Date, EntityKind::Amount, EntityKind::Email, EntityKind::Phone];

    fn regex(self) -> &'static Regex {
        static NAME: OnceLock<Regex> = OnceLock::new();
        static DATE: OnceLock<Regex> = OnceLock::new();
        static AMOUNT: OnceLock<Regex> = OnceLock::new();
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        static PHONE: OnceLock<Regex> = OnceLock::new();
        match self {
            EntityKind::Name => NAME.get_or_init(|| {
                Regex::new(r"\b[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)+\b").expect("static regex")
            }),
            EntityKind::Date => DATE.get_or_init(|| {
                const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";
                let pattern = format!(
                    r"\b\d{{4}}-\d{{2}}-\d{{2}}\b|\b\d{{1,2}}[/.-]\d{{1,2}}[/.-]\d{{2,4}}\b|\b{month}\.?[ \t]+\d{{1,2}}(?:st|nd|rd|th)?(?:,?[ \t]+\d{{4}})?\b|\b\d{{1,2}}(?:st|nd|rd|th)?[ \t]+{month}\.?(?:,?[ \t]+\d{{4}})?\b|\b{month}[ \t]+\d{{4}}\b",
                    month = MONTH
                );
                Regex::new(&pattern).expect("static regex")
            }),
            EntityKind::Amount => AMOUNT.get_or_init(|| {
                Regex::new(
                    r"[$€£][ \t]?\d+(?:,\d{3})*(?:\.\d+)?(?:[ \t]?(?:k|K|m|M|bn|thousand|million|billion)\b)?|\b\d+(?:,\d{3})*(?:\.\d+)?[ \t]?(?:dollars|USD|EUR|euros?|GBP|pounds)\b",
                )
                .expect("static regex")
            }),
            EntityKind::Email => EMAIL.get_or_init(|| {
                Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("static regex")
            }),
            EntityKind::Phone => PHONE.get_or_init(|| {
                Regex::new(r"(?:\+\d{1,3}[ .-]?)?(?:\(\d{3}\)|\b\d{3})[ .-]?\d{3}[ .-]?\d{4}\b").expect("static regex")
            }),
        }
    }
}

/// Leading words that a capitalized-run match picks up at the start of a
/// question ("What Alice Smith ...") and that are never part of a name.
const NAME_LEADERS: &[&str] = &[
    "What", "Who", "When", "Where", "Why", "How", "Which", "The", "A", "An", "Is", "Are", "Does", "Did", "Do", "Can",
    "Could", "Should", "Will", "Tell", "Show", "List", "Give", "Find",
];

fn trim_name(found: &str) -> Option<String> {
    let words: Vec<&str> = found.split_whitespace().collect();
    let skip = words.iter().take_while(|w| NAME_LEADERS.contains(w)).count();
    let rest = &words[skip..];
    if rest.len() >= 2 { Some(rest.join(" ")) } else { None }
}

/// All matches of one entity kind in `text`, in order of appearance,
/// exact duplicates removed.
pub fn scan(kind: EntityKind, text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for m in kind.regex().find_iter(text) {
        let value = match kind {
            EntityKind::Name => match trim_name(m.as_str()) {
                Some(name) => name,
                None => continue,
            },
            _ => m.as_str().trim().to_string(),
        };
        if !found.contains(&value) {
            found.push(value);
        }
    }
    found
}

/// Names, dates, amounts, emails and phone numbers found in `text`. Scans are
/// independent; a string matched by two scans is reported once.
pub fn extract_entities(text: &str) -> Vec<String> {
    let mut entities: Vec<String> = Vec::new();
    for kind in EntityKind::ALL {
        for value in scan(kind, text) {
            if !entities.contains(&value) {
                entities.push(value);
            }
        }
    }
    entities
}
