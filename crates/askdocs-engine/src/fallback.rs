use askdocs_core::types::Intent;

/// Answer returned whenever no passage survives ranking.
pub const NO_INFORMATION: &str =
    "I couldn't find relevant information in your documents to answer that question.";

/// Fixed answer templates used when extraction comes up empty. Selection is
/// by situation only, so the same input always gets the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    NoInformation,
    NoListItems,
    NoEntities(Intent),
}

impl Fallback {
    pub fn message(self) -> &'static str {
        match self {
            Fallback::NoInformation => NO_INFORMATION,
            Fallback::NoListItems => {
                "I couldn't find a list in the relevant passages. The closest match reads:"
            }
            Fallback::NoEntities(Intent::Financial) => {
                "I couldn't find any amounts in the relevant passages. The closest match reads:"
            }
            Fallback::NoEntities(Intent::Temporal) => {
                "I couldn't find any dates in the relevant passages. The closest match reads:"
            }
            Fallback::NoEntities(Intent::Contact) => {
                "I couldn't find any contact details in the relevant passages. The closest match reads:"
            }
            Fallback::NoEntities(Intent::Generic) => Fallback::NoListItems.message(),
        }
    }

    /// The template followed by an excerpt of the context.
    pub fn with_excerpt(self, excerpt: &str) -> String {
        format!("{}\n\n{}", self.message(), excerpt)
    }
}
