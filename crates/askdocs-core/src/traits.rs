use crate::types::ContextBundle;

/// An external answerer that writes free text from ranked context, such as a
/// hosted language model. Failures are expected (quota, auth, network) and the
/// caller falls back to the extractive answer.
pub trait AnswerGenerator: Send + Sync {
    fn generate(&self, question: &str, context: &ContextBundle) -> anyhow::Result<String>;
}
