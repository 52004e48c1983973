//! Vague-answer detection and clarification
//!
//! Yes/no prompts accept free text. A small vocabulary of vague phrases
//! ("não sei", "talvez", ...) is recognised and answered with a clarification
//! for the question being asked, so the caller can prompt again.

use crate::text::normalize_answer;

/// Which question an answer responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnswerContext {
    PackagingType,
    Washability,
    Hazard,
}

impl AnswerContext {
    /// Clarification printed when the answer was vague.
    pub fn clarification(&self) -> &'static str {
        match self {
            AnswerContext::PackagingType => {
                "Por favor, especifique o tipo de embalagem para que possamos fornecer uma orientação adequada."
            }
            AnswerContext::Washability => {
                "Explicação: Uma embalagem é considerada lavável se pode ser limpa com água para remoção de resíduos antes do descarte."
            }
            AnswerContext::Hazard => {
                "Explicação: Resíduos perigosos são substâncias químicas ou tóxicas que podem causar danos ao meio ambiente ou à saúde, como restos de defensivos agrícolas."
            }
        }
    }
}

/// Interpretation of a yes/no answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriStateAnswer {
    Yes,
    No,
    /// Vague; carries the clarification to show before asking again.
    Undetermined { clarification: &'static str },
}

impl TriStateAnswer {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TriStateAnswer::Yes => Some(true),
            TriStateAnswer::No => Some(false),
            TriStateAnswer::Undetermined { .. } => None,
        }
    }
}

/// Vague phrases and affirmative tokens, stored normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerVocabulary {
    vague_phrases: Vec<String>,
    affirmative: Vec<String>,
}

impl Default for AnswerVocabulary {
    fn default() -> Self {
        Self::new(
            [
                "não sei",
                "talvez",
                "não tenho certeza",
                "sei lá",
                "indefinido",
                "o que você acha",
                "você é quem diz",
                "vai lá ver",
            ],
            ["sim", "verdadeiro"],
        )
    }
}

impl AnswerVocabulary {
    pub fn new<V, A>(vague_phrases: V, affirmative: A) -> Self
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            vague_phrases: vague_phrases
                .into_iter()
                .map(|phrase| normalize_answer(phrase.as_ref()))
                .collect(),
            affirmative: affirmative
                .into_iter()
                .map(|token| normalize_answer(token.as_ref()))
                .collect(),
        }
    }

    pub fn vague_phrases(&self) -> &[String] {
        &self.vague_phrases
    }

    pub fn is_vague(&self, raw: &str) -> bool {
        let normalized = normalize_answer(raw);
        self.vague_phrases.iter().any(|phrase| *phrase == normalized)
    }

    pub fn is_affirmative(&self, raw: &str) -> bool {
        let normalized = normalize_answer(raw);
        self.affirmative.iter().any(|token| *token == normalized)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnswerClassifier {
    vocabulary: AnswerVocabulary,
}

impl AnswerClassifier {
    pub fn new(vocabulary: AnswerVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &AnswerVocabulary {
        &self.vocabulary
    }

    /// Vague phrases win over everything else. Anything that is neither vague
    /// nor affirmative counts as "no", including unrelated text.
    pub fn classify(&self, raw: &str, context: AnswerContext) -> TriStateAnswer {
        if self.vocabulary.is_vague(raw) {
            return TriStateAnswer::Undetermined { clarification: context.clarification() };
        }
        if self.vocabulary.is_affirmative(raw) {
            TriStateAnswer::Yes
        } else {
            TriStateAnswer::No
        }
    }
}
