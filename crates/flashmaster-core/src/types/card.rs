// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

/// A single question/answer/explanation flashcard.
///
/// All five fields are non-empty after normalization. The answer is a short
/// noun phrase and the explanation a sentence or two; both are contracts of
/// the generation prompt, not enforced here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub era: String,
    pub question: String,
    pub answer: String,
    pub explanation: String,
}

/// One element of the model's response, before normalization. The declared
/// response schema marks every field required, but `id` and `era` are kept
/// optional so that a non-conforming response can still be repaired.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RawFlashcard {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub era: Option<String>,
    pub question: String,
    pub answer: String,
    pub explanation: String,
}

impl RawFlashcard {
    /// Normalize into a `Flashcard`, backfilling an absent or blank `id`
    /// with `{stamp}-{index}` and an absent or blank `era` with the
    /// requested era label. Backfilling a complete card is a no-op.
    pub fn into_flashcard(self, stamp: &str, index: usize, era_label: &str) -> Flashcard {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => format!("{stamp}-{index}"),
        };
        let era = match self.era {
            Some(era) if !era.trim().is_empty() => era,
            _ => era_label.to_string(),
        };
        Flashcard {
            id,
            era,
            question: self.question,
            answer: self.answer,
            explanation: self.explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_raw() -> RawFlashcard {
        RawFlashcard {
            id: Some("c1".to_string()),
            era: Some("조선".to_string()),
            question: "훈민정음을 창제한 왕은?".to_string(),
            answer: "세종대왕".to_string(),
            explanation: "1443년 창제, 1446년 반포되었다.".to_string(),
        }
    }

    #[test]
    fn test_backfill_missing_id_and_era() {
        let raw = RawFlashcard {
            id: None,
            era: None,
            ..complete_raw()
        };
        let card = raw.into_flashcard("1700000000", 3, "전체");
        assert_eq!(card.id, "1700000000-3");
        assert_eq!(card.era, "전체");
        assert_eq!(card.answer, "세종대왕");
    }

    #[test]
    fn test_backfill_blank_id_and_era() {
        let raw = RawFlashcard {
            id: Some("  ".to_string()),
            era: Some(String::new()),
            ..complete_raw()
        };
        let card = raw.into_flashcard("1700000000", 0, "전근대 (선사~조선)");
        assert_eq!(card.id, "1700000000-0");
        assert_eq!(card.era, "전근대 (선사~조선)");
    }

    #[test]
    fn test_backfill_complete_card_is_noop() {
        let card = complete_raw().into_flashcard("1700000000", 7, "전체");
        assert_eq!(card.id, "c1");
        assert_eq!(card.era, "조선");
        // Running the backfill again over the already-complete card changes
        // nothing.
        let raw = RawFlashcard {
            id: Some(card.id.clone()),
            era: Some(card.era.clone()),
            question: card.question.clone(),
            answer: card.answer.clone(),
            explanation: card.explanation.clone(),
        };
        let again = raw.into_flashcard("9999999999", 0, "근현대 (개항~현대)");
        assert_eq!(again, card);
    }
}
