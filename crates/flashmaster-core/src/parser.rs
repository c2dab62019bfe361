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

use crate::error::Fallible;
use crate::types::card::Flashcard;
use crate::types::card::RawFlashcard;

/// Parse the model's response text as a JSON array of cards, backfilling
/// `id` and `era` where the response left them out. The batch is taken as
/// delivered: no length check, no dedup, no field trimming.
pub fn parse_cards(text: &str, stamp: &str, era_label: &str) -> Fallible<Vec<Flashcard>> {
    let raw: Vec<RawFlashcard> = serde_json::from_str(text)?;
    let cards = raw
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_flashcard(stamp, index, era_label))
        .collect();
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete_batch() {
        let text = r#"[
            {"id": "1", "era": "조선", "question": "임진왜란이 일어난 해는?", "answer": "1592년", "explanation": "선조 25년에 일어났다."},
            {"id": "2", "era": "고려", "question": "고려를 건국한 인물은?", "answer": "왕건", "explanation": "918년 고려를 세웠다."}
        ]"#;
        let cards = parse_cards(text, "1700000000", "전체").unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, "1");
        assert_eq!(cards[1].era, "고려");
    }

    #[test]
    fn test_parse_backfills_missing_fields() {
        let text = r#"[
            {"question": "8조법이 있던 나라는?", "answer": "고조선", "explanation": "사회 질서 유지를 위한 법이 있었다."}
        ]"#;
        let cards = parse_cards(text, "1700000000", "전근대 (선사~조선)").unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "1700000000-0");
        assert_eq!(cards[0].era, "전근대 (선사~조선)");
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let result = parse_cards("I'm sorry, I can't do that.", "1700000000", "전체");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_object() {
        let result = parse_cards(r#"{"cards": []}"#, "1700000000", "전체");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty_array() {
        let cards = parse_cards("[]", "1700000000", "전체").unwrap();
        assert!(cards.is_empty());
    }
}
