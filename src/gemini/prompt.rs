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

use serde_json::Value;
use serde_json::json;

use crate::gemini::CARD_COUNT;
use crate::settings::Difficulty;
use crate::settings::Era;

/// The generation instruction: exactly `CARD_COUNT` short-answer cards for
/// the given era and difficulty. Answers are 1-5 word noun phrases;
/// explanations are one or two sentences on the most commonly tested point.
pub fn compose_prompt(era: Era, difficulty: Difficulty) -> String {
    format!(
        "한국 대학수학능력시험(수능) 한국사 기출 패턴을 분석하여, {} 시기에 해당하는 \
         핵심 단답형 질문 {}개를 생성해줘.\n\
         난이도는 '{}' 수준으로, {} 구성해줘.\n\
         질문은 명확해야 하며, 답은 1~5단어 이내의 단답형이어야 함.\n\
         각 카드마다 가장 자주 출제되는 포인트를 담은 1~2문장의 핵심 설명을 포함해줘.",
        era.context(),
        CARD_COUNT,
        difficulty.label(),
        difficulty.descriptor(),
    )
}

/// The declared response schema: an array of objects with five required
/// string fields. The response is not re-validated against this beyond JSON
/// parse success.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "era": { "type": "STRING" },
                "question": { "type": "STRING" },
                "answer": { "type": "STRING" },
                "explanation": { "type": "STRING" },
            },
            "required": ["id", "era", "question", "answer", "explanation"],
        },
    })
}
