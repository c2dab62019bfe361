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

use std::fs::write;

use flashmaster_core::Fallible;

use crate::gemini::CardSource;
use crate::settings::Difficulty;
use crate::settings::Era;

/// Generate one deck and write it as pretty-printed JSON, to stdout or to
/// the given file.
pub async fn generate_deck(
    source: &dyn CardSource,
    era: Era,
    difficulty: Difficulty,
    output: Option<String>,
) -> Fallible<()> {
    let cards = source.generate(era, difficulty).await?;
    log::debug!("Generated {} cards", cards.len());
    let json = serde_json::to_string_pretty(&cards)?;
    match output {
        Some(path) => write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use flashmaster_core::Flashcard;
    use tempfile::tempdir;

    use super::*;
    use crate::gemini::GenerateError;

    struct OneCardSource;

    #[async_trait]
    impl CardSource for OneCardSource {
        async fn generate(
            &self,
            era: Era,
            _difficulty: Difficulty,
        ) -> Result<Vec<Flashcard>, GenerateError> {
            Ok(vec![Flashcard {
                id: "c0".to_string(),
                era: era.label().to_string(),
                question: "훈민정음을 창제한 왕은?".to_string(),
                answer: "세종대왕".to_string(),
                explanation: "1443년 창제, 1446년 반포되었다.".to_string(),
            }])
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl CardSource for BrokenSource {
        async fn generate(
            &self,
            _era: Era,
            _difficulty: Difficulty,
        ) -> Result<Vec<Flashcard>, GenerateError> {
            Err(GenerateError::Generation("stub failure".to_string()))
        }
    }

    #[tokio::test]
    async fn test_generate_to_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("deck.json");
        let output = path.display().to_string();
        generate_deck(&OneCardSource, Era::PreModern, Difficulty::Low, Some(output)).await?;
        let written = std::fs::read_to_string(&path)?;
        let cards: Vec<Flashcard> = serde_json::from_str(&written)?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].era, Era::PreModern.label());
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_failure_propagates() {
        let result = generate_deck(&BrokenSource, Era::All, Difficulty::Medium, None).await;
        assert!(result.is_err());
    }
}
