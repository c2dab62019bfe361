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

pub mod client;
pub mod prompt;

use async_trait::async_trait;
use flashmaster_core::ErrorReport;
use flashmaster_core::Flashcard;
use thiserror::Error;

use crate::settings::Difficulty;
use crate::settings::Era;

/// How many cards one generation call asks for. The prompt and the tests
/// hold the model to this; the parser takes whatever arrives.
pub const CARD_COUNT: usize = 10;

/// The environment variable holding the API credential. Read at call time,
/// never cached across calls.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The credential is missing or blank. Raised before any request is
    /// issued.
    #[error("no API key configured: set GEMINI_API_KEY to a Gemini API key")]
    Configuration,
    /// Transport failure, non-2xx status, empty response text, or a response
    /// that does not parse as a card batch. All-or-nothing: nothing is
    /// retried and no partial batch is returned.
    #[error("card generation failed: {0}")]
    Generation(String),
}

/// A source of freshly generated card batches. The drill server and the
/// generate command are written against this trait so the session logic can
/// be exercised with a deterministic source.
#[async_trait]
pub trait CardSource: Send + Sync {
    async fn generate(
        &self,
        era: Era,
        difficulty: Difficulty,
    ) -> Result<Vec<Flashcard>, GenerateError>;
}

impl From<GenerateError> for ErrorReport {
    fn from(value: GenerateError) -> Self {
        ErrorReport::new(value.to_string())
    }
}
