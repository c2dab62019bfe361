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

use std::sync::Arc;
use std::sync::Mutex;

use flashmaster_core::QuizAction;
use flashmaster_core::QuizState;
use flashmaster_core::reduce;
use tokio::sync::oneshot::Sender;

use crate::gemini::CardSource;
use crate::gemini::GenerateError;
use crate::settings::Difficulty;
use crate::settings::Era;

#[derive(Clone)]
pub struct ServerState {
    pub source: Arc<dyn CardSource>,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

pub struct MutableState {
    pub quiz: QuizState,
    pub era: Era,
    pub difficulty: Difficulty,
    /// Bumped when a regeneration is requested. A response is installed
    /// only if the counter is unchanged when it arrives, so overlapping
    /// requests resolve as last-request-wins.
    pub generation: u64,
    /// The failure of the most recent generation attempt, if any. Cleared
    /// by the next successful one.
    pub error: Option<GenerateError>,
    pub finished: bool,
}

impl MutableState {
    /// All quiz transitions go through the reducer.
    pub fn dispatch(&mut self, action: QuizAction) {
        let quiz = std::mem::replace(&mut self.quiz, QuizState::empty());
        self.quiz = reduce(quiz, action);
    }
}
