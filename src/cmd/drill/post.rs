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

use axum::extract::Form;
use axum::extract::State;
use axum::response::Redirect;
use flashmaster_core::QuizAction;
use serde::Deserialize;

use crate::cmd::drill::state::ServerState;
use crate::settings::Difficulty;
use crate::settings::Era;

#[derive(Deserialize)]
pub struct ActionForm {
    action: String,
    #[serde(default)]
    era: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Redirect {
    match form.action.as_str() {
        "Flip" => {
            let mut m = state.mutable.lock().unwrap();
            m.dispatch(QuizAction::Flip);
        }
        "Next" => {
            // Whether flipping first was required is the form's concern: the
            // Next control only renders on a flipped card.
            let mut m = state.mutable.lock().unwrap();
            m.dispatch(QuizAction::Advance);
        }
        "Apply" => {
            let (era, difficulty) = {
                let m = state.mutable.lock().unwrap();
                (
                    form.era
                        .as_deref()
                        .and_then(Era::from_param)
                        .unwrap_or(m.era),
                    form.difficulty
                        .as_deref()
                        .and_then(Difficulty::from_param)
                        .unwrap_or(m.difficulty),
                )
            };
            regenerate(&state, era, difficulty).await;
        }
        // Retry after a failure and play-again both regenerate with the
        // session's current settings.
        "Retry" | "Again" => {
            let (era, difficulty) = {
                let m = state.mutable.lock().unwrap();
                (m.era, m.difficulty)
            };
            regenerate(&state, era, difficulty).await;
        }
        "End" => {
            let mut m = state.mutable.lock().unwrap();
            m.finished = true;
        }
        "Shutdown" => {
            let mut shutdown_tx = state.shutdown_tx.lock().unwrap();
            if let Some(tx) = shutdown_tx.take() {
                let _ = tx.send(());
            }
        }
        _ => {}
    }
    Redirect::to("/")
}

/// Request a fresh deck. The lock is not held across the generation call;
/// instead the request takes a ticket from the generation counter and the
/// response is installed only if no newer request has been issued since.
async fn regenerate(state: &ServerState, era: Era, difficulty: Difficulty) {
    let ticket = {
        let mut m = state.mutable.lock().unwrap();
        m.era = era;
        m.difficulty = difficulty;
        m.generation += 1;
        m.generation
    };
    let result = state.source.generate(era, difficulty).await;
    let mut m = state.mutable.lock().unwrap();
    if m.generation != ticket {
        log::debug!(
            "Dropping stale generation response (ticket {ticket}, current {})",
            m.generation
        );
        return;
    }
    match result {
        Ok(cards) => {
            m.dispatch(QuizAction::Initialize(cards));
            m.error = None;
            m.finished = false;
        }
        Err(error) => {
            log::error!("Card generation failed: {error}");
            m.error = Some(error);
        }
    }
}
