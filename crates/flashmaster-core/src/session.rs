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

use crate::types::card::Flashcard;

/// The state of one quiz session: a fixed batch of cards, a cursor, and the
/// reveal flag. `completed` is true exactly when the cursor has advanced
/// past the last card; once set, only `Initialize` leaves it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    pub cards: Vec<Flashcard>,
    pub current_index: usize,
    pub is_flipped: bool,
    pub score: u32,
    pub completed: bool,
}

/// A session transition. The quiz is driven entirely through `reduce`; the
/// presentation layer decides when each action is offered (in particular,
/// `Advance` is only offered while the card is flipped).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizAction {
    Initialize(Vec<Flashcard>),
    Flip,
    Advance,
}

impl QuizState {
    /// A fresh session over the given batch: cursor at zero, unflipped, not
    /// completed. An empty batch is degenerate but not an error.
    pub fn new(cards: Vec<Flashcard>) -> Self {
        QuizState {
            cards,
            current_index: 0,
            is_flipped: false,
            score: 0,
            completed: false,
        }
    }

    pub fn empty() -> Self {
        QuizState::new(Vec::new())
    }

    /// The card under the cursor, or `None` once the session is completed
    /// or when the batch is empty.
    pub fn current_card(&self) -> Option<&Flashcard> {
        if self.completed {
            return None;
        }
        self.cards.get(self.current_index)
    }
}

pub fn reduce(state: QuizState, action: QuizAction) -> QuizState {
    match action {
        QuizAction::Initialize(cards) => QuizState::new(cards),
        QuizAction::Flip => {
            if state.completed {
                state
            } else {
                QuizState {
                    is_flipped: !state.is_flipped,
                    ..state
                }
            }
        }
        QuizAction::Advance => {
            if state.completed {
                state
            } else if state.current_index + 1 < state.cards.len() {
                QuizState {
                    current_index: state.current_index + 1,
                    is_flipped: false,
                    ..state
                }
            } else {
                QuizState {
                    completed: true,
                    ..state
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cards(n: usize) -> Vec<Flashcard> {
        (0..n)
            .map(|i| Flashcard {
                id: format!("card-{i}"),
                era: "전체".to_string(),
                question: format!("질문 {i}"),
                answer: format!("답 {i}"),
                explanation: format!("해설 {i}"),
            })
            .collect()
    }

    #[test]
    fn test_initialize() {
        let state = reduce(QuizState::empty(), QuizAction::Initialize(make_cards(10)));
        assert_eq!(state.cards.len(), 10);
        assert_eq!(state.current_index, 0);
        assert!(!state.is_flipped);
        assert_eq!(state.score, 0);
        assert!(!state.completed);
        assert_eq!(state.current_card().unwrap().id, "card-0");
    }

    #[test]
    fn test_flip_parity() {
        let mut state = QuizState::new(make_cards(3));
        for _ in 0..5 {
            state = reduce(state, QuizAction::Flip);
        }
        assert!(state.is_flipped);
        for _ in 0..5 {
            state = reduce(state, QuizAction::Flip);
        }
        assert!(!state.is_flipped);
    }

    #[test]
    fn test_advance_resets_flip() {
        let state = QuizState::new(make_cards(3));
        let state = reduce(state, QuizAction::Flip);
        let state = reduce(state, QuizAction::Advance);
        assert_eq!(state.current_index, 1);
        assert!(!state.is_flipped);
        assert!(!state.completed);
    }

    #[test]
    fn test_advance_on_last_card_completes() {
        let mut state = QuizState::new(make_cards(3));
        state.current_index = 2;
        state.is_flipped = true;
        let state = reduce(state, QuizAction::Advance);
        assert!(state.completed);
        assert!(state.current_card().is_none());
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut state = QuizState::new(make_cards(1));
        state = reduce(state, QuizAction::Advance);
        assert!(state.completed);
        let after_flip = reduce(state.clone(), QuizAction::Flip);
        assert_eq!(after_flip, state);
        let after_advance = reduce(state.clone(), QuizAction::Advance);
        assert_eq!(after_advance, state);
    }

    #[test]
    fn test_initialize_leaves_completed() {
        let mut state = QuizState::new(make_cards(1));
        state = reduce(state, QuizAction::Advance);
        assert!(state.completed);
        let state = reduce(state, QuizAction::Initialize(make_cards(5)));
        assert!(!state.completed);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.cards.len(), 5);
    }

    #[test]
    fn test_advance_on_empty_deck_completes() {
        let state = reduce(QuizState::empty(), QuizAction::Advance);
        assert!(state.completed);
    }

    #[test]
    fn test_full_walkthrough() {
        let mut state = QuizState::new(make_cards(10));
        for i in 0..10 {
            assert_eq!(state.current_index, i);
            assert!(!state.completed);
            state = reduce(state, QuizAction::Flip);
            assert!(state.is_flipped);
            state = reduce(state, QuizAction::Advance);
        }
        assert!(state.completed);
        assert_eq!(state.cards.len(), 10);
    }
}
