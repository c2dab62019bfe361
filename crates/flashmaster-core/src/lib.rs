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

//! flashmaster-core: Core library for the flashmaster quiz tool.
//!
//! This library provides the I/O-free parts of flashmaster:
//! - The flashcard data model and response normalization
//! - Parsing the model's JSON response into cards
//! - The quiz session state machine, expressed as a reducer

pub mod error;
pub mod parser;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use parser::parse_cards;
pub use session::{QuizAction, QuizState, reduce};
pub use types::card::{Flashcard, RawFlashcard};
