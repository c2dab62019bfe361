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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use flashmaster_core::Flashcard;
use maud::Markup;
use maud::html;

use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;
use crate::gemini::GenerateError;
use crate::settings::Difficulty;
use crate::settings::Era;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let m = state.mutable.lock().unwrap();
    let body = if let Some(error) = &m.error {
        render_error(error)
    } else if m.finished {
        render_finished()
    } else if m.quiz.completed {
        render_completion(&m)
    } else if let Some(card) = m.quiz.current_card() {
        render_session(&m, card)
    } else {
        render_empty()
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

fn render_session(m: &MutableState, card: &Flashcard) -> Markup {
    let total = m.quiz.cards.len();
    let step = m.quiz.current_index + 1;
    let percent = (step * 100) / total;
    let progress_style = format!("width: {percent}%;");
    let card_controls = if m.quiz.is_flipped {
        html! {
            form action="/" method="post" {
                input id="flip" type="submit" name="action" value="Flip" title="Hide the answer. Shortcut: space.";
                input id="next" type="submit" name="action" value="Next" title="Go to the next card. Shortcut: enter.";
            }
        }
    } else {
        // Advancing is only offered once the answer has been revealed.
        html! {
            form action="/" method="post" {
                input id="flip" type="submit" name="action" value="Flip" title="Show the answer. Shortcut: space.";
            }
        }
    };
    html! {
        div.root {
            (header(m))
            div.progress {
                div.progress-label {
                    span.step { (step) " / " (total) }
                    span.difficulty { (m.difficulty.label()) " 난이도" }
                }
                div.progress-bar {
                    div.progress-fill style=(progress_style) {}
                }
            }
            div.card-container {
                div.card {
                    div.card-header {
                        h1 { (card.era) }
                    }
                    div.card-content {
                        div.question { (card.question) }
                        @if m.quiz.is_flipped {
                            div.answer { (card.answer) }
                            div.explanation { (card.explanation) }
                        }
                    }
                }
            }
            div.controls {
                (card_controls)
            }
        }
    }
}

fn render_completion(m: &MutableState) -> Markup {
    html! {
        div.finished {
            h1 { "학습 완료!" }
            h2 { "학습 요약" }
            div.stats {
                table {
                    tbody {
                        tr {
                            td.key { "시대" }
                            td.val { (m.era.label()) }
                        }
                        tr {
                            td.key { "난이도" }
                            td.val { (m.difficulty.label()) }
                        }
                        tr {
                            td.key { "풀이 수" }
                            td.val { (m.quiz.cards.len()) "개" }
                        }
                    }
                }
            }
            div.again-container {
                form action="/" method="post" {
                    input id="again" type="submit" name="action" value="Again" title="같은 조건으로 다시 풀기";
                }
            }
            (shutdown_form())
        }
    }
}

fn render_error(error: &GenerateError) -> Markup {
    let message = match error {
        GenerateError::Configuration => {
            "API 키가 설정되어 있지 않습니다. GEMINI_API_KEY 환경 변수를 설정한 뒤 다시 시도해주세요."
        }
        GenerateError::Generation(_) => {
            "문제를 가져오는데 실패했습니다. 네트워크와 API 키를 확인한 뒤 다시 시도해주세요."
        }
    };
    html! {
        div.error {
            h1 { "문제가 부서졌어요!" }
            p.message { (message) }
            form action="/" method="post" {
                input id="retry" type="submit" name="action" value="Retry" title="다시 연결 시도";
            }
        }
    }
}

fn render_finished() -> Markup {
    html! {
        div.finished {
            h1 { "세션을 종료했습니다." }
            (shutdown_form())
        }
    }
}

fn render_empty() -> Markup {
    html! {
        div.error {
            p.message { "표시할 카드가 없습니다." }
            form action="/" method="post" {
                input id="retry" type="submit" name="action" value="Retry";
            }
        }
    }
}

/// Era and difficulty selectors plus the end-session control. Changing
/// either selector regenerates the deck.
fn header(m: &MutableState) -> Markup {
    html! {
        div.header {
            form.settings action="/" method="post" {
                select name="era" {
                    @for era in Era::all() {
                        option value=(era) selected[era == m.era] { (era.label()) }
                    }
                }
                select name="difficulty" {
                    @for difficulty in Difficulty::all() {
                        option value=(difficulty) selected[difficulty == m.difficulty] {
                            (difficulty.label())
                        }
                    }
                }
                input type="submit" name="action" value="Apply";
            }
            form.header-action action="/" method="post" {
                input id="end" type="submit" name="action" value="End" title="End the session";
            }
        }
    }
}

fn shutdown_form() -> Markup {
    html! {
        div.shutdown-container {
            form action="/" method="post" {
                input #shutdown .shutdown-button type="submit" name="action" value="Shutdown" title="Shut down the server";
            }
        }
    }
}
