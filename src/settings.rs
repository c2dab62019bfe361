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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;

/// The historical period the generated questions are drawn from.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Era {
    /// The whole curriculum, prehistory through the present day.
    All,
    /// Prehistory through Joseon.
    PreModern,
    /// The port-opening period through the present day.
    Modern,
}

impl Era {
    pub fn all() -> [Era; 3] {
        [Era::All, Era::PreModern, Era::Modern]
    }

    /// The display label shown in the UI and stored on backfilled cards.
    pub fn label(self) -> &'static str {
        match self {
            Era::All => "전체",
            Era::PreModern => "전근대 (선사~조선)",
            Era::Modern => "근현대 (개항~현대)",
        }
    }

    /// The era description interpolated into the generation prompt. `All`
    /// spells out the full curriculum rather than the bare word "전체".
    pub fn context(self) -> &'static str {
        match self {
            Era::All => "한국사 전체 범위 (선사 시대~현대)",
            Era::PreModern => "전근대 (선사~조선)",
            Era::Modern => "근현대 (개항~현대)",
        }
    }

    /// Inverse of `Display`, for HTML form round-trips.
    pub fn from_param(s: &str) -> Option<Era> {
        match s {
            "all" => Some(Era::All),
            "pre-modern" => Some(Era::PreModern),
            "modern" => Some(Era::Modern),
            _ => None,
        }
    }
}

impl Display for Era {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Era::All => write!(f, "all"),
            Era::PreModern => write!(f, "pre-modern"),
            Era::Modern => write!(f, "modern"),
        }
    }
}

/// The requested question difficulty. Only affects the generation prompt.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Low, Difficulty::Medium, Difficulty::High]
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Low => "하",
            Difficulty::Medium => "중",
            Difficulty::High => "상",
        }
    }

    /// The natural-language difficulty instruction interpolated into the
    /// generation prompt.
    pub fn descriptor(self) -> &'static str {
        match self {
            Difficulty::Low => "누구나 알 법한 아주 기본적인 역사적 사실과 인물 위주로",
            Difficulty::Medium => "실제 수능 시험 수준의 표준적인 난이도로",
            Difficulty::High => {
                "지엽적인 사실이나 복합적인 흐름을 파악해야 하는 고난도 킬러 문항 수준으로"
            }
        }
    }

    /// Inverse of `Display`, for HTML form round-trips.
    pub fn from_param(s: &str) -> Option<Difficulty> {
        match s {
            "low" => Some(Difficulty::Low),
            "medium" => Some(Difficulty::Medium),
            "high" => Some(Difficulty::High),
            _ => None,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Low => write!(f, "low"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::High => write!(f, "high"),
        }
    }
}
