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

use std::process::exit;
use std::sync::Arc;

use clap::Parser;
use flashmaster_core::Fallible;
use tokio::spawn;

use crate::cmd::drill::server::ServerConfig;
use crate::cmd::drill::server::start_server;
use crate::cmd::generate::generate_deck;
use crate::gemini::client::GeminiClient;
use crate::settings::Difficulty;
use crate::settings::Era;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill a freshly generated deck through a web interface.
    Drill {
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Which era to draw questions from.
        #[arg(long, default_value_t = Era::All)]
        era: Era,
        /// Which difficulty to generate questions at.
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Generate a deck and write it out as JSON.
    Generate {
        /// Which era to draw questions from.
        #[arg(long, default_value_t = Era::All)]
        era: Era,
        /// Which difficulty to generate questions at.
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            host,
            port,
            era,
            difficulty,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                host,
                port,
                era,
                difficulty,
            };
            start_server(config, Arc::new(GeminiClient::new())).await
        }
        Command::Generate {
            era,
            difficulty,
            output,
        } => generate_deck(&GeminiClient::new(), era, difficulty, output).await,
    }
}
