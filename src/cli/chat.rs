use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::core::AppConfig;
use crate::ollama::OllamaClient;
use crate::proxy::{ChatProxy, ChatRequest};
use crate::session::SessionStore;

pub async fn run(session_id: Option<String>, config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let session_id = session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let backend = OllamaClient::new(&config.ollama_api_url, config.request_timeout);
    println!(
        "Chatting with {} at {} (session {})",
        config.model, config.ollama_api_url, session_id
    );
    let proxy = ChatProxy::new(config, SessionStore::new(), Arc::new(backend));

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                let request = ChatRequest {
                    session_id: session_id.clone(),
                    message: line,
                    model: None,
                };
                match proxy.handle_chat(request).await {
                    Ok(resp) => println!("{}", resp.response),
                    // Failed turns leave the session usable
                    Err(err) => println!("Error: {}", err.detail()),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
