use std::sync::Arc;

use crate::auth::UserDirectory;
use crate::core::AppConfig;
use crate::ollama::OllamaClient;
use crate::proxy::ChatProxy;
use crate::session::SessionStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub proxy: ChatProxy,
    pub users: Arc<UserDirectory>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(proxy: ChatProxy, users: UserDirectory) -> Self {
        let config = proxy.config().clone();
        Self {
            proxy,
            users: Arc::new(users),
            config,
        }
    }

    /// State wired to a real Ollama backend with a fresh session store.
    pub fn from_config(config: AppConfig) -> Self {
        let backend = OllamaClient::new(&config.ollama_api_url, config.request_timeout);
        let proxy = ChatProxy::new(config, SessionStore::new(), Arc::new(backend));
        Self::new(proxy, UserDirectory::with_demo_user())
    }
}
