use std::io;

use supportchat_api::HttpBackend;
use supportchat_client::ChatClient;

use crate::config::ClientConfig;
use crate::storage::FileSessionStore;
use crate::view::TerminalView;

/// Chat client wired to HTTP, the session file and the terminal
pub type TerminalClient = ChatClient<HttpBackend, FileSessionStore, TerminalView<io::Stdout>>;

pub fn build_client(config: &ClientConfig, auto_confirm: bool) -> TerminalClient {
    let backend = HttpBackend::new(&config.base_url);
    let store = FileSessionStore::new(config.session_file());
    ChatClient::new(backend, store, TerminalView::stdout(auto_confirm))
}

/// Initialize `env_logger`. `RUST_LOG` wins over the verbose flag.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    // A second init (e.g. from tests) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
