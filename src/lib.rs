pub mod config;
pub mod error;
pub mod graphql;
pub mod host;
pub mod lists;
pub mod roster;
pub mod wheel;


mod app {
    use crate::config::WheelConfig;
    use crate::graphql::GraphQlClient;
    use crate::host::{shared_lines, TerminalConfirm, TerminalHost};
    use crate::lists::SpinListDirectory;
    use crate::roster::{create_name_store, NameListController};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::BufReader;
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("spinwheel_lib=info,spinwheel=info"));
        // Logs go to stderr so they don't interleave with the wheel output.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Starts the terminal wheel. The first argument, when given, is the id
    /// of a saved spin list; without one the names live only in memory.
    pub fn run() -> anyhow::Result<()> {
        init_tracing();

        let config = WheelConfig::load().with_list_id(std::env::args().nth(1));
        info!("Starting Lucky Spin against {}", config.graphql_endpoint);

        let runtime = tokio::runtime::Runtime::new()?;
        let result = runtime.block_on(async move {
            let lines = shared_lines(BufReader::new(tokio::io::stdin()));
            let store = create_name_store(&config);
            let controller = Arc::new(NameListController::new(
                store,
                Arc::new(TerminalConfirm::new(lines.clone())),
                config.reveal_duration(),
            ));
            let directory = SpinListDirectory::new(GraphQlClient::with_timeout(
                &config.graphql_endpoint,
                config.request_timeout(),
            ));

            TerminalHost::new(controller, directory, lines).run().await
        });
        // A pending stdin read must not keep the process alive.
        runtime.shutdown_timeout(Duration::from_millis(200));
        result
    }
}

pub use app::run;
