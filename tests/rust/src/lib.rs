//! Shared test utilities and fixtures for McpCatalog integration tests.

pub use mcpcatalog_core::domain::{
    Entry, NewEntry, Parameter, ParameterScope, Transport, WorkspaceServer,
};

pub use mocks::MockRepositories;

/// Catalog fixtures modelled on real registry entries
pub mod fixtures {
    use super::*;
    use std::collections::HashMap;

    /// Stdio entry with an env token: `GITHUB_PERSONAL_ACCESS_TOKEN=<YOUR_TOKEN>`
    pub fn github() -> NewEntry {
        NewEntry::new(
            "github",
            Transport::stdio("npx", ["-y", "@modelcontextprotocol/server-github"])
                .with_env("GITHUB_PERSONAL_ACCESS_TOKEN", "<YOUR_TOKEN>"),
        )
        .with_title("GitHub")
        .with_homepage("https://github.com/modelcontextprotocol/servers")
    }

    /// Stdio entry whose env value is a JSON blob with an embedded token
    pub fn notion() -> NewEntry {
        NewEntry::new(
            "notion",
            Transport::stdio("npx", ["-y", "@notionhq/notion-mcp-server"]).with_env(
                "OPENAPI_MCP_HEADERS",
                r#"{"Authorization": "Bearer <notion-bearer-token>", "Notion-Version": "2022-06-28"}"#,
            ),
        )
        .with_title("Notion")
    }

    /// Stdio entry with a bare uppercase token embedded in an option
    pub fn paddle() -> NewEntry {
        NewEntry::new(
            "paddle",
            Transport::stdio("npx", ["-y", "@paddle/paddle-mcp", "--api-key=PADDLE_API_KEY"]),
        )
        .with_title("Paddle Billing")
    }

    /// HTTP entry with hand-declared parameters
    pub fn linear() -> NewEntry {
        NewEntry::new(
            "linear",
            Transport::http("https://mcp.linear.app/sse")
                .with_header("Authorization", "Bearer <linear-api-key>"),
        )
        .with_title("Linear")
        .with_parameters(vec![Parameter::env("linear-api-key", "Personal API key")])
    }

    /// Stdio entry with no placeholders at all
    pub fn fetch() -> NewEntry {
        NewEntry::new("fetch", Transport::stdio("uvx", ["mcp-server-fetch"])).with_title("Fetch")
    }

    pub fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Database test helpers
pub mod db {
    use mcpcatalog_storage::Database;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    const DB_FILE: &str = "mcpcatalog.db";

    /// A database in a temporary directory, removed on drop
    pub struct TestDatabase {
        pub db: Database,
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestDatabase {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db_path = temp_dir.path().join(DB_FILE);
            let db = Database::open(&db_path).expect("Failed to open test database");
            Self {
                db,
                db_path,
                _temp_dir: temp_dir,
            }
        }

        /// Create an in-memory database for fast tests
        pub fn in_memory() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db = Database::open_in_memory().expect("Failed to open in-memory database");
            Self {
                db,
                db_path: PathBuf::new(),
                _temp_dir: temp_dir,
            }
        }

        pub fn db_path(&self) -> &Path {
            &self.db_path
        }

        /// Shared handle as the repositories expect it
        pub fn shared(self) -> Arc<Mutex<Database>> {
            Arc::new(Mutex::new(self.db))
        }
    }

    impl Default for TestDatabase {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// Route tracing output through the test harness (`RUST_LOG=debug cargo test`)
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
