use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use url::Url;

use crate::runner::is_headed;

/// E2E Dashboard: triggers browser end-to-end test runs and tracks results.
#[derive(Parser, Debug, Clone)]
#[command(name = "e2e-dashboard")]
pub struct CliArgs {
    /// Dashboard HTTP port
    #[arg(long = "port", default_value_t = DEFAULT_DASHBOARD_PORT)]
    pub port: u16,

    /// Working directory for the test subprocess
    #[arg(short = 'p', long = "project-dir", default_value = ".")]
    pub project_dir: PathBuf,

    /// Test tool to launch
    #[arg(short = 'r', long = "runner", value_enum, default_value_t = RunnerKind::Dotnet)]
    pub runner: RunnerKind,

    /// Forward runs to another dashboard's /api/run-test instead of spawning locally
    #[arg(long = "remote-bridge")]
    pub remote_bridge: Option<Url>,

    /// Run the browser hidden (HEADED is not set on the subprocess)
    #[arg(long = "headless")]
    pub headless: bool,

    /// Directory holding the persistent key-value store
    #[arg(long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Key-value backend
    #[arg(long = "store", value_enum, default_value_t = StoreKind::Sqlite)]
    pub store: StoreKind,

    /// Also write logs to this file
    #[arg(short = 'l', long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunnerKind {
    /// `dotnet test` against the C# suite
    Dotnet,
    /// `npx playwright test` against the TypeScript suite
    Playwright,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Sqlite,
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub port: u16,
    pub project_dir: PathBuf,
    pub runner: RunnerKind,
    pub remote_bridge: Option<Url>,
    pub headed: bool,
    pub data_dir: PathBuf,
    pub store: StoreKind,
    pub log_file: Option<PathBuf>,
}

// Network
pub const DEFAULT_DASHBOARD_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

// Runner
pub const FAILURE_TAIL_LINES: usize = 10;
pub const RUN_TEST_PATH: &str = "/api/run-test";

// Storage keys
pub const ENVIRONMENTS_KEY: &str = "environments";
pub const DARK_MODE_KEY: &str = "darkMode";

// Result broadcast
pub const RESULT_CHANNEL_CAPACITY: usize = 64;

pub const DATA_DIR_NAME: &str = "e2e-dashboard";
pub const SQLITE_FILE_NAME: &str = "dashboard.db";
pub const JSON_STORE_FILE_NAME: &str = "dashboard-store.json";

impl DashboardConfig {
    pub fn from_args(args: CliArgs) -> Self {
        let headed_env = std::env::var("HEADED").ok();
        Self::from_args_with_headed(args, headed_env.as_deref())
    }

    /// Same as [`from_args`](Self::from_args) with the dashboard's own
    /// `HEADED` value passed in.
    pub fn from_args_with_headed(args: CliArgs, headed_env: Option<&str>) -> Self {
        let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
        let headed = resolve_headed(args.headless, headed_env);

        DashboardConfig {
            port: args.port,
            project_dir: args.project_dir,
            runner: args.runner,
            remote_bridge: args.remote_bridge,
            headed,
            data_dir,
            store: args.store,
            log_file: args.log_file,
        }
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(SQLITE_FILE_NAME)
    }

    pub fn json_store_path(&self) -> PathBuf {
        self.data_dir.join(JSON_STORE_FILE_NAME)
    }
}

/// Runs are headed unless `--headless`; `HEADED=1`/`true` overrides it.
pub fn resolve_headed(headless: bool, headed_env: Option<&str>) -> bool {
    !headless || is_headed(headed_env)
}

/// Platform local data dir, falling back to a dot-directory in the cwd.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", DATA_DIR_NAME)))
}
