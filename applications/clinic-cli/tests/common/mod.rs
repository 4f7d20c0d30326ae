//! Common test utilities and fixtures
#![allow(dead_code)]

use clinic_cli::{open_store, App, ClinicConfig, Command, Credentials};
use clinic_storage::LocalClinicStore;
use tempfile::TempDir;

/// bcrypt cost for test databases
pub const TEST_COST: u32 = 4;

/// Seeded database in a temp directory plus the app driving it
pub struct TestApp {
    pub app: App<LocalClinicStore>,
    pub store: LocalClinicStore,
    pub config: ClinicConfig,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = ClinicConfig::default();
        config.storage.database_url =
            format!("sqlite://{}", temp_dir.path().join("clinic.db").display());
        config.auth.bcrypt_cost = TEST_COST;

        let store = open_store(&config).await.expect("Failed to open store");
        let app = App::new(store.clone(), TEST_COST);

        Self {
            app,
            store,
            config,
            _temp_dir: temp_dir,
        }
    }

    /// Run a command and return its text output
    pub async fn run(&self, command: Command) -> clinic_cli::Result<String> {
        let mut out = Vec::new();
        self.app.execute(command, &mut out).await?;
        Ok(String::from_utf8(out).expect("Output should be UTF-8"))
    }
}

/// Test user credentials
pub mod fixtures {
    use super::Credentials;

    pub fn admin() -> Credentials {
        Credentials {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }

    pub fn patient() -> Credentials {
        Credentials {
            username: "paciente1".to_string(),
            password: "pass123".to_string(),
        }
    }
}
