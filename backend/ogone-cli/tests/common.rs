use std::path::{Path, PathBuf};

use ogone_cli::configs::Config;
use tempfile::TempDir;

/// Fixture answers shipped with the connector crate.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../connector-integration/fixtures/ogone")
}

/// Writes a test account configuration answering from the shipped fixtures.
///
/// # Panics
///
/// Will panic if the configuration file cannot be written or loaded
#[allow(clippy::unwrap_used)]
pub fn load_test_config() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.toml");
    std::fs::write(
        &path,
        format!(
            r#"
[common]
environment = "development"

[log.console]
enabled = false

[connectors.ogone]
base_url = "https://secure.ogone.com/ncol/"
debug = true
hash_algorithm = "sha1"
fixtures_dir = "{}"

[auth]
pspid = "foobar"
api_user = "api_user"
api_password = "api_password"
sha_in = "Mysecretsig1875!?"
sha_out = "out-secret"
"#,
            fixtures_dir().display()
        ),
    )
    .unwrap();

    let config = Config::new_with_config_path(Some(path)).unwrap();
    (dir, config)
}
