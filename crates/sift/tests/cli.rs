//! CLI integration tests for sift commands.
//!
//! These tests focus on exit codes and key output lines rather than exact
//! formatting.

// Integration tests live outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to run `sift` with HOME isolated to the provided directory.
fn sift_with_home(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sift").unwrap();
    cmd.env("HOME", home);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(home);
    cmd
}

/// Writes a root `.sift.toml` defining TRIP into `dir`.
fn write_trip_config(dir: &Path) {
    fs::write(
        dir.join(".sift.toml"),
        "root = true\n\n[[field]]\nlabel = \"TRIP\"\ntoken = \"trip:[0-9]+\"\n",
    )
    .unwrap();
}

/// Writes a non-root `.sift.toml` defining TRIP into `dir`.
fn write_trip_config_without_root(dir: &Path) {
    fs::write(
        dir.join(".sift.toml"),
        "[[field]]\nlabel = \"TRIP\"\ntoken = \"trip:[0-9]+\"\n",
    )
    .unwrap();
}

mod parse {
    use super::*;

    #[test]
    fn prints_query_with_field_from_flag() {
        let dir = temp_dir();

        sift_with_home(dir.path())
            .args(["parse", "-f", "TRIP=trip:[0-9]+", "Lukas AND -term AND trip:123"])
            .assert()
            .success()
            .stdout("Lukas AND -term AND trip:123\n");
    }

    #[test]
    fn shape_shows_field_filter() {
        let dir = temp_dir();

        sift_with_home(dir.path())
            .args([
                "parse",
                "--shape",
                "-f",
                "TRIP=trip:[0-9]+",
                "Lukas AND -term AND trip:123",
            ])
            .assert()
            .success()
            .stdout(
                "And(And(Term(Lukas), Not(Term(term))), FieldFilter(TRIP, \"trip:123\"))\n",
            );
    }

    #[test]
    fn uses_config_file_fields() {
        let dir = temp_dir();
        write_trip_config(dir.path());

        sift_with_home(dir.path())
            .args(["parse", "--shape", "trip:42"])
            .assert()
            .success()
            .stdout("FieldFilter(TRIP, \"trip:42\")\n");
    }

    #[test]
    fn no_config_ignores_config_file() {
        let dir = temp_dir();
        write_trip_config(dir.path());

        sift_with_home(dir.path())
            .args(["parse", "--no-config", "trip:42"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("query syntax error"));
    }

    #[test]
    fn tree_prints_outline() {
        let dir = temp_dir();

        sift_with_home(dir.path())
            .args(["parse", "--tree", "me OR him"])
            .assert()
            .success()
            .stdout("Or\n  Term(\"me\")\n  Term(\"him\")\n");
    }

    #[test]
    fn syntax_error_shows_caret() {
        let dir = temp_dir();

        sift_with_home(dir.path())
            .args(["parse", "(rust"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("query syntax error"))
            .stderr(predicate::str::contains("  (rust\n"))
            .stderr(predicate::str::contains("^"));
    }

    #[test]
    fn invalid_field_flag_fails() {
        let dir = temp_dir();

        sift_with_home(dir.path())
            .args(["parse", "-f", "TRIP=trip:[0-9", "rust"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error: invalid pattern for TRIP"));
    }

    #[test]
    fn field_flag_rejects_builtin_label() {
        let dir = temp_dir();

        sift_with_home(dir.path())
            .args(["parse", "-f", "WORD=x", "x"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(
                "error: invalid field 'WORD': label is a built-in token kind",
            ));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "root = true\n[[field]\n").unwrap();

        sift_with_home(dir.path())
            .args(["parse", "rust"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse config file"));
    }
}

mod tokens {
    use super::*;

    #[test]
    fn lists_tokens_and_end() {
        let dir = temp_dir();

        sift_with_home(dir.path())
            .args(["tokens", "-f", "TRIP=trip:[0-9]+", "Lukas AND trip:123"])
            .assert()
            .success()
            .stdout(predicate::str::contains("WORD       \"Lukas\""))
            .stdout(predicate::str::contains("WORD       \"AND\""))
            .stdout(predicate::str::contains("TRIP       \"trip:123\""))
            .stdout(predicate::str::ends_with("  18  END\n"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();

        sift_with_home(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        let content = fs::read_to_string(dir.path().join(".sift.toml")).unwrap();
        assert!(content.contains("[[field]]"));
    }

    #[test]
    fn fails_if_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "# existing\n").unwrap();

        sift_with_home(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "# existing\n").unwrap();

        sift_with_home(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let content = fs::read_to_string(dir.path().join(".sift.toml")).unwrap();
        assert_ne!(content, "# existing\n");
    }

    #[test]
    fn created_config_is_commented_out() {
        let dir = temp_dir();

        sift_with_home(dir.path()).arg("init").assert().success();

        sift_with_home(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("# no field patterns configured"));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_configured_fields() {
        let dir = temp_dir();
        write_trip_config(dir.path());

        sift_with_home(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains(".sift.toml"))
            .stdout(predicate::str::contains("label = \"TRIP\""));
    }

    #[test]
    fn marks_local_and_global_fields() {
        let home = temp_dir();
        fs::write(
            home.path().join(".sift.toml"),
            "[[field]]\nlabel = \"USER\"\ntoken = \"user:[a-z]+\"\n",
        )
        .unwrap();
        let project = home.path().join("project");
        fs::create_dir(&project).unwrap();
        write_trip_config_without_root(&project);

        sift_with_home(home.path())
            .current_dir(&project)
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("# TRIP (local)"))
            .stdout(predicate::str::contains("# USER (global)"));
    }

    #[test]
    fn reports_empty_configuration() {
        let dir = temp_dir();

        sift_with_home(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("# no field patterns configured"));
    }
}
