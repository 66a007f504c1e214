//! End-to-end merge scenarios against on-disk config files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use flagconfig::{
    Flag, FlagConfigError, FlagSet, Locator, ValueKind, load_from, load_path, load_with_override,
};

#[fixture]
fn server_flags() -> FlagSet {
    let mut flags = FlagSet::new("demo");
    flags
        .register(Flag::new("host", "localhost", "host to bind"))
        .expect("register host");
    flags
        .register(Flag::new("port", "8080", "port to listen on").with_kind(ValueKind::Integer))
        .expect("register port");
    flags
}

fn write_config(dir: &TempDir, contents: &str) -> Result<PathBuf> {
    let path = dir.path().join("demo.conf");
    std::fs::write(&path, contents).context("write config file")?;
    Ok(path)
}

#[rstest]
fn explicit_port_beats_config_while_host_comes_from_file(
    mut server_flags: FlagSet,
) -> Result<()> {
    let dir = TempDir::new().context("create tempdir")?;
    let path = write_config(&dir, "host=example.com\n")?;
    server_flags
        .set_explicit("port", "9090")
        .context("set port explicitly")?;

    load_path(&mut server_flags, &path).context("merge config")?;

    ensure!(
        server_flags.value("host") == Some("example.com"),
        "expected host from config file"
    );
    ensure!(
        server_flags.value("port") == Some("9090"),
        "expected explicit port to win over config"
    );
    Ok(())
}

#[rstest]
fn unregistered_key_aborts_the_merge(mut server_flags: FlagSet) -> Result<()> {
    let dir = TempDir::new().context("create tempdir")?;
    let path = write_config(&dir, "host=example.com\ntimeout=30\n")?;

    let err = load_path(&mut server_flags, &path).unwrap_err();
    match err {
        FlagConfigError::UnknownKey { key, value } => {
            ensure!(key == "timeout", "expected unknown key 'timeout', got {key}");
            ensure!(value == "30", "expected value '30', got {value}");
        }
        other => anyhow::bail!("expected UnknownKey, got {other:?}"),
    }
    Ok(())
}

#[rstest]
fn malformed_line_reports_file_and_line(mut server_flags: FlagSet) -> Result<()> {
    let dir = TempDir::new().context("create tempdir")?;
    let path = write_config(&dir, "# comment\nhost=a=b\n")?;

    let err = load_path(&mut server_flags, &path).unwrap_err();
    match err {
        FlagConfigError::MalformedLine {
            path: reported,
            line_number,
            line,
        } => {
            ensure!(reported == path, "expected offending path reported");
            ensure!(line_number == 2, "expected line 2, got {line_number}");
            ensure!(line == "host=a=b", "expected offending line text, got {line}");
        }
        other => anyhow::bail!("expected MalformedLine, got {other:?}"),
    }
    Ok(())
}

#[rstest]
fn value_rejected_by_flag_validation_names_the_flag(mut server_flags: FlagSet) -> Result<()> {
    let dir = TempDir::new().context("create tempdir")?;
    let path = write_config(&dir, "port=not-a-number\n")?;

    let err = load_path(&mut server_flags, &path).unwrap_err();
    match err {
        FlagConfigError::ValueRejected { flag, value, .. } => {
            ensure!(flag == "port", "expected flag 'port', got {flag}");
            ensure!(value == "not-a-number", "expected rejected value, got {value}");
        }
        other => anyhow::bail!("expected ValueRejected, got {other:?}"),
    }
    Ok(())
}

#[rstest]
fn no_readable_candidate_is_a_no_op(mut server_flags: FlagSet) -> Result<()> {
    let home = TempDir::new().context("create home dir")?;
    let system = TempDir::new().context("create system dir")?;
    let locator = Locator::new("demo")
        .home_dir(home.path())
        .system_dir(system.path());

    let used = load_from(&mut server_flags, &locator).context("merge config")?;

    ensure!(used.is_none(), "expected no config file to be used");
    ensure!(
        server_flags.value("host") == Some("localhost"),
        "expected host default untouched"
    );
    ensure!(
        server_flags.value("port") == Some("8080"),
        "expected port default untouched"
    );
    Ok(())
}

#[rstest]
fn discovered_file_is_merged_and_reported(mut server_flags: FlagSet) -> Result<()> {
    let home = TempDir::new().context("create home dir")?;
    let system = TempDir::new().context("create system dir")?;
    let config_dir = home.path().join(".config").join("demo");
    std::fs::create_dir_all(&config_dir).context("create config dir")?;
    let path = config_dir.join("config");
    std::fs::write(&path, "host=example.com\n").context("write config")?;

    let locator = Locator::new("demo")
        .home_dir(home.path())
        .system_dir(system.path());
    let used = load_from(&mut server_flags, &locator).context("merge config")?;

    ensure!(
        used.as_deref() == Some(path.as_path()),
        "expected discovered path reported, got {used:?}"
    );
    ensure!(
        server_flags.value("host") == Some("example.com"),
        "expected host from discovered file"
    );
    Ok(())
}

#[rstest]
fn unreadable_explicit_path_is_fatal(mut server_flags: FlagSet) -> Result<()> {
    let dir = TempDir::new().context("create tempdir")?;
    let missing = dir.path().join("absent.conf");

    let err = load_with_override(&mut server_flags, Some(Path::new(&missing))).unwrap_err();
    match err {
        FlagConfigError::File { path, .. } => {
            ensure!(path == missing, "expected missing path reported");
        }
        other => anyhow::bail!("expected File, got {other:?}"),
    }
    Ok(())
}
