use std::path::Path;
use std::process::Command;

/// Run `rustfmt` on a generated file.
///
/// `APIGEN_RUSTFMT_BIN` overrides the binary, which lets tests substitute a stub.
pub fn format_file(path: &Path) -> anyhow::Result<()> {
    let rustfmt_bin = std::env::var("APIGEN_RUSTFMT_BIN").unwrap_or_else(|_| "rustfmt".to_string());

    let status = Command::new(&rustfmt_bin)
        .arg("--edition")
        .arg("2021")
        .arg(path)
        .status()?;
    if !status.success() {
        anyhow::bail!("{rustfmt_bin} failed on {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::sync::{Mutex, OnceLock};

    // Serialize environment mutations to avoid test races
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn with_stub(exit_code: i32) -> anyhow::Result<()> {
        let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let stub = dir.path().join("rustfmt");
        fs::write(&stub, format!("#!/bin/sh\nexit {exit_code}\n")).unwrap();
        let mut perms = fs::metadata(&stub).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&stub, perms).unwrap();
        let target = dir.path().join("dispatch.rs");
        fs::write(&target, "fn main() {}\n").unwrap();

        let old_bin = std::env::var("APIGEN_RUSTFMT_BIN").ok();
        std::env::set_var("APIGEN_RUSTFMT_BIN", &stub);
        let res = format_file(&target);
        match old_bin {
            Some(v) => std::env::set_var("APIGEN_RUSTFMT_BIN", v),
            None => std::env::remove_var("APIGEN_RUSTFMT_BIN"),
        }
        res
    }

    #[test]
    fn test_format_file_success() {
        assert!(with_stub(0).is_ok());
    }

    #[test]
    fn test_format_file_failure() {
        assert!(with_stub(1).is_err());
    }
}
