//! 证书/私钥导出到本地文件
//!
//! - 支持绝对路径、相对路径与 `~` 前缀
//! - 自动创建缺失的父目录
//! - 已存在的文件直接覆盖
//! - 私钥文件权限 0600（unix）

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::util::path::expand_home;

/// 把用户输入解析为绝对路径
pub fn resolve_path(input: &str) -> io::Result<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "path is empty"));
    }
    let path = PathBuf::from(expand_home(input));
    Ok(std::path::absolute(&path).unwrap_or(path))
}

/// 写入导出内容，返回实际写入的路径
pub async fn write_export(input: &str, content: &str, private: bool) -> io::Result<PathBuf> {
    let path = resolve_path(input)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    if private {
        options.mode(0o600);
    }
    let mut file = options.open(&path).await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;

    if private {
        restrict_permissions(&path).await?;
    }
    log::info!("exported {} bytes to {}", content.len(), path.display());
    Ok(path)
}

/// 已存在的文件不会因 `mode()` 改变权限，这里补一次
#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// 读取用户指定的本地文件（工具页与 CA 导入）
pub async fn read_input_file(input: &str) -> io::Result<String> {
    let path = resolve_path(input)?;
    fs::read_to_string(&path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c/cert.pem");
        let written = tokio_test::block_on(write_export(
            target.to_str().unwrap(),
            "-----BEGIN CERTIFICATE-----\nX\n",
            false,
        ))
        .unwrap();
        assert_eq!(written, target);
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "-----BEGIN CERTIFICATE-----\nX\n"
        );
    }

    #[test]
    fn second_export_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cert.pem");
        let path = target.to_str().unwrap();
        tokio_test::block_on(write_export(path, "first content that is long", false)).unwrap();
        tokio_test::block_on(write_export(path, "X", false)).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "X");
    }

    #[test]
    fn empty_path_rejected() {
        let err = tokio_test::block_on(write_export("   ", "X", false)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[cfg(unix)]
    #[test]
    fn private_key_mode_is_0600() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("key.pem");
        std::fs::write(&target, "old").unwrap();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o644)).unwrap();

        tokio_test::block_on(write_export(target.to_str().unwrap(), "KEY", true)).unwrap();
        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn relative_paths_become_absolute() {
        let path = resolve_path("out/cert.pem").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("out/cert.pem"));
    }

    #[test]
    fn reads_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("in.pem");
        std::fs::write(&target, "PEM").unwrap();
        let text = tokio_test::block_on(read_input_file(target.to_str().unwrap())).unwrap();
        assert_eq!(text, "PEM");
    }
}
