//! 路径工具

use std::path::MAIN_SEPARATOR;

/// 展开开头的 `~` 为用户主目录
///
/// 只处理 `~` 与 `~/...`；`~user` 形式原样返回。
pub fn expand_home(path: &str) -> String {
    let Some(rest) = path.strip_prefix('~') else {
        return path.to_string();
    };
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with(MAIN_SEPARATOR)) {
        return path.to_string();
    }
    match dirs::home_dir() {
        Some(home) => format!("{}{rest}", home.display()),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_unchanged() {
        assert_eq!(expand_home("/tmp/a.pem"), "/tmp/a.pem");
        assert_eq!(expand_home("certs/a.pem"), "certs/a.pem");
        assert_eq!(expand_home("~alice/a.pem"), "~alice/a.pem");
    }

    #[test]
    fn tilde_expands() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let home = home.display().to_string();
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~/a.pem"), format!("{home}/a.pem"));
    }
}
