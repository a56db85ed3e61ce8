//! Image Path Extraction
//!
//! Mục đích: Tách đường dẫn binary thực sự ra khỏi command line của service.
//!
//! Service ImagePath values come in several shapes: quoted paths with
//! arguments, bare paths, NT object paths (`\??\C:\...`), kernel driver
//! paths (`\SystemRoot\system32\drivers\...`) and env-var forms
//! (`%SystemRoot%\PSEXESVC.exe`). Extraction is total - any input,
//! including empty, yields a (possibly empty) path string.

use once_cell::sync::Lazy;
use regex::Regex;

/// Non-greedy match up to the first executable-extension token
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.+?\.(?:exe|sys|dll))(?:\s|$)").expect("image path regex"));

/// Env-var reference: %SystemRoot%, %ProgramData%, ...
static ENV_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%([^%]+)%").expect("env var regex"));

/// Extract the on-disk image path from a raw service command line
pub fn extract_image_path(command_line: &str) -> String {
    let cmd = command_line.trim();
    if cmd.is_empty() {
        return String::new();
    }

    let path = if let Some(rest) = cmd.strip_prefix('"') {
        // Quoted image path, arguments follow the closing quote
        match rest.find('"') {
            Some(end) => rest[..end].to_string(),
            None => rest.to_string(),
        }
    } else if let Some(caps) = IMAGE_RE.captures(cmd) {
        caps[1].to_string()
    } else {
        // No recognizable extension: first whitespace-delimited token
        cmd.split_whitespace().next().unwrap_or("").to_string()
    };

    normalize(&path)
}

/// Resolve NT prefixes and env-var references
fn normalize(path: &str) -> String {
    let path = path.strip_prefix(r"\??\").unwrap_or(path);

    // Driver ImagePath values are rooted at \SystemRoot\
    let path = if let Some(rest) = path.strip_prefix(r"\SystemRoot\") {
        match std::env::var("SystemRoot") {
            Ok(root) => format!(r"{}\{}", root, rest),
            Err(_) => path.to_string(),
        }
    } else {
        path.to_string()
    };

    ENV_VAR_RE
        .replace_all(&path, |caps: &regex::Captures| {
            // Unknown variables stay literal rather than erasing the path
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_path_with_arguments() {
        assert_eq!(
            extract_image_path(r#""C:\Program Files\Vendor\agent service.exe" -k run"#),
            r"C:\Program Files\Vendor\agent service.exe"
        );
    }

    #[test]
    fn test_bare_path() {
        assert_eq!(
            extract_image_path(r"C:\Windows\System32\svchost.exe"),
            r"C:\Windows\System32\svchost.exe"
        );
    }

    #[test]
    fn test_unquoted_path_with_arguments() {
        assert_eq!(
            extract_image_path(r"C:\Windows\System32\svchost.exe -k netsvcs"),
            r"C:\Windows\System32\svchost.exe"
        );
    }

    #[test]
    fn test_first_extension_token_wins() {
        assert_eq!(
            extract_image_path(r"C:\tools\loader.exe C:\payload\stage2.exe"),
            r"C:\tools\loader.exe"
        );
    }

    #[test]
    fn test_driver_sys_path() {
        assert_eq!(
            extract_image_path(r"\??\C:\Windows\System32\drivers\mimidrv.sys"),
            r"C:\Windows\System32\drivers\mimidrv.sys"
        );
    }

    #[test]
    fn test_no_extension_takes_first_token() {
        assert_eq!(extract_image_path("cmd /c whoami"), "cmd");
    }

    #[test]
    fn test_unknown_env_var_stays_literal() {
        assert_eq!(
            extract_image_path(r"%NotARealVariable12345%\svc.exe"),
            r"%NotARealVariable12345%\svc.exe"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_image_path(""), "");
        assert_eq!(extract_image_path("   "), "");
    }
}
