use std::env;
use std::path::Path;

/// Host environment facts included in the workspace summary
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub os_info: String,
    pub shell: String,
}

impl SystemInfo {
    /// Detects the current system environment and returns a `SystemInfo` struct.
    pub fn new() -> Self {
        let os_info_val = os_info::get();
        let os_info = format!(
            "{} {} {}",
            os_info_val.os_type(),
            os_info_val.version(),
            os_info_val.bitness()
        );

        SystemInfo {
            os_info,
            shell: detect_shell(),
        }
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_shell() -> String {
    let shell_path = if cfg!(target_os = "windows") {
        env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    };

    Path::new(&shell_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("sh")
        .to_string()
}
