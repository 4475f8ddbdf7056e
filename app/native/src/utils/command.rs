use std::env;
use std::path::{Path, PathBuf};

/// Resolve the absolute path to an executable binary.
///
/// This helper first checks if the provided command name is already an absolute path.
/// If not, it searches for the executable in a priority-ordered list of directories:
/// 1. The current process `PATH`.
/// 2. A curated list of fallback directories where Linux users commonly install
///    tools (distribution prefixes, `~/.local/bin`, `~/.cargo/bin`).
///
/// The fallbacks matter when wkill is launched from a compositor keybinding,
/// whose environment often carries a minimal `PATH`.
///
/// # Arguments
///
/// * `binary` - The command name or path to locate.
///
/// # Errors
///
/// Returns a descriptive reason when the name is empty or no executable
/// with that name exists in any search directory.
pub fn resolve_binary(binary: &str) -> Result<PathBuf, String> {
    if binary.is_empty() {
        return Err("Binary name cannot be empty".to_string());
    }

    let candidate = Path::new(binary);
    if candidate.is_absolute() {
        return if is_executable(candidate) {
            Ok(candidate.to_path_buf())
        } else {
            Err(format!("Binary at {} is not executable", candidate.display()))
        };
    }

    search_paths()
        .into_iter()
        .filter(|directory| !directory.as_os_str().is_empty())
        .map(|directory| directory.join(binary))
        .find(|candidate_path| is_executable(candidate_path))
        .ok_or_else(|| format!("Unable to locate executable '{binary}' in known search paths"))
}

fn search_paths() -> Vec<PathBuf> {
    let mut search_paths = Vec::new();

    if let Some(path_var) = env::var_os("PATH") {
        search_paths.extend(env::split_paths(&path_var));
    }

    search_paths.extend([
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/usr/bin"),
        PathBuf::from("/bin"),
    ]);

    if let Some(home) = dirs::home_dir() {
        search_paths.push(home.join(".local/bin"));
        search_paths.push(home.join(".cargo/bin"));
    }

    search_paths
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .is_ok_and(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
}
