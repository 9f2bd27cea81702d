use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

pub fn init_logging() {
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(default_log_level())
        .parse_default_env()
        .init();
}

pub fn default_log_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

pub fn state_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("STATE_DIRECTORY") {
        PathBuf::from(dir)
    } else {
        PathBuf::from("/var/lib/gehome")
    }
}

/// Finds `file_name`: named by `env_var`, else in the current directory
/// if it exists there, else in the state directory.
pub fn locate(env_var: &str, file_name: &str) -> io::Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    Ok(resolve(std::env::var_os(env_var), &current_dir, file_name, state_dir()))
}

fn resolve(from_env: Option<OsString>, current_dir: &Path, file_name: &str, state_dir: PathBuf) -> PathBuf {
    if let Some(path) = from_env {
        return PathBuf::from(path);
    }

    let cwd_file = current_dir.join(file_name);
    if cwd_file.exists() {
        return cwd_file;
    }

    state_dir.join(file_name)
}
