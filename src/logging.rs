//! Log setup.  The terminal belongs to the game while it's running, so log
//! messages go to a file instead.
use std::path::Path;

/// Send log messages to the file at `path`, appending to whatever is already
/// there.  The filter is taken from `RUST_LOG`, defaulting to `warn`.
///
/// # Errors
///
/// Returns `Err` if the file or its parent directories could not be created.
pub(crate) fn init(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file.into_parts().0)))
        .format_timestamp_millis()
        .init();
    Ok(())
}
