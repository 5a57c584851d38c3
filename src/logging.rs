use std::fs::File;
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger.
///
/// The game owns the terminal while it runs, so records only reach stderr
/// at `warn` and above unless a `log_file` is given. With a file, `verbose`
/// selects debug output and info is the default. `RUST_LOG` always wins.
pub fn init(verbose: bool, log_file: Option<&Path>) -> io::Result<()> {
    let level = match (log_file.is_some(), verbose) {
        (_, true) => LevelFilter::Debug,
        (true, false) => LevelFilter::Info,
        (false, false) => LevelFilter::Warn,
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    if let Some(path) = log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
    Ok(())
}
