use clap::Args;
use log::LevelFilter;

/// The verbosity flags of a tool. The quiet flag overrides all others,
/// otherwise the most detailed level that is given wins.
#[derive(Args, Debug, Default)]
pub struct VerbosityFlag {
    #[arg(short, long, global = true, help = "Only report errors")]
    quiet: bool,

    #[arg(short, long, global = true, help = "Report the progress of every stage")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Report the intermediate results")]
    debug: bool,

    #[arg(short, long, global = true, help = "Report every constructed state and fragment")]
    trace: bool,
}

impl VerbosityFlag {
    /// Returns the log level filter corresponding to the given verbosity flags,
    /// without flags only warnings and errors are shown.
    pub fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }

        [
            (self.trace, LevelFilter::Trace),
            (self.debug, LevelFilter::Debug),
            (self.verbose, LevelFilter::Info),
        ]
        .into_iter()
        .find_map(|(given, level)| given.then_some(level))
        .unwrap_or(LevelFilter::Warn)
    }
}
