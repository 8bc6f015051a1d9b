use log::{info, trace};

/// Progress lines for one solve call.
///
/// With `verbose` the lines go out at `info`, otherwise at `trace`. They never affect results.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    verbose: bool,
}

impl Progress {
    pub fn new(verbose: bool) -> Self {
        Progress { verbose }
    }

    /// A top-level phase
    pub fn phase(&self, name: &str) {
        self.emit(name);
    }

    /// A step inside the current phase
    pub fn step(&self, name: &str) {
        self.emit(&format!("    {}", name));
    }

    fn emit(&self, line: &str) {
        if self.verbose {
            info!("{}", line);
        } else {
            trace!("{}", line);
        }
    }
}
