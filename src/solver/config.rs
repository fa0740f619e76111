pub struct Config {
    /// Print a live progress table to stderr while searching.
    pub progress: bool,
}

impl Config {
    pub fn new(progress: bool) -> Self {
        Config { progress }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config { progress: false }
    }
}
