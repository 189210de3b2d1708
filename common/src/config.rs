use std::path::PathBuf;

/// Default number of catalog matches returned by a product search.
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

pub struct Config {
    /// Reduces terminal output.
    ///
    /// `1` drops headers, `2` also drops per-item details.
    pub quiet: u8,
    /// JSON file holding the product catalog.
    pub catalog: PathBuf,
    /// Directory receiving submitted orders.
    pub outbox: PathBuf,
    /// Maximum number of products returned by a search.
    pub search_limit: usize,
    /// Submits to an in-memory gateway instead of the outbox.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: 0,
            catalog: PathBuf::from("catalog.json"),
            outbox: PathBuf::from("outbox"),
            search_limit: DEFAULT_SEARCH_LIMIT,
            dry_run: false,
        }
    }
}
