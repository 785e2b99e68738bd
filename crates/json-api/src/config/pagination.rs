//! Pagination Config

use clap::Args;

/// Listing page size settings.
#[derive(Debug, Clone, Copy, Args)]
pub struct PaginationConfig {
    /// Page size used when the client does not pick one
    #[arg(long, env = "PAGE_SIZE", default_value_t = 10_u32)]
    pub page_size: u32,

    /// Largest page size a client may request
    #[arg(long, env = "MAX_PAGE_SIZE", default_value_t = 100_u32)]
    pub max_page_size: u32,
}
