/// Offset pagination window handed to storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    pub limit: u64,
    pub skip: u64,
}

impl PaginationWindow {
    /// Window for a zero-based page index
    pub fn for_page(page: u32, page_size: u32) -> Self {
        Self {
            limit: u64::from(page_size),
            skip: u64::from(page) * u64::from(page_size),
        }
    }
}
