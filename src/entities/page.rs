/// Zero-based page window; page 0 starts at the first row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub per_page: i64,
}

impl Page {
    pub fn offset(&self) -> i64 {
        self.per_page * self.page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}
