use certvault_api::PageRequest;

/// 列表默认每页条数
pub const PAGE_SIZE: u32 = 20;

/// 分页游标（页码从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(size: u32) -> Self {
        Self {
            page: 1,
            size: size.max(1),
            total: 0,
        }
    }

    pub fn request(&self, page: u32) -> PageRequest {
        PageRequest::new(page, self.size)
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.size) < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then_some(self.page + 1)
    }

    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev().then_some(self.page - 1)
    }

    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(u64::from(self.size)).max(1)
    }

    /// 记录一次成功的加载
    pub fn loaded(&mut self, page: u32, total: u64) {
        self.page = page.max(1);
        self.total = total;
    }

    pub fn label(&self) -> String {
        format!(
            "Page {}/{} · {} total",
            self.page,
            self.page_count(),
            self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_bounds() {
        let mut pager = Pager::new(20);
        assert_eq!(pager.next_page(), None);
        assert_eq!(pager.prev_page(), None);

        pager.loaded(1, 45);
        assert_eq!(pager.next_page(), Some(2));
        assert_eq!(pager.page_count(), 3);

        pager.loaded(3, 45);
        assert_eq!(pager.next_page(), None);
        assert_eq!(pager.prev_page(), Some(2));
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        let mut pager = Pager::new(20);
        pager.loaded(2, 40);
        assert!(!pager.has_next());
        assert_eq!(pager.label(), "Page 2/2 · 40 total");
    }
}
