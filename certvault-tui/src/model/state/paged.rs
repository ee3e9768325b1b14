use certvault_api::{AllSession, CaCert, LoginRecord, Page, SslCert, UserProfile};
use crossterm::event::{KeyCode, KeyEvent};

use crate::message::JobOutput;
use crate::model::widgets::{Pager, Table};

/// 可以从任务输出中取出一页的行类型
pub trait PageItem: Sized {
    fn from_output(output: JobOutput) -> Option<Page<Self>>;
}

impl PageItem for CaCert {
    fn from_output(output: JobOutput) -> Option<Page<Self>> {
        match output {
            JobOutput::CaPage(page) => Some(page),
            _ => None,
        }
    }
}

impl PageItem for SslCert {
    fn from_output(output: JobOutput) -> Option<Page<Self>> {
        match output {
            JobOutput::SslPage(page) => Some(page),
            _ => None,
        }
    }
}

impl PageItem for UserProfile {
    fn from_output(output: JobOutput) -> Option<Page<Self>> {
        match output {
            JobOutput::UserPage(page) => Some(page),
            _ => None,
        }
    }
}

impl PageItem for LoginRecord {
    fn from_output(output: JobOutput) -> Option<Page<Self>> {
        match output {
            JobOutput::LoginRecords(page) => Some(page),
            _ => None,
        }
    }
}

impl PageItem for AllSession {
    fn from_output(output: JobOutput) -> Option<Page<Self>> {
        match output {
            JobOutput::Sessions(page) => Some(page),
            _ => None,
        }
    }
}

/// 分页表格：表格 + 分页游标 + 行内错误
#[derive(Debug)]
pub struct PagedList<T> {
    pub table: Table<T>,
    pub pager: Pager,
    pub error: Option<String>,
    /// 至少成功加载过一次
    pub loaded: bool,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            table: Table::new(),
            pager: Pager::default(),
            error: None,
            loaded: false,
        }
    }
}

impl<T: PageItem> PagedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&T> {
        self.table.selected()
    }

    /// 刷新与翻页按键 → 需要加载的页码
    pub fn paging_key(&self, key: &KeyEvent) -> Option<u32> {
        match key.code {
            KeyCode::Char('r') | KeyCode::F(5) => Some(self.pager.page),
            KeyCode::Char(']') | KeyCode::PageDown => self.pager.next_page(),
            KeyCode::Char('[') | KeyCode::PageUp => self.pager.prev_page(),
            _ => None,
        }
    }

    /// 应用一次成功的加载
    pub fn apply(&mut self, page: u32, output: JobOutput) {
        let Some(result) = T::from_output(output) else {
            self.error = Some("Unexpected response from server".to_string());
            return;
        };
        let moved = page != self.pager.page;
        self.pager.loaded(page, result.total);
        self.table.set_rows(result.list);
        if moved {
            self.table.first();
        }
        self.error = None;
        self.loaded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn page(n: usize, total: u64) -> JobOutput {
        JobOutput::UserPage(Page {
            total,
            list: (0..n)
                .map(|i| UserProfile {
                    username: format!("u{i}"),
                    ..UserProfile::default()
                })
                .collect(),
        })
    }

    #[test]
    fn paging_keys_respect_bounds() {
        let mut list: PagedList<UserProfile> = PagedList::new();
        let next = KeyEvent::new(KeyCode::Char(']'), KeyModifiers::NONE);
        let prev = KeyEvent::new(KeyCode::Char('['), KeyModifiers::NONE);
        let refresh = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);

        list.apply(1, page(20, 25));
        assert_eq!(list.paging_key(&next), Some(2));
        assert_eq!(list.paging_key(&prev), None);
        assert_eq!(list.paging_key(&refresh), Some(1));

        list.apply(2, page(5, 25));
        assert_eq!(list.paging_key(&next), None);
        assert_eq!(list.paging_key(&prev), Some(1));
        assert_eq!(list.table.cursor(), 0);
    }

    #[test]
    fn wrong_output_sets_error() {
        let mut list: PagedList<UserProfile> = PagedList::new();
        list.apply(1, JobOutput::Done);
        assert!(list.error.is_some());
        assert!(!list.loaded);
    }
}
