use certvault_api::Role;

use super::ViewId;

/// 侧边栏项 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItemId {
    View(ViewId),
    Logout,
}

/// 侧边栏项
#[derive(Debug, Clone)]
pub struct NavItem {
    pub id: NavItemId,
    pub label: &'static str,
    pub icon: &'static str,
}

impl NavItem {
    const fn view(id: ViewId, label: &'static str, icon: &'static str) -> Self {
        Self {
            id: NavItemId::View(id),
            label,
            icon,
        }
    }
}

/// 侧边栏状态
#[derive(Debug)]
pub struct NavigationState {
    /// 导航项列表（按角色过滤）
    pub items: Vec<NavItem>,
    /// 当前选中的索引
    pub selected: usize,
}

impl NavigationState {
    /// 按角色生成侧边栏
    pub fn for_role(role: u8) -> Self {
        let mut items = vec![
            NavItem::view(ViewId::Dashboard, "Dashboard", "⌂"),
            NavItem::view(ViewId::CaList, "My CAs", "◆"),
            NavItem::view(ViewId::CertList, "SSL Certificates", "●"),
            NavItem::view(ViewId::CertRequest, "Request Cert", "+"),
            NavItem::view(ViewId::Profile, "Profile", "@"),
            NavItem::view(ViewId::Sessions, "Sessions", "◎"),
            NavItem::view(ViewId::Tools, "Tools", "⚙"),
        ];
        if role >= Role::Admin.code() {
            items.push(NavItem::view(ViewId::Admin, "Admin", "★"));
        }
        if role >= Role::Superadmin.code() {
            items.push(NavItem::view(ViewId::Superadmin, "Superadmin", "♛"));
        }
        items.push(NavItem::view(ViewId::Settings, "Settings", "≡"));
        items.push(NavItem {
            id: NavItemId::Logout,
            label: "Logout",
            icon: "⏻",
        });
        Self { items, selected: 0 }
    }

    /// 选择上一项
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// 选择下一项
    pub fn select_next(&mut self) {
        if self.selected < self.items.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// 获取当前选中的导航项 ID
    pub fn current_id(&self) -> Option<NavItemId> {
        self.items.get(self.selected).map(|item| item.id)
    }

    /// 让侧边栏选中项跟随当前视图；不在侧边栏中的视图保持原选中项
    pub fn select_view(&mut self, id: ViewId) {
        if let Some(index) = self
            .items
            .iter()
            .position(|item| item.id == NavItemId::View(id))
        {
            self.selected = index;
        }
    }

    /// 是否包含某个视图
    #[cfg(test)]
    pub fn contains(&self, id: ViewId) -> bool {
        self.items.iter().any(|item| item.id == NavItemId::View(id))
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::for_role(Role::User.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_follow_role() {
        let user = NavigationState::for_role(1);
        assert!(!user.contains(ViewId::Admin));
        assert!(!user.contains(ViewId::Superadmin));

        let admin = NavigationState::for_role(2);
        assert!(admin.contains(ViewId::Admin));
        assert!(!admin.contains(ViewId::Superadmin));

        let root = NavigationState::for_role(3);
        assert!(root.contains(ViewId::Superadmin));
        assert_eq!(root.items.last().map(|i| i.id), Some(NavItemId::Logout));
    }

    #[test]
    fn selection_is_bounded() {
        let mut nav = NavigationState::for_role(1);
        nav.select_previous();
        assert_eq!(nav.selected, 0);
        for _ in 0..50 {
            nav.select_next();
        }
        assert_eq!(nav.current_id(), Some(NavItemId::Logout));
    }
}
