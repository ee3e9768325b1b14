/// 顶层视图标识；任一时刻只有一个处于活动状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Login,
    Dashboard,
    CaList,
    CaDetail,
    CertList,
    CertDetail,
    CertRequest,
    Profile,
    Sessions,
    Tools,
    Admin,
    Superadmin,
    Settings,
}

impl ViewId {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::CaList => "My CAs",
            Self::CaDetail => "CA Detail",
            Self::CertList => "SSL Certificates",
            Self::CertDetail => "Certificate Detail",
            Self::CertRequest => "Request Certificate",
            Self::Profile => "Profile",
            Self::Sessions => "Sessions",
            Self::Tools => "Tools",
            Self::Admin => "Admin",
            Self::Superadmin => "Superadmin",
            Self::Settings => "Settings",
        }
    }

    /// esc 离开时回到上一个视图，而不是仪表盘
    pub fn returns_to_previous(self) -> bool {
        matches!(self, Self::CaDetail | Self::CertDetail | Self::CertRequest)
    }
}
