pub mod modal;
pub mod navigation;
pub mod statusbar;
pub mod widgets;
