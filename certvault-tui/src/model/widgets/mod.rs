//! 通用交互控件
//!
//! 控件只持有自己的状态并提供按键处理，渲染在 `view::components::widgets` 中。

mod dialog;
mod form;
mod menu;
mod pager;
mod path_input;
mod spinner;
mod table;
mod text_area;
mod text_input;
mod text_view;
mod toast;

pub use dialog::{ConfirmDialog, DialogOutcome};
pub use form::{Field, FieldKind, Form, FormOutcome, Selector};
pub use menu::Menu;
pub use pager::Pager;
pub use path_input::PathInput;
pub use spinner::Spinner;
pub use table::Table;
pub use text_area::TextArea;
pub use text_input::TextInput;
pub use text_view::TextView;
pub use toast::{TOAST_DURATION, ToastKind, ToastState};
