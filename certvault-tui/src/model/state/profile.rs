use certvault_api::UserProfile;

use crate::model::widgets::{Field, Form, Spinner};

pub mod field {
    pub const DISPLAY_NAME: usize = 0;
    pub const EMAIL: usize = 1;
    pub const OLD_PASSWORD: usize = 2;
    pub const NEW_PASSWORD: usize = 3;
    pub const CONFIRM_PASSWORD: usize = 4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOp {
    Load,
    Save,
}

#[derive(Debug)]
pub struct ProfileState {
    pub user: UserProfile,
    pub form: Form,
    pub spinner: Spinner<ProfileOp>,
    pub error: Option<String>,
}

impl ProfileState {
    pub fn new(user: UserProfile) -> Self {
        let form = Self::form_for(&user);
        Self {
            user,
            form,
            spinner: Spinner::new(),
            error: None,
        }
    }

    pub fn form_for(user: &UserProfile) -> Form {
        Form::new(vec![
            Field::text("Display Name", user.display_name.clone()),
            Field::text("Email", user.email.clone()),
            Field::password("Old Password"),
            Field::password("New Password").placeholder("leave empty to keep"),
            Field::password("Confirm Password"),
        ])
    }
}
