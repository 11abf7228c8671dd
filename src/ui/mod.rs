pub mod add_wizard;
pub mod components;
pub mod home;
pub mod update_wizard;
pub mod view;
