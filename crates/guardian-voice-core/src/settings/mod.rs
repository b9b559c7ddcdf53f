mod keys;
mod store;
mod value;

pub use {
    store::{Settings, SettingsSource},
    value::SettingValue,
};
