//! Preference Storage Port
//!
//! Single durable key-value entry: the preferred wallet name, written on a
//! successful connect and removed on disconnect or a failed auto-reconnect.
//! The API is infallible on purpose - storage trouble degrades to "no
//! preference stored" and adapters log the underlying cause.

pub trait PreferenceStore: Send + Sync {
    /// Name of the previously connected wallet, if one is stored.
    fn load(&self) -> Option<String>;

    fn save(&self, wallet_name: &str);

    fn clear(&self);
}
