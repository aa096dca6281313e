use anyhow::Result;
use tracing::{info, warn};

use super::key_value::KeyValueStore;

pub const USER_KEY: &str = "timetracker-user";
pub const DEFAULT_USER_NAME: &str = "Usuario";

/// Display name used in greetings. Falls back to [DEFAULT_USER_NAME] when nothing usable is
/// stored or the store can't be read.
pub fn load_user_name(store: &impl KeyValueStore) -> String {
    match store.get(USER_KEY) {
        Ok(Some(name)) if !name.trim().is_empty() => name.trim().to_owned(),
        Ok(_) => DEFAULT_USER_NAME.to_owned(),
        Err(e) => {
            warn!("Couldn't read user name, using default: {e:?}");
            DEFAULT_USER_NAME.to_owned()
        }
    }
}

/// Saving a blank name resets it to the default.
pub fn save_user_name(store: &mut impl KeyValueStore, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        info!("Resetting user name");
        store.remove(USER_KEY)
    } else {
        info!("Setting user name to {name}");
        store.set(USER_KEY, name)
    }
}
