//! Door handler

use super::TriggerHandler;
use crate::config::TriggerConfig;
use crate::context::TriggerContext;
use crate::data::DoorTriggerData;
use tile_grid::GridEntity;

/// Does `entity` hold the key named by the second argument?
pub type KeyCheckCallback = Box<dyn Fn(&dyn GridEntity, &str) -> bool + Send + Sync>;
/// Take the named key from `entity`
pub type KeyRemovalCallback = Box<dyn Fn(&dyn GridEntity, &str) + Send + Sync>;
/// Show a message to the player
pub type MessageCallback = Box<dyn Fn(&str) + Send + Sync>;
/// The door opened; inspect the data to tell unlock-in-place from teleport
pub type DoorOpenCallback = Box<dyn Fn(&dyn GridEntity, &DoorTriggerData) + Send + Sync>;

/// Lock/key gate in front of a door-open callback.
///
/// Locked door without the key: show the locked message, stop. With the key:
/// consume it if configured, then open. Unlocked door: open. The open callback
/// always receives the full door data, destination or not.
pub struct DoorHandler {
    has_key: Option<KeyCheckCallback>,
    remove_key: Option<KeyRemovalCallback>,
    show_message: Option<MessageCallback>,
    on_open: Option<DoorOpenCallback>,
    default_locked_message: String,
}

impl DoorHandler {
    /// Create a door handler with no callbacks
    pub fn new() -> Self {
        Self {
            has_key: None,
            remove_key: None,
            show_message: None,
            on_open: None,
            default_locked_message: TriggerConfig::DEFAULT_LOCKED_MESSAGE.to_string(),
        }
    }

    /// Handler using the config's default locked message
    pub fn with_config(config: &TriggerConfig) -> Self {
        Self {
            default_locked_message: config.default_locked_message.clone(),
            ..Self::new()
        }
    }

    /// Set the key-possession check; without one, locked doors stay shut
    pub fn has_key<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn GridEntity, &str) -> bool + Send + Sync + 'static,
    {
        self.has_key = Some(Box::new(f));
        self
    }

    /// Set the key-removal callback used by `consume_key` doors
    pub fn remove_key<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn GridEntity, &str) + Send + Sync + 'static,
    {
        self.remove_key = Some(Box::new(f));
        self
    }

    /// Set the callback that displays the locked message
    pub fn show_message<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.show_message = Some(Box::new(f));
        self
    }

    /// Set the door-open callback
    pub fn on_open<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn GridEntity, &DoorTriggerData) + Send + Sync + 'static,
    {
        self.on_open = Some(Box::new(f));
        self
    }

    /// Message for doors without their own
    pub fn default_locked_message(&self) -> &str {
        &self.default_locked_message
    }

    fn entity_has_key(&self, entity: &dyn GridEntity, key: &str) -> bool {
        match &self.has_key {
            Some(check) => check(entity, key),
            None => {
                log::warn!("No key-check callback set; treating '{}' as missing", key);
                false
            }
        }
    }

    fn show_locked(&self, door: &DoorTriggerData) {
        let message = door.locked_message().unwrap_or(&self.default_locked_message);
        match &self.show_message {
            Some(show) => show(message),
            None => log::warn!("No message callback set; dropped \"{}\"", message),
        }
    }
}

impl Default for DoorHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerHandler for DoorHandler {
    fn handle(&self, ctx: &mut TriggerContext<'_>) {
        let Some(door) = ctx.data_as::<DoorTriggerData>() else {
            log::error!(
                "DoorHandler received {} data at {}",
                ctx.data.type_name(),
                ctx.coord
            );
            return;
        };
        let entity: &dyn GridEntity = &*ctx.entity;

        if door.locked() {
            if !self.entity_has_key(entity, door.required_key()) {
                log::debug!("Door at {} is locked; {} lacks '{}'", ctx.coord, entity.name(), door.required_key());
                self.show_locked(door);
                return;
            }

            if door.consume_key() {
                match &self.remove_key {
                    Some(remove) => remove(entity, door.required_key()),
                    None => log::warn!(
                        "Door at {} consumes '{}' but no key-removal callback is set",
                        ctx.coord,
                        door.required_key()
                    ),
                }
            }
            log::debug!("{} unlocked door at {} with '{}'", entity.name(), ctx.coord, door.required_key());
        }

        match &self.on_open {
            Some(on_open) => on_open(entity, door),
            None => log::warn!("Door at {} opened but no door-open callback is set", ctx.coord),
        }
    }
}

impl std::fmt::Debug for DoorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoorHandler")
            .field("has_key", &self.has_key.is_some())
            .field("remove_key", &self.remove_key.is_some())
            .field("show_message", &self.show_message.is_some())
            .field("on_open", &self.on_open.is_some())
            .field("default_locked_message", &self.default_locked_message)
            .finish()
    }
}
