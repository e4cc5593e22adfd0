//! Entity implementation

use slotmap::Key;
use std::fmt;

slotmap::new_key_type! {
    /// Entity handle
    ///
    /// A generational slot key: a destroyed entity's slot is reused, but the
    /// old handle stays invalid because the slot's version moves on.
    pub struct Entity;
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({:?})", self.data())
    }
}
