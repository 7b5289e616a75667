use std::fmt;

/// Keys double as their own values.
pub type Key = u64;

// A slot moves Empty -> Occupied -> Tombstone -> Occupied -> ... and never
// returns to Empty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Key),
    Tombstone,
}

impl Slot {
    /// Whether an insert may claim this slot.
    pub fn is_open(&self) -> bool {
        matches!(self, Slot::Empty | Slot::Tombstone)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    pub fn key(&self) -> Option<Key> {
        match self {
            Slot::Occupied(k) => Some(*k),
            _ => None,
        }
    }

    pub fn holds(&self, key: Key) -> bool {
        self.key() == Some(key)
    }

    pub fn occupy(&mut self, key: Key) {
        debug_assert!(self.is_open(), "Tried to occupy a full slot: {self}");
        *self = Slot::Occupied(key);
    }

    pub fn bury(&mut self) {
        debug_assert!(
            self.key().is_some(),
            "Tried to tombstone an unoccupied slot: {self}"
        );
        *self = Slot::Tombstone;
    }
}

// Empty and tombstoned slots print the same; only probing can tell them apart.
impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Occupied(k) => write!(f, "{k}"),
            Slot::Empty | Slot::Tombstone => write!(f, "_"),
        }
    }
}
