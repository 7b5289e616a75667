use std::{cell::Cell, fmt};

use tracing::Level;

use crate::{
    error::TableError,
    probe::{ProbeSequence, Strategy},
    slot::{Key, Slot},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub accepted: usize,
    pub rejected: usize,
    pub hits: usize,
    pub misses: usize,
    pub removed: usize,
    // slots visited, over every operation
    pub probes: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table Stats: ")?;
        writeln!(f, "Hits: {}", self.hits)?;
        writeln!(f, "Misses: {}", self.misses)?;
        writeln!(
            f,
            "Hit Rate: {}",
            self.hits as f64 / (self.hits + self.misses) as f64
        )?;
        writeln!(f)?;
        writeln!(f, "Accepted: {}", self.accepted)?;
        writeln!(f, "Rejected: {}", self.rejected)?;
        writeln!(f, "Removed: {}", self.removed)?;
        write!(f, "Probes: {}", self.probes)
    }
}

/// A fixed size open addressing table of integers that are their own keys.
///
/// Removal leaves a tombstone so lookups keep walking past the freed slot; inserts may
/// reuse it. The table never grows, and the stats counters live in `Cell`s, so it is
/// `Send` but not `Sync`: share it behind a lock if you must.
#[derive(Debug)]
pub struct Table {
    slots: Box<[Slot]>,
    strategy: Strategy,
    stats: Cell<Stats>,
}

impl Table {
    pub fn new(capacity: usize, strategy: Strategy) -> Result<Table, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity);
        }
        Ok(Table {
            slots: vec![Slot::Empty; capacity].into_boxed_slice(),
            strategy,
            stats: Cell::new(Stats::default()),
        })
    }

    pub fn linear(capacity: usize) -> Result<Table, TableError> {
        Table::new(capacity, Strategy::LinearProbing)
    }

    pub fn double_hashing(capacity: usize) -> Result<Table, TableError> {
        Table::new(capacity, Strategy::DoubleHashing)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.key().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|s| s.is_tombstone()).count()
    }

    pub fn stats(&self) -> Stats {
        self.stats.get()
    }

    pub fn print_stats(&self) {
        println!("{}", self.stats());
    }

    fn record(&self, f: impl FnOnce(&mut Stats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }

    fn sequence(&self, key: Key) -> ProbeSequence {
        self.strategy.sequence(key, self.capacity())
    }

    /// The slots an insert of `key` would consider, in order, including revisits.
    pub fn probe_path(&self, key: Key) -> Vec<usize> {
        self.sequence(key).collect()
    }

    // First empty or tombstoned slot along the sequence.
    fn probe_for_insert(&self, key: Key) -> Result<usize, TableError> {
        let mut steps = 0;
        let found = self.sequence(key).find(|&pos| {
            steps += 1;
            self.slots[pos].is_open()
        });
        self.record(|s| s.probes += steps);
        found.ok_or(TableError::TableFull { key })
    }

    /// Position of the first slot holding `key`.
    ///
    /// Gives up at the first empty slot: an insert of `key` would have stopped there.
    /// Tombstones and other keys are walked past.
    pub fn locate(&self, key: Key) -> Result<usize, TableError> {
        let mut steps = 0;
        let mut result = Err(TableError::NotFound { key });
        for pos in self.sequence(key) {
            steps += 1;
            match self.slots[pos] {
                Slot::Empty => break,
                Slot::Occupied(k) if k == key => {
                    result = Ok(pos);
                    break;
                }
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        self.record(|s| s.probes += steps);
        result
    }

    /// Stores `key`, returning the slot it went into. Duplicates take another slot.
    #[tracing::instrument(skip(self), fields(strategy = %self.strategy))]
    pub fn insert(&mut self, key: Key) -> Result<usize, TableError> {
        let pos = match self.probe_for_insert(key) {
            Ok(pos) => pos,
            Err(e) => {
                tracing::event!(Level::DEBUG, name = "Table full", "key" = %key);
                self.record(|s| s.rejected += 1);
                return Err(e);
            }
        };
        if self.slots[pos].is_tombstone() {
            tracing::event!(Level::TRACE, name = "Reused tombstone", "pos" = %pos);
        }
        self.slots[pos].occupy(key);
        self.record(|s| s.accepted += 1);
        tracing::event!(Level::TRACE, name = "Inserted", "key" = %key, "pos" = %pos);
        Ok(pos)
    }

    pub fn search(&self, key: Key) -> Option<Key> {
        match self.locate(key) {
            Ok(_) => {
                self.record(|s| s.hits += 1);
                Some(key)
            }
            Err(_) => {
                self.record(|s| s.misses += 1);
                None
            }
        }
    }

    pub fn contains(&self, key: Key) -> bool {
        self.search(key).is_some()
    }

    /// Tombstones the first slot holding `key`. Removing an absent key does nothing.
    #[tracing::instrument(skip(self), fields(strategy = %self.strategy))]
    pub fn remove(&mut self, key: Key) -> Option<usize> {
        let pos = self.locate(key).ok()?;
        self.slots[pos].bury();
        self.record(|s| s.removed += 1);
        tracing::event!(Level::TRACE, name = "Removed", "key" = %key, "pos" = %pos);
        Some(pos)
    }

    /// Every slot in index order. `None` covers both empty and tombstoned slots.
    pub fn dump(&self) -> Vec<Option<Key>> {
        self.slots.iter().map(Slot::key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots.iter().enumerate()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.iter() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{slot}")?;
        }
        write!(f, "]")
    }
}
