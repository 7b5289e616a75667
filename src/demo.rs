use std::fmt;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::Level;

use crate::{
    error::TableError,
    probe::Strategy,
    slot::Key,
    table::Table,
};

/// A fixed insertion sequence and the table it is replayed into.
pub struct Scenario {
    pub name: &'static str,
    pub strategy: Strategy,
    pub capacity: usize,
    pub keys: &'static [Key],
}

pub const PART_1: Scenario = Scenario {
    name: "Part 1",
    strategy: Strategy::LinearProbing,
    capacity: 10,
    keys: &[14, 17, 18, 3, 8, 1, 18, 11, 13, 20],
};

pub const PART_2A: Scenario = Scenario {
    name: "Part 2a",
    strategy: Strategy::LinearProbing,
    capacity: 10,
    keys: &[2, 12, 22, 32, 42, 52, 62, 72, 82, 92],
};

pub const PART_2B: Scenario = Scenario {
    name: "Part 2b",
    strategy: Strategy::DoubleHashing,
    capacity: 20,
    keys: &[
        2, 12, 22, 32, 42, 52, 62, 72, 82, 92, 14, 17, 18, 3, 8, 1, 18, 11, 13, 20,
    ],
};

pub const SCENARIOS: [&Scenario; 3] = [&PART_1, &PART_2A, &PART_2B];

pub fn scenario(name: &str) -> Option<&'static Scenario> {
    SCENARIOS
        .into_iter()
        .find(|s| s.name.eq_ignore_ascii_case(name) || s.name[5..].eq_ignore_ascii_case(name))
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(
            f,
            "{}:\nInserting in the order [{}] using {}",
            self.name,
            keys.join(","),
            self.strategy
        )
    }
}

/// Replays `scenario` into a fresh table, one `Step n: [...]` line per insert.
///
/// Stops at the first failed insert and hands back the lines written so far with it.
pub fn run_scenario(scenario: &Scenario) -> Result<(Table, Vec<String>), (TableError, Vec<String>)> {
    let mut table = match Table::new(scenario.capacity, scenario.strategy) {
        Ok(table) => table,
        Err(e) => return Err((e, vec![])),
    };
    let mut lines = Vec::with_capacity(scenario.keys.len());
    for (i, &k) in scenario.keys.iter().enumerate() {
        if let Err(e) = table.insert(k) {
            return Err((e, lines));
        }
        lines.push(format!("Step {}: {}", i + 1, table));
    }
    Ok((table, lines))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RandomReport {
    pub inserted: Vec<Key>,
    pub rejected: usize,
    pub removed: Vec<Key>,
    // removed keys that a later search still found
    pub resurrected: Vec<Key>,
    // inserted keys that a search couldn't find
    pub lost: Vec<Key>,
}

impl fmt::Display for RandomReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inserted: {}", self.inserted.len())?;
        writeln!(f, "Rejected: {}", self.rejected)?;
        writeln!(f, "Removed: {}", self.removed.len())?;
        writeln!(f, "Resurrected: {:?}", self.resurrected)?;
        write!(f, "Lost: {:?}", self.lost)
    }
}

/// Fills a table with seeded random distinct keys until `attempts` inserts have been
/// tried, removes every other one, then checks every key answers as it should.
pub fn run_random(
    capacity: usize,
    strategy: Strategy,
    seed: u64,
    attempts: usize,
) -> Result<(Table, RandomReport), TableError> {
    let mut table = Table::new(capacity, strategy)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = RandomReport::default();
    let key_space = (capacity as Key).saturating_mul(10).max(10);

    for _ in 0..attempts {
        let k = rng.gen_range(0..key_space);
        if report.inserted.contains(&k) {
            continue;
        }
        match table.insert(k) {
            Ok(_) => report.inserted.push(k),
            Err(TableError::TableFull { .. }) => report.rejected += 1,
            Err(e) => return Err(e),
        }
    }
    tracing::event!(Level::DEBUG, name = "Filled", "table" = %table);

    for (i, &k) in report.inserted.iter().enumerate() {
        if i % 2 == 0 && table.remove(k).is_some() {
            report.removed.push(k);
        }
    }
    for &k in &report.inserted {
        let found = table.contains(k);
        let removed = report.removed.contains(&k);
        if removed && found {
            report.resurrected.push(k);
        } else if !removed && !found {
            report.lost.push(k);
        }
    }
    Ok((table, report))
}
