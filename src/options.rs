use tracing::Level;

use crate::probe::Strategy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    // Replay every fixed scenario
    All,
    Scenario(String),
    Random,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoOptions {
    pub mode: Mode,
    // Only used by the random mode
    pub strategy: Strategy,
    pub capacity: usize,
    pub seed: u64,
    pub attempts: usize,
    pub verbosity: Level,
    // Write a chrome://tracing file of the run
    pub chrome: bool,
}

const DEFAULT_CAPACITY: usize = 20;
const DEFAULT_SEED: u64 = 0x7ab1e;

impl Default for DemoOptions {
    fn default() -> DemoOptions {
        DemoOptions {
            mode: Mode::All,
            strategy: Strategy::DoubleHashing,
            capacity: DEFAULT_CAPACITY,
            seed: DEFAULT_SEED,
            attempts: DEFAULT_CAPACITY * 2,
            verbosity: Level::WARN,
            chrome: false,
        }
    }
}

impl DemoOptions {
    /// Options from `name=value` words, later words winning.
    pub fn from_args<'a>(args: impl IntoIterator<Item = &'a str>) -> Result<DemoOptions, String> {
        let mut options = DemoOptions::default();
        for arg in args {
            let (name, value) = match arg.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (arg, None),
            };
            options.set_option(name, value)?;
        }
        Ok(options)
    }

    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<String, String> {
        fn parse<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<T, String> {
            value
                .and_then(|v| v.parse().ok())
                .ok_or(format!("Bad argument for {name}"))
        }

        match name {
            "scenario" => {
                self.mode = match value {
                    Some("all") => Mode::All,
                    Some("random") => Mode::Random,
                    Some(other) => Mode::Scenario(other.to_string()),
                    None => return Err(format!("Bad argument for scenario")),
                };
            }
            "strategy" => self.strategy = parse(name, value)?,
            "capacity" => self.capacity = parse(name, value)?,
            "seed" => self.seed = parse(name, value)?,
            "attempts" => self.attempts = parse(name, value)?,
            "verbosity" => self.verbosity = parse(name, value)?,
            "chrome" => {
                self.chrome = match value {
                    None => true,
                    Some(_) => parse(name, value)?,
                }
            }
            _ => return Err(format!("No such Option: {name}")),
        }
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::options::*;

    #[test]
    fn defaults() {
        let options = DemoOptions::from_args([] as [&str; 0]).unwrap();
        assert_eq!(options, DemoOptions::default());
        assert_eq!(options.mode, Mode::All);
    }

    #[test]
    fn random_run() {
        let options = DemoOptions::from_args([
            "scenario=random",
            "strategy=linear",
            "capacity=31",
            "seed=5",
            "verbosity=trace",
            "chrome",
        ])
        .unwrap();
        assert_eq!(options.mode, Mode::Random);
        assert_eq!(options.strategy, Strategy::LinearProbing);
        assert_eq!(options.capacity, 31);
        assert_eq!(options.seed, 5);
        assert_eq!(options.verbosity, Level::TRACE);
        assert!(options.chrome);
    }

    #[test]
    fn named_scenario() {
        let options = DemoOptions::from_args(["scenario=2b"]).unwrap();
        assert_eq!(options.mode, Mode::Scenario(String::from("2b")));
    }

    #[test]
    fn bad_options() {
        assert_eq!(
            DemoOptions::from_args(["capacity=lots"]),
            Err(String::from("Bad argument for capacity"))
        );
        assert_eq!(
            DemoOptions::from_args(["strategy"]),
            Err(String::from("Bad argument for strategy"))
        );
        assert_eq!(
            DemoOptions::from_args(["speed=3"]),
            Err(String::from("No such Option: speed"))
        );
    }
}
