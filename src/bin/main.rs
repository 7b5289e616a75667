use probe_table::demo::{self, RandomReport};
use probe_table::options::{DemoOptions, Mode};
use std::{env, io, process};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;

fn install_tracing(options: &DemoOptions) -> Option<tracing_chrome::FlushGuard> {
    let level = LevelFilter::from_level(options.verbosity);
    if options.chrome {
        let (chrome, guard) = tracing_chrome::ChromeLayerBuilder::new().build();
        tracing_subscriber::registry()
            .with(chrome)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_filter(level),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(level)
            .init();
        None
    }
}

fn replay(scenario: &demo::Scenario) -> Result<(), String> {
    println!("{scenario}");
    let result = demo::run_scenario(scenario);
    let lines = match &result {
        Ok((_, lines)) => lines,
        Err((_, lines)) => lines,
    };
    for line in lines {
        println!("{line}");
    }
    println!();
    println!();
    result.map(|_| ()).map_err(|(e, _)| e.to_string())
}

fn random(options: &DemoOptions) -> Result<(), String> {
    println!(
        "Random:\nInserting {} seeded keys into {} slots using {}",
        options.attempts, options.capacity, options.strategy
    );
    let (table, report): (_, RandomReport) = demo::run_random(
        options.capacity,
        options.strategy,
        options.seed,
        options.attempts,
    )
    .map_err(|e| e.to_string())?;
    println!("{table}");
    println!("{report}");
    table.print_stats();
    if report.lost.is_empty() && report.resurrected.is_empty() {
        Ok(())
    } else {
        Err(format!("Inconsistent table after random run"))
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match DemoOptions::from_args(args.iter().map(String::as_str)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };
    let _guard = install_tracing(&options);

    let result = match &options.mode {
        Mode::All => demo::SCENARIOS.into_iter().try_for_each(replay),
        Mode::Scenario(name) => match demo::scenario(name) {
            Some(scenario) => replay(scenario),
            None => Err(format!("No such scenario: {name}")),
        },
        Mode::Random => random(&options),
    };
    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
    Ok(())
}
