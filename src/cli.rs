use std::fs;
use std::path::Path;

use crate::aggregate::{FilterSelection, SalesAggregator};
use crate::config::AppConfig;
use crate::export::{write_pivot_csv, Measure};
use crate::ingest::{format_amount, format_number};
use crate::reference::ReferenceStore;
use crate::resolver::GeoResolver;
use crate::server;
use crate::sheet::read_rows;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Ingest,
    Resolve,
    Export,
    Reference,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("ingest") => Some(Command::Ingest),
        Some("resolve") => Some(Command::Resolve),
        Some("export") => Some(Command::Export),
        Some("reference") => Some(Command::Reference),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let config = AppConfig::from_env();
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(&config),
        Some(Command::Ingest) => handle_ingest(&config, args),
        Some(Command::Resolve) => handle_resolve(&config, args),
        Some(Command::Export) => handle_export(&config, args),
        Some(Command::Reference) => handle_reference(&config),
        None => {
            eprintln!("usage: sales-pivot <serve|ingest|resolve|export|reference>");
            2
        }
    }
}

fn handle_serve(config: &AppConfig) -> i32 {
    match server::run_server(config) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn load_reference(config: &AppConfig) -> Result<ReferenceStore, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("failed to start runtime: {err}"))?;
    Ok(runtime.block_on(ReferenceStore::load(
        &config.city_regions,
        &config.region_warehouses,
    )))
}

fn is_flag(arg: &str) -> bool {
    arg.starts_with("--")
}

/// Values following each occurrence of `flag`. A flag directly after it is
/// not taken as its value.
fn flag_values<'a>(args: &'a [String], flag: &str) -> Vec<&'a str> {
    args.windows(2)
        .filter(|pair| pair[0] == flag && !is_flag(&pair[1]))
        .map(|pair| pair[1].as_str())
        .collect()
}

fn positional(args: &[String]) -> Vec<&str> {
    let mut values = Vec::new();
    let mut skip_next = false;
    for arg in args.iter().skip(2) {
        if std::mem::take(&mut skip_next) && !is_flag(arg) {
            continue;
        }
        match arg.as_str() {
            "--product" | "--warehouse" => skip_next = true,
            flag if is_flag(flag) => {}
            value => values.push(value),
        }
    }
    values
}

fn ingest_file(config: &AppConfig, path: &Path) -> Result<SalesAggregator, String> {
    let reference = load_reference(config)?;
    let rows = read_rows(path).map_err(|err| err.to_string())?;
    let mut aggregator = SalesAggregator::new();
    match aggregator.ingest(&rows, &GeoResolver::new(&reference)) {
        Ok(report) => {
            for message in &report.messages {
                eprintln!("{message}");
            }
            Ok(aggregator)
        }
        Err(err) => Err(err.status().to_string()),
    }
}

fn handle_ingest(config: &AppConfig, args: &[String]) -> i32 {
    let Some(path) = positional(args).first().copied() else {
        eprintln!("usage: sales-pivot ingest <file> [--product P]... [--warehouse W]... [--json]");
        return 2;
    };
    let as_json = args.iter().any(|arg| arg == "--json");
    let selection = FilterSelection::all()
        .with_products(flag_values(args, "--product"))
        .with_warehouses(flag_values(args, "--warehouse"));

    let aggregator = match ingest_file(config, Path::new(path)) {
        Ok(aggregator) => aggregator,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let groups = aggregator.summary_by_warehouse(&selection);
    if as_json {
        match serde_json::to_string_pretty(&groups) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize summary: {err}");
                return 1;
            }
        }
    } else {
        println!("warehouse\tquantity\tamount");
        for group in &groups {
            println!(
                "{}\t{}\t{}",
                group.key,
                format_number(group.quantity),
                format_amount(group.amount)
            );
        }
    }

    0
}

fn handle_resolve(config: &AppConfig, args: &[String]) -> i32 {
    let cities = positional(args);
    if cities.is_empty() {
        eprintln!("usage: sales-pivot resolve <city>...");
        return 2;
    }
    let reference = match load_reference(config) {
        Ok(reference) => reference,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let resolver = GeoResolver::new(&reference);
    let resolutions: Vec<_> = cities.iter().map(|city| resolver.resolve(city)).collect();
    match serde_json::to_string_pretty(&resolutions) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize resolution: {err}");
            1
        }
    }
}

fn handle_export(config: &AppConfig, args: &[String]) -> i32 {
    let paths = positional(args);
    let (Some(input), Some(output)) = (paths.first(), paths.get(1)) else {
        eprintln!("usage: sales-pivot export <file> <out.csv> [--amount]");
        return 2;
    };
    let measure = if args.iter().any(|arg| arg == "--amount") {
        Measure::Amount
    } else {
        Measure::Quantity
    };
    let selection = FilterSelection::all()
        .with_products(flag_values(args, "--product"))
        .with_warehouses(flag_values(args, "--warehouse"));

    let aggregator = match ingest_file(config, Path::new(input)) {
        Ok(aggregator) => aggregator,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    let pivot = aggregator.pivot(&selection);

    let file = match fs::File::create(output) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("failed to create {output}: {err}");
            return 1;
        }
    };
    match write_pivot_csv(&pivot, file, measure) {
        Ok(()) => {
            println!(
                "wrote {} products x {} warehouses to {output}",
                pivot.products.len(),
                pivot.warehouses.len()
            );
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn handle_reference(config: &AppConfig) -> i32 {
    let reference = match load_reference(config) {
        Ok(reference) => reference,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    match serde_json::to_string_pretty(&reference.summary()) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize reference summary: {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{flag_values, parse_command, positional, Command};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(&args(&["bin", "ingest"])), Some(Command::Ingest));
        assert_eq!(parse_command(&args(&["bin", "reference"])), Some(Command::Reference));
        assert_eq!(parse_command(&args(&["bin", "simulate"])), None);
        assert_eq!(parse_command(&args(&["bin"])), None);
    }

    #[test]
    fn flags_repeat_and_are_excluded_from_positionals() {
        let argv = args(&[
            "bin", "ingest", "sales.csv", "--product", "Чай", "--json", "--product", "Кофе",
        ]);
        assert_eq!(flag_values(&argv, "--product"), vec!["Чай", "Кофе"]);
        assert_eq!(positional(&argv), vec!["sales.csv"]);
    }

    #[test]
    fn flag_without_value_does_not_swallow_the_next_flag() {
        let argv = args(&["bin", "ingest", "--product", "--json", "sales.csv"]);
        assert!(flag_values(&argv, "--product").is_empty());
        assert_eq!(positional(&argv), vec!["sales.csv"]);
        assert!(argv.iter().any(|arg| arg == "--json"));
    }
}
