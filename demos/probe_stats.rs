use clap::Parser;
use clap::builder::RangedU64ValueParser;
use probe_map::ByteMap;
use probe_map::TableConfig;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    #[arg(short = 'p', long = "max_probe_length", default_value_t = 16, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    max_probe_length: usize,

    /// Share of the filled keys to remove again, in percent
    #[arg(short = 'r', long = "remove_percent", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    remove_percent: u8,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating ByteMap with target capacity: {}",
        args.target_capacity
    );

    let config = TableConfig::new()
        .with_initial_capacity(args.target_capacity)
        .with_max_probe_length(args.max_probe_length);
    let mut map: ByteMap<u64> = ByteMap::with_config(config);
    let initial_capacity = map.capacity();

    println!("Actual capacity: {initial_capacity}");
    println!("Filling map up to its load threshold...");

    let num_values = initial_capacity * usize::from(config.max_load_percent()) / 100;
    let mut num_failures = 0;
    for i in 0..num_values {
        let value = i as u64;
        if map.put(format!("key_{value:016X}"), value).is_err() {
            num_failures += 1;
        }
    }

    let num_removed = num_values * usize::from(args.remove_percent) / 100;
    for i in 0..num_removed {
        map.remove(format!("key_{:016X}", i as u64));
    }

    println!("Inserted {} values into map", num_values - num_failures);
    println!("Removed {num_removed} values, leaving {} tombstones", map.tombstones());
    if map.capacity() != initial_capacity {
        println!("Map grew to {} slots", map.capacity());
    }

    println!("Displacement histogram:");
    let hist = map.probe_histogram();
    let last = hist.len() - 1;
    for (distance, count) in hist.iter().enumerate() {
        let label = if distance == last {
            format!("{distance}+")
        } else {
            distance.to_string()
        };
        println!("  {label:>4}: {count}");
    }

    map.debug_stats().print();
    println!(
        "Number of failed puts: {} ({:.02}%)",
        num_failures,
        num_failures as f64 / num_values.max(1) as f64 * 100.0
    );
}
