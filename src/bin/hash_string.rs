use std::{env, process};

use xxh3_hex::Xxh3;

fn parse_seed(raw: &str) -> Option<u64> {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

fn main() {
    let mut args = env::args().skip(1).peekable();
    let mut seed = 0;

    if args.peek().map(String::as_str) == Some("--seed") {
        args.next();
        let raw = args.next().unwrap_or_default();

        seed = match parse_seed(&raw) {
            Some(seed) => seed,
            None => {
                eprintln!("invalid seed {raw:?}: expected a decimal or 0x-prefixed hex u64");
                process::exit(2);
            }
        };
    }

    let hasher = Xxh3::new().with_seed(seed);

    for arg in args {
        println!("{}   {}", hasher.hash_hex(arg.as_bytes()), arg);
    }
}
