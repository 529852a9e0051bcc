//! Normalize command implementation.

use stateparity_canonical::normalize_str;

pub fn run(values: &[String]) {
    for value in values {
        println!("{} => {}", value, normalize_str(value));
    }
}
