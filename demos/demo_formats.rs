//! Demonstrate the named formats and calendar helpers

use chrono::Utc;
use date_utils::{
    add_months, comment_date, convert_to_local_time, end_of_month, format, start_of_day,
    start_of_month, FormatSpec,
};

fn main() {
    let now = Utc::now();

    println!("=== Named Formats ===\n");
    for spec in FormatSpec::ALL {
        println!("{:<14} {:<26} {}", spec.name(), spec.pattern(), format(&now, spec));
    }

    println!("\n=== Calendar ===\n");
    match (start_of_month(&now), end_of_month(&now)) {
        (Some(start), Some(end)) => {
            println!(
                "Month:        {} .. {}",
                format(&start, FormatSpec::DateAndTime),
                format(&end, FormatSpec::DateAndTime)
            );
        }
        _ => println!("Month:        (out of range)"),
    }
    if let Some(next) = add_months(&now, 1) {
        println!("Next month:   {}", format(&next, FormatSpec::DateShort));
    }
    println!("Start of day: {}", start_of_day(&now, FormatSpec::DateAndTime));
    println!("Comment date: {}", comment_date(&now));

    println!("\n=== Zones ===\n");
    for abbreviation in ["EST", "CET", "JST", "XYZ"] {
        match convert_to_local_time(&now, abbreviation) {
            Some(converted) => {
                println!("{:<4} {}", abbreviation, format(&converted, FormatSpec::Time24))
            }
            None => println!("{:<4} (unknown)", abbreviation),
        }
    }
}
