//! Basic nextdate API walkthrough: parse, evaluate, chain, display.

use jiff::civil::date;
use nextdate::task::{self, Completion};
use nextdate::Rule;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse a repeat rule
    let rule: Rule = "m -1,15 1,6".parse()?;
    println!("Parsed: {rule}");

    // Compute the next due date
    let now = date(2025, 6, 10);
    let base = date(2025, 1, 15);
    let next = rule.next_after(base, now)?;
    println!("Next after {now} from {base}: {next}");

    // Compute the next 5 due dates
    println!("\nNext 5 due dates:");
    for d in rule.next_n_after(base, now, 5)? {
        println!("  {}", nextdate::date::format_date(d));
    }

    // The string-level entry point
    let next = nextdate::next_date(now, "20250601", "w 1,5")?;
    println!("\nw 1,5 from 20250601: {next}");

    // Completing a repeating task moves it forward
    match task::complete(now, "20250609", "d 7")? {
        Completion::Reschedule(date) => println!("Rescheduled to {date}"),
        Completion::Remove => println!("Removed"),
    }

    // Display roundtrips through parsing
    let roundtripped: Rule = rule.to_string().parse()?;
    assert_eq!(rule, roundtripped);
    println!("\nRoundtrip: {roundtripped}");

    // Errors point at the offending token
    if let Err(e) = Rule::parse("m 1,32") {
        println!("\n{}", e.display_rich("m 1,32"));
    }

    Ok(())
}
