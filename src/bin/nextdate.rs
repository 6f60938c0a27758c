use clap::Parser;
use jiff::tz::TimeZone;
use nextdate::date::{format_date, parse_date, today_in};
use nextdate::Rule;
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nextdate", about = "Next due date for a repeating task", version)]
struct Cli {
    /// Repeat rule (e.g., "d 7", "w 1,5", "m -1 1,6")
    rule: Option<String>,

    /// Current due date of the task (YYYYMMDD). Defaults to --now.
    #[arg(short, long)]
    date: Option<String>,

    /// Reference date (YYYYMMDD). Missing or unparsable means today.
    #[arg(long)]
    now: Option<String>,

    /// Time zone used to decide what "today" is
    #[arg(long, env = "NEXTDATE_TZ")]
    tz: Option<String>,

    /// Number of successive due dates to show
    #[arg(short, default_value = "1")]
    n: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate the rule without computing
    #[arg(long)]
    check: bool,

    /// Show the parsed rule as JSON
    #[arg(long)]
    parse: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_tz(name: Option<&str>) -> TimeZone {
    match name {
        Some(name) => match TimeZone::get(name) {
            Ok(tz) => tz,
            Err(e) => {
                eprintln!("error: invalid time zone '{name}': {e}");
                process::exit(1);
            }
        },
        None => TimeZone::system(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let input = match cli.rule {
        Some(ref rule) => rule.as_str(),
        None => {
            eprintln!("error: no repeat rule provided");
            process::exit(2);
        }
    };

    let rule = match Rule::parse(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e.display_rich(input));
            process::exit(1);
        }
    };

    if cli.check {
        println!("\u{2713} valid");
        process::exit(0);
    }

    if cli.parse {
        match serde_json::to_string_pretty(&rule) {
            Ok(json) => {
                println!("{json}");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    }

    let tz = resolve_tz(cli.tz.as_deref());
    let now = match cli.now.as_deref().map(parse_date) {
        Some(Ok(d)) => d,
        Some(Err(e)) => {
            warn!(error = %e, "ignoring --now, using today");
            today_in(&tz)
        }
        None => today_in(&tz),
    };

    let base = match cli.date.as_deref() {
        Some(s) => match parse_date(s) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        },
        None => now,
    };
    debug!(rule = %rule, base = %format_date(base), now = %format_date(now), "evaluating");

    let mut n = cli.n;
    if n > 1000 {
        eprintln!("warning: capped at 1000 occurrences");
        n = 1000;
    }

    let results = match rule.next_n_after(base, now, n as usize) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e.display_rich(input));
            process::exit(1);
        }
    };

    let dates: Vec<String> = results.into_iter().map(format_date).collect();
    if cli.json {
        match serde_json::to_string(&dates) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    } else {
        for d in &dates {
            println!("{d}");
        }
    }
}
