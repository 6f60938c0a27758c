#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str, u16)| {
    let (base, rule, offset) = data;
    let now = jiff::civil::date(2000, 1, 1)
        .checked_add(jiff::Span::new().days(i64::from(offset)))
        .expect("offset stays in range");
    if let Ok(next) = nextdate::next_date(now, base, rule) {
        let parsed = nextdate::date::parse_date(&next).expect("output must be a valid date");
        assert!(parsed > now, "{next} is not after {now}");
    }
});
