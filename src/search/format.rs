//! Display formatting for lookup results

/// Reformat an ISO-8601 duration (`PT1H2M3S`) as `H:MM:SS`, or `M:SS`
/// when there is no hour component. Unparseable input yields an empty
/// string.
pub fn format_duration(duration: &str) -> String {
    let Some(rest) = duration.strip_prefix("PT") else {
        return String::new();
    };

    let mut hours: u64 = 0;
    let mut minutes: u64 = 0;
    let mut seconds: u64 = 0;
    let mut value: u64 = 0;
    let mut saw_digit = false;

    for ch in rest.chars() {
        match ch {
            '0'..='9' => {
                value = value * 10 + u64::from(ch as u8 - b'0');
                saw_digit = true;
            }
            'H' if saw_digit => {
                hours = value;
                value = 0;
                saw_digit = false;
            }
            'M' if saw_digit => {
                minutes = value;
                value = 0;
                saw_digit = false;
            }
            'S' if saw_digit => {
                seconds = value;
                value = 0;
                saw_digit = false;
            }
            _ => return String::new(),
        }
    }

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Reformat a raw view count with `K`/`M` suffixes at the thousand and
/// million thresholds, one decimal place.
pub fn format_view_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Extract the bare hostname from a URL, stripping any `www.` prefix.
/// Unparseable URLs yield `"Unknown"`.
pub fn host_from_url(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| host.trim_start_matches("www.").to_string())
            .unwrap_or_else(|| "Unknown".to_string()),
        Err(_) => "Unknown".to_string(),
    }
}
