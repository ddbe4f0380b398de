/// Format a byte count in human-readable form
/// Examples: "512 B", "1.5 KB", "2.0 MB"
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Format an amount in base units with a compact suffix
/// Examples: "950", "12.3K", "4.1M", "2.0G"
pub fn format_amount(units: u64) -> String {
    const K: u64 = 1_000;
    const M: u64 = 1_000_000;
    const G: u64 = 1_000_000_000;
    if units >= G {
        format!("{:.1}G", units as f64 / G as f64)
    } else if units >= M {
        format!("{:.1}M", units as f64 / M as f64)
    } else if units >= K {
        format!("{:.1}K", units as f64 / K as f64)
    } else {
        units.to_string()
    }
}

/// Shorten a hash to `head…tail` when it is longer than `max_len` characters
pub fn short_hash(hash: &str, max_len: usize) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= max_len || max_len < 3 {
        return hash.to_string();
    }
    let keep = max_len - 1;
    let head = keep.div_ceil(2);
    let tail = keep - head;
    let mut out: String = chars[..head].iter().collect();
    out.push('…');
    out.extend(&chars[chars.len() - tail..]);
    out
}
