//! Virtual disk sizes from guest configuration values.
//!
//! A disk entry of a guest configuration looks like
//! `local-lvm:vm-100-disk-0,cache=writeback,size=32G`. Only `size=` tokens
//! with a whole number and exactly one uppercase unit out of `K`, `M`, `G` and
//! `T` are counted. Anything else (`10X`, `10g`, `1.5G`, `512`) counts as zero
//! without an error, so a guest with an unusual size string simply reports
//! less allocated disk.

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;
pub const GIB: u64 = 1024 * MIB;
pub const TIB: u64 = 1024 * GIB;

/// Whether a configuration value refers to a disk volume (`vm-<id>-disk-<n>`).
pub fn is_disk_slot(value: &str) -> bool {
    value.match_indices("vm-").any(|(start, _)| {
        let rest = &value[start + 3..];
        let Some(rest) = strip_digits(rest) else {
            return false;
        };
        rest.strip_prefix("-disk-").and_then(strip_digits).is_some()
    })
}

/// Total bytes of all `size=` tokens in a comma separated configuration value.
pub fn disk_size_bytes(config_value: &str) -> u64 {
    config_value
        .split(',')
        .filter_map(parse_size_token)
        .fold(0, u64::saturating_add)
}

/// Bytes of one `size=<digits><unit>` token.
pub fn parse_size_token(token: &str) -> Option<u64> {
    let size = token.strip_prefix("size=")?;
    let unit = size.chars().last()?;
    let multiplier = match unit {
        'T' => TIB,
        'G' => GIB,
        'M' => MIB,
        'K' => KIB,
        _ => return None,
    };
    let digits = &size[..size.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok()?.checked_mul(multiplier)
}

/// Strips a non-empty run of leading ASCII digits.
fn strip_digits(s: &str) -> Option<&str> {
    let rest = s.trim_start_matches(|c: char| c.is_ascii_digit());
    (rest.len() < s.len()).then_some(rest)
}
