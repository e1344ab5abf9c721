use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Count occurrences and return the `n` most frequent values.
///
/// Equal counts keep the order in which values were first seen, so the result
/// is deterministic for a given table.
pub fn top_counts<K, I>(values: I, n: usize) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut counts = value_counts(values);
    counts.truncate(n);
    counts
}

/// All distinct values with their counts, most frequent first.
pub fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for value in values {
        match index.get(&value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Round to two decimal places, ties to even on the exact binary value.
///
/// `3.125` is exactly representable and becomes `3.12`; `2.675` is stored as
/// `2.67499999...` and becomes `2.67`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.abs().to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };
    if exponent >= 0 {
        // already an integer
        return value;
    }

    // |value| * 100 == scaled / 2^shift exactly
    let scaled = u128::from(mantissa) * 100;
    let shift = exponent.unsigned_abs();
    let hundredths = if shift >= 128 {
        0
    } else {
        let floor = scaled >> shift;
        let remainder = scaled & ((1u128 << shift) - 1);
        match remainder.cmp(&(1u128 << (shift - 1))) {
            Ordering::Less => floor,
            Ordering::Greater => floor + 1,
            Ordering::Equal => floor + (floor & 1),
        }
    };

    (hundredths as f64 / 100.0).copysign(value)
}

/// `part / whole` as a percentage with two decimals; 0.0 when `whole` is zero.
pub fn calculate_win_percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

pub fn pluralize_trophy(count: usize) -> &'static str {
    if count == 1 {
        "trophy"
    } else {
        "trophies"
    }
}

/// Horizontal bar for terminal output, scaled against `max`.
pub fn text_bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let len = ((value as f64 / max as f64) * width as f64).round().max(1.0) as usize;
    "█".repeat(len.min(width))
}

/// Validate team name format
pub fn validate_team_name(name: &str) -> bool {
    !name.trim().is_empty() && name.len() <= 100
}
