use rand::Rng;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 5;

/// Source of the randomized values in synthesized results and usage stats.
pub trait RandomSource: Send + Sync {
    /// `FS` followed by lowercase alphanumerics.
    fn result_id(&self) -> String;
    /// In `[0.7, 1.0]`.
    fn confidence_score(&self) -> f64;
    /// In `[5.0, 15.0)`.
    fn processing_seconds(&self) -> f64;
    /// In `[1, 50]`.
    fn processed_today(&self) -> u32;
    /// In `[1, 40]`.
    fn successful_swaps(&self) -> u32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn result_id(&self) -> String {
        let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
        let mut rng = rand::rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| BASE36_DIGITS[rng.random_range(0..BASE36_DIGITS.len())] as char)
            .collect();
        format!("FS{}{}", to_base36(millis), suffix)
    }

    fn confidence_score(&self) -> f64 {
        rand::rng().random_range(0.7..=1.0)
    }

    fn processing_seconds(&self) -> f64 {
        rand::rng().random_range(5.0..15.0)
    }

    fn processed_today(&self) -> u32 {
        rand::rng().random_range(1..=50)
    }

    fn successful_swaps(&self) -> u32 {
        rand::rng().random_range(1..=40)
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
