use std::str::FromStr;
use std::time::Duration;

/// Durations such as `30s`, `1m30s` or `2h`. A bare number is seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if !current_number.is_empty() {
                let num = parse_number(&current_number)?;
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(too_long)?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        if !current_number.is_empty() {
            let num = parse_number(&current_number)?;
            total_seconds = total_seconds.checked_add(num).ok_or_else(too_long)?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be at least one second".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

fn parse_number(digits: &str) -> Result<u64, String> {
    digits.parse::<u64>().map_err(|_| too_long())
}

fn too_long() -> String {
    "Duration is too long".to_string()
}
