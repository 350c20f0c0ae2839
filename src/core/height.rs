/// Convert a `feet'inches"` height string (e.g. `5'9"`) to total inches.
///
/// Anything that does not parse maps to 0. Profiles come from free-form
/// admin input, so a malformed height is treated as "no height" rather
/// than an error; 0 inches can never satisfy the compatibility rule.
pub fn height_to_inches(raw: &str) -> i32 {
    let Some((feet, rest)) = raw.split_once('\'') else {
        return 0;
    };
    let Some(inches) = rest.strip_suffix('"') else {
        return 0;
    };

    match (feet.trim().parse::<i32>(), inches.trim().parse::<i32>()) {
        (Ok(feet), Ok(inches)) => feet * 12 + inches,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_common_heights() {
        assert_eq!(height_to_inches("5'9\""), 69);
        assert_eq!(height_to_inches("6'0\""), 72);
        assert_eq!(height_to_inches("5'3\""), 63);
        assert_eq!(height_to_inches("4'11\""), 59);
    }

    #[test]
    fn test_malformed_height_is_zero() {
        assert_eq!(height_to_inches("tall"), 0);
        assert_eq!(height_to_inches(""), 0);
        assert_eq!(height_to_inches("5'9"), 0); // missing trailing quote
        assert_eq!(height_to_inches("five'nine\""), 0);
    }

    #[test]
    fn test_whitespace_tolerated_around_numbers() {
        assert_eq!(height_to_inches("5' 9\""), 69);
    }
}
