/// Format a coordinate pair the way the sample dump prints it
pub fn format_location(latitude: f64, longitude: f64) -> String {
    format!("{}, {}", latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_location() {
        assert_eq!(format_location(42.7284, -73.6918), "42.7284, -73.6918");
    }
}
