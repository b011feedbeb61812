/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Split a comma separated list column into trimmed, non-empty entries.
///
/// Used for denormalized list columns such as dish allergens.
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(Some("gluten, nuts ,,milk")), vec!["gluten", "nuts", "milk"]);
        assert!(split_list(Some("  ")).is_empty());
        assert!(split_list(None).is_empty());
    }
}
