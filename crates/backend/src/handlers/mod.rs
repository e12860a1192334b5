pub mod constraints;
pub mod lessons;
pub mod rooms;
pub mod server;
pub mod tags;
pub mod timeslots;
pub mod timetables;

fn page_or_default(page: Option<u64>) -> u64 {
    page.unwrap_or(0)
}

fn page_size_or_default(page_size: Option<u64>) -> u64 {
    page_size.unwrap_or(50).clamp(1, 1000)
}

/// Splits a comma-separated id list, dropping blank entries.
fn split_csv(value: Option<&str>) -> Option<Vec<String>> {
    let value = value?;
    let ids: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_csv() {
        assert_eq!(split_csv(None), None);
        assert_eq!(split_csv(Some("")), None);
        assert_eq!(split_csv(Some(" , ")), None);
        assert_eq!(
            split_csv(Some("a, b,c")),
            Some(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(page_size_or_default(None), 50);
        assert_eq!(page_size_or_default(Some(0)), 1);
        assert_eq!(page_size_or_default(Some(100_000)), 1000);
    }
}
