//! Page metadata derived from a total-row count.

use serde::Serialize;

/// Paging summary returned alongside every list result.
///
/// All fields are zero when nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl PageMetadata {
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

/// Derive page metadata from the pre-pagination row count.
///
/// `page_size` must already be validated as positive.
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> PageMetadata {
    debug_assert!(page_size > 0, "page_size must be validated before paging");

    if total_records <= 0 {
        return PageMetadata::default();
    }

    PageMetadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_records_yield_zero_metadata() {
        assert_eq!(calculate_metadata(0, 3, 20), PageMetadata::default());
        assert!(calculate_metadata(0, 1, 20).is_empty());
    }

    #[test]
    fn twenty_five_rows_in_pages_of_twenty() {
        assert_eq!(
            calculate_metadata(25, 1, 20),
            PageMetadata {
                current_page: 1,
                page_size: 20,
                first_page: 1,
                last_page: 2,
                total_records: 25,
            }
        );
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(calculate_metadata(40, 2, 20).last_page, 2);
        assert_eq!(calculate_metadata(41, 2, 20).last_page, 3);
        assert_eq!(calculate_metadata(1, 1, 100).last_page, 1);
    }

    #[test]
    fn last_page_always_covers_total() {
        for page_size in 1..=100 {
            for total in [1, 2, 7, 99, 100, 101, 1_000, 12_345] {
                let meta = calculate_metadata(total, 1, page_size);
                assert!(meta.last_page * page_size >= total);
                assert!((meta.last_page - 1) * page_size < total);
                assert_eq!(meta, calculate_metadata(total, 1, page_size));
            }
        }
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(calculate_metadata(25, 1, 20)).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["pageSize"], 20);
        assert_eq!(json["firstPage"], 1);
        assert_eq!(json["lastPage"], 2);
        assert_eq!(json["totalRecords"], 25);
    }
}
