use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("page and page_size must be positive integers (got page={page}, page_size={page_size})")]
    InvalidParameters { page: usize, page_size: usize },

    #[error("page {page} exceeds the number of available pages ({max_page})")]
    OutOfRange { page: usize, max_page: usize },
}

/// One contiguous slice of an ordered result set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub items: Vec<T>,
}

/// Slices `items` into the 1-based `page` of size `page_size`.
///
/// An empty input always yields an empty page, whatever `page` is. Otherwise
/// `page` must not exceed `ceil(len / page_size)`.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Result<Page<T>, PageError> {
    let total_items = items.len();
    if total_items == 0 {
        return Ok(Page { page, page_size, total_items, total_pages: 0, items });
    }
    if page == 0 || page_size == 0 {
        return Err(PageError::InvalidParameters { page, page_size });
    }

    let max_page = total_items.div_ceil(page_size);
    if page > max_page {
        return Err(PageError::OutOfRange { page, max_page });
    }

    let start = (page - 1) * page_size;
    let items = items.into_iter().skip(start).take(page_size).collect();
    Ok(Page { page, page_size, total_items, total_pages: max_page, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_page_for_any_page() {
        for page in [0, 1, 2, 50] {
            let out = paginate(Vec::<u8>::new(), page, 10).unwrap();
            assert!(out.items.is_empty());
            assert_eq!(out.total_pages, 0);
        }
    }

    #[test]
    fn last_page_is_partial() {
        let out = paginate((1..=7).collect::<Vec<i32>>(), 3, 3).unwrap();
        assert_eq!(out.items, vec![7]);
        assert_eq!(out.total_items, 7);
        assert_eq!(out.total_pages, 3);
    }

    #[test]
    fn page_past_the_end_is_out_of_range() {
        let err = paginate((1..=7).collect::<Vec<i32>>(), 4, 3).unwrap_err();
        assert_eq!(err, PageError::OutOfRange { page: 4, max_page: 3 });

        let err = paginate(vec![1], 2, 1).unwrap_err();
        assert_eq!(err, PageError::OutOfRange { page: 2, max_page: 1 });
    }

    #[test]
    fn zero_page_or_size_is_rejected() {
        assert!(matches!(
            paginate(vec![1, 2], 0, 1),
            Err(PageError::InvalidParameters { page: 0, page_size: 1 })
        ));
        assert!(matches!(
            paginate(vec![1, 2], 1, 0),
            Err(PageError::InvalidParameters { page: 1, page_size: 0 })
        ));
    }

    #[test]
    fn pages_concatenate_back_to_input() {
        for len in 0..=23usize {
            let input: Vec<usize> = (0..len).collect();
            for size in 1..=8usize {
                let max_page = len.div_ceil(size);
                let mut rebuilt = Vec::new();
                for page in 1..=max_page {
                    let out = paginate(input.clone(), page, size).unwrap();
                    assert!(out.items.len() <= size);
                    assert!(!out.items.is_empty());
                    rebuilt.extend(out.items);
                }
                assert_eq!(rebuilt, input, "len={len} size={size}");
                if len > 0 {
                    assert!(paginate(input.clone(), max_page + 1, size).is_err());
                }
            }
        }
    }
}
