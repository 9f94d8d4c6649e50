//! Client-side product filtering.
//!
//! Filters an already fetched slice by name and paginates it locally. The
//! server-side search endpoint remains the authoritative search; this path
//! only narrows what is already on screen.

use crate::catalog::Product;
use crate::search::{Paginated, PaginationMeta};

/// Case-insensitive substring match on the product name.
pub fn matches_term(product: &Product, term: &str) -> bool {
    let term = term.trim();
    term.is_empty() || product.name.to_lowercase().contains(&term.to_lowercase())
}

/// Filter `products` by `term`, then cut out `page` of size `limit`.
///
/// Pages past the end yield an empty slice with correct totals. A zero
/// `limit` is treated as 1.
pub fn filter_locally(products: &[Product], term: &str, page: u32, limit: u32) -> Paginated<Product> {
    let page = page.max(1);
    let limit = limit.max(1);
    let matching: Vec<&Product> = products.iter().filter(|p| matches_term(p, term)).collect();
    let meta = PaginationMeta::new(page, limit, matching.len() as u64);

    let start = (page as usize - 1).saturating_mul(limit as usize);
    let data = matching
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();

    Paginated::new(data, meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            family_name: "Bebidas".to_string(),
            price: 1.0,
            photo: None,
            photo_url: None,
            photo_thumbnail: None,
            photo_medium: None,
            photo_original: None,
        }
    }

    fn products() -> Vec<Product> {
        vec![
            product(1, "Café molido"),
            product(2, "Café en grano"),
            product(3, "Té verde"),
            product(4, "CAFÉ instantáneo"),
        ]
    }

    #[test]
    fn test_filter_case_insensitive() {
        let result = filter_locally(&products(), "café", 1, 10);
        let ids: Vec<i64> = result.data.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(result.meta.total, 3);
        assert_eq!(result.meta.total_pages, 1);
    }

    #[test]
    fn test_filter_paginates() {
        let result = filter_locally(&products(), "caf", 2, 2);
        assert_eq!(result.len(), 1);
        assert_eq!(result.data[0].id.get(), 4);
        assert!(result.meta.has_previous_page);
        assert!(!result.meta.has_next_page);
    }

    #[test]
    fn test_blank_term_keeps_everything() {
        let result = filter_locally(&products(), " ", 1, 3);
        assert_eq!(result.len(), 3);
        assert_eq!(result.meta.total_pages, 2);
    }

    #[test]
    fn test_zero_limit_clamped() {
        let result = filter_locally(&products(), "caf", 1, 0);
        assert_eq!(result.len(), 1);
        assert_eq!(result.meta.limit, 1);
        assert_eq!(result.meta.total, 3);
        assert_eq!(result.meta.total_pages, 3);
        assert!(result.meta.has_next_page);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let result = filter_locally(&products(), "verde", 5, 10);
        assert!(result.is_empty());
        assert_eq!(result.meta.total, 1);
    }
}
