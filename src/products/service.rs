// Product catalog service

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::products::models::{
    CreateProductRequest, NewProduct, Product, ProductPage, UpdateProductRequest,
};
use crate::products::repository::ProductRepository;
use crate::reviews::repository::ReviewRepository;
use crate::validation::{require, require_text};

/// Upper bound on client-requested page sizes
const MAX_PAGE_SIZE: u32 = 100;

/// Number of products returned by the top-rated endpoint
const TOP_RATED_COUNT: i64 = 3;

pub struct ProductService {
    products: ProductRepository,
    reviews: ReviewRepository,
    default_page_size: u32,
}

impl ProductService {
    pub fn new(
        products: ProductRepository,
        reviews: ReviewRepository,
        default_page_size: u32,
    ) -> Self {
        Self {
            products,
            reviews,
            default_page_size,
        }
    }

    /// One page of the catalog, optionally filtered by a name keyword
    pub async fn list(
        &self,
        keyword: Option<String>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<ProductPage, ApiError> {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(self.default_page_size)
            .clamp(1, MAX_PAGE_SIZE);

        let keyword = keyword.filter(|kw| !kw.trim().is_empty());
        let offset = page_offset(page, page_size);

        let (products, total) = self
            .products
            .list(keyword.as_deref(), page_size as i64, offset)
            .await?;

        Ok(ProductPage {
            products,
            page,
            pages: page_count(total, page_size),
        })
    }

    /// The highest-rated products
    pub async fn top_rated(&self) -> Result<Vec<Product>, ApiError> {
        self.products.top_rated(TOP_RATED_COUNT).await
    }

    /// Product detail including its reviews, newest last
    pub async fn get(&self, id: Uuid) -> Result<Product, ApiError> {
        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound { resource: "Product" })?;

        product.reviews = self.reviews.list_for_product(id).await?;
        Ok(product)
    }

    /// Create a product (admin)
    pub async fn create(
        &self,
        admin_id: Uuid,
        request: CreateProductRequest,
    ) -> Result<Product, ApiError> {
        request.validate()?;

        let new_product = NewProduct {
            name: require_text(request.name, "name")?,
            price: require(request.price, "price")?,
            description: require_text(request.description, "description")?,
            image: require_text(request.image, "image")?,
            brand: require_text(request.brand, "brand")?,
            category: require_text(request.category, "category")?,
            // Zero is a legitimate stock level; only absence is an error.
            count_in_stock: require(request.count_in_stock, "count_in_stock")?,
        };

        if new_product.price <= Decimal::ZERO {
            return Err(ApiError::Validation(
                "Price must be a positive amount".to_string(),
            ));
        }

        let product = self.products.create(admin_id, new_product).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Partial update of a product (admin)
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateProductRequest,
    ) -> Result<Product, ApiError> {
        request.validate()?;

        if let Some(price) = request.price {
            if price <= Decimal::ZERO {
                return Err(ApiError::Validation(
                    "Price must be a positive amount".to_string(),
                ));
            }
        }

        let product = self
            .products
            .update(
                id,
                request.name,
                request.price,
                request.description,
                request.image,
                request.brand,
                request.category,
                request.count_in_stock,
            )
            .await?
            .ok_or(ApiError::NotFound { resource: "Product" })?;

        tracing::info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// Delete a product (admin)
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.products.delete(id).await? {
            return Err(ApiError::NotFound { resource: "Product" });
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

/// Offset for a 1-indexed page
pub fn page_offset(page: u32, page_size: u32) -> i64 {
    (page_size as i64) * (page as i64 - 1)
}

/// Total page count for a result set
pub fn page_count(total: i64, page_size: u32) -> u32 {
    if total <= 0 {
        return 0;
    }
    ((total + page_size as i64 - 1) / page_size as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_five_items_at_page_size_two_is_three_pages() {
        assert_eq!(page_count(5, 2), 3);
        // Page 2 starts at the third item.
        assert_eq!(page_offset(2, 2), 2);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_page() {
        assert_eq!(page_count(6, 2), 3);
        assert_eq!(page_count(6, 3), 2);
    }

    #[test]
    fn test_empty_catalog_has_zero_pages() {
        assert_eq!(page_count(0, 8), 0);
    }

    #[test]
    fn test_first_page_has_zero_offset() {
        assert_eq!(page_offset(1, 8), 0);
    }

    proptest! {
        #[test]
        fn prop_every_item_lands_on_exactly_one_page(
            total in 0i64..10_000,
            page_size in 1u32..200,
        ) {
            let pages = page_count(total, page_size);
            // The last page's offset stays below the total, and one more
            // page would start past the end.
            if pages > 0 {
                prop_assert!(page_offset(pages, page_size) < total);
            }
            prop_assert!(page_offset(pages + 1, page_size) >= total);
        }
    }
}
