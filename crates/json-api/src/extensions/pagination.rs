//! Page query parsing helpers.

use salvo::prelude::StatusError;

use storefront_app::domain::pagination::PageRequest;

use crate::config::pagination::PaginationConfig;

pub(crate) trait PaginationExt {
    /// Build a page request from raw `page` and `page_size` query values.
    ///
    /// A missing page means the first one. A page that is not a positive integer is not found.
    /// An unusable page size falls back to the default, and large ones are capped.
    fn page_request(
        &self,
        page: Option<&str>,
        page_size: Option<&str>,
    ) -> Result<PageRequest, StatusError>;
}

impl PaginationExt for PaginationConfig {
    fn page_request(
        &self,
        page: Option<&str>,
        page_size: Option<&str>,
    ) -> Result<PageRequest, StatusError> {
        let page = match page.map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .ok_or_else(|| StatusError::not_found().brief("Invalid page"))?,
        };

        let default_size = self.page_size.clamp(1, self.max_page_size.max(1));

        let page_size = page_size
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .map_or(default_size, |size| size.min(self.max_page_size.max(1)));

        Ok(PageRequest::new(page, page_size))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    const CONFIG: PaginationConfig = PaginationConfig {
        page_size: 10,
        max_page_size: 100,
    };

    #[test]
    fn defaults_to_first_page_and_default_size() {
        assert_eq!(
            CONFIG.page_request(None, None).ok(),
            Some(PageRequest::new(1, 10))
        );
    }

    #[test]
    fn page_size_is_capped() {
        assert_eq!(
            CONFIG.page_request(Some("2"), Some("500")).ok(),
            Some(PageRequest::new(2, 100))
        );
    }

    #[test]
    fn unusable_page_size_falls_back_to_default() {
        for raw in ["0", "-3", "lots", ""] {
            assert_eq!(
                CONFIG.page_request(Some("1"), Some(raw)).ok(),
                Some(PageRequest::new(1, 10)),
                "page_size {raw:?}"
            );
        }
    }

    #[test]
    fn zero_or_garbage_page_is_not_found() {
        for raw in ["0", "-1", "last"] {
            let status = CONFIG.page_request(Some(raw), None).err().map(|e| e.code);

            assert_eq!(status, Some(StatusCode::NOT_FOUND), "page {raw:?}");
        }
    }
}
