//! Query parameters of the services listing.

use serde::Deserialize;

use crate::store::{Filter, Sort, SortDirection};

/// Query string of `GET /services`.
///
/// - `search`: case-insensitive substring of `title`
/// - `sort`: `asc` sorts by price ascending, any other value descending
#[derive(Debug, Default, Deserialize)]
pub struct ServicesQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ServicesQuery {
    pub fn filter(&self) -> Filter {
        match self.search.as_deref() {
            Some(search) if !search.is_empty() => {
                Filter::all().contains_ignore_case("title", search)
            }
            _ => Filter::all(),
        }
    }

    /// `None` keeps insertion order.
    pub fn sort(&self) -> Option<Sort> {
        self.sort.as_deref().map(|sort| {
            let direction = if sort == "asc" {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            };
            Sort::new("price", direction)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(search: Option<&str>, sort: Option<&str>) -> ServicesQuery {
        ServicesQuery {
            search: search.map(String::from),
            sort: sort.map(String::from),
        }
    }

    #[test]
    fn empty_search_does_not_filter() {
        assert_eq!(query(None, None).filter(), Filter::all());
        assert_eq!(query(Some(""), None).filter(), Filter::all());
    }

    #[test]
    fn search_filters_title() {
        assert_eq!(
            query(Some("oil"), None).filter(),
            Filter::all().contains_ignore_case("title", "oil")
        );
    }

    #[test]
    fn anything_but_asc_sorts_descending() {
        assert_eq!(
            query(None, Some("asc")).sort(),
            Some(Sort::new("price", SortDirection::Ascending))
        );
        assert_eq!(
            query(None, Some("desc")).sort(),
            Some(Sort::new("price", SortDirection::Descending))
        );
        assert_eq!(
            query(None, Some("ASC")).sort(),
            Some(Sort::new("price", SortDirection::Descending))
        );
        assert_eq!(query(None, None).sort(), None);
    }
}
