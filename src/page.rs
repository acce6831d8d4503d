//! Offset-based pagination: requested window plus the returned page.

use crate::criteria::CriteriaError;
use crate::entity::Schema;

/// Sort direction for one sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One `field,direction` sort order. Fields are validated against the entity
/// schema when parsed, so the field name is safe to splice into SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct SortOrder {
    pub field: String,
    pub direction: Direction,
}

/// The requested window over a result set: zero-based page number, page size
/// and sort orders.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

pub const DEFAULT_PAGE_SIZE: u32 = 20;

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Parses `page`, `size` and repeatable `sort=field,direction` keys from
    /// decoded query-string pairs, validating sort fields against the schema.
    pub fn from_params<'a, I>(schema: &'static Schema, params: I) -> Result<Self, CriteriaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = PageRequest::default();

        for (key, value) in params {
            match key {
                "page" => {
                    request.page =
                        value
                            .parse::<u32>()
                            .map_err(|_| CriteriaError::InvalidValue {
                                field: "page".to_string(),
                                value: value.to_string(),
                            })?;
                }
                "size" => {
                    request.size =
                        value
                            .parse::<u32>()
                            .map_err(|_| CriteriaError::InvalidValue {
                                field: "size".to_string(),
                                value: value.to_string(),
                            })?;
                }
                "sort" => {
                    request.sort.push(parse_sort(schema, value)?);
                }
                _ => {} // criteria keys are handled elsewhere
            }
        }

        Ok(request)
    }

    /// Number of rows to skip before this page. Widened to u64 so that
    /// extreme page/size query parameters cannot overflow.
    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }

    /// Builds the `ORDER BY` clause. Without an explicit sort the result is
    /// ordered by id so that pages are stable across calls.
    pub fn order_by_sql(&self) -> String {
        if self.sort.is_empty() {
            return "ORDER BY id".to_string();
        }

        let orders = self
            .sort
            .iter()
            .map(|s| format!("{} {}", s.field, s.direction.as_sql()))
            .collect::<Vec<_>>()
            .join(", ");

        format!("ORDER BY {orders}")
    }
}

fn parse_sort(schema: &'static Schema, value: &str) -> Result<SortOrder, CriteriaError> {
    let (field, direction) = match value.split_once(',') {
        Some((field, direction)) => (field, direction),
        None => (value, "asc"),
    };

    let column = schema
        .column(field)
        .ok_or_else(|| CriteriaError::InvalidSort {
            value: value.to_string(),
        })?;

    let direction = match direction {
        "asc" => Direction::Asc,
        "desc" => Direction::Desc,
        _ => {
            return Err(CriteriaError::InvalidSort {
                value: value.to_string(),
            });
        }
    };

    Ok(SortOrder {
        field: column.name.to_string(),
        direction,
    })
}

/// One page of results together with the total match count (ignoring
/// pagination).
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// Number of pages needed to cover `total` at the current size.
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }

        self.total.div_ceil(self.size as u64) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Page, PageRequest};
    use crate::entity::QUIZ_SCHEMA;

    #[test]
    fn defaults_apply_when_params_are_absent() {
        let request = PageRequest::from_params(&QUIZ_SCHEMA, Vec::new()).unwrap();

        assert_eq!(PageRequest::default(), request);
        assert_eq!(0, request.offset());
        assert_eq!("ORDER BY id", request.order_by_sql());
    }

    #[test]
    fn parses_page_size_and_sort() {
        let request = PageRequest::from_params(
            &QUIZ_SCHEMA,
            vec![("page", "2"), ("size", "10"), ("sort", "title,desc"), ("sort", "id")],
        )
        .unwrap();

        assert_eq!(2, request.page);
        assert_eq!(10, request.size);
        assert_eq!(20, request.offset());
        assert_eq!(Direction::Desc, request.sort[0].direction);
        assert_eq!("ORDER BY title DESC, id ASC", request.order_by_sql());
    }

    #[test]
    fn offset_survives_extreme_page_and_size() {
        let request = PageRequest::from_params(
            &QUIZ_SCHEMA,
            vec![("page", "4294967295"), ("size", "2")],
        )
        .unwrap();

        assert_eq!(u32::MAX as u64 * 2, request.offset());
    }

    #[test]
    fn rejects_unknown_sort_field() {
        assert!(PageRequest::from_params(&QUIZ_SCHEMA, vec![("sort", "owner,asc")]).is_err());
    }

    #[test]
    fn rejects_bad_direction() {
        assert!(PageRequest::from_params(&QUIZ_SCHEMA, vec![("sort", "title,sideways")]).is_err());
    }

    #[test]
    fn page_arithmetic() {
        let page = Page::<u8> {
            items: vec![1, 2, 3],
            page: 1,
            size: 3,
            total: 7,
        };

        assert_eq!(3, page.total_pages());
        assert!(page.has_next());
        assert!(page.has_prev());

        let last = Page::<u8> {
            items: vec![7],
            page: 2,
            size: 3,
            total: 7,
        };
        assert!(!last.has_next());
    }
}
