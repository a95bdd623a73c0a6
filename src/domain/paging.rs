//! Paging and sorting types shared by repositories and the HTTP layer.
//!
//! A [`PageRequest`] describes which slice of a result is wanted (zero-based
//! page index, page size, sort order). A [`Page`] is the slice plus the
//! metadata computed from the companion count query.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::PagingError;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = PagingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(PagingError::InvalidSortDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

/// Member properties a result can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Id,
    Username,
    Age,
}

impl FromStr for SortProperty {
    type Err = PagingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortProperty::Id),
            "username" => Ok(SortProperty::Username),
            "age" => Ok(SortProperty::Age),
            other => Err(PagingError::UnknownSortProperty(other.to_string())),
        }
    }
}

/// One `property direction` pair of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub property: SortProperty,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Desc,
        }
    }
}

/// Parses the `property[,direction]` form used in query strings,
/// e.g. `username,desc` or `age`.
impl FromStr for Order {
    type Err = PagingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let property = parts.next().unwrap_or_default().parse()?;
        let direction = match parts.next() {
            Some(direction) if !direction.trim().is_empty() => direction.parse()?,
            _ => Direction::Asc,
        };

        Ok(Self {
            property,
            direction,
        })
    }
}

/// Ordered list of sort orders; empty means storage order (insertion order)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(direction: Direction, property: SortProperty) -> Self {
        Self {
            orders: vec![Order {
                property,
                direction,
            }],
        }
    }

    /// Appends a secondary order
    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Request for one page of a result
///
/// # Example
/// ```
/// use datajpa_api::domain::paging::{Direction, PageRequest, Sort, SortProperty};
///
/// let request = PageRequest::of(2, 10)
///     .with_sort(Sort::by(Direction::Desc, SortProperty::Username));
///
/// assert_eq!(request.offset(), 20);
/// assert_eq!(request.size(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Sort,
}

impl PageRequest {
    /// Creates an unsorted page request
    ///
    /// A page size of zero is raised to one.
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Sort::unsorted(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Zero-based page index
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of a result plus the totals from the count query
///
/// Serializes with camelCase keys, e.g. `totalElements`, `hasNext`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    total_elements: u64,
    total_pages: u64,
    number_of_elements: usize,
    first: bool,
    last: bool,
    has_next: bool,
    has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size();
        let number = request.page();
        let total_pages = total_elements.div_ceil(u64::from(size));
        let has_next = u64::from(number) + 1 < total_pages;

        Self {
            number_of_elements: content.len(),
            content,
            number,
            size,
            total_elements,
            total_pages,
            first: number == 0,
            last: !has_next,
            has_next,
            has_previous: number > 0,
        }
    }

    /// Transforms the content while keeping the paging metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn number_of_elements(&self) -> usize {
        self.number_of_elements
    }

    pub fn is_first(&self) -> bool {
        self.first
    }

    pub fn is_last(&self) -> bool {
        self.last
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }
}
