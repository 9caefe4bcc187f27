//! Sortable, paginated data table over a series.

use std::cmp::Ordering;

use crate::domain::{DailyObservation, SortColumn, SortOrder, WeatherSeries};

pub const DEFAULT_PAGE_SIZE: usize = 15;

/// One page of table rows.
#[derive(Debug, Clone)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a DailyObservation>,
    /// Zero-based page index actually shown (clamped to the last page).
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
}

/// Rows of `series` sorted by `column`.
///
/// The sort is stable, so equal values keep ascending date order. Missing
/// values sort last in either direction.
pub fn sorted_rows(series: &WeatherSeries, column: SortColumn, order: SortOrder) -> Vec<&DailyObservation> {
    let mut rows: Vec<&DailyObservation> = series.observations().iter().collect();
    rows.sort_by(|a, b| compare(a, b, column, order));
    rows
}

/// Slice a page out of `rows`.
pub fn paginate<'a>(rows: &[&'a DailyObservation], page: usize, page_size: usize) -> TablePage<'a> {
    let page_size = page_size.max(1);
    let total_rows = rows.len();
    let page_count = total_rows.div_ceil(page_size).max(1);
    let page = page.min(page_count - 1);

    let start = (page * page_size).min(total_rows);
    let end = (start + page_size).min(total_rows);

    TablePage {
        rows: rows[start..end].to_vec(),
        page,
        page_count,
        total_rows,
    }
}

fn compare(a: &DailyObservation, b: &DailyObservation, column: SortColumn, order: SortOrder) -> Ordering {
    let directed = |ord: Ordering| match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    };

    match column {
        SortColumn::Date => directed(a.date.cmp(&b.date)),
        SortColumn::Season => directed(a.season.cmp(&b.season)),
        _ => {
            let Some(variable) = column.variable() else {
                return Ordering::Equal;
            };
            let (x, y) = (variable.value(a), variable.value(b));
            match (x.is_finite(), y.is_finite()) {
                (true, true) => directed(x.total_cmp(&y)),
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => Ordering::Equal,
            }
        }
    }
}
