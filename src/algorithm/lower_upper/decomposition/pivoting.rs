//! # Pivoting during LU
//!
//! Choosing the right pivot during LU decomposition reduces fill-in. Choosing the "best" pivot is
//! an intractable problem, so a heuristic search is used that stops early once a pivot is found
//! that is unlikely to be improved upon.
use crate::algorithm::lower_upper::decomposition::ActiveMatrix;

/// Position of a pivot in the basis matrix.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) struct Pivot {
    pub row: usize,
    pub column: usize,
}

/// Markowitz's pivot rule minimizes `(nnz(row) - 1) * (nnz(column) - 1)` at each step.
///
/// Candidates are searched by increasing count: first the columns with a single nonzero, then
/// alternating rows and columns with `k` nonzeros for growing `k`. The search ends when a pivot is
/// found with a cost no larger than the lowest cost that a later candidate could have, or when
/// enough candidates have been considered.
pub(super) struct Markowitz {
    search_limit: usize,
}

impl Markowitz {
    pub fn new(search_limit: usize) -> Self {
        Self { search_limit }
    }

    /// Choose the next pivot.
    ///
    /// # Return value
    ///
    /// `None` if the active submatrix has no nonzero left, meaning that the matrix is singular.
    pub fn choose_pivot<F>(&self, active: &ActiveMatrix<F>) -> Option<Pivot> {
        let m = active.active_rows.len();
        let mut search = Search { best: None, considered: 0 };

        // Column singletons, pick the one in the longest row. This is what the factorization of a
        // basis that is mostly slack will spend most of its time on.
        for column in active.columns_with_count(1) {
            if let Some(row) = active.active_rows_in(column).next() {
                let row_count = active.row_count(row);
                let is_better = match search.best {
                    Some((_, pivot)) => row_count > active.row_count(pivot.row),
                    None => true,
                };
                if is_better {
                    search.best = Some((0, Pivot { row, column }));
                }
            }
        }
        if let Some((_, pivot)) = search.best {
            return Some(pivot);
        }

        for k in 1..=m {
            if k > 1 {
                for column in active.columns_with_count(k) {
                    let mut column_best = None;
                    for row in active.active_rows_in(column) {
                        let cost = (active.row_count(row) - 1) * (k - 1);
                        if column_best.is_none_or(|(best_cost, _)| cost < best_cost) {
                            column_best = Some((cost, Pivot { row, column }));
                            if cost == 0 {
                                break;
                            }
                        }
                    }

                    search.offer(column_best);
                    if search.cost_at_most((k - 1) * (k - 1)) {
                        return search.pivot();
                    }
                    search.considered += 1;
                    if search.considered >= self.search_limit && search.best.is_some() {
                        return search.pivot();
                    }
                }
            }

            for row in active.rows_with_count(k) {
                let mut row_best = None;
                for column in active.columns_in(row) {
                    let cost = (active.column_count(column) - 1) * (k - 1);
                    if row_best.is_none_or(|(best_cost, _)| cost < best_cost) {
                        row_best = Some((cost, Pivot { row, column }));
                        if cost == 0 {
                            break;
                        }
                    }
                }

                search.offer(row_best);
                if search.cost_at_most(k * (k - 1)) {
                    return search.pivot();
                }
                search.considered += 1;
                if search.considered >= self.search_limit && search.best.is_some() {
                    return search.pivot();
                }
            }
        }

        search.pivot()
    }
}

/// Best candidate seen so far.
struct Search {
    best: Option<(usize, Pivot)>,
    considered: usize,
}

impl Search {
    fn offer(&mut self, candidate: Option<(usize, Pivot)>) {
        if let Some((cost, pivot)) = candidate {
            if self.best.is_none_or(|(best_cost, _)| cost < best_cost) {
                self.best = Some((cost, pivot));
            }
        }
    }

    fn cost_at_most(&self, bound: usize) -> bool {
        self.best.is_some_and(|(cost, _)| cost <= bound)
    }

    fn pivot(&self) -> Option<Pivot> {
        self.best.map(|(_, pivot)| pivot)
    }
}
