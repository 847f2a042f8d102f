use crate::{FilterState, Job, JobStatus, SortState};

/// Derives the visible rows from the collection.
///
/// Order of operations: filter, stable partition with `New` jobs first, then a
/// stable sort over the whole partitioned sequence when a sort key is set. A
/// non-status sort key may therefore interleave `New` jobs with the rest.
pub fn compute_view<'a>(
    jobs: &'a [Job],
    filter: &FilterState,
    sort: &SortState,
    show_ignored: bool,
) -> Vec<&'a Job> {
    let (mut rows, rest): (Vec<&Job>, Vec<&Job>) = jobs
        .iter()
        .filter(|job| show_ignored || !matches!(job.status, Some(JobStatus::Ignored)))
        .filter(|job| filter.matches(job))
        .partition(|job| job.is_new());
    rows.extend(rest);

    if sort.key.is_some() {
        rows.sort_by(|a, b| sort.compare(a, b));
    }
    rows
}
