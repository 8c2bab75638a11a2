//! Cookie aggregation for the active domain
//!
//! A single domain query misses cookies scoped to a parent domain or to a
//! specific path, so the aggregator issues several overlapping queries at
//! once, waits for all of them under one deadline, and collapses the
//! overlap by `(name, domain, path)`.

use crate::browser::{Cookie, CookieApi, CookieQuery};
use crate::domain::parent_domain;
use crate::error::{Result, SelectorError};
use crate::record::{CookieRecord, DedupKey};
use futures_util::future::try_join_all;
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

/// Queries needed to cover `domain`, its subdomains, its parent when it is
/// itself a subdomain, and path-scoped cookies of the tab URL.
pub fn query_plan(domain: &str, tab_url: Option<&str>) -> Vec<CookieQuery> {
    let mut plan = vec![
        CookieQuery::for_domain(domain),
        CookieQuery::for_domain(format!(".{}", domain)),
    ];

    if let Some(parent) = parent_domain(domain) {
        plan.push(CookieQuery::for_domain(parent));
        plan.push(CookieQuery::for_domain(format!(".{}", parent)));
    }

    if let Some(url) = tab_url.filter(|url| !url.trim().is_empty()) {
        plan.push(CookieQuery::for_url(url));
    }

    plan
}

/// Collect every cookie visible for `domain`.
///
/// All queries run concurrently and the whole batch shares `limit`; when it
/// elapses the call fails with [`SelectorError::Timeout`] and nothing
/// partial is returned.
pub async fn aggregate(
    api: &dyn CookieApi,
    domain: &str,
    tab_url: Option<&str>,
    limit: Duration,
) -> Result<Vec<CookieRecord>> {
    if domain.trim().is_empty() {
        return Err(SelectorError::InvalidDomain(domain.to_string()));
    }

    let plan = query_plan(domain, tab_url);
    for query in &plan {
        match (&query.domain, &query.url) {
            (Some(domain), _) => debug!("Querying cookies for domain: {}", domain),
            (_, Some(url)) => debug!("Querying cookies for URL: {}", url),
            _ => {}
        }
    }

    let batches = tokio::time::timeout(limit, try_join_all(plan.iter().map(|q| api.query(q))))
        .await
        .map_err(|_| SelectorError::Timeout(limit.as_secs()))?
        .map_err(classify_query_error)?;

    for (index, batch) in batches.iter().enumerate() {
        debug!("Query {} returned {} cookies", index + 1, batch.len());
    }

    let records = dedup_cookies(batches);
    let domains: BTreeSet<&str> = records.iter().map(|r| r.domain.as_str()).collect();
    debug!(
        "{} unique cookies for {} (domains: {})",
        records.len(),
        domain,
        domains.into_iter().collect::<Vec<_>>().join(", ")
    );
    Ok(records)
}

/// Merge query results, keeping one record per [`DedupKey`].
///
/// The first occurrence fixes the position; a later duplicate overwrites
/// the stored fields so the last-seen value wins.
pub fn dedup_cookies<I>(batches: I) -> Vec<CookieRecord>
where
    I: IntoIterator<Item = Vec<Cookie>>,
{
    let mut positions: HashMap<DedupKey, usize> = HashMap::new();
    let mut records: Vec<CookieRecord> = Vec::new();
    let mut total = 0usize;

    for cookie in batches.into_iter().flatten() {
        total += 1;
        let record = CookieRecord::from(cookie);
        match positions.get(&record.dedup_key()) {
            Some(&index) => {
                if records[index].value != record.value {
                    warn!(
                        "Cookie {} on {}{} reported with differing values",
                        record.name, record.domain, record.path
                    );
                }
                records[index] = record;
            }
            None => {
                positions.insert(record.dedup_key(), records.len());
                records.push(record);
            }
        }
    }

    debug!(
        "Total cookies before deduplication: {}, after: {}",
        total,
        records.len()
    );
    records
}

/// Hosts report refusals in free text; lift the recognisable ones into
/// their own kinds so the popup can offer the right action.
fn classify_query_error(err: SelectorError) -> SelectorError {
    let message = match err {
        SelectorError::Unknown(message) => message,
        other => return other,
    };
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") {
        SelectorError::PermissionDenied(message)
    } else if lower.contains("api") || lower.contains("undefined") {
        SelectorError::ApiUnavailable(message)
    } else {
        SelectorError::Unknown(message)
    }
}
