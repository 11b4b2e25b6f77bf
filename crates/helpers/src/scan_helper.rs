//! Scan lifecycle workflows: create from a template, look up, bulk stop

use futures::future::{join_all, try_join_all};
use regex::Regex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use tio_common::{Scan, ScanList, ScanSettings, Template, TenableIo, TenableIoError, TioResult};

use crate::folder_ref::{FolderHelper, FolderRef};
use crate::progress::StopAllReport;
use crate::scan_ref::ScanRef;
use crate::templates::TemplateResolver;
use crate::wait::WaitPolicy;

enum ScanFilter<'f> {
    All,
    Name(&'f str),
    Pattern(Regex),
}

impl ScanFilter<'_> {
    fn accepts(&self, name: &str) -> bool {
        match self {
            ScanFilter::All => true,
            ScanFilter::Name(wanted) => name == *wanted,
            ScanFilter::Pattern(re) => re.is_match(name),
        }
    }
}

/// Compile `pattern` so it must match the whole name, not a substring.
fn whole_match(pattern: &str) -> TioResult<Regex> {
    Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| TenableIoError::InvalidInput(format!("invalid name pattern '{pattern}': {e}")))
}

/// Facade over template resolution, scan creation and lookup, and
/// stop-all. Holds nothing but a borrowed client and the wait policy
/// handed to every reference it creates.
pub struct ScanHelper<'a, C: ?Sized> {
    client: &'a C,
    policy: WaitPolicy,
}

impl<'a, C> ScanHelper<'a, C>
where
    C: TenableIo + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self::with_policy(client, WaitPolicy::default())
    }

    pub fn with_policy(client: &'a C, policy: WaitPolicy) -> Self {
        Self { client, policy }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.policy.poll_interval = interval;
        self
    }

    /// Bound every wait; `None` waits for as long as it takes.
    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.policy.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.policy.cancel = Some(token);
        self
    }

    #[inline]
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.policy.poll_interval
    }

    #[inline]
    #[must_use]
    pub fn wait_policy(&self) -> &WaitPolicy {
        &self.policy
    }

    #[must_use]
    pub fn folders(&self) -> FolderHelper<'a, C> {
        FolderHelper::with_policy(self.client, self.policy.clone())
    }

    fn scan_ref(&self, id: i64) -> ScanRef<'a, C> {
        ScanRef::with_policy(self.client, id, self.policy.clone())
    }

    pub async fn template_by_name(&self, name: &str) -> TioResult<Option<Template>> {
        TemplateResolver::new(self.client).by_name(name).await
    }

    pub async fn template_by_title(&self, title: &str) -> TioResult<Option<Template>> {
        TemplateResolver::new(self.client).by_title(title).await
    }

    /// Create a scan from a template given by name or, failing that, by title.
    /// `targets` is a comma-separated list.
    #[instrument(skip(self, targets))]
    pub async fn create_scan(&self, name: &str, targets: &str, template: &str) -> TioResult<ScanRef<'a, C>> {
        let found = match self.template_by_name(template).await? {
            Some(t) => Some(t),
            None => self.template_by_title(template).await?,
        };
        let template = found
            .ok_or_else(|| TenableIoError::Generic("scan template name not found".to_string()))?;

        let settings = ScanSettings::new(name, targets);
        let created = self.client.create_scan(&template.uuid, &settings).await?;
        info!(scan = created.id, template = %template.name, "scan created");
        Ok(self.scan_ref(created.id))
    }

    /// Reference for `id`, built from the id the details record reports.
    pub async fn get_scan(&self, id: i64) -> TioResult<ScanRef<'a, C>> {
        let details = self.client.scan_details(id).await?;
        Ok(self.scan_ref(details.info.object_id))
    }

    /// All scans, or those in one folder, in listing order.
    pub async fn scans(&self, folder_id: Option<i64>) -> TioResult<Vec<ScanRef<'a, C>>> {
        self.filtered(folder_id, ScanFilter::All).await
    }

    /// Scans whose name equals `name` exactly.
    pub async fn scans_by_name(&self, name: &str, folder_id: Option<i64>) -> TioResult<Vec<ScanRef<'a, C>>> {
        self.filtered(folder_id, ScanFilter::Name(name)).await
    }

    /// Scans whose whole name matches the regular expression `pattern`.
    pub async fn scans_by_regex(&self, pattern: &str, folder_id: Option<i64>) -> TioResult<Vec<ScanRef<'a, C>>> {
        let re = whole_match(pattern)?;
        self.filtered(folder_id, ScanFilter::Pattern(re)).await
    }

    /// Listing entries rather than references, under the same filters.
    /// `name` and `pattern` are mutually exclusive.
    pub async fn scan_records(
        &self,
        folder_id: Option<i64>,
        name: Option<&str>,
        pattern: Option<&str>,
    ) -> TioResult<Vec<Scan>> {
        let filter = match (name, pattern) {
            (Some(_), Some(_)) => {
                return Err(TenableIoError::InvalidInput(
                    "filter by name or by pattern, not both".to_string(),
                ))
            }
            (Some(name), None) => ScanFilter::Name(name),
            (None, Some(pattern)) => ScanFilter::Pattern(whole_match(pattern)?),
            (None, None) => ScanFilter::All,
        };
        self.records(folder_id, filter).await
    }

    async fn records(&self, folder_id: Option<i64>, filter: ScanFilter<'_>) -> TioResult<Vec<Scan>> {
        let list: ScanList = self.client.list_scans(folder_id).await?;
        Ok(list
            .scans
            .into_iter()
            .filter(|scan| filter.accepts(&scan.name))
            .collect())
    }

    async fn filtered(&self, folder_id: Option<i64>, filter: ScanFilter<'_>) -> TioResult<Vec<ScanRef<'a, C>>> {
        let records = self.records(folder_id, filter).await?;
        Ok(records.iter().map(|scan| self.scan_ref(scan.id)).collect())
    }

    /// Stop every scan and wait until all of them settle.
    pub async fn stop_all(&self) -> TioResult<StopAllReport> {
        let scans = self.scans(None).await?;
        self.stop_scans(&scans).await
    }

    pub async fn stop_all_in_folder(&self, folder_id: i64) -> TioResult<StopAllReport> {
        let scans = self.scans(Some(folder_id)).await?;
        self.stop_scans(&scans).await
    }

    pub async fn stop_all_in(&self, folder: &FolderRef<'_, C>) -> TioResult<StopAllReport> {
        self.stop_all_in_folder(folder.id()).await
    }

    /// Two passes, one scan at a time, in order. Stop requests that fail
    /// are logged and skipped; every scan is still waited on. The first
    /// failed wait ends the call.
    #[instrument(skip(self, scans), fields(count = scans.len()))]
    pub async fn stop_scans(&self, scans: &[ScanRef<'_, C>]) -> TioResult<StopAllReport> {
        let mut report = StopAllReport::new(scans.len());

        for scan in scans {
            match scan.stop(false).await {
                Ok(()) => report.record_stop(true),
                Err(e) => {
                    warn!(scan = scan.id(), error = %e, "stop request failed, continuing");
                    report.record_stop(false);
                }
            }
        }

        for scan in scans {
            scan.wait_until_stopped().await?;
            report.record_settled();
        }

        report.log_summary();
        Ok(report)
    }

    /// Same contract as [`stop_scans`](Self::stop_scans), but all stop
    /// requests go out together and all waits run together.
    #[instrument(skip(self, scans), fields(count = scans.len()))]
    pub async fn stop_all_concurrently(&self, scans: &[ScanRef<'_, C>]) -> TioResult<StopAllReport> {
        let mut report = StopAllReport::new(scans.len());

        let outcomes = join_all(scans.iter().map(|scan| scan.stop(false))).await;
        for (scan, outcome) in scans.iter().zip(outcomes) {
            if let Err(e) = &outcome {
                warn!(scan = scan.id(), error = %e, "stop request failed, continuing");
            }
            report.record_stop(outcome.is_ok());
        }

        let settled = try_join_all(scans.iter().map(|scan| scan.wait_until_stopped())).await?;
        report.settled = settled.len();

        report.log_summary();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{folder, MockTenable};
    use tio_common::ScanStatus;

    fn helper(mock: &MockTenable) -> ScanHelper<'_, MockTenable> {
        ScanHelper::new(mock).with_poll_interval(Duration::from_millis(1))
    }

    fn named(id: i64, name: &str) -> Scan {
        Scan::new(id, name, ScanStatus::Running)
    }

    fn ids(scans: &[ScanRef<'_, MockTenable>]) -> Vec<i64> {
        scans.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn default_poll_interval_is_five_seconds() {
        let mock = MockTenable::new();
        assert_eq!(ScanHelper::new(&mock).poll_interval(), Duration::from_millis(5000));
        assert!(ScanHelper::new(&mock).wait_policy().timeout.is_none());
    }

    #[tokio::test]
    async fn create_prefers_name_over_title() {
        let mock = MockTenable::new().with_templates(vec![
            Template::new("u-title", "advanced", "basic"),
            Template::new("u-name", "basic", "Basic Network Scan"),
        ]);
        let scan = helper(&mock)
            .create_scan("nightly", "10.0.0.1,10.0.0.2", "basic")
            .await
            .unwrap();

        let created = mock.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0, "u-name");
        assert_eq!(created[0].1.name, "nightly");
        assert_eq!(created[0].1.text_targets, "10.0.0.1,10.0.0.2");
        assert_eq!(scan.id(), 101);
        assert_eq!(mock.template_fetches(), 1);
    }

    #[tokio::test]
    async fn create_falls_back_to_title() {
        let mock = MockTenable::new()
            .with_templates(vec![Template::new("u-basic", "basic", "Basic Network Scan")]);
        helper(&mock)
            .create_scan("weekly", "192.0.2.0/24", "Basic Network Scan")
            .await
            .unwrap();

        assert_eq!(mock.created()[0].0, "u-basic");
        assert_eq!(mock.template_fetches(), 2);
    }

    #[tokio::test]
    async fn create_with_unknown_template_fails() {
        let mock = MockTenable::new()
            .with_templates(vec![Template::new("u-basic", "basic", "Basic Network Scan")]);
        let err = helper(&mock)
            .create_scan("weekly", "192.0.2.1", "nessus")
            .await
            .unwrap_err();

        assert!(matches!(err, TenableIoError::Generic(ref m) if m == "scan template name not found"));
        assert!(mock.created().is_empty());
    }

    #[tokio::test]
    async fn get_scan_uses_reported_id() {
        let mock = MockTenable::new()
            .with_statuses(5, vec![ScanStatus::Completed])
            .with_reported_id(5, 55);
        let scan = helper(&mock).get_scan(5).await.unwrap();
        assert_eq!(scan.id(), 55);
    }

    #[tokio::test]
    async fn get_missing_scan_propagates() {
        let mock = MockTenable::new();
        let err = helper(&mock).get_scan(5).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn listing_preserves_order() {
        let mock = MockTenable::new().with_scans(vec![named(9, "c"), named(2, "a"), named(5, "b")]);
        let scans = helper(&mock).scans(None).await.unwrap();
        assert_eq!(ids(&scans), vec![9, 2, 5]);
    }

    #[tokio::test]
    async fn name_filter_is_exact_and_case_sensitive() {
        let mock = MockTenable::new().with_scans(vec![
            named(1, "weekly"),
            named(2, "weekly-scan-v2"),
            named(3, "Weekly"),
            named(4, "weekly"),
        ]);
        let scans = helper(&mock).scans_by_name("weekly", None).await.unwrap();
        assert_eq!(ids(&scans), vec![1, 4]);
    }

    #[tokio::test]
    async fn regex_filter_matches_whole_name() {
        let mock = MockTenable::new().with_scans(vec![named(1, "weekly-scan-v2"), named(2, "daily")]);
        let h = helper(&mock);

        assert!(h.scans_by_regex("weekly", None).await.unwrap().is_empty());
        assert_eq!(ids(&h.scans_by_regex("weekly.*", None).await.unwrap()), vec![1]);
        assert_eq!(ids(&h.scans_by_regex("weekly|daily", None).await.unwrap()), vec![2]);
    }

    #[tokio::test]
    async fn records_carry_listing_fields() {
        let mock = MockTenable::new().with_scans(vec![named(1, "weekly-a"), named(2, "daily")]);
        let h = helper(&mock);
        let records = h.scan_records(None, None, Some("weekly-.*")).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "weekly-a");
        assert_eq!(records[0].status, ScanStatus::Running);
        assert!(h.scan_records(None, Some("a"), Some("b")).await.is_err());
    }

    #[tokio::test]
    async fn invalid_regex_is_rejected() {
        let mock = MockTenable::new().with_scans(vec![named(1, "a")]);
        let err = helper(&mock).scans_by_regex("(", None).await.unwrap_err();
        assert!(matches!(err, TenableIoError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn folder_scoped_listing() {
        let mock = MockTenable::new()
            .with_scans(vec![named(1, "ops"), named(2, "ops")])
            .with_folder(folder(7, "Ops"), vec![named(2, "ops"), named(3, "audit")]);
        let h = helper(&mock);
        assert_eq!(ids(&h.scans(Some(7)).await.unwrap()), vec![2, 3]);
        assert_eq!(ids(&h.scans_by_name("ops", Some(7)).await.unwrap()), vec![2]);
    }

    #[tokio::test]
    async fn stop_phase_isolates_failures() {
        let mock = MockTenable::new()
            .with_scans(vec![named(1, "a"), named(2, "b"), named(3, "c")])
            .with_statuses(1, vec![ScanStatus::Stopping, ScanStatus::Stopped])
            .with_statuses(2, vec![ScanStatus::Completed])
            .with_statuses(3, vec![ScanStatus::Running, ScanStatus::Aborted])
            .failing_stop(2);

        let report = helper(&mock).stop_all().await.unwrap();

        assert_eq!(
            report,
            StopAllReport {
                total: 3,
                stop_requested: 2,
                stop_failed: 1,
                settled: 3,
            }
        );
        let events = mock.events();
        assert_eq!(
            &events[..3],
            &["stop:1:false", "stop:2:false", "stop:3:false"]
        );
        assert_eq!(mock.count("status:1"), 2);
        assert_eq!(mock.count("status:2"), 1);
        assert_eq!(mock.count("status:3"), 2);
    }

    #[tokio::test]
    async fn waits_run_in_listing_order() {
        let mock = MockTenable::new()
            .with_scans(vec![named(2, "b"), named(1, "a")])
            .with_statuses(1, vec![ScanStatus::Stopped])
            .with_statuses(2, vec![ScanStatus::Running, ScanStatus::Stopped]);

        helper(&mock).stop_all().await.unwrap();
        assert_eq!(
            mock.events(),
            vec!["stop:2:false", "stop:1:false", "status:2", "status:2", "status:1"]
        );
    }

    #[tokio::test]
    async fn wait_failure_aborts_remaining_waits() {
        let mock = MockTenable::new()
            .with_scans(vec![named(1, "a"), named(2, "b"), named(3, "c")])
            .with_statuses(1, vec![ScanStatus::Stopped])
            .with_statuses(2, vec![ScanStatus::Running])
            .with_statuses(3, vec![ScanStatus::Stopped])
            .failing_status(2);

        let err = helper(&mock).stop_all().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(mock.count("stop:"), 3);
        assert_eq!(mock.count("status:3"), 0);
    }

    #[tokio::test]
    async fn stop_all_in_folder_only_touches_folder() {
        let mock = MockTenable::new()
            .with_scans(vec![named(1, "a"), named(2, "b")])
            .with_folder(folder(7, "Ops"), vec![named(2, "b")])
            .with_statuses(2, vec![ScanStatus::Stopped]);

        let h = helper(&mock);
        let report = h.stop_all_in(&h.folders().folder(7)).await.unwrap();
        assert_eq!(report.total, 1);
        assert_eq!(mock.count("stop:1"), 0);
        assert_eq!(mock.count("stop:2"), 1);
    }

    #[tokio::test]
    async fn stop_empty_set_is_noop() {
        let mock = MockTenable::new();
        let report = helper(&mock).stop_scans(&[]).await.unwrap();
        assert_eq!(report, StopAllReport::default());
        assert!(mock.events().is_empty());
    }

    #[tokio::test]
    async fn concurrent_stop_keeps_the_contract() {
        let mock = MockTenable::new()
            .with_scans(vec![named(1, "a"), named(2, "b"), named(3, "c")])
            .with_statuses(1, vec![ScanStatus::Stopped])
            .with_statuses(2, vec![ScanStatus::Running, ScanStatus::Canceled])
            .with_statuses(3, vec![ScanStatus::Empty])
            .failing_stop(1);

        let h = helper(&mock);
        let scans = h.scans(None).await.unwrap();
        let report = h.stop_all_concurrently(&scans).await.unwrap();
        assert_eq!(report.stop_failed, 1);
        assert_eq!(report.stop_requested, 2);
        assert_eq!(report.settled, 3);

        let events = mock.events();
        let last_stop = events.iter().rposition(|e| e.starts_with("stop:")).unwrap();
        let first_status = events.iter().position(|e| e.starts_with("status:")).unwrap();
        assert!(last_stop < first_status);
    }

    #[tokio::test]
    async fn concurrent_wait_failure_propagates() {
        let mock = MockTenable::new()
            .with_scans(vec![named(1, "a"), named(2, "b")])
            .with_statuses(1, vec![ScanStatus::Stopped])
            .with_statuses(2, vec![ScanStatus::Running])
            .failing_status(2);

        let h = helper(&mock);
        let scans = h.scans(None).await.unwrap();
        assert!(h.stop_all_concurrently(&scans).await.is_err());
    }
}
