//! Warranty records as the remote API returns them, plus derived views.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::status::{derive_status, StatusReport, WarrantyStatus};

// == Warranty ==
/// A user-tracked warranty.
///
/// Dates stay as the raw strings the API sent; a malformed date only makes
/// the derived status `unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warranty {
    pub id: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Warranty {
    /// Derives this warranty's status at `now`.
    pub fn status_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> StatusReport {
        derive_status(self.expiry_date.as_deref(), now)
    }
}

// == Warranty View ==
/// A warranty annotated with its derived status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarrantyView {
    #[serde(flatten)]
    pub warranty: Warranty,
    #[serde(flatten)]
    pub report: StatusReport,
}

impl WarrantyView {
    pub fn new<Tz: TimeZone>(warranty: Warranty, now: &DateTime<Tz>) -> Self {
        let report = warranty.status_at(now);
        Self { warranty, report }
    }
}

/// Annotates every warranty and sorts the result most urgent first.
///
/// The sort is stable, so warranties with equal urgency keep their input order.
pub fn annotate_by_urgency<Tz: TimeZone>(
    warranties: Vec<Warranty>,
    now: &DateTime<Tz>,
) -> Vec<WarrantyView> {
    let mut views: Vec<WarrantyView> = warranties
        .into_iter()
        .map(|warranty| WarrantyView::new(warranty, now))
        .collect();
    views.sort_by(|a, b| a.report.urgency_cmp(&b.report));
    views
}

// == Status Counts ==
/// Per-status tallies for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: WarrantyStatus) {
        self.total += 1;
        match status {
            WarrantyStatus::Active => self.active += 1,
            WarrantyStatus::ExpiringSoon => self.expiring_soon += 1,
            WarrantyStatus::Expired => self.expired += 1,
            WarrantyStatus::Unknown => self.unknown += 1,
        }
    }
}

impl<'a> FromIterator<&'a WarrantyView> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a WarrantyView>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for view in iter {
            counts.record(view.report.status);
        }
        counts
    }
}
