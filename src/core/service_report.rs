//! Field-service report form state and signature capture.

use crate::models::{
    ProblemInfo, ReportInfo, ServiceCustomer, ServiceInfo, ServiceReportRecord, SignatureBlock,
    Signatures,
};
use chrono::NaiveDate;
use serde::Deserialize;

/// A signature pad or any other source of a drawn signature.
pub trait SignatureCapture {
    /// Whether nothing has been drawn.
    fn is_empty(&self) -> bool;
    /// The drawing as a `data:` URL.
    fn to_data_url(&self) -> String;
}

/// A signature that was captured earlier, e.g. loaded from an image file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedSignature(pub Option<String>);

impl SignatureCapture for CapturedSignature {
    fn is_empty(&self) -> bool {
        self.0.as_deref().is_none_or(str::is_empty)
    }

    fn to_data_url(&self) -> String {
        self.0.clone().unwrap_or_default()
    }
}

/// Reads a capture, mapping an empty pad to "no signature".
#[must_use]
pub fn capture_signature(pad: &dyn SignatureCapture) -> Option<String> {
    if pad.is_empty() {
        None
    } else {
        Some(pad.to_data_url())
    }
}

/// The checkable problem categories, in print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemCategory {
    /// Breakdown call
    BreakdownCall,
    /// Repair or modification
    RepairModification,
    /// Installation of equipment
    Installation,
    /// Site inspection
    SiteInspection,
    /// Preventive maintenance
    PreventiveMaintenance,
    /// Testing and commissioning
    TestingCommissioning,
}

impl ProblemCategory {
    /// Every category in print order.
    pub const ALL: [Self; 6] = [
        Self::BreakdownCall,
        Self::RepairModification,
        Self::Installation,
        Self::SiteInspection,
        Self::PreventiveMaintenance,
        Self::TestingCommissioning,
    ];

    /// Printed label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BreakdownCall => "Breakdown Call",
            Self::RepairModification => "Repair/Modification",
            Self::Installation => "Installation of Equipment",
            Self::SiteInspection => "Site Inspection",
            Self::PreventiveMaintenance => "Preventive Maintenance",
            Self::TestingCommissioning => "Testing & Commissioning",
        }
    }

    /// Whether this category is ticked on `problem`.
    #[must_use]
    pub const fn is_checked(self, problem: &ProblemInfo) -> bool {
        match self {
            Self::BreakdownCall => problem.breakdown_call,
            Self::RepairModification => problem.repair_mod,
            Self::Installation => problem.install_equip,
            Self::SiteInspection => problem.site_inspect,
            Self::PreventiveMaintenance => problem.prevent_main,
            Self::TestingCommissioning => problem.test_comm,
        }
    }

    /// Ticks or unticks this category on `problem`.
    pub fn set(self, problem: &mut ProblemInfo, checked: bool) {
        match self {
            Self::BreakdownCall => problem.breakdown_call = checked,
            Self::RepairModification => problem.repair_mod = checked,
            Self::Installation => problem.install_equip = checked,
            Self::SiteInspection => problem.site_inspect = checked,
            Self::PreventiveMaintenance => problem.prevent_main = checked,
            Self::TestingCommissioning => problem.test_comm = checked,
        }
    }
}

/// Labels of the ticked categories joined by ", ".
#[must_use]
pub fn nature_of_problem(problem: &ProblemInfo) -> String {
    ProblemCategory::ALL
        .iter()
        .filter(|category| category.is_checked(problem))
        .map(|category| category.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Name and date of one signer; the drawing itself comes from a [`SignatureCapture`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Signer {
    /// Signer's name
    pub name: String,
    /// Signing date as `YYYY-MM-DD`
    pub date: String,
}

/// Live state of the service report form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceReportState {
    /// Customer
    pub customer: ServiceCustomer,
    /// Visit metadata
    pub report: ReportInfo,
    /// Problem categories and complaint
    pub problem: ProblemInfo,
    /// Work done
    pub service: ServiceInfo,
    /// Technician sign-off
    pub tech: Signer,
    /// Customer sign-off
    pub cust: Signer,
}

impl ServiceReportState {
    /// A blank report dated `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let mut state = Self::default();
        state.clear(today);
        state
    }

    /// Clears every field and unticks every category. The report and both signature
    /// dates go back to `today`.
    pub fn clear(&mut self, today: NaiveDate) {
        let date = today.format("%Y-%m-%d").to_string();
        *self = Self {
            report: ReportInfo {
                date: date.clone(),
                ..ReportInfo::default()
            },
            tech: Signer {
                date: date.clone(),
                ..Signer::default()
            },
            cust: Signer {
                date,
                ..Signer::default()
            },
            ..Self::default()
        };
    }

    /// Fills blank dates from `today`; used after loading a draft.
    pub fn default_dates(&mut self, today: NaiveDate) {
        let date = today.format("%Y-%m-%d").to_string();
        for field in [
            &mut self.report.date,
            &mut self.tech.date,
            &mut self.cust.date,
        ] {
            if field.is_empty() {
                field.clone_from(&date);
            }
        }
    }

    /// Freezes the form into a record, reading both signature pads.
    #[must_use]
    pub fn snapshot(
        &self,
        tech_pad: &dyn SignatureCapture,
        cust_pad: &dyn SignatureCapture,
        timestamp: String,
    ) -> ServiceReportRecord {
        ServiceReportRecord {
            customer: self.customer.clone(),
            report: self.report.clone(),
            problem: self.problem.clone(),
            service: self.service.clone(),
            signatures: Signatures {
                tech: SignatureBlock {
                    signature: capture_signature(tech_pad),
                    name: self.tech.name.clone(),
                    date: self.tech.date.clone(),
                },
                cust: SignatureBlock {
                    signature: capture_signature(cust_pad),
                    name: self.cust.name.clone(),
                    date: self.cust.date.clone(),
                },
            },
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_empty_capture_is_no_signature() {
        assert_eq!(capture_signature(&CapturedSignature(None)), None);
        assert_eq!(capture_signature(&CapturedSignature(Some(String::new()))), None);
        assert_eq!(
            capture_signature(&CapturedSignature(Some("data:image/png;base64,AA==".into()))),
            Some("data:image/png;base64,AA==".to_string())
        );
    }

    #[test]
    fn test_nature_of_problem_order() {
        let mut problem = ProblemInfo::default();
        assert_eq!(nature_of_problem(&problem), "");

        ProblemCategory::TestingCommissioning.set(&mut problem, true);
        ProblemCategory::BreakdownCall.set(&mut problem, true);
        ProblemCategory::SiteInspection.set(&mut problem, true);
        assert_eq!(
            nature_of_problem(&problem),
            "Breakdown Call, Site Inspection, Testing & Commissioning"
        );

        ProblemCategory::BreakdownCall.set(&mut problem, false);
        assert!(!problem.breakdown_call);
        assert_eq!(
            nature_of_problem(&problem),
            "Site Inspection, Testing & Commissioning"
        );
    }

    #[test]
    fn test_new_and_clear_set_dates() {
        let mut state = ServiceReportState::new(today());
        assert_eq!(state.report.date, "2024-03-05");
        assert_eq!(state.tech.date, "2024-03-05");
        assert_eq!(state.cust.date, "2024-03-05");

        state.customer.name = "Acme".to_string();
        state.problem.asd_work = true;
        state.tech.name = "Ravi".to_string();
        state.clear(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert!(state.customer.name.is_empty());
        assert!(!state.problem.asd_work);
        assert!(state.tech.name.is_empty());
        assert_eq!(state.cust.date, "2024-04-01");
    }

    #[test]
    fn test_default_dates_only_fills_blanks() {
        let mut state = ServiceReportState::default();
        state.tech.date = "2024-01-01".to_string();
        state.default_dates(today());
        assert_eq!(state.report.date, "2024-03-05");
        assert_eq!(state.tech.date, "2024-01-01");
    }

    #[test]
    fn test_snapshot_reads_pads() {
        let mut state = ServiceReportState::new(today());
        state.report.number = "SR-1".to_string();
        state.tech.name = "Ravi".to_string();

        let record = state.snapshot(
            &CapturedSignature(Some("data:image/png;base64,AA==".to_string())),
            &CapturedSignature(None),
            "2024-03-05T11:00:00.000Z".to_string(),
        );
        assert_eq!(record.report.number, "SR-1");
        assert_eq!(
            record.signatures.tech.signature.as_deref(),
            Some("data:image/png;base64,AA==")
        );
        assert_eq!(record.signatures.tech.name, "Ravi");
        assert!(record.signatures.cust.signature.is_none());
        assert_eq!(record.signatures.cust.date, "2024-03-05");

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["signatures"]["cust"]["signature"].is_null());
    }
}
