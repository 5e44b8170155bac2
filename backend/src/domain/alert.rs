//! Alert composition and delivery bookkeeping.
//!
//! An alert is composed once per request and sent to every matched donor.
//! Each attempt produces a [`DeliveryOutcome`]; the outcomes are folded into
//! an [`AlertSummary`] in a single pass after the last send.

use super::{AreaFilter, BloodGroupFilter, PhoneNumber};

/// Validated alert parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    pub hospital_name: String,
    pub area: AreaFilter,
    pub blood_group: BloodGroupFilter,
    pub additional_info: Option<String>,
}

impl AlertRequest {
    /// Render the SMS body shared by every recipient.
    ///
    /// Blank additional information is dropped without leaving a double
    /// space.
    ///
    /// # Examples
    /// ```
    /// use bloodlink::domain::{AlertRequest, AreaFilter, BloodGroupFilter};
    ///
    /// let request = AlertRequest {
    ///     hospital_name: "City Hospital".into(),
    ///     area: AreaFilter::All,
    ///     blood_group: BloodGroupFilter::Any,
    ///     additional_info: None,
    /// };
    /// assert_eq!(
    ///     request.message(),
    ///     "URGENT: Blood needed at City Hospital in All. Blood type: Any. Please help if you can."
    /// );
    /// ```
    pub fn message(&self) -> String {
        let mut message = format!(
            "URGENT: Blood needed at {} in {}. Blood type: {}. ",
            self.hospital_name,
            self.area.as_str(),
            self.blood_group.as_str(),
        );
        if let Some(info) = self
            .additional_info
            .as_deref()
            .map(str::trim)
            .filter(|info| !info.is_empty())
        {
            message.push_str(info);
            message.push(' ');
        }
        message.push_str("Please help if you can.");
        message
    }

    /// Phrase used when no donor matches.
    pub fn no_donors_message(&self) -> String {
        match &self.area {
            AreaFilter::All => {
                "No donors found with the required blood group in any area.".to_owned()
            }
            AreaFilter::Only(area) => {
                format!("No donors found with the required blood group in the {area} area.")
            }
        }
    }
}

/// Result of one send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The gateway accepted the message.
    Delivered,
    /// The gateway reported the number as permanently unreachable.
    InvalidDestination,
    /// Any other gateway or transport failure.
    Failed,
}

impl DeliveryStatus {
    /// Stable snake_case label, used in logs and metric labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::InvalidDestination => "invalid_destination",
            Self::Failed => "failed",
        }
    }
}

/// Outcome of sending the alert to one donor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub phone: PhoneNumber,
    pub status: DeliveryStatus,
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered)
    }
}

/// Numbers that the registry should forget after this dispatch.
pub fn invalid_destinations(outcomes: &[DeliveryOutcome]) -> Vec<PhoneNumber> {
    outcomes
        .iter()
        .filter(|outcome| outcome.status == DeliveryStatus::InvalidDestination)
        .map(|outcome| outcome.phone.clone())
        .collect()
}

/// Aggregate counts reported to the caller.
///
/// ## Invariants
/// - `successful_sends + failed_sends` equals the number of attempts.
/// - `failed_numbers.len() == failed_sends`, in attempt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSummary {
    pub successful_sends: usize,
    pub failed_sends: usize,
    pub failed_numbers: Vec<PhoneNumber>,
}

impl AlertSummary {
    /// Fold per-recipient outcomes into totals.
    pub fn from_outcomes(outcomes: &[DeliveryOutcome]) -> Self {
        outcomes.iter().fold(
            Self {
                successful_sends: 0,
                failed_sends: 0,
                failed_numbers: Vec::new(),
            },
            |mut summary, outcome| {
                if outcome.is_delivered() {
                    summary.successful_sends += 1;
                } else {
                    summary.failed_sends += 1;
                    summary.failed_numbers.push(outcome.phone.clone());
                }
                summary
            },
        )
    }

    /// Total attempts represented by this summary.
    pub fn attempted(&self) -> usize {
        self.successful_sends + self.failed_sends
    }

    /// Human-readable summary line.
    pub fn message(&self) -> String {
        let mut message = format!("Alert sent to {} donor(s).", self.successful_sends);
        if self.failed_sends > 0 {
            message.push_str(&format!(" {} failed.", self.failed_sends));
        }
        message
    }
}

#[cfg(test)]
mod tests {
    //! Message rendering and outcome aggregation.
    use super::*;
    use crate::domain::{Area, BloodGroup};
    use rstest::{fixture, rstest};

    fn phone(raw: &str) -> PhoneNumber {
        PhoneNumber::new(raw).expect("valid phone")
    }

    #[fixture]
    fn request() -> AlertRequest {
        AlertRequest {
            hospital_name: "Ruby Hall".to_owned(),
            area: AreaFilter::Only(Area::new("Kothrud").expect("valid area")),
            blood_group: BloodGroupFilter::Only(BloodGroup::ONegative),
            additional_info: Some("Ward 4.".to_owned()),
        }
    }

    #[rstest]
    fn message_includes_additional_info(request: AlertRequest) {
        assert_eq!(
            request.message(),
            "URGENT: Blood needed at Ruby Hall in Kothrud. Blood type: O-. Ward 4. Please help if you can."
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_info_collapses(mut request: AlertRequest, #[case] info: Option<&str>) {
        request.additional_info = info.map(str::to_owned);
        let message = request.message();
        assert!(!message.contains("  "), "double space in {message:?}");
        assert!(message.ends_with("Blood type: O-. Please help if you can."));
    }

    #[rstest]
    fn no_donor_message_names_area(mut request: AlertRequest) {
        assert_eq!(
            request.no_donors_message(),
            "No donors found with the required blood group in the Kothrud area."
        );
        request.area = AreaFilter::All;
        assert_eq!(
            request.no_donors_message(),
            "No donors found with the required blood group in any area."
        );
    }

    #[test]
    fn summary_counts_every_attempt() {
        let outcomes = vec![
            DeliveryOutcome {
                phone: phone("+911111111111"),
                status: DeliveryStatus::Delivered,
            },
            DeliveryOutcome {
                phone: phone("+912222222222"),
                status: DeliveryStatus::InvalidDestination,
            },
            DeliveryOutcome {
                phone: phone("+913333333333"),
                status: DeliveryStatus::Failed,
            },
        ];

        let summary = AlertSummary::from_outcomes(&outcomes);

        assert_eq!(summary.successful_sends, 1);
        assert_eq!(summary.failed_sends, 2);
        assert_eq!(summary.attempted(), outcomes.len());
        assert_eq!(
            summary.failed_numbers,
            vec![phone("+912222222222"), phone("+913333333333")]
        );
        assert_eq!(invalid_destinations(&outcomes), vec![phone("+912222222222")]);
        assert_eq!(summary.message(), "Alert sent to 1 donor(s). 2 failed.");
    }

    #[test]
    fn summary_message_omits_zero_failures() {
        let summary = AlertSummary::from_outcomes(&[DeliveryOutcome {
            phone: phone("+911111111111"),
            status: DeliveryStatus::Delivered,
        }]);
        assert_eq!(summary.message(), "Alert sent to 1 donor(s).");
        assert!(summary.failed_numbers.is_empty());
    }
}
