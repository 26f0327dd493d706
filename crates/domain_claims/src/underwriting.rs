//! Underwriting periods, policies, and the category derived from them

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{PolicyId, UnderwritingPeriodId};

/// A policy reachable from a claim through its underwriting period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub policy_identifier: Option<String>,
}

impl Policy {
    pub fn new(policy_identifier: impl Into<String>) -> Self {
        Self {
            id: PolicyId::generate(),
            policy_identifier: Some(policy_identifier.into()),
        }
    }
}

/// Underwriting period a claim was written under
///
/// The three policy numbers are only a classification signal; which one is
/// populated decides the claim category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnderwritingPeriod {
    pub id: UnderwritingPeriodId,
    pub policy_number_1: Option<String>,
    pub policy_number_2: Option<String>,
    pub policy_number_3: Option<String>,
    pub policy: Option<Policy>,
}

impl UnderwritingPeriod {
    /// Creates a period with no policy numbers and no policy
    pub fn new() -> Self {
        Self {
            id: UnderwritingPeriodId::generate(),
            policy_number_1: None,
            policy_number_2: None,
            policy_number_3: None,
            policy: None,
        }
    }

    pub fn with_policy_numbers(
        mut self,
        number_1: Option<&str>,
        number_2: Option<&str>,
        number_3: Option<&str>,
    ) -> Self {
        self.policy_number_1 = number_1.map(str::to_string);
        self.policy_number_2 = number_2.map(str::to_string);
        self.policy_number_3 = number_3.map(str::to_string);
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Category from the first populated policy number, in slot order
    pub fn category(&self) -> ClaimCategory {
        if self.policy_number_1.is_some() {
            ClaimCategory::Type1
        } else if self.policy_number_2.is_some() {
            ClaimCategory::Type2
        } else if self.policy_number_3.is_some() {
            ClaimCategory::Type3
        } else {
            ClaimCategory::Unclassified
        }
    }

    /// Identifier of the linked policy, if the link and the identifier both exist
    pub fn policy_identifier(&self) -> Option<&str> {
        self.policy
            .as_ref()
            .and_then(|p| p.policy_identifier.as_deref())
    }
}

impl Default for UnderwritingPeriod {
    fn default() -> Self {
        Self::new()
    }
}

/// Derived claim category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimCategory {
    Type1,
    Type2,
    Type3,
    /// No underwriting period, or none of its policy numbers set
    Unclassified,
}

impl ClaimCategory {
    /// Classifies an optional underwriting period
    pub fn classify(period: Option<&UnderwritingPeriod>) -> Self {
        period.map_or(ClaimCategory::Unclassified, UnderwritingPeriod::category)
    }

    /// Report label; unclassified claims carry an empty label
    pub fn label(&self) -> &'static str {
        match self {
            ClaimCategory::Type1 => "Type1",
            ClaimCategory::Type2 => "Type2",
            ClaimCategory::Type3 => "Type3",
            ClaimCategory::Unclassified => "",
        }
    }
}

impl fmt::Display for ClaimCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_populated_slot_wins() {
        let period = UnderwritingPeriod::new().with_policy_numbers(Some("PN001"), Some("PN001"), Some("PN003"));
        assert_eq!(period.category(), ClaimCategory::Type1);

        let period = UnderwritingPeriod::new().with_policy_numbers(None, Some("X"), Some("Y"));
        assert_eq!(period.category(), ClaimCategory::Type2);

        let period = UnderwritingPeriod::new().with_policy_numbers(None, None, Some("Y"));
        assert_eq!(period.category(), ClaimCategory::Type3);
    }

    #[test]
    fn test_empty_period_is_unclassified() {
        assert_eq!(UnderwritingPeriod::new().category(), ClaimCategory::Unclassified);
        assert_eq!(ClaimCategory::classify(None).label(), "");
    }

    #[test]
    fn test_policy_identifier_requires_whole_chain() {
        let mut period = UnderwritingPeriod::new();
        assert_eq!(period.policy_identifier(), None);

        period.policy = Some(Policy {
            id: PolicyId::generate(),
            policy_identifier: None,
        });
        assert_eq!(period.policy_identifier(), None);

        let period = UnderwritingPeriod::new().with_policy(Policy::new("POL001"));
        assert_eq!(period.policy_identifier(), Some("POL001"));
    }
}
