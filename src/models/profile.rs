// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile model for storage and access decisions.

use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Account role, assigned once at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Coach,
    Aluno,
    /// Anything the registration flow did not write. Grants nothing.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Recurring billing state as mirrored from the payments platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Unpaid,
    #[serde(other)]
    Other,
}

impl SubscriptionStatus {
    /// Whether this status entitles a coach to the coach area.
    pub fn is_entitled(self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Trialing)
    }
}

/// Profile row stored in Firestore (document ID = user ID).
///
/// Subscription and KYC fields are written by the payments webhook,
/// `approved` by the coach's approval action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileRecord {
    /// Auth provider user ID
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub role: Role,
    #[validate(email)]
    pub email: String,
    /// Only meaningful for alunos
    #[serde(default)]
    pub approved: bool,
    /// Only meaningful for coaches
    #[serde(default)]
    pub subscription_status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub charges_enabled: bool,
    #[serde(default)]
    pub payouts_enabled: bool,
    /// Set by provisioning; exempts the account from billing and KYC gating
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ProfileRecord {
    /// Convert the stored row into the snapshot the gate reads.
    ///
    /// `admin_email` is the deployment's legacy override address; a record
    /// whose email matches it exactly is treated as if `is_admin` were set.
    pub fn into_profile(self, admin_email: Option<&str>) -> Profile {
        let is_admin = self.is_admin.unwrap_or(false)
            || admin_email.is_some_and(|admin| admin == self.email);

        Profile {
            role: self.role,
            email: self.email,
            is_admin,
            approved: self.approved,
            subscription_status: self.subscription_status,
            charges_enabled: self.charges_enabled,
            payouts_enabled: self.payouts_enabled,
        }
    }
}

/// Read-only profile snapshot for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub role: Role,
    pub email: String,
    pub is_admin: bool,
    pub approved: bool,
    pub subscription_status: Option<SubscriptionStatus>,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
}

impl Profile {
    pub fn has_active_subscription(&self) -> bool {
        self.is_admin
            || self
                .subscription_status
                .is_some_and(SubscriptionStatus::is_entitled)
    }

    /// Payment-processor onboarding is complete.
    pub fn has_completed_kyc(&self) -> bool {
        self.charges_enabled && self.payouts_enabled
    }
}
