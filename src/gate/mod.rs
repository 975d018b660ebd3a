// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access gate: decides, per page request, whether to serve the page,
//! serve different content in its place, or send the browser elsewhere.
//!
//! The decision is a pure function of the hostname, the path, whether a
//! session exists, and the caller's profile snapshot. Fetching the profile
//! is the caller's job (see `middleware::gate`), so it happens once per
//! request.

pub mod routes;

pub use routes::{is_asset_path, normalize_path, RouteClass, RouteTable};

use crate::models::{Profile, Role};
use routes::*;
use serde::Serialize;

/// What the page server should do with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "location", rename_all = "snake_case")]
pub enum Action {
    /// Serve the requested path unchanged.
    Proceed,
    /// Serve this path's content, keeping the browser URL.
    Rewrite(String),
    /// Send the browser to this path.
    Redirect(String),
}

impl Action {
    fn redirect(path: &str) -> Self {
        Action::Redirect(path.to_string())
    }
}

/// Proof of authentication. Its existence is all the gate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

/// Request-scoped gating decisions.
#[derive(Debug, Clone)]
pub struct AccessGate {
    routes: RouteTable,
    questionnaire_host: String,
}

impl AccessGate {
    /// `questionnaire_host` is the secondary-brand hostname whose root
    /// serves the public questionnaire.
    pub fn new(questionnaire_host: impl Into<String>) -> Self {
        Self {
            routes: RouteTable::default(),
            questionnaire_host: questionnaire_host.into(),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide what to do with a request.
    ///
    /// `profile` is ignored without a session. A session whose profile is
    /// missing, failed to load, or has no recognized role is treated as
    /// having no privileges.
    pub fn decide(
        &self,
        hostname: &str,
        path: &str,
        session: Option<&Session>,
        profile: Option<&Profile>,
    ) -> Action {
        if hostname == self.questionnaire_host && path == "/" {
            return Action::Rewrite(QUESTIONNAIRE.to_string());
        }

        let class = self.routes.classify(path);

        if session.is_none() {
            return match class {
                RouteClass::Public => Action::Proceed,
                _ => Action::redirect(LOGIN),
            };
        }

        match profile {
            Some(profile) if profile.role == Role::Coach => decide_coach(path, class, profile),
            Some(profile) if profile.role == Role::Aluno => decide_aluno(path, class, profile),
            _ => match class {
                RouteClass::Public => Action::Proceed,
                _ => Action::redirect(LOGIN),
            },
        }
    }
}

fn decide_coach(path: &str, class: RouteClass, profile: &Profile) -> Action {
    let subscribed = profile.has_active_subscription();
    let kyc_done = profile.is_admin || profile.has_completed_kyc();

    if class == RouteClass::Public {
        // Post-login bounce into the onboarding funnel
        return if !subscribed {
            Action::redirect(COACH_CHOOSE_PLAN)
        } else if !kyc_done {
            Action::redirect(COACH_BANK_DETAILS)
        } else {
            Action::redirect(COACH_DASHBOARD)
        };
    }

    if is_under(path, COACH_AREA) {
        if class != RouteClass::Payment && !subscribed {
            return Action::redirect(COACH_CHOOSE_PLAN);
        }
        if class == RouteClass::Protected && !kyc_done {
            return Action::redirect(COACH_BANK_DETAILS);
        }
    }

    if is_under(path, ALUNO_AREA) {
        return Action::redirect(COACH_DASHBOARD);
    }

    Action::Proceed
}

fn decide_aluno(path: &str, class: RouteClass, profile: &Profile) -> Action {
    // Approval outranks the post-login bounce, otherwise an unapproved
    // aluno would bounce between the dashboard and the waiting room.
    if !profile.approved {
        return if path == AWAITING_APPROVAL {
            Action::Proceed
        } else {
            Action::redirect(AWAITING_APPROVAL)
        };
    }

    if class == RouteClass::Public {
        return Action::redirect(ALUNO_DASHBOARD);
    }

    if is_under(path, COACH_AREA) {
        return Action::redirect(ALUNO_DASHBOARD);
    }

    Action::Proceed
}
