// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route classification tables.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const LOGIN: &str = "/login";
pub const AWAITING_APPROVAL: &str = "/aguardando-aprovacao";
pub const QUESTIONNAIRE: &str = "/questionario";
pub const COACH_CHOOSE_PLAN: &str = "/coach/escolher-plano";
pub const COACH_PAYMENT_SUCCESS: &str = "/coach/pagamento-sucesso";
pub const COACH_BANK_DETAILS: &str = "/coach/dados-bancarios";
pub const COACH_PROFILE: &str = "/coach/perfil";
pub const COACH_DASHBOARD: &str = "/coach/dashboard";
pub const ALUNO_DASHBOARD: &str = "/aluno/dashboard";

pub const COACH_AREA: &str = "/coach";
pub const ALUNO_AREA: &str = "/aluno";

/// Reachable without a session.
const PUBLIC_ROUTES: &[&str] = &[
    LOGIN,
    "/cadastro",
    "/cadastro/coach",
    "/cadastro/aluno",
    "/cadastro-aluno",
    AWAITING_APPROVAL,
    QUESTIONNAIRE,
];

/// Plan selection and checkout return pages.
const PAYMENT_ROUTES: &[&str] = &[COACH_CHOOSE_PLAN, COACH_PAYMENT_SUCCESS];

/// Onboarding pages a coach needs to finish payment-processor KYC.
const KYC_ROUTES: &[&str] = &[COACH_BANK_DETAILS, COACH_PROFILE];

/// Bundled static files the gate never sees.
const ASSET_PREFIXES: &[&str] = &["/_next/static", "/_next/image", "/assets", "/favicon.ico"];
const ASSET_EXTENSIONS: &[&str] = &[".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp", ".ico"];

/// Classification of a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    Public,
    Payment,
    Kyc,
    Protected,
}

/// The fixed route lists consulted by the gate.
#[derive(Debug, Clone)]
pub struct RouteTable {
    public: &'static [&'static str],
    payment: &'static [&'static str],
    kyc: &'static [&'static str],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            public: PUBLIC_ROUTES,
            payment: PAYMENT_ROUTES,
            kyc: KYC_ROUTES,
        }
    }
}

impl RouteTable {
    pub fn classify(&self, path: &str) -> RouteClass {
        if matches_any(self.public, path) {
            RouteClass::Public
        } else if matches_any(self.payment, path) {
            RouteClass::Payment
        } else if matches_any(self.kyc, path) {
            RouteClass::Kyc
        } else {
            RouteClass::Protected
        }
    }
}

/// `path` is `route` itself or somewhere beneath it.
pub fn is_under(path: &str, route: &str) -> bool {
    match path.strip_prefix(route) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn matches_any(routes: &[&str], path: &str) -> bool {
    routes.iter().any(|route| is_under(path, route))
}

/// Canonical form of a request path, as the page bundle resolves it.
///
/// Percent-decodes and collapses repeated `/`, keeping a trailing slash.
/// Returns `None` for paths that do not start with `/`, are not UTF-8
/// once decoded, or contain `.` or `..` segments.
pub fn normalize_path(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;
    if !decoded.starts_with('/') {
        return None;
    }

    let mut normalized = String::with_capacity(decoded.len());
    for segment in decoded.split('/').filter(|segment| !segment.is_empty()) {
        if segment == "." || segment == ".." {
            return None;
        }
        normalized.push('/');
        normalized.push_str(segment);
    }

    if normalized.is_empty() || decoded.ends_with('/') {
        normalized.push('/');
    }

    Some(normalized)
}

/// Requests for static assets bypass gating entirely.
///
/// `path` must already be normalized.
pub fn is_asset_path(path: &str) -> bool {
    if ASSET_PREFIXES.iter().any(|prefix| is_under(path, prefix)) {
        return true;
    }

    let lower = path.to_ascii_lowercase();
    ASSET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
