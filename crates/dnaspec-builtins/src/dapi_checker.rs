//! `dapi-checker`: interface consistency checklist

use dnaspec_router::SkillHandler;
use dnaspec_types::{Context, DnaspecError, Result, SkillDescriptor};
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

use crate::common::{bullets, mentions_any, require_request};
use crate::BUILTIN_VERSION;

/// Skill name
pub const NAME: &str = "dapi-checker";

const KEYWORDS: &[&str] = &[
    "接口检查", "一致性检查", "api validation", "interface", "接口验证", "检查", "验证",
    "consistency", "api", "validation", "检查接口", "验证一致性",
];

const PRIORITY_KEYWORDS: &[&str] = &["接口检查", "一致性检查", "api validation", "检查接口"];

const ENDPOINT_PATTERN: &str = r"(?i)\b(GET|POST|PUT|PATCH|DELETE)\s+(/[A-Za-z0-9_\-/{}:.]*)";

const BASE_CHECKLIST: &[&str] = &[
    "Names follow one convention across all interfaces",
    "Every operation documents its inputs, outputs and errors",
    "Error responses share one shape",
    "Breaking changes bump the interface version",
];

/// An HTTP operation mentioned in the request
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Endpoint {
    /// Uppercase HTTP method
    pub method: String,
    /// Path as written
    pub path: String,
}

/// Descriptor of the `dapi-checker` skill
pub fn descriptor() -> SkillDescriptor {
    SkillDescriptor::new(
        NAME,
        "Checks interface and API consistency across modules and services",
    )
    .with_keywords(KEYWORDS)
    .with_priority_keywords(PRIORITY_KEYWORDS)
    .with_version(BUILTIN_VERSION)
}

/// Interface consistency checker
#[derive(Debug, Clone, Copy, Default)]
pub struct DapiCheckerSkill;

impl DapiCheckerSkill {
    /// HTTP operations written as `METHOD /path`
    ///
    /// # Errors
    /// Returns [`DnaspecError::SkillExecution`] if the endpoint pattern fails to compile
    pub fn endpoints(request: &str) -> Result<Vec<Endpoint>> {
        let re = Regex::new(ENDPOINT_PATTERN)
            .map_err(|e| DnaspecError::execution(NAME, format!("invalid endpoint pattern: {e}")))?;

        Ok(re
            .captures_iter(request)
            .map(|caps| Endpoint {
                method: caps[1].to_uppercase(),
                path: caps[2].trim_end_matches('.').to_string(),
            })
            .collect())
    }

    /// Consistency findings for a set of endpoints
    pub fn findings(endpoints: &[Endpoint]) -> Vec<String> {
        let mut findings = Vec::new();

        let mut seen = BTreeSet::new();
        for endpoint in endpoints {
            if !seen.insert(endpoint) {
                findings.push(format!(
                    "Duplicate operation: {} {}",
                    endpoint.method, endpoint.path
                ));
            }
        }

        let styles: BTreeSet<&str> = endpoints
            .iter()
            .flat_map(|endpoint| endpoint.path.split('/'))
            .filter(|segment| !segment.starts_with('{') && !segment.starts_with(':'))
            .filter_map(naming_style)
            .collect();
        if styles.len() > 1 {
            let styles: Vec<&str> = styles.into_iter().collect();
            findings.push(format!("Mixed path naming styles: {}", styles.join(", ")));
        }

        if endpoints.iter().any(|e| e.path.len() > 1 && e.path.ends_with('/'))
            && endpoints.iter().any(|e| !e.path.ends_with('/'))
        {
            findings.push("Inconsistent trailing slashes".to_string());
        }

        findings
    }
}

/// Naming style of a path segment, if it has a distinctive one
fn naming_style(segment: &str) -> Option<&'static str> {
    if segment.contains('_') {
        Some("snake_case")
    } else if segment.contains('-') {
        Some("kebab-case")
    } else if segment.chars().any(char::is_uppercase) && segment.chars().any(char::is_lowercase) {
        Some("camelCase")
    } else {
        None
    }
}

fn interface_checks(text: &str) -> Vec<&'static str> {
    let mut checks = Vec::new();
    if mentions_any(text, &["rest", "http", "get ", "post ", "endpoint"]) {
        checks.push("HTTP methods match their semantics: GET is safe, PUT and DELETE are idempotent");
        checks.push("Collections are plural nouns and identifiers are path parameters");
    }
    if mentions_any(text, &["grpc", "protobuf", "proto"]) {
        checks.push("Field numbers are never reused after removal");
    }
    if mentions_any(text, &["graphql"]) {
        checks.push("Nullable fields are intentional and documented");
    }
    if mentions_any(text, &["事件", "消息", "event", "message", "queue"]) {
        checks.push("Event payloads carry a schema version");
    }
    checks
}

impl SkillHandler for DapiCheckerSkill {
    fn name(&self) -> &str {
        NAME
    }

    fn generate(&self, message: &str, _context: &Context) -> Result<String> {
        let request = require_request(NAME, message)?;
        let text = request.to_lowercase();

        let endpoints = Self::endpoints(request)?;
        let findings = Self::findings(&endpoints);
        debug!(
            "Checked {} endpoints, {} findings",
            endpoints.len(),
            findings.len()
        );

        let checklist: String = BASE_CHECKLIST
            .iter()
            .copied()
            .chain(interface_checks(&text))
            .map(|item| format!("- [ ] {item}\n"))
            .collect();

        let endpoint_list = if endpoints.is_empty() {
            "No `METHOD /path` operations found in the request.\n".to_string()
        } else {
            bullets(
                endpoints
                    .iter()
                    .map(|e| format!("`{} {}`", e.method, e.path)),
            )
        };

        let findings = if findings.is_empty() {
            "No inconsistencies detected.\n".to_string()
        } else {
            bullets(&findings)
        };

        Ok(format!(
            "# Interface Consistency Check\n\n\
             **Scope**: {request}\n\n\
             ## Operations\n\n{endpoint_list}\n\
             ## Findings\n\n{findings}\n\
             ## Checklist\n\n{checklist}"
        ))
    }
}
