//! `modulizer`: modularization report

use dnaspec_router::SkillHandler;
use dnaspec_types::{Context, Result, SkillDescriptor};
use tracing::debug;

use crate::common::{bullets, context_list, mentions_any, require_request};
use crate::BUILTIN_VERSION;

/// Skill name
pub const NAME: &str = "modulizer";

const KEYWORDS: &[&str] = &[
    "模块化", "重构", "modularization", "refactor", "maturity", "模块成熟度", "封装",
    "modulize", "optimize", "优化", "模块重构", "系统优化",
];

const PRIORITY_KEYWORDS: &[&str] = &["模块化", "模块成熟度", "模块重构"];

/// Module name, responsibility and the words that suggest it
const MODULES: &[(&str, &str, &[&str])] = &[
    ("auth", "Identity, sessions and permissions", &["认证", "登录", "权限", "auth", "login", "permission"]),
    ("user", "User accounts and profiles", &["用户", "账户", "user", "account", "profile"]),
    ("catalog", "Products and inventory", &["商品", "库存", "product", "catalog", "inventory"]),
    ("order", "Order lifecycle", &["订单", "order"]),
    ("payment", "Payments and refunds", &["支付", "退款", "payment", "refund"]),
    ("notification", "Email, SMS and push delivery", &["通知", "消息", "notification", "email", "sms"]),
    ("reporting", "Reports and analytics", &["报表", "统计", "report", "analytics"]),
    ("logging", "Logs and audit trail", &["日志", "审计", "log", "audit"]),
];

/// Modules every other module may depend on
const FOUNDATION: &[&str] = &["auth", "logging"];

const MATURITY_CHECKLIST: &[&str] = &[
    "Each module has a single responsibility",
    "Modules talk only through public interfaces",
    "No dependency cycles between modules",
    "Each module has its own tests",
    "Each module can be built and released on its own",
];

/// Descriptor of the `modulizer` skill
pub fn descriptor() -> SkillDescriptor {
    SkillDescriptor::new(
        NAME,
        "Modularization and refactoring: proposes module boundaries and assesses maturity",
    )
    .with_keywords(KEYWORDS)
    .with_priority_keywords(PRIORITY_KEYWORDS)
    .with_version(BUILTIN_VERSION)
}

/// A proposed module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePlan {
    /// Module name
    pub name: String,
    /// What the module owns
    pub responsibility: String,
    /// Modules it may depend on
    pub depends_on: Vec<String>,
}

/// Modularization report generator
///
/// Context key `modules` (array or comma-separated) replaces module
/// detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModulizerSkill;

impl ModulizerSkill {
    /// Module boundaries for a request
    pub fn plan(request: &str, requested: &[String]) -> Vec<ModulePlan> {
        let text = request.to_lowercase();

        let mut modules: Vec<(String, String)> = if requested.is_empty() {
            MODULES
                .iter()
                .filter(|(_, _, keywords)| mentions_any(&text, keywords))
                .map(|(name, responsibility, _)| ((*name).to_string(), (*responsibility).to_string()))
                .collect()
        } else {
            requested
                .iter()
                .map(|name| {
                    let name = name.to_lowercase();
                    let responsibility = MODULES
                        .iter()
                        .find(|(known, _, _)| *known == name)
                        .map_or("To be defined", |(_, r, _)| *r);
                    (name, responsibility.to_string())
                })
                .collect()
        };

        if modules.is_empty() {
            modules.push(("core".to_string(), "Domain logic of the system".to_string()));
        }

        let foundation: Vec<String> = modules
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| FOUNDATION.contains(&name.as_str()))
            .collect();

        modules
            .into_iter()
            .map(|(name, responsibility)| {
                let depends_on = if FOUNDATION.contains(&name.as_str()) {
                    Vec::new()
                } else {
                    foundation.clone()
                };
                ModulePlan {
                    name,
                    responsibility,
                    depends_on,
                }
            })
            .collect()
    }
}

fn recommendations(text: &str) -> Vec<&'static str> {
    let mut recommendations = Vec::new();
    if mentions_any(text, &["重构", "refactor", "遗留", "legacy"]) {
        recommendations.push("Extract one module at a time behind an interface, keeping the old path until callers move");
    }
    if mentions_any(text, &["优化", "optimize", "性能", "performance"]) {
        recommendations.push("Measure before moving code across module boundaries for speed");
    }
    if mentions_any(text, &["封装", "encapsulat"]) {
        recommendations.push("Keep module internals private and expose the smallest useful surface");
    }
    recommendations.push("Record module ownership next to the code");
    recommendations
}

impl SkillHandler for ModulizerSkill {
    fn name(&self) -> &str {
        NAME
    }

    fn generate(&self, message: &str, context: &Context) -> Result<String> {
        let request = require_request(NAME, message)?;
        let plan = Self::plan(request, &context_list(context, "modules"));
        debug!("Proposed {} modules", plan.len());

        let table: String = plan
            .iter()
            .map(|module| {
                let depends = if module.depends_on.is_empty() {
                    "-".to_string()
                } else {
                    module.depends_on.join(", ")
                };
                format!(
                    "| {} | {} | {} |\n",
                    module.name, module.responsibility, depends
                )
            })
            .collect();

        let checklist: String = MATURITY_CHECKLIST
            .iter()
            .map(|item| format!("- [ ] {item}\n"))
            .collect();

        Ok(format!(
            "# Modularization Report\n\n\
             **Scope**: {request}\n\n\
             ## Proposed Modules\n\n\
             | Module | Responsibility | Depends on |\n\
             |--------|----------------|------------|\n\
             {table}\n\
             ## Maturity Checklist\n\n{checklist}\n\
             ## Recommendations\n\n{}",
            bullets(recommendations(&request.to_lowercase())),
        ))
    }
}
